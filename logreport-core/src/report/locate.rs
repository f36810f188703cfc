use crate::report::error::ReportError;
use crate::report::types::LogFile;

use chrono::NaiveDate;
use glob::glob;
use std::path::Path;

/// Fixed name prefix of the access logs this tool processes.
pub const LOG_NAME_PREFIX: &str = "nginx-access-ui.log-";

const GZ_SUFFIX: &str = ".gz";

/// Finds the access log with the greatest embedded date in `log_dir`.
///
/// Candidates are `nginx-access-ui.log-YYYYMMDD`, optionally `.gz`; names
/// whose date token is not a real calendar date are skipped. Ties between
/// a plain and a compressed file for the same day keep the first candidate
/// in glob's sorted order. The file is not opened here.
pub fn find_latest_log(log_dir: &Path) -> Result<LogFile, ReportError> {
    let pattern = log_dir
        .join(format!("{LOG_NAME_PREFIX}*"))
        .to_string_lossy()
        .into_owned();

    let entries = glob(&pattern).map_err(|e| ReportError::Glob {
        pattern: pattern.clone(),
        source: e,
    })?;

    let mut newest: Option<LogFile> = None;
    for path in entries.filter_map(Result::ok) {
        let Some(candidate) = classify(&path) else {
            continue;
        };

        match &newest {
            Some(current) if candidate.date <= current.date => {}
            _ => newest = Some(candidate),
        }
    }

    newest.ok_or(ReportError::NoLogFound { pattern })
}

/// Extracts the date token from a candidate path, or `None` if the name
/// does not fit the `<prefix>YYYYMMDD[.gz]` shape.
fn classify(path: &Path) -> Option<LogFile> {
    let name = path.file_name()?.to_str()?;
    let token = name.strip_prefix(LOG_NAME_PREFIX)?;

    let (token, compressed) = match token.strip_suffix(GZ_SUFFIX) {
        Some(stripped) => (stripped, true),
        None => (token, false),
    };

    let date = NaiveDate::parse_from_str(token, "%Y%m%d").ok()?;

    Some(LogFile {
        path: path.to_path_buf(),
        date,
        compressed,
    })
}
