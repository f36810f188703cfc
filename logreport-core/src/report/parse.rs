use crate::report::error::ReportError;
use crate::report::types::{LogFile, ParseOutcome};

use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Lines};

const METHODS: &[&str] = &["GET", "POST", "HEAD"];

/// Lazy, single-pass stream of parse outcomes, one per log line.
///
/// The underlying file handle lives exactly as long as this value; dropping
/// the iterator mid-stream releases it. The whole file is never buffered.
pub struct LogLines {
    lines: Lines<Box<dyn BufRead>>,
}

impl LogLines {
    /// Opens the log for reading, transparently decompressing `.gz` files.
    pub fn open(log: &LogFile) -> Result<Self, ReportError> {
        let file = File::open(&log.path).map_err(|e| ReportError::io(&log.path, e))?;

        let reader: Box<dyn BufRead> = if log.compressed {
            Box::new(BufReader::new(GzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        };

        Ok(Self {
            lines: reader.lines(),
        })
    }
}

impl Iterator for LogLines {
    type Item = io::Result<ParseOutcome>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        Some(line.map(|l| parse_line(&l)))
    }
}

/// Parses one raw log line.
///
/// A line is a `Record` only when both extractions succeed: an HTTP
/// method+path somewhere in the line, and a trailing numeric duration
/// token. Anything else is `Malformed`.
pub(crate) fn parse_line(line: &str) -> ParseOutcome {
    let line = line.trim();

    match (extract_endpoint(line), extract_duration(line)) {
        (Some(endpoint), Some(duration)) => ParseOutcome::Record { endpoint, duration },
        _ => ParseOutcome::Malformed,
    }
}

/// Finds the earliest `METHOD path` pair in the line.
///
/// The method must start the line or follow a non-alphanumeric byte (the
/// nginx request field is quoted, so `"GET` is the common case), and the
/// path must be followed by more whitespace.
fn extract_endpoint(line: &str) -> Option<String> {
    for (pos, _) in line.char_indices() {
        if !token_starts_at(line, pos) {
            continue;
        }

        let rest = &line[pos..];
        let Some(method) = METHODS.iter().find(|m| rest.starts_with(**m)) else {
            continue;
        };

        if let Some(endpoint) = endpoint_at(rest, method) {
            return Some(endpoint);
        }
    }

    None
}

fn token_starts_at(line: &str, pos: usize) -> bool {
    line[..pos]
        .chars()
        .next_back()
        .is_none_or(|c| !c.is_ascii_alphanumeric())
}

fn endpoint_at(rest: &str, method: &str) -> Option<String> {
    let after = rest.strip_prefix(method)?;

    // At least one whitespace between method and path.
    let path_region = after.trim_start();
    if path_region.len() == after.len() {
        return None;
    }

    // The path token must be followed by whitespace in turn.
    let path_end = path_region.find(char::is_whitespace)?;
    let path = &path_region[..path_end];

    Some(format!("{method} {path}"))
}

/// Takes the final whitespace-separated token as the request duration.
fn extract_duration(line: &str) -> Option<f64> {
    let last_space = line.rfind(char::is_whitespace)?;
    let token = line[last_space..].trim_start();

    if !is_duration_literal(token) {
        return None;
    }

    token.parse().ok()
}

/// Numeric grammar of a duration token: optional sign, an integer or
/// fractional mantissa, optional exponent. `f64::parse` alone is too
/// permissive here ("inf", "NaN").
fn is_duration_literal(token: &str) -> bool {
    let unsigned = token.strip_prefix(['+', '-']).unwrap_or(token);

    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((m, e)) => (m, Some(e)),
        None => (unsigned, None),
    };

    let mantissa_ok = match mantissa.split_once('.') {
        Some((int, frac)) => {
            let digits_only =
                |s: &str| s.bytes().all(|b| b.is_ascii_digit());
            if int.is_empty() {
                !frac.is_empty() && digits_only(frac)
            } else {
                digits_only(int) && digits_only(frac)
            }
        }
        None => !mantissa.is_empty() && mantissa.bytes().all(|b| b.is_ascii_digit()),
    };

    let exponent_ok = exponent.is_none_or(|e| {
        let e = e.strip_prefix(['+', '-']).unwrap_or(e);
        !e.is_empty() && e.bytes().all(|b| b.is_ascii_digit())
    });

    mantissa_ok && exponent_ok
}
