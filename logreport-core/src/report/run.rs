use crate::conf::Config;
use crate::report::aggregate::aggregate;
use crate::report::error::ReportError;
use crate::report::locate::find_latest_log;
use crate::report::parse::LogLines;
use crate::report::render::render_report;
use crate::report::select::top_by_time;
use crate::report::stats::build_table;

use chrono::Local;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Runs the whole pipeline once: locate → parse+aggregate → select+stats
/// → render → write. Returns the path of the written report.
///
/// A run against a date whose report already exists terminates with
/// `AlreadyExists` before the log is opened. Nothing is written on any
/// failure path; the timestamp marker only lands after the report rename
/// succeeds.
pub fn run_report(config: &Config) -> Result<PathBuf, ReportError> {
    //--------------------------------------------------------------------------
    // Locate the newest log, guard against re-processing
    //--------------------------------------------------------------------------
    let log = find_latest_log(&config.log_dir)?;
    tracing::info!(path = %log.path.display(), date = %log.date, "processing log file");

    let report_path = config
        .report_dir
        .join(format!("report-{}.html", log.date.format("%Y.%m.%d")));

    if report_path.is_file() {
        return Err(ReportError::AlreadyExists { path: report_path });
    }

    //--------------------------------------------------------------------------
    // Parse and aggregate in one streaming pass
    //--------------------------------------------------------------------------
    let lines = LogLines::open(&log)?;
    let agg = aggregate(lines, &log.path, config.critical_perc_err)?;
    tracing::info!(
        good = agg.good_lines,
        bad = agg.bad_lines,
        endpoints = agg.per_endpoint.len(),
        "log parsed"
    );

    //--------------------------------------------------------------------------
    // Select, compute stats, render
    //--------------------------------------------------------------------------
    let ranked = top_by_time(&agg.per_endpoint, config.report_size);
    let table = build_table(&agg, &ranked);

    let template =
        fs::read_to_string(&config.report_template).map_err(|e| ReportError::TemplateNotFound {
            path: config.report_template.clone(),
            source: e,
        })?;

    let html = render_report(&template, &config.report_template, &table)?;

    //--------------------------------------------------------------------------
    // Atomic write, then the success marker
    //--------------------------------------------------------------------------
    write_atomically(&report_path, &config.report_dir, &html)?;
    tracing::info!(path = %report_path.display(), rows = table.len(), "report created");

    write_marker(&config.ts)?;

    Ok(report_path)
}

/// Writes via a temporary file in the target directory plus a rename, so a
/// failed run never leaves a partial report or a stray temp file behind.
fn write_atomically(target: &Path, dir: &Path, content: &str) -> Result<(), ReportError> {
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| ReportError::io(dir, e))?;
    tmp.write_all(content.as_bytes())
        .map_err(|e| ReportError::io(target, e))?;
    tmp.persist(target).map_err(|e| ReportError::io(target, e.error))?;
    Ok(())
}

fn write_marker(path: &Path) -> Result<(), ReportError> {
    let stamp = Local::now().format("%Y%m%d-%H%M%S").to_string();
    fs::write(path, stamp).map_err(|e| ReportError::io(path, e))
}
