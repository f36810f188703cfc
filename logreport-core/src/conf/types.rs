use serde::Deserialize;
use std::path::PathBuf;

/// Effective runtime configuration: built-in defaults with the values from
/// the config file layered on top.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of endpoints in the rendered report table.
    pub report_size: usize,
    /// Directory the report is written to.
    pub report_dir: PathBuf,
    /// HTML template containing the `$table_json` placeholder.
    pub report_template: PathBuf,
    /// Directory scanned for access logs.
    pub log_dir: PathBuf,
    /// Abort when the malformed-line percentage exceeds this value.
    pub critical_perc_err: f64,
    /// Diagnostic log destination; stderr when unset.
    pub logging: Option<PathBuf>,
    /// Timestamp marker written after a successful run.
    pub ts: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            report_size: 1000,
            report_dir: PathBuf::from("./reports"),
            report_template: PathBuf::from("./reports/report.html"),
            log_dir: PathBuf::from("./log"),
            critical_perc_err: 50.0,
            logging: None,
            ts: PathBuf::from("./log_analyzer.ts"),
        }
    }
}

/// Subset of keys present in a config file. Keys are spelled the way the
/// config files spell them (`REPORT_SIZE`, `LOG_DIR`, ...); unknown keys
/// are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) struct ConfigOverrides {
    pub report_size: Option<usize>,
    pub report_dir: Option<PathBuf>,
    pub report_template: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub critical_perc_err: Option<f64>,
    pub logging: Option<PathBuf>,
    pub ts: Option<PathBuf>,
}

impl Config {
    pub(crate) fn apply(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(report_size) = overrides.report_size {
            self.report_size = report_size;
        }
        if let Some(report_dir) = overrides.report_dir {
            self.report_dir = report_dir;
        }
        if let Some(report_template) = overrides.report_template {
            self.report_template = report_template;
        }
        if let Some(log_dir) = overrides.log_dir {
            self.log_dir = log_dir;
        }
        if let Some(critical_perc_err) = overrides.critical_perc_err {
            self.critical_perc_err = critical_perc_err;
        }
        if let Some(logging) = overrides.logging {
            self.logging = Some(logging);
        }
        if let Some(ts) = overrides.ts {
            self.ts = ts;
        }
        self
    }
}
