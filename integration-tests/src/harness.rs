use flate2::Compression;
use flate2::write::GzEncoder;
use logreport_core::conf::Config;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Minimal report template carrying the table placeholder.
pub const TEMPLATE: &str =
    "<html><body><script>var table = $table_json;</script></body></html>";

/// A throwaway on-disk layout for one pipeline run: a log directory, a
/// report directory with a template, and a matching `Config`.
pub struct Workspace {
    pub config: Config,
    // removed on drop
    _root: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();

        let log_dir = root.path().join("log");
        let report_dir = root.path().join("reports");
        fs::create_dir_all(&log_dir).unwrap();
        fs::create_dir_all(&report_dir).unwrap();

        let report_template = report_dir.join("report.html");
        fs::write(&report_template, TEMPLATE).unwrap();

        let config = Config {
            report_dir,
            report_template,
            log_dir,
            ts: root.path().join("log_analyzer.ts"),
            ..Config::default()
        };

        Self {
            config,
            _root: root,
        }
    }

    pub fn write_log(&self, name: &str, lines: &[&str]) {
        let body = lines.join("\n");
        fs::write(self.config.log_dir.join(name), body).unwrap();
    }

    pub fn write_gzip_log(&self, name: &str, lines: &[&str]) {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::fast());
        encoder.write_all(lines.join("\n").as_bytes()).unwrap();
        fs::write(self.config.log_dir.join(name), encoder.finish().unwrap()).unwrap();
    }

    pub fn report_path(&self, date_dotted: &str) -> PathBuf {
        self.config.report_dir.join(format!("report-{date_dotted}.html"))
    }

    pub fn marker_path(&self) -> &Path {
        &self.config.ts
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Pulls the substituted table back out of a rendered report.
pub fn read_table(report: &Path) -> serde_json::Value {
    let html = fs::read_to_string(report).unwrap();

    let start = html.find("var table = ").unwrap() + "var table = ".len();
    let end = html[start..].find(";</script>").unwrap() + start;

    serde_json::from_str(&html[start..end]).unwrap()
}
