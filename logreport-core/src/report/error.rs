use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    //-------------------------------------------------------------------------
    // Discovery
    //-------------------------------------------------------------------------
    #[error("no log files matching '{pattern}'")]
    NoLogFound { pattern: String },

    #[error("glob pattern error: {pattern}: {source}")]
    Glob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("report already exists: {path}")]
    AlreadyExists { path: PathBuf },

    //-------------------------------------------------------------------------
    // Parsing / aggregation
    //-------------------------------------------------------------------------
    #[error("malformed line ratio {ratio:.1}% exceeds limit of {limit}%")]
    ThresholdExceeded { ratio: f64, limit: f64 },

    #[error("aggregate request time is zero across all parsed lines")]
    DegenerateInput,

    //-------------------------------------------------------------------------
    // Template / rendering
    //-------------------------------------------------------------------------
    #[error("cannot read template {path}: {source}")]
    TemplateNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("template too small to be usable: {path}")]
    InvalidTemplate { path: PathBuf },

    #[error("failed to serialize report table: {source}")]
    Render {
        #[source]
        source: serde_json::Error,
    },

    //-------------------------------------------------------------------------
    // IO
    //-------------------------------------------------------------------------
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReportError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
