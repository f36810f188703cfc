use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize the logging system with environment-based filtering.
///
/// Filtering comes from `RUST_LOG` (defaults to "info" if not set).
/// Without a log file, output goes to stderr. With one, lines are appended
/// through a non-blocking writer; the returned guard must stay alive until
/// the process exits or buffered lines are lost.
pub fn init_logging(log_file: Option<&Path>) -> io::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let (writer, guard) = tracing_appender::non_blocking(file);

            fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();

            Ok(Some(guard))
        }
        None => {
            fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();

            Ok(None)
        }
    }
}
