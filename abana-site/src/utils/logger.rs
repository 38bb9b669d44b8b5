//! Logging Infrastructure
//!
//! Human-readable output on stdout by default, JSON lines when requested,
//! and a daily rolling file when a log directory is configured.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// File name prefix of rolled log files
const LOG_FILE_PREFIX: &str = "abana-site";

/// Initialize the logger at `info`
pub fn init_logger() {
    init_logger_with_file(None, None, None);
}

/// Initialize the logger with optional JSON formatting and file output
///
/// `RUST_LOG` takes precedence over `log_level` when set. Calling this more
/// than once is harmless; later calls are ignored.
pub fn init_logger_with_file(log_level: Option<&str>, json: Option<bool>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    let file_writer = log_dir.and_then(|dir| {
        let log_path = Path::new(dir);
        if log_path.exists() {
            Some(tracing_appender::rolling::daily(log_path, LOG_FILE_PREFIX))
        } else {
            None
        }
    });

    let result = match (json.unwrap_or(false), file_writer) {
        (true, Some(writer)) => builder.json().with_writer(writer).try_init(),
        (true, None) => builder.json().try_init(),
        (false, Some(writer)) => builder.with_ansi(false).with_writer(writer).try_init(),
        (false, None) => builder.try_init(),
    };
    if result.is_err() {
        tracing::debug!("Logger already initialized");
    }
}
