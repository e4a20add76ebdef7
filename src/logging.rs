//! File-backed tracing setup. The terminal belongs to the TUI, so logs never
//! go to stdout or stderr.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{AppError, Result};

/// Build the filter: `RUST_LOG` wins, otherwise `level`.
pub fn build_filter(level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level)
            .map_err(|e| AppError::Config(format!("invalid log level {:?}: {}", level, e))),
    }
}

/// Install the global subscriber writing to `log_file`.
///
/// The returned guard flushes buffered lines on drop and must be held for
/// the lifetime of the program.
pub fn init_logging(log_file: &Path, level: &str) -> Result<WorkerGuard> {
    let dir = log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)?;
    let file_name = log_file
        .file_name()
        .ok_or_else(|| AppError::Config(format!("log file has no name: {}", log_file.display())))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(build_filter(level)?)
        .with(file_layer)
        .try_init()
        .map_err(|e| AppError::Config(format!("logging already initialised: {}", e)))?;

    tracing::info!(file = %log_file.display(), "logging initialised");
    Ok(guard)
}
