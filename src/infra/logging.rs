use std::fs;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::infra::{config::LogConfig, error::AppError};

const LOG_FILE_NAME: &str = "reeltalk.log";

/// Initializes file-based logging. The terminal is owned by the TUI, so log
/// lines go to a file under the platform state directory unless the config
/// points elsewhere. The returned guard must outlive the application.
pub fn init(config: &LogConfig) -> Result<WorkerGuard, AppError> {
    let log_path = resolve_log_path(config);

    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent).map_err(|source| AppError::LogDirCreate {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let directory = log_path.parent().unwrap_or_else(|| std::path::Path::new("."));
    let file_name = log_path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| LOG_FILE_NAME.into());

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level)),
        )
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(AppError::LoggingInit)?;

    Ok(guard)
}

fn resolve_log_path(config: &LogConfig) -> PathBuf {
    if let Some(file) = &config.file {
        return file.clone();
    }

    dirs::state_dir()
        .or_else(dirs::cache_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("reeltalk")
        .join(LOG_FILE_NAME)
}
