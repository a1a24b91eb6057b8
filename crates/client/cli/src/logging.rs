//! Logging setup: stderr plus an optional log file.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_FILE_NAME: &str = "despair.log";

/// Installs the global subscriber.
///
/// `RUST_LOG` selects the level (default `info`). Unless `disable_file` is
/// set, logs are mirrored to `log_file` or to the platform cache directory.
/// Keep the returned guard alive until exit so the file writer flushes.
pub fn init(log_file: Option<&Path>, disable_file: bool) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard, path) = if disable_file {
        (None, None, None)
    } else {
        let path = match log_file {
            Some(path) => path.to_path_buf(),
            None => log_dir().join(LOG_FILE_NAME),
        };
        let (dir, name) = split_log_path(&path)?;
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

        let file_appender = tracing_appender::rolling::never(&dir, name);
        let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
        let layer = fmt::layer()
            .with_writer(non_blocking_file)
            .with_ansi(false);
        (Some(layer), Some(guard), Some(path))
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if let Some(path) = path {
        tracing::info!("Log file: {}", path.display());
    }
    Ok(guard)
}

/// Platform-specific log directory.
///
/// Follows platform conventions:
/// - macOS: `~/Library/Caches/despair/logs`
/// - Linux: `~/.cache/despair/logs` (or `$XDG_CACHE_HOME/despair/logs`)
/// - Windows: `%LOCALAPPDATA%\despair\cache\logs`
/// - Fallback: `/tmp/despair/logs`
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "despair")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/despair"))
        .join("logs")
}

fn split_log_path(path: &Path) -> Result<(PathBuf, PathBuf)> {
    let name = path
        .file_name()
        .with_context(|| format!("Log path {} has no file name", path.display()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, PathBuf::from(name)))
}
