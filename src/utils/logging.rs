//! Logging setup.
//!
//! Two outputs share one `EnvFilter` (default `info`, override through
//! `RUST_LOG`):
//! - a compact, human readable layer on stderr
//! - a plain text layer written to `quicknav.log` in the state directory
//!
//! The log file is truncated on startup once it grows past [`MAX_LOG_SIZE`].

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::utils::files::state_dir;

pub const MAX_LOG_SIZE: u64 = 1_048_576;
const LOG_FILE: &str = "quicknav.log";

/// Keeps the non-blocking file writer alive. Dropping it flushes the log.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

pub fn init() -> LoggingGuard {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,gtk=warn,gdk=warn"));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let (file_layer, file_guard) = match open_log_file() {
        Some(file) => {
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    LoggingGuard {
        _file_guard: file_guard,
    }
}

pub fn log_path() -> Option<PathBuf> {
    state_dir().ok().map(|dir| dir.join(LOG_FILE))
}

fn open_log_file() -> Option<fs::File> {
    let path = log_path()?;
    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("Failed to create log directory {:?}: {}", parent, e);
            return None;
        }
    }
    cleanup_log(&path, MAX_LOG_SIZE);
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| eprintln!("Failed to open log file {:?}: {}", path, e))
        .ok()
}

/// Empties the log file if it is larger than `max_size` bytes.
pub fn cleanup_log(path: &Path, max_size: u64) -> bool {
    match fs::metadata(path) {
        Ok(metadata) if metadata.len() > max_size => fs::write(path, "").is_ok(),
        _ => false,
    }
}
