//! src/logging.rs
//! ============================================================================
//! # Logging: File-Only Tracing Setup
//!
//! A TUI owns the terminal, so log output must never reach stdout. All
//! tracing events go to a daily-rolling JSON file under the app data dir,
//! filtered by `RUST_LOG` (default `info`). The returned [`WorkerGuard`]
//! must stay alive for the process lifetime or buffered lines are lost.

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_PREFIX: &str = "stash.log";

/// Install the global subscriber. `dir` overrides the default log
/// location (used by tests and ad-hoc debugging).
pub fn init(dir: Option<PathBuf>) -> Result<WorkerGuard> {
    let log_dir: PathBuf = dir.unwrap_or_else(default_log_dir);
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let appender = rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().with_writer(writer).with_ansi(false))
        .init();

    tracing::info!(dir = %log_dir.display(), "logging initialized");
    Ok(guard)
}

fn default_log_dir() -> PathBuf {
    ProjectDirs::from("org", "stash", "Stash")
        .map_or_else(|| PathBuf::from("./logs"), |dirs| {
            dirs.data_local_dir().join("logs")
        })
}
