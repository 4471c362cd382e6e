//! Diagnostic logging to disk.
//!
//! When enabled, `tracing` events are written to a daily log file named
//! `inkbar_<date>.log` in the configured log directory (default:
//! `~/.local/share/inkbar/logs/`). The terminal owns stdout, so nothing is
//! ever printed there.

use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;
use tracing::Level;

/// Install the global subscriber. Returns `false` when logging is disabled.
pub fn init(config: &LoggingConfig) -> Result<bool> {
    if !config.enabled {
        return Ok(false);
    }

    let level = parse_level(&config.level)?;
    let log_dir = expand_home(&config.log_dir);
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let date = chrono::Local::now().format("%Y-%m-%d").to_string();
    let path = log_file(&log_dir, &date);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {e}"))?;

    tracing::info!(path = %path.display(), %level, "logging started");
    Ok(true)
}

fn parse_level(level: &str) -> Result<Level> {
    Level::from_str(level.trim()).with_context(|| format!("Invalid log level '{level}'"))
}

/// Expand a leading `~` to the home directory.
fn expand_home(dir: &str) -> PathBuf {
    let rest = match dir.strip_prefix('~') {
        Some(rest) => rest.trim_start_matches('/'),
        None => return PathBuf::from(dir),
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => PathBuf::from(dir),
    }
}

fn log_file(dir: &Path, date: &str) -> PathBuf {
    dir.join(format!("inkbar_{date}.log"))
}
