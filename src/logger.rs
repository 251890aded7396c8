//! Logging support for RevX
//!
//! Stdout carries reversed text only, so logs never go there. Without debug
//! mode, warnings and errors go to stderr. With debug mode, everything at the
//! configured level is appended to ~/.revx/revx.log.
//!
//! The `REVX_LOG` environment variable overrides the level filter in both
//! modes (e.g. `REVX_LOG=revx=trace`).

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, registry};

const LOG_ENV_VAR: &str = "REVX_LOG";
const LOG_FILE_NAME: &str = "revx.log";

/// Build the level filter, preferring `REVX_LOG` over `default_level`
fn build_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(format!("revx={}", default_level)))
}

/// Initialize logging
///
/// Returns the log file path when debug logging is active.
pub fn init_logging(debug_enabled: bool, level: &str) -> Result<Option<PathBuf>> {
    if !debug_enabled {
        init_stderr_logging();
        return Ok(None);
    }

    let log_dir = crate::config::revx_dir()?;
    match init_file_logging(&log_dir, level) {
        Ok(path) => Ok(Some(path)),
        Err(e) => {
            // Fall back to stderr logging
            eprintln!("Warning: Could not create log file: {:#}", e);
            init_stderr_logging();
            Ok(None)
        }
    }
}

fn init_stderr_logging() {
    let subscriber = registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(false)
                .with_target(false)
                .without_time(),
        )
        .with(build_filter("warn"));

    // A subscriber may already be installed (e.g. by a test harness)
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn init_file_logging(log_dir: &Path, level: &str) -> Result<PathBuf> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_NAME)
        .build(log_dir)
        .with_context(|| format!("Failed to open log file in: {}", log_dir.display()))?;
    let subscriber = registry()
        .with(
            fmt::layer()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false),
        )
        .with(build_filter(level));

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    Ok(log_dir.join(LOG_FILE_NAME))
}

/// Get the log file path without initializing logging
pub fn log_file_path() -> Result<PathBuf> {
    Ok(crate::config::revx_dir()?.join(LOG_FILE_NAME))
}
