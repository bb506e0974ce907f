//! Diagnostics to a file
//!
//! The TUI owns the terminal, so log output only ever goes to a file: the
//! `--log-file` path, or `HITOP_LOG` when the flag is absent. With neither,
//! no logger is installed and the `log` macros are no-ops.

use std::env;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};

/// Environment variable naming a log file
pub const LOG_FILE_ENV: &str = "HITOP_LOG";

/// Picks the log file: the command-line path wins over the environment.
fn log_path(cli_path: Option<&Path>) -> Option<PathBuf> {
    cli_path
        .map(Path::to_path_buf)
        .or_else(|| env::var_os(LOG_FILE_ENV).filter(|v| !v.is_empty()).map(PathBuf::from))
}

/// Installs the file logger. Returns the path in use, if any.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`.
pub fn init(cli_path: Option<&Path>) -> Result<Option<PathBuf>> {
    let Some(path) = log_path(cli_path) else {
        return Ok(None);
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .context("logger already initialized")?;
    Ok(Some(path))
}
