//! Command-line arguments
//!
//! Every option is optional; with no arguments the monitor starts sorted by
//! CPU descending, refreshing every second.

use std::path::PathBuf;

use clap::Parser;

use crate::constants::{DEFAULT_REFRESH_MS, MAX_REFRESH_MS, MIN_REFRESH_MS};

use super::SortColumn;

/// Interactive terminal process monitor for Linux
#[derive(Parser, Debug, Clone)]
#[command(name = "hitop", version, about, long_about = None)]
#[command(after_help = "CONTROLS:
    q           Quit
    Up/k Down/j Move selection
    PgUp/PgDn   Move by a page
    Home/End    Jump to first/last
    s / F6      Cycle sort column
    r           Reverse sort order
    f or /      Filter by command or user
    c           Clear filter
    x / Del     Send SIGTERM (asks first)
    + / -       Raise / lower priority
    [ / ]       Slow down / speed up refresh
    h / ?       Help")]
pub struct Args {
    /// Refresh interval in milliseconds (250-10000)
    #[arg(short = 'd', long = "delay", value_name = "MS", default_value_t = DEFAULT_REFRESH_MS)]
    pub refresh: u64,

    /// Initial sort column: pid, user, cpu, mem, command, priority
    #[arg(short, long, value_name = "COLUMN", default_value = "cpu")]
    pub sort: SortColumn,

    /// Sort in ascending order (default is descending)
    #[arg(short, long)]
    pub ascending: bool,

    /// Initial filter matched against command and user
    #[arg(short, long, value_name = "TEXT")]
    pub filter: Option<String>,

    /// Write diagnostics to this file (also read from HITOP_LOG)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// Refresh interval clamped into the supported range.
    pub fn refresh_ms(&self) -> u64 {
        self.refresh.clamp(MIN_REFRESH_MS, MAX_REFRESH_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["hitop"]).expect("no args is valid");
        assert_eq!(args.refresh_ms(), DEFAULT_REFRESH_MS);
        assert_eq!(args.sort, SortColumn::Cpu);
        assert!(!args.ascending);
        assert!(args.filter.is_none());
    }

    #[test]
    fn test_all_options() {
        let args = Args::try_parse_from([
            "hitop", "-d", "500", "--sort", "mem", "-a", "-f", "bash", "--log-file", "/tmp/h.log",
        ])
        .expect("valid args");
        assert_eq!(args.refresh_ms(), 500);
        assert_eq!(args.sort, SortColumn::Memory);
        assert!(args.ascending);
        assert_eq!(args.filter.as_deref(), Some("bash"));
        assert_eq!(args.log_file, Some(PathBuf::from("/tmp/h.log")));
    }

    #[test]
    fn test_refresh_is_clamped() {
        let fast = Args::try_parse_from(["hitop", "-d", "10"]).expect("valid");
        assert_eq!(fast.refresh_ms(), MIN_REFRESH_MS);
        let slow = Args::try_parse_from(["hitop", "--delay", "99999"]).expect("valid");
        assert_eq!(slow.refresh_ms(), MAX_REFRESH_MS);
    }

    #[test]
    fn test_bad_sort_column_is_rejected() {
        assert!(Args::try_parse_from(["hitop", "-s", "disk"]).is_err());
    }
}
