//! Centralized constants for the application
//!
//! This module contains all magic numbers and configuration constants
//! used throughout the application, making them easy to find and modify.

// ============================================================================
// Application Info
// ============================================================================

/// Application name displayed in header
pub const DISPLAY_NAME: &str = "HiTop";

/// Application version from Cargo.toml
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Refresh Rate (milliseconds)
// ============================================================================

/// Default refresh interval in milliseconds
pub const DEFAULT_REFRESH_MS: u64 = 1000;

/// Minimum allowed refresh interval
pub const MIN_REFRESH_MS: u64 = 250;

/// Maximum allowed refresh interval
pub const MAX_REFRESH_MS: u64 = 10000;

/// Longest single wait for input before the stop flag is checked again
pub const INPUT_POLL_SLICE_MS: u64 = 100;

// ============================================================================
// Sampling limits
// ============================================================================

/// Maximum number of processes kept from one enumeration pass
pub const MAX_PROCESSES: usize = 4096;

/// Number of samples kept per history series
pub const HISTORY_CAPACITY: usize = 60;

/// Maximum number of per-core history series
pub const MAX_CORE_HISTORIES: usize = 64;

/// Renice step applied by the priority keys
pub const RENICE_STEP: i32 = 1;

/// Most favourable nice value
pub const NICE_MIN: i32 = -20;

/// Least favourable nice value
pub const NICE_MAX: i32 = 19;

// ============================================================================
// Layout
// ============================================================================

/// Bar rows inside one graph panel (title row excluded)
pub const GRAPH_HEIGHT: usize = 5;

/// Terminal width at which graph panels sit side by side
pub const GRAPH_SIDE_BY_SIDE_WIDTH: usize = 80;

/// Terminal height below which graph panels are hidden
pub const GRAPH_MIN_TERMINAL_HEIGHT: usize = 20;

/// Narrowest terminal that still gets graph panels
pub const GRAPH_MIN_WIDTH: usize = 20;

/// Process rows that must remain before graphs or core rows are shown
pub const MIN_TABLE_ROWS: usize = 3;

/// Width of one per-core cell (label, sparkline, percent)
pub const CORE_CELL_WIDTH: usize = 16;

/// Samples shown in a per-core sparkline
pub const CORE_SPARKLINE_LEN: usize = 6;

/// Maximum rows of per-core cells
pub const MAX_CORE_ROWS: usize = 2;

/// Width of the help dialog box
pub const HELP_DIALOG_WIDTH: usize = 52;

/// Width of the kill and filter dialogs
pub const PROMPT_DIALOG_WIDTH: usize = 56;

/// Width of the key column in help dialog
pub const HELP_KEY_COL_WIDTH: usize = 14;

// ============================================================================
// Usage Thresholds (for coloring)
// ============================================================================

/// Usage threshold for red color (high)
pub const USAGE_THRESHOLD_HIGH: f64 = 75.0;

/// Usage threshold for yellow color (medium)
pub const USAGE_THRESHOLD_MEDIUM: f64 = 40.0;
