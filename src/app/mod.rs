//! Application state and logic
//!
//! This module contains the core application state and business logic:
//! - `state` - Main App struct and refresh cadence
//! - `table` - Filtered, sorted process list with selection and scrolling
//! - `history` - Ring buffers feeding the graphs
//! - `sort` - Sort column definitions
//! - `input` - Keyboard dispatch per view mode
//! - `process_ops` - Kill and renice requests
//! - `view_mode` - View mode state machine
//! - `cli` - Command-line arguments

mod cli;
mod history;
mod input;
mod process_ops;
mod sort;
mod state;
mod table;
mod view_mode;

pub use cli::Args;
pub use history::{HistorySet, MetricHistory};
pub use input::KeyAction;
pub use sort::SortColumn;
pub use state::App;
pub use table::ProcessTable;
pub use view_mode::{KillTarget, ViewMode};

#[cfg(test)]
pub(crate) use state::tests::test_app;
