//! User interface rendering
//!
//! This module provides all terminal UI rendering functionality:
//! - `render` - Main rendering entry point
//! - `layout` - Row assignments recomputed from the terminal size
//! - `components` - Header, stats bar, status line, footer
//! - `graph` - History graphs, gauges, per-core sparklines
//! - `process_list` - Column headers and process rows
//! - `dialog` - Centered boxes, kill confirmation, filter input
//! - `help` - Help overlay
//! - `terminal` - Raw mode / alternate screen guard
//! - `utils` - Shared utilities

mod components;
mod dialog;
mod graph;
mod help;
mod layout;
mod process_list;
mod render;
mod terminal;
mod utils;

pub use layout::Layout;
pub use render::render;
pub use terminal::TerminalGuard;
