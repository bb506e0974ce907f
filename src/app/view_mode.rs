//! View mode enum for application state
//!
//! Defines mutually exclusive application modes, ensuring only one
//! mode can be active at a time. Modal modes carry the data they need,
//! so leaving a mode drops its state with it.

/// Process targeted by a pending kill, captured when the dialog opened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KillTarget {
    pub pid: i32,
    pub command: String,
}

/// The current view/input mode of the application.
///
/// The mode determines how keyboard input is handled and which
/// modal (if any) is drawn over the process list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Normal process list view (default mode)
    #[default]
    Normal,

    /// Filter input mode - typing into a staging buffer
    FilterEntry { buffer: String },

    /// Kill confirmation dialog - waiting for y/Y
    ConfirmKill(KillTarget),

    /// Help overlay showing keyboard shortcuts
    HelpOverlay,
}
