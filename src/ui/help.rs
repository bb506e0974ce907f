//! Help overlay rendering

use std::io::{self, Write};

use crossterm::style::Color;

use crate::constants::{HELP_DIALOG_WIDTH, HELP_KEY_COL_WIDTH};

use super::dialog::render_modal;

/// Help content definition
const HELP_LINES: &[(&str, &str)] = &[
    ("NAVIGATION", ""),
    ("  Up/k Down/j", "Move selection up/down"),
    ("  PgUp/PgDn", "Move by a page"),
    ("  Home/End", "Jump to first/last process"),
    ("", ""),
    ("PROCESS ACTIONS", ""),
    ("  x / Del", "Send SIGTERM (asks first)"),
    ("  + / -", "Raise/Lower priority"),
    ("", ""),
    ("VIEW OPTIONS", ""),
    ("  s / F6", "Cycle sort column"),
    ("  r", "Reverse sort order"),
    ("  f or /", "Filter by command or user"),
    ("  c / Esc", "Clear filter"),
    ("", ""),
    ("SETTINGS", ""),
    ("  [", "Slow down refresh"),
    ("  ]", "Speed up refresh"),
    ("  F5", "Refresh now"),
    ("", ""),
    ("OTHER", ""),
    ("  h / ?", "Show this help"),
    ("  q", "Quit application"),
    ("  Ctrl+C", "Quit application"),
];

/// Renders the help overlay showing all keyboard shortcuts.
///
/// On short terminals the list is cut off at the bottom border.
pub fn render_help_overlay<W: Write>(out: &mut W, width: usize, height: usize) -> io::Result<()> {
    let mut lines = vec![(String::new(), Color::White)];
    for (key, desc) in HELP_LINES {
        if desc.is_empty() {
            // Section header or spacer
            lines.push((format!(" {}", key), Color::Cyan));
        } else {
            lines.push((format!(" {:<kw$}{}", key, desc, kw = HELP_KEY_COL_WIDTH), Color::Green));
        }
    }
    lines.push(("        Press any key to close".to_string(), Color::Yellow));

    render_modal(
        out,
        (width, height),
        HELP_DIALOG_WIDTH,
        Color::DarkBlue,
        " Keyboard Shortcuts ",
        &lines,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_lists_kill_and_quit() {
        let mut out = Vec::new();
        render_help_overlay(&mut out, 100, 40).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Keyboard Shortcuts"));
        assert!(text.contains("Send SIGTERM"));
        assert!(text.contains("Quit application"));
    }

    #[test]
    fn test_help_on_tiny_terminal() {
        let mut out = Vec::new();
        render_help_overlay(&mut out, 10, 3).unwrap();
        render_help_overlay(&mut out, 0, 0).unwrap();
    }
}
