//! Input/keyboard event handling
//!
//! This module handles all keyboard input for the different modes:
//! - Normal mode (process list navigation and commands)
//! - Filter entry (text input into a staging buffer)
//! - Kill confirmation (only y/Y confirms)
//! - Help overlay (any key closes)
//!
//! `q`/`Q` quits from every mode except filter entry, where it is typed as
//! text. Ctrl+C quits from everywhere.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{App, ViewMode};

/// Result of handling a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Continue running the application
    Continue,
    /// Take a new sample before the next frame
    Refresh,
    /// Exit the application
    Exit,
}

fn is_quit(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

impl App {
    /// Dispatches one key press according to the current mode.
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyAction {
        // Status messages last until the next key press
        self.status_message = None;

        if is_interrupt(&key) {
            return KeyAction::Exit;
        }

        match self.view_mode {
            ViewMode::Normal => self.handle_normal_key(key),
            ViewMode::FilterEntry { .. } => self.handle_filter_key(key),
            ViewMode::ConfirmKill(_) => self.handle_confirm_kill_key(key),
            ViewMode::HelpOverlay => self.handle_help_key(key),
        }
    }

    /// Handles key events when help overlay is shown
    fn handle_help_key(&mut self, key: KeyEvent) -> KeyAction {
        if is_quit(&key) {
            return KeyAction::Exit;
        }
        // Any other key closes help
        self.view_mode = ViewMode::Normal;
        KeyAction::Continue
    }

    /// Handles key events in confirm kill mode
    fn handle_confirm_kill_key(&mut self, key: KeyEvent) -> KeyAction {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.confirm_kill();
                KeyAction::Refresh
            }
            _ if is_quit(&key) => KeyAction::Exit,
            _ => {
                self.cancel_kill();
                KeyAction::Continue
            }
        }
    }

    /// Handles key events in filter mode
    fn handle_filter_key(&mut self, key: KeyEvent) -> KeyAction {
        let ViewMode::FilterEntry { buffer } = &mut self.view_mode else {
            return KeyAction::Continue;
        };

        match key.code {
            KeyCode::Esc => {
                self.view_mode = ViewMode::Normal;
            }
            KeyCode::Enter => {
                let text = std::mem::take(buffer);
                self.view_mode = ViewMode::Normal;
                self.table.set_filter(text);
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c)
                if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                buffer.push(c);
            }
            _ => {}
        }
        KeyAction::Continue
    }

    /// Handles key events in normal mode (process list).
    fn handle_normal_key(&mut self, key: KeyEvent) -> KeyAction {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => return KeyAction::Exit,
            KeyCode::Up | KeyCode::Char('k') => self.table.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.table.move_selection(1),
            KeyCode::PageUp => self.table.page(-1),
            KeyCode::PageDown => self.table.page(1),
            KeyCode::Home => self.table.jump_to_start(),
            KeyCode::End => self.table.jump_to_end(),
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::F(6) => self.table.cycle_sort(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.table.toggle_sort_direction(),
            KeyCode::Char('f') | KeyCode::Char('F') | KeyCode::Char('/') => {
                self.view_mode = ViewMode::FilterEntry {
                    buffer: self.table.filter_text().to_string(),
                };
            }
            KeyCode::Char('c') | KeyCode::Char('C') | KeyCode::Esc => self.table.clear_filter(),
            KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => self.request_kill(),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.raise_priority();
                return KeyAction::Refresh;
            }
            KeyCode::Char('-') | KeyCode::Char('_') => {
                self.lower_priority();
                return KeyAction::Refresh;
            }
            KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?') | KeyCode::F(1) => {
                self.view_mode = ViewMode::HelpOverlay;
            }
            KeyCode::Char('[') => self.increase_refresh_interval(),
            KeyCode::Char(']') => self.decrease_refresh_interval(),
            KeyCode::F(5) => return KeyAction::Refresh,
            _ => {}
        }
        KeyAction::Continue
    }
}
