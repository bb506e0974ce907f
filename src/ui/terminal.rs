//! Terminal mode setup and restoration
//!
//! Raw mode and the alternate screen are held by [`TerminalGuard`]; dropping
//! it puts the terminal back. A panic hook does the same before the panic
//! message is printed, so the message lands on a usable screen.

use std::io::{self, Write};
use std::panic;

use crossterm::{
    cursor::{Hide, Show},
    execute,
    style::ResetColor,
    terminal::{self, DisableLineWrap, EnableLineWrap, EnterAlternateScreen, LeaveAlternateScreen},
};

/// Owns raw mode and the alternate screen for its lifetime.
#[derive(Debug)]
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    /// Enters raw mode and the alternate screen.
    ///
    /// If any step fails the steps already taken are undone before the error
    /// is returned.
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = Self { _private: () };
        execute!(io::stdout(), EnterAlternateScreen, DisableLineWrap, Hide)?;
        install_panic_hook();
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore();
    }
}

/// Leaves the alternate screen and raw mode. Errors are ignored; there is
/// nowhere left to report them.
fn restore() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, ResetColor, Show, EnableLineWrap, LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = stdout.flush();
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        restore();
        default_hook(info);
    }));
}
