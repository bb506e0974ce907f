//! Header, stats bar, status line and footer components

use std::io::{self, Write};

use chrono::Local;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};

use crate::app::{App, ViewMode};
use crate::constants::{APP_VERSION, DISPLAY_NAME};
use crate::system::format_kb;

use super::utils::{display_width, fit, truncate_string};

/// Renders the application header: title, host name and wall clock.
pub fn render_header<W: Write>(out: &mut W, row: usize, width: usize, app: &App) -> io::Result<()> {
    let title = format!(" {} {}  {}", DISPLAY_NAME, APP_VERSION, app.hostname);
    let clock = format!("{} ", Local::now().format("%H:%M:%S"));
    let spacing = width.saturating_sub(display_width(&title) + display_width(&clock));
    let line = format!("{}{:spacing$}{}", title, "", clock, spacing = spacing);

    queue!(
        out,
        MoveTo(0, row as u16),
        SetBackgroundColor(Color::DarkBlue),
        SetForegroundColor(Color::White),
        Print(fit(&line, width)),
        ResetColor
    )
}

/// Renders the system statistics line.
///
/// Shows task count, load averages, CPU, memory and swap usage, and the
/// refresh interval.
pub fn render_system_stats<W: Write>(
    out: &mut W,
    row: usize,
    width: usize,
    app: &App,
) -> io::Result<()> {
    let system = &app.system;
    let tasks = if app.table.filter_text().is_empty() {
        format!("Tasks: {}", system.task_count)
    } else {
        format!("Showing: {}/{}", app.table.len(), app.table.total_len())
    };
    let swap = if system.swap_total_kb == 0 {
        "Swap: none".to_string()
    } else {
        format!(
            "Swap: {} / {} ({:.0}%)",
            format_kb(system.swap_used_kb),
            format_kb(system.swap_total_kb),
            system.swap_percent
        )
    };
    let line = format!(
        " {}  |  Load: {:.2} {:.2} {:.2}  |  CPU: {:5.1}%  |  Mem: {} / {} ({:.0}%) buf {} cache {}  |  {}  |  Refresh: {}",
        tasks,
        system.load[0],
        system.load[1],
        system.load[2],
        system.cpu_percent,
        format_kb(system.mem_used_kb),
        format_kb(system.mem_total_kb),
        system.mem_percent,
        format_kb(system.buffers_kb),
        format_kb(system.cached_kb),
        swap,
        app.format_refresh_interval(),
    );

    queue!(
        out,
        MoveTo(0, row as u16),
        SetForegroundColor(Color::Cyan),
        Print(fit(&line, width)),
        ResetColor
    )
}

/// Renders the status line.
///
/// A transient status message wins; otherwise the full command line of the
/// selected process is shown.
pub fn render_status<W: Write>(out: &mut W, row: usize, width: usize, app: &App) -> io::Result<()> {
    let (text, color) = match &app.status_message {
        Some(msg) => (format!(" {}", msg), Color::Yellow),
        None if app.table.is_empty() => (" No matching processes".to_string(), Color::DarkGrey),
        None => match app.table.selected() {
            Some(p) => (format!(" {} (PID {}, parent {})", p.command, p.pid, p.parent_pid), Color::DarkGrey),
            None => (String::new(), Color::DarkGrey),
        },
    };
    queue!(
        out,
        MoveTo(0, row as u16),
        SetForegroundColor(color),
        Print(fit(&truncate_string(&text, width), width)),
        ResetColor
    )
}

/// Renders the footer with key hints, or the active filter.
pub fn render_footer<W: Write>(out: &mut W, row: usize, width: usize, app: &App) -> io::Result<()> {
    let (text, bg, fg) = match &app.view_mode {
        ViewMode::FilterEntry { .. } => (
            " Type to filter | Enter:Apply | Esc:Cancel".to_string(),
            Color::DarkYellow,
            Color::Black,
        ),
        ViewMode::ConfirmKill(_) => (
            " Kill process? y:Confirm | any other key:Cancel".to_string(),
            Color::DarkRed,
            Color::White,
        ),
        _ if !app.table.filter_text().is_empty() => (
            format!(
                " Filter: \"{}\" | f:Edit | c:Clear | q:Quit | h:Help",
                app.table.filter_text()
            ),
            Color::DarkYellow,
            Color::Black,
        ),
        _ => (
            " h:Help | q:Quit | s:Sort | r:Reverse | f:Filter | x:Kill | +/-:Priority | [/]:Speed"
                .to_string(),
            Color::DarkBlue,
            Color::White,
        ),
    };

    queue!(
        out,
        MoveTo(0, row as u16),
        SetBackgroundColor(bg),
        SetForegroundColor(fg),
        Print(fit(&truncate_string(&text, width), width)),
        ResetColor
    )
}
