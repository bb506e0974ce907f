//! Terminal rendering logic
//!
//! Paints a full frame from the current model. Every row is written padded
//! to the terminal width, so no separate clear is needed between frames.

use std::io::{self, Write};

use crossterm::{cursor::MoveTo, queue, style::ResetColor};

use crate::app::{App, ViewMode};
use crate::system::format_kb;

use super::components::{render_footer, render_header, render_status, render_system_stats};
use super::dialog::{render_filter_input, render_kill_confirm};
use super::graph::{render_core_cells, render_history, render_panel_title};
use super::help::render_help_overlay;
use super::layout::{GraphArea, Layout};
use super::process_list::{render_column_headers, render_process_list};

/// Renders the UI into `out` and flushes it.
///
/// The caller computes `layout` from the current terminal size and feeds its
/// table height back into the model before calling this.
pub fn render<W: Write>(out: &mut W, app: &App, layout: &Layout) -> io::Result<()> {
    let width = layout.width;

    if let Some(row) = layout.header_row {
        render_header(out, row, width, app)?;
    }
    if let Some(row) = layout.stats_row {
        render_system_stats(out, row, width, app)?;
    }
    if let Some(graphs) = layout.graphs {
        render_graphs(out, app, &graphs, width)?;
    }
    if let Some(cores) = layout.cores {
        render_core_cells(out, &cores, width, &app.history.cores, &app.system.core_percents)?;
    }
    if let Some(row) = layout.table_header_row {
        render_column_headers(out, row, width, &app.table)?;
    }
    render_process_list(out, layout, &app.table)?;
    if let Some(row) = layout.status_row {
        render_status(out, row, width, app)?;
    }
    if let Some(row) = layout.footer_row {
        render_footer(out, row, width, app)?;
    }

    // Modal on top
    match &app.view_mode {
        ViewMode::Normal => {}
        ViewMode::FilterEntry { buffer } => render_filter_input(out, width, layout.height, buffer)?,
        ViewMode::ConfirmKill(target) => render_kill_confirm(out, width, layout.height, target)?,
        ViewMode::HelpOverlay => render_help_overlay(out, width, layout.height)?,
    }

    queue!(out, ResetColor, MoveTo(0, 0))?;
    out.flush()
}

/// Renders the CPU and memory history panels.
fn render_graphs<W: Write>(out: &mut W, app: &App, area: &GraphArea, width: usize) -> io::Result<()> {
    let system = &app.system;
    let cpu_detail = format!("{:5.1}%", system.cpu_percent);
    let mem_detail = format!(
        "{}/{} {:4.1}%",
        format_kb(system.mem_used_kb),
        format_kb(system.mem_total_kb),
        system.mem_percent
    );

    let (mem_x, mem_y, panel_width, mem_width) = if area.side_by_side {
        let left = width / 2;
        (left, area.top, left, width - left)
    } else {
        (0, area.top + GraphArea::PANEL_ROWS, width, width)
    };

    render_panel_title(out, 0, area.top, panel_width, "CPU", system.cpu_percent, &cpu_detail)?;
    render_history(out, 0, area.top + 1, panel_width, app.history.cpu.as_chronological_slice())?;
    render_panel_title(out, mem_x, mem_y, mem_width, "Mem", system.mem_percent, &mem_detail)?;
    render_history(out, mem_x, mem_y + 1, mem_width, app.history.memory.as_chronological_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{test_app, KillTarget};

    fn draw(app: &App, width: u16, height: u16) -> String {
        let layout = Layout::compute(width, height, app.system.core_percents.len());
        let mut out = Vec::new();
        render(&mut out, app, &layout).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_full_frame() {
        let (mut app, _host, _control) = test_app();
        app.hostname = "testbox".to_string();
        app.refresh();
        let text = draw(&app, 120, 40);
        assert!(text.contains("HiTop"));
        assert!(text.contains("testbox"));
        assert!(text.contains("COMMAND"));
        assert!(text.contains("job1"));
        assert!(text.contains("Tasks: 10"));
    }

    #[test]
    fn test_stats_line_shows_swap() {
        let (mut app, host, _control) = test_app();
        assert!(draw(&app, 220, 40).contains("Swap: none"));

        {
            let mut h = host.borrow_mut();
            h.totals.memory.swap_total_kb = 4096;
            h.totals.memory.swap_free_kb = 1024;
        }
        app.refresh();
        assert!(draw(&app, 220, 40).contains("Swap: 3.0M / 4.0M (75%)"));
    }

    #[test]
    fn test_every_modal_renders() {
        let (mut app, _host, _control) = test_app();
        app.view_mode = ViewMode::HelpOverlay;
        assert!(draw(&app, 100, 40).contains("Keyboard Shortcuts"));

        app.view_mode = ViewMode::ConfirmKill(KillTarget {
            pid: 7,
            command: "job7".to_string(),
        });
        assert!(draw(&app, 100, 40).contains("PID 7"));

        app.view_mode = ViewMode::FilterEntry {
            buffer: "jo".to_string(),
        };
        assert!(draw(&app, 100, 40).contains("jo█"));
    }

    #[test]
    fn test_tiny_terminals_do_not_panic() {
        let (mut app, _host, _control) = test_app();
        app.status_message = Some("a fairly long status message".to_string());
        for mode in [
            ViewMode::Normal,
            ViewMode::HelpOverlay,
            ViewMode::FilterEntry { buffer: "x".repeat(80) },
            ViewMode::ConfirmKill(KillTarget {
                pid: 1,
                command: "job1".to_string(),
            }),
        ] {
            app.view_mode = mode;
            for (width, height) in [(0, 0), (1, 1), (10, 3), (20, 5), (79, 19), (80, 20), (300, 100)] {
                let layout = Layout::compute(width, height, 2);
                app.table.set_visible_rows(layout.table_rows);
                let mut out = Vec::new();
                render(&mut out, &app, &layout).unwrap();
            }
        }
    }

    #[test]
    fn test_filtered_footer_shows_filter() {
        let (mut app, _host, _control) = test_app();
        app.table.set_filter("job3");
        let text = draw(&app, 120, 30);
        assert!(text.contains("Filter: \"job3\""));
        assert!(text.contains("Showing: 1/10"));
    }
}
