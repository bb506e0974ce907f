//! Process list rendering

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};

use crate::app::ProcessTable;
use crate::system::{format_kb, ProcessSample};

use super::layout::Layout;
use super::utils::{fit, put, truncate_string, usage_color};

/// Columns taken by the fixed-width columns before the command
const FIXED_COLUMNS_WIDTH: usize = 66;

/// Formats the fixed-width columns left of CPU%.
fn row_prefix(p: &ProcessSample) -> String {
    format!(
        " {:>7} {} {:>4} {:>4} {:>7} {:>7} {} {:>4} ",
        p.pid,
        fit(&p.owner_name, 9),
        p.priority,
        p.nice_delta,
        format_kb(p.virtual_kb),
        format_kb(p.resident_kb),
        p.state_code,
        p.thread_count,
    )
}

/// Renders the column headers for the process list.
///
/// The active sort column carries an arrow showing the direction.
pub fn render_column_headers<W: Write>(
    out: &mut W,
    row: usize,
    width: usize,
    table: &ProcessTable,
) -> io::Result<()> {
    let header = format!(
        " {:>7} {:<9} {:>4} {:>4} {:>7} {:>7} {} {:>4} {:>5}  {:>5}  {}",
        "PID", "USER", "PRI", "NI", "VIRT", "RES", "S", "THR", "CPU%", "MEM%", "COMMAND"
    );
    let arrow = if table.sort_descending() { "↓" } else { "↑" };
    let header = format!("{}  [{} {}]", header, table.sort_column().name(), arrow);
    queue!(
        out,
        MoveTo(0, row as u16),
        SetBackgroundColor(Color::DarkGrey),
        SetForegroundColor(Color::White),
        Print(fit(&header, width)),
        ResetColor
    )
}

/// Renders the visible window of the process table.
///
/// Numeric columns have fixed widths; the command column takes whatever is
/// left and is truncated with "...". The selected row is highlighted and
/// rows past the end of the list are blanked.
pub fn render_process_list<W: Write>(
    out: &mut W,
    layout: &Layout,
    table: &ProcessTable,
) -> io::Result<()> {
    let width = layout.width;
    let mut drawn = 0;

    for (screen_row, (index, process)) in table.window().take(layout.table_rows).enumerate() {
        let is_selected = index == table.selected_index();
        let prefix = row_prefix(process);
        let cpu_str = format!("{:>5.1}  ", process.cpu_percent);
        let mem_str = format!("{:>5.1}  ", process.mem_percent);
        let command = truncate_string(&process.command, width.saturating_sub(FIXED_COLUMNS_WIDTH));

        let (bg, fg) = if is_selected {
            (Color::DarkCyan, Color::White)
        } else {
            (Color::Reset, Color::Reset)
        };

        let mut room = width;
        queue!(
            out,
            MoveTo(0, (layout.table_top + screen_row) as u16),
            SetBackgroundColor(bg),
            SetForegroundColor(fg)
        )?;
        put(out, &prefix, &mut room)?;
        queue!(out, SetForegroundColor(usage_color(process.cpu_percent)))?;
        put(out, &cpu_str, &mut room)?;
        queue!(out, SetForegroundColor(usage_color(process.mem_percent)))?;
        put(out, &mem_str, &mut room)?;
        queue!(out, SetForegroundColor(fg))?;
        put(out, &command, &mut room)?;
        queue!(out, Print(" ".repeat(room)), ResetColor)?;
        drawn += 1;
    }

    // Fill remaining space
    for screen_row in drawn..layout.table_rows {
        queue!(
            out,
            MoveTo(0, (layout.table_top + screen_row) as u16),
            Print(" ".repeat(width))
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::SortColumn;
    use crate::ui::utils::display_width;

    fn sample(pid: i32, command: &str) -> ProcessSample {
        ProcessSample {
            pid,
            parent_pid: 1,
            owner_name: "a_very_long_user_name".to_string(),
            cpu_percent: 12.5,
            mem_percent: 3.25,
            virtual_kb: 204_800,
            resident_kb: 1_024,
            state_code: 'S',
            command: command.to_string(),
            priority: 20,
            nice_delta: 0,
            thread_count: 4,
        }
    }

    #[test]
    fn test_prefix_matches_fixed_width() {
        let prefix = row_prefix(&sample(42, "bash"));
        let cpu_mem = format!("{:>5.1}  {:>5.1}  ", 12.5, 3.25);
        assert_eq!(prefix.chars().count() + cpu_mem.chars().count(), FIXED_COLUMNS_WIDTH);
        assert!(prefix.contains("a_very_lo "));
    }

    #[test]
    fn test_render_list_truncates_command() {
        let mut table = ProcessTable::new(SortColumn::Pid, false, String::new());
        table.set_visible_rows(3);
        table.update(vec![sample(1, &"x".repeat(200)), sample(2, "short")]);
        let layout = Layout::compute(100, 10, 1);

        let mut out = Vec::new();
        render_process_list(&mut out, &layout, &table).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("..."));
        assert!(text.contains("short"));
        assert!(!text.contains(&"x".repeat(100 - FIXED_COLUMNS_WIDTH)));
    }

    /// Visible text of each `MoveTo`-started row, with escape sequences removed.
    fn screen_rows(bytes: Vec<u8>) -> Vec<String> {
        let text = String::from_utf8(bytes).unwrap();
        let mut rows = Vec::new();
        let mut chars = text.chars().peekable();
        let mut current: Option<String> = None;
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                // CSI: skip parameters up to the final byte
                chars.next();
                let mut last = ' ';
                for p in chars.by_ref() {
                    last = p;
                    if ('@'..='~').contains(&p) {
                        break;
                    }
                }
                if last == 'H' {
                    rows.extend(current.take());
                    current = Some(String::new());
                }
            } else if let Some(row) = current.as_mut() {
                row.push(c);
            }
        }
        rows.extend(current);
        rows
    }

    #[test]
    fn test_wide_command_stays_inside_width() {
        let mut table = ProcessTable::new(SortColumn::Pid, false, String::new());
        table.set_visible_rows(2);
        let mut wide = sample(7, "編集 文書ファイル一覧表示テスト用のとても長いコマンドライン引数");
        wide.owner_name = "ユーザー名前長い".to_string();
        table.update(vec![wide, sample(8, "emoji 🚀🚀🚀🚀🚀🚀🚀🚀🚀🚀🚀🚀🚀🚀🚀🚀🚀🚀🚀🚀")]);
        let layout = Layout::compute(100, 10, 1);

        let mut out = Vec::new();
        render_process_list(&mut out, &layout, &table).unwrap();
        let rows = screen_rows(out);
        assert_eq!(rows.len(), layout.table_rows);
        for row in &rows {
            assert_eq!(display_width(row), 100, "row {:?}", row);
        }
        assert!(rows[0].contains("編集"));
    }
}
