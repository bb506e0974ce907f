//! History graphs, gauges and per-core sparklines

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};

use crate::app::MetricHistory;
use crate::constants::{CORE_CELL_WIDTH, CORE_SPARKLINE_LEN, GRAPH_HEIGHT};

use super::layout::CoreArea;
use super::utils::{fit, put, usage_color};

/// Block characters from empty to full, in eighths of a cell
const BLOCKS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Computes column heights, in eighths of a cell, for a graph `width` columns
/// wide and `height` rows tall.
///
/// One sample per column, newest on the right. Heights are scaled to the
/// largest value in the visible window; columns without a sample are 0.
#[must_use]
pub fn column_levels(samples: &[f64], width: usize, height: usize) -> Vec<usize> {
    let window = &samples[samples.len().saturating_sub(width)..];
    let max = window.iter().copied().fold(0.0_f64, f64::max);
    let full = (height * 8) as f64;

    let mut levels = vec![0; width - window.len()];
    levels.extend(window.iter().map(|&value| {
        if max > 0.0 {
            ((value.max(0.0) / max) * full).round() as usize
        } else {
            0
        }
    }));
    levels
}

/// Character for one cell of a column `level` eighths tall, `row` rows up
/// from the bottom.
fn cell(level: usize, row: usize) -> char {
    BLOCKS[level.saturating_sub(row * 8).min(8)]
}

/// Draws the bars of a history graph with its top-left corner at `(x, y)`.
pub fn render_history<W: Write>(
    out: &mut W,
    x: usize,
    y: usize,
    width: usize,
    samples: &[f64],
) -> io::Result<()> {
    if width == 0 {
        return Ok(());
    }
    let levels = column_levels(samples, width, GRAPH_HEIGHT);
    let first_sample = width - samples.len().min(width);
    let window = &samples[samples.len().saturating_sub(width)..];

    for line in 0..GRAPH_HEIGHT {
        let row = GRAPH_HEIGHT - 1 - line;
        queue!(out, MoveTo(x as u16, (y + line) as u16))?;

        // Group runs of equal color into one Print
        let mut color = Color::Reset;
        let mut run = String::new();
        for (col, &level) in levels.iter().enumerate() {
            let col_color = match col.checked_sub(first_sample) {
                Some(i) => usage_color(window[i]),
                None => Color::Reset,
            };
            if col_color != color && !run.is_empty() {
                queue!(out, SetForegroundColor(color), Print(&run))?;
                run.clear();
            }
            color = col_color;
            run.push(cell(level, row));
        }
        queue!(out, SetForegroundColor(color), Print(&run), ResetColor)?;
    }
    Ok(())
}

/// Builds a bracketed gauge `width` characters wide, filled in proportion
/// to `percent`.
#[must_use]
pub fn gauge(percent: f64, width: usize) -> String {
    let fill = |cells: usize| ((percent.clamp(0.0, 100.0) / 100.0) * cells as f64).round() as usize;
    if width < 2 {
        // No room for brackets
        let filled = fill(width);
        return format!("{}{}", "|".repeat(filled), " ".repeat(width - filled));
    }
    let inner = width - 2;
    let filled = fill(inner);
    format!("[{}{}]", "|".repeat(filled), " ".repeat(inner - filled))
}

/// Draws a panel title row: label, a usage gauge and a detail string.
pub fn render_panel_title<W: Write>(
    out: &mut W,
    x: usize,
    y: usize,
    width: usize,
    label: &str,
    percent: f64,
    detail: &str,
) -> io::Result<()> {
    let label = format!(" {:<4}", label);
    let detail = format!(" {} ", detail);
    let gauge_width = width.saturating_sub(label.chars().count() + detail.chars().count());
    let mut room = width;

    queue!(out, MoveTo(x as u16, y as u16), SetForegroundColor(Color::Cyan))?;
    put(out, &label, &mut room)?;
    queue!(out, SetForegroundColor(usage_color(percent)))?;
    put(out, &gauge(percent, gauge_width), &mut room)?;
    queue!(out, SetForegroundColor(Color::White))?;
    put(out, &detail, &mut room)?;
    queue!(out, Print(" ".repeat(room)), ResetColor)
}

/// Renders the last `len` samples on a fixed 0-100 scale, one character per
/// sample, right-aligned.
#[must_use]
pub fn sparkline(samples: &[f64], len: usize) -> String {
    let window = &samples[samples.len().saturating_sub(len)..];
    let mut line = " ".repeat(len - window.len());
    line.extend(window.iter().map(|&value| {
        let eighths = ((value.clamp(0.0, 100.0) / 100.0) * 8.0).round() as usize;
        BLOCKS[eighths]
    }));
    line
}

/// Draws per-core cells: core number, recent sparkline and current usage.
pub fn render_core_cells<W: Write>(
    out: &mut W,
    area: &CoreArea,
    width: usize,
    histories: &[MetricHistory],
    percents: &[f64],
) -> io::Result<()> {
    for line in 0..area.rows {
        queue!(out, MoveTo(0, (area.top + line) as u16))?;
        let mut room = width;
        let first = line * area.cells_per_row;
        let last = (first + area.cells_per_row).min(histories.len());

        for core in first..last {
            let percent = percents.get(core).copied().unwrap_or(0.0);
            let spark = sparkline(histories[core].last(CORE_SPARKLINE_LEN), CORE_SPARKLINE_LEN);
            let text = fit(&format!("{:>3} {} {:>3.0}%", core, spark, percent), CORE_CELL_WIDTH);
            queue!(out, SetForegroundColor(usage_color(percent)))?;
            put(out, &text, &mut room)?;
        }
        queue!(out, ResetColor, Print(" ".repeat(room)))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_levels_right_aligned_and_scaled_to_window_max() {
        let levels = column_levels(&[10.0, 20.0, 40.0], 5, 2);
        assert_eq!(levels, vec![0, 0, 4, 8, 16]);
    }

    #[test]
    fn test_column_levels_keeps_newest_samples() {
        let samples: Vec<f64> = (1..=10).map(f64::from).collect();
        let levels = column_levels(&samples, 4, 1);
        // Window is 7..=10, so 10 is full height
        assert_eq!(levels.len(), 4);
        assert_eq!(levels[3], 8);
        assert_eq!(levels[0], 6);
    }

    #[test]
    fn test_column_levels_all_zero() {
        assert_eq!(column_levels(&[0.0, 0.0], 3, 5), vec![0, 0, 0]);
        assert!(column_levels(&[1.0], 0, 5).is_empty());
    }

    #[test]
    fn test_cell_characters() {
        assert_eq!(cell(12, 0), '█');
        assert_eq!(cell(12, 1), '▄');
        assert_eq!(cell(12, 2), ' ');
    }

    #[test]
    fn test_gauge_fill() {
        assert_eq!(gauge(50.0, 12), "[|||||     ]");
        assert_eq!(gauge(150.0, 6), "[||||]");
        assert_eq!(gauge(-3.0, 4), "[  ]");
        assert_eq!(gauge(80.0, 1), "|");
    }

    #[test]
    fn test_one_cell_gauge_is_proportional() {
        assert_eq!(gauge(0.0, 1), " ");
        assert_eq!(gauge(30.0, 1), " ");
        assert_eq!(gauge(100.0, 1), "|");
        assert_eq!(gauge(50.0, 0), "");
    }

    #[test]
    fn test_sparkline() {
        assert_eq!(sparkline(&[0.0, 50.0, 100.0], 4), "  ▄█");
        assert_eq!(sparkline(&[100.0; 10], 3), "███");
    }

    #[test]
    fn test_render_history_writes_something() {
        let mut out = Vec::new();
        render_history(&mut out, 0, 0, 10, &[5.0, 50.0, 90.0]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains('█'));
    }
}
