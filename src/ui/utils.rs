//! Utility functions for UI rendering
//!
//! Widths are terminal columns: East Asian wide glyphs take two, combining
//! marks take none. A wide glyph that would straddle the edge is dropped
//! instead of split.

use std::io::{self, Write};

use crossterm::{queue, style::Color, style::Print};
use unicode_width::UnicodeWidthChar;

use crate::constants::{USAGE_THRESHOLD_HIGH, USAGE_THRESHOLD_MEDIUM};

/// Columns taken by one character. Control characters count as zero.
fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Number of terminal columns `s` occupies.
#[must_use]
pub fn display_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Splits off the longest prefix that fits in `max_width` columns.
fn split_at_width(s: &str, max_width: usize) -> (&str, usize) {
    let mut used = 0;
    for (byte_index, c) in s.char_indices() {
        let w = char_width(c);
        if used + w > max_width {
            return (&s[..byte_index], used);
        }
        used += w;
    }
    (s, used)
}

/// Returns the longest prefix of `s` that fits in `max_width` columns.
#[must_use]
pub fn clip(s: &str, max_width: usize) -> &str {
    split_at_width(s, max_width).0
}

/// Returns the longest suffix of `s` that fits in `max_width` columns.
#[must_use]
pub fn clip_tail(s: &str, max_width: usize) -> &str {
    let mut used = 0;
    let mut start = s.len();
    for (byte_index, c) in s.char_indices().rev() {
        let w = char_width(c);
        if used + w > max_width {
            break;
        }
        used += w;
        start = byte_index;
    }
    &s[start..]
}

/// Truncates a string to fit within a given width.
///
/// If the string exceeds `max_width` columns, it is truncated and "..." is
/// appended.
///
/// # Arguments
/// * `s` - The string to truncate
/// * `max_width` - Maximum display width of the output
///
/// # Returns
/// The input unchanged if it fits, or a truncated version with "..." suffix
#[must_use]
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        s.to_string()
    } else if max_width > 3 {
        format!("{}...", clip(s, max_width - 3))
    } else {
        clip(s, max_width).to_string()
    }
}

/// Clips or pads `s` to exactly `width` columns.
#[must_use]
pub fn fit(s: &str, width: usize) -> String {
    let (clipped, used) = split_at_width(s, width);
    format!("{}{:pad$}", clipped, "", pad = width - used)
}

/// Prints as much of `text` as fits in `room` columns, shrinking `room`
/// accordingly.
pub fn put<W: Write>(out: &mut W, text: &str, room: &mut usize) -> io::Result<()> {
    let (shown, used) = split_at_width(text, *room);
    *room -= used;
    queue!(out, Print(shown))
}

/// Returns a color for a usage percentage.
///
/// # Color Thresholds
/// * Red - High usage (≥75%)
/// * Yellow - Medium usage (≥40%)
/// * Green - Low usage (<40%)
#[must_use]
pub fn usage_color(percent: f64) -> Color {
    if percent >= USAGE_THRESHOLD_HIGH {
        Color::Red
    } else if percent >= USAGE_THRESHOLD_MEDIUM {
        Color::Yellow
    } else {
        Color::Green
    }
}
