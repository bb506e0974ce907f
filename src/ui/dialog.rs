//! Centered modal dialogs drawn over the process list

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};

use crate::app::KillTarget;
use crate::constants::PROMPT_DIALOG_WIDTH;

use super::utils::{clip, clip_tail, display_width, fit, truncate_string};

/// A bordered box centered in the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogBox {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
    pub background: Color,
}

impl DialogBox {
    /// Centers a box of the wanted size, shrunk to the screen.
    ///
    /// Returns `None` when the screen cannot hold even an empty frame.
    pub fn centered(
        screen_width: usize,
        screen_height: usize,
        width: usize,
        height: usize,
        background: Color,
    ) -> Option<Self> {
        let width = width.min(screen_width);
        let height = height.min(screen_height);
        if width < 4 || height < 3 {
            return None;
        }
        Some(Self {
            x: (screen_width - width) / 2,
            y: (screen_height - height) / 2,
            width,
            height,
            background,
        })
    }

    /// Width between the left and right borders
    pub fn inner_width(&self) -> usize {
        self.width - 2
    }

    /// Rows available for content between the top and bottom borders
    pub fn inner_height(&self) -> usize {
        self.height - 2
    }

    /// Draws the border with a centered title and blanks the inside.
    pub fn draw_frame<W: Write>(&self, out: &mut W, title: &str) -> io::Result<()> {
        let inner = self.inner_width();
        let title = clip(title, inner);
        let title_width = display_width(title);
        let left = (inner - title_width) / 2;
        let right = inner - left - title_width;

        queue!(
            out,
            MoveTo(self.x as u16, self.y as u16),
            SetBackgroundColor(self.background),
            SetForegroundColor(Color::White),
            Print(format!("┌{}", "─".repeat(left))),
            SetForegroundColor(Color::Yellow),
            Print(title),
            SetForegroundColor(Color::White),
            Print(format!("{}┐", "─".repeat(right))),
            ResetColor
        )?;
        for row in 0..self.inner_height() {
            self.draw_line(out, row, "", Color::White)?;
        }
        queue!(
            out,
            MoveTo(self.x as u16, (self.y + self.height - 1) as u16),
            SetBackgroundColor(self.background),
            SetForegroundColor(Color::White),
            Print(format!("└{}┘", "─".repeat(inner))),
            ResetColor
        )
    }

    /// Draws one content row, padded or clipped to the inner width.
    ///
    /// Rows past the bottom border are ignored.
    pub fn draw_line<W: Write>(&self, out: &mut W, row: usize, content: &str, fg: Color) -> io::Result<()> {
        if row >= self.inner_height() {
            return Ok(());
        }
        queue!(
            out,
            MoveTo(self.x as u16, (self.y + 1 + row) as u16),
            SetBackgroundColor(self.background),
            SetForegroundColor(Color::White),
            Print("│"),
            SetForegroundColor(fg),
            Print(fit(content, self.inner_width())),
            SetForegroundColor(Color::White),
            Print("│"),
            ResetColor
        )
    }
}

/// Draws a centered box sized to hold `lines`, each in its own color.
///
/// Nothing is drawn when the screen is too small for a frame.
pub fn render_modal<W: Write>(
    out: &mut W,
    screen: (usize, usize),
    box_width: usize,
    background: Color,
    title: &str,
    lines: &[(String, Color)],
) -> io::Result<()> {
    let (width, height) = screen;
    let Some(dialog) = DialogBox::centered(width, height, box_width, lines.len() + 2, background) else {
        return Ok(());
    };
    dialog.draw_frame(out, title)?;
    for (row, (text, fg)) in lines.iter().enumerate() {
        dialog.draw_line(out, row, text, *fg)?;
    }
    Ok(())
}

/// Renders the kill confirmation for the captured target.
pub fn render_kill_confirm<W: Write>(
    out: &mut W,
    width: usize,
    height: usize,
    target: &KillTarget,
) -> io::Result<()> {
    let inner = PROMPT_DIALOG_WIDTH.min(width).saturating_sub(2);
    let lines = [
        (format!(" Send SIGTERM to PID {}?", target.pid), Color::White),
        (format!(" {}", truncate_string(&target.command, inner.saturating_sub(2))), Color::Grey),
        (String::new(), Color::White),
        (" y: Confirm    any other key: Cancel".to_string(), Color::Yellow),
        (String::new(), Color::White),
    ];
    render_modal(out, (width, height), PROMPT_DIALOG_WIDTH, Color::DarkRed, " Kill Process ", &lines)
}

/// Renders the filter input box with the staging buffer and a cursor.
pub fn render_filter_input<W: Write>(
    out: &mut W,
    width: usize,
    height: usize,
    buffer: &str,
) -> io::Result<()> {
    // Keep the end of a long buffer visible
    let room = PROMPT_DIALOG_WIDTH.min(width).saturating_sub(5);
    let lines = [
        (format!(" {}█", clip_tail(buffer, room)), Color::White),
        (String::new(), Color::White),
        (" Enter: Apply    Esc: Cancel".to_string(), Color::Yellow),
    ];
    render_modal(
        out,
        (width, height),
        PROMPT_DIALOG_WIDTH,
        Color::DarkBlue,
        " Filter (command or user) ",
        &lines,
    )
}
