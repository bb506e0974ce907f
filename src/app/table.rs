//! Process table model: filter, sort, selection and scrolling
//!
//! The table owns the samples from the latest pass and an ordered list of
//! indices into them (the filtered, sorted view). Every mutation ends by
//! re-establishing the window invariant:
//!
//! `scroll_offset <= selected_index < scroll_offset + visible_rows`
//!
//! with both indices clamped into the view (or 0 when it is empty).

use super::SortColumn;
use crate::system::ProcessSample;

#[derive(Debug, Clone)]
pub struct ProcessTable {
    /// Samples from the latest pass, in enumeration order
    samples: Vec<ProcessSample>,
    /// Filtered, sorted indices into `samples`
    view: Vec<usize>,
    sort_column: SortColumn,
    sort_descending: bool,
    /// Case-sensitive substring matched against command and owner
    filter_text: String,
    selected_index: usize,
    scroll_offset: usize,
    visible_rows: usize,
}

impl ProcessTable {
    pub fn new(sort_column: SortColumn, sort_descending: bool, filter_text: String) -> Self {
        Self {
            samples: Vec::new(),
            view: Vec::new(),
            sort_column,
            sort_descending,
            filter_text,
            selected_index: 0,
            scroll_offset: 0,
            visible_rows: 1,
        }
    }

    /// Replaces the process set with a new pass and re-derives the view.
    pub fn update(&mut self, samples: Vec<ProcessSample>) {
        self.samples = samples;
        self.rebuild_view();
    }

    /// Applies filter and sort to the current samples, then clamps.
    fn rebuild_view(&mut self) {
        let filter = self.filter_text.as_str();
        let mut view: Vec<usize> = self
            .samples
            .iter()
            .enumerate()
            .filter(|(_, s)| matches_filter(s, filter))
            .map(|(i, _)| i)
            .collect();

        let column = self.sort_column;
        let descending = self.sort_descending;
        let samples = &self.samples;
        view.sort_by(|&i, &j| {
            let (a, b) = (&samples[i], &samples[j]);
            let primary = column.compare(a, b);
            let primary = if descending { primary.reverse() } else { primary };
            // Tie-break stays ascending by pid in both directions
            primary.then_with(|| a.pid.cmp(&b.pid))
        });

        self.view = view;
        self.clamp();
    }

    /// Re-establishes the selection and window invariant.
    ///
    /// The window only moves as far as needed to keep the selection visible.
    fn clamp(&mut self) {
        let len = self.view.len();
        if len == 0 {
            self.selected_index = 0;
            self.scroll_offset = 0;
            return;
        }

        self.selected_index = self.selected_index.min(len - 1);
        let rows = self.visible_rows.max(1);

        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + rows {
            self.scroll_offset = self.selected_index + 1 - rows;
        }

        // Don't leave blank rows below the list when it could be filled
        let max_offset = len.saturating_sub(rows);
        if self.scroll_offset > max_offset {
            self.scroll_offset = max_offset;
        }
    }

    /// Sets the number of table rows the terminal can show this frame.
    pub fn set_visible_rows(&mut self, rows: usize) {
        self.visible_rows = rows.max(1);
        self.clamp();
    }

    /// Moves selection by `delta` rows (negative moves up).
    pub fn move_selection(&mut self, delta: isize) {
        self.selected_index = self.selected_index.saturating_add_signed(delta);
        self.clamp();
    }

    /// Moves selection by whole pages of visible rows.
    pub fn page(&mut self, delta_pages: isize) {
        let step = self.visible_rows.max(1) as isize;
        self.move_selection(delta_pages.saturating_mul(step));
    }

    /// Jumps selection to the first process.
    pub fn jump_to_start(&mut self) {
        self.selected_index = 0;
        self.clamp();
    }

    /// Jumps selection to the last process.
    pub fn jump_to_end(&mut self) {
        self.selected_index = self.view.len().saturating_sub(1);
        self.clamp();
    }

    /// Cycles to the next sort column.
    pub fn cycle_sort(&mut self) {
        self.sort_column = self.sort_column.next();
        self.rebuild_view();
    }

    /// Toggles sort order between ascending and descending.
    pub fn toggle_sort_direction(&mut self) {
        self.sort_descending = !self.sort_descending;
        self.rebuild_view();
    }

    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.filter_text = text.into();
        self.rebuild_view();
    }

    pub fn clear_filter(&mut self) {
        self.set_filter(String::new());
    }

    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    pub fn sort_column(&self) -> SortColumn {
        self.sort_column
    }

    pub fn sort_descending(&self) -> bool {
        self.sort_descending
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    #[cfg(test)]
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    #[cfg(test)]
    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    /// Number of rows in the filtered view.
    pub fn len(&self) -> usize {
        self.view.len()
    }

    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    /// Number of processes in the pass, before filtering.
    pub fn total_len(&self) -> usize {
        self.samples.len()
    }

    /// Row at `index` of the filtered, sorted view.
    pub fn get(&self, index: usize) -> Option<&ProcessSample> {
        self.view.get(index).map(|&i| &self.samples[i])
    }

    /// Currently selected process, if any.
    pub fn selected(&self) -> Option<&ProcessSample> {
        self.get(self.selected_index)
    }

    /// Rows inside the scroll window, with their view index.
    pub fn window(&self) -> impl Iterator<Item = (usize, &ProcessSample)> + '_ {
        self.view
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(self.visible_rows)
            .map(|(row, &i)| (row, &self.samples[i]))
    }

    /// The whole filtered, sorted view.
    #[cfg(test)]
    pub fn rows(&self) -> impl Iterator<Item = &ProcessSample> + '_ {
        self.view.iter().map(|&i| &self.samples[i])
    }
}

/// Empty filter keeps everything; otherwise command or owner must contain it.
fn matches_filter(sample: &ProcessSample, filter: &str) -> bool {
    filter.is_empty() || sample.command.contains(filter) || sample.owner_name.contains(filter)
}
