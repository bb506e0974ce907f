//! Screen layout
//!
//! The layout is recomputed from the terminal size every frame. Rows are
//! handed out top-down (header, stats, graphs, cores, column header) and
//! bottom-up (footer, status); whatever remains belongs to the process table.
//! A terminal too small for a region simply does not get it.

use crate::constants::{
    CORE_CELL_WIDTH, GRAPH_HEIGHT, GRAPH_MIN_TERMINAL_HEIGHT, GRAPH_MIN_WIDTH,
    GRAPH_SIDE_BY_SIDE_WIDTH, MAX_CORE_ROWS, MIN_TABLE_ROWS,
};

/// Placement of the CPU and memory history panels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphArea {
    /// First row of the graph area
    pub top: usize,
    /// Panels share one band of rows when true, otherwise memory sits below CPU
    pub side_by_side: bool,
}

impl GraphArea {
    /// Rows used by one panel: a title row plus the bars
    pub const PANEL_ROWS: usize = GRAPH_HEIGHT + 1;

    pub fn rows(&self) -> usize {
        if self.side_by_side {
            Self::PANEL_ROWS
        } else {
            Self::PANEL_ROWS * 2
        }
    }
}

/// Row band holding per-core cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreArea {
    pub top: usize,
    pub rows: usize,
    pub cells_per_row: usize,
}

/// Row assignments for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub width: usize,
    pub height: usize,
    pub header_row: Option<usize>,
    pub stats_row: Option<usize>,
    pub graphs: Option<GraphArea>,
    pub cores: Option<CoreArea>,
    pub table_header_row: Option<usize>,
    pub table_top: usize,
    pub table_rows: usize,
    pub status_row: Option<usize>,
    pub footer_row: Option<usize>,
}

impl Layout {
    /// Lays out a `width` x `height` terminal for a host with `core_count` cores.
    pub fn compute(width: u16, height: u16, core_count: usize) -> Self {
        let width = width as usize;
        let height = height as usize;
        let mut top = 0;
        let mut bottom = height;

        let header_row = (height >= 1).then(|| {
            top += 1;
            0
        });
        let footer_row = (height >= 2).then(|| {
            bottom -= 1;
            bottom
        });
        let status_row = (height >= 3).then(|| {
            bottom -= 1;
            bottom
        });
        let stats_row = (bottom.saturating_sub(top) >= 2).then(|| {
            top += 1;
            top - 1
        });

        let mut graphs = None;
        if height >= GRAPH_MIN_TERMINAL_HEIGHT && width >= GRAPH_MIN_WIDTH {
            let area = GraphArea {
                top,
                side_by_side: width >= GRAPH_SIDE_BY_SIDE_WIDTH,
            };
            // Keep room for the column header and a few process rows
            if bottom.saturating_sub(top) > area.rows() + MIN_TABLE_ROWS {
                top += area.rows();
                graphs = Some(area);
            }
        }

        let mut cores = None;
        if graphs.is_some() && core_count > 0 {
            let cells_per_row = (width / CORE_CELL_WIDTH).max(1);
            let rows = core_count.div_ceil(cells_per_row).min(MAX_CORE_ROWS);
            if bottom.saturating_sub(top) > rows + MIN_TABLE_ROWS {
                cores = Some(CoreArea {
                    top,
                    rows,
                    cells_per_row,
                });
                top += rows;
            }
        }

        let table_header_row = (bottom > top).then(|| {
            top += 1;
            top - 1
        });

        Layout {
            width,
            height,
            header_row,
            stats_row,
            graphs,
            cores,
            table_header_row,
            table_top: top,
            table_rows: bottom.saturating_sub(top),
            status_row,
            footer_row,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every assigned row index is distinct and on screen
    fn assert_rows_fit(layout: &Layout) {
        let mut used = Vec::new();
        used.extend(layout.header_row);
        used.extend(layout.stats_row);
        if let Some(g) = layout.graphs {
            used.extend(g.top..g.top + g.rows());
        }
        if let Some(c) = layout.cores {
            used.extend(c.top..c.top + c.rows);
        }
        used.extend(layout.table_header_row);
        used.extend(layout.table_top..layout.table_top + layout.table_rows);
        used.extend(layout.status_row);
        used.extend(layout.footer_row);

        let count = used.len();
        used.sort_unstable();
        used.dedup();
        assert_eq!(used.len(), count, "overlapping rows in {:?}", layout);
        assert!(used.iter().all(|&row| row < layout.height));
    }

    #[test]
    fn test_large_terminal_gets_every_region() {
        let layout = Layout::compute(120, 40, 8);
        assert_eq!(layout.header_row, Some(0));
        assert_eq!(layout.stats_row, Some(1));
        let graphs = layout.graphs.expect("graphs shown");
        assert!(graphs.side_by_side);
        assert_eq!(graphs.top, 2);
        assert!(layout.cores.is_some());
        assert_eq!(layout.footer_row, Some(39));
        assert_eq!(layout.status_row, Some(38));
        assert!(layout.table_rows >= MIN_TABLE_ROWS);
        assert_rows_fit(&layout);
    }

    #[test]
    fn test_narrow_terminal_stacks_graphs() {
        let layout = Layout::compute(60, 40, 2);
        let graphs = layout.graphs.expect("graphs shown");
        assert!(!graphs.side_by_side);
        assert_eq!(graphs.rows(), GraphArea::PANEL_ROWS * 2);
        assert_rows_fit(&layout);
    }

    #[test]
    fn test_short_terminal_hides_graphs() {
        let layout = Layout::compute(120, 12, 4);
        assert!(layout.graphs.is_none());
        assert!(layout.cores.is_none());
        // header, stats, column header, status, footer
        assert_eq!(layout.table_rows, 7);
        assert_rows_fit(&layout);
    }

    #[test]
    fn test_core_rows_are_capped() {
        let layout = Layout::compute(80, 50, 64);
        let cores = layout.cores.expect("cores shown");
        assert_eq!(cores.cells_per_row, 80 / CORE_CELL_WIDTH);
        assert_eq!(cores.rows, MAX_CORE_ROWS);
    }

    #[test]
    fn test_degenerate_sizes() {
        let empty = Layout::compute(0, 0, 4);
        assert_eq!(empty.header_row, None);
        assert_eq!(empty.table_rows, 0);

        for height in 0..8 {
            for width in [0, 1, 10, 200] {
                assert_rows_fit(&Layout::compute(width, height, 4));
            }
        }

        let tiny = Layout::compute(10, 3, 1);
        assert_eq!(tiny.header_row, Some(0));
        assert_eq!(tiny.status_row, Some(1));
        assert_eq!(tiny.footer_row, Some(2));
        assert_eq!(tiny.table_rows, 0);
    }
}
