//! Cursor, viewport and cell selection state
//!
//! Positions are display-grid coordinates: rows `0..HEADER_ROWS` are header
//! rows, data rows follow.

/// Number of header rows at the top of the grid
pub const HEADER_ROWS: usize = 1;

/// Rows kept between the cursor and the top/bottom edge when scrolling
pub const ROW_SCROLL_MARGIN: isize = 4;

/// Columns kept between the cursor and the left/right edge when scrolling
pub const COLUMN_SCROLL_MARGIN: isize = 2;

/// How a cell relates to the current selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellSelection {
    /// The exact cursor cell in modes that single it out
    Point,
    Primary,
    Secondary,
    None,
}

/// Everything the grid renderer needs to know about one cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    pub text: String,
    pub is_header: bool,
    /// Column is configured but absent from the table
    pub is_fake: bool,
    /// Placeholder shown when no rows survive the filters
    pub is_empty: bool,
    pub selection: CellSelection,
}

/// Shared cursor position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            row: HEADER_ROWS,
            col: 0,
        }
    }
}

impl Cursor {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Clamp the row to the data rows and the column to the grid columns
    pub fn clamp(&mut self, row_count: usize, col_count: usize) {
        let last_row = row_count.saturating_sub(1).max(HEADER_ROWS);
        self.row = self.row.clamp(HEADER_ROWS, last_row);
        self.col = self.col.min(col_count.saturating_sub(1));
    }
}

/// Inclusive rectangle of grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub top: usize,
    pub bottom: usize,
    pub left: usize,
    pub right: usize,
}

impl CellRect {
    /// Smallest rectangle containing both corners
    pub fn spanning(a: Cursor, b: Cursor) -> Self {
        Self {
            top: a.row.min(b.row),
            bottom: a.row.max(b.row),
            left: a.col.min(b.col),
            right: a.col.max(b.col),
        }
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.top..=self.bottom).contains(&row) && (self.left..=self.right).contains(&col)
    }

    /// Every cell, all rows of the leftmost column first
    pub fn column_major(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (self.left..=self.right).flat_map(move |col| (self.top..=self.bottom).map(move |row| (row, col)))
    }
}

/// Scroll offsets plus the visible extent measured at the last draw
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub row_offset: usize,
    pub col_offset: usize,
    pub visible_rows: usize,
    pub visible_cols: usize,
}

impl Viewport {
    /// Clamp the cursor, then scroll just enough to keep it inside the margins
    pub fn follow(&mut self, cursor: &mut Cursor, row_count: usize, col_count: usize) {
        cursor.clamp(row_count, col_count);

        let row_offset = scroll_axis(
            self.row_offset as isize,
            cursor.row as isize,
            self.visible_rows as isize,
            ROW_SCROLL_MARGIN,
        );
        let col_offset = scroll_axis(
            self.col_offset as isize,
            cursor.col as isize,
            self.visible_cols as isize,
            COLUMN_SCROLL_MARGIN,
        );

        self.row_offset = clamp_offset(row_offset, row_count);
        self.col_offset = clamp_offset(col_offset, col_count);
    }
}

/// Move `offset` by the minimum amount that keeps `cursor` at least
/// `margin` cells away from both visible edges
fn scroll_axis(offset: isize, cursor: isize, visible: isize, margin: isize) -> isize {
    let mut offset = offset;

    if cursor < offset + margin {
        offset = cursor - margin;
    }

    let overshoot = cursor - (offset + visible - margin);
    if overshoot >= 0 {
        offset += overshoot;
    }

    offset
}

fn clamp_offset(offset: isize, count: usize) -> usize {
    let max = count.saturating_sub(1) as isize;
    offset.clamp(0, max.max(0)) as usize
}
