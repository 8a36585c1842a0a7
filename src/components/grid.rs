//! Grid component for the transformed table
//!
//! Draws the visible window of the grid with selection colours and keeps
//! track of where each cell landed so mouse clicks can be mapped back.

use crate::action::{Action, Motion};
use crate::component::Component;
use crate::model::{CellSelection, Cursor, DomainState, GridCell, Viewport, HEADER_ROWS};
use crate::modes::{Mode, TableMode};
use anyhow::Result;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const NO_COLUMNS_MESSAGE: &str = "No columns to show. Press Ctrl-y to add some back.";

/// Data needed to draw the grid
pub struct GridRenderContext<'a> {
    pub domain: &'a DomainState,
    pub mode: &'a Mode,
    pub mark: &'a Cursor,
    pub fat_table: bool,
}

/// Where the last frame put things
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct GridGeometry {
    /// Screen line of the first data row
    data_top: u16,
    /// Grid row drawn on `data_top`
    first_data_row: usize,
    /// Number of data rows drawn
    data_lines: usize,
    /// (column index, x, width) of every drawn column
    columns: Vec<(usize, u16, u16)>,
}

impl GridGeometry {
    fn cell_at(&self, x: u16, y: u16) -> Option<(usize, usize)> {
        if y < self.data_top {
            return None;
        }
        let line = (y - self.data_top) as usize;
        if line >= self.data_lines {
            return None;
        }

        let col = self
            .columns
            .iter()
            .find(|(_, left, width)| x >= *left && x < left.saturating_add(*width))?
            .0;
        Some((self.first_data_row + line, col))
    }
}

/// Grid component
#[derive(Debug, Default)]
pub struct GridComponent {
    geometry: GridGeometry,
}

impl GridComponent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grid position under a screen coordinate, as of the last draw
    pub fn cell_at(&self, x: u16, y: u16) -> Option<(usize, usize)> {
        self.geometry.cell_at(x, y)
    }

    /// Draw the grid and record how many rows and columns fit
    pub fn draw_grid(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        ctx: &GridRenderContext,
        viewport: &mut Viewport,
    ) {
        let domain = ctx.domain;
        let col_count = domain.display_column_count();

        if col_count == 0 {
            self.geometry = GridGeometry::default();
            viewport.visible_rows = area.height as usize;
            viewport.visible_cols = 0;

            let placeholder = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    NO_COLUMNS_MESSAGE,
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .alignment(Alignment::Center);
            frame.render_widget(placeholder, area);
            return;
        }

        let columns = layout_columns(domain, area, viewport.col_offset);
        let header_lines: u16 = if ctx.fat_table { 2 } else { 1 };
        let available = area.height.saturating_sub(header_lines) as usize;
        let first_data_row = HEADER_ROWS + viewport.row_offset;
        let data_lines = domain
            .display_row_count()
            .saturating_sub(first_data_row)
            .min(available);

        let mut lines = Vec::with_capacity(data_lines + header_lines as usize);
        lines.push(self.build_line(ctx, &columns, 0));
        if ctx.fat_table {
            lines.push(separator_line(&columns));
        }
        for row in first_data_row..first_data_row + data_lines {
            lines.push(self.build_line(ctx, &columns, row));
        }

        frame.render_widget(Paragraph::new(lines), area);

        viewport.visible_rows = HEADER_ROWS + available;
        viewport.visible_cols = columns.len();
        self.geometry = GridGeometry {
            data_top: area.y + header_lines.min(area.height),
            first_data_row,
            data_lines,
            columns,
        };
    }

    fn build_line(
        &self,
        ctx: &GridRenderContext,
        columns: &[(usize, u16, u16)],
        row: usize,
    ) -> Line<'static> {
        let separator = if ctx.fat_table { "│" } else { " " };
        let mut spans = Vec::with_capacity(columns.len() * 2);

        for (i, &(col, _, width)) in columns.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(
                    separator,
                    Style::default().fg(Color::DarkGray),
                ));
            }

            let selection = ctx.mode.classify(row, col, ctx.mark);
            match ctx.domain.grid_cell(row, col, selection) {
                Some(cell) => spans.push(Span::styled(
                    center(&cell.text, width as usize),
                    cell_style(&cell, col),
                )),
                None => spans.push(Span::raw(" ".repeat(width as usize))),
            }
        }

        Line::from(spans)
    }
}

impl Component for GridComponent {
    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let action = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self
                .cell_at(mouse.column, mouse.row)
                .map(|(row, col)| Action::Click { row, col }),
            MouseEventKind::ScrollDown => Some(Action::Move(Motion::Down)),
            MouseEventKind::ScrollUp => Some(Action::Move(Motion::Up)),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing is done through draw_grid which takes full context
        Ok(())
    }
}

/// Widest cell of a column, header included
fn column_width(domain: &DomainState, col: usize) -> usize {
    (0..domain.display_row_count())
        .filter_map(|row| domain.cell_text(row, col))
        .map(|text| text.width())
        .max()
        .unwrap_or(0)
        .max(1)
}

/// Columns from `col_offset` that fit into `area`, one cell of gap between
fn layout_columns(domain: &DomainState, area: Rect, col_offset: usize) -> Vec<(usize, u16, u16)> {
    let mut columns = Vec::new();
    let mut x = area.x;

    for col in col_offset..domain.display_column_count() {
        let remaining = area.right().saturating_sub(x);
        if remaining == 0 {
            break;
        }

        let width = column_width(domain, col).min(u16::MAX as usize) as u16;
        if width > remaining && !columns.is_empty() {
            break;
        }

        let width = width.min(remaining);
        columns.push((col, x, width));
        x = x.saturating_add(width).saturating_add(1);
    }

    columns
}

fn separator_line(columns: &[(usize, u16, u16)]) -> Line<'static> {
    let text = columns
        .iter()
        .map(|&(_, _, width)| "─".repeat(width as usize))
        .collect::<Vec<_>>()
        .join("┼");
    Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)))
}

/// Centre `text` in `width` display cells, cutting it when too wide
fn center(text: &str, width: usize) -> String {
    let mut fitted = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        fitted.push(ch);
        used += w;
    }

    let left = (width - used) / 2;
    let right = width - used - left;
    format!("{}{}{}", " ".repeat(left), fitted, " ".repeat(right))
}

/// Colours of one cell
///
/// Headers alternate green/blue backgrounds, data cells alternate
/// green/light blue text. Columns missing from the table are red, the
/// empty placeholder is grey. Selection only restyles data cells, except
/// for the point cell.
fn cell_style(cell: &GridCell, column: usize) -> Style {
    let even = column % 2 == 0;
    let mut bg = Color::Reset;
    let mut fg = Color::Reset;

    if cell.is_header {
        bg = if cell.is_fake {
            Color::Indexed(1)
        } else if even {
            Color::Indexed(22)
        } else {
            Color::Indexed(18)
        };
    } else if cell.is_empty {
        bg = Color::Indexed(244);
    } else if cell.is_fake {
        bg = Color::Indexed(9);
    } else if even {
        fg = Color::Indexed(46);
    } else {
        fg = Color::Indexed(117);
    }

    if !cell.is_header {
        match cell.selection {
            CellSelection::Primary => {
                if cell.is_fake || cell.is_empty {
                    fg = bg;
                    bg = Color::White;
                } else {
                    bg = fg;
                    fg = Color::Black;
                }
            }
            CellSelection::Secondary if !cell.is_fake => bg = Color::Indexed(239),
            _ => {}
        }
    }

    if cell.selection == CellSelection::Point {
        bg = Color::White;
        fg = Color::Black;
    }

    let style = Style::default().fg(fg).bg(bg);
    if cell.is_header {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}
