//! Box mode - rectangular selection between an anchor and the cursor

use super::{HelpTopic, TableMode};
use crate::action::{Action, ModeKind};
use crate::model::{CellRect, CellSelection, Cursor};
use crossterm::event::{KeyCode, KeyEvent};

/// Overlay mode selecting every cell between `anchor` and the cursor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoxMode {
    anchor: Cursor,
}

impl BoxMode {
    pub fn anchor(&self) -> Cursor {
        self.anchor
    }

    pub fn bounds(&self, mark: &Cursor) -> CellRect {
        CellRect::spanning(self.anchor, *mark)
    }
}

impl TableMode for BoxMode {
    fn kind(&self) -> ModeKind {
        ModeKind::Box
    }

    /// The anchor is captured every time the mode becomes active
    fn on_enter(&mut self, mark: &Cursor) {
        self.anchor = *mark;
    }

    fn classify(&self, row: usize, col: usize, mark: &Cursor) -> CellSelection {
        if row == mark.row && col == mark.col {
            CellSelection::Point
        } else if self.bounds(mark).contains(row, col) {
            CellSelection::Primary
        } else {
            CellSelection::None
        }
    }

    fn on_select(&mut self, row: usize, col: usize, mark: &mut Cursor) {
        mark.row = row;
        mark.col = col;
    }

    fn on_activate(&mut self, _row: usize, _col: usize, mark: &Cursor) -> Option<Action> {
        Some(Action::CopyRegion(self.bounds(mark)))
    }

    fn handle_key_event(&mut self, key: KeyEvent, mark: &Cursor) -> Option<Action> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::PopMode),
            KeyCode::Char('c') => Some(Action::CopyRegion(self.bounds(mark))),
            _ => None,
        }
    }

    fn help_topics(&self) -> &'static [HelpTopic] {
        &[HelpTopic::App, HelpTopic::Box]
    }
}
