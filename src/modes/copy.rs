//! Copy mode - overlay that copies one cell or one column and pops itself

use super::{HelpTopic, TableMode};
use crate::action::{Action, ModeKind};
use crate::model::{CellSelection, Cursor};
use crossterm::event::{KeyCode, KeyEvent};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyMode;

impl TableMode for CopyMode {
    fn kind(&self) -> ModeKind {
        ModeKind::Copy
    }

    fn classify(&self, row: usize, col: usize, mark: &Cursor) -> CellSelection {
        if row == mark.row && col == mark.col {
            CellSelection::Primary
        } else if row == mark.row || col == mark.col {
            CellSelection::Secondary
        } else {
            CellSelection::None
        }
    }

    fn on_select(&mut self, row: usize, col: usize, mark: &mut Cursor) {
        mark.row = row;
        mark.col = col;
    }

    fn on_activate(&mut self, row: usize, col: usize, _mark: &Cursor) -> Option<Action> {
        Some(Action::CopyCell { row, col })
    }

    fn handle_key_event(&mut self, key: KeyEvent, mark: &Cursor) -> Option<Action> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('v') | KeyCode::Esc => Some(Action::PopMode),
            KeyCode::Char('c') => Some(Action::CopyCell {
                row: mark.row,
                col: mark.col,
            }),
            KeyCode::Char('C') => Some(Action::CopyColumn(mark.col)),
            _ => None,
        }
    }

    fn help_topics(&self) -> &'static [HelpTopic] {
        &[HelpTopic::App, HelpTopic::Copy]
    }
}
