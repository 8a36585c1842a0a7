//! Row mode

use super::{base_key_event, HelpTopic, TableMode};
use crate::action::{Action, ModeKind};
use crate::model::{CellSelection, Cursor};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Highlights the selected row; the selected column is secondary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowMode;

impl TableMode for RowMode {
    fn kind(&self) -> ModeKind {
        ModeKind::Row
    }

    fn classify(&self, row: usize, col: usize, mark: &Cursor) -> CellSelection {
        if row == mark.row {
            CellSelection::Primary
        } else if col == mark.col {
            CellSelection::Secondary
        } else {
            CellSelection::None
        }
    }

    fn on_select(&mut self, row: usize, _col: usize, mark: &mut Cursor) {
        mark.row = row;
    }

    fn handle_key_event(&mut self, key: KeyEvent, _mark: &Cursor) -> Option<Action> {
        if let Some(action) = base_key_event(key) {
            return Some(action);
        }

        match key.code {
            KeyCode::Char('v') if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::SwitchMode(ModeKind::Column))
            }
            _ => None,
        }
    }

    fn help_topics(&self) -> &'static [HelpTopic] {
        &[HelpTopic::App, HelpTopic::Selection]
    }
}
