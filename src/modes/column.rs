//! Column mode - the default mode, operates on whole columns

use super::{base_key_event, HelpTopic, TableMode};
use crate::action::{Action, ModeKind};
use crate::model::{CellSelection, Cursor};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Highlights the selected column; the selected row is secondary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnMode;

impl TableMode for ColumnMode {
    fn kind(&self) -> ModeKind {
        ModeKind::Column
    }

    fn classify(&self, row: usize, col: usize, mark: &Cursor) -> CellSelection {
        if col == mark.col {
            CellSelection::Primary
        } else if row == mark.row {
            CellSelection::Secondary
        } else {
            CellSelection::None
        }
    }

    fn on_select(&mut self, _row: usize, col: usize, mark: &mut Cursor) {
        mark.col = col;
    }

    fn handle_key_event(&mut self, key: KeyEvent, _mark: &Cursor) -> Option<Action> {
        if let Some(action) = base_key_event(key) {
            return Some(action);
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('q') => Some(Action::MoveColumn(-1)),
                KeyCode::Char('e') => Some(Action::MoveColumn(1)),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char('v') => Some(Action::SwitchMode(ModeKind::Row)),
            KeyCode::Char('x') => Some(Action::DeleteColumn),
            KeyCode::Char('s') => Some(Action::ToggleSort),
            KeyCode::Char('f') => Some(Action::OpenFilterDialog),
            _ => None,
        }
    }

    fn help_topics(&self) -> &'static [HelpTopic] {
        &[HelpTopic::App, HelpTopic::Selection, HelpTopic::Column]
    }
}
