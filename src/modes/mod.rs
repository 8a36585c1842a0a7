//! Selection modes
//!
//! A mode owns the grid's key bindings and decides how every cell relates to
//! the current selection. Modes live on a `ModeStack`; the top mode is
//! active. Column and row modes are base modes, copy and box modes are
//! short-lived overlays pushed on top of them.

pub mod boxed;
pub mod column;
pub mod copy;
pub mod row;
pub mod stack;

pub use boxed::BoxMode;
pub use column::ColumnMode;
pub use copy::CopyMode;
pub use row::RowMode;
pub use stack::ModeStack;

use crate::action::{Action, ModeKind};
use crate::model::{CellSelection, Cursor};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Groups of key instructions shown in the control panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    App,
    Selection,
    Column,
    Copy,
    Box,
    Dialog,
}

impl HelpTopic {
    pub fn header(&self) -> &'static str {
        match self {
            HelpTopic::App => "App Instructions",
            HelpTopic::Selection => "General Instructions",
            HelpTopic::Column => "Column Mode Instructions",
            HelpTopic::Copy => "Copy Mode Instructions",
            HelpTopic::Box => "Box Select Mode Instructions",
            HelpTopic::Dialog => "Floating Window Instructions",
        }
    }

    /// (keys, description) pairs
    pub fn instructions(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            HelpTopic::App => &[("C-c", "quit."), ("C-h", "toggle this panel.")],
            HelpTopic::Selection => &[
                ("v", "switch selection mode."),
                ("c", "copy mode."),
                ("b", "box mode."),
                ("C-s", "open save menu."),
                ("C-p", "open preset menu."),
                ("C-y", "open column menu."),
                ("q", "quit."),
                ("p", "quit and print."),
            ],
            HelpTopic::Column => &[
                ("x", "delete column."),
                ("s", "sort by column."),
                ("f", "filter column."),
                ("C-q", "move column left."),
                ("C-e", "move column right."),
            ],
            HelpTopic::Copy => &[
                ("click, enter", "copy cell."),
                ("c", "copy selected cell."),
                ("C", "copy selected column."),
                ("esc, q", "exit."),
            ],
            HelpTopic::Box => &[("esc, q", "exit."), ("c, enter", "copy.")],
            HelpTopic::Dialog => &[
                ("tab", "next."),
                ("shift-tab", "prev."),
                ("return", "select."),
                ("esc", "exit."),
            ],
        }
    }
}

/// Shared capability set of every mode
///
/// `mark` is the selected position as written by `on_select`; the modes
/// differ in which of its coordinates they update.
pub trait TableMode {
    fn kind(&self) -> ModeKind;

    /// Called when the mode becomes the top of the stack
    fn on_enter(&mut self, mark: &Cursor) {
        let _ = mark;
    }

    /// Called when the mode stops being the top of the stack
    fn on_exit(&mut self) {}

    /// How the cell at (row, col) relates to the selection
    fn classify(&self, row: usize, col: usize, mark: &Cursor) -> CellSelection;

    /// The cursor moved to (row, col)
    fn on_select(&mut self, row: usize, col: usize, mark: &mut Cursor);

    /// The cell at (row, col) was clicked or activated.
    ///
    /// Returns the one-shot action to run, `None` when the mode ignores it.
    fn on_activate(&mut self, row: usize, col: usize, mark: &Cursor) -> Option<Action> {
        let _ = (row, col, mark);
        None
    }

    /// Translate a key into an action, `None` when not consumed
    fn handle_key_event(&mut self, key: KeyEvent, mark: &Cursor) -> Option<Action>;

    fn help_topics(&self) -> &'static [HelpTopic];
}

/// Bindings shared by the base modes
fn base_key_event(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('s') => Some(Action::OpenSaveDialog),
            KeyCode::Char('y') => Some(Action::OpenColumnDialog),
            KeyCode::Char('p') => Some(Action::OpenPresetDialog),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('c') => Some(Action::PushMode(ModeKind::Copy)),
        KeyCode::Char('b') => Some(Action::PushMode(ModeKind::Box)),
        KeyCode::Char('p') => Some(Action::PrintAndQuit),
        _ => None,
    }
}

/// One of the selection modes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Column(ColumnMode),
    Row(RowMode),
    Copy(CopyMode),
    Box(BoxMode),
}

impl Mode {
    pub fn new(kind: ModeKind) -> Self {
        match kind {
            ModeKind::Column => Mode::Column(ColumnMode),
            ModeKind::Row => Mode::Row(RowMode),
            ModeKind::Copy => Mode::Copy(CopyMode),
            ModeKind::Box => Mode::Box(BoxMode::default()),
        }
    }

    /// Overlay modes are pushed and popped, base modes are switched
    pub fn is_overlay(&self) -> bool {
        matches!(self, Mode::Copy(_) | Mode::Box(_))
    }

    fn inner(&self) -> &dyn TableMode {
        match self {
            Mode::Column(m) => m,
            Mode::Row(m) => m,
            Mode::Copy(m) => m,
            Mode::Box(m) => m,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn TableMode {
        match self {
            Mode::Column(m) => m,
            Mode::Row(m) => m,
            Mode::Copy(m) => m,
            Mode::Box(m) => m,
        }
    }
}

impl TableMode for Mode {
    fn kind(&self) -> ModeKind {
        self.inner().kind()
    }

    fn on_enter(&mut self, mark: &Cursor) {
        self.inner_mut().on_enter(mark)
    }

    fn on_exit(&mut self) {
        self.inner_mut().on_exit()
    }

    fn classify(&self, row: usize, col: usize, mark: &Cursor) -> CellSelection {
        self.inner().classify(row, col, mark)
    }

    fn on_select(&mut self, row: usize, col: usize, mark: &mut Cursor) {
        self.inner_mut().on_select(row, col, mark)
    }

    fn on_activate(&mut self, row: usize, col: usize, mark: &Cursor) -> Option<Action> {
        self.inner_mut().on_activate(row, col, mark)
    }

    fn handle_key_event(&mut self, key: KeyEvent, mark: &Cursor) -> Option<Action> {
        self.inner_mut().handle_key_event(key, mark)
    }

    fn help_topics(&self) -> &'static [HelpTopic] {
        self.inner().help_topics()
    }
}
