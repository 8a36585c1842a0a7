//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Modes and dialogs emit Actions in response to events, and the App
//! processes them to update state.

use crate::model::CellRect;
use std::fmt;

/// Cursor movement requested by a navigation key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Up,
    Down,
    Left,
    Right,
    /// First data row
    Top,
    /// Last row
    Bottom,
}

/// Interaction modes that can be placed on the mode stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    Column,
    Row,
    Copy,
    Box,
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeKind::Column => write!(f, "column"),
            ModeKind::Row => write!(f, "row"),
            ModeKind::Copy => write!(f, "copy"),
            ModeKind::Box => write!(f, "box"),
        }
    }
}

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Terminal was resized
    Resize(u16, u16),
    /// Save the `last` preset and leave
    Quit,
    /// Quit, then print the current view to stdout
    PrintAndQuit,
    /// Quit, then print the active transformation as JSON to stdout
    PrintTransformation,
    /// Show or hide the control panel
    TogglePanel,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Move the cursor
    Move(Motion),
    /// Mouse click on a grid cell
    Click { row: usize, col: usize },
    /// Activate the cell under the cursor
    Activate,

    // ─────────────────────────────────────────────────────────────────────────
    // Modes
    // ─────────────────────────────────────────────────────────────────────────
    /// Suspend the active mode under an overlay mode
    PushMode(ModeKind),
    /// Leave an overlay mode
    PopMode,
    /// Replace the active mode
    SwitchMode(ModeKind),

    // ─────────────────────────────────────────────────────────────────────────
    // Columns
    // ─────────────────────────────────────────────────────────────────────────
    /// Remove the selected column from the display
    DeleteColumn,
    /// Sort by the selected column, or flip the direction
    ToggleSort,
    /// Move the selected column left (negative) or right
    MoveColumn(isize),
    /// Show a hidden column or hide a shown one
    ToggleColumn(String),

    // ─────────────────────────────────────────────────────────────────────────
    // Clipboard
    // ─────────────────────────────────────────────────────────────────────────
    /// Copy one cell
    CopyCell { row: usize, col: usize },
    /// Copy all data cells of a column
    CopyColumn(usize),
    /// Copy a rectangle of cells
    CopyRegion(CellRect),

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the filter editor for the selected column
    OpenFilterDialog,
    /// Open the save dialog
    OpenSaveDialog,
    /// Open the preset dialog
    OpenPresetDialog,
    /// Open the column dialog
    OpenColumnDialog,
    /// Close the current dialog
    CloseModal,
    /// Replace the filters of a column
    ApplyFilter {
        column: String,
        include: String,
        exclude: String,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Presets & Files
    // ─────────────────────────────────────────────────────────────────────────
    /// Store the active config as a named preset
    SavePreset(String),
    /// Write the active config to a file
    SaveFile(String),
    /// Make a copy of a preset the active config
    UsePreset(String),
    /// Delete a preset
    DeletePreset(String),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::Quit => write!(f, "Quit"),
            Action::PrintAndQuit => write!(f, "PrintAndQuit"),
            Action::PrintTransformation => write!(f, "PrintTransformation"),
            Action::TogglePanel => write!(f, "TogglePanel"),
            Action::Move(motion) => write!(f, "Move({:?})", motion),
            Action::Click { row, col } => write!(f, "Click({}, {})", row, col),
            Action::Activate => write!(f, "Activate"),
            Action::PushMode(kind) => write!(f, "PushMode({})", kind),
            Action::PopMode => write!(f, "PopMode"),
            Action::SwitchMode(kind) => write!(f, "SwitchMode({})", kind),
            Action::DeleteColumn => write!(f, "DeleteColumn"),
            Action::ToggleSort => write!(f, "ToggleSort"),
            Action::MoveColumn(delta) => write!(f, "MoveColumn({})", delta),
            Action::ToggleColumn(name) => write!(f, "ToggleColumn({})", name),
            Action::CopyCell { row, col } => write!(f, "CopyCell({}, {})", row, col),
            Action::CopyColumn(col) => write!(f, "CopyColumn({})", col),
            Action::CopyRegion(rect) => write!(
                f,
                "CopyRegion({}..={}, {}..={})",
                rect.top, rect.bottom, rect.left, rect.right
            ),
            Action::OpenFilterDialog => write!(f, "OpenFilterDialog"),
            Action::OpenSaveDialog => write!(f, "OpenSaveDialog"),
            Action::OpenPresetDialog => write!(f, "OpenPresetDialog"),
            Action::OpenColumnDialog => write!(f, "OpenColumnDialog"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ApplyFilter { column, .. } => write!(f, "ApplyFilter({})", column),
            Action::SavePreset(name) => write!(f, "SavePreset({})", name),
            Action::SaveFile(path) => write!(f, "SaveFile({})", path),
            Action::UsePreset(name) => write!(f, "UsePreset({})", name),
            Action::DeletePreset(name) => write!(f, "DeletePreset({})", name),
        }
    }
}
