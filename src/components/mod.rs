//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod column_dialog;
pub mod control_panel;
pub mod filter_dialog;
pub mod grid;
pub mod input;
pub mod layout;
pub mod preset_dialog;
pub mod save_dialog;

pub use column_dialog::ColumnDialog;
pub use control_panel::ControlPanel;
pub use filter_dialog::FilterDialog;
pub use grid::{GridComponent, GridRenderContext};
pub use layout::calculate_main_layout;
pub use preset_dialog::PresetDialog;
pub use save_dialog::SaveDialog;
