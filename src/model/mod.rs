//! Model layer - centralized state management
//!
//! This module contains all state-related types:
//! - `RawTable` - Ingested column-oriented table
//! - `TransformationConfig` - Columns, sort and filters, plus the engine
//! - `PresetStore` - Named configs persisted to disk
//! - `DomainState` - Everything above bundled with the current view
//! - `Cursor` / `Viewport` - Selection and scroll state
//! - `ModalStack` - Dialog overlay management

pub mod domain;
pub mod modal;
pub mod preset;
pub mod selection;
pub mod table;
pub mod transform;

// Re-export commonly used types
pub use domain::{ConfigSource, DomainState, EMPTY_VALUE};
pub use modal::{Modal, ModalStack};
pub use preset::{PresetStore, LAST_PRESET_NAME};
pub use selection::{CellRect, CellSelection, Cursor, GridCell, Viewport, HEADER_ROWS};
pub use table::{ParseMode, RawTable};
pub use transform::{TransformationConfig, FAKE_VALUE};
