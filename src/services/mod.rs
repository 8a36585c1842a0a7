//! External service interactions
//!
//! This module contains services for interacting with external systems:
//! - Table ingestion from stdin or a shell command
//! - System clipboard
//! - Plain-text table output for stdout

pub mod clipboard;
pub mod ingest;
pub mod printer;

pub use clipboard::{Clipboard, SystemClipboard};
pub use ingest::InputSource;
pub use printer::render_table;
