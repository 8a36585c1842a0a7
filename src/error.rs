//! Domain errors
//!
//! Errors raised by the parser, transformation config and preset store.
//! The application layer wraps these in `anyhow` for reporting.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which side of a column filter a pattern belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Include,
    Exclude,
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterKind::Include => write!(f, "include"),
            FilterKind::Exclude => write!(f, "exclude"),
        }
    }
}

#[derive(Debug, Error)]
pub enum WranglerError {
    #[error("could not use preset `{0}` because it was not found")]
    PresetNotFound(String),

    #[error("could not read transformation from {path}: {source}")]
    ReadTransformation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse transformation: {0}")]
    ParseTransformation(#[from] serde_json::Error),

    #[error("invalid {kind} pattern for column `{column}`: {source}")]
    InvalidFilter {
        column: String,
        kind: FilterKind,
        #[source]
        source: regex::Error,
    },

    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not determine the config directory")]
    NoConfigDir,

    #[error("could not create/verify the config directory {path}: {source}")]
    ConfigDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not find an input source, pipe a table into stdin or use --command")]
    NoInput,

    #[error("could not read standard input: {0}")]
    Stdin(#[source] std::io::Error),

    #[error("could not run command `{command}`: {source}")]
    Command {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_filter_message_names_column_and_kind() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = WranglerError::InvalidFilter {
            column: "NAME".to_string(),
            kind: FilterKind::Exclude,
            source,
        };
        let message = err.to_string();
        assert!(message.contains("exclude"));
        assert!(message.contains("`NAME`"));
    }
}
