//! Input ingestion
//!
//! Captures the text of the table from piped standard input or from the
//! stdout of a shell command. Both paths block until all input is read.

use crate::error::WranglerError;
use std::io::Read;
use std::process::{Command, Stdio};
use tracing::{info, warn};

/// Where the table text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    Command(String),
}

impl InputSource {
    /// Piped stdin wins over `--command`; neither is an error
    pub fn resolve(stdin_is_terminal: bool, command: Option<&str>) -> Result<Self, WranglerError> {
        if !stdin_is_terminal {
            return Ok(InputSource::Stdin);
        }
        match command.filter(|c| !c.trim().is_empty()) {
            Some(command) => Ok(InputSource::Command(command.to_string())),
            None => Err(WranglerError::NoInput),
        }
    }

    /// Read the whole input as text
    pub fn read(&self) -> Result<String, WranglerError> {
        match self {
            InputSource::Stdin => {
                let mut bytes = Vec::new();
                std::io::stdin()
                    .read_to_end(&mut bytes)
                    .map_err(WranglerError::Stdin)?;
                info!(bytes = bytes.len(), "read table from stdin");
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
            InputSource::Command(command) => run_command(command),
        }
    }
}

/// Run `command` through `sh -c` and capture its stdout.
///
/// A command that cannot be started is an error. A command that exits with a
/// failure status only logs a warning; whatever it printed is still used.
pub fn run_command(command: &str) -> Result<String, WranglerError> {
    let output = Command::new("sh")
        .arg("-c")
        .arg(command)
        .stdin(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .map_err(|source| WranglerError::Command {
            command: command.to_string(),
            source,
        })?;

    if !output.status.success() {
        warn!(
            "command `{}` exited with {}: {}",
            command,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    info!(command, bytes = output.stdout.len(), "read table from command");
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
