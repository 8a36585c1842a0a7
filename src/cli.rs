//! Command-line argument parsing
//!
//! Supports:
//! - Fetching the table from a shell command instead of stdin
//! - Starting from a saved transformation file or a named preset
//! - Printing the transformed table instead of opening the TUI

use crate::model::ParseMode;
use clap::Parser;
use std::path::PathBuf;

/// Filter, sort and rearrange tabular command output
#[derive(Parser, Debug, Default)]
#[command(name = "table-wrangler", version, about)]
pub struct CliArgs {
    /// Command used to fetch the table (run with `sh -c`)
    #[arg(long, value_name = "CMD")]
    pub command: Option<String>,

    /// Path to load a transformation from
    #[arg(long, value_name = "PATH")]
    pub load: Option<PathBuf>,

    /// Name of the preset to start with
    #[arg(short, long, value_name = "NAME")]
    pub preset: Option<String>,

    /// How data lines are split into cells
    #[arg(long, value_enum, default_value_t = ParseMode::Positional)]
    pub parse_mode: ParseMode,

    /// Draw borders between table cells
    #[arg(long)]
    pub fat_table: bool,

    /// Print the table instead of opening the TUI
    #[arg(long)]
    pub stdout: bool,

    /// Disable colours in the printed table
    #[arg(long)]
    pub no_fluff: bool,

    /// Keep colours even when stdout is not a terminal
    #[arg(long)]
    pub force_fluff: bool,

    /// Open the TUI even when stdout is not a terminal
    #[arg(long)]
    pub force_tui: bool,
}

/// How the result is presented, derived from the flags and the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputOptions {
    /// Open the interactive TUI
    pub interactive: bool,
    /// Colour the printed table
    pub fluff: bool,
}

impl CliArgs {
    /// Piping stdout implies `--stdout --no-fluff`; `--force-tui` and
    /// `--force-fluff` override that.
    pub fn output_options(&self, stdout_is_terminal: bool) -> OutputOptions {
        let mut stdout = self.stdout;
        let mut no_fluff = self.no_fluff;

        if !stdout_is_terminal {
            stdout = true;
            no_fluff = true;
        }
        if self.force_tui {
            stdout = false;
        }

        OutputOptions {
            interactive: !stdout,
            fluff: self.force_fluff || !no_fluff,
        }
    }
}
