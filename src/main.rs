//! table-wrangler - Filter, sort and rearrange tabular command output
//!
//! Reads a table from piped stdin or a shell command, then either opens the
//! interactive TUI or prints the transformed table.
//! It uses the Component Architecture pattern from ratatui.

mod action;
mod app;
mod cli;
mod component;
mod components;
mod config;
mod error;
mod logging;
mod model;
mod modes;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::cli::CliArgs;
use crate::component::Component;
use crate::config::Config;
use crate::model::{ConfigSource, DomainState, RawTable};
use crate::services::{render_table, InputSource, SystemClipboard};
use crate::tui::Tui;
use anyhow::Result;
use clap::Parser;
use crossterm::event::Event;
use std::io::IsTerminal;
use tracing::info;

fn main() -> Result<()> {
    let args = CliArgs::parse();

    if let Err(err) = run(args) {
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    Ok(())
}

/// Ingest the table, then print it or hand it to the TUI
fn run(args: CliArgs) -> Result<()> {
    let config = Config::ensure()?;
    logging::init(&config.logs_dir());

    let input = InputSource::resolve(std::io::stdin().is_terminal(), args.command.as_deref())?;
    let text = input.read()?;
    let table = RawTable::parse(&text, args.parse_mode);
    info!(
        columns = table.headers().len(),
        entries = table.num_entries(),
        "table ingested"
    );

    let source = match (&args.preset, &args.load) {
        (Some(name), _) => ConfigSource::Preset(name),
        (None, Some(path)) => ConfigSource::File(path),
        (None, None) => ConfigSource::Default,
    };
    let domain = DomainState::initialize(table, config.load_presets(), source)?;

    let output = args.output_options(std::io::stdout().is_terminal());
    if !output.interactive {
        print!("{}", render_table(&domain, output.fluff));
        return Ok(());
    }

    let mut app = App::new(domain, Box::new(SystemClipboard::new()))
        .with_fat_table(args.fat_table)
        .with_fluff(output.fluff);

    // Setup terminal
    let mut tui = Tui::new()?;
    tui.enter()?;

    // Main event loop
    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;
    result?;

    if let Some(output) = app.exit_output.take() {
        print!("{}", output);
    }

    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        // Draw the UI
        let mut draw_result = Ok(());
        tui.draw(|frame| {
            draw_result = app.draw(frame, frame.area());
        })?;
        draw_result?;

        // Wait for the next event
        let Some(event) = tui.next_event()? else {
            continue;
        };

        // Convert event to action
        let action = match event {
            Event::Key(key) => app.handle_key_event(key)?,
            Event::Mouse(mouse) => app.handle_mouse_event(mouse)?,
            Event::Resize(w, h) => Some(Action::Resize(w, h)),
            _ => None,
        };

        // Action might produce a follow-up action
        let mut current_action = action;
        while let Some(a) = current_action {
            current_action = app.update(a)?;
        }
    }

    Ok(())
}
