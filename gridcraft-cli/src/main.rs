//! `Gridcraft` CLI - Command-line interface for the `Gridcraft` layout
//! builder
//!
//! Prints layouts and the palette, validates layout documents, and replays
//! recorded drag and resize gestures against a layout.

mod cli;
mod commands;
mod error;
mod util;

use clap::Parser;
use cli::Cli;

fn main() {
    let Cli {
        config,
        layout,
        verbose,
        quiet,
        command,
    } = Cli::parse();

    let result = util::load_settings(config.as_deref()).and_then(|settings| {
        util::init_logging(&settings, verbose, quiet)?;
        commands::dispatch(&settings, layout.as_deref(), command)
    });

    if let Err(e) = result {
        if !quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(e.exit_code());
    }
}
