//! Command handler modules for the CLI.

mod check;
mod completions;
mod palette;
mod replay;
mod show;

use std::path::Path;

use gridcraft_core::BuilderSettings;

use crate::cli::Commands;
use crate::error::CliError;

/// Dispatch a CLI command to the appropriate handler.
pub fn dispatch(
    settings: &BuilderSettings,
    layout: Option<&Path>,
    command: Commands,
) -> Result<(), CliError> {
    match command {
        Commands::Show { format } => show::cmd_show(settings, layout, format),
        Commands::Palette { format } => palette::cmd_palette(settings, format),
        Commands::Check => check::cmd_check(settings, layout),
        Commands::Replay {
            script,
            format,
            output,
        } => replay::cmd_replay(
            settings,
            layout,
            replay::ReplayParams {
                script: &script,
                format,
                output: output.as_deref(),
            },
        ),
        Commands::Completions { shell } => completions::cmd_completions(shell),
    }
}
