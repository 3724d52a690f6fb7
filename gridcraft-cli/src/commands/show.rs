//! Show layout command.

use std::path::Path;

use gridcraft_core::BuilderSettings;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::util::{load_tree, to_pretty_json};

/// Show layout command handler
pub fn cmd_show(
    settings: &BuilderSettings,
    layout: Option<&Path>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let snapshot = load_tree(layout, settings)?.snapshot();

    match format {
        OutputFormat::Text if snapshot.rows.is_empty() => println!("Empty layout."),
        OutputFormat::Text => print!("{snapshot}"),
        OutputFormat::Json => println!("{}", to_pretty_json(&snapshot)?),
    }

    Ok(())
}
