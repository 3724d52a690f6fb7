//! Palette listing command.

use std::fmt::Write as _;

use gridcraft_core::{BuilderSettings, Palette};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::util::to_pretty_json;

/// Palette command handler
pub fn cmd_palette(settings: &BuilderSettings, format: OutputFormat) -> Result<(), CliError> {
    match format {
        OutputFormat::Text => print!("{}", format_palette(&settings.palette)),
        OutputFormat::Json => println!("{}", to_pretty_json(&settings.palette)?),
    }
    Ok(())
}

/// Format the palette as a sectioned list
#[must_use]
pub fn format_palette(palette: &Palette) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Rows:");
    for name in &palette.rows {
        let _ = writeln!(output, "  {name}");
    }
    let _ = writeln!(output, "Columns:");
    for name in &palette.columns {
        let _ = writeln!(output, "  {name}");
    }

    let type_width = palette
        .items
        .iter()
        .map(|t| t.kind.as_str().len())
        .max()
        .unwrap_or(4)
        .max(4);
    let _ = writeln!(output, "Items:");
    for template in &palette.items {
        let _ = writeln!(
            output,
            "  {:<type_width$}  {}",
            template.kind.as_str(),
            template.label
        );
    }

    output
}
