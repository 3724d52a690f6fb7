//! Gesture replay command.

use std::fmt::Write as _;
use std::path::Path;

use gridcraft_core::{
    BuilderSettings, ConfigManager, LayoutEditor, LayoutSnapshot, StepOutcome, StepReport,
};
use serde::Serialize;
use tracing::info;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::util::{load_tree, to_pretty_json};

/// Parameters for the replay command
pub struct ReplayParams<'a> {
    pub script: &'a Path,
    pub format: OutputFormat,
    pub output: Option<&'a Path>,
}

/// JSON shape of a replay run
#[derive(Serialize)]
struct ReplayReport<'a> {
    steps: &'a [StepReport],
    version: u64,
    layout: LayoutSnapshot,
}

/// Replay command handler
pub fn cmd_replay(
    settings: &BuilderSettings,
    layout: Option<&Path>,
    params: ReplayParams<'_>,
) -> Result<(), CliError> {
    let script = ConfigManager::load_script(params.script)
        .map_err(|e| CliError::Script(e.to_string()))?;
    let tree = load_tree(layout, settings)?;

    let mut editor = LayoutEditor::with_palette(tree, settings.palette.clone());
    let steps = editor.replay(&script.steps);
    let snapshot = editor.snapshot();
    info!(
        steps = steps.len(),
        version = editor.version(),
        "Gesture script replayed"
    );

    if let Some(path) = params.output {
        std::fs::write(path, to_pretty_json(&snapshot)?)?;
    }

    match params.format {
        OutputFormat::Text => {
            print!("{}", format_steps(&steps));
            println!("Committed changes: {}", editor.version());
            print!("{snapshot}");
        }
        OutputFormat::Json => {
            let report = ReplayReport {
                steps: &steps,
                version: editor.version(),
                layout: snapshot,
            };
            println!("{}", to_pretty_json(&report)?);
        }
    }

    Ok(())
}

/// One line per replayed step
#[must_use]
pub fn format_steps(steps: &[StepReport]) -> String {
    let mut output = String::new();
    for report in steps {
        let _ = writeln!(
            output,
            "[{}] {}: {}",
            report.index,
            report.step,
            describe(&report.outcome)
        );
    }
    output
}

fn describe(outcome: &StepOutcome) -> String {
    match outcome {
        StepOutcome::Started => "drag started".to_string(),
        StepOutcome::Indicator { changed: true } => "indicator updated".to_string(),
        StepOutcome::Indicator { changed: false } => "indicator unchanged".to_string(),
        StepOutcome::Applied { effect } => effect.to_string(),
        StepOutcome::NoOp { reason } => format!("no change ({reason})"),
        StepOutcome::Cancelled => "drag cancelled".to_string(),
        StepOutcome::Resized { height } => format!("height set to {height}px"),
        StepOutcome::Failed { error } => format!("failed: {error}"),
    }
}
