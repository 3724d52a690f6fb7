//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// `Gridcraft` command-line interface for inspecting layouts and replaying
/// drag gestures
#[derive(Parser)]
#[command(name = "gridcraft-cli")]
#[command(author, version, about = "Gridcraft layout builder command-line interface")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration directory
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Layout document (JSON snapshot); the starter canvas is used when
    /// omitted
    #[arg(short, long, global = true, value_name = "FILE")]
    pub layout: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Print the layout
    #[command(about = "Print the layout tree with column heights")]
    Show {
        /// Output format
        #[arg(short, long, default_value = "text", value_enum)]
        format: OutputFormat,
    },

    /// Print the palette of creatable entities
    #[command(about = "List the row, column and item templates")]
    Palette {
        /// Output format
        #[arg(short, long, default_value = "text", value_enum)]
        format: OutputFormat,
    },

    /// Validate a layout document
    #[command(about = "Check that a layout document is well-formed")]
    Check,

    /// Replay a gesture script against the layout
    #[command(about = "Replay drag and resize gestures from a script file")]
    Replay {
        /// Script file (`.toml` for TOML, anything else is read as JSON)
        script: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text", value_enum)]
        format: OutputFormat,

        /// Write the resulting layout to this file as JSON
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Generate shell completions
    #[command(about = "Generate shell completion scripts")]
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Indented human-readable outline
    Text,
    /// Pretty-printed JSON
    Json,
}
