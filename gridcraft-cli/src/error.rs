//! CLI error types and exit codes.

use gridcraft_core::{ConfigError, LayoutError, TracingError};

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - configuration, parsing, I/O
    pub const GENERAL_ERROR: i32 = 1;
    /// A layout document breaks a tree invariant
    pub const INVALID_LAYOUT: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Layout document could not be read or parsed
    #[error("Layout error: {0}")]
    Layout(String),

    /// Layout document was read but is not a valid tree
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    /// Gesture script could not be read or parsed
    #[error("Script error: {0}")]
    Script(String),

    /// Logging could not be set up
    #[error("Logging error: {0}")]
    Logging(String),

    /// Output could not be produced
    #[error("Output error: {0}")]
    Output(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<LayoutError> for CliError {
    fn from(err: LayoutError) -> Self {
        Self::InvalidLayout(err.to_string())
    }
}

impl From<TracingError> for CliError {
    fn from(err: TracingError) -> Self {
        Self::Logging(err.to_string())
    }
}

impl CliError {
    /// Maps an error raised while loading a layout document.
    pub fn from_layout_load(err: ConfigError) -> Self {
        match err {
            ConfigError::Layout(e) => e.into(),
            other => Self::Layout(other.to_string()),
        }
    }

    /// Returns the appropriate exit code for this error type.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: General error (configuration, parsing, IO)
    /// - 2: Layout document violates a tree invariant
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidLayout(_) => exit_codes::INVALID_LAYOUT,
            Self::Config(_)
            | Self::Layout(_)
            | Self::Script(_)
            | Self::Logging(_)
            | Self::Output(_)
            | Self::Io(_) => exit_codes::GENERAL_ERROR,
        }
    }
}
