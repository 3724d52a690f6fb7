//! Shared utility functions used across command modules.

use std::path::Path;

use gridcraft_core::{
    BuilderSettings, ConfigManager, LayoutTree, TracingConfig, TracingLevel, init_tracing,
    sample_layout_with,
};
use serde::Serialize;

use crate::error::CliError;

/// Creates a `ConfigManager` using the optional custom config directory
/// from CLI args.
pub fn create_config_manager(config_path: Option<&Path>) -> Result<ConfigManager, CliError> {
    match config_path {
        Some(path) => Ok(ConfigManager::with_config_dir(path.to_path_buf())),
        None => ConfigManager::new()
            .map_err(|e| CliError::Config(format!("Failed to initialize config: {e}"))),
    }
}

/// Loads settings from the configuration directory; defaults when the
/// settings file does not exist.
pub fn load_settings(config_path: Option<&Path>) -> Result<BuilderSettings, CliError> {
    create_config_manager(config_path)?
        .load_settings()
        .map_err(|e| CliError::Config(format!("Failed to load settings: {e}")))
}

/// Installs the log subscriber. `-v` flags override the configured level;
/// `--quiet` keeps only errors.
pub fn init_logging(settings: &BuilderSettings, verbose: u8, quiet: bool) -> Result<(), CliError> {
    let config = match (quiet, verbose) {
        (true, _) => TracingConfig::new().with_level(TracingLevel::Error),
        (false, 0) => settings
            .logging
            .tracing_config()
            .map_err(|e| CliError::Config(e.to_string()))?,
        (false, 1) => TracingConfig::new().with_level(TracingLevel::Debug),
        (false, _) => TracingConfig::new().with_level(TracingLevel::Trace),
    };
    init_tracing(&config)?;
    Ok(())
}

/// Loads the layout document at `path`, or the starter canvas when no
/// document was given.
pub fn load_tree(path: Option<&Path>, settings: &BuilderSettings) -> Result<LayoutTree, CliError> {
    match path {
        Some(path) => ConfigManager::load_layout(path, settings).map_err(CliError::from_layout_load),
        None => Ok(sample_layout_with(settings.layout.tree_options())),
    }
}

/// Pretty-prints any serializable value as JSON.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| CliError::Output(format!("Failed to serialize output: {e}")))
}
