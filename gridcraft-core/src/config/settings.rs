//! Builder settings
//!
//! All sections default independently, so a settings file only needs the
//! values it changes.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::models::Palette;
use crate::tracing::{TracingConfig, TracingLevel};
use crate::tree::{TreeOptions, DEFAULT_COLUMN_PREFIX, DEFAULT_MIN_COLUMN_HEIGHT, DEFAULT_ROW_PREFIX};

/// Top-level settings file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuilderSettings {
    /// Layout rules
    #[serde(default)]
    pub layout: LayoutSettings,
    /// Palette of creatable entities
    #[serde(default)]
    pub palette: Palette,
    /// Logging
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Layout rules applied by the Tree Store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Height floor for columns, in pixels
    pub min_column_height: f64,
    /// Prefix for generated row keys
    pub row_prefix: String,
    /// Prefix for generated column keys
    pub column_prefix: String,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            min_column_height: DEFAULT_MIN_COLUMN_HEIGHT,
            row_prefix: DEFAULT_ROW_PREFIX.to_string(),
            column_prefix: DEFAULT_COLUMN_PREFIX.to_string(),
        }
    }
}

impl LayoutSettings {
    /// Tree options equivalent to these settings.
    #[must_use]
    pub fn tree_options(&self) -> TreeOptions {
        TreeOptions {
            min_column_height: self.min_column_height,
            row_prefix: self.row_prefix.clone(),
            column_prefix: self.column_prefix.clone(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Level name (`error`, `warn`, `info`, `debug`, `trace`)
    pub level: String,
    /// Raw filter directive; overrides `level` when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: TracingLevel::default().to_string(),
            filter: None,
        }
    }
}

impl LoggingSettings {
    /// Tracing configuration for these settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for an unknown level name.
    pub fn tracing_config(&self) -> ConfigResult<TracingConfig> {
        let level = self
            .level
            .parse::<TracingLevel>()
            .map_err(|reason| ConfigError::Validation {
                field: "logging.level".to_string(),
                reason,
            })?;
        let config = TracingConfig::new().with_level(level);
        Ok(match &self.filter {
            Some(filter) => config.with_filter(filter.clone()),
            None => config,
        })
    }
}

impl BuilderSettings {
    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] naming the first bad field.
    pub fn validate(&self) -> ConfigResult<()> {
        let height = self.layout.min_column_height;
        if !height.is_finite() || height <= 0.0 {
            return Err(invalid(
                "layout.min_column_height",
                format!("must be a positive number, got {height}"),
            ));
        }
        if self.layout.row_prefix.trim().is_empty() {
            return Err(invalid("layout.row_prefix", "must not be empty"));
        }
        if self.layout.column_prefix.trim().is_empty() {
            return Err(invalid("layout.column_prefix", "must not be empty"));
        }
        if let Some(index) = self
            .palette
            .items
            .iter()
            .position(|t| t.kind.as_str().trim().is_empty())
        {
            return Err(invalid(
                &format!("palette.items[{index}].type"),
                "must not be empty",
            ));
        }
        self.logging.tracing_config()?;
        Ok(())
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Validation {
        field: field.to_string(),
        reason: reason.into(),
    }
}
