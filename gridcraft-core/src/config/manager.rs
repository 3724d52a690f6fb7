//! Settings and document loading

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::gesture::GestureScript;
use crate::snapshot::LayoutSnapshot;
use crate::tracing::span_names;
use crate::tree::LayoutTree;
use crate::trace_operation;

use super::settings::BuilderSettings;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "GRIDCRAFT_CONFIG_DIR";

const SETTINGS_FILE: &str = "settings.toml";

/// Loads and saves settings, layouts and gesture scripts.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Resolves the configuration directory.
    ///
    /// Uses `$GRIDCRAFT_CONFIG_DIR` if set, otherwise
    /// `<user config dir>/gridcraft`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoConfigDir`] if neither is available.
    pub fn new() -> ConfigResult<Self> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_config_dir(PathBuf::from(dir)));
        }
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::with_config_dir(base.join("gridcraft")))
    }

    /// Uses an explicit configuration directory.
    #[must_use]
    pub fn with_config_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// The configuration directory.
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Path of the settings file.
    #[must_use]
    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE)
    }

    /// Loads and validates settings. A missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an I/O, parse or validation error.
    pub fn load_settings(&self) -> ConfigResult<BuilderSettings> {
        let span = trace_operation!(span_names::CONFIG_LOAD, file = SETTINGS_FILE);
        let _guard = span.enter();
        let path = self.settings_path();
        if !path.exists() {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(BuilderSettings::default());
        }
        let settings: BuilderSettings = parse_toml(&path, &read(&path)?)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validates and writes settings, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns a validation, serialization or I/O error.
    pub fn save_settings(&self, settings: &BuilderSettings) -> ConfigResult<()> {
        let span = trace_operation!(span_names::CONFIG_SAVE, file = SETTINGS_FILE);
        let _guard = span.enter();
        settings.validate()?;
        let content =
            toml::to_string_pretty(settings).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::create_dir_all(&self.config_dir).map_err(|source| ConfigError::Io {
            path: self.config_dir.clone(),
            source,
        })?;
        let path = self.settings_path();
        std::fs::write(&path, content).map_err(|source| ConfigError::Io { path, source })
    }

    /// Loads a layout document (a JSON snapshot) into a tree built with
    /// `settings`.
    ///
    /// # Errors
    ///
    /// Returns an I/O or parse error, or [`ConfigError::Layout`] if the
    /// document breaks a tree invariant.
    pub fn load_layout(path: &Path, settings: &BuilderSettings) -> ConfigResult<LayoutTree> {
        let snapshot: LayoutSnapshot = serde_json::from_str(&read(path)?).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(LayoutTree::from_snapshot(&snapshot, settings.layout.tree_options())?)
    }

    /// Loads a gesture script; `.toml` files are read as TOML, anything
    /// else as JSON.
    ///
    /// # Errors
    ///
    /// Returns an I/O or parse error.
    pub fn load_script(path: &Path) -> ConfigResult<GestureScript> {
        let content = read(path)?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        if is_toml {
            parse_toml(path, &content)
        } else {
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
        }
    }
}

fn read(path: &Path) -> ConfigResult<String> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_toml<T: serde::de::DeserializeOwned>(path: &Path, content: &str) -> ConfigResult<T> {
    toml::from_str(content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
