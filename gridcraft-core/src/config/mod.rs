//! Configuration management for `Gridcraft`
//!
//! This module provides the `ConfigManager` for loading and saving
//! settings in TOML format, plus loaders for layout documents and gesture
//! scripts.

mod manager;
pub mod settings;

pub use manager::{CONFIG_DIR_ENV, ConfigManager};
pub use settings::{BuilderSettings, LayoutSettings, LoggingSettings};
