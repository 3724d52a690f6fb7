//! Error types for `Gridcraft`
//!
//! Tree Store operations report [`LayoutError`]; settings and document
//! loading report [`ConfigError`]. The drop resolver never surfaces either
//! to the caller: a failed drop degrades to a no-op.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// The scope in which a key must be unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyScope {
    /// Row keys across the whole tree.
    Rows,
    /// Column keys within one row.
    Columns {
        /// Owning row.
        row: String,
    },
    /// Item ids across the whole tree.
    Items,
}

impl fmt::Display for KeyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rows => write!(f, "rows"),
            Self::Columns { row } => write!(f, "columns of {row}"),
            Self::Items => write!(f, "items"),
        }
    }
}

/// Errors raised by Tree Store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// A key already exists in its scope.
    #[error("duplicate key '{key}' in {scope}")]
    DuplicateKey {
        /// Where the collision happened.
        scope: KeyScope,
        /// The colliding key.
        key: String,
    },

    /// The row does not exist.
    #[error("row not found: {0}")]
    RowNotFound(String),

    /// The column does not exist in the given row.
    #[error("column not found: {row}/{column}")]
    ColumnNotFound {
        /// Row that was searched.
        row: String,
        /// Missing column key.
        column: String,
    },

    /// The item does not exist in the given column.
    #[error("item not found: {0}")]
    ItemNotFound(String),

    /// The heights mirror disagrees with the data tree.
    #[error("heights out of sync with layout: {0}")]
    Desync(String),

    /// No unused numeric suffix is left for new items of this type.
    #[error("item id counter exhausted for {0}")]
    ItemIdsExhausted(String),
}

impl LayoutError {
    pub(crate) fn column_not_found(row: &str, column: &str) -> Self {
        Self::ColumnNotFound {
            row: row.to_string(),
            column: column.to_string(),
        }
    }
}

/// Result type for Tree Store operations
pub type LayoutResult<T> = std::result::Result<T, LayoutError>;

/// Errors raised while loading or saving settings, layouts and scripts.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing a file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A file could not be parsed.
    #[error("failed to parse {path}: {reason}")]
    Parse {
        /// File involved.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },

    /// A value could not be serialized.
    #[error("failed to serialize: {0}")]
    Serialize(String),

    /// A setting holds an unusable value.
    #[error("invalid {field}: {reason}")]
    Validation {
        /// Setting name.
        field: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A loaded layout violates a tree invariant.
    #[error("invalid layout: {0}")]
    Layout(#[from] LayoutError),

    /// No usable configuration directory could be determined.
    #[error("configuration directory not available")]
    NoConfigDir,
}

/// Result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
