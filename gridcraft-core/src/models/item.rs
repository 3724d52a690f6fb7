//! Leaf components

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of a leaf component.
///
/// The three built-in kinds cover the stock palette; anything else is
/// carried verbatim as [`ItemType::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemType {
    /// Text input field
    Input,
    /// Static text block
    Text,
    /// Image placeholder
    Image,
    /// Host-defined component kind
    Custom(String),
}

impl ItemType {
    /// Returns the wire name of this kind (`"input"`, `"text"`, ...).
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Input => "input",
            Self::Text => "text",
            Self::Image => "image",
            Self::Custom(name) => name,
        }
    }
}

impl From<String> for ItemType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "input" => Self::Input,
            "text" => Self::Text,
            "image" => Self::Image,
            _ => Self::Custom(value),
        }
    }
}

impl From<ItemType> for String {
    fn from(value: ItemType) -> Self {
        match value {
            ItemType::Custom(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl FromStr for ItemType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A leaf component placed in a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Globally unique id
    pub id: String,
    /// Component kind
    #[serde(rename = "type")]
    pub kind: ItemType,
    /// Display label
    #[serde(default)]
    pub label: String,
}

impl Item {
    /// Creates an item.
    #[must_use]
    pub fn new(id: impl Into<String>, kind: ItemType, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            label: label.into(),
        }
    }
}
