//! Palette of creatable entities
//!
//! The palette is supplied by the host; the core only reads it to seed
//! "new entity" drag sources.

use serde::{Deserialize, Serialize};

use super::item::ItemType;

/// Descriptor for an item that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTemplate {
    /// Kind of item to create
    #[serde(rename = "type")]
    pub kind: ItemType,
    /// Base label; the created item gets a counter suffix
    pub label: String,
}

impl ItemTemplate {
    /// Creates a template.
    #[must_use]
    pub fn new(kind: ItemType, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
        }
    }
}

/// Static list of entity templates shown in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Row template names
    #[serde(default)]
    pub rows: Vec<String>,
    /// Column template names
    #[serde(default)]
    pub columns: Vec<String>,
    /// Item templates
    #[serde(default)]
    pub items: Vec<ItemTemplate>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            rows: vec!["newRow".to_string()],
            columns: vec!["newColumn".to_string()],
            items: vec![
                ItemTemplate::new(ItemType::Input, "Input Field"),
                ItemTemplate::new(ItemType::Text, "Text"),
                ItemTemplate::new(ItemType::Image, "Image"),
            ],
        }
    }
}

impl Palette {
    /// Finds the first item template of the given kind.
    #[must_use]
    pub fn item_template(&self, kind: &ItemType) -> Option<&ItemTemplate> {
        self.items.iter().find(|t| &t.kind == kind)
    }
}
