//! Core data types for the layout tree
//!
//! - [`Item`] and [`ItemType`] - leaf components placed inside columns
//! - [`Palette`], [`ItemTemplate`] - the static list of creatable entities

mod item;
mod palette;

pub use item::{Item, ItemType};
pub use palette::{ItemTemplate, Palette};

/// Key of a row, unique across the tree.
pub type RowKey = String;

/// Key of a column, unique within its row.
pub type ColumnKey = String;

/// Id of an item, unique across the tree.
pub type ItemId = String;
