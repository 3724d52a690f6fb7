//! Read-only projection of a [`LayoutTree`]
//!
//! A [`LayoutSnapshot`] is what the render boundary consumes: plain owned
//! data, `row -> column -> [item]` and `row -> column -> height`, in render
//! order. It serializes to JSON for inspection and can be printed as an
//! indented outline.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult, KeyScope, LayoutError, LayoutResult};
use crate::models::{ColumnKey, Item, ItemType, RowKey};
use crate::ordered_map::OrderedMap;
use crate::tree::{LayoutTree, RowColumns, RowHeights, TreeOptions};

/// Owned copy of a layout and its heights.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    /// `row -> column -> [item]`
    pub rows: OrderedMap<RowKey, OrderedMap<ColumnKey, Vec<Item>>>,
    /// `row -> column -> height`
    #[serde(default)]
    pub heights: OrderedMap<RowKey, OrderedMap<ColumnKey, f64>>,
}

impl LayoutSnapshot {
    /// Pretty JSON rendering.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if serialization fails.
    pub fn to_json_pretty(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Indented outline, one line per row, column and item.
    #[must_use]
    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LayoutSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, columns) in &self.rows {
            writeln!(f, "{row}")?;
            for (column, items) in columns {
                match self.heights.get(row).and_then(|h| h.get(column)) {
                    Some(height) => writeln!(f, "  {column} ({height}px)")?,
                    None => writeln!(f, "  {column}")?,
                }
                for item in items {
                    if item.label.is_empty() {
                        writeln!(f, "    - {} [{}]", item.id, item.kind)?;
                    } else {
                        writeln!(f, "    - {} [{}] {}", item.id, item.kind, item.label)?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl LayoutTree {
    /// Copies the current state into an owned snapshot.
    #[must_use]
    pub fn snapshot(&self) -> LayoutSnapshot {
        let rows = self
            .rows()
            .iter()
            .map(|(row, columns)| {
                let columns = columns
                    .iter()
                    .map(|(column, items)| (column.clone(), items.to_vec()))
                    .collect::<Vec<_>>();
                (row.clone(), into_map(columns))
            })
            .collect::<Vec<_>>();
        let heights = self
            .heights()
            .iter()
            .map(|(row, heights)| (row.clone(), RowHeights::clone(heights)))
            .collect::<Vec<_>>();
        LayoutSnapshot {
            rows: into_map(rows),
            heights: into_map(heights),
        }
    }

    /// Rebuilds a tree from a snapshot.
    ///
    /// Heights are normalized against the data tree: missing entries get
    /// the floor, entries for unknown columns are dropped and values below
    /// the floor are raised to it.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::DuplicateKey`] if an item id appears twice.
    pub fn from_snapshot(snapshot: &LayoutSnapshot, options: TreeOptions) -> LayoutResult<Self> {
        let floor = options.min_column_height;
        let mut seen = HashSet::new();
        let mut rows = Vec::with_capacity(snapshot.rows.len());
        let mut heights = Vec::with_capacity(snapshot.rows.len());

        for (row, columns) in &snapshot.rows {
            let mut row_columns = Vec::with_capacity(columns.len());
            let mut row_heights = Vec::with_capacity(columns.len());
            let stored = snapshot.heights.get(row);
            for (column, items) in columns {
                for item in items {
                    if !seen.insert(item.id.as_str()) {
                        return Err(LayoutError::DuplicateKey {
                            scope: KeyScope::Items,
                            key: item.id.clone(),
                        });
                    }
                }
                let height = stored
                    .and_then(|h| h.get(column))
                    .copied()
                    .filter(|h| h.is_finite())
                    .map_or(floor, |h| h.max(floor));
                row_columns.push((column.clone(), Arc::new(items.clone())));
                row_heights.push((column.clone(), height));
            }
            let scope = || KeyScope::Columns { row: row.clone() };
            let row_columns: RowColumns = keyed(row_columns, scope())?;
            let row_heights: RowHeights = keyed(row_heights, scope())?;
            rows.push((row.clone(), Arc::new(row_columns)));
            heights.push((row.clone(), Arc::new(row_heights)));
        }

        let rows = keyed(rows, KeyScope::Rows)?;
        let heights = keyed(heights, KeyScope::Rows)?;

        let next_item_seq = seen
            .iter()
            .filter_map(|id| id.rsplit_once('_'))
            .filter_map(|(_, n)| n.parse::<u64>().ok())
            .max()
            .map_or(1, |n| n.saturating_add(1));

        Ok(Self::from_parts(rows, heights, options, next_item_seq))
    }
}

fn keyed<V>(entries: Vec<(String, V)>, scope: KeyScope) -> LayoutResult<OrderedMap<String, V>> {
    OrderedMap::try_from_entries(entries).map_err(|err| LayoutError::DuplicateKey {
        scope,
        key: err.key,
    })
}

/// The starter canvas: two rows of input and image components.
#[must_use]
pub fn sample_layout() -> LayoutTree {
    sample_layout_with(TreeOptions::default())
}

/// The starter canvas built with the given options.
#[must_use]
pub fn sample_layout_with(options: TreeOptions) -> LayoutTree {
    sample_snapshot()
        .and_then(|snapshot| LayoutTree::from_snapshot(&snapshot, options.clone()))
        .unwrap_or_else(|_| LayoutTree::with_options(options))
}

fn sample_snapshot() -> LayoutResult<LayoutSnapshot> {
    let component = |id: &str, kind: ItemType| Item::new(id, kind, "");
    let row1 = vec![
        (
            "column1".to_string(),
            vec![component("comp1", ItemType::Input), component("comp2", ItemType::Image)],
        ),
        (
            "column2".to_string(),
            vec![component("comp3", ItemType::Input), component("comp4", ItemType::Image)],
        ),
    ];
    let row2 = vec![(
        "column1".to_string(),
        vec![component("comp5", ItemType::Input), component("comp6", ItemType::Image)],
    )];
    let columns_of = |row: &str| KeyScope::Columns {
        row: row.to_string(),
    };
    let rows = vec![
        ("row1".to_string(), keyed(row1, columns_of("row1"))?),
        ("row2".to_string(), keyed(row2, columns_of("row2"))?),
    ];
    Ok(LayoutSnapshot {
        rows: keyed(rows, KeyScope::Rows)?,
        heights: OrderedMap::new(),
    })
}
