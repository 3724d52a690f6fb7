//! Tree Store: rows, columns, items and the column-height mirror
//!
//! [`LayoutTree`] is a persistent value. Every write returns a new tree and
//! leaves the receiver untouched; untouched rows and columns are shared
//! between versions through [`Arc`]. The data tree and the heights tree are
//! always rebuilt together for the affected row, so the two key sets cannot
//! drift apart.

mod keys;

pub use keys::{next_unique_key, DEFAULT_COLUMN_PREFIX, DEFAULT_ROW_PREFIX};

use std::sync::Arc;

use crate::error::{KeyScope, LayoutError, LayoutResult};
use crate::models::{ColumnKey, Item, ItemTemplate, RowKey};
use crate::ordered_map::OrderedMap;

/// Default lower bound for column heights, in pixels.
pub const DEFAULT_MIN_COLUMN_HEIGHT: f64 = 150.0;

/// Columns of one row, each holding its ordered items.
pub type RowColumns = OrderedMap<ColumnKey, Arc<Vec<Item>>>;

/// Column heights of one row.
pub type RowHeights = OrderedMap<ColumnKey, f64>;

/// Construction parameters shared by every version of a tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeOptions {
    /// Height floor applied to new and resized columns
    pub min_column_height: f64,
    /// Prefix for generated row keys
    pub row_prefix: String,
    /// Prefix for generated column keys
    pub column_prefix: String,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            min_column_height: DEFAULT_MIN_COLUMN_HEIGHT,
            row_prefix: DEFAULT_ROW_PREFIX.to_string(),
            column_prefix: DEFAULT_COLUMN_PREFIX.to_string(),
        }
    }
}

/// Where an item currently lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemLocation {
    /// Owning row
    pub row: RowKey,
    /// Owning column
    pub column: ColumnKey,
    /// Position within the column
    pub index: usize,
}

/// A column taken out of a row, with everything that travels with it.
#[derive(Debug, Clone, PartialEq)]
pub struct RemovedColumn {
    /// Position the column occupied in its row
    pub index: usize,
    /// The column's items
    pub items: Arc<Vec<Item>>,
    /// The column's height
    pub height: f64,
}

/// The authoritative layout: `row -> column -> [item]` plus
/// `row -> column -> height`.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutTree {
    rows: Arc<OrderedMap<RowKey, Arc<RowColumns>>>,
    heights: Arc<OrderedMap<RowKey, Arc<RowHeights>>>,
    options: Arc<TreeOptions>,
    next_item_seq: u64,
}

impl Default for LayoutTree {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutTree {
    /// Creates an empty tree with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(TreeOptions::default())
    }

    /// Creates an empty tree.
    #[must_use]
    pub fn with_options(options: TreeOptions) -> Self {
        Self {
            rows: Arc::new(OrderedMap::new()),
            heights: Arc::new(OrderedMap::new()),
            options: Arc::new(options),
            next_item_seq: 1,
        }
    }

    pub(crate) fn from_parts(
        rows: OrderedMap<RowKey, Arc<RowColumns>>,
        heights: OrderedMap<RowKey, Arc<RowHeights>>,
        options: TreeOptions,
        next_item_seq: u64,
    ) -> Self {
        Self {
            rows: Arc::new(rows),
            heights: Arc::new(heights),
            options: Arc::new(options),
            next_item_seq,
        }
    }

    /// Rows in render order.
    #[must_use]
    pub fn rows(&self) -> &OrderedMap<RowKey, Arc<RowColumns>> {
        &self.rows
    }

    /// The heights mirror.
    #[must_use]
    pub fn heights(&self) -> &OrderedMap<RowKey, Arc<RowHeights>> {
        &self.heights
    }

    /// Options this tree was built with.
    #[must_use]
    pub fn options(&self) -> &TreeOptions {
        &self.options
    }

    /// Height floor for columns.
    #[must_use]
    pub fn min_column_height(&self) -> f64 {
        self.options.min_column_height
    }

    /// Columns of `row`.
    #[must_use]
    pub fn row(&self, row: &str) -> Option<&RowColumns> {
        self.rows.get(row).map(Arc::as_ref)
    }

    /// Items of `row/column`.
    #[must_use]
    pub fn column_items(&self, row: &str, column: &str) -> Option<&[Item]> {
        self.row(row)?.get(column).map(|items| items.as_slice())
    }

    /// Height of `row/column`.
    #[must_use]
    pub fn column_height(&self, row: &str, column: &str) -> Option<f64> {
        self.heights.get(row)?.get(column).copied()
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of items across all columns.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.rows
            .values()
            .flat_map(|columns| columns.values())
            .map(|items| items.len())
            .sum()
    }

    /// Finds an item anywhere in the tree.
    #[must_use]
    pub fn find_item(&self, id: &str) -> Option<ItemLocation> {
        self.rows.iter().find_map(|(row, columns)| {
            columns.iter().find_map(|(column, items)| {
                items.iter().position(|item| item.id == id).map(|index| ItemLocation {
                    row: row.clone(),
                    column: column.clone(),
                    index,
                })
            })
        })
    }

    /// Returns true if an item with `id` exists anywhere in the tree.
    #[must_use]
    pub fn contains_item(&self, id: &str) -> bool {
        self.find_item(id).is_some()
    }

    /// Next row key not yet in use.
    #[must_use]
    pub fn next_row_key(&self) -> RowKey {
        next_unique_key(self.rows.keys().map(String::as_str), &self.options.row_prefix)
    }

    /// Next column key not yet in use within `row`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::RowNotFound`] if the row does not exist.
    pub fn next_column_key(&self, row: &str) -> LayoutResult<ColumnKey> {
        let columns = self.row_columns(row)?;
        Ok(next_unique_key(
            columns.keys().map(String::as_str),
            &self.options.column_prefix,
        ))
    }

    // Rows

    /// Inserts an empty row at `index` (clamped).
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::DuplicateKey`] if the key is taken.
    pub fn insert_row(&self, key: impl Into<RowKey>, index: usize) -> LayoutResult<Self> {
        let key = key.into();
        let mut rows = (*self.rows).clone();
        let position = rows
            .insert_at(key.clone(), Arc::new(RowColumns::new()), index)
            .map_err(|e| duplicate(KeyScope::Rows, e.key))?;
        let mut heights = (*self.heights).clone();
        heights
            .insert_at(key, Arc::new(RowHeights::new()), position)
            .map_err(|e| duplicate(KeyScope::Rows, e.key))?;
        Ok(self.replace(rows, heights))
    }

    /// Inserts a row holding one empty column at the height floor.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::DuplicateKey`] if either key is taken.
    pub fn insert_row_with_column(
        &self,
        key: impl Into<RowKey>,
        column: impl Into<ColumnKey>,
        index: usize,
    ) -> LayoutResult<Self> {
        let key = key.into();
        let tree = self.insert_row(key.clone(), index)?;
        tree.insert_column(&key, column, 0)
    }

    /// Removes a row with all of its columns, items and heights.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::RowNotFound`] if the row does not exist.
    pub fn remove_row(&self, key: &str) -> LayoutResult<Self> {
        let mut rows = (*self.rows).clone();
        rows.remove_by_key(key)
            .ok_or_else(|| LayoutError::RowNotFound(key.to_string()))?;
        let mut heights = (*self.heights).clone();
        heights.remove_by_key(key);
        Ok(self.replace(rows, heights))
    }

    /// Moves a row so that it ends up at `index` of the post-removal
    /// sequence.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::RowNotFound`] if the row does not exist.
    pub fn move_row(&self, key: &str, index: usize) -> LayoutResult<Self> {
        let mut rows = (*self.rows).clone();
        let position = rows
            .move_key(key, index)
            .ok_or_else(|| LayoutError::RowNotFound(key.to_string()))?;
        let mut heights = (*self.heights).clone();
        heights.move_key(key, position);
        Ok(self.replace(rows, heights))
    }

    // Columns

    /// Inserts an empty column at the height floor.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::RowNotFound`] or [`LayoutError::DuplicateKey`].
    pub fn insert_column(
        &self,
        row: &str,
        key: impl Into<ColumnKey>,
        index: usize,
    ) -> LayoutResult<Self> {
        let floor = self.min_column_height();
        self.insert_column_with(row, key, Arc::new(Vec::new()), floor, index)
    }

    /// Inserts a column with existing items and height.
    ///
    /// Items must not already exist elsewhere in the tree. The height is
    /// clamped to the floor.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::RowNotFound`] or [`LayoutError::DuplicateKey`]
    /// for a taken column key or item id.
    pub fn insert_column_with(
        &self,
        row: &str,
        key: impl Into<ColumnKey>,
        items: Arc<Vec<Item>>,
        height: f64,
        index: usize,
    ) -> LayoutResult<Self> {
        let key = key.into();
        if let Some(item) = items.iter().find(|item| self.contains_item(&item.id)) {
            return Err(duplicate(KeyScope::Items, item.id.clone()));
        }
        let height = self.clamp_height(height);
        let (tree, ()) = self.update_row(row, |columns, heights| {
            let position = columns
                .insert_at(key.clone(), items, index)
                .map_err(|e| duplicate(columns_scope(row), e.key))?;
            heights
                .insert_at(key, height, position)
                .map_err(|e| duplicate(columns_scope(row), e.key))?;
            Ok(())
        })?;
        Ok(tree)
    }

    /// Removes a column and its height. The row stays, possibly empty.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::RowNotFound`] or [`LayoutError::ColumnNotFound`].
    pub fn remove_column(&self, row: &str, key: &str) -> LayoutResult<(Self, RemovedColumn)> {
        let floor = self.min_column_height();
        self.update_row(row, |columns, heights| {
            let removed = columns
                .remove_by_key(key)
                .ok_or_else(|| LayoutError::column_not_found(row, key))?;
            let height = heights.remove_by_key(key).map_or(floor, |h| h.value);
            Ok(RemovedColumn {
                index: removed.index,
                items: removed.value,
                height,
            })
        })
    }

    /// Moves a column within its row to `index` of the post-removal
    /// sequence.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::RowNotFound`] or [`LayoutError::ColumnNotFound`].
    pub fn move_column(&self, row: &str, key: &str, index: usize) -> LayoutResult<Self> {
        let (tree, ()) = self.update_row(row, |columns, heights| {
            let position = columns
                .move_key(key, index)
                .ok_or_else(|| LayoutError::column_not_found(row, key))?;
            heights.move_key(key, position);
            Ok(())
        })?;
        Ok(tree)
    }

    /// Moves a column into another row at `index`.
    ///
    /// When the target row already holds a column with the same key, the
    /// moved column is re-keyed with the next free column key of that row.
    /// Returns the new tree and the key the column ended up with.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::RowNotFound`] or [`LayoutError::ColumnNotFound`].
    pub fn move_column_across_row(
        &self,
        source_row: &str,
        key: &str,
        target_row: &str,
        index: usize,
    ) -> LayoutResult<(Self, ColumnKey)> {
        if source_row == target_row {
            return Ok((self.move_column(source_row, key, index)?, key.to_string()));
        }
        let target_key = if self.row_columns(target_row)?.contains_key(key) {
            self.next_column_key(target_row)?
        } else {
            key.to_string()
        };
        let (tree, removed) = self.remove_column(source_row, key)?;
        let tree = tree.insert_column_with(
            target_row,
            target_key.clone(),
            removed.items,
            removed.height,
            index,
        )?;
        Ok((tree, target_key))
    }

    // Items

    /// Inserts an item into `row/column` at `index` (clamped).
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::DuplicateKey`] if the id exists anywhere in the
    /// tree, or a not-found error for the container.
    pub fn insert_item(
        &self,
        row: &str,
        column: &str,
        item: Item,
        index: usize,
    ) -> LayoutResult<Self> {
        if self.contains_item(&item.id) {
            return Err(duplicate(KeyScope::Items, item.id));
        }
        let (tree, ()) = self.update_row(row, |columns, _| {
            let items = columns
                .get_mut(column)
                .ok_or_else(|| LayoutError::column_not_found(row, column))?;
            let mut updated = (**items).clone();
            let index = index.min(updated.len());
            updated.insert(index, item);
            *items = Arc::new(updated);
            Ok(())
        })?;
        Ok(tree)
    }

    /// Removes an item and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::ItemNotFound`] or a not-found error for the
    /// container.
    pub fn remove_item(&self, row: &str, column: &str, id: &str) -> LayoutResult<(Self, Item)> {
        self.update_row(row, |columns, _| {
            let items = columns
                .get_mut(column)
                .ok_or_else(|| LayoutError::column_not_found(row, column))?;
            let position = items
                .iter()
                .position(|item| item.id == id)
                .ok_or_else(|| LayoutError::ItemNotFound(id.to_string()))?;
            let mut updated = (**items).clone();
            let removed = updated.remove(position);
            *items = Arc::new(updated);
            Ok(removed)
        })
    }

    /// Moves an item to `target_row/target_column` at `index` of the
    /// post-removal sequence.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the source item or target column is
    /// missing; the receiver is unchanged in that case.
    pub fn move_item(
        &self,
        source_row: &str,
        source_column: &str,
        id: &str,
        target_row: &str,
        target_column: &str,
        index: usize,
    ) -> LayoutResult<Self> {
        if !self.row_columns(target_row)?.contains_key(target_column) {
            return Err(LayoutError::column_not_found(target_row, target_column));
        }
        let (tree, item) = self.remove_item(source_row, source_column, id)?;
        tree.insert_item(target_row, target_column, item, index)
    }

    /// Creates a new item from a template with a fresh, never reused id.
    ///
    /// The id is `{type}_{n}` with `n` taken from a counter that only moves
    /// forward; the label is `"{template label} {n}"`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::ItemIdsExhausted`] once the counter reaches
    /// `u64::MAX`.
    pub fn allocate_item(&self, template: &ItemTemplate) -> LayoutResult<(Self, Item)> {
        let exhausted = || LayoutError::ItemIdsExhausted(template.kind.to_string());
        let mut seq = self.next_item_seq;
        let mut id = format!("{}_{seq}", template.kind);
        while self.contains_item(&id) {
            seq = seq.checked_add(1).ok_or_else(exhausted)?;
            id = format!("{}_{seq}", template.kind);
        }
        let next_item_seq = seq.checked_add(1).ok_or_else(exhausted)?;
        let item = Item::new(id, template.kind.clone(), format!("{} {seq}", template.label));
        let tree = Self {
            next_item_seq,
            ..self.clone()
        };
        Ok((tree, item))
    }

    // Heights

    /// Writes one column height, clamped to the floor.
    ///
    /// Only the heights tree changes; the data tree is shared as is.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the column does not exist.
    pub fn set_column_height(&self, row: &str, column: &str, height: f64) -> LayoutResult<Self> {
        if !self.row_columns(row)?.contains_key(column) {
            return Err(LayoutError::column_not_found(row, column));
        }
        let height = self.clamp_height(height);
        let mut row_heights = self
            .heights
            .get(row)
            .map(|h| RowHeights::clone(h))
            .unwrap_or_default();
        match row_heights.get_mut(column) {
            Some(slot) => *slot = height,
            None => {
                return Err(LayoutError::Desync(format!(
                    "no height entry for {row}/{column}"
                )));
            }
        }
        let mut heights = (*self.heights).clone();
        if let Some(slot) = heights.get_mut(row) {
            *slot = Arc::new(row_heights);
        }
        Ok(Self {
            heights: Arc::new(heights),
            ..self.clone()
        })
    }

    /// Clamps `height` to the floor. Non-finite values become the floor.
    #[must_use]
    pub fn clamp_height(&self, height: f64) -> f64 {
        let floor = self.min_column_height();
        if height.is_finite() {
            height.max(floor)
        } else {
            floor
        }
    }

    /// Verifies that the heights tree mirrors the data tree at both levels,
    /// including order.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Desync`] describing the first mismatch.
    pub fn check_mirror(&self) -> LayoutResult<()> {
        let data_rows: Vec<&RowKey> = self.rows.keys().collect();
        let height_rows: Vec<&RowKey> = self.heights.keys().collect();
        if data_rows != height_rows {
            return Err(LayoutError::Desync(format!(
                "row keys {data_rows:?} vs heights {height_rows:?}"
            )));
        }
        for (row, columns) in self.rows.iter() {
            let data_columns: Vec<&ColumnKey> = columns.keys().collect();
            let height_columns: Vec<&ColumnKey> = self
                .heights
                .get(row)
                .map(|h| h.keys().collect())
                .unwrap_or_default();
            if data_columns != height_columns {
                return Err(LayoutError::Desync(format!(
                    "{row}: columns {data_columns:?} vs heights {height_columns:?}"
                )));
            }
        }
        Ok(())
    }

    fn row_columns(&self, row: &str) -> LayoutResult<&RowColumns> {
        self.row(row)
            .ok_or_else(|| LayoutError::RowNotFound(row.to_string()))
    }

    /// Applies `edit` to copies of one row's columns and heights, then
    /// builds the next tree from them. Both copies are committed together
    /// or not at all.
    fn update_row<T>(
        &self,
        row: &str,
        edit: impl FnOnce(&mut RowColumns, &mut RowHeights) -> LayoutResult<T>,
    ) -> LayoutResult<(Self, T)> {
        let mut columns = RowColumns::clone(self.row_columns(row)?);
        let mut row_heights = self
            .heights
            .get(row)
            .map(|h| RowHeights::clone(h))
            .ok_or_else(|| LayoutError::Desync(format!("no heights for row {row}")))?;
        let out = edit(&mut columns, &mut row_heights)?;

        let mut rows = (*self.rows).clone();
        if let Some(slot) = rows.get_mut(row) {
            *slot = Arc::new(columns);
        }
        let mut heights = (*self.heights).clone();
        if let Some(slot) = heights.get_mut(row) {
            *slot = Arc::new(row_heights);
        }
        Ok((self.replace(rows, heights), out))
    }

    fn replace(
        &self,
        rows: OrderedMap<RowKey, Arc<RowColumns>>,
        heights: OrderedMap<RowKey, Arc<RowHeights>>,
    ) -> Self {
        Self {
            rows: Arc::new(rows),
            heights: Arc::new(heights),
            options: Arc::clone(&self.options),
            next_item_seq: self.next_item_seq,
        }
    }
}

fn duplicate(scope: KeyScope, key: String) -> LayoutError {
    LayoutError::DuplicateKey { scope, key }
}

fn columns_scope(row: &str) -> KeyScope {
    KeyScope::Columns {
        row: row.to_string(),
    }
}
