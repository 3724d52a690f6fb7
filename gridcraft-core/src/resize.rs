//! Two-phase column resize
//!
//! While the handle is dragged, [`ResizeSession::preview`] computes the
//! height to draw without touching the tree. Only [`ResizeSession::commit`]
//! writes, once, into the heights mirror.

use crate::error::{LayoutError, LayoutResult};
use crate::models::{ColumnKey, RowKey};
use crate::tree::LayoutTree;

/// An in-progress drag of one column's resize handle.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSession {
    row: RowKey,
    column: ColumnKey,
    origin_y: f64,
    start_height: f64,
    floor: f64,
    preview: f64,
}

impl ResizeSession {
    /// Starts resizing `row/column` with the pointer at `pointer_y`.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the column has no height entry.
    pub fn begin(tree: &LayoutTree, row: &str, column: &str, pointer_y: f64) -> LayoutResult<Self> {
        let start_height = tree
            .column_height(row, column)
            .ok_or_else(|| LayoutError::column_not_found(row, column))?;
        Ok(Self {
            row: row.to_string(),
            column: column.to_string(),
            origin_y: pointer_y,
            start_height,
            floor: tree.min_column_height(),
            preview: start_height,
        })
    }

    /// Row being resized.
    #[must_use]
    pub fn row(&self) -> &str {
        &self.row
    }

    /// Column being resized.
    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Height at gesture start.
    #[must_use]
    pub const fn start_height(&self) -> f64 {
        self.start_height
    }

    /// Height that the last preview produced.
    #[must_use]
    pub const fn current_height(&self) -> f64 {
        self.preview
    }

    /// Updates the render-only height for a pointer at `pointer_y`.
    pub fn preview(&mut self, pointer_y: f64) -> f64 {
        let height = self.start_height + (pointer_y - self.origin_y);
        self.preview = if height.is_finite() {
            height.max(self.floor)
        } else {
            self.floor
        };
        self.preview
    }

    /// Writes the previewed height into `tree`.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the column was removed mid-gesture.
    pub fn commit(self, tree: &LayoutTree) -> LayoutResult<LayoutTree> {
        tree.set_column_height(&self.row, &self.column, self.preview)
    }
}
