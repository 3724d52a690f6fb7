//! Drop resolution
//!
//! [`resolve_drop`] turns the drag session, the hover indicators and the
//! container under the pointer into at most one structural edit. It never
//! fails: every combination that cannot be applied becomes a
//! [`DropOutcome::NoOp`] and the input tree is left as it was.
//!
//! All three nesting levels share one index rule, implemented once in
//! [`resolve_insert_index`].

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::drag_drop::{DragKind, DragSession, DragSource, DropPosition, HoverState, NestingLevel};
use crate::error::LayoutError;
use crate::models::{ColumnKey, ItemId, ItemTemplate, RowKey};
use crate::trace_operation;
use crate::tracing::span_names;
use crate::tree::{next_unique_key, LayoutTree};

/// The container the pointer was released over
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DropTarget {
    /// Empty canvas background
    Canvas,
    /// A row (its column area)
    Row {
        /// Row key
        row: RowKey,
    },
    /// A column (its item list)
    Column {
        /// Owning row
        row: RowKey,
        /// Column key
        column: ColumnKey,
    },
    /// The deletion zone
    Trash,
}

impl DropTarget {
    fn row(&self) -> Option<&str> {
        match self {
            Self::Row { row } | Self::Column { row, .. } => Some(row),
            Self::Canvas | Self::Trash => None,
        }
    }
}

/// A structural edit that was applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum DropEffect {
    /// A row was created from a template
    RowInserted {
        /// New row key
        row: RowKey,
        /// Its position
        index: usize,
    },
    /// A row was reordered
    RowMoved {
        /// Row key
        row: RowKey,
        /// Its new position
        index: usize,
    },
    /// A column was created from a template
    ColumnInserted {
        /// Owning row
        row: RowKey,
        /// New column key
        column: ColumnKey,
        /// Its position
        index: usize,
    },
    /// A column was reordered within its row or moved to another row
    ColumnMoved {
        /// Row it came from
        from_row: RowKey,
        /// Row it is now in
        row: RowKey,
        /// Its key in the destination row
        column: ColumnKey,
        /// Its new position
        index: usize,
    },
    /// An item was created from a template
    ItemInserted {
        /// Owning row
        row: RowKey,
        /// Owning column
        column: ColumnKey,
        /// New item id
        item: ItemId,
        /// Its position
        index: usize,
    },
    /// An item was moved
    ItemMoved {
        /// Destination row
        row: RowKey,
        /// Destination column
        column: ColumnKey,
        /// Item id
        item: ItemId,
        /// Its new position
        index: usize,
    },
    /// A row and everything in it was deleted
    RowDeleted {
        /// Row key
        row: RowKey,
    },
    /// A column and its items were deleted
    ColumnDeleted {
        /// Owning row
        row: RowKey,
        /// Column key
        column: ColumnKey,
    },
    /// An item was deleted
    ItemDeleted {
        /// Row it was in
        row: RowKey,
        /// Column it was in
        column: ColumnKey,
        /// Item id
        item: ItemId,
    },
}

impl fmt::Display for DropEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RowInserted { row, index } => write!(f, "inserted row {row} at {index}"),
            Self::RowMoved { row, index } => write!(f, "moved row {row} to {index}"),
            Self::ColumnInserted { row, column, index } => {
                write!(f, "inserted column {row}/{column} at {index}")
            }
            Self::ColumnMoved {
                from_row,
                row,
                column,
                index,
            } if from_row == row => write!(f, "moved column {row}/{column} to {index}"),
            Self::ColumnMoved {
                from_row,
                row,
                column,
                index,
            } => write!(f, "moved column from {from_row} to {row}/{column} at {index}"),
            Self::ItemInserted {
                row,
                column,
                item,
                index,
            } => write!(f, "inserted item {item} into {row}/{column} at {index}"),
            Self::ItemMoved {
                row,
                column,
                item,
                index,
            } => write!(f, "moved item {item} to {row}/{column} at {index}"),
            Self::RowDeleted { row } => write!(f, "deleted row {row}"),
            Self::ColumnDeleted { row, column } => write!(f, "deleted column {row}/{column}"),
            Self::ItemDeleted { row, column, item } => {
                write!(f, "deleted item {item} from {row}/{column}")
            }
        }
    }
}

/// Why a drop left the tree unchanged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoOpReason {
    /// No drag was in progress
    NoSession,
    /// The target does not accept this kind of drag
    Rejected {
        /// Kind being dragged
        kind: DragKind,
    },
    /// The drop resolves to the source's own slot
    SelfDrop,
    /// The dragged entity no longer exists where the session says
    StaleSource,
    /// The target container does not exist
    MissingTarget,
    /// A Tree Store contract was violated while applying the edit
    Internal(LayoutError),
}

impl fmt::Display for NoOpReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSession => write!(f, "no active drag"),
            Self::Rejected { kind } => write!(f, "target does not accept {kind:?}"),
            Self::SelfDrop => write!(f, "dropped onto own slot"),
            Self::StaleSource => write!(f, "drag source no longer exists"),
            Self::MissingTarget => write!(f, "drop target does not exist"),
            Self::Internal(err) => write!(f, "internal error: {err}"),
        }
    }
}

impl From<LayoutError> for NoOpReason {
    fn from(err: LayoutError) -> Self {
        Self::Internal(err)
    }
}

/// Result of resolving a drop
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// The tree changed
    Applied {
        /// The new tree
        tree: LayoutTree,
        /// What changed
        effect: DropEffect,
    },
    /// Nothing happened
    NoOp(NoOpReason),
}

impl DropOutcome {
    /// Returns true if an edit was applied.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    /// The applied effect, if any.
    #[must_use]
    pub const fn effect(&self) -> Option<&DropEffect> {
        match self {
            Self::Applied { effect, .. } => Some(effect),
            Self::NoOp(_) => None,
        }
    }

    /// The no-op reason, if any.
    #[must_use]
    pub const fn no_op_reason(&self) -> Option<&NoOpReason> {
        match self {
            Self::NoOp(reason) => Some(reason),
            Self::Applied { .. } => None,
        }
    }
}

/// Computes where to insert into an ordered sibling sequence.
///
/// `anchor` is the active indicator for this level: the hovered sibling and
/// the side it was hovered on. Without an anchor, or when the anchor is not
/// in `sequence`, the result is the end of the sequence.
///
/// When `source` is itself in `sequence` (a same-parent reorder) the result
/// is expressed against the sequence with the source removed, and `None` is
/// returned if the drop would put the source back in its own slot.
#[must_use]
pub fn resolve_insert_index<'a, I>(
    sequence: I,
    source: Option<&str>,
    anchor: Option<(&str, DropPosition)>,
) -> Option<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut len = 0;
    let mut source_index = None;
    let mut anchor_index = None;
    for (index, key) in sequence.into_iter().enumerate() {
        len = index + 1;
        if source == Some(key) {
            source_index = Some(index);
        }
        if anchor.is_some_and(|(target, _)| target == key) {
            anchor_index = Some(index);
        }
    }

    let raw = match (anchor, anchor_index) {
        (Some((_, DropPosition::Before)), Some(index)) => index,
        (Some((_, DropPosition::After)), Some(index)) => index + 1,
        _ => len,
    };

    match source_index {
        Some(si) if raw == si || raw == si + 1 => None,
        Some(si) if raw > si => Some(raw - 1),
        _ => Some(raw),
    }
}

/// Resolves a drop of the current drag onto `target`.
///
/// The caller owns the session and hover state and must reset both after
/// this returns, whatever the outcome.
#[must_use]
pub fn resolve_drop(
    tree: &LayoutTree,
    session: &DragSession,
    hover: &HoverState,
    target: &DropTarget,
) -> DropOutcome {
    let span = trace_operation!(span_names::DROP_RESOLVE, kind = ?session.kind(), target = ?target);
    let _guard = span.enter();

    let result = match session.source() {
        None => Err(NoOpReason::NoSession),
        Some(source) if *target == DropTarget::Trash => drop_on_trash(tree, source),
        Some(source) => match source {
            DragSource::NewRow { .. } => insert_new_row(tree, hover, target),
            DragSource::Row { row } => move_row(tree, hover, row, target),
            DragSource::NewColumn { .. } => insert_new_column(tree, hover, target),
            DragSource::Column { row, column } => move_column(tree, hover, row, column, target),
            DragSource::NewItem { template } => insert_new_item(tree, hover, template, target),
            DragSource::Item { row, column, item } => {
                move_item(tree, hover, (row.as_str(), column.as_str(), item.as_str()), target)
            }
        },
    };

    match result {
        Ok((tree, effect)) => {
            log_applied(&effect);
            DropOutcome::Applied { tree, effect }
        }
        Err(reason) => {
            if let NoOpReason::Internal(err) = &reason {
                error!(error = %err, "Drop aborted by layout error");
            } else {
                debug!(reason = %reason, "Drop ignored");
            }
            DropOutcome::NoOp(reason)
        }
    }
}

type Resolution = Result<(LayoutTree, DropEffect), NoOpReason>;

fn log_applied(effect: &DropEffect) {
    match effect {
        DropEffect::RowInserted { row, index } | DropEffect::RowMoved { row, index } => {
            debug!(%row, index, summary = %effect, "Drop applied");
        }
        DropEffect::ColumnInserted { row, column, index }
        | DropEffect::ColumnMoved {
            row, column, index, ..
        } => debug!(%row, %column, index, summary = %effect, "Drop applied"),
        DropEffect::ItemInserted {
            row,
            column,
            item,
            index,
        }
        | DropEffect::ItemMoved {
            row,
            column,
            item,
            index,
        } => debug!(%row, %column, %item, index, summary = %effect, "Drop applied"),
        DropEffect::RowDeleted { row } => debug!(%row, summary = %effect, "Drop applied"),
        DropEffect::ColumnDeleted { row, column } => {
            debug!(%row, %column, summary = %effect, "Drop applied");
        }
        DropEffect::ItemDeleted { row, column, item } => {
            debug!(%row, %column, %item, summary = %effect, "Drop applied");
        }
    }
}

fn rejected(kind: DragKind) -> NoOpReason {
    NoOpReason::Rejected { kind }
}

/// Row-level anchor, if the indicator points at an existing row.
fn row_anchor<'h>(tree: &LayoutTree, hover: &'h HoverState) -> Option<(&'h str, DropPosition)> {
    hover
        .get(NestingLevel::Row)
        .filter(|i| tree.rows().contains_key(i.target.as_str()))
        .map(|i| (i.target.as_str(), i.position))
}

/// Column-level anchor, if the indicator points at a column of `row`.
fn column_anchor<'h>(
    tree: &LayoutTree,
    hover: &'h HoverState,
    row: &str,
) -> Option<(&'h str, DropPosition)> {
    hover
        .get(NestingLevel::Column)
        .filter(|i| i.parent.as_deref() == Some(row))
        .filter(|i| tree.row(row).is_some_and(|c| c.contains_key(i.target.as_str())))
        .map(|i| (i.target.as_str(), i.position))
}

/// Item-level anchor, if the indicator points at an item of `row/column`.
fn item_anchor<'h>(
    tree: &LayoutTree,
    hover: &'h HoverState,
    row: &str,
    column: &str,
) -> Option<(&'h str, DropPosition)> {
    let items = tree.column_items(row, column)?;
    hover
        .get(NestingLevel::Item)
        .filter(|i| items.iter().any(|item| item.id == i.target))
        .map(|i| (i.target.as_str(), i.position))
}

fn row_keys(tree: &LayoutTree) -> impl Iterator<Item = &str> {
    tree.rows().keys().map(String::as_str)
}

fn insert_new_row(tree: &LayoutTree, hover: &HoverState, target: &DropTarget) -> Resolution {
    if !matches!(target, DropTarget::Canvas) && target.row().is_none() {
        return Err(rejected(DragKind::NewRowTemplate));
    }
    let index = resolve_insert_index(row_keys(tree), None, row_anchor(tree, hover))
        .unwrap_or(tree.row_count());
    let row = tree.next_row_key();
    let column = next_unique_key([], &tree.options().column_prefix);
    let tree = tree.insert_row_with_column(row.clone(), column, index)?;
    Ok((tree, DropEffect::RowInserted { row, index }))
}

fn move_row(tree: &LayoutTree, hover: &HoverState, source: &str, target: &DropTarget) -> Resolution {
    if !matches!(target, DropTarget::Row { .. } | DropTarget::Column { .. }) {
        return Err(rejected(DragKind::Row));
    }
    if !tree.rows().contains_key(source) {
        return Err(NoOpReason::StaleSource);
    }
    let anchor = row_anchor(tree, hover);
    if anchor.is_none() && target.row() == Some(source) {
        return Err(NoOpReason::SelfDrop);
    }
    let index =
        resolve_insert_index(row_keys(tree), Some(source), anchor).ok_or(NoOpReason::SelfDrop)?;
    let tree = tree.move_row(source, index)?;
    Ok((
        tree,
        DropEffect::RowMoved {
            row: source.to_string(),
            index,
        },
    ))
}

fn insert_new_column(tree: &LayoutTree, hover: &HoverState, target: &DropTarget) -> Resolution {
    let row = target.row().ok_or_else(|| rejected(DragKind::NewColumnTemplate))?;
    let columns = tree.row(row).ok_or(NoOpReason::MissingTarget)?;
    let anchor = column_anchor(tree, hover, row);
    let index = resolve_insert_index(columns.keys().map(String::as_str), None, anchor)
        .unwrap_or(columns.len());
    let column = tree.next_column_key(row)?;
    let tree = tree.insert_column(row, column.clone(), index)?;
    Ok((
        tree,
        DropEffect::ColumnInserted {
            row: row.to_string(),
            column,
            index,
        },
    ))
}

fn move_column(
    tree: &LayoutTree,
    hover: &HoverState,
    source_row: &str,
    source_column: &str,
    target: &DropTarget,
) -> Resolution {
    let target_row = target.row().ok_or_else(|| rejected(DragKind::Column))?;
    if !tree
        .row(source_row)
        .is_some_and(|c| c.contains_key(source_column))
    {
        return Err(NoOpReason::StaleSource);
    }
    let columns = tree.row(target_row).ok_or(NoOpReason::MissingTarget)?;
    let anchor = column_anchor(tree, hover, target_row);
    let keys = columns.keys().map(String::as_str);

    if target_row == source_row {
        let onto_self = matches!(target, DropTarget::Column { column, .. } if column == source_column);
        if anchor.is_none() && onto_self {
            return Err(NoOpReason::SelfDrop);
        }
        let index =
            resolve_insert_index(keys, Some(source_column), anchor).ok_or(NoOpReason::SelfDrop)?;
        let tree = tree.move_column(source_row, source_column, index)?;
        return Ok((
            tree,
            DropEffect::ColumnMoved {
                from_row: source_row.to_string(),
                row: target_row.to_string(),
                column: source_column.to_string(),
                index,
            },
        ));
    }

    let index = resolve_insert_index(keys, None, anchor).unwrap_or(columns.len());
    let (tree, column) = tree.move_column_across_row(source_row, source_column, target_row, index)?;
    Ok((
        tree,
        DropEffect::ColumnMoved {
            from_row: source_row.to_string(),
            row: target_row.to_string(),
            column,
            index,
        },
    ))
}

fn insert_new_item(
    tree: &LayoutTree,
    hover: &HoverState,
    template: &ItemTemplate,
    target: &DropTarget,
) -> Resolution {
    let DropTarget::Column { row, column } = target else {
        return Err(rejected(DragKind::NewItemTemplate));
    };
    let items = tree
        .column_items(row, column)
        .ok_or(NoOpReason::MissingTarget)?;
    let anchor = item_anchor(tree, hover, row, column);
    let index = resolve_insert_index(items.iter().map(|i| i.id.as_str()), None, anchor)
        .unwrap_or(items.len());
    let (next, item) = tree.allocate_item(template)?;
    let id = item.id.clone();
    let next = next.insert_item(row, column, item, index)?;
    Ok((
        next,
        DropEffect::ItemInserted {
            row: row.clone(),
            column: column.clone(),
            item: id,
            index,
        },
    ))
}

fn move_item(
    tree: &LayoutTree,
    hover: &HoverState,
    (source_row, source_column, id): (&str, &str, &str),
    target: &DropTarget,
) -> Resolution {
    let DropTarget::Column { row, column } = target else {
        return Err(rejected(DragKind::Item));
    };
    let in_place = tree
        .column_items(source_row, source_column)
        .is_some_and(|items| items.iter().any(|i| i.id == id));
    if !in_place {
        return Err(NoOpReason::StaleSource);
    }
    let items = tree
        .column_items(row, column)
        .ok_or(NoOpReason::MissingTarget)?;
    let anchor = item_anchor(tree, hover, row, column);
    let same_column = row == source_row && column == source_column;
    let source = same_column.then_some(id);
    let index = resolve_insert_index(items.iter().map(|i| i.id.as_str()), source, anchor)
        .ok_or(NoOpReason::SelfDrop)?;
    let tree = tree.move_item(source_row, source_column, id, row, column, index)?;
    Ok((
        tree,
        DropEffect::ItemMoved {
            row: row.clone(),
            column: column.clone(),
            item: id.to_string(),
            index,
        },
    ))
}

fn drop_on_trash(tree: &LayoutTree, source: &DragSource) -> Resolution {
    match source {
        DragSource::Row { row } => {
            if !tree.rows().contains_key(row.as_str()) {
                return Err(NoOpReason::StaleSource);
            }
            let tree = tree.remove_row(row)?;
            Ok((tree, DropEffect::RowDeleted { row: row.clone() }))
        }
        DragSource::Column { row, column } => {
            if !tree.row(row).is_some_and(|c| c.contains_key(column.as_str())) {
                return Err(NoOpReason::StaleSource);
            }
            let (tree, _) = tree.remove_column(row, column)?;
            Ok((
                tree,
                DropEffect::ColumnDeleted {
                    row: row.clone(),
                    column: column.clone(),
                },
            ))
        }
        DragSource::Item { row, column, item } => {
            let (tree, removed) = tree.remove_item(row, column, item).map_err(|err| match err {
                LayoutError::RowNotFound(_)
                | LayoutError::ColumnNotFound { .. }
                | LayoutError::ItemNotFound(_) => NoOpReason::StaleSource,
                other => NoOpReason::Internal(other),
            })?;
            Ok((
                tree,
                DropEffect::ItemDeleted {
                    row: row.clone(),
                    column: column.clone(),
                    item: removed.id,
                },
            ))
        }
        other => Err(rejected(other.kind())),
    }
}
