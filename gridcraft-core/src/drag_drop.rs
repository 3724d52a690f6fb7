//! Drag session and hover indicator model for layout editing
//!
//! This module provides a pure data model for drag-and-drop gestures,
//! independent of any toolkit, so the placement rules can be tested
//! directly. A gesture is a [`DragSession`] plus one [`HoverIndicator`] slot
//! per [`NestingLevel`]; the resolver reads both when the pointer is
//! released.

use serde::{Deserialize, Serialize};

use crate::models::{ColumnKey, ItemId, ItemTemplate, RowKey};

/// Drop position relative to a target container
///
/// Determines on which side of the hovered row, column or item a drop
/// would insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropPosition {
    /// Insert before the target (line above, or to the left for columns)
    Before,
    /// Insert after the target (line below, or to the right for columns)
    After,
}

/// Level of the layout tree a container belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NestingLevel {
    /// Rows stack vertically on the canvas
    Row,
    /// Columns sit side by side within a row
    Column,
    /// Items stack vertically within a column
    Item,
}

/// Axis along which siblings at a level are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Top to bottom
    Vertical,
    /// Left to right
    Horizontal,
}

impl NestingLevel {
    /// All levels, outermost first.
    pub const ALL: [Self; 3] = [Self::Row, Self::Column, Self::Item];

    /// Layout axis of siblings at this level.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Row | Self::Item => Axis::Vertical,
            Self::Column => Axis::Horizontal,
        }
    }
}

/// Pointer position in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Bounding box of a container in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Calculates the drop position of `pointer` within `bounds`
///
/// The box is split at its midpoint along the level's axis: the vertical
/// midpoint for rows and items, the horizontal midpoint for columns. A
/// pointer strictly before the midpoint resolves to `Before`; on or past it
/// resolves to `After`.
///
/// # Arguments
/// * `pointer` - Pointer position
/// * `bounds` - Bounding box of the hovered container
/// * `level` - Nesting level of the hovered container
///
/// # Returns
/// The calculated drop position
#[must_use]
pub fn calculate_drop_position(pointer: Point, bounds: Rect, level: NestingLevel) -> DropPosition {
    let (offset, extent) = match level.axis() {
        Axis::Vertical => (pointer.y - bounds.y, bounds.height),
        Axis::Horizontal => (pointer.x - bounds.x, bounds.width),
    };
    if offset < extent / 2.0 {
        DropPosition::Before
    } else {
        DropPosition::After
    }
}

/// Calculates where the insertion line should be drawn
///
/// For rows and items this is a Y coordinate (top edge for `Before`,
/// bottom edge for `After`); for columns it is an X coordinate (left or
/// right edge).
#[must_use]
pub fn indicator_line(bounds: Rect, position: DropPosition, level: NestingLevel) -> f64 {
    match (level.axis(), position) {
        (Axis::Vertical, DropPosition::Before) => bounds.y,
        (Axis::Vertical, DropPosition::After) => bounds.y + bounds.height,
        (Axis::Horizontal, DropPosition::Before) => bounds.x,
        (Axis::Horizontal, DropPosition::After) => bounds.x + bounds.width,
    }
}

/// What the pointer picked up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DragSource {
    /// An existing row
    Row {
        /// Row key
        row: RowKey,
    },
    /// An existing column
    Column {
        /// Owning row
        row: RowKey,
        /// Column key
        column: ColumnKey,
    },
    /// An existing item
    Item {
        /// Owning row
        row: RowKey,
        /// Owning column
        column: ColumnKey,
        /// Item id
        item: ItemId,
    },
    /// A palette row template
    NewRow {
        /// Template name
        #[serde(default)]
        name: String,
    },
    /// A palette column template
    NewColumn {
        /// Template name
        #[serde(default)]
        name: String,
    },
    /// A palette item template
    NewItem {
        /// Template descriptor
        template: ItemTemplate,
    },
}

/// Kind of the in-progress drag, `None` when idle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragKind {
    /// Nothing is being dragged
    None,
    /// Existing row
    Row,
    /// Existing column
    Column,
    /// Existing item
    Item,
    /// Row template
    NewRowTemplate,
    /// Column template
    NewColumnTemplate,
    /// Item template
    NewItemTemplate,
}

impl DragSource {
    /// Kind of this source.
    #[must_use]
    pub const fn kind(&self) -> DragKind {
        match self {
            Self::Row { .. } => DragKind::Row,
            Self::Column { .. } => DragKind::Column,
            Self::Item { .. } => DragKind::Item,
            Self::NewRow { .. } => DragKind::NewRowTemplate,
            Self::NewColumn { .. } => DragKind::NewColumnTemplate,
            Self::NewItem { .. } => DragKind::NewItemTemplate,
        }
    }

    /// Level at which this source would be placed.
    #[must_use]
    pub const fn level(&self) -> NestingLevel {
        match self {
            Self::Row { .. } | Self::NewRow { .. } => NestingLevel::Row,
            Self::Column { .. } | Self::NewColumn { .. } => NestingLevel::Column,
            Self::Item { .. } | Self::NewItem { .. } => NestingLevel::Item,
        }
    }

    /// Returns true if hovering `target` under `parent` at `level` means
    /// hovering the dragged entity itself.
    #[must_use]
    pub fn is_self(&self, level: NestingLevel, target: &str, parent: Option<&str>) -> bool {
        match (self, level) {
            (Self::Row { row }, NestingLevel::Row) => row == target,
            (Self::Column { row, column }, NestingLevel::Column) => {
                column == target && parent.is_none_or(|p| p == row)
            }
            (Self::Item { item, .. }, NestingLevel::Item) => item == target,
            _ => false,
        }
    }
}

/// The transient descriptor of the entity currently being dragged
///
/// Captured verbatim at drag start and never edited afterwards; cleared at
/// the end of every gesture.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragSession {
    source: Option<DragSource>,
}

impl DragSession {
    /// Creates an idle session.
    #[must_use]
    pub const fn new() -> Self {
        Self { source: None }
    }

    /// Starts a drag, replacing any previous source.
    pub fn start(&mut self, source: DragSource) {
        self.source = Some(source);
    }

    /// Returns to idle.
    pub fn clear(&mut self) {
        self.source = None;
    }

    /// The dragged entity, if any.
    #[must_use]
    pub const fn source(&self) -> Option<&DragSource> {
        self.source.as_ref()
    }

    /// Kind of the in-progress drag.
    #[must_use]
    pub fn kind(&self) -> DragKind {
        self.source.as_ref().map_or(DragKind::None, DragSource::kind)
    }

    /// Returns true while something is being dragged.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.source.is_some()
    }
}

/// Placement marker for one nesting level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoverIndicator {
    /// Key of the hovered container
    pub target: String,
    /// Key of the hovered container's parent (row for columns, column for
    /// items)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Side of the target the drop would land on
    pub position: DropPosition,
}

impl HoverIndicator {
    /// Creates an indicator.
    #[must_use]
    pub fn new(target: impl Into<String>, parent: Option<String>, position: DropPosition) -> Self {
        Self {
            target: target.into(),
            parent,
            position,
        }
    }
}

/// The three indicator slots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoverState {
    row: Option<HoverIndicator>,
    column: Option<HoverIndicator>,
    item: Option<HoverIndicator>,
}

impl HoverState {
    /// Creates an all-inactive state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            row: None,
            column: None,
            item: None,
        }
    }

    /// Active indicator at `level`.
    #[must_use]
    pub const fn get(&self, level: NestingLevel) -> Option<&HoverIndicator> {
        match level {
            NestingLevel::Row => self.row.as_ref(),
            NestingLevel::Column => self.column.as_ref(),
            NestingLevel::Item => self.item.as_ref(),
        }
    }

    /// Replaces the indicator at `level`.
    ///
    /// Returns false, leaving state untouched, if the new value equals the
    /// current one.
    pub fn set(&mut self, level: NestingLevel, indicator: Option<HoverIndicator>) -> bool {
        let slot = self.slot_mut(level);
        if *slot == indicator {
            return false;
        }
        *slot = indicator;
        true
    }

    /// Deactivates the indicator at `level`. Returns true if one was active.
    pub fn clear(&mut self, level: NestingLevel) -> bool {
        self.slot_mut(level).take().is_some()
    }

    /// Deactivates all three indicators.
    pub fn clear_all(&mut self) {
        *self = Self::new();
    }

    /// Returns true if no indicator is active.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.row.is_none() && self.column.is_none() && self.item.is_none()
    }

    fn slot_mut(&mut self, level: NestingLevel) -> &mut Option<HoverIndicator> {
        match level {
            NestingLevel::Row => &mut self.row,
            NestingLevel::Column => &mut self.column,
            NestingLevel::Item => &mut self.item,
        }
    }
}

/// A container the pointer is currently over
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoverCandidate {
    /// Level of the container
    pub level: NestingLevel,
    /// Key of the container
    pub target: String,
    /// Key of its parent (row for columns, column for items)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Bounding box of the container
    pub bounds: Rect,
}

/// Computes the indicator a hover over `candidate` should show
///
/// Returns `None` when no indicator may arm: no drag is active, the drag
/// places at a different level, or the candidate is the dragged entity.
#[must_use]
pub fn compute_indicator(
    session: &DragSession,
    candidate: &HoverCandidate,
    pointer: Point,
) -> Option<HoverIndicator> {
    let source = session.source()?;
    if source.level() != candidate.level {
        return None;
    }
    if source.is_self(candidate.level, &candidate.target, candidate.parent.as_deref()) {
        return None;
    }
    let position = calculate_drop_position(pointer, candidate.bounds, candidate.level);
    Some(HoverIndicator::new(
        candidate.target.clone(),
        candidate.parent.clone(),
        position,
    ))
}
