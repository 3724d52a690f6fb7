//! `Gridcraft` Core Library
//!
//! This crate provides the engine of a nested drag-and-drop layout builder:
//! a three-level ordered tree (rows, columns, items) with a parallel
//! column-height mirror, and the drag, hover and drop logic that edits it.
//! Rendering is not part of this crate; hosts read snapshots and subscribe
//! to updates.
//!
//! # Crate Structure
//!
//! - [`ordered_map`] - Insertion-ordered keyed container with positional edits
//! - [`tree`] - Tree Store: immutable-update layout tree and heights mirror
//! - [`drag_drop`] - Drag session, hover indicators and midpoint placement
//! - [`resolver`] - Drop resolution into structural edits
//! - [`resize`] - Two-phase column resize
//! - [`editor`] - Top-level controller owning tree and gesture state
//! - [`snapshot`] - Read-only projection, JSON and text rendering
//! - [`gesture`] - Replayable gesture scripts
//! - [`config`] - Settings and document loading

#![warn(missing_docs)]

pub mod config;
pub mod drag_drop;
pub mod editor;
pub mod error;
pub mod gesture;
pub mod models;
pub mod ordered_map;
pub mod resize;
pub mod resolver;
pub mod snapshot;
pub mod tracing;
pub mod tree;

pub use config::{BuilderSettings, ConfigManager, LayoutSettings, LoggingSettings};
pub use drag_drop::{
    DragKind, DragSession, DragSource, DropPosition, HoverCandidate, HoverIndicator, HoverState,
    NestingLevel, Point, Rect, calculate_drop_position, compute_indicator, indicator_line,
};
pub use editor::{LayoutEditor, LayoutUpdate, SubscriptionId};
pub use error::{ConfigError, ConfigResult, KeyScope, LayoutError, LayoutResult};
pub use gesture::{GestureScript, GestureStep, StepOutcome, StepReport};
pub use models::{ColumnKey, Item, ItemId, ItemTemplate, ItemType, Palette, RowKey};
pub use ordered_map::{DuplicateKeyError, OrderedMap, Removed};
pub use resize::ResizeSession;
pub use resolver::{
    DropEffect, DropOutcome, DropTarget, NoOpReason, resolve_drop, resolve_insert_index,
};
pub use snapshot::{LayoutSnapshot, sample_layout, sample_layout_with};
pub use tracing::{
    TracingConfig, TracingError, TracingLevel, TracingOutput, TracingResult, init_tracing,
    span_names,
};
pub use tree::{
    DEFAULT_MIN_COLUMN_HEIGHT, ItemLocation, LayoutTree, RemovedColumn, RowColumns, RowHeights,
    TreeOptions, next_unique_key,
};
