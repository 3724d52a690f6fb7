//! Top-level layout controller
//!
//! [`LayoutEditor`] owns the current [`LayoutTree`] together with the
//! transient gesture state (drag session, hover indicators, resize) and is
//! the only place where a new tree version is committed. Rendering
//! collaborators read snapshots from it or subscribe to updates.

use std::fmt;

use tracing::{debug, warn};

use crate::drag_drop::{
    compute_indicator, DragSession, DragSource, HoverCandidate, HoverState, NestingLevel, Point,
};
use crate::error::LayoutResult;
use crate::models::Palette;
use crate::resize::ResizeSession;
use crate::resolver::{resolve_drop, DropOutcome, DropTarget};
use crate::snapshot::LayoutSnapshot;
use crate::tracing::span_names;
use crate::tree::LayoutTree;
use crate::{trace_operation, trace_operation_debug};

/// Published after every committed change.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutUpdate {
    /// Monotonic version, starting at 1 for the first change
    pub version: u64,
    /// The tree as of this version
    pub tree: LayoutTree,
}

/// Handle returned by [`LayoutEditor::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&LayoutUpdate)>;

/// Owns the layout and the in-progress gesture.
pub struct LayoutEditor {
    tree: LayoutTree,
    palette: Palette,
    session: DragSession,
    hover: HoverState,
    resize: Option<ResizeSession>,
    version: u64,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl fmt::Debug for LayoutEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutEditor")
            .field("tree", &self.tree)
            .field("session", &self.session)
            .field("hover", &self.hover)
            .field("resize", &self.resize)
            .field("version", &self.version)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl Default for LayoutEditor {
    fn default() -> Self {
        Self::new(LayoutTree::new())
    }
}

impl LayoutEditor {
    /// Creates an editor over `tree` with the stock palette.
    #[must_use]
    pub fn new(tree: LayoutTree) -> Self {
        Self::with_palette(tree, Palette::default())
    }

    /// Creates an editor over `tree` with a host-supplied palette.
    #[must_use]
    pub fn with_palette(tree: LayoutTree, palette: Palette) -> Self {
        Self {
            tree,
            palette,
            session: DragSession::new(),
            hover: HoverState::new(),
            resize: None,
            version: 0,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Current tree.
    #[must_use]
    pub const fn tree(&self) -> &LayoutTree {
        &self.tree
    }

    /// Palette that seeds "new entity" drags.
    #[must_use]
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// In-progress drag.
    #[must_use]
    pub const fn session(&self) -> &DragSession {
        &self.session
    }

    /// Current hover indicators.
    #[must_use]
    pub const fn hover(&self) -> &HoverState {
        &self.hover
    }

    /// In-progress resize, if any.
    #[must_use]
    pub const fn resize(&self) -> Option<&ResizeSession> {
        self.resize.as_ref()
    }

    /// Number of committed changes so far.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Owned snapshot of the current tree.
    #[must_use]
    pub fn snapshot(&self) -> LayoutSnapshot {
        self.tree.snapshot()
    }

    /// Registers a callback invoked after every committed change.
    pub fn subscribe(&mut self, callback: impl FnMut(&LayoutUpdate) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Removes a callback. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    // Drag gesture

    /// Starts a drag. The tree is not touched.
    pub fn begin_drag(&mut self, source: DragSource) {
        let span = trace_operation_debug!(span_names::DRAG_START, kind = ?source.kind());
        let _guard = span.enter();
        if let Some(previous) = self.session.source() {
            warn!(?previous, "Drag started while another drag was active");
        }
        self.hover.clear_all();
        self.session.start(source);
    }

    /// Updates the indicator for a pointer over `candidate`.
    ///
    /// Returns true if the visible indicator state changed.
    pub fn drag_over(&mut self, candidate: &HoverCandidate, pointer: Point) -> bool {
        let Some(source) = self.session.source() else {
            return false;
        };
        if source.level() != candidate.level {
            return false;
        }
        let indicator = compute_indicator(&self.session, candidate, pointer);
        let changed = self.hover.set(candidate.level, indicator);
        if changed {
            let span = trace_operation_debug!(span_names::DRAG_HOVER, target = %candidate.target);
            let _guard = span.enter();
            debug!(indicator = ?self.hover.get(candidate.level), "Indicator updated");
        }
        changed
    }

    /// Clears the indicator at `level` if it still points at `target`.
    pub fn drag_leave(&mut self, level: NestingLevel, target: &str) -> bool {
        let points_here = self
            .hover
            .get(level)
            .is_some_and(|indicator| indicator.target == target);
        points_here && self.hover.clear(level)
    }

    /// Releases the drag over `target`.
    ///
    /// The session and all indicators are reset whatever the outcome.
    pub fn drop_on(&mut self, target: &DropTarget) -> DropOutcome {
        let outcome = resolve_drop(&self.tree, &self.session, &self.hover, target);
        self.session.clear();
        self.hover.clear_all();
        if let DropOutcome::Applied { tree, .. } = &outcome {
            self.commit(tree.clone());
        }
        outcome
    }

    /// Abandons the drag without any edit.
    pub fn cancel_drag(&mut self) {
        if self.session.is_active() {
            debug!(kind = ?self.session.kind(), "Drag cancelled");
        }
        self.session.clear();
        self.hover.clear_all();
    }

    // Resize gesture

    /// Starts resizing `row/column` with the pointer at `pointer_y`.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the column does not exist.
    pub fn begin_resize(&mut self, row: &str, column: &str, pointer_y: f64) -> LayoutResult<()> {
        self.resize = Some(ResizeSession::begin(&self.tree, row, column, pointer_y)?);
        Ok(())
    }

    /// Render-only height for the pointer at `pointer_y`; the tree is not
    /// written.
    pub fn resize_preview(&mut self, pointer_y: f64) -> Option<f64> {
        self.resize.as_mut().map(|session| session.preview(pointer_y))
    }

    /// Commits the previewed height. Returns the committed height, or
    /// `None` if no resize was in progress.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the column disappeared mid-gesture; the
    /// resize is dropped in that case.
    pub fn commit_resize(&mut self) -> LayoutResult<Option<f64>> {
        let Some(session) = self.resize.take() else {
            return Ok(None);
        };
        let span = trace_operation!(
            span_names::RESIZE_COMMIT,
            row = %session.row(),
            column = %session.column()
        );
        let _guard = span.enter();
        let height = session.current_height();
        let tree = session.commit(&self.tree)?;
        debug!(height, "Column height committed");
        self.commit(tree);
        Ok(Some(height))
    }

    /// Abandons the resize without writing.
    pub fn cancel_resize(&mut self) {
        self.resize = None;
    }

    fn commit(&mut self, tree: LayoutTree) {
        self.tree = tree;
        self.version += 1;
        if self.subscribers.is_empty() {
            return;
        }
        let update = LayoutUpdate {
            version: self.version,
            tree: self.tree.clone(),
        };
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&update);
        }
    }
}
