//! Replayable gesture scripts
//!
//! A script is an ordered list of pointer-level steps (drag start, hover,
//! leave, drop, cancel, resize) that [`LayoutEditor::replay`] feeds through
//! the same entry points a UI would call. Scripts are plain serde data and
//! load from JSON or TOML.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::drag_drop::{DragSource, HoverCandidate, NestingLevel, Point};
use crate::editor::LayoutEditor;
use crate::resolver::{DropEffect, DropOutcome, DropTarget};
use crate::tracing::span_names;
use crate::trace_operation;

/// One pointer-level input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum GestureStep {
    /// Pick something up
    DragStart {
        /// What is picked up
        source: DragSource,
    },
    /// Move over a container
    Hover {
        /// The container under the pointer
        candidate: HoverCandidate,
        /// Pointer position
        pointer: Point,
    },
    /// Leave a container
    Leave {
        /// Level of the container
        level: NestingLevel,
        /// Its key
        target: String,
    },
    /// Release the pointer
    Drop {
        /// The container released over
        target: DropTarget,
    },
    /// Abort the drag
    Cancel,
    /// Drag a column's resize handle by `delta` pixels and release
    Resize {
        /// Owning row
        row: String,
        /// Column key
        column: String,
        /// Vertical pointer travel
        delta: f64,
    },
}

impl GestureStep {
    /// Short name of the step, as used in scripts.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::DragStart { .. } => "drag_start",
            Self::Hover { .. } => "hover",
            Self::Leave { .. } => "leave",
            Self::Drop { .. } => "drop",
            Self::Cancel => "cancel",
            Self::Resize { .. } => "resize",
        }
    }
}

/// A script file: `steps = [...]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GestureScript {
    /// Steps in order
    #[serde(default)]
    pub steps: Vec<GestureStep>,
}

/// What a step did.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepOutcome {
    /// A drag session was opened
    Started,
    /// Indicator state after a hover or leave
    Indicator {
        /// Whether the visible state changed
        changed: bool,
    },
    /// A drop changed the tree
    Applied {
        /// The edit
        effect: DropEffect,
    },
    /// A drop was a no-op
    NoOp {
        /// Why
        reason: String,
    },
    /// The drag was abandoned
    Cancelled,
    /// A column height was committed
    Resized {
        /// Committed height
        height: f64,
    },
    /// The step could not be carried out
    Failed {
        /// Error message
        error: String,
    },
}

/// Per-step replay result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    /// Zero-based position in the script
    pub index: usize,
    /// Step name
    pub step: &'static str,
    /// What happened
    #[serde(flatten)]
    pub outcome: StepOutcome,
}

impl LayoutEditor {
    /// Applies one step.
    pub fn apply_step(&mut self, step: &GestureStep) -> StepOutcome {
        match step {
            GestureStep::DragStart { source } => {
                self.begin_drag(source.clone());
                StepOutcome::Started
            }
            GestureStep::Hover { candidate, pointer } => StepOutcome::Indicator {
                changed: self.drag_over(candidate, *pointer),
            },
            GestureStep::Leave { level, target } => StepOutcome::Indicator {
                changed: self.drag_leave(*level, target),
            },
            GestureStep::Drop { target } => match self.drop_on(target) {
                DropOutcome::Applied { effect, .. } => StepOutcome::Applied { effect },
                DropOutcome::NoOp(reason) => StepOutcome::NoOp {
                    reason: reason.to_string(),
                },
            },
            GestureStep::Cancel => {
                self.cancel_drag();
                StepOutcome::Cancelled
            }
            GestureStep::Resize { row, column, delta } => {
                let committed = self
                    .begin_resize(row, column, 0.0)
                    .and_then(|()| {
                        self.resize_preview(*delta);
                        self.commit_resize()
                    });
                match committed {
                    Ok(Some(height)) => StepOutcome::Resized { height },
                    Ok(None) => StepOutcome::Failed {
                        error: "no resize in progress".to_string(),
                    },
                    Err(err) => StepOutcome::Failed {
                        error: err.to_string(),
                    },
                }
            }
        }
    }

    /// Applies `steps` in order and reports each one.
    pub fn replay(&mut self, steps: &[GestureStep]) -> Vec<StepReport> {
        let span = trace_operation!(span_names::GESTURE_REPLAY, steps = steps.len());
        let _guard = span.enter();
        steps
            .iter()
            .enumerate()
            .map(|(index, step)| {
                let outcome = self.apply_step(step);
                debug!(index, step = step.name(), ?outcome, "Step replayed");
                StepReport {
                    index,
                    step: step.name(),
                    outcome,
                }
            })
            .collect()
    }
}
