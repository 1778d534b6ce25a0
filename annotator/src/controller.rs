//! Shape interaction controller: one explicit state machine per shape.
//!
//! ```text
//!            pointer-down            drag-start
//!   Idle ───────────────▶ Selected ───────────▶ Dragging
//!    ▲                    │  ▲  ▲ ◀──────────────┘ drag-end (commit)
//!    │ deselect (any)     │  │  │                  drag-cancel (revert)
//!    └────────────────────┘  │  └── transform-end (commit) ◀── Rotating
//!                            └── flip (commit)     transform-start ──▶
//! ```
//!
//! Each `on_*` method handles one event kind and returns an [`Outcome`]: at
//! most one rectangle to commit and at most one live preview. The controller
//! is handed the committed record on every call and never keeps a copy of it;
//! the only state it owns is the session state and the mirrored node
//! transform. Events that do not apply to the current state are ignored.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use tracing::{debug, warn};

use crate::doc::{RectId, Rectangle};
use crate::geom::Size;
use crate::input::InteractionState;
use crate::model::flip_180;
use crate::node::{NodeTransform, drag_bound};
use crate::overlay::Overlay;

/// Result of feeding one event to a controller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    /// Rectangle to write back into the host collection.
    pub commit: Option<Rectangle>,
    /// Uncommitted rectangle to show while a gesture runs.
    pub live: Option<Rectangle>,
}

impl Outcome {
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn commit(rect: Rectangle) -> Self {
        Self { commit: Some(rect), live: None }
    }

    #[must_use]
    pub fn live(rect: Rectangle) -> Self {
        Self { commit: None, live: Some(rect) }
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        self.commit.is_none() && self.live.is_none()
    }
}

/// Interaction session for a single rectangle.
#[derive(Debug, Clone)]
pub struct ShapeController {
    id: RectId,
    state: InteractionState,
    /// Mirror of the rendering layer's node; `None` until it is mounted.
    node: Option<NodeTransform>,
}

impl ShapeController {
    /// A fresh, unselected controller with no node attached.
    #[must_use]
    pub fn new(id: RectId) -> Self {
        Self { id, state: InteractionState::Idle, node: None }
    }

    #[must_use]
    pub fn id(&self) -> RectId {
        self.id
    }

    #[must_use]
    pub fn state(&self) -> InteractionState {
        self.state
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.state.is_selected()
    }

    /// The mirrored node transform, if the node is mounted.
    #[must_use]
    pub fn node(&self) -> Option<NodeTransform> {
        self.node
    }

    // --- Node lifecycle ---

    /// The rendering layer mounted the node for `committed`.
    pub fn attach_node(&mut self, committed: &Rectangle) {
        self.node = Some(NodeTransform::from_rect(committed));
    }

    /// The rendering layer dropped the node. A running gesture is abandoned.
    pub fn detach_node(&mut self) {
        self.node = None;
        if self.state.in_gesture() {
            self.set_state(InteractionState::Selected);
        }
    }

    // --- Selection ---

    /// Pointer-down on the shape's hit region.
    pub fn on_select(&mut self) -> Outcome {
        if self.state == InteractionState::Idle {
            self.set_state(InteractionState::Selected);
        }
        Outcome::none()
    }

    /// Pointer-down elsewhere, or another shape took the selection.
    /// Any live gesture is discarded without a commit.
    pub fn on_deselect(&mut self, committed: &Rectangle) -> Outcome {
        if self.state.in_gesture() {
            self.resync(committed);
        }
        self.set_state(InteractionState::Idle);
        Outcome::none()
    }

    // --- Drag ---

    pub fn on_drag_start(&mut self) -> Outcome {
        if self.state != InteractionState::Selected {
            return self.ignored("drag-start");
        }
        let Some(node) = self.node else {
            return self.ignored("drag-start");
        };
        self.set_state(InteractionState::Dragging { live: node.unit_scale() });
        Outcome::none()
    }

    /// A drag tick. The position is clamped again here so an unbounded
    /// rendering layer still cannot push the shape off the stage.
    pub fn on_drag_move(&mut self, committed: &Rectangle, live: NodeTransform, stage: Size) -> Outcome {
        if !matches!(self.state, InteractionState::Dragging { .. }) || !self.accepts(&live) {
            return self.ignored("drag-move");
        }
        let live = Self::bounded(committed, live, stage);
        self.state = InteractionState::Dragging { live };
        self.node = Some(live);
        Outcome::live(committed.placed(live.anchor(), committed.rotation))
    }

    /// Drag release: the only point a drag commits.
    pub fn on_drag_end(&mut self, committed: &Rectangle, live: NodeTransform, stage: Size) -> Outcome {
        if !matches!(self.state, InteractionState::Dragging { .. }) || !self.accepts(&live) {
            return self.ignored("drag-end");
        }
        let live = Self::bounded(committed, live, stage);
        let rect = committed.placed(live.anchor(), committed.rotation);
        self.resync(&rect);
        self.set_state(InteractionState::Selected);
        debug!(id = %self.id, x = rect.x, y = rect.y, "drag committed");
        Outcome::commit(rect)
    }

    /// The drag was interrupted (e.g. pointer capture lost). Nothing commits
    /// and the node snaps back to the committed record.
    pub fn on_drag_cancel(&mut self, committed: &Rectangle) -> Outcome {
        if !matches!(self.state, InteractionState::Dragging { .. }) {
            return self.ignored("drag-cancel");
        }
        self.resync(committed);
        self.set_state(InteractionState::Selected);
        Outcome::none()
    }

    // --- Rotate ---

    pub fn on_transform_start(&mut self) -> Outcome {
        if self.state != InteractionState::Selected {
            return self.ignored("transform-start");
        }
        let Some(node) = self.node else {
            return self.ignored("transform-start");
        };
        self.set_state(InteractionState::Rotating { live: node });
        Outcome::none()
    }

    /// A rotate tick. The live transform may carry incidental scale; the
    /// preview record never does.
    pub fn on_transform_move(&mut self, committed: &Rectangle, live: NodeTransform) -> Outcome {
        if !matches!(self.state, InteractionState::Rotating { .. }) || !self.accepts(&live) {
            return self.ignored("transform-move");
        }
        self.state = InteractionState::Rotating { live };
        self.node = Some(live);
        Outcome::live(live.to_rect(committed))
    }

    /// Rotate release: commits position and rotation, resets node scale to 1.
    pub fn on_transform_end(&mut self, committed: &Rectangle, live: NodeTransform) -> Outcome {
        if !matches!(self.state, InteractionState::Rotating { .. }) || !self.accepts(&live) {
            return self.ignored("transform-end");
        }
        let rect = live.to_rect(committed);
        self.resync(&rect);
        self.set_state(InteractionState::Selected);
        debug!(id = %self.id, rotation = rect.rotation, "rotation committed");
        Outcome::commit(rect)
    }

    // --- Flip ---

    /// Flip control activated: turn 180° about the center and commit at once.
    pub fn on_flip(&mut self, committed: &Rectangle) -> Outcome {
        if self.state != InteractionState::Selected {
            return self.ignored("flip");
        }
        let rect = flip_180(committed);
        if self.node.is_some() {
            self.resync(&rect);
        }
        debug!(id = %self.id, rotation = rect.rotation, "flip committed");
        Outcome::commit(rect)
    }

    // --- External updates ---

    /// The host replaced this rectangle for reasons outside the gesture.
    /// The node and overlay follow the new record; scale resets; a running
    /// gesture is dropped since its base record is gone.
    pub fn on_external_update(&mut self, committed: &Rectangle) -> Outcome {
        if self.node.is_some() {
            self.resync(committed);
        }
        if self.state.in_gesture() {
            self.set_state(InteractionState::Selected);
        }
        Outcome::none()
    }

    // --- Derived views ---

    /// The transform the shape is currently shown at.
    #[must_use]
    pub fn shown_transform(&self, committed: &Rectangle) -> NodeTransform {
        self.state.live().unwrap_or_else(|| NodeTransform::from_rect(committed))
    }

    /// Overlay for the current frame, or `None` when not selected.
    #[must_use]
    pub fn overlay(&self, committed: &Rectangle) -> Option<Overlay> {
        if !self.state.is_selected() {
            return None;
        }
        let size = Size::new(committed.width, committed.height);
        Some(Overlay::derive(self.id, size, &self.shown_transform(committed)))
    }

    // --- Internals ---

    fn bounded(committed: &Rectangle, live: NodeTransform, stage: Size) -> NodeTransform {
        let clamped = drag_bound(live.anchor(), live.scaled_size(committed), stage);
        NodeTransform { x: clamped.x, y: clamped.y, ..live }
    }

    fn accepts(&self, live: &NodeTransform) -> bool {
        if self.node.is_none() {
            return false;
        }
        if !live.is_finite() {
            warn!(id = %self.id, ?live, "non-finite node transform");
            return false;
        }
        true
    }

    fn resync(&mut self, committed: &Rectangle) {
        self.node = Some(NodeTransform::from_rect(committed));
    }

    fn set_state(&mut self, next: InteractionState) {
        if self.state.name() != next.name() {
            debug!(id = %self.id, from = self.state.name(), to = next.name(), "shape state");
        }
        self.state = next;
    }

    fn ignored(&self, event: &'static str) -> Outcome {
        debug!(id = %self.id, event, state = self.state.name(), attached = self.node.is_some(), "event ignored");
        Outcome::none()
    }
}
