//! Interaction model: the per-shape gesture state machine states and the
//! UI state the host shows (selection, cursor).
//!
//! `InteractionState` is the session a single shape is in. The active gesture
//! variants carry the live node transform, which is the only place an
//! uncommitted position or rotation ever lives.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::Serialize;

use crate::doc::RectId;
use crate::node::NodeTransform;

/// Pointer cursor the host should show over the stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cursor {
    #[default]
    Default,
    /// Over a clickable control.
    Pointer,
}

/// Persistent UI state visible to the host.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// The id of the currently selected rectangle, if any.
    pub selected_id: Option<RectId>,
    pub cursor: Cursor,
}

/// Session state of one shape.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    /// Not selected; no overlay.
    #[default]
    Idle,
    /// Selected; overlay and flip control visible, no gesture running.
    Selected,
    /// The shape body is being dragged.
    Dragging {
        /// Last clamped node transform reported by the rendering layer.
        live: NodeTransform,
    },
    /// The rotate handle is being dragged.
    Rotating {
        /// Last node transform, possibly carrying incidental scale.
        live: NodeTransform,
    },
}

impl InteractionState {
    /// Whether the overlay should be shown.
    #[must_use]
    pub fn is_selected(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Whether a drag or rotate gesture is running.
    #[must_use]
    pub fn in_gesture(&self) -> bool {
        matches!(self, Self::Dragging { .. } | Self::Rotating { .. })
    }

    /// The uncommitted transform of a running gesture.
    #[must_use]
    pub fn live(&self) -> Option<NodeTransform> {
        match self {
            Self::Dragging { live } | Self::Rotating { live } => Some(*live),
            Self::Idle | Self::Selected => None,
        }
    }

    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Selected => "selected",
            Self::Dragging { .. } => "dragging",
            Self::Rotating { .. } => "rotating",
        }
    }
}
