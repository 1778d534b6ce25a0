//! Adapter between the rendering layer's live node and the rectangle record.
//!
//! While a gesture is running the rendering layer owns a node whose position,
//! rotation, and scale can drift from the committed record. This module is
//! the only place that converts between the two, and it always drops scale:
//! resizing is disabled, so any scale the rotate handle introduces is noise.

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;

use serde::{Deserialize, Serialize};

use crate::doc::Rectangle;
use crate::geom::{Point, Size};
use crate::model::clamp_to_bounds;

/// Transform of a shape node as reported by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeTransform {
    pub x: f64,
    pub y: f64,
    /// Degrees, not necessarily normalized.
    pub rotation: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl NodeTransform {
    /// A unit-scale transform at `(x, y)` turned by `rotation`.
    #[must_use]
    pub fn at(x: f64, y: f64, rotation: f64) -> Self {
        Self { x, y, rotation, scale_x: 1.0, scale_y: 1.0 }
    }

    /// The node transform that renders `rect` exactly.
    #[must_use]
    pub fn from_rect(rect: &Rectangle) -> Self {
        Self::at(rect.x, rect.y, rect.rotation)
    }

    /// Same transform with the given scale factors.
    #[must_use]
    pub fn with_scale(self, scale_x: f64, scale_y: f64) -> Self {
        Self { scale_x, scale_y, ..self }
    }

    /// Same transform with scale reset to identity.
    #[must_use]
    pub fn unit_scale(self) -> Self {
        self.with_scale(1.0, 1.0)
    }

    #[must_use]
    pub fn anchor(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Whether every component is a usable number.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.rotation.is_finite()
            && self.scale_x.is_finite()
            && self.scale_y.is_finite()
    }

    /// On-screen size of `rect` under this node's scale.
    #[must_use]
    pub fn scaled_size(&self, rect: &Rectangle) -> Size {
        Size::new(rect.width * self.scale_x, rect.height * self.scale_y)
    }

    /// Fold this transform into `committed`: position and rotation come from
    /// the node, size and everything else from the record. Scale is dropped.
    #[must_use]
    pub fn to_rect(&self, committed: &Rectangle) -> Rectangle {
        committed.placed(self.anchor(), self.rotation)
    }
}

/// Drag-bound hook for the rendering layer, called on every drag tick.
///
/// Pure: clamps `proposed` so a `shape`-sized box stays inside `container`.
#[must_use]
pub fn drag_bound(proposed: Point, shape: Size, container: Size) -> Point {
    clamp_to_bounds(proposed.x, proposed.y, shape.width, shape.height, container.width, container.height)
}
