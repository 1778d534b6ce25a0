//! Satellite overlay: selection outline, rotate handle, and flip control.
//!
//! The overlay is never stored or mutated on its own. It is recomputed from
//! whatever transform the shape currently shows (live during a gesture,
//! committed otherwise), so it cannot fall out of step with the shape.

#[cfg(test)]
#[path = "overlay_test.rs"]
mod overlay_test;

use serde::Serialize;

use crate::consts::{FLIP_CONTROL_OFFSET, FLIP_CONTROL_RADIUS, HANDLE_RADIUS, ROTATE_HANDLE_OFFSET};
use crate::doc::RectId;
use crate::geom::{Point, Size, local_to_stage, normalize_rotation};
use crate::node::NodeTransform;

/// Where the overlay controls of the selected shape sit, in stage space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Overlay {
    pub id: RectId,
    /// Overlay group origin; tracks the shape anchor.
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    /// Always 1; the overlay never inherits the node's scale.
    pub scale_x: f64,
    pub scale_y: f64,
    /// Center of the flip control.
    pub flip_control: Point,
    /// Center of the rotate handle.
    pub rotate_handle: Point,
    /// Selection outline corners, clockwise from the anchor.
    pub outline: [Point; 4],
}

impl Overlay {
    /// Derive the overlay for a `size` shape shown at `transform`.
    #[must_use]
    pub fn derive(id: RectId, size: Size, transform: &NodeTransform) -> Self {
        let anchor = transform.anchor();
        let rotation = normalize_rotation(transform.rotation);
        let at = |lx: f64, ly: f64| local_to_stage(anchor, rotation, Point::new(lx, ly));
        let (w, h) = (size.width, size.height);

        Self {
            id,
            x: anchor.x,
            y: anchor.y,
            rotation,
            scale_x: 1.0,
            scale_y: 1.0,
            flip_control: at(w / 2.0, -FLIP_CONTROL_OFFSET),
            rotate_handle: at(w / 2.0, -ROTATE_HANDLE_OFFSET),
            outline: [at(0.0, 0.0), at(w, 0.0), at(w, h), at(0.0, h)],
        }
    }

    #[must_use]
    pub fn hits_flip_control(&self, pt: Point) -> bool {
        self.flip_control.distance(pt) <= FLIP_CONTROL_RADIUS
    }

    #[must_use]
    pub fn hits_rotate_handle(&self, pt: Point) -> bool {
        self.rotate_handle.distance(pt) <= HANDLE_RADIUS
    }
}
