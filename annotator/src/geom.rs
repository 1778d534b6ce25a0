//! Plane geometry shared by the model, overlay, and hit testing.
//!
//! All coordinates are stage pixels with y pointing down, so a positive
//! rotation turns clockwise on screen.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A point or vector in stage space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Width and height of a shape, the stage, or any container, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Center of a box of this size placed at the origin.
    #[must_use]
    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Defaults to the video stage.
impl Default for Size {
    fn default() -> Self {
        Self::new(crate::consts::DEFAULT_STAGE_WIDTH, crate::consts::DEFAULT_STAGE_HEIGHT)
    }
}

/// Fold any angle in degrees into `[0, 360)`.
#[must_use]
pub fn normalize_rotation(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid can round a tiny negative input up to exactly 360.0, and
    // keeps the sign of -0.0.
    if r >= 360.0 || r == 0.0 { 0.0 } else { r }
}

/// Rotate the vector `(dx, dy)` clockwise by `deg` degrees.
#[must_use]
pub fn rotate_vector(dx: f64, dy: f64, deg: f64) -> Point {
    let (sin, cos) = deg.to_radians().sin_cos();
    Point::new(dx * cos - dy * sin, dx * sin + dy * cos)
}

/// Map a point in a shape's local (un-rotated) frame to stage space.
///
/// The frame's origin is `anchor` and its axes are turned by `rotation`.
#[must_use]
pub fn local_to_stage(anchor: Point, rotation: f64, local: Point) -> Point {
    let v = rotate_vector(local.x, local.y, rotation);
    Point::new(anchor.x + v.x, anchor.y + v.y)
}

/// Inverse of [`local_to_stage`].
#[must_use]
pub fn stage_to_local(anchor: Point, rotation: f64, stage: Point) -> Point {
    rotate_vector(stage.x - anchor.x, stage.y - anchor.y, -rotation)
}
