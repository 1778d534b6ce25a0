//! Pure geometric operations over [`Rectangle`].
//!
//! None of these touch rendering state. The anchor of a rectangle is always
//! its un-rotated top-left corner, so anything that turns a shape about its
//! center has to move the anchor as well.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use crate::doc::Rectangle;
use crate::geom::{Point, normalize_rotation, rotate_vector};

/// Vector from the anchor to the geometric center, turned by the rotation.
#[must_use]
pub fn half_diagonal(rect: &Rectangle) -> Point {
    rotate_vector(rect.width / 2.0, rect.height / 2.0, rect.rotation)
}

/// Geometric center of the rectangle in stage space.
#[must_use]
pub fn compute_center(rect: &Rectangle) -> Point {
    let v = half_diagonal(rect);
    Point::new(rect.x + v.x, rect.y + v.y)
}

/// Turn the rectangle 180° about its own center.
///
/// The new anchor is the old anchor reflected through the center, i.e. the
/// old anchor plus twice the rotated half diagonal.
#[must_use]
pub fn flip_180(rect: &Rectangle) -> Rectangle {
    let v = half_diagonal(rect);
    Rectangle {
        x: rect.x + 2.0 * v.x,
        y: rect.y + 2.0 * v.y,
        rotation: normalize_rotation(rect.rotation + 180.0),
        ..rect.clone()
    }
}

/// Clamp a proposed anchor so the un-rotated `width` x `height` box stays
/// inside `[0, bounds_width] x [0, bounds_height]`.
///
/// This checks the axis-aligned box of the unrotated size, not the rotated
/// footprint, so a turned shape can still poke past the stage edge. When the
/// container is smaller than the shape the upper bound goes negative and wins:
/// the result is exactly `bounds - size`.
#[must_use]
pub fn clamp_to_bounds(
    proposed_x: f64,
    proposed_y: f64,
    width: f64,
    height: f64,
    bounds_width: f64,
    bounds_height: f64,
) -> Point {
    Point::new(clamp_axis(proposed_x, width, bounds_width), clamp_axis(proposed_y, height, bounds_height))
}

// Lower bound first, then upper, so a negative upper bound overrides 0.
// f64::clamp would panic here when max < min.
fn clamp_axis(proposed: f64, size: f64, bound: f64) -> f64 {
    let max = bound - size;
    let mut v = proposed;
    if v < 0.0 {
        v = 0.0;
    }
    if v > max {
        v = max;
    }
    v
}
