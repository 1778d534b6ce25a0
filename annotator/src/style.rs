//! Presentation hints for the rendering layer.
//!
//! A region is drawn as an open frame: both sides in full, but the middle
//! 40% of the top and bottom edges left out. This is purely cosmetic; hit
//! testing and geometry always use the full rectangle.

#[cfg(test)]
#[path = "style_test.rs"]
mod style_test;

use serde::Serialize;

use crate::consts::{
    DEFAULT_STROKE_WIDTH, OUTLINE_GAP_RATIO, SELECTED_SHADOW_BLUR, SELECTED_SHADOW_OPACITY, SELECTED_STROKE_BOOST,
};
use crate::doc::Rectangle;
use crate::geom::Point;

/// A straight stroke in the shape's local frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { from: Point::new(x0, y0), to: Point::new(x1, y1) }
    }
}

/// The six strokes of the open frame for a `width` x `height` shape.
#[must_use]
pub fn frame_segments(width: f64, height: f64) -> [Segment; 6] {
    let gap_start = width * (0.5 - OUTLINE_GAP_RATIO / 2.0);
    let gap_end = width * (0.5 + OUTLINE_GAP_RATIO / 2.0);
    [
        Segment::new(0.0, 0.0, 0.0, height),
        Segment::new(width, 0.0, width, height),
        Segment::new(0.0, 0.0, gap_start, 0.0),
        Segment::new(gap_end, 0.0, width, 0.0),
        Segment::new(0.0, height, gap_start, height),
        Segment::new(gap_end, height, width, height),
    ]
}

/// How to stroke a shape this frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeStyle {
    pub stroke: String,
    pub stroke_width: f64,
    pub shadow_blur: f64,
    pub shadow_opacity: f64,
}

/// Stroke and shadow for `rect`; selected shapes get a heavier stroke and a
/// soft shadow. A zero stroke width falls back to the default.
#[must_use]
pub fn shape_style(rect: &Rectangle, selected: bool) -> ShapeStyle {
    let base = if rect.stroke_width > 0.0 { rect.stroke_width } else { DEFAULT_STROKE_WIDTH };
    if selected {
        ShapeStyle {
            stroke: rect.stroke.clone(),
            stroke_width: base + SELECTED_STROKE_BOOST,
            shadow_blur: SELECTED_SHADOW_BLUR,
            shadow_opacity: SELECTED_SHADOW_OPACITY,
        }
    } else {
        ShapeStyle { stroke: rect.stroke.clone(), stroke_width: base, shadow_blur: 0.0, shadow_opacity: 0.0 }
    }
}
