//! Document model: the annotation rectangle and the host's ordered collection.
//!
//! `Rectangle` is the only entity. Its `x`/`y` are the un-rotated top-left
//! anchor, not the center, and its size is fixed for life. The host owns a
//! `RectStore` as the single source of truth and only ever replaces whole
//! records in it; controllers never keep their own copy past a gesture.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{DEFAULT_FILL, DEFAULT_RECT_SIZE, DEFAULT_STROKE_WIDTH};
use crate::geom::{Point, Size, normalize_rotation};

/// Unique identifier for a rectangle.
pub type RectId = Uuid;

/// Rejected rectangle input. The core never produces these itself; they guard
/// construction so that malformed numbers never reach the geometry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RectError {
    /// A coordinate, size, or angle was NaN or infinite.
    #[error("{field} must be finite")]
    NonFinite { field: &'static str },

    /// Width or height was zero or negative.
    #[error("rectangle size must be positive, got {width}x{height}")]
    NonPositiveSize { width: f64, height: f64 },

    /// An update tried to change the size of an existing rectangle.
    #[error("rectangle {id} cannot be resized")]
    SizeChanged { id: RectId },
}

/// An annotation region as stored by the host and on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rectangle {
    /// Assigned at creation, never changes.
    pub id: RectId,
    /// Un-rotated top-left anchor, stage x.
    pub x: f64,
    /// Un-rotated top-left anchor, stage y.
    pub y: f64,
    /// Fixed at creation.
    pub width: f64,
    /// Fixed at creation.
    pub height: f64,
    /// Clockwise degrees about the anchor, kept in `[0, 360)`.
    pub rotation: f64,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
}

impl Rectangle {
    /// Create an unrotated rectangle with a fresh id and default presentation.
    ///
    /// # Errors
    ///
    /// Returns [`RectError`] if any value is non-finite or the size is not positive.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Result<Self, RectError> {
        check_finite("x", x)?;
        check_finite("y", y)?;
        check_finite("width", width)?;
        check_finite("height", height)?;
        if width <= 0.0 || height <= 0.0 {
            return Err(RectError::NonPositiveSize { width, height });
        }
        Ok(Self {
            id: Uuid::new_v4(),
            x,
            y,
            width,
            height,
            rotation: 0.0,
            fill: DEFAULT_FILL.to_owned(),
            stroke: String::from("#000000"),
            stroke_width: DEFAULT_STROKE_WIDTH,
        })
    }

    /// Build the record for "add rectangle": centered on the stage, unrotated,
    /// transparent, with the given stroke color.
    ///
    /// # Errors
    ///
    /// Returns [`RectError`] if `defaults` or `stage` carry unusable numbers.
    pub fn centered(stage: Size, defaults: &RectDefaults, stroke: String) -> Result<Self, RectError> {
        let center = stage.center();
        let half = defaults.size / 2.0;
        let mut rect = Self::new(center.x - half, center.y - half, defaults.size, defaults.size)?;
        check_finite("stroke_width", defaults.stroke_width)?;
        rect.stroke = stroke;
        rect.stroke_width = defaults.stroke_width;
        Ok(rect)
    }

    /// Return a copy turned to `rotation` degrees (normalized).
    ///
    /// # Errors
    ///
    /// Returns [`RectError::NonFinite`] for a NaN or infinite angle.
    pub fn with_rotation(mut self, rotation: f64) -> Result<Self, RectError> {
        check_finite("rotation", rotation)?;
        self.rotation = normalize_rotation(rotation);
        Ok(self)
    }

    /// Check a record that arrived from outside (deserialized, or built by
    /// hand) before it enters the collection.
    ///
    /// # Errors
    ///
    /// Returns [`RectError`] if any geometric field is non-finite or the size is not positive.
    pub fn validate(&self) -> Result<(), RectError> {
        check_finite("x", self.x)?;
        check_finite("y", self.y)?;
        check_finite("width", self.width)?;
        check_finite("height", self.height)?;
        check_finite("rotation", self.rotation)?;
        check_finite("stroke_width", self.stroke_width)?;
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(RectError::NonPositiveSize { width: self.width, height: self.height });
        }
        Ok(())
    }

    /// The anchor as a point.
    #[must_use]
    pub fn anchor(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Copy of this record moved to `anchor` and turned to `rotation`.
    ///
    /// Size, id, and presentation are carried over untouched.
    #[must_use]
    pub fn placed(&self, anchor: Point, rotation: f64) -> Self {
        Self { x: anchor.x, y: anchor.y, rotation: normalize_rotation(rotation), ..self.clone() }
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<(), RectError> {
    if value.is_finite() { Ok(()) } else { Err(RectError::NonFinite { field }) }
}

/// Size and stroke applied to rectangles created by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectDefaults {
    pub size: f64,
    pub stroke_width: f64,
}

impl Default for RectDefaults {
    fn default() -> Self {
        Self { size: DEFAULT_RECT_SIZE, stroke_width: DEFAULT_STROKE_WIDTH }
    }
}

/// A random opaque `#rrggbb` color for a new rectangle's stroke.
pub fn random_stroke_color<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("#{:06x}", rng.random_range(0..=0x00FF_FFFF_u32))
}

/// The host's ordered rectangle collection.
///
/// Order is draw order: later entries are drawn above earlier ones.
#[derive(Debug, Clone, Default)]
pub struct RectStore {
    rects: Vec<Rectangle>,
}

impl RectStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { rects: Vec::new() }
    }

    /// Append a rectangle on top of the others. A record with the same id is
    /// replaced in place instead.
    pub fn push(&mut self, rect: Rectangle) {
        if !self.replace(rect.clone()) {
            self.rects.push(rect);
        }
    }

    /// Replace the record with the same id. Returns false if there is none.
    pub fn replace(&mut self, rect: Rectangle) -> bool {
        let Some(slot) = self.rects.iter_mut().find(|r| r.id == rect.id) else {
            return false;
        };
        *slot = rect;
        true
    }

    /// Remove a rectangle by id, returning it if it was present.
    pub fn remove(&mut self, id: &RectId) -> Option<Rectangle> {
        let idx = self.rects.iter().position(|r| r.id == *id)?;
        Some(self.rects.remove(idx))
    }

    /// Return a reference to a rectangle by id.
    #[must_use]
    pub fn get(&self, id: &RectId) -> Option<&Rectangle> {
        self.rects.iter().find(|r| r.id == *id)
    }

    /// Rectangles in draw order, bottom first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Rectangle> {
        self.rects.iter()
    }

    /// Rectangles in hit-test order, top first.
    pub fn iter_topmost(&self) -> impl Iterator<Item = &Rectangle> {
        self.rects.iter().rev()
    }

    /// Snapshot of the whole collection.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Rectangle> {
        self.rects.clone()
    }

    /// Number of rectangles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// Returns `true` if the store holds no rectangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}
