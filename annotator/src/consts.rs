//! Shared numeric constants for the annotator crate.

// ── Stage ───────────────────────────────────────────────────────

/// Default stage width in pixels (the video frame the regions sit on).
pub const DEFAULT_STAGE_WIDTH: f64 = 640.0;

/// Default stage height in pixels.
pub const DEFAULT_STAGE_HEIGHT: f64 = 360.0;

// ── New rectangles ──────────────────────────────────────────────

/// Side length of a freshly added rectangle.
pub const DEFAULT_RECT_SIZE: f64 = 100.0;

/// Stroke width applied to a freshly added rectangle.
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

/// Fill of a freshly added rectangle; regions are outlines only.
pub const DEFAULT_FILL: &str = "transparent";

// ── Overlay ─────────────────────────────────────────────────────

/// Distance of the flip control above the top edge, in the shape's local frame.
pub const FLIP_CONTROL_OFFSET: f64 = 40.0;

/// Radius of the circular flip control.
pub const FLIP_CONTROL_RADIUS: f64 = 14.0;

/// Distance of the rotate handle above the top edge, in the shape's local frame.
pub const ROTATE_HANDLE_OFFSET: f64 = 50.0;

/// Hit slop around the rotate handle.
pub const HANDLE_RADIUS: f64 = 8.0;

// ── Style ───────────────────────────────────────────────────────

/// Fraction of the top and bottom edges left open by the decorative frame.
pub const OUTLINE_GAP_RATIO: f64 = 0.4;

/// Extra stroke width drawn while a shape is selected.
pub const SELECTED_STROKE_BOOST: f64 = 2.0;

/// Shadow blur drawn while a shape is selected.
pub const SELECTED_SHADOW_BLUR: f64 = 10.0;

/// Shadow opacity drawn while a shape is selected.
pub const SELECTED_SHADOW_OPACITY: f64 = 0.6;
