#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::doc::{RectId, RectStore, Rectangle};
use crate::geom::{Point, stage_to_local};
use crate::overlay::Overlay;

/// Which part of a shape was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    RotateHandle,
    FlipControl,
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub rect_id: RectId,
    pub part: HitPart,
}

/// Whether `pt` falls inside the full filled rectangle, interior included.
///
/// The decorative outline leaves gaps in the top and bottom edges; those do
/// not matter here.
#[must_use]
pub fn contains(rect: &Rectangle, pt: Point) -> bool {
    let local = stage_to_local(rect.anchor(), rect.rotation, pt);
    (0.0..=rect.width).contains(&local.x) && (0.0..=rect.height).contains(&local.y)
}

/// Find what is under `pt`: the selected shape's overlay controls first (the
/// flip control is drawn over the rotate handle), then shape bodies from the
/// top of the draw order down.
#[must_use]
pub fn hit_test(pt: Point, store: &RectStore, overlay: Option<&Overlay>) -> Option<Hit> {
    if let Some(o) = overlay {
        if o.hits_flip_control(pt) {
            return Some(Hit { rect_id: o.id, part: HitPart::FlipControl });
        }
        if o.hits_rotate_handle(pt) {
            return Some(Hit { rect_id: o.id, part: HitPart::RotateHandle });
        }
    }
    store
        .iter_topmost()
        .find(|r| contains(r, pt))
        .map(|r| Hit { rect_id: r.id, part: HitPart::Body })
}
