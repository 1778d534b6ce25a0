use std::collections::HashMap;

use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};

use crate::controller::{Outcome, ShapeController};
use crate::doc::{RectDefaults, RectError, RectId, RectStore, Rectangle, random_stroke_color};
use crate::geom::{Point, Size, normalize_rotation};
use crate::hit::{Hit, HitPart, hit_test};
use crate::input::{Cursor, InteractionState, UiState};
use crate::node::{NodeTransform, drag_bound};
use crate::overlay::Overlay;
use crate::style::{ShapeStyle, shape_style};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    RectCreated { rect: Rectangle },
    /// A rectangle was replaced in the collection at the end of a gesture.
    RectCommitted { rect: Rectangle },
    RectRemoved { id: RectId },
    /// Uncommitted state to draw while a gesture runs.
    LivePreview { rect: Rectangle },
    SelectionChanged { id: Option<RectId> },
    OverlayChanged { overlay: Option<Overlay> },
    SetCursor { cursor: Cursor },
    RenderNeeded,
}

/// Editor state: the host collection, one controller per rectangle, and the
/// single selection.
///
/// All methods are synchronous and handle one event each. The collection is
/// only ever changed by whole-record replacement.
pub struct EditorCore {
    store: RectStore,
    controllers: HashMap<RectId, ShapeController>,
    pub ui: UiState,
    stage: Size,
    defaults: RectDefaults,
}

impl Default for EditorCore {
    fn default() -> Self {
        Self::with_config(Size::default(), RectDefaults::default())
    }
}

impl EditorCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(stage: Size, defaults: RectDefaults) -> Self {
        Self { store: RectStore::new(), controllers: HashMap::new(), ui: UiState::default(), stage, defaults }
    }

    // --- Collection ---

    /// Add a default rectangle centered on the stage with a random stroke.
    ///
    /// # Errors
    ///
    /// Returns [`RectError`] if the configured defaults cannot form a rectangle.
    pub fn add_rect<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Vec<Action>, RectError> {
        let rect = Rectangle::centered(self.stage, &self.defaults, random_stroke_color(rng))?;
        self.insert_rect(rect)
    }

    /// Insert a rectangle built by the host. An existing id is treated as an
    /// external replacement.
    ///
    /// # Errors
    ///
    /// Returns [`RectError`] if the record fails validation.
    pub fn insert_rect(&mut self, rect: Rectangle) -> Result<Vec<Action>, RectError> {
        if self.store.get(&rect.id).is_some() {
            return self.replace_external(rect);
        }
        rect.validate()?;
        let rect = Rectangle { rotation: normalize_rotation(rect.rotation), ..rect };
        let mut ctrl = ShapeController::new(rect.id);
        ctrl.attach_node(&rect);
        self.controllers.insert(rect.id, ctrl);
        self.store.push(rect.clone());
        debug!(id = %rect.id, x = rect.x, y = rect.y, "rect created");
        Ok(vec![Action::RectCreated { rect }, Action::RenderNeeded])
    }

    /// Remove a rectangle, dropping the selection if it was selected.
    pub fn remove_rect(&mut self, id: &RectId) -> Vec<Action> {
        if self.store.remove(id).is_none() {
            return Vec::new();
        }
        self.controllers.remove(id);
        let mut actions = vec![Action::RectRemoved { id: *id }];
        if self.ui.selected_id == Some(*id) {
            self.ui.selected_id = None;
            actions.push(Action::SelectionChanged { id: None });
            actions.push(Action::OverlayChanged { overlay: None });
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// The host replaced a rectangle for reasons outside any gesture (e.g.
    /// programmatic repositioning). Size must not change.
    ///
    /// # Errors
    ///
    /// Returns [`RectError`] if the record is invalid or resizes the rectangle.
    #[allow(clippy::float_cmp)]
    pub fn replace_external(&mut self, rect: Rectangle) -> Result<Vec<Action>, RectError> {
        rect.validate()?;
        let Some(existing) = self.store.get(&rect.id) else {
            warn!(id = %rect.id, "external update for unknown rect");
            return Ok(Vec::new());
        };
        if existing.width != rect.width || existing.height != rect.height {
            return Err(RectError::SizeChanged { id: rect.id });
        }
        let rect = Rectangle { rotation: normalize_rotation(rect.rotation), ..rect };
        let id = rect.id;
        Ok(self.dispatch(&id, move |ctrl, _, _| {
            ctrl.on_external_update(&rect);
            Outcome::commit(rect)
        }))
    }

    // --- Stage ---

    pub fn set_stage_size(&mut self, stage: Size) -> Vec<Action> {
        self.stage = stage;
        vec![Action::RenderNeeded]
    }

    /// The rendering layer mounted the node for `id`.
    pub fn attach_node(&mut self, id: &RectId) {
        if let (Some(rect), Some(ctrl)) = (self.store.get(id), self.controllers.get_mut(id)) {
            ctrl.attach_node(rect);
        }
    }

    /// The rendering layer unmounted the node for `id`.
    pub fn detach_node(&mut self, id: &RectId) -> Vec<Action> {
        self.dispatch(id, |ctrl, _, _| {
            ctrl.detach_node();
            Outcome::none()
        })
    }

    // --- Pointer ---

    /// Pointer or touch down anywhere on the stage.
    pub fn pointer_down(&mut self, pt: Point) -> Vec<Action> {
        let overlay = self.overlay();
        match hit_test(pt, &self.store, overlay.as_ref()) {
            Some(Hit { rect_id, part: HitPart::FlipControl }) => self.flip(&rect_id),
            // The rendering layer starts the rotate gesture itself.
            Some(Hit { part: HitPart::RotateHandle, .. }) => Vec::new(),
            Some(Hit { rect_id, part: HitPart::Body }) => self.select(&rect_id),
            None => self.deselect(),
        }
    }

    /// Pointer moved without a button: update the cursor over the flip control.
    pub fn pointer_hover(&mut self, pt: Point) -> Vec<Action> {
        let over_flip = self.overlay().is_some_and(|o| o.hits_flip_control(pt));
        let cursor = if over_flip { Cursor::Pointer } else { Cursor::Default };
        if cursor == self.ui.cursor {
            return Vec::new();
        }
        self.ui.cursor = cursor;
        vec![Action::SetCursor { cursor }]
    }

    /// Make `id` the single selected rectangle.
    pub fn select(&mut self, id: &RectId) -> Vec<Action> {
        if self.store.get(id).is_none() || self.ui.selected_id == Some(*id) {
            return Vec::new();
        }
        if let Some(prev) = self.ui.selected_id.take() {
            if let (Some(rect), Some(ctrl)) = (self.store.get(&prev), self.controllers.get_mut(&prev)) {
                ctrl.on_deselect(rect);
            }
        }
        if let Some(ctrl) = self.controllers.get_mut(id) {
            ctrl.on_select();
        }
        self.ui.selected_id = Some(*id);
        vec![
            Action::SelectionChanged { id: Some(*id) },
            Action::OverlayChanged { overlay: self.overlay() },
            Action::RenderNeeded,
        ]
    }

    /// Clear the selection. Any live gesture is discarded.
    pub fn deselect(&mut self) -> Vec<Action> {
        let Some(prev) = self.ui.selected_id.take() else {
            return Vec::new();
        };
        if let (Some(rect), Some(ctrl)) = (self.store.get(&prev), self.controllers.get_mut(&prev)) {
            ctrl.on_deselect(rect);
        }
        vec![
            Action::SelectionChanged { id: None },
            Action::OverlayChanged { overlay: None },
            Action::RenderNeeded,
        ]
    }

    // --- Drag ---

    /// Drag-bound hook for the rendering layer. Unknown ids pass through.
    #[must_use]
    pub fn drag_bound(&self, id: &RectId, proposed: Point) -> Point {
        let Some(rect) = self.store.get(id) else {
            return proposed;
        };
        let node = self.controllers.get(id).and_then(ShapeController::node);
        let size = node.map_or(Size::new(rect.width, rect.height), |n| n.scaled_size(rect));
        drag_bound(proposed, size, self.stage)
    }

    pub fn drag_start(&mut self, id: &RectId) -> Vec<Action> {
        self.dispatch(id, |ctrl, _, _| ctrl.on_drag_start())
    }

    pub fn drag_move(&mut self, id: &RectId, live: NodeTransform) -> Vec<Action> {
        self.dispatch(id, |ctrl, rect, stage| ctrl.on_drag_move(rect, live, stage))
    }

    pub fn drag_end(&mut self, id: &RectId, live: NodeTransform) -> Vec<Action> {
        self.dispatch(id, |ctrl, rect, stage| ctrl.on_drag_end(rect, live, stage))
    }

    pub fn drag_cancel(&mut self, id: &RectId) -> Vec<Action> {
        self.dispatch(id, |ctrl, rect, _| ctrl.on_drag_cancel(rect))
    }

    // --- Rotate ---

    pub fn transform_start(&mut self, id: &RectId) -> Vec<Action> {
        self.dispatch(id, |ctrl, _, _| ctrl.on_transform_start())
    }

    pub fn transform_move(&mut self, id: &RectId, live: NodeTransform) -> Vec<Action> {
        self.dispatch(id, |ctrl, rect, _| ctrl.on_transform_move(rect, live))
    }

    pub fn transform_end(&mut self, id: &RectId, live: NodeTransform) -> Vec<Action> {
        self.dispatch(id, |ctrl, rect, _| ctrl.on_transform_end(rect, live))
    }

    // --- Flip ---

    pub fn flip(&mut self, id: &RectId) -> Vec<Action> {
        self.dispatch(id, |ctrl, rect, _| ctrl.on_flip(rect))
    }

    // --- Queries ---

    /// The currently selected rectangle, if any.
    #[must_use]
    pub fn selection(&self) -> Option<RectId> {
        self.ui.selected_id
    }

    #[must_use]
    pub fn rect(&self, id: &RectId) -> Option<&Rectangle> {
        self.store.get(id)
    }

    /// Rectangles in draw order.
    pub fn rects(&self) -> impl Iterator<Item = &Rectangle> {
        self.store.iter()
    }

    /// Snapshot of the collection.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Rectangle> {
        self.store.to_vec()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    #[must_use]
    pub fn stage(&self) -> Size {
        self.stage
    }

    #[must_use]
    pub fn state(&self, id: &RectId) -> Option<InteractionState> {
        self.controllers.get(id).map(ShapeController::state)
    }

    /// Overlay of the selected rectangle for the current frame.
    #[must_use]
    pub fn overlay(&self) -> Option<Overlay> {
        let id = self.ui.selected_id?;
        self.overlay_of(&id)
    }

    /// Stroke and shadow the rendering layer should use for `id`.
    #[must_use]
    pub fn shape_style(&self, id: &RectId) -> Option<ShapeStyle> {
        let rect = self.store.get(id)?;
        Some(shape_style(rect, self.ui.selected_id == Some(*id)))
    }

    // --- Internals ---

    fn overlay_of(&self, id: &RectId) -> Option<Overlay> {
        let rect = self.store.get(id)?;
        self.controllers.get(id)?.overlay(rect)
    }

    /// Run one controller event and turn its outcome into host actions.
    fn dispatch<F>(&mut self, id: &RectId, f: F) -> Vec<Action>
    where
        F: FnOnce(&mut ShapeController, &Rectangle, Size) -> Outcome,
    {
        let stage = self.stage;
        let before = self.overlay_of(id);
        let (Some(rect), Some(ctrl)) = (self.store.get(id), self.controllers.get_mut(id)) else {
            return Vec::new();
        };
        let outcome = f(ctrl, rect, stage);

        let mut actions = Vec::new();
        if let Some(live) = outcome.live {
            actions.push(Action::LivePreview { rect: live });
        }
        if let Some(commit) = outcome.commit {
            if self.store.replace(commit.clone()) {
                actions.push(Action::RectCommitted { rect: commit });
            }
        }
        let after = self.overlay_of(id);
        if after != before {
            actions.push(Action::OverlayChanged { overlay: after });
        }
        if !actions.is_empty() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }
}
