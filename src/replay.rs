//! Headless host for the editor core.
//!
//! A script is JSON lines, one step per line, tagged by `"op"`. Shapes are
//! named by the order they were added (`"rect": 0` is the first `add`). The
//! replayer plays the rendering layer's part: it routes drag positions
//! through the drag-bound hook before reporting them, exactly as a canvas
//! node would.

#[cfg(test)]
#[path = "replay_test.rs"]
mod replay_test;

use std::io::{self, BufRead, Write};

use annotator::doc::{RectId, Rectangle};
use annotator::engine::{Action, EditorCore};
use annotator::geom::{Point, Size};
use annotator::node::NodeTransform;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::check_positive;
use crate::error::ReplayError;

fn unit_scale() -> f64 {
    1.0
}

/// One line of a gesture script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Add a default rectangle centered on the stage.
    Add,
    PointerDown {
        x: f64,
        y: f64,
    },
    Hover {
        x: f64,
        y: f64,
    },
    DragStart {
        rect: usize,
    },
    /// Proposed anchor position; clamped by the drag-bound hook.
    DragMove {
        rect: usize,
        x: f64,
        y: f64,
    },
    DragEnd {
        rect: usize,
        x: f64,
        y: f64,
    },
    DragCancel {
        rect: usize,
    },
    RotateStart {
        rect: usize,
    },
    RotateMove {
        rect: usize,
        x: f64,
        y: f64,
        rotation: f64,
        #[serde(default = "unit_scale")]
        scale_x: f64,
        #[serde(default = "unit_scale")]
        scale_y: f64,
    },
    RotateEnd {
        rect: usize,
        x: f64,
        y: f64,
        rotation: f64,
        #[serde(default = "unit_scale")]
        scale_x: f64,
        #[serde(default = "unit_scale")]
        scale_y: f64,
    },
    Flip {
        rect: usize,
    },
    /// Out-of-gesture update from the host. Omitted fields keep their current
    /// value; width and height, when given, must match the current size.
    Replace {
        rect: usize,
        x: f64,
        y: f64,
        rotation: Option<f64>,
        width: Option<f64>,
        height: Option<f64>,
    },
    Remove {
        rect: usize,
    },
    ResizeStage {
        width: f64,
        height: f64,
    },
}

/// Counters reported when a replay finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub steps: usize,
    pub actions: usize,
}

/// Last line of the output: the collection after every step.
#[derive(Serialize)]
struct FinalState<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    rects: &'a [Rectangle],
}

/// Drives an [`EditorCore`] from script steps.
pub struct Replayer {
    core: EditorCore,
    ids: Vec<RectId>,
    rng: ChaCha8Rng,
}

impl Replayer {
    #[must_use]
    pub fn new(core: EditorCore, rng: ChaCha8Rng) -> Self {
        Self { core, ids: Vec::new(), rng }
    }

    #[must_use]
    pub fn core(&self) -> &EditorCore {
        &self.core
    }

    /// Read every step from `reader`, writing each emitted action and then
    /// the final collection to `out` as JSON lines. Blank lines are skipped.
    ///
    /// # Errors
    ///
    /// Stops at the first unreadable line, malformed step, unknown ordinal,
    /// or rejected rectangle.
    pub fn run<R: BufRead, W: Write>(&mut self, reader: R, out: &mut W) -> Result<ReplaySummary, ReplayError> {
        let mut summary = ReplaySummary::default();
        for (index, line) in reader.lines().enumerate() {
            let line_no = index + 1;
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let step: ScriptStep =
                serde_json::from_str(trimmed).map_err(|source| ReplayError::Json { line: line_no, source })?;
            debug!(line = line_no, ?step, "step");
            let actions = self.apply(line_no, step)?;
            for action in &actions {
                write_line(out, action)?;
            }
            summary.steps += 1;
            summary.actions += actions.len();
        }
        let rects = self.core.snapshot();
        write_line(out, &FinalState { kind: "final", rects: &rects })?;
        out.flush()?;
        Ok(summary)
    }

    /// Apply one step. `line` is only used for error reporting.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::UnknownRect`] for an ordinal that was never
    /// added, [`ReplayError::Rect`] when the core rejects a rectangle, and
    /// [`ReplayError::InvalidStep`] for a stage size that is not positive.
    pub fn apply(&mut self, line: usize, step: ScriptStep) -> Result<Vec<Action>, ReplayError> {
        let actions = match step {
            ScriptStep::Add => {
                let actions =
                    self.core.add_rect(&mut self.rng).map_err(|source| ReplayError::Rect { line, source })?;
                for action in &actions {
                    if let Action::RectCreated { rect } = action {
                        self.ids.push(rect.id);
                    }
                }
                actions
            }
            ScriptStep::PointerDown { x, y } => self.core.pointer_down(Point::new(x, y)),
            ScriptStep::Hover { x, y } => self.core.pointer_hover(Point::new(x, y)),
            ScriptStep::DragStart { rect } => {
                let id = self.id(line, rect)?;
                self.core.drag_start(&id)
            }
            ScriptStep::DragMove { rect, x, y } => {
                let id = self.id(line, rect)?;
                let live = self.dragged_node(&id, Point::new(x, y));
                self.core.drag_move(&id, live)
            }
            ScriptStep::DragEnd { rect, x, y } => {
                let id = self.id(line, rect)?;
                let live = self.dragged_node(&id, Point::new(x, y));
                self.core.drag_end(&id, live)
            }
            ScriptStep::DragCancel { rect } => {
                let id = self.id(line, rect)?;
                self.core.drag_cancel(&id)
            }
            ScriptStep::RotateStart { rect } => {
                let id = self.id(line, rect)?;
                self.core.transform_start(&id)
            }
            ScriptStep::RotateMove { rect, x, y, rotation, scale_x, scale_y } => {
                let id = self.id(line, rect)?;
                self.core.transform_move(&id, NodeTransform::at(x, y, rotation).with_scale(scale_x, scale_y))
            }
            ScriptStep::RotateEnd { rect, x, y, rotation, scale_x, scale_y } => {
                let id = self.id(line, rect)?;
                self.core.transform_end(&id, NodeTransform::at(x, y, rotation).with_scale(scale_x, scale_y))
            }
            ScriptStep::Flip { rect } => {
                let id = self.id(line, rect)?;
                self.core.flip(&id)
            }
            ScriptStep::Replace { rect, x, y, rotation, width, height } => {
                let id = self.id(line, rect)?;
                let Some(current) = self.core.rect(&id) else {
                    warn!(line, ordinal = rect, "replace for removed rect");
                    return Ok(Vec::new());
                };
                let mut next = current.placed(Point::new(x, y), rotation.unwrap_or(current.rotation));
                next.width = width.unwrap_or(next.width);
                next.height = height.unwrap_or(next.height);
                self.core.replace_external(next).map_err(|source| ReplayError::Rect { line, source })?
            }
            ScriptStep::Remove { rect } => {
                let id = self.id(line, rect)?;
                self.core.remove_rect(&id)
            }
            ScriptStep::ResizeStage { width, height } => {
                check_positive("width", width)
                    .and_then(|()| check_positive("height", height))
                    .map_err(|reason| ReplayError::InvalidStep { line, reason })?;
                self.core.set_stage_size(Size::new(width, height))
            }
        };
        Ok(actions)
    }

    fn id(&self, line: usize, ordinal: usize) -> Result<RectId, ReplayError> {
        self.ids.get(ordinal).copied().ok_or(ReplayError::UnknownRect { line, ordinal })
    }

    /// The node a renderer would report after its drag-bound hook ran.
    fn dragged_node(&self, id: &RectId, proposed: Point) -> NodeTransform {
        let bounded = self.core.drag_bound(id, proposed);
        let rotation = self.core.rect(id).map_or(0.0, |r| r.rotation);
        NodeTransform::at(bounded.x, bounded.y, rotation)
    }
}

fn write_line<W: Write, T: Serialize>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer(&mut *out, value)?;
    out.write_all(b"\n")
}
