//! Interaction core for annotating a video frame with rotatable rectangles.
//!
//! The host owns the rectangle collection and the drawing surface. This crate
//! owns everything in between: per-shape interaction state, live gesture
//! previews, bounds clamping, the 180° flip, and the selection overlay. Every
//! input handler returns a list of [`engine::Action`]s for the host to apply.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::EditorCore`]: collection, selection, and event routing |
//! | [`controller`] | Per-shape interaction state machine |
//! | [`doc`] | Rectangle records and the ordered store |
//! | [`model`] | Center, flip, and clamp geometry |
//! | [`node`] | Live transform of a rendered shape and the drag-bound hook |
//! | [`overlay`] | Selection overlay derived from the shown transform |
//! | [`input`] | Interaction states and UI state |
//! | [`hit`] | Hit-testing against shapes and overlay controls |
//! | [`style`] | Stroke, shadow, and open-frame outline hints |
//! | [`geom`] | Points, sizes, and rotation helpers |
//! | [`consts`] | Shared numeric constants |

pub mod consts;
pub mod controller;
pub mod doc;
pub mod engine;
pub mod geom;
pub mod hit;
pub mod input;
pub mod model;
pub mod node;
pub mod overlay;
pub mod style;
