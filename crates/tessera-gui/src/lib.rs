//! # tessera-gui
//!
//! Backend agnostic core of the tessera widget layer.
//!
//! Nothing in this crate talks to a window system or a GPU. Widgets receive
//! normalized [`Event`]s and append their visuals to a [`DrawSink`]; the
//! owning application translates OS input and submits the recorded geometry.
//!
//! ## Core Types
//!
//! - [`Widget`] - center position, size and the hover/enable flags shared by every widget
//! - [`ButtonLayout`] - uniform grid solver used to place buttons
//! - [`Event`] / [`Key`] - normalized keyboard, pointer and gamepad input
//! - [`DrawSink`] / [`DrawList`] - the render-append surface
//! - [`TextMeasure`] - font metrics supplied by the text backend
//! - [`Color`] and the [`theme`] palette

mod color;
mod draw;
mod error;
mod geometry;
mod input;
mod measure;

pub use color::*;
pub use draw::*;
pub use error::*;
pub use geometry::*;
pub use input::*;
pub use measure::*;

pub use glam::{IVec2, Vec2, Vec3};
