//! # tessera-gui-winit
//!
//! Translates winit window events into normalized [`tessera_gui::Event`]s.
//!
//! This is the only crate in the workspace that touches a window-system type.

mod input;

pub use input::*;
