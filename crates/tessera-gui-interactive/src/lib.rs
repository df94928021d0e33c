//! # tessera-gui-interactive
//!
//! Widget state machines for tessera-gui.
//!
//! Every widget here takes normalized [`tessera_gui::Event`]s one at a time,
//! updates its own state, and reports what happened through a small response
//! struct. Rendering appends to a [`tessera_gui::DrawSink`] once per frame.

mod button;
mod button_selector;
mod button_window;
mod color_picker;
mod command_line;
mod context_menu;
mod message_box;
mod option_buttons;
mod option_slider;
mod overlay_message;
mod scrollbar;
mod selection;
mod tab_window;
mod text_input;
mod tooltip;

pub use button::*;
pub use button_selector::*;
pub use button_window::*;
pub use color_picker::*;
pub use command_line::*;
pub use context_menu::*;
pub use message_box::*;
pub use option_buttons::*;
pub use option_slider::*;
pub use overlay_message::*;
pub use scrollbar::*;
pub use selection::*;
pub use tab_window::*;
pub use text_input::*;
pub use tooltip::*;
