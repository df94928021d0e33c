//! Winit input adapter for tessera-gui
//!
//! Converts winit window events to the normalized [`Event`] stream widgets
//! consume. Winit reports the cursor with y growing downward; events leave
//! here in y-up window coordinates. Gamepads are outside winit's scope and
//! need their own source of `Key::Gamepad` / `Event::GamepadAxis` events.

use tessera_gui::{Event, Key, MouseButton, NamedKey, Vec2};
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::Key as WinitKey;

/// Pixels of trackpad scroll that count as one wheel notch
pub const PIXELS_PER_LINE: f32 = 20.0;

/// Stateful translator from winit window events to [`Event`]s.
///
/// Keeps the last cursor position for button and wheel events (winit does
/// not attach one) and the held buttons to tell moves from drags.
#[derive(Debug, Clone, Default)]
pub struct EventTranslator {
    cursor: Option<Vec2>,
    window_height: f32,
    held: Vec<MouseButton>,
}

impl EventTranslator {
    pub fn new(window_height: f32) -> Self {
        Self {
            window_height,
            ..Default::default()
        }
    }

    /// Height used to flip y; updated automatically on `Resized`
    pub fn set_window_height(&mut self, height: f32) {
        self.window_height = height;
    }

    pub fn window_height(&self) -> f32 {
        self.window_height
    }

    /// Last cursor position in y-up coordinates, if inside the window
    pub fn cursor(&self) -> Option<Vec2> {
        self.cursor
    }

    pub fn is_held(&self, button: MouseButton) -> bool {
        self.held.contains(&button)
    }

    /// Convert a winit physical position to y-up window coordinates
    pub fn to_gui(&self, x: f64, y: f64) -> Vec2 {
        Vec2::new(x as f32, self.window_height - y as f32)
    }

    /// Process a winit WindowEvent, returning the events it produces.
    ///
    /// Most window events produce zero or one event; a key carrying several
    /// characters produces one key event per character.
    pub fn translate(&mut self, event: &WindowEvent) -> Vec<Event> {
        let mut out = Vec::new();
        match event {
            WindowEvent::Resized(size) => {
                self.window_height = size.height as f32;
            }
            WindowEvent::CursorMoved { position, .. } => {
                out.push(self.cursor_moved(position.x, position.y));
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                out.extend(self.wheel(wheel_rows(delta)));
            }
            WindowEvent::MouseInput { state, button, .. } => {
                out.extend(self.mouse_input(*state, convert_mouse_button(*button)));
            }
            WindowEvent::KeyboardInput { event, .. } => {
                out.extend(key_events(&event.logical_key, event.state));
            }
            WindowEvent::Focused(true) => out.push(Event::GainedFocus),
            WindowEvent::Focused(false) => {
                self.held.clear();
                out.push(Event::LostFocus);
            }
            _ => {}
        }
        out
    }

    fn cursor_moved(&mut self, x: f64, y: f64) -> Event {
        let pos = self.to_gui(x, y);
        let delta = pos - self.cursor.unwrap_or(pos);
        self.cursor = Some(pos);
        if self.held.is_empty() {
            Event::PointerMoved { pos, delta }
        } else {
            Event::PointerDragged { pos, delta }
        }
    }

    fn mouse_input(&mut self, state: ElementState, button: MouseButton) -> Option<Event> {
        match state {
            ElementState::Pressed if !self.held.contains(&button) => self.held.push(button),
            ElementState::Pressed => {}
            ElementState::Released => self.held.retain(|b| *b != button),
        }
        let Some(pos) = self.cursor else {
            log::trace!("{:?} {:?} with no cursor position", button, state);
            return None;
        };
        Some(match state {
            ElementState::Pressed => Event::PointerDown { button, pos },
            ElementState::Released => Event::PointerUp { button, pos },
        })
    }

    fn wheel(&self, delta: Vec2) -> Option<Event> {
        let pos = self.cursor?;
        Some(Event::Wheel { pos, delta })
    }
}

/// Wheel notches from a winit scroll delta. Positive y scrolls toward the top.
pub fn wheel_rows(delta: &MouseScrollDelta) -> Vec2 {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => Vec2::new(*x, *y),
        MouseScrollDelta::PixelDelta(pos) => {
            Vec2::new(pos.x as f32, pos.y as f32) / PIXELS_PER_LINE
        }
    }
}

/// Key events for one winit key transition
pub fn key_events(key: &WinitKey, state: ElementState) -> Vec<Event> {
    let keys = convert_key(key);
    if keys.is_empty() {
        log::trace!("ignoring unmapped key {:?}", key);
    }
    keys.into_iter()
        .map(|key| match state {
            ElementState::Pressed => Event::KeyDown(key),
            ElementState::Released => Event::KeyUp(key),
        })
        .collect()
}

/// Convert winit MouseButton to tessera-gui MouseButton
pub fn convert_mouse_button(button: winit::event::MouseButton) -> MouseButton {
    match button {
        winit::event::MouseButton::Left => MouseButton::Left,
        winit::event::MouseButton::Right => MouseButton::Right,
        winit::event::MouseButton::Middle => MouseButton::Middle,
        winit::event::MouseButton::Back => MouseButton::Other(3),
        winit::event::MouseButton::Forward => MouseButton::Other(4),
        winit::event::MouseButton::Other(n) => MouseButton::Other(n.min(u8::MAX as u16) as u8),
    }
}

/// Convert a winit logical key to zero or more tessera-gui keys.
///
/// Space becomes `Key::Char(' ')` so text entry and accept handling see the
/// same key. Character keys yield one key per char.
pub fn convert_key(key: &WinitKey) -> Vec<Key> {
    match key {
        WinitKey::Named(winit::keyboard::NamedKey::Space) => vec![Key::Char(' ')],
        WinitKey::Named(named) => convert_named_key(named)
            .map(Key::Named)
            .into_iter()
            .collect(),
        WinitKey::Character(text) => text
            .chars()
            .filter(|c| !c.is_control())
            .map(Key::Char)
            .collect(),
        _ => Vec::new(),
    }
}

/// Convert winit NamedKey to tessera-gui NamedKey
pub fn convert_named_key(key: &winit::keyboard::NamedKey) -> Option<NamedKey> {
    use winit::keyboard::NamedKey as WN;

    Some(match key {
        WN::Enter => NamedKey::Enter,
        WN::Escape => NamedKey::Escape,
        WN::Backspace => NamedKey::Backspace,
        WN::Delete => NamedKey::Delete,
        WN::Tab => NamedKey::Tab,
        WN::ArrowLeft => NamedKey::ArrowLeft,
        WN::ArrowRight => NamedKey::ArrowRight,
        WN::ArrowUp => NamedKey::ArrowUp,
        WN::ArrowDown => NamedKey::ArrowDown,
        WN::Home => NamedKey::Home,
        WN::End => NamedKey::End,
        WN::PageUp => NamedKey::PageUp,
        WN::PageDown => NamedKey::PageDown,
        WN::Insert => NamedKey::Insert,
        WN::Shift => NamedKey::Shift,
        WN::Control => NamedKey::Control,
        WN::Alt => NamedKey::Alt,
        WN::Super => NamedKey::Super,
        WN::F1 => NamedKey::F(1),
        WN::F2 => NamedKey::F(2),
        WN::F3 => NamedKey::F(3),
        WN::F4 => NamedKey::F(4),
        WN::F5 => NamedKey::F(5),
        WN::F6 => NamedKey::F(6),
        WN::F7 => NamedKey::F(7),
        WN::F8 => NamedKey::F(8),
        WN::F9 => NamedKey::F(9),
        WN::F10 => NamedKey::F(10),
        WN::F11 => NamedKey::F(11),
        WN::F12 => NamedKey::F(12),
        WN::F13 => NamedKey::F(13),
        WN::F14 => NamedKey::F(14),
        WN::F15 => NamedKey::F(15),
        WN::F16 => NamedKey::F(16),
        WN::F17 => NamedKey::F(17),
        WN::F18 => NamedKey::F(18),
        WN::F19 => NamedKey::F(19),
        WN::F20 => NamedKey::F(20),
        WN::F21 => NamedKey::F(21),
        WN::F22 => NamedKey::F(22),
        WN::F23 => NamedKey::F(23),
        WN::F24 => NamedKey::F(24),
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::{PhysicalPosition, PhysicalSize};
    use winit::keyboard::{NamedKey as WN, SmolStr};

    #[test]
    fn test_convert_mouse_button() {
        use winit::event::MouseButton as WB;
        assert_eq!(convert_mouse_button(WB::Left), MouseButton::Left);
        assert_eq!(convert_mouse_button(WB::Forward), MouseButton::Other(4));
        assert_eq!(convert_mouse_button(WB::Other(9)), MouseButton::Other(9));
        assert_eq!(convert_mouse_button(WB::Other(1000)), MouseButton::Other(255));
    }

    #[test]
    fn test_convert_keys() {
        assert_eq!(convert_named_key(&WN::F17), Some(NamedKey::F(17)));
        assert_eq!(convert_named_key(&WN::CapsLock), None);
        assert_eq!(convert_key(&WinitKey::Named(WN::Space)), [Key::Char(' ')]);
        assert_eq!(
            convert_key(&WinitKey::Named(WN::Enter)),
            [Key::Named(NamedKey::Enter)]
        );
        assert_eq!(
            convert_key(&WinitKey::Character(SmolStr::new("ü!"))),
            [Key::Char('ü'), Key::Char('!')]
        );
        assert!(convert_key(&WinitKey::Dead(Some('`'))).is_empty());
    }

    #[test]
    fn test_key_events_follow_state() {
        let key = WinitKey::Named(WN::Escape);
        assert_eq!(
            key_events(&key, ElementState::Released),
            [Event::KeyUp(Key::Named(NamedKey::Escape))]
        );
        assert!(key_events(&WinitKey::Named(WN::CapsLock), ElementState::Pressed).is_empty());
    }

    #[test]
    fn test_cursor_is_flipped_and_drag_tracked() {
        let mut t = EventTranslator::new(600.0);
        assert_eq!(
            t.cursor_moved(10.0, 100.0),
            Event::PointerMoved {
                pos: Vec2::new(10.0, 500.0),
                delta: Vec2::ZERO,
            }
        );
        assert_eq!(
            t.mouse_input(ElementState::Pressed, MouseButton::Left),
            Some(Event::left_down(Vec2::new(10.0, 500.0)))
        );
        assert!(t.is_held(MouseButton::Left));
        assert_eq!(
            t.cursor_moved(15.0, 90.0),
            Event::PointerDragged {
                pos: Vec2::new(15.0, 510.0),
                delta: Vec2::new(5.0, 10.0),
            }
        );
        t.mouse_input(ElementState::Released, MouseButton::Left);
        assert!(matches!(t.cursor_moved(15.0, 90.0), Event::PointerMoved { .. }));
    }

    #[test]
    fn test_button_without_cursor_is_dropped() {
        let mut t = EventTranslator::new(100.0);
        assert_eq!(t.mouse_input(ElementState::Pressed, MouseButton::Right), None);
        assert!(t.is_held(MouseButton::Right));
        assert_eq!(t.wheel(Vec2::Y), None);
    }

    #[test]
    fn test_resize_and_focus() {
        let mut t = EventTranslator::new(100.0);
        assert!(t.translate(&WindowEvent::Resized(PhysicalSize::new(800, 400))).is_empty());
        assert_eq!(t.window_height(), 400.0);
        assert_eq!(t.to_gui(0.0, 0.0), Vec2::new(0.0, 400.0));

        t.cursor_moved(1.0, 1.0);
        t.mouse_input(ElementState::Pressed, MouseButton::Left);
        assert_eq!(t.translate(&WindowEvent::Focused(false)), [Event::LostFocus]);
        assert!(!t.is_held(MouseButton::Left));
        assert_eq!(t.translate(&WindowEvent::Focused(true)), [Event::GainedFocus]);
    }

    #[test]
    fn test_wheel_rows() {
        assert_eq!(
            wheel_rows(&MouseScrollDelta::LineDelta(0.0, -2.0)),
            Vec2::new(0.0, -2.0)
        );
        assert_eq!(
            wheel_rows(&MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 30.0))),
            Vec2::new(0.0, 1.5)
        );
    }
}
