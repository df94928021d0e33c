//! Normalized input events
//!
//! Platform layers (see `tessera-gui-winit`) translate OS messages into these
//! types. Widgets never see raw window-system events.

use glam::Vec2;

/// Left stick deflection treated as a directional press
pub const AXIS_THRESHOLD: f32 = 0.5;

/// Backend-agnostic mouse button representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u8),
}

/// Non-character keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Shift,
    Control,
    Alt,
    Super,
    /// Function keys F1-F24
    F(u8),
}

/// Gamepad buttons, reported through the same key events as the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadButton {
    A,
    B,
    X,
    Y,
    LeftShoulder,
    RightShoulder,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
    Start,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadAxis {
    LeftX,
    LeftY,
    RightX,
    RightY,
    TriggerLeft,
    TriggerRight,
}

/// A key or gamepad button code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character, including space
    Char(char),
    Named(NamedKey),
    Gamepad(GamepadButton),
}

/// Grid direction for keyboard and gamepad navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// Navigation direction of arrow keys and the d-pad
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Key::Named(NamedKey::ArrowUp) | Key::Gamepad(GamepadButton::DPadUp) => {
                Some(Direction::Up)
            }
            Key::Named(NamedKey::ArrowDown) | Key::Gamepad(GamepadButton::DPadDown) => {
                Some(Direction::Down)
            }
            Key::Named(NamedKey::ArrowLeft) | Key::Gamepad(GamepadButton::DPadLeft) => {
                Some(Direction::Left)
            }
            Key::Named(NamedKey::ArrowRight) | Key::Gamepad(GamepadButton::DPadRight) => {
                Some(Direction::Right)
            }
            _ => None,
        }
    }

    /// Enter, space or gamepad A
    pub fn is_accept(&self) -> bool {
        matches!(
            self,
            Key::Named(NamedKey::Enter) | Key::Char(' ') | Key::Gamepad(GamepadButton::A)
        )
    }

    /// Escape or gamepad B
    pub fn is_cancel(&self) -> bool {
        matches!(
            self,
            Key::Named(NamedKey::Escape) | Key::Gamepad(GamepadButton::B)
        )
    }

    /// Printable character for text entry
    pub fn text_char(&self) -> Option<char> {
        match self {
            Key::Char(c) if !c.is_control() => Some(*c),
            _ => None,
        }
    }

    /// Short label for key hints such as "Esc" or "(A)"
    pub fn label(&self) -> String {
        match self {
            Key::Char(' ') => "Space".to_string(),
            Key::Char(c) => c.to_uppercase().collect(),
            Key::Named(NamedKey::Enter) => "Enter".to_string(),
            Key::Named(NamedKey::Escape) => "Esc".to_string(),
            Key::Named(NamedKey::Backspace) => "Backspace".to_string(),
            Key::Named(NamedKey::Delete) => "Del".to_string(),
            Key::Named(NamedKey::F(n)) => format!("F{n}"),
            Key::Named(named) => format!("{named:?}"),
            Key::Gamepad(GamepadButton::A) => "(A)".to_string(),
            Key::Gamepad(GamepadButton::B) => "(B)".to_string(),
            Key::Gamepad(GamepadButton::X) => "(X)".to_string(),
            Key::Gamepad(GamepadButton::Y) => "(Y)".to_string(),
            Key::Gamepad(button) => format!("({button:?})"),
        }
    }
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        Key::Char(c)
    }
}

impl From<NamedKey> for Key {
    fn from(named: NamedKey) -> Self {
        Key::Named(named)
    }
}

impl From<GamepadButton> for Key {
    fn from(button: GamepadButton) -> Self {
        Key::Gamepad(button)
    }
}

/// One normalized input occurrence
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    KeyDown(Key),
    KeyUp(Key),
    PointerDown {
        button: MouseButton,
        pos: Vec2,
    },
    PointerUp {
        button: MouseButton,
        pos: Vec2,
    },
    /// Pointer moved with no button held
    PointerMoved {
        pos: Vec2,
        delta: Vec2,
    },
    /// Pointer moved while a button is held
    PointerDragged {
        pos: Vec2,
        delta: Vec2,
    },
    /// Scroll wheel, positive y scrolls toward the top
    Wheel {
        pos: Vec2,
        delta: Vec2,
    },
    GamepadAxis {
        which: u32,
        axis: GamepadAxis,
        value: f32,
    },
    LostFocus,
    GainedFocus,
}

impl Event {
    /// Pointer position carried by pointer and wheel events
    pub fn pointer_pos(&self) -> Option<Vec2> {
        match *self {
            Event::PointerDown { pos, .. }
            | Event::PointerUp { pos, .. }
            | Event::PointerMoved { pos, .. }
            | Event::PointerDragged { pos, .. }
            | Event::Wheel { pos, .. } => Some(pos),
            _ => None,
        }
    }

    pub fn key_down(&self) -> Option<Key> {
        match *self {
            Event::KeyDown(key) => Some(key),
            _ => None,
        }
    }

    pub fn key_up(&self) -> Option<Key> {
        match *self {
            Event::KeyUp(key) => Some(key),
            _ => None,
        }
    }

    pub fn is_pointer_motion(&self) -> bool {
        matches!(
            self,
            Event::PointerMoved { .. } | Event::PointerDragged { .. }
        )
    }

    /// Left-stick deflection past [`AXIS_THRESHOLD`] as a direction
    pub fn axis_direction(&self) -> Option<Direction> {
        match *self {
            Event::GamepadAxis {
                axis: GamepadAxis::LeftX,
                value,
                ..
            } if value.abs() > AXIS_THRESHOLD => Some(if value > 0.0 {
                Direction::Right
            } else {
                Direction::Left
            }),
            // stick y is reported positive-down by the platform layer
            Event::GamepadAxis {
                axis: GamepadAxis::LeftY,
                value,
                ..
            } if value.abs() > AXIS_THRESHOLD => Some(if value > 0.0 {
                Direction::Down
            } else {
                Direction::Up
            }),
            _ => None,
        }
    }

    /// Same event with its pointer position shifted by `-origin`, for
    /// widgets laid out relative to a parent
    pub fn relative_to(&self, origin: Vec2) -> Self {
        let mut event = *self;
        match &mut event {
            Event::PointerDown { pos, .. }
            | Event::PointerUp { pos, .. }
            | Event::PointerMoved { pos, .. }
            | Event::PointerDragged { pos, .. }
            | Event::Wheel { pos, .. } => *pos -= origin,
            _ => {}
        }
        event
    }

    /// Convenience constructors used by platform layers and tests
    pub fn left_down(pos: Vec2) -> Self {
        Event::PointerDown {
            button: MouseButton::Left,
            pos,
        }
    }

    pub fn left_up(pos: Vec2) -> Self {
        Event::PointerUp {
            button: MouseButton::Left,
            pos,
        }
    }

    pub fn moved(pos: Vec2) -> Self {
        Event::PointerMoved {
            pos,
            delta: Vec2::ZERO,
        }
    }

    pub fn dragged(pos: Vec2) -> Self {
        Event::PointerDragged {
            pos,
            delta: Vec2::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directions_cover_keyboard_and_dpad() {
        assert_eq!(
            Key::Named(NamedKey::ArrowUp).direction(),
            Some(Direction::Up)
        );
        assert_eq!(
            Key::Gamepad(GamepadButton::DPadRight).direction(),
            Some(Direction::Right)
        );
        assert_eq!(Key::Char('w').direction(), None);
    }

    #[test]
    fn test_accept_and_cancel() {
        assert!(Key::Named(NamedKey::Enter).is_accept());
        assert!(Key::Gamepad(GamepadButton::A).is_accept());
        assert!(!Key::Gamepad(GamepadButton::B).is_accept());
        assert!(Key::Gamepad(GamepadButton::B).is_cancel());
        assert!(Key::Named(NamedKey::Escape).is_cancel());
    }

    #[test]
    fn test_text_char_skips_control() {
        assert_eq!(Key::Char('x').text_char(), Some('x'));
        assert_eq!(Key::Char('\u{8}').text_char(), None);
        assert_eq!(Key::Named(NamedKey::Tab).text_char(), None);
    }

    #[test]
    fn test_axis_direction_threshold() {
        let axis = |axis, value| Event::GamepadAxis {
            which: 0,
            axis,
            value,
        };
        assert_eq!(axis(GamepadAxis::LeftX, 0.3).axis_direction(), None);
        assert_eq!(
            axis(GamepadAxis::LeftX, -0.9).axis_direction(),
            Some(Direction::Left)
        );
        assert_eq!(
            axis(GamepadAxis::LeftY, 0.9).axis_direction(),
            Some(Direction::Down)
        );
        assert_eq!(axis(GamepadAxis::RightX, 1.0).axis_direction(), None);
    }

    #[test]
    fn test_relative_to_shifts_pointer_only() {
        let e = Event::left_down(Vec2::new(10.0, 5.0)).relative_to(Vec2::new(4.0, 1.0));
        assert_eq!(e.pointer_pos(), Some(Vec2::new(6.0, 4.0)));
        let k = Event::KeyDown(Key::Char('a'));
        assert_eq!(k.relative_to(Vec2::ONE), k);
    }

    #[test]
    fn test_pointer_pos() {
        let p = Vec2::new(3.0, 4.0);
        assert_eq!(Event::left_down(p).pointer_pos(), Some(p));
        assert_eq!(Event::KeyDown(Key::Char('a')).pointer_pos(), None);
    }
}
