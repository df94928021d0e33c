//! Keyboard and gamepad focus movement over a grid of items

use tessera_gui::{Direction, Event, GamepadAxis, Key, AXIS_THRESHOLD};

/// What a single event did to the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionResponse {
    pub handled: bool,
    /// `selected` changed
    pub moved: bool,
    /// An accept key went down and up on the same item
    pub activated: bool,
}

/// Moves a selected index through `count` items laid out row-major in
/// `rows` rows. Movement stops at the grid edges; there is no wraparound.
#[derive(Debug, Clone, Default)]
pub struct SelectionNavigator {
    /// Accept key held and the item it went down on
    saw_down: Option<(Key, usize)>,
    /// Left stick x and y deflected past the threshold and not yet released
    axis_latched: [bool; 2],
}

impl SelectionNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget a pending accept press, e.g. after the owner moved focus
    pub fn reset(&mut self) {
        self.saw_down = None;
    }

    pub fn handle_event(
        &mut self,
        selected: &mut usize,
        count: usize,
        rows: usize,
        event: &Event,
    ) -> SelectionResponse {
        let mut response = SelectionResponse::default();
        if count == 0 {
            return response;
        }
        *selected = (*selected).min(count - 1);

        let direction = match *event {
            Event::KeyDown(key) if key.is_accept() => {
                self.saw_down = Some((key, *selected));
                response.handled = true;
                None
            }
            Event::KeyUp(key) if key.is_accept() => {
                if self.saw_down.take() == Some((key, *selected)) {
                    response.activated = true;
                    response.handled = true;
                }
                None
            }
            Event::KeyDown(key) => key.direction(),
            Event::GamepadAxis {
                axis: axis @ (GamepadAxis::LeftX | GamepadAxis::LeftY),
                value,
                ..
            } => {
                let latched = &mut self.axis_latched[usize::from(axis == GamepadAxis::LeftY)];
                if value.abs() <= AXIS_THRESHOLD {
                    *latched = false;
                    None
                } else if *latched {
                    response.handled = true;
                    None
                } else {
                    *latched = true;
                    event.axis_direction()
                }
            }
            _ => None,
        };

        if let Some(direction) = direction {
            response.handled = true;
            let next = step_selection(*selected, count, rows, direction);
            if next != *selected {
                *selected = next;
                response.moved = true;
                self.saw_down = None;
            }
        }
        response
    }
}

/// Index one step from `index` in a row-major grid, clamped at the edges
pub fn step_selection(index: usize, count: usize, rows: usize, direction: Direction) -> usize {
    if count == 0 {
        return 0;
    }
    let cols = count.div_ceil(rows.max(1)).max(1);
    let (row, col) = (index / cols, index % cols);
    match direction {
        Direction::Left if col > 0 => index - 1,
        Direction::Right if col + 1 < cols && index + 1 < count => index + 1,
        Direction::Up if row > 0 => index - cols,
        Direction::Down if (row + 1) * cols < count => (index + cols).min(count - 1),
        _ => index,
    }
}

/// Outcome of [`ConfirmKey::handle_event`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmState {
    /// The event did not involve the confirm key
    Ignored,
    /// First press on a slot; press again to confirm
    Armed(usize),
    /// Second press on the same slot
    Confirmed(usize),
}

/// Two-press confirmation for destructive actions on a selected slot
#[derive(Debug, Clone)]
pub struct ConfirmKey {
    pub key: Key,
    armed: Option<usize>,
}

impl ConfirmKey {
    pub fn new(key: impl Into<Key>) -> Self {
        Self {
            key: key.into(),
            armed: None,
        }
    }

    pub fn armed(&self) -> Option<usize> {
        self.armed
    }

    pub fn is_armed(&self, slot: usize) -> bool {
        self.armed == Some(slot)
    }

    pub fn disarm(&mut self) {
        self.armed = None;
    }

    pub fn handle_event(&mut self, event: &Event, selected: Option<usize>) -> ConfirmState {
        let Some(slot) = selected else {
            self.armed = None;
            return ConfirmState::Ignored;
        };
        match event.key_down() {
            Some(key) if key == self.key => {
                if self.armed.take() == Some(slot) {
                    ConfirmState::Confirmed(slot)
                } else {
                    self.armed = Some(slot);
                    ConfirmState::Armed(slot)
                }
            }
            Some(_) => {
                self.armed = None;
                ConfirmState::Ignored
            }
            None => ConfirmState::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_gui::{GamepadButton, NamedKey};

    fn down(named: NamedKey) -> Event {
        Event::KeyDown(Key::Named(named))
    }

    fn up(named: NamedKey) -> Event {
        Event::KeyUp(Key::Named(named))
    }

    #[test]
    fn test_grid_moves_without_wraparound() {
        // 7 items in 2 rows: 4 columns, second row partial
        let mut nav = SelectionNavigator::new();
        let mut selected = 0;
        nav.handle_event(&mut selected, 7, 2, &down(NamedKey::ArrowLeft));
        assert_eq!(selected, 0);
        nav.handle_event(&mut selected, 7, 2, &down(NamedKey::ArrowUp));
        assert_eq!(selected, 0);

        for _ in 0..10 {
            nav.handle_event(&mut selected, 7, 2, &down(NamedKey::ArrowRight));
        }
        assert_eq!(selected, 3);
        let r = nav.handle_event(&mut selected, 7, 2, &down(NamedKey::ArrowDown));
        assert!(r.moved);
        assert_eq!(selected, 6);
        nav.handle_event(&mut selected, 7, 2, &down(NamedKey::ArrowDown));
        assert_eq!(selected, 6);
    }

    #[test]
    fn test_index_always_in_range() {
        let dirs = [
            Direction::Up,
            Direction::Right,
            Direction::Down,
            Direction::Down,
            Direction::Left,
            Direction::Right,
            Direction::Right,
        ];
        for count in 1..12 {
            for rows in 1..5 {
                let mut index = 0;
                for (i, dir) in dirs.iter().cycle().take(50).enumerate() {
                    index = step_selection(index, count, rows + i % 2, *dir);
                    assert!(index < count);
                }
            }
        }
    }

    #[test]
    fn test_activation_needs_down_and_up_on_same_item() {
        let mut nav = SelectionNavigator::new();
        let mut selected = 1;
        nav.handle_event(&mut selected, 4, 1, &down(NamedKey::Enter));
        let r = nav.handle_event(&mut selected, 4, 1, &up(NamedKey::Enter));
        assert!(r.activated);

        // focus moves between down and up
        nav.handle_event(&mut selected, 4, 1, &down(NamedKey::Enter));
        nav.handle_event(&mut selected, 4, 1, &down(NamedKey::ArrowRight));
        let r = nav.handle_event(&mut selected, 4, 1, &up(NamedKey::Enter));
        assert!(!r.activated);

        // up without a seen down
        let r = nav.handle_event(&mut selected, 4, 1, &up(NamedKey::Enter));
        assert!(!r.activated);
    }

    #[test]
    fn test_gamepad_stick_is_latched() {
        let mut nav = SelectionNavigator::new();
        let mut selected = 0;
        let stick = |value| Event::GamepadAxis {
            which: 0,
            axis: GamepadAxis::LeftX,
            value,
        };
        nav.handle_event(&mut selected, 5, 1, &stick(0.9));
        nav.handle_event(&mut selected, 5, 1, &stick(1.0));
        assert_eq!(selected, 1);
        nav.handle_event(&mut selected, 5, 1, &stick(0.1));
        nav.handle_event(&mut selected, 5, 1, &stick(0.8));
        assert_eq!(selected, 2);

        let a = Key::Gamepad(GamepadButton::A);
        nav.handle_event(&mut selected, 5, 1, &Event::KeyDown(a));
        let r = nav.handle_event(&mut selected, 5, 1, &Event::KeyUp(a));
        assert!(r.activated);
    }

    #[test]
    fn test_stick_axes_latch_independently() {
        // 9 items in 3 rows: 3 columns
        let mut nav = SelectionNavigator::new();
        let mut selected = 0;
        let stick = |axis, value| Event::GamepadAxis {
            which: 0,
            axis,
            value,
        };
        nav.handle_event(&mut selected, 9, 3, &stick(GamepadAxis::LeftY, 0.9));
        assert_eq!(selected, 3);

        // x resting while y is still held must not release the y latch
        nav.handle_event(&mut selected, 9, 3, &stick(GamepadAxis::LeftX, 0.0));
        nav.handle_event(&mut selected, 9, 3, &stick(GamepadAxis::LeftY, 0.95));
        assert_eq!(selected, 3);

        nav.handle_event(&mut selected, 9, 3, &stick(GamepadAxis::LeftX, 0.9));
        assert_eq!(selected, 4);
        nav.handle_event(&mut selected, 9, 3, &stick(GamepadAxis::LeftY, 0.2));
        nav.handle_event(&mut selected, 9, 3, &stick(GamepadAxis::LeftY, 0.9));
        assert_eq!(selected, 7);
    }

    #[test]
    fn test_confirm_key_requires_second_press() {
        let mut confirm = ConfirmKey::new(NamedKey::Delete);
        let del = down(NamedKey::Delete);
        assert_eq!(confirm.handle_event(&del, Some(2)), ConfirmState::Armed(2));
        assert!(confirm.is_armed(2));
        assert_eq!(confirm.handle_event(&del, Some(3)), ConfirmState::Armed(3));
        assert_eq!(confirm.handle_event(&del, Some(3)), ConfirmState::Confirmed(3));
        assert_eq!(confirm.armed(), None);

        confirm.handle_event(&del, Some(1));
        confirm.handle_event(&down(NamedKey::ArrowUp), Some(1));
        assert_eq!(confirm.handle_event(&del, Some(1)), ConfirmState::Armed(1));
    }
}
