//! Radio-style row of buttons

use tessera_gui::{DrawSink, Event, OffsetSink, TextMeasure, Vec2, Widget, PAD_DIST};

use crate::button::{Button, ButtonWidget};

/// What a single event did to the group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OptionResponse {
    pub handled: bool,
    /// The chosen option changed to this index
    pub changed: Option<usize>,
}

/// Pick one of N buttons. The chosen button stays pressed.
///
/// Button positions are relative to the group's center, so moving the group
/// only touches `widget.position`.
#[derive(Debug, Clone, Default)]
pub struct OptionButtons {
    pub widget: Widget,
    pub buttons: Vec<Button>,
    selected: usize,
}

impl OptionButtons {
    pub fn new<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let mut options = Self::default();
        for label in labels {
            options.add_button(label, "");
        }
        options
    }

    pub fn add_button(&mut self, label: &str, tooltip: &str) -> usize {
        let index = self.buttons.len();
        let mut button = Button::new(label).with_tooltip(tooltip);
        button.base.index = Some(index);
        button.base.pressed = index == self.selected;
        self.buttons.push(button);
        index
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn set_selected(&mut self, index: usize) {
        if index < self.buttons.len() {
            self.selected = index;
            self.sync_pressed();
        }
    }

    fn sync_pressed(&mut self) {
        for (i, button) in self.buttons.iter_mut().enumerate() {
            button.base.pressed = i == self.selected;
        }
    }

    /// Size every button around its label and lay them out in one row
    /// centered on the group
    pub fn layout(&mut self, measure: &dyn TextMeasure) -> Vec2 {
        let mut total = Vec2::ZERO;
        for button in &mut self.buttons {
            button.fit_size(measure);
            let size = button.base.widget.size;
            total.x += size.x;
            total.y = total.y.max(size.y);
        }
        if !self.buttons.is_empty() {
            total.x += 2.0 * PAD_DIST * (self.buttons.len() - 1) as f32;
        }

        let mut x = -0.5 * total.x;
        for button in &mut self.buttons {
            let w = &mut button.base.widget;
            w.size.y = total.y;
            w.position = Vec2::new(x + 0.5 * w.size.x, 0.0);
            x += w.size.x + 2.0 * PAD_DIST;
        }
        self.widget.size = total;
        total
    }

    pub fn handle_event(&mut self, event: &Event) -> OptionResponse {
        let mut response = OptionResponse::default();
        if !self.widget.active {
            return response;
        }
        let local = event.relative_to(self.widget.position);
        let mut chosen = None;
        for (i, button) in self.buttons.iter_mut().enumerate() {
            let r = button.handle_event(&local);
            response.handled |= r.handled;
            if r.activated {
                chosen = Some(i);
            }
        }
        match chosen {
            Some(i) if i != self.selected => {
                log::debug!("option changed {} -> {}", self.selected, i);
                self.selected = i;
                response.changed = Some(i);
                self.sync_pressed();
            }
            _ => {
                if let Some(button) = self.buttons.get_mut(self.selected) {
                    button.base.pressed = true;
                }
            }
        }
        self.widget.hovered = self.buttons.iter().any(|b| b.base.widget.hovered);
        response
    }

    /// Tooltip of the hovered button
    pub fn tooltip(&self) -> Option<&str> {
        self.buttons.iter().find_map(|b| b.base.tooltip())
    }

    pub fn render(&self, sink: &mut dyn DrawSink, measure: &dyn TextMeasure) {
        let mut local = OffsetSink::new(sink, self.widget.position);
        for button in &self.buttons {
            let mut button = button.clone();
            button.base.widget.alpha *= self.widget.alpha;
            button.render(&mut local, measure, false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_gui::{DrawList, MonoMeasure};

    fn options() -> OptionButtons {
        let mut o = OptionButtons::new(["Low", "Medium", "High"]);
        o.widget.position = Vec2::new(200.0, 100.0);
        o.layout(&MonoMeasure::default());
        o
    }

    fn center_of(o: &OptionButtons, i: usize) -> Vec2 {
        o.widget.position + o.buttons[i].base.widget.position
    }

    #[test]
    fn test_layout_is_centered_row() {
        let o = options();
        let first = o.buttons[0].base.widget;
        let last = o.buttons[2].base.widget;
        assert!((first.min().x + last.max().x).abs() < 1e-3);
        assert!(first.max().x < o.buttons[1].base.widget.min().x);
    }

    #[test]
    fn test_click_chooses_and_stays_pressed() {
        let mut o = options();
        assert!(o.buttons[0].base.pressed);

        let p = center_of(&o, 2);
        o.handle_event(&Event::left_down(p));
        let r = o.handle_event(&Event::left_up(p));
        assert_eq!(r.changed, Some(2));
        assert_eq!(o.selected(), 2);
        assert!(o.buttons[2].base.pressed);
        assert!(!o.buttons[0].base.pressed);

        // reclicking the chosen option reports no change
        o.handle_event(&Event::left_down(p));
        let r = o.handle_event(&Event::left_up(p));
        assert_eq!(r.changed, None);
        assert!(o.buttons[2].base.pressed);
    }

    #[test]
    fn test_release_off_button_keeps_choice() {
        let mut o = options();
        o.handle_event(&Event::left_down(center_of(&o, 1)));
        let r = o.handle_event(&Event::left_up(Vec2::new(-500.0, 0.0)));
        assert_eq!(r.changed, None);
        assert_eq!(o.selected(), 0);
        assert!(!o.buttons[1].base.pressed);
    }

    #[test]
    fn test_render_offsets_labels() {
        let o = options();
        let mut list = DrawList::new();
        o.render(&mut list, &MonoMeasure::default());
        let medium = list
            .texts()
            .find(|run| run.text == "Medium")
            .map(|run| run.pos);
        assert_eq!(medium.map(|p| p.x), Some(center_of(&o, 1).x));
    }
}
