//! Discrete sliders and labeled value editors
//!
//! [`OptionSlider`] picks one of `values` states. [`OptionEditor`] binds a
//! slider to an external numeric cell through `value = start + mult * fraction`.

use std::cell::Cell;
use std::rc::Rc;

use tessera_gui::{
    push_button, push_rect, theme, Color, DrawSink, Event, Key, MouseButton, NamedKey, TextAlign,
    TextMeasure, TextRun, Vec2, Widget, PAD_DIST,
};
use tessera_gui_macros::WithBuilders;

#[derive(Debug, Clone, WithBuilders)]
pub struct OptionSliderStyle {
    pub default_bg_color: Color,
    pub pressed_bg_color: Color,
    pub default_line_color: Color,
    pub hovered_line_color: Color,
    pub inactive_line_color: Color,
    /// Fill between the left edge and the knob
    pub fill_color: Color,
    pub knob_width: f32,
}

impl Default for OptionSliderStyle {
    fn default() -> Self {
        Self {
            default_bg_color: theme::GUI_BG,
            pressed_bg_color: theme::GUI_BG_ACTIVE,
            default_line_color: theme::GUI_FG,
            hovered_line_color: theme::GUI_FG_ACTIVE,
            inactive_line_color: theme::GUI_INACTIVE,
            fill_color: theme::GUI_FG.with_alpha(0.35),
            knob_width: 2.0 * PAD_DIST,
        }
    }
}

/// What a single event did to a slider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SliderResponse {
    pub handled: bool,
    pub changed: bool,
}

/// Horizontal slider over `values` discrete states. Size must be set.
#[derive(Debug, Clone)]
pub struct OptionSlider {
    pub widget: Widget,
    pub style: OptionSliderStyle,
    pub pressed: bool,
    /// Accept arrow keys without pointer hover
    pub focused: bool,
    /// Two-state sliders toggle on click
    pub allow_binary: bool,
    /// State under the pointer
    pub hovered_value: Option<usize>,
    values: usize,
    value: usize,
}

impl Default for OptionSlider {
    fn default() -> Self {
        Self {
            widget: Widget::default(),
            style: OptionSliderStyle::default(),
            pressed: false,
            focused: false,
            allow_binary: true,
            hovered_value: None,
            values: 10,
            value: 0,
        }
    }
}

impl OptionSlider {
    pub fn new(values: usize) -> Self {
        let mut slider = Self::default();
        slider.set_values(values);
        slider
    }

    /// Total number of states
    pub fn values(&self) -> usize {
        self.values
    }

    /// Current state
    pub fn value(&self) -> usize {
        self.value
    }

    /// Change the state count, at least one
    pub fn set_values(&mut self, values: usize) {
        self.values = values.max(1);
        self.value = self.value.min(self.values - 1);
    }

    pub fn set_value(&mut self, value: usize) {
        self.value = value.min(self.values - 1);
    }

    /// Current state as a fraction in [0, 1]
    pub fn value_float(&self) -> f32 {
        if self.values <= 1 {
            0.0
        } else {
            self.value as f32 / (self.values - 1) as f32
        }
    }

    /// State for a fraction. 1.0 maps to the last state.
    pub fn float_to_value(&self, v: f32) -> usize {
        let state = (v * self.values as f32).floor();
        state.clamp(0.0, (self.values - 1) as f32) as usize
    }

    pub fn set_value_float(&mut self, v: f32) {
        self.value = self.float_to_value(v);
    }

    pub fn is_binary(&self) -> bool {
        self.allow_binary && self.values == 2
    }

    pub fn is_discrete(&self) -> bool {
        self.values < 5
    }

    pub fn bg_color(&self) -> Color {
        if self.pressed {
            self.style.pressed_bg_color
        } else {
            self.style.default_bg_color
        }
    }

    pub fn fg_color(&self) -> Color {
        if !self.widget.active {
            self.style.inactive_line_color
        } else if self.widget.hovered || self.focused {
            self.style.hovered_line_color
        } else {
            self.style.default_line_color
        }
    }

    fn value_at(&self, pos: Vec2) -> usize {
        let width = self.widget.size.x.max(f32::EPSILON);
        self.float_to_value((pos.x - self.widget.min().x) / width)
    }

    fn update(&mut self, value: usize, response: &mut SliderResponse) {
        if value != self.value {
            self.value = value;
            response.changed = true;
        }
    }

    pub fn handle_event(&mut self, event: &Event) -> SliderResponse {
        let mut response = SliderResponse::default();
        if !self.widget.active {
            return response;
        }
        match *event {
            Event::PointerMoved { pos, .. } | Event::PointerDragged { pos, .. } => {
                self.widget.hovered = self.widget.contains(pos);
                self.hovered_value = self.widget.hovered.then(|| self.value_at(pos));
                if self.pressed && !self.is_binary() {
                    self.update(self.value_at(pos), &mut response);
                    response.handled = true;
                }
            }
            Event::PointerDown {
                button: MouseButton::Left,
                pos,
            } if self.widget.contains(pos) => {
                self.pressed = true;
                let value = if self.is_binary() {
                    1 - self.value
                } else {
                    self.value_at(pos)
                };
                self.update(value, &mut response);
                response.handled = true;
            }
            Event::PointerUp {
                button: MouseButton::Left,
                ..
            } if self.pressed => {
                self.pressed = false;
                response.handled = true;
            }
            Event::KeyDown(Key::Named(NamedKey::ArrowLeft))
                if self.widget.hovered || self.focused =>
            {
                self.update(self.value.saturating_sub(1), &mut response);
                response.handled = true;
            }
            Event::KeyDown(Key::Named(NamedKey::ArrowRight))
                if self.widget.hovered || self.focused =>
            {
                self.update((self.value + 1).min(self.values - 1), &mut response);
                response.handled = true;
            }
            Event::LostFocus => self.pressed = false,
            _ => {}
        }
        response
    }

    pub fn render(&self, sink: &mut dyn DrawSink, alpha: f32) {
        let w = &self.widget;
        let alpha = alpha * w.alpha;
        push_button(sink, w.position, w.half_size(), self.bg_color(), self.fg_color(), alpha);

        let min = w.min();
        let knob_x = min.x + w.size.x * self.value_float();
        if self.is_discrete() {
            let cell = w.size.x / self.values as f32;
            let x = min.x + cell * (self.value as f32 + 0.5);
            push_rect(
                sink,
                Vec2::new(x, w.position.y),
                Vec2::new(0.5 * cell - PAD_DIST, w.size.y * 0.5 - PAD_DIST).max(Vec2::ZERO),
                self.style.fill_color,
                self.fg_color(),
                alpha,
            );
        } else {
            let filled = knob_x - min.x;
            push_rect(
                sink,
                Vec2::new(min.x + 0.5 * filled, w.position.y),
                Vec2::new(0.5 * filled, 0.5 * w.size.y),
                self.style.fill_color,
                Color::transparent(),
                alpha,
            );
            push_rect(
                sink,
                Vec2::new(knob_x, w.position.y),
                Vec2::new(0.5 * self.style.knob_width, 0.5 * w.size.y),
                self.fg_color(),
                Color::transparent(),
                alpha,
            );
        }
    }
}

/// External numeric storage edited by an [`OptionEditor`]
#[derive(Debug, Clone)]
pub enum OptionCell {
    Float(Rc<Cell<f32>>),
    Int(Rc<Cell<i32>>),
}

/// A labeled slider editing an external value
#[derive(Debug, Clone)]
pub struct OptionEditor {
    pub slider: OptionSlider,
    pub label: String,
    /// One tooltip for all states, or one per state
    pub tooltips: Vec<String>,
    pub text_size: f32,
    pub text_color: Color,
    cell: OptionCell,
    start: f32,
    mult: f32,
    txt: String,
}

impl OptionEditor {
    fn init(
        cell: OptionCell,
        label: &str,
        tooltips: Vec<String>,
        start: f32,
        mult: f32,
        states: usize,
    ) -> Self {
        let mut editor = Self {
            slider: OptionSlider::new(states),
            label: label.to_string(),
            tooltips,
            text_size: 16.0,
            text_color: theme::GUI_TEXT,
            cell,
            start,
            mult,
            txt: String::new(),
        };
        editor.update_slider();
        editor
    }

    /// Continuous value in `[min, max]` with 100 slider states
    pub fn float(
        cell: Rc<Cell<f32>>,
        label: &str,
        min: f32,
        max: f32,
        tooltips: Vec<String>,
    ) -> Self {
        Self::init(OptionCell::Float(cell), label, tooltips, min, max - min, 100)
    }

    /// Integer in `[0, states)`
    pub fn int_states(cell: Rc<Cell<i32>>, label: &str, states: usize, tooltips: Vec<String>) -> Self {
        let mult = states.saturating_sub(1) as f32;
        Self::init(OptionCell::Int(cell), label, tooltips, 0.0, mult, states)
    }

    /// Integer `low + k * increment` for `k` in `0..=states`
    pub fn int_range(
        cell: Rc<Cell<i32>>,
        label: &str,
        low: i32,
        increment: i32,
        states: usize,
        tooltips: Vec<String>,
    ) -> Self {
        let mult = (increment as f32) * states as f32;
        Self::init(OptionCell::Int(cell), label, tooltips, low as f32, mult, states + 1)
    }

    pub fn value_float(&self) -> f32 {
        match &self.cell {
            OptionCell::Float(v) => v.get(),
            OptionCell::Int(v) => v.get() as f32,
        }
    }

    pub fn value_int(&self) -> i32 {
        match &self.cell {
            OptionCell::Float(v) => v.get().round() as i32,
            OptionCell::Int(v) => v.get(),
        }
    }

    pub fn set_value_float(&mut self, v: f32) {
        match &self.cell {
            OptionCell::Float(cell) => cell.set(v),
            OptionCell::Int(cell) => cell.set(v.round() as i32),
        }
        self.update_slider();
    }

    /// Pull the external value into the slider and label
    pub fn update_slider(&mut self) {
        let fraction = if self.mult.abs() > f32::EPSILON {
            (self.value_float() - self.start) / self.mult
        } else {
            0.0
        };
        self.slider.set_value_float(fraction);
        self.txt = format!("{}: {}", self.label, self.value_text());
    }

    pub fn value_text(&self) -> String {
        match &self.cell {
            OptionCell::Float(v) => format!("{:.2}", v.get()),
            OptionCell::Int(v) => v.get().to_string(),
        }
    }

    /// Label line, `"label: value"`
    pub fn text(&self) -> &str {
        &self.txt
    }

    /// Tooltip for the current state
    pub fn tooltip(&self) -> Option<&str> {
        match self.tooltips.as_slice() {
            [] => None,
            [only] => Some(only.as_str()),
            many => many.get(self.slider.value()).map(String::as_str),
        }
    }

    pub fn handle_event(&mut self, event: &Event) -> SliderResponse {
        let response = self.slider.handle_event(event);
        if response.changed {
            let v = self.start + self.mult * self.slider.value_float();
            match &self.cell {
                OptionCell::Float(cell) => cell.set(v),
                OptionCell::Int(cell) => cell.set(v.round() as i32),
            }
            self.txt = format!("{}: {}", self.label, self.value_text());
            log::trace!("option '{}' set to {}", self.label, self.value_text());
        }
        response
    }

    /// Draw the label left of the slider; returns the combined size
    pub fn render(&self, sink: &mut dyn DrawSink, measure: &dyn TextMeasure, alpha: f32) -> Vec2 {
        let text_size = measure.text_size(&self.txt, self.text_size);
        let slider = &self.slider.widget;
        sink.text(
            TextRun::new(
                Vec2::new(slider.min().x - 2.0 * PAD_DIST, slider.position.y),
                self.txt.as_str(),
                self.text_size,
                self.text_color.scale_alpha(alpha),
            )
            .with_align(TextAlign::Right),
        );
        self.slider.render(sink, alpha);
        Vec2::new(
            text_size.x + 2.0 * PAD_DIST + slider.size.x,
            text_size.y.max(slider.size.y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slider(values: usize) -> OptionSlider {
        let mut s = OptionSlider::new(values);
        s.widget = Widget::new(Vec2::new(50.0, 0.0), Vec2::new(100.0, 10.0));
        s
    }

    #[test]
    fn test_float_to_value_boundaries() {
        for values in 2..20 {
            let s = OptionSlider::new(values);
            assert_eq!(s.float_to_value(0.0), 0);
            assert_eq!(s.float_to_value(1.0), values - 1);
            assert_eq!(s.float_to_value(-3.0), 0);
            assert_eq!(s.float_to_value(7.0), values - 1);
        }
        let s = OptionSlider::new(4);
        assert_eq!(s.float_to_value(0.49), 1);
        assert_eq!(s.float_to_value(0.5), 2);
    }

    #[test]
    fn test_value_float_round_trips_states() {
        let mut s = OptionSlider::new(5);
        for value in 0..5 {
            s.set_value(value);
            let f = s.value_float();
            s.set_value_float(f);
            assert_eq!(s.value(), value);
        }
    }

    #[test]
    fn test_drag_sets_value() {
        let mut s = slider(10);
        let r = s.handle_event(&Event::left_down(Vec2::new(25.0, 0.0)));
        assert!(r.changed);
        assert_eq!(s.value(), 2);
        s.handle_event(&Event::dragged(Vec2::new(300.0, 40.0)));
        assert_eq!(s.value(), 9);
        s.handle_event(&Event::left_up(Vec2::ZERO));
        assert!(!s.pressed);
        let r = s.handle_event(&Event::moved(Vec2::new(5.0, 0.0)));
        assert!(!r.changed);
        assert_eq!(s.hovered_value, Some(0));
    }

    #[test]
    fn test_binary_toggles() {
        let mut s = slider(2);
        assert!(s.is_binary() && s.is_discrete());
        s.handle_event(&Event::left_down(Vec2::new(10.0, 0.0)));
        assert_eq!(s.value(), 1);
        s.handle_event(&Event::left_up(Vec2::new(10.0, 0.0)));
        s.handle_event(&Event::left_down(Vec2::new(90.0, 0.0)));
        assert_eq!(s.value(), 0);
    }

    #[test]
    fn test_arrow_keys_need_hover_or_focus() {
        let mut s = slider(3);
        let right = Event::KeyDown(Key::Named(NamedKey::ArrowRight));
        assert!(!s.handle_event(&right).handled);
        s.focused = true;
        s.handle_event(&right);
        s.handle_event(&right);
        s.handle_event(&right);
        assert_eq!(s.value(), 2);
    }

    #[test]
    fn test_float_editor_affine_law() {
        let cell = Rc::new(Cell::new(1.25));
        let mut editor = OptionEditor::float(cell.clone(), "Zoom", 0.5, 2.0, vec![]);
        assert_eq!(editor.slider.value(), 50);
        assert_eq!(editor.text(), "Zoom: 1.25");

        editor.slider.widget = Widget::new(Vec2::new(50.0, 0.0), Vec2::new(100.0, 10.0));
        editor.handle_event(&Event::left_down(Vec2::new(100.0, 0.0)));
        assert!((cell.get() - 2.0).abs() < 1e-5);
        assert_eq!(editor.text(), "Zoom: 2.00");
    }

    #[test]
    fn test_int_editors() {
        let cell = Rc::new(Cell::new(2));
        let editor = OptionEditor::int_states(
            cell.clone(),
            "Quality",
            3,
            vec!["low".into(), "medium".into(), "high".into()],
        );
        assert_eq!(editor.slider.values(), 3);
        assert_eq!(editor.slider.value(), 2);
        assert_eq!(editor.tooltip(), Some("high"));

        let cell = Rc::new(Cell::new(20));
        let mut editor = OptionEditor::int_range(cell.clone(), "Ships", 0, 10, 4, vec![]);
        assert_eq!(editor.slider.values(), 5);
        assert_eq!(editor.slider.value(), 2);

        editor.slider.focused = true;
        editor.handle_event(&Event::KeyDown(Key::Named(NamedKey::ArrowRight)));
        assert_eq!(cell.get(), 30);
        assert_eq!(editor.value_int(), 30);
        assert_eq!(editor.text(), "Ships: 30");
    }

    #[test]
    fn test_external_change_is_picked_up() {
        let cell = Rc::new(Cell::new(0));
        let mut editor = OptionEditor::int_states(cell.clone(), "Mode", 4, vec![]);
        cell.set(3);
        editor.update_slider();
        assert_eq!(editor.slider.value(), 3);
        editor.set_value_float(1.0);
        assert_eq!(cell.get(), 1);
        assert_eq!(editor.slider.value(), 1);
    }
}
