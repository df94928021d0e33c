//! Clickable buttons
//!
//! [`ButtonBase`] holds the hover/press/activation state machine shared by
//! every clickable widget. Concrete buttons implement [`ButtonWidget`] so that
//! containers can hold a mix of button kinds.

use slotmap::{new_key_type, SlotMap};
use tessera_gui::{
    push_button, theme, Color, DrawSink, Event, GamepadButton, Key, MouseButton, NamedKey,
    TextMeasure, TextRun, Vec2, Widget, PAD_DIST,
};
use tessera_gui_macros::WithBuilders;

use crate::tooltip::TextBox;

/// Maximum number of keys bound to one button
pub const MAX_BUTTON_KEYS: usize = 4;

new_key_type! {
    /// Generation-checked handle to a button held in a slot map
    pub struct ButtonKey;
}

/// Caller-owned storage for buttons referenced by key
pub type ButtonArena = SlotMap<ButtonKey, Box<dyn ButtonWidget>>;

/// Interaction state of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Idle,
    Hovered,
    Pressed,
    /// Not active; ignores input and renders dimmed
    Disabled,
}

/// What a single event did to a button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonResponse {
    /// The event was consumed
    pub handled: bool,
    /// A press started on this event
    pub pressed: bool,
    /// A press/release cycle completed validly
    pub activated: bool,
}

/// State and bindings shared by all clickable widgets
#[derive(Debug, Clone)]
pub struct ButtonBase {
    pub widget: Widget,
    keys: [Option<Key>; MAX_BUTTON_KEYS],
    pub tooltip: String,
    pub pressed: bool,
    pub visible: bool,
    /// Position within a group, if the button belongs to one
    pub index: Option<usize>,
    /// Caller-defined identifier
    pub ident: i32,
    pub default_line_color: Color,
    pub hovered_line_color: Color,
    pub default_bg_color: Color,
    pub sub_alpha: f32,
    key_held: Option<Key>,
}

impl Default for ButtonBase {
    fn default() -> Self {
        Self {
            widget: Widget::default(),
            keys: [None; MAX_BUTTON_KEYS],
            tooltip: String::new(),
            pressed: false,
            visible: true,
            index: None,
            ident: 0,
            default_line_color: theme::GUI_FG,
            hovered_line_color: theme::GUI_FG_ACTIVE,
            default_bg_color: theme::GUI_BG,
            sub_alpha: 1.0,
            key_held: None,
        }
    }
}

impl ButtonBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind between one and [`MAX_BUTTON_KEYS`] keys.
    ///
    /// # Panics
    /// Panics on an empty slice or more than four keys.
    pub fn set_keys(&mut self, keys: &[Key]) {
        assert!(
            (1..=MAX_BUTTON_KEYS).contains(&keys.len()),
            "a button binds 1 to {} keys, got {}",
            MAX_BUTTON_KEYS,
            keys.len()
        );
        self.keys = [None; MAX_BUTTON_KEYS];
        for (slot, key) in self.keys.iter_mut().zip(keys) {
            *slot = Some(*key);
        }
    }

    pub fn clear_keys(&mut self) {
        self.keys = [None; MAX_BUTTON_KEYS];
        self.key_held = None;
    }

    pub fn keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.keys.iter().flatten().copied()
    }

    pub fn is_bound(&self, key: &Key) -> bool {
        self.keys.iter().flatten().any(|k| k == key)
    }

    pub fn state(&self) -> ButtonState {
        if !self.widget.active {
            ButtonState::Disabled
        } else if self.pressed {
            ButtonState::Pressed
        } else if self.widget.hovered {
            ButtonState::Hovered
        } else {
            ButtonState::Idle
        }
    }

    /// Tooltip text while hovered
    pub fn tooltip(&self) -> Option<&str> {
        (self.widget.hovered && !self.tooltip.is_empty()).then_some(self.tooltip.as_str())
    }

    /// Run the hover/press/activation state machine for one event.
    ///
    /// Pointer activation requires the press and the release to both land
    /// inside the bounds. A bound key activates on release regardless of the
    /// pointer, provided its press was seen by this button.
    pub fn handle_event(&mut self, event: &Event) -> ButtonResponse {
        let mut response = ButtonResponse::default();
        if !self.widget.active || !self.visible {
            return response;
        }

        match *event {
            Event::PointerMoved { pos, .. } | Event::PointerDragged { pos, .. } => {
                self.widget.hovered = self.widget.contains(pos);
            }
            Event::PointerDown {
                button: MouseButton::Left,
                pos,
            } => {
                self.widget.hovered = self.widget.contains(pos);
                if self.widget.hovered {
                    self.pressed = true;
                    response.pressed = true;
                    response.handled = true;
                }
            }
            Event::PointerUp {
                button: MouseButton::Left,
                pos,
            } => {
                self.widget.hovered = self.widget.contains(pos);
                if self.pressed && self.key_held.is_none() {
                    self.pressed = false;
                    if self.widget.hovered {
                        response.activated = true;
                        response.handled = true;
                    }
                }
            }
            Event::KeyDown(key) if self.is_bound(&key) => {
                self.pressed = true;
                self.key_held = Some(key);
                response.pressed = true;
                response.handled = true;
            }
            Event::KeyUp(key) if self.key_held == Some(key) => {
                self.pressed = false;
                self.key_held = None;
                response.activated = true;
                response.handled = true;
            }
            Event::LostFocus => {
                self.pressed = false;
                self.key_held = None;
                self.widget.hovered = false;
            }
            _ => {}
        }
        response
    }

    /// Draw the selection triangle to the left of the button
    pub fn render_selected(&self, sink: &mut dyn DrawSink, bg: Color, line: Color, alpha: f32) {
        let r = self.widget.half_size();
        let h = r.y.min(3.0 * PAD_DIST);
        let tip = self.widget.position - Vec2::new(r.x + PAD_DIST, 0.0);
        let verts = [
            tip,
            tip + Vec2::new(-h, h),
            tip + Vec2::new(-h, -h),
        ];
        if bg.is_visible() {
            sink.fill_poly(&verts, bg.scale_alpha(alpha));
        }
        if line.is_visible() {
            sink.line_loop(&verts, line.scale_alpha(alpha));
        }
    }

    /// Draw the tooltip above the button. Returns true if something was drawn.
    pub fn render_tooltip(
        &self,
        sink: &mut dyn DrawSink,
        measure: &dyn TextMeasure,
        viewport: Vec2,
        color: Color,
        force: bool,
    ) -> bool {
        if self.tooltip.is_empty() || !(self.widget.hovered || force) {
            return false;
        }
        let anchor = self.widget.position + Vec2::new(0.0, self.widget.half_size().y);
        let text_box = TextBox {
            viewport,
            fg_color: color,
            alpha: self.widget.alpha,
            ..Default::default()
        };
        text_box.draw(sink, measure, anchor, &self.tooltip);
        true
    }
}

/// Behavior shared by every button kind held in a container
pub trait ButtonWidget {
    fn base(&self) -> &ButtonBase;

    fn base_mut(&mut self) -> &mut ButtonBase;

    /// Append the button's visuals
    fn render_button(&self, sink: &mut dyn DrawSink, measure: &dyn TextMeasure, selected: bool);

    fn handle_event(&mut self, event: &Event) -> ButtonResponse {
        self.base_mut().handle_event(event)
    }

    fn render(&self, sink: &mut dyn DrawSink, measure: &dyn TextMeasure, selected: bool) {
        if self.base().visible {
            self.render_button(sink, measure, selected);
        }
    }
}

/// Visual styling for a text button
#[derive(Debug, Clone, WithBuilders)]
pub struct ButtonStyle {
    /// Largest font size for the label
    pub text_size: f32,
    /// Smallest font size the label shrinks to when space is tight
    pub min_text_size: f32,
    pub subtext_size: f32,
    pub subtext_color: Color,
    pub pressed_bg_color: Color,
    pub inactive_line_color: Color,
    pub text_color: Color,
    pub inactive_text_color: Color,
    /// Space between label and outline
    pub padding: Vec2,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            text_size: 24.0,
            min_text_size: 10.0,
            subtext_size: 16.0,
            subtext_color: theme::GUI_TEXT_LOW,
            pressed_bg_color: theme::GUI_BG_ACTIVE,
            inactive_line_color: theme::GUI_INACTIVE,
            text_color: theme::GUI_TEXT,
            inactive_text_color: theme::GUI_INACTIVE,
            padding: Vec2::splat(4.0 * PAD_DIST),
        }
    }
}

/// A labeled button with an optional key hint below the label
#[derive(Debug, Clone, Default)]
pub struct Button {
    pub base: ButtonBase,
    pub text: String,
    pub subtext: String,
    pub style: ButtonStyle,
}

impl Button {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_keys(mut self, keys: &[Key]) -> Self {
        self.base.set_keys(keys);
        self
    }

    pub fn with_ident(mut self, ident: i32) -> Self {
        self.base.ident = ident;
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.base.tooltip = tooltip.into();
        self
    }

    pub fn with_style(mut self, style: ButtonStyle) -> Self {
        self.style = style;
        self
    }

    pub fn set_colors(
        &mut self,
        text: Color,
        default_bg: Color,
        pressed_bg: Color,
        default_line: Color,
        hovered_line: Color,
    ) {
        self.style.text_color = text;
        self.base.default_bg_color = default_bg;
        self.style.pressed_bg_color = pressed_bg;
        self.base.default_line_color = default_line;
        self.base.hovered_line_color = hovered_line;
    }

    pub fn bg_color(&self) -> Color {
        if self.base.pressed {
            self.style.pressed_bg_color
        } else {
            self.base.default_bg_color
        }
    }

    pub fn fg_color(&self, selected: bool) -> Color {
        if !self.base.widget.active {
            self.style.inactive_line_color
        } else if self.base.widget.hovered || selected {
            self.base.hovered_line_color
        } else {
            self.base.default_line_color
        }
    }

    /// Size needed to show label and subtext at full font size
    pub fn content_size(&self, measure: &dyn TextMeasure) -> Vec2 {
        let mut size = measure.text_size(&self.text, self.style.text_size);
        if !self.subtext.is_empty() {
            let sub = measure.text_size(&self.subtext, self.style.subtext_size);
            size = Vec2::new(size.x.max(sub.x), size.y + sub.y);
        }
        size + 2.0 * self.style.padding
    }

    /// Resize the button around its content
    pub fn fit_size(&mut self, measure: &dyn TextMeasure) {
        self.base.widget.size = self.content_size(measure);
    }

    fn set_hint_keys(&mut self, keys: &[Key]) {
        self.base.set_keys(keys);
        self.subtext = keys
            .iter()
            .map(Key::label)
            .collect::<Vec<_>>()
            .join("/");
    }

    pub fn set_escape_keys(&mut self) {
        self.set_hint_keys(&[
            Key::Named(NamedKey::Escape),
            Key::Gamepad(GamepadButton::B),
        ]);
    }

    pub fn set_return_keys(&mut self) {
        self.set_hint_keys(&[
            Key::Named(NamedKey::Escape),
            Key::Named(NamedKey::Enter),
            Key::Gamepad(GamepadButton::A),
            Key::Gamepad(GamepadButton::B),
        ]);
    }

    pub fn set_yes_keys(&mut self) {
        self.set_hint_keys(&[
            Key::Named(NamedKey::Enter),
            Key::Gamepad(GamepadButton::A),
        ]);
    }

    pub fn set_no_keys(&mut self) {
        self.set_escape_keys();
    }

    pub fn set_discard_keys(&mut self) {
        self.set_hint_keys(&[
            Key::Named(NamedKey::Delete),
            Key::Named(NamedKey::Backspace),
            Key::Gamepad(GamepadButton::Y),
        ]);
    }
}

impl ButtonWidget for Button {
    fn base(&self) -> &ButtonBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ButtonBase {
        &mut self.base
    }

    fn render_button(&self, sink: &mut dyn DrawSink, measure: &dyn TextMeasure, selected: bool) {
        let widget = &self.base.widget;
        let alpha = widget.alpha * self.base.sub_alpha;
        push_button(
            sink,
            widget.position,
            widget.half_size(),
            self.bg_color(),
            self.fg_color(selected),
            alpha,
        );

        let text_color = if widget.active {
            self.style.text_color
        } else {
            self.style.inactive_text_color
        };
        let width = widget.size.x - 2.0 * self.style.padding.x;
        let size = fit_text_size(
            measure,
            &self.text,
            width,
            self.style.min_text_size,
            self.style.text_size,
        );

        let mut text_pos = widget.position;
        if !self.subtext.is_empty() {
            let sub_h = measure.char_size(self.style.subtext_size).y;
            text_pos.y += 0.5 * sub_h;
            sink.text(TextRun::new(
                widget.position - Vec2::new(0.0, 0.5 * measure.char_size(size).y),
                self.subtext.clone(),
                self.style.subtext_size,
                self.style.subtext_color.scale_alpha(alpha),
            ));
        }
        sink.text(TextRun::new(
            text_pos,
            self.text.clone(),
            size,
            text_color.scale_alpha(alpha),
        ));
    }
}

/// Largest font size in `[min, max]` at which `text` fits in `width`
pub fn fit_text_size(measure: &dyn TextMeasure, text: &str, width: f32, min: f32, max: f32) -> f32 {
    let full = measure.text_size(text, max).x;
    if full <= width || full <= 0.0 {
        max
    } else {
        (max * width / full).clamp(min, max)
    }
}

/// Forward an event to a button and keep a group's selected index in step
/// with the pointer: hovering a grouped button selects it.
pub fn handle_button_selected(
    button: &mut dyn ButtonWidget,
    event: &Event,
    selected: Option<&mut usize>,
) -> ButtonResponse {
    let response = button.handle_event(event);
    let base = button.base();
    if let (Some(selected), Some(index)) = (selected, base.index) {
        if base.widget.hovered && event.is_pointer_motion() {
            *selected = index;
        }
    }
    if response.activated {
        log::trace!("button {} activated", base.ident);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_gui::{DrawList, MonoMeasure};

    fn button() -> Button {
        let mut b = Button::new("Launch");
        b.base.widget = Widget::new(Vec2::new(50.0, 50.0), Vec2::new(40.0, 20.0));
        b
    }

    const INSIDE: Vec2 = Vec2::new(50.0, 50.0);
    const OUTSIDE: Vec2 = Vec2::new(500.0, 50.0);

    #[test]
    fn test_click_inside_activates() {
        let mut b = button();
        b.handle_event(&Event::moved(INSIDE));
        assert_eq!(b.base.state(), ButtonState::Hovered);

        let r = b.handle_event(&Event::left_down(INSIDE));
        assert!(r.pressed && !r.activated);
        assert_eq!(b.base.state(), ButtonState::Pressed);

        let r = b.handle_event(&Event::left_up(INSIDE));
        assert!(r.activated);
        assert_eq!(b.base.state(), ButtonState::Hovered);
    }

    #[test]
    fn test_drag_off_cancels() {
        let mut b = button();
        b.handle_event(&Event::left_down(INSIDE));
        b.handle_event(&Event::dragged(OUTSIDE));
        assert!(b.base.pressed);
        let r = b.handle_event(&Event::left_up(OUTSIDE));
        assert!(!r.activated);
        assert_eq!(b.base.state(), ButtonState::Idle);
    }

    #[test]
    fn test_press_outside_release_inside_does_not_activate() {
        let mut b = button();
        b.handle_event(&Event::left_down(OUTSIDE));
        let r = b.handle_event(&Event::left_up(INSIDE));
        assert!(!r.activated);
    }

    #[test]
    fn test_inactive_button_never_fires() {
        let mut b = button().with_keys(&[Key::Char('x')]);
        b.base.widget.active = false;
        assert_eq!(b.base.state(), ButtonState::Disabled);
        for e in [
            Event::left_down(INSIDE),
            Event::left_up(INSIDE),
            Event::KeyDown(Key::Char('x')),
            Event::KeyUp(Key::Char('x')),
        ] {
            assert_eq!(b.handle_event(&e), ButtonResponse::default());
        }
    }

    #[test]
    fn test_bound_key_activates_without_hover() {
        let mut b = button().with_keys(&[Key::Char('x'), Key::Gamepad(GamepadButton::A)]);
        let r = b.handle_event(&Event::KeyDown(Key::Gamepad(GamepadButton::A)));
        assert!(r.pressed && r.handled);
        let r = b.handle_event(&Event::KeyUp(Key::Gamepad(GamepadButton::A)));
        assert!(r.activated);
        assert!(!b.base.pressed);

        // unbound key does nothing
        let r = b.handle_event(&Event::KeyDown(Key::Char('y')));
        assert!(!r.handled);
    }

    #[test]
    fn test_key_up_without_seen_down_is_ignored() {
        let mut b = button().with_keys(&[Key::Char('x')]);
        let r = b.handle_event(&Event::KeyUp(Key::Char('x')));
        assert!(!r.activated);
    }

    #[test]
    #[should_panic]
    fn test_too_many_keys_panics() {
        let mut b = ButtonBase::new();
        b.set_keys(&[
            Key::Char('a'),
            Key::Char('b'),
            Key::Char('c'),
            Key::Char('d'),
            Key::Char('e'),
        ]);
    }

    #[test]
    #[should_panic]
    fn test_empty_binding_panics() {
        ButtonBase::new().set_keys(&[]);
    }

    #[test]
    fn test_presets_set_hint_subtext() {
        let mut b = Button::new("Cancel");
        b.set_escape_keys();
        assert!(b.base.is_bound(&Key::Named(NamedKey::Escape)));
        assert_eq!(b.subtext, "Esc/(B)");
        b.set_return_keys();
        assert_eq!(b.base.keys().count(), 4);
    }

    #[test]
    fn test_tooltip_only_while_hovered() {
        let mut b = button().with_tooltip("fires the engines");
        assert_eq!(b.base.tooltip(), None);
        b.handle_event(&Event::moved(INSIDE));
        assert_eq!(b.base.tooltip(), Some("fires the engines"));
    }

    #[test]
    fn test_colors_follow_state() {
        let mut b = button();
        assert_eq!(b.fg_color(false), theme::GUI_FG);
        assert_eq!(b.fg_color(true), theme::GUI_FG_ACTIVE);
        b.handle_event(&Event::left_down(INSIDE));
        assert_eq!(b.bg_color(), theme::GUI_BG_ACTIVE);
        b.base.widget.active = false;
        assert_eq!(b.fg_color(false), theme::GUI_INACTIVE);
    }

    #[test]
    fn test_render_emits_label() {
        let b = button();
        let mut list = DrawList::new();
        b.render(&mut list, &MonoMeasure::default(), false);
        assert!(list.contains_text("Launch"));

        let mut hidden = button();
        hidden.base.visible = false;
        let mut list = DrawList::new();
        hidden.render(&mut list, &MonoMeasure::default(), false);
        assert!(list.is_empty());
    }

    #[test]
    fn test_fit_text_size_shrinks() {
        let m = MonoMeasure::default();
        assert_eq!(fit_text_size(&m, "ab", 100.0, 8.0, 20.0), 20.0);
        let shrunk = fit_text_size(&m, "abcdefghij", 60.0, 8.0, 20.0);
        assert!((shrunk - 10.0).abs() < 1e-4);
        assert_eq!(fit_text_size(&m, "abcdefghij", 1.0, 8.0, 20.0), 8.0);
    }

    #[test]
    fn test_hover_selects_grouped_button() {
        let mut b = button();
        b.base.index = Some(3);
        let mut selected = 0;
        handle_button_selected(&mut b, &Event::moved(INSIDE), Some(&mut selected));
        assert_eq!(selected, 3);
    }
}
