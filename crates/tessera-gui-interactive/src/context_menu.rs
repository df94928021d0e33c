//! Popup list of actions
//!
//! Unlike other widgets the menu is anchored at its upper left corner, which
//! is where the pointer was when it opened.

use tessera_gui::{
    flip_y, push_rect, theme, Color, DrawSink, Event, Key, MouseButton, NamedKey, TextAlign,
    TextMeasure, TextRun, Vec2, PAD_DIST,
};
use tessera_gui_macros::WithBuilders;

#[derive(Debug, Clone, WithBuilders)]
pub struct ContextMenuStyle {
    pub text_size: f32,
    pub default_bg_color: Color,
    pub hovered_bg_color: Color,
    pub line_color: Color,
    pub text_color: Color,
    pub inactive_text_color: Color,
    /// Space around each label
    pub padding: Vec2,
}

impl Default for ContextMenuStyle {
    fn default() -> Self {
        Self {
            text_size: 16.0,
            default_bg_color: theme::MENU_BG,
            hovered_bg_color: theme::GUI_BG_ACTIVE,
            line_color: theme::GUI_FG_ACTIVE,
            text_color: theme::GUI_TEXT,
            inactive_text_color: theme::GUI_TEXT_LOW,
            padding: Vec2::new(2.0 * PAD_DIST, PAD_DIST),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub enabled: bool,
}

/// What a single event did to the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuResponse {
    pub handled: bool,
    /// An enabled line was chosen
    pub selected: Option<usize>,
    /// The menu closed on this event
    pub closed: bool,
}

#[derive(Debug, Clone)]
pub struct ContextMenu {
    /// Upper left corner
    pub position: Vec2,
    pub size: Vec2,
    items: Vec<MenuItem>,
    /// Line under the pointer or keyboard focus
    pub hovered: Option<usize>,
    /// Menu is open
    pub active: bool,
    pub alpha: f32,
    pub style: ContextMenuStyle,
}

impl Default for ContextMenu {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            size: Vec2::ZERO,
            items: Vec::new(),
            hovered: None,
            active: false,
            alpha: 1.0,
            style: ContextMenuStyle::default(),
        }
    }
}

impl ContextMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items<'a>(items: impl IntoIterator<Item = &'a str>) -> Self {
        let mut menu = Self::new();
        for label in items {
            menu.push_item(label, true);
        }
        menu
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn push_item(&mut self, label: impl Into<String>, enabled: bool) {
        self.items.push(MenuItem {
            label: label.into(),
            enabled,
        });
    }

    /// Set the label of `line`, growing the list with empty lines if needed
    pub fn set_line(&mut self, line: usize, label: impl Into<String>) {
        if line >= self.items.len() {
            self.items.resize(
                line + 1,
                MenuItem {
                    label: String::new(),
                    enabled: true,
                },
            );
        }
        self.items[line].label = label.into();
    }

    pub fn set_enabled(&mut self, line: usize, enabled: bool) {
        if let Some(item) = self.items.get_mut(line) {
            item.enabled = enabled;
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.hovered = None;
    }

    pub fn center(&self) -> Vec2 {
        self.position + flip_y(self.size / 2.0)
    }

    fn row_height(&self) -> f32 {
        if self.items.is_empty() {
            0.0
        } else {
            self.size.y / self.items.len() as f32
        }
    }

    /// Show the menu with its upper left corner at `position`, sized to fit
    /// the labels
    pub fn open(&mut self, position: Vec2, measure: &dyn TextMeasure) {
        let pad = self.style.padding;
        let line_h = measure.char_size(self.style.text_size).y + 2.0 * pad.y;
        let width = self
            .items
            .iter()
            .map(|item| measure.text_size(&item.label, self.style.text_size).x)
            .fold(0.0f32, f32::max);
        self.size = Vec2::new(width + 2.0 * pad.x, line_h * self.items.len() as f32);
        self.position = position;
        self.hovered = None;
        self.active = true;
    }

    pub fn close(&mut self) {
        self.active = false;
        self.hovered = None;
    }

    /// Line under `p`, or `None` outside the menu
    pub fn get_hover_selection(&self, p: Vec2) -> Option<usize> {
        let rel = flip_y(p - self.position);
        let h = self.row_height();
        if self.items.is_empty()
            || rel.x < 0.0
            || rel.y < 0.0
            || rel.x > self.size.x
            || rel.y > self.size.y
            || h <= 0.0
        {
            return None;
        }
        Some(((rel.y / h).floor() as usize).min(self.items.len() - 1))
    }

    fn step_enabled(&self, down: bool) -> Option<usize> {
        let n = self.items.len();
        let enabled = |i: &usize| self.items[*i].enabled;
        match (self.hovered, down) {
            (None, true) => (0..n).find(enabled),
            (None, false) => (0..n).rev().find(enabled),
            (Some(h), true) => (h + 1..n).find(enabled).or(Some(h)),
            (Some(h), false) => (0..h).rev().find(enabled).or(Some(h)),
        }
    }

    fn choose(&mut self, line: usize, response: &mut MenuResponse) {
        if let Some(item) = self.items.get(line).filter(|item| item.enabled) {
            log::debug!("context menu chose '{}'", item.label);
            response.selected = Some(line);
            response.closed = true;
            self.close();
        }
    }

    pub fn handle_event(&mut self, event: &Event) -> MenuResponse {
        let mut response = MenuResponse::default();
        if !self.active {
            return response;
        }
        match *event {
            Event::PointerMoved { pos, .. } | Event::PointerDragged { pos, .. } => {
                self.hovered = self.get_hover_selection(pos);
                response.handled = self.hovered.is_some();
            }
            Event::PointerDown { pos, .. } => {
                if self.get_hover_selection(pos).is_some() {
                    response.handled = true;
                } else {
                    self.close();
                    response.closed = true;
                }
            }
            Event::PointerUp {
                button: MouseButton::Left,
                pos,
            } => {
                if let Some(line) = self.get_hover_selection(pos) {
                    response.handled = true;
                    self.choose(line, &mut response);
                }
            }
            Event::KeyDown(Key::Named(NamedKey::ArrowDown)) => {
                self.hovered = self.step_enabled(true);
                response.handled = true;
            }
            Event::KeyDown(Key::Named(NamedKey::ArrowUp)) => {
                self.hovered = self.step_enabled(false);
                response.handled = true;
            }
            Event::KeyDown(key) if key.is_cancel() => {
                self.close();
                response.handled = true;
                response.closed = true;
            }
            Event::KeyDown(key) if key.is_accept() => {
                response.handled = true;
                if let Some(line) = self.hovered {
                    self.choose(line, &mut response);
                }
            }
            _ => {}
        }
        response
    }

    pub fn render(&self, sink: &mut dyn DrawSink) {
        if !self.active {
            return;
        }
        let alpha = self.alpha;
        push_rect(
            sink,
            self.center(),
            self.size / 2.0,
            self.style.default_bg_color,
            self.style.line_color,
            alpha,
        );

        let h = self.row_height();
        let left = self.position.x + self.style.padding.x;
        for (i, item) in self.items.iter().enumerate() {
            let y = self.position.y - (i as f32 + 0.5) * h;
            if self.hovered == Some(i) && item.enabled {
                push_rect(
                    sink,
                    Vec2::new(self.position.x + self.size.x / 2.0, y),
                    Vec2::new(self.size.x / 2.0, h / 2.0),
                    self.style.hovered_bg_color,
                    Color::transparent(),
                    alpha,
                );
            }
            let color = if item.enabled {
                self.style.text_color
            } else {
                self.style.inactive_text_color
            };
            sink.text(
                TextRun::new(
                    Vec2::new(left, y),
                    item.label.as_str(),
                    self.style.text_size,
                    color.scale_alpha(alpha),
                )
                .with_align(TextAlign::Left),
            );
        }
    }
}
