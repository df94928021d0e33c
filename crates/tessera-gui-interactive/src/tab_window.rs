//! Tabbed container
//!
//! Each tab is a caller-owned [`TabInterface`]. The window only decides which
//! one is active and routes events, steps and rendering to it.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tessera_gui::{
    push_button, push_rect, theme, Color, DrawSink, Event, GamepadButton, Key, TextMeasure,
    TextRun, Vec2, Widget, INPUT_ALPHA, PAD_DIST,
};
use tessera_gui_macros::WithBuilders;

use crate::button::{fit_text_size, ButtonBase, ButtonWidget};

/// Contents of one tab
pub trait TabInterface {
    /// Returns true if the event was consumed
    fn handle_event(&mut self, event: &Event) -> bool;

    fn render_tab(
        &self,
        sink: &mut dyn DrawSink,
        measure: &dyn TextMeasure,
        center: Vec2,
        size: Vec2,
        foreground: f32,
        intro: f32,
    );

    /// Called on the current tab before switching away. Returning false keeps
    /// it selected.
    fn on_swap_out(&mut self) -> bool {
        true
    }

    fn on_swap_in(&mut self) {}

    /// Per-frame update, only called on the active tab
    fn on_step(&mut self) {}
}

/// Shared handle to a caller-owned tab
pub type SharedTab = Rc<RefCell<dyn TabInterface>>;

#[derive(Debug, Clone, WithBuilders)]
pub struct TabWindowStyle {
    pub text_size: f32,
    /// Background of tabs that are not selected
    pub inactive_bg_color: Color,
    pub default_bg_color: Color,
    pub default_line_color: Color,
    pub hovered_line_color: Color,
    pub inactive_line_color: Color,
    pub text_color: Color,
}

impl Default for TabWindowStyle {
    fn default() -> Self {
        Self {
            text_size: 16.0,
            inactive_bg_color: theme::GUI_BG_ACTIVE,
            default_bg_color: theme::GUI_BG,
            default_line_color: theme::GUI_FG,
            hovered_line_color: theme::GUI_FG_ACTIVE,
            inactive_line_color: theme::GUI_INACTIVE,
            text_color: theme::GUI_TEXT,
        }
    }
}

/// Clickable tab header
pub struct TabButton {
    pub base: ButtonBase,
    pub text: String,
    pub ident: i32,
    pub tab: SharedTab,
    /// Selected tabs merge into the contents background
    pub bg_color: Color,
    pub inactive_bg_color: Color,
    pub inactive_line_color: Color,
    pub text_size: f32,
    pub text_color: Color,
}

impl fmt::Debug for TabButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabButton")
            .field("text", &self.text)
            .field("ident", &self.ident)
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}

impl ButtonWidget for TabButton {
    fn base(&self) -> &ButtonBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ButtonBase {
        &mut self.base
    }

    fn render_button(&self, sink: &mut dyn DrawSink, measure: &dyn TextMeasure, selected: bool) {
        self.draw_header(sink, measure, selected, 1.0);
    }
}

impl TabButton {
    fn draw_header(
        &self,
        sink: &mut dyn DrawSink,
        measure: &dyn TextMeasure,
        selected: bool,
        alpha: f32,
    ) {
        let w = &self.base.widget;
        let alpha = alpha * w.alpha * self.base.sub_alpha;
        let bg = if selected {
            self.bg_color
        } else {
            self.inactive_bg_color
        };
        let line = if !w.active {
            self.inactive_line_color
        } else if w.hovered || selected {
            self.base.hovered_line_color
        } else {
            self.base.default_line_color
        };
        push_button(sink, w.position, w.half_size(), bg, line, alpha);
        let size = fit_text_size(
            measure,
            &self.text,
            w.size.x - 4.0 * PAD_DIST,
            0.5 * self.text_size,
            self.text_size,
        );
        sink.text(TextRun::new(
            w.position,
            self.text.as_str(),
            size,
            self.text_color.scale_alpha(alpha),
        ));
    }
}

#[derive(Debug)]
pub struct TabWindow {
    pub widget: Widget,
    pub style: TabWindowStyle,
    pub buttons: Vec<TabButton>,
    /// Fade of the whole window; input is ignored below [`INPUT_ALPHA`]
    pub alpha2: f32,
    selected: usize,
}

impl Default for TabWindow {
    fn default() -> Self {
        Self {
            widget: Widget::default(),
            style: TabWindowStyle::default(),
            buttons: Vec::new(),
            alpha2: 1.0,
            selected: 0,
        }
    }
}

impl TabWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tab and return its index
    pub fn add_tab(&mut self, text: impl Into<String>, ident: i32, tab: SharedTab) -> usize {
        let index = self.buttons.len();
        let mut base = ButtonBase::new();
        base.index = Some(index);
        base.ident = ident;
        base.default_line_color = self.style.default_line_color;
        base.hovered_line_color = self.style.hovered_line_color;
        self.buttons.push(TabButton {
            base,
            text: text.into(),
            ident,
            tab,
            bg_color: self.style.default_bg_color,
            inactive_bg_color: self.style.inactive_bg_color,
            inactive_line_color: self.style.inactive_line_color,
            text_size: self.style.text_size,
            text_color: self.style.text_color,
        });
        self.layout();
        index
    }

    pub fn tab_count(&self) -> usize {
        self.buttons.len()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn active(&self) -> Option<SharedTab> {
        self.buttons.get(self.selected).map(|b| Rc::clone(&b.tab))
    }

    pub fn active_ident(&self) -> Option<i32> {
        self.buttons.get(self.selected).map(|b| b.ident)
    }

    pub fn tab_height(&self) -> f32 {
        self.style.text_size + 4.0 * PAD_DIST
    }

    pub fn contents_center(&self) -> Vec2 {
        self.widget.position - Vec2::new(0.0, 0.5 * self.tab_height())
    }

    pub fn contents_size(&self) -> Vec2 {
        self.widget.size - Vec2::splat(4.0 * PAD_DIST) - Vec2::new(0.0, self.tab_height())
    }

    /// Lower left corner of the contents area
    pub fn contents_start(&self) -> Vec2 {
        self.contents_center() - 0.5 * self.contents_size()
    }

    /// Spread the tab headers along the top edge. Call after moving or
    /// resizing the window.
    pub fn layout(&mut self) {
        let n = self.buttons.len();
        if n == 0 {
            return;
        }
        let height = self.tab_height();
        let width = self.widget.size.x / n as f32;
        let left = self.widget.min().x;
        let y = self.widget.max().y - 0.5 * height;
        for (i, button) in self.buttons.iter_mut().enumerate() {
            button.base.widget.position = Vec2::new(left + width * (i as f32 + 0.5), y);
            button.base.widget.size = Vec2::new(width, height);
        }
    }

    /// Make `index` the active tab.
    ///
    /// The current tab may veto through [`TabInterface::on_swap_out`], in
    /// which case nothing changes and false is returned.
    pub fn switch_to(&mut self, index: usize) -> bool {
        if index == self.selected || index >= self.buttons.len() {
            return false;
        }
        if let Some(current) = self.buttons.get(self.selected) {
            if !current.tab.borrow_mut().on_swap_out() {
                log::debug!(
                    "tab switch {} -> {} aborted by '{}'",
                    self.selected,
                    index,
                    current.text
                );
                return false;
            }
        }
        self.selected = index;
        self.buttons[index].tab.borrow_mut().on_swap_in();
        log::debug!("switched to tab '{}'", self.buttons[index].text);
        true
    }

    /// Advance the active tab by one frame
    pub fn step(&mut self) {
        if let Some(button) = self.buttons.get(self.selected) {
            button.tab.borrow_mut().on_step();
        }
    }

    pub fn handle_event(&mut self, event: &Event) -> bool {
        if !self.widget.active || self.alpha2 < INPUT_ALPHA || self.buttons.is_empty() {
            return false;
        }

        match event.key_down() {
            Some(Key::Gamepad(GamepadButton::LeftShoulder)) => {
                let prev = self.selected.checked_sub(1).unwrap_or(self.buttons.len() - 1);
                self.switch_to(prev);
                return true;
            }
            Some(Key::Gamepad(GamepadButton::RightShoulder)) => {
                let next = (self.selected + 1) % self.buttons.len();
                self.switch_to(next);
                return true;
            }
            _ => {}
        }

        let mut activated = None;
        let mut handled = false;
        for (i, button) in self.buttons.iter_mut().enumerate() {
            let r = button.handle_event(event);
            handled |= r.handled;
            if r.activated {
                activated = Some(i);
            }
        }
        if let Some(i) = activated {
            self.switch_to(i);
        }
        if handled {
            return true;
        }
        self.buttons[self.selected].tab.borrow_mut().handle_event(event)
    }

    pub fn render(
        &self,
        sink: &mut dyn DrawSink,
        measure: &dyn TextMeasure,
        foreground: f32,
        intro: f32,
    ) {
        let alpha = self.widget.alpha * self.alpha2;
        push_rect(
            sink,
            self.contents_center(),
            0.5 * (self.widget.size - Vec2::new(0.0, self.tab_height())),
            self.style.default_bg_color,
            self.style.default_line_color,
            alpha,
        );
        for (i, button) in self.buttons.iter().enumerate() {
            if button.base.visible {
                button.draw_header(sink, measure, i == self.selected, alpha);
            }
        }
        if let Some(button) = self.buttons.get(self.selected) {
            button.tab.borrow().render_tab(
                sink,
                measure,
                self.contents_center(),
                self.contents_size(),
                foreground * alpha,
                intro,
            );
        }
    }
}
