//! Keyboard navigable grid over caller-owned buttons

use tessera_gui::{
    theme, ButtonLayout, Color, DrawSink, Event, IVec2, TextMeasure, Vec2, Widget, INPUT_ALPHA,
};

use crate::button::{handle_button_selected, ButtonArena, ButtonKey};
use crate::scrollbar::Scrollbar;
use crate::selection::SelectionNavigator;

/// What a single event did to the selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectorResponse {
    pub handled: bool,
    /// Selection moved
    pub moved: bool,
    /// Index of the button that was activated
    pub pressed: Option<usize>,
}

/// Like [`ButtonWindow`](crate::ButtonWindow) but non-owning and with a single
/// selected index instead of drag support.
///
/// Buttons are addressed by key into a [`ButtonArena`] passed to every call.
/// Keys whose button was removed are skipped.
#[derive(Debug, Clone)]
pub struct ButtonSelector {
    pub widget: Widget,
    pub scrollbar: Scrollbar,
    /// Preferred columns and visible rows
    pub dims: IVec2,
    pub selected_bg_color: Color,
    pub selected_line_color: Color,
    buttons: Vec<ButtonKey>,
    selected: usize,
    nav: SelectionNavigator,
}

impl Default for ButtonSelector {
    fn default() -> Self {
        Self {
            widget: Widget::default(),
            scrollbar: Scrollbar::new(),
            dims: IVec2::new(3, 3),
            selected_bg_color: theme::GUI_FG_ACTIVE,
            selected_line_color: theme::GUI_FG_ACTIVE,
            buttons: Vec::new(),
            selected: 0,
            nav: SelectionNavigator::new(),
        }
    }
}

impl ButtonSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buttons(&self) -> &[ButtonKey] {
        &self.buttons
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_key(&self) -> Option<ButtonKey> {
        self.buttons.get(self.selected).copied()
    }

    pub fn set_selected(&mut self, index: usize) {
        self.selected = index.min(self.buttons.len().saturating_sub(1));
        self.nav.reset();
        self.scrollbar.make_visible(self.selected / self.columns());
    }

    /// Row count for the current button count
    fn total_rows(&self) -> usize {
        self.buttons.len().div_ceil(self.dims.x.max(1) as usize)
    }

    /// Columns as the navigator sees them
    fn columns(&self) -> usize {
        self.buttons
            .len()
            .div_ceil(self.total_rows().max(1))
            .max(1)
    }

    /// Replace the button set, numbering the buttons in order
    pub fn set_buttons(&mut self, arena: &mut ButtonArena, keys: &[ButtonKey]) {
        self.buttons = keys.to_vec();
        for (i, key) in keys.iter().enumerate() {
            if let Some(button) = arena.get_mut(*key) {
                button.base_mut().index = Some(i);
            }
        }
        self.selected = 0;
        self.nav.reset();
        self.scrollbar
            .set_window(self.dims.y.max(1) as usize, self.total_rows());
        self.scrollbar.set_first(0);
        self.scrollbar.attach_to(&self.widget);
        self.layout(arena);
    }

    /// Place visible buttons into the grid and hide the scrolled out ones
    pub fn layout(&mut self, arena: &mut ButtonArena) {
        self.scrollbar.attach_to(&self.widget);
        let cols = self.columns();
        let rows = self.dims.y.max(1) as usize;
        let mut area = self.widget.size;
        if self.scrollbar.is_scrollable() {
            area.x -= self.scrollbar.widget.size.x;
        }
        let mut layout = ButtonLayout::new();
        layout.button_count = IVec2::new(cols as i32, rows as i32);
        layout.start(Vec2::new(self.widget.min().x, self.widget.max().y));
        layout.set_total_size(area);

        let first = self.scrollbar.first();
        for (i, key) in self.buttons.iter().enumerate() {
            let Some(button) = arena.get_mut(*key) else {
                continue;
            };
            let row = i / cols;
            let base = button.base_mut();
            base.visible = row >= first && row < first + rows;
            if base.visible {
                layout.set_scalar_index(i - first * cols);
                layout.setup_pos_size(&mut base.widget);
            }
        }
    }

    pub fn handle_event(&mut self, arena: &mut ButtonArena, event: &Event) -> SelectorResponse {
        let mut response = SelectorResponse::default();
        if !self.widget.active || self.widget.alpha < INPUT_ALPHA || self.buttons.is_empty() {
            return response;
        }

        if self.scrollbar.handle_event(event, Some(&self.widget)) {
            self.layout(arena);
            response.handled = true;
            return response;
        }

        let before = self.selected;
        let rows = self.total_rows();
        let nav = self
            .nav
            .handle_event(&mut self.selected, self.buttons.len(), rows, event);
        response.handled |= nav.handled;
        if nav.activated {
            response.pressed = Some(self.selected);
        }
        if nav.moved && self.scrollbar.make_visible(self.selected / self.columns()) {
            self.layout(arena);
        }

        for key in &self.buttons {
            let Some(button) = arena.get_mut(*key) else {
                continue;
            };
            let r = handle_button_selected(button.as_mut(), event, Some(&mut self.selected));
            response.handled |= r.handled;
            if r.activated {
                response.pressed = button.base().index;
            }
        }

        if self.selected != before {
            response.moved = true;
            self.nav.reset();
        }
        if let Some(index) = response.pressed {
            log::debug!("selector pressed {}", index);
        }
        response
    }

    pub fn render(&self, arena: &ButtonArena, sink: &mut dyn DrawSink, measure: &dyn TextMeasure) {
        for (i, key) in self.buttons.iter().enumerate() {
            let Some(button) = arena.get(*key) else {
                continue;
            };
            let selected = i == self.selected;
            button.render(sink, measure, selected);
            if selected && button.base().visible {
                button.base().render_selected(
                    sink,
                    self.selected_bg_color,
                    self.selected_line_color,
                    self.widget.alpha,
                );
            }
        }
        self.scrollbar.render(sink, self.widget.alpha);
    }
}
