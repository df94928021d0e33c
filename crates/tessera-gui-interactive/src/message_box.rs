//! Modal message and confirmation boxes
//!
//! Both fade in through `alpha2` and ignore input until they are mostly
//! visible.

use tessera_gui::{
    push_rect, theme, Color, DrawSink, Event, TextMeasure, TextRun, Vec2, Widget, INPUT_ALPHA,
    PAD_DIST,
};
use tessera_gui_macros::WithBuilders;

use crate::button::{Button, ButtonWidget};

#[derive(Debug, Clone, WithBuilders)]
pub struct MessageBoxStyle {
    pub title_size: f32,
    pub message_size: f32,
    pub bg_color: Color,
    pub line_color: Color,
    pub title_color: Color,
    pub message_color: Color,
    /// Seconds for a full fade in or out
    pub fade_time: f32,
    pub padding: Vec2,
}

impl Default for MessageBoxStyle {
    fn default() -> Self {
        Self {
            title_size: 24.0,
            message_size: 16.0,
            bg_color: theme::MENU_BG,
            line_color: theme::GUI_FG_ACTIVE,
            title_color: theme::GUI_TEXT,
            message_color: theme::GUI_TEXT,
            fade_time: 0.2,
            padding: Vec2::splat(8.0 * PAD_DIST),
        }
    }
}

/// A title, a message and an OK button
#[derive(Debug, Clone)]
pub struct MessageBox {
    pub widget: Widget,
    pub style: MessageBoxStyle,
    pub title: String,
    pub message: String,
    /// Fade of the whole box; input is ignored below [`INPUT_ALPHA`]
    pub alpha2: f32,
    pub ok_button: Button,
}

impl Default for MessageBox {
    fn default() -> Self {
        let mut ok_button = Button::new("OK");
        ok_button.set_return_keys();
        Self {
            widget: Widget {
                active: false,
                ..Default::default()
            },
            style: MessageBoxStyle::default(),
            title: String::new(),
            message: String::new(),
            alpha2: 0.0,
            ok_button,
        }
    }
}

impl MessageBox {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn is_open(&self) -> bool {
        self.widget.active
    }

    /// Show the box and start fading in
    pub fn open(&mut self) {
        self.widget.active = true;
        self.alpha2 = 0.0;
        log::debug!("message box '{}' opened", self.title);
    }

    /// Start fading out
    pub fn close(&mut self) {
        self.widget.active = false;
    }

    /// Advance the fade by `dt` seconds
    pub fn update_fade(&mut self, dt: f32) {
        let step = if self.style.fade_time > 0.0 {
            dt / self.style.fade_time
        } else {
            1.0
        };
        self.alpha2 = if self.widget.active {
            (self.alpha2 + step).min(1.0)
        } else {
            (self.alpha2 - step).max(0.0)
        };
        self.ok_button.base.sub_alpha = self.alpha2;
    }

    pub fn accepts_input(&self) -> bool {
        self.widget.active && self.alpha2 >= INPUT_ALPHA
    }

    /// Size the box around its text and center it on `center`, leaving room
    /// for `buttons` across the bottom
    fn layout_with(
        &mut self,
        measure: &dyn TextMeasure,
        center: Vec2,
        buttons: &mut [&mut Button],
    ) {
        let pad = self.style.padding;
        let title = measure.text_size(&self.title, self.style.title_size);
        let message = measure.text_size(&self.message, self.style.message_size);

        let mut row = Vec2::ZERO;
        for button in buttons.iter_mut() {
            button.fit_size(measure);
            row.x += button.base.widget.size.x;
            row.y = row.y.max(button.base.widget.size.y);
        }
        row.x += 2.0 * PAD_DIST * buttons.len().saturating_sub(1) as f32;

        let width = title.x.max(message.x).max(row.x) + 2.0 * pad.x;
        let height = title.y + message.y + row.y + 4.0 * pad.y;
        self.widget.position = center;
        self.widget.size = Vec2::new(width, height);

        let bottom = self.widget.min().y + pad.y + 0.5 * row.y;
        let mut x = center.x - 0.5 * row.x;
        for button in buttons.iter_mut() {
            let w = &mut button.base.widget;
            w.size.y = row.y;
            w.position = Vec2::new(x + 0.5 * w.size.x, bottom);
            x += w.size.x + 2.0 * PAD_DIST;
        }
    }

    pub fn layout(&mut self, measure: &dyn TextMeasure, center: Vec2) {
        let mut ok = std::mem::take(&mut self.ok_button);
        self.layout_with(measure, center, &mut [&mut ok]);
        self.ok_button = ok;
    }

    /// Returns true once OK was activated; the box then closes
    pub fn handle_event(&mut self, event: &Event) -> bool {
        if !self.accepts_input() {
            return false;
        }
        if self.ok_button.handle_event(event).activated {
            log::debug!("message box '{}' dismissed", self.title);
            self.close();
            return true;
        }
        false
    }

    fn render_frame(&self, sink: &mut dyn DrawSink) {
        let alpha = self.alpha2 * self.widget.alpha;
        let pad = self.style.padding;
        push_rect(
            sink,
            self.widget.position,
            self.widget.half_size(),
            self.style.bg_color,
            self.style.line_color,
            alpha,
        );
        let top = self.widget.max().y - pad.y;
        let title_h = self.style.title_size * 1.2;
        sink.text(TextRun::new(
            Vec2::new(self.widget.position.x, top - 0.5 * title_h),
            self.title.as_str(),
            self.style.title_size,
            self.style.title_color.scale_alpha(alpha),
        ));
        let line_h = self.style.message_size * 1.2;
        let mut y = top - title_h - pad.y - 0.5 * line_h;
        for line in self.message.lines() {
            sink.text(TextRun::new(
                Vec2::new(self.widget.position.x, y),
                line,
                self.style.message_size,
                self.style.message_color.scale_alpha(alpha),
            ));
            y -= line_h;
        }
    }

    pub fn render(&self, sink: &mut dyn DrawSink, measure: &dyn TextMeasure) {
        if self.alpha2 <= 0.0 {
            return;
        }
        self.render_frame(sink);
        self.ok_button.render(sink, measure, false);
    }
}

/// A message box asking yes or no
#[derive(Debug, Clone)]
pub struct ConfirmDialog {
    pub inner: MessageBox,
    pub cancel_button: Button,
}

impl Default for ConfirmDialog {
    fn default() -> Self {
        let mut inner = MessageBox::default();
        inner.ok_button.set_yes_keys();
        let mut cancel_button = Button::new("Cancel");
        cancel_button.set_no_keys();
        Self {
            inner,
            cancel_button,
        }
    }
}

impl ConfirmDialog {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        let mut dialog = Self::default();
        dialog.inner.title = title.into();
        dialog.inner.message = message.into();
        dialog
    }

    pub fn open(&mut self) {
        self.inner.open();
    }

    pub fn is_open(&self) -> bool {
        self.inner.is_open()
    }

    pub fn update_fade(&mut self, dt: f32) {
        self.inner.update_fade(dt);
        self.cancel_button.base.sub_alpha = self.inner.alpha2;
    }

    pub fn layout(&mut self, measure: &dyn TextMeasure, center: Vec2) {
        let mut ok = std::mem::take(&mut self.inner.ok_button);
        self.inner
            .layout_with(measure, center, &mut [&mut ok, &mut self.cancel_button]);
        self.inner.ok_button = ok;
    }

    /// `Some(true)` for OK, `Some(false)` for Cancel. Either closes the dialog.
    pub fn handle_event(&mut self, event: &Event) -> Option<bool> {
        if !self.inner.accepts_input() {
            return None;
        }
        let selection = if self.inner.ok_button.handle_event(event).activated {
            Some(true)
        } else if self.cancel_button.handle_event(event).activated {
            Some(false)
        } else {
            None
        };
        if let Some(choice) = selection {
            log::debug!("confirm '{}' answered {}", self.inner.title, choice);
            self.inner.close();
        }
        selection
    }

    pub fn render(&self, sink: &mut dyn DrawSink, measure: &dyn TextMeasure) {
        if self.inner.alpha2 <= 0.0 {
            return;
        }
        self.inner.render_frame(sink);
        self.inner.ok_button.render(sink, measure, false);
        self.cancel_button.render(sink, measure, false);
    }
}
