//! Transient centered message
//!
//! Any thread may post a message; the UI thread renders it until it expires.
//! Time is whatever clock the caller passes in, in seconds.

use parking_lot::Mutex;
use tessera_gui::{push_rect, theme, Color, DrawSink, TextAlign, TextRun, Vec2, Widget, PAD_DIST};

/// Fraction of the display time spent fading out at the end
const FADE_FRACTION: f32 = 0.25;

#[derive(Debug, Clone)]
struct OverlayState {
    message: String,
    start_time: f32,
    color: Color,
}

#[derive(Debug)]
pub struct OverlayMessage {
    pub widget: Widget,
    /// Seconds a message stays up
    pub total_time: f32,
    pub text_size: f32,
    pub align: TextAlign,
    /// Draw a box behind the text
    pub border: bool,
    pub default_color: Color,
    state: Mutex<OverlayState>,
}

impl Default for OverlayMessage {
    fn default() -> Self {
        Self {
            widget: Widget::default(),
            total_time: 1.0,
            text_size: 14.0,
            align: TextAlign::Center,
            border: false,
            default_color: theme::GUI_TEXT,
            state: Mutex::new(OverlayState {
                message: String::new(),
                start_time: f32::NEG_INFINITY,
                color: theme::GUI_TEXT,
            }),
        }
    }
}

impl OverlayMessage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `message` starting at `now`. Returns true if the text or color
    /// changed; reposting the same message only restarts the timer.
    pub fn set_message(&self, message: &str, color: Option<Color>, now: f32) -> bool {
        let color = color.unwrap_or(self.default_color);
        let mut state = self.state.lock();
        let changed = state.message != message || state.color != color;
        if changed {
            state.message = message.to_string();
            state.color = color;
            log::trace!("overlay message '{}'", message);
        }
        state.start_time = now;
        changed
    }

    pub fn message(&self) -> String {
        self.state.lock().message.clone()
    }

    /// Restart (or expire) the current message
    pub fn set_visible(&self, visible: bool, now: f32) {
        let mut state = self.state.lock();
        state.start_time = if visible {
            now
        } else {
            f32::NEG_INFINITY
        };
    }

    pub fn is_visible(&self, now: f32) -> bool {
        self.alpha(now) > 0.0
    }

    /// Opacity at `now`: full, then fading over the last part of the display
    /// time
    pub fn alpha(&self, now: f32) -> f32 {
        let state = self.state.lock();
        if state.message.is_empty() {
            return 0.0;
        }
        let age = now - state.start_time;
        if !(0.0..self.total_time).contains(&age) {
            return 0.0;
        }
        let fade = FADE_FRACTION * self.total_time;
        let left = self.total_time - age;
        if fade > 0.0 && left < fade {
            left / fade
        } else {
            1.0
        }
    }

    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.start_time = f32::NEG_INFINITY;
        state.message.clear();
    }

    pub fn render(&self, sink: &mut dyn DrawSink, now: f32) {
        let alpha = self.alpha(now) * self.widget.alpha;
        if alpha <= 0.0 {
            return;
        }
        let (message, color) = {
            let state = self.state.lock();
            (state.message.clone(), state.color)
        };
        if self.border {
            let line_h = self.text_size * 1.2;
            let lines = message.lines().count().max(1) as f32;
            let half = Vec2::new(
                0.5 * self.widget.size.x.max(self.text_size),
                0.5 * line_h * lines + 2.0 * PAD_DIST,
            );
            push_rect(
                sink,
                self.widget.position,
                half,
                theme::GUI_TOOL_BG,
                color,
                alpha,
            );
        }
        let line_h = self.text_size * 1.2;
        let count = message.lines().count();
        let mut y = self.widget.position.y + 0.5 * line_h * (count as f32 - 1.0);
        for line in message.lines() {
            sink.text(
                TextRun::new(
                    Vec2::new(self.widget.position.x, y),
                    line,
                    self.text_size,
                    color.scale_alpha(alpha),
                )
                .with_align(self.align),
            );
            y -= line_h;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tessera_gui::DrawList;

    #[test]
    fn test_set_message_reports_change() {
        let overlay = OverlayMessage::new();
        assert!(overlay.set_message("Saved", None, 0.0));
        assert!(!overlay.set_message("Saved", None, 0.5));
        assert!(overlay.set_message("Saved", Some(theme::ORANGE), 0.5));
        assert!(overlay.set_message("Loaded", Some(theme::ORANGE), 0.6));
    }

    #[test]
    fn test_visibility_follows_clock() {
        let mut overlay = OverlayMessage::new();
        overlay.total_time = 2.0;
        assert!(!overlay.is_visible(0.0));
        overlay.set_message("hello", None, 10.0);
        assert!(!overlay.is_visible(9.0));
        assert_eq!(overlay.alpha(10.5), 1.0);
        assert!((overlay.alpha(11.75) - 0.5).abs() < 1e-4);
        assert!(!overlay.is_visible(12.0));

        overlay.set_visible(true, 20.0);
        assert!(overlay.is_visible(20.1));
        overlay.set_visible(false, 20.1);
        assert!(!overlay.is_visible(20.2));

        overlay.reset();
        overlay.set_visible(true, 30.0);
        assert!(!overlay.is_visible(30.0));
    }

    #[test]
    fn test_post_from_other_thread() {
        let overlay = Arc::new(OverlayMessage::new());
        let poster = Arc::clone(&overlay);
        std::thread::spawn(move || poster.set_message("autosave done", None, 1.0))
            .join()
            .expect("poster thread");
        assert_eq!(overlay.message(), "autosave done");

        let mut list = DrawList::new();
        overlay.render(&mut list, 1.2);
        assert!(list.contains_text("autosave done"));
    }
}
