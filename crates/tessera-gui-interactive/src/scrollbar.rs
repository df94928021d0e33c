//! Scrollbar component
//!
//! A bounded window `[first, first + lines)` over `steps` rows. Every mutating
//! call leaves `first + lines <= steps`.

use tessera_gui::{
    push_rect, theme, Color, DrawSink, Event, Key, MouseButton, NamedKey, Vec2, Widget, PAD_DIST,
};
use tessera_gui_macros::WithBuilders;

/// Visual styling and feel of a scrollbar
#[derive(Debug, Clone, WithBuilders)]
pub struct ScrollbarStyle {
    /// Width of the track
    pub width: f32,
    /// Shortest the thumb may get
    pub min_thumb_length: f32,
    pub track_color: Color,
    pub thumb_color: Color,
    pub thumb_hover_color: Color,
    pub thumb_pressed_color: Color,
    /// Rows scrolled per unit of wheel delta
    pub wheel_rows: f32,
}

impl Default for ScrollbarStyle {
    fn default() -> Self {
        Self {
            width: 6.0 * PAD_DIST,
            min_thumb_length: 8.0 * PAD_DIST,
            track_color: theme::TEXT_BG,
            thumb_color: theme::GUI_FG,
            thumb_hover_color: theme::GUI_FG_MID,
            thumb_pressed_color: theme::GUI_FG_ACTIVE,
            wheel_rows: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ThumbDrag {
    pointer_y: f32,
    first: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Scrollbar {
    /// Track rectangle
    pub widget: Widget,
    pub style: ScrollbarStyle,
    first: usize,
    lines: usize,
    steps: usize,
    /// Fractional scroll position fed by the wheel
    sfirst: f32,
    thumb_hovered: bool,
    drag: Option<ThumbDrag>,
}

impl Scrollbar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the first visible row
    pub fn first(&self) -> usize {
        self.first
    }

    /// Number of visible rows
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Total number of rows
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// One past the last visible row
    pub fn last(&self) -> usize {
        (self.first + self.lines).min(self.steps)
    }

    /// Thumb is being dragged
    pub fn pressed(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_scrollable(&self) -> bool {
        self.steps > self.lines
    }

    fn max_first(&self) -> usize {
        self.steps - self.lines
    }

    /// Resize the window. `lines` is clamped to `steps`.
    pub fn set_window(&mut self, lines: usize, steps: usize) {
        self.steps = steps;
        self.lines = lines.min(steps);
        self.set_first(self.first);
    }

    /// Scroll to `first`, clamped into range
    pub fn set_first(&mut self, first: usize) {
        self.first = first.min(self.max_first());
        self.sfirst = self.first as f32;
    }

    pub fn scroll_by(&mut self, rows: isize) {
        self.set_first(self.first.saturating_add_signed(rows));
    }

    /// Scroll the least amount that brings `row` into view.
    /// Returns true if `first` changed.
    pub fn make_visible(&mut self, row: usize) -> bool {
        let old = self.first;
        if row < self.first {
            self.set_first(row);
        } else if self.lines > 0 && row >= self.first + self.lines {
            self.set_first(row + 1 - self.lines);
        }
        self.first != old
    }

    /// Hug the right edge of `parent`
    pub fn attach_to(&mut self, parent: &Widget) {
        self.widget.size = Vec2::new(self.style.width, parent.size.y);
        self.widget.position = Vec2::new(
            parent.max().x - 0.5 * self.style.width,
            parent.position.y,
        );
    }

    fn thumb_length(&self) -> f32 {
        let track = self.widget.size.y;
        if self.steps == 0 {
            return track;
        }
        (track * self.lines as f32 / self.steps as f32)
            .max(self.style.min_thumb_length)
            .min(track)
    }

    /// Distance the thumb can travel along the track
    pub fn track_length(&self) -> f32 {
        (self.widget.size.y - self.thumb_length()).max(0.0)
    }

    /// Thumb rectangle
    pub fn thumb(&self) -> Widget {
        let len = self.thumb_length();
        let offset = if self.is_scrollable() {
            self.track_length() * self.first as f32 / self.max_first() as f32
        } else {
            0.0
        };
        let top = self.widget.max().y;
        Widget::new(
            Vec2::new(self.widget.position.x, top - offset - 0.5 * len),
            Vec2::new(self.widget.size.x, len),
        )
    }

    /// Process one event. Wheel input counts anywhere inside `parent` (or the
    /// track itself when there is no parent). Returns true if consumed.
    pub fn handle_event(&mut self, event: &Event, parent: Option<&Widget>) -> bool {
        if !self.widget.active {
            return false;
        }
        match *event {
            Event::Wheel { pos, delta } => {
                let over = parent.is_some_and(|p| p.contains(pos)) || self.widget.contains(pos);
                if !over || !self.is_scrollable() {
                    return false;
                }
                self.sfirst = (self.sfirst - delta.y * self.style.wheel_rows)
                    .clamp(0.0, self.max_first() as f32);
                self.first = self.sfirst.floor() as usize;
                true
            }
            Event::PointerDown {
                button: MouseButton::Left,
                pos,
            } if self.is_scrollable() && self.widget.contains(pos) => {
                let thumb = self.thumb();
                if thumb.contains(pos) {
                    self.drag = Some(ThumbDrag {
                        pointer_y: pos.y,
                        first: self.first,
                    });
                } else if pos.y > thumb.position.y {
                    self.scroll_by(-(self.lines.max(1) as isize));
                } else {
                    self.scroll_by(self.lines.max(1) as isize);
                }
                true
            }
            Event::PointerMoved { pos, .. } | Event::PointerDragged { pos, .. } => {
                self.widget.hovered = self.widget.contains(pos);
                self.thumb_hovered = self.thumb().contains(pos);
                let Some(drag) = self.drag else {
                    return false;
                };
                let travel = self.track_length();
                if travel > 0.0 {
                    // pointer moving down scrolls toward later rows
                    let rows = (drag.pointer_y - pos.y) * self.max_first() as f32 / travel;
                    let first = (drag.first as f32 + rows).round().max(0.0);
                    self.set_first(first as usize);
                }
                true
            }
            Event::PointerUp {
                button: MouseButton::Left,
                ..
            } => self.drag.take().is_some(),
            Event::KeyDown(Key::Named(NamedKey::PageUp)) if self.is_scrollable() => {
                self.scroll_by(-(self.lines.max(1) as isize));
                true
            }
            Event::KeyDown(Key::Named(NamedKey::PageDown)) if self.is_scrollable() => {
                self.scroll_by(self.lines.max(1) as isize);
                true
            }
            Event::LostFocus => {
                self.drag = None;
                false
            }
            _ => false,
        }
    }

    pub fn render(&self, sink: &mut dyn DrawSink, alpha: f32) {
        if !self.is_scrollable() {
            return;
        }
        push_rect(
            sink,
            self.widget.position,
            self.widget.half_size(),
            self.style.track_color,
            Color::transparent(),
            alpha,
        );
        let color = if self.drag.is_some() {
            self.style.thumb_pressed_color
        } else if self.thumb_hovered {
            self.style.thumb_hover_color
        } else {
            self.style.thumb_color
        };
        let thumb = self.thumb();
        push_rect(
            sink,
            thumb.position,
            thumb.half_size(),
            color,
            Color::transparent(),
            alpha,
        );
    }
}
