//! Hue slider plus saturation/value square

use tessera_gui::{
    push_rect, theme, Color, DrawSink, Event, MouseButton, Vec2, Vec3, Widget, PAD_DIST,
};
use tessera_gui_macros::WithBuilders;

use crate::option_slider::OptionSlider;

/// Number of discrete hue steps, one per degree
pub const HUE_STEPS: usize = 360;

#[derive(Debug, Clone, WithBuilders)]
pub struct ColorPickerStyle {
    /// Height of the hue strip below the square
    pub hue_height: f32,
    /// Cells per side used to shade the square
    pub grid_cells: usize,
    pub line_color: Color,
    pub cursor_color: Color,
}

impl Default for ColorPickerStyle {
    fn default() -> Self {
        Self {
            hue_height: 12.0 * PAD_DIST,
            grid_cells: 16,
            line_color: theme::GUI_FG,
            cursor_color: theme::WHITE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorResponse {
    pub handled: bool,
    pub changed: bool,
}

/// Color chooser. The RGB value is derived from (hue, saturation, value) on
/// every call to [`ColorPicker::color`].
#[derive(Debug, Clone)]
pub struct ColorPicker {
    pub widget: Widget,
    pub style: ColorPickerStyle,
    pub hue: OptionSlider,
    /// Saturation/value region
    pub square: Widget,
    /// Saturation in x, value in y, both in [0, 1]
    sv: Vec2,
    dragging: bool,
}

impl Default for ColorPicker {
    fn default() -> Self {
        let mut hue = OptionSlider::new(HUE_STEPS);
        hue.allow_binary = false;
        Self {
            widget: Widget::default(),
            style: ColorPickerStyle::default(),
            hue,
            square: Widget::default(),
            sv: Vec2::ONE,
            dragging: false,
        }
    }
}

impl ColorPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place the square above the hue strip inside `position`/`size`
    pub fn layout(&mut self, position: Vec2, size: Vec2) {
        self.widget.position = position;
        self.widget.size = size;
        let strip = self.style.hue_height.min(size.y);
        let top = position.y + 0.5 * size.y;
        let bottom = position.y - 0.5 * size.y;

        let square_h = (size.y - strip - 2.0 * PAD_DIST).max(0.0);
        self.square = Widget::new(
            Vec2::new(position.x, top - 0.5 * square_h),
            Vec2::new(size.x, square_h),
        );
        self.hue.widget = Widget::new(
            Vec2::new(position.x, bottom + 0.5 * strip),
            Vec2::new(size.x, strip),
        );
    }

    pub fn set_initial_color(&mut self, color: Color) {
        let hsv = color.to_hsv();
        self.hue.set_value(hsv.x.floor() as usize % HUE_STEPS);
        self.sv = Vec2::new(hsv.y, hsv.z);
    }

    pub fn hsv(&self) -> Vec3 {
        Vec3::new(self.hue.value() as f32, self.sv.x, self.sv.y)
    }

    pub fn color(&self) -> Color {
        let hsv = self.hsv();
        Color::from_hsv(hsv.x, hsv.y, hsv.z)
    }

    fn sv_at(&self, pos: Vec2) -> Vec2 {
        let size = self.square.size.max(Vec2::splat(f32::EPSILON));
        ((pos - self.square.min()) / size).clamp(Vec2::ZERO, Vec2::ONE)
    }

    fn drag_to(&mut self, pos: Vec2, response: &mut ColorResponse) {
        let sv = self.sv_at(pos);
        response.handled = true;
        if sv != self.sv {
            self.sv = sv;
            response.changed = true;
        }
    }

    pub fn handle_event(&mut self, event: &Event) -> ColorResponse {
        let mut response = ColorResponse::default();
        if !self.widget.active {
            return response;
        }
        match *event {
            Event::PointerDown {
                button: MouseButton::Left,
                pos,
            } if self.square.contains(pos) => {
                self.dragging = true;
                self.drag_to(pos, &mut response);
            }
            Event::PointerDragged { pos, .. } if self.dragging => {
                self.drag_to(pos, &mut response);
            }
            Event::PointerUp {
                button: MouseButton::Left,
                ..
            } if self.dragging => {
                self.dragging = false;
                response.handled = true;
            }
            Event::LostFocus => {
                self.dragging = false;
                self.hue.handle_event(event);
            }
            _ => {
                let r = self.hue.handle_event(event);
                response.handled = r.handled;
                response.changed = r.changed;
            }
        }
        if event.is_pointer_motion() {
            if let Some(pos) = event.pointer_pos() {
                self.widget.hovered = self.widget.contains(pos);
            }
        }
        response
    }

    pub fn render(&self, sink: &mut dyn DrawSink, alpha: f32) {
        let alpha = alpha * self.widget.alpha;
        let cells = self.style.grid_cells.max(1);
        let hue = self.hue.value() as f32;
        let cell = self.square.size / cells as f32;
        let min = self.square.min();
        for row in 0..cells {
            for col in 0..cells {
                let s = (col as f32 + 0.5) / cells as f32;
                let v = (row as f32 + 0.5) / cells as f32;
                let center = min + cell * Vec2::new(col as f32 + 0.5, row as f32 + 0.5);
                push_rect(
                    sink,
                    center,
                    0.5 * cell,
                    Color::from_hsv(hue, s, v),
                    Color::transparent(),
                    alpha,
                );
            }
        }
        push_rect(
            sink,
            self.square.position,
            self.square.half_size(),
            Color::transparent(),
            self.style.line_color,
            alpha,
        );

        let strip = &self.hue.widget;
        let strip_cell = strip.size.x / cells as f32;
        for col in 0..cells {
            let h = (col as f32 + 0.5) / cells as f32 * 360.0;
            push_rect(
                sink,
                Vec2::new(strip.min().x + strip_cell * (col as f32 + 0.5), strip.position.y),
                Vec2::new(0.5 * strip_cell, 0.5 * strip.size.y),
                Color::from_hsv(h, 1.0, 1.0),
                Color::transparent(),
                alpha,
            );
        }
        self.hue.render(sink, alpha);

        let cursor = min + self.sv * self.square.size;
        push_rect(
            sink,
            cursor,
            Vec2::splat(2.0 * PAD_DIST),
            self.color(),
            self.style.cursor_color,
            alpha,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_gui::DrawList;

    fn picker() -> ColorPicker {
        let mut p = ColorPicker::new();
        p.layout(Vec2::new(100.0, 100.0), Vec2::new(100.0, 128.0));
        p
    }

    fn close(a: Color, b: Color) -> bool {
        (a.r - b.r).abs() < 0.02 && (a.g - b.g).abs() < 0.02 && (a.b - b.b).abs() < 0.02
    }

    #[test]
    fn test_layout_stacks_square_over_strip() {
        let p = picker();
        assert!(p.square.min().y > p.hue.widget.max().y);
        assert_eq!(p.hue.values(), HUE_STEPS);
        assert!(!p.hue.is_binary());
    }

    #[test]
    fn test_initial_color_round_trips() {
        let mut p = picker();
        let orange = Color::rgb(1.0, 0.5, 0.0);
        p.set_initial_color(orange);
        assert_eq!(p.hue.value(), 30);
        assert!(close(p.color(), orange));
    }

    #[test]
    fn test_square_drag_clamps_to_unit_range() {
        let mut p = picker();
        let r = p.handle_event(&Event::left_down(p.square.position));
        assert!(r.changed);
        let hsv = p.hsv();
        assert!((hsv.y - 0.5).abs() < 1e-4 && (hsv.z - 0.5).abs() < 1e-4);

        p.handle_event(&Event::dragged(Vec2::new(-1000.0, 1000.0)));
        assert_eq!(p.hsv().y, 0.0);
        assert_eq!(p.hsv().z, 1.0);
        p.handle_event(&Event::left_up(Vec2::ZERO));

        // released: further motion does nothing
        let r = p.handle_event(&Event::dragged(p.square.position));
        assert!(!r.changed);
    }

    #[test]
    fn test_color_follows_hue_slider_without_caching() {
        let mut p = picker();
        assert!(close(p.color(), Color::rgb(1.0, 0.0, 0.0)));
        let strip = p.hue.widget;
        let third = Vec2::new(strip.min().x + strip.size.x / 3.0 + 0.01, strip.position.y);
        p.handle_event(&Event::left_down(third));
        assert_eq!(p.hue.value(), 120);
        assert!(close(p.color(), Color::rgb(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_render_shades_grid() {
        let mut p = picker();
        p.style.grid_cells = 4;
        let mut list = DrawList::new();
        p.render(&mut list, 1.0);
        assert!(list.len() >= 4 * 4 + 4);
    }
}
