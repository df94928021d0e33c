//! Floating text boxes for tooltips

use tessera_gui::{
    push_rect, theme, Color, DrawSink, TextAlign, TextMeasure, TextRun, Vec2, Widget, PAD_DIST,
};
use tessera_gui_macros::WithBuilders;

/// A box of text drawn near an anchor point and kept inside the viewport
#[derive(Debug, Clone, WithBuilders)]
pub struct TextBox {
    /// Visible area, from the origin to this corner
    #[with_builders(into)]
    pub viewport: Vec2,
    pub font_size: f32,
    pub fg_color: Color,
    pub bg_color: Color,
    pub text_color: Color,
    #[with_builders(into)]
    pub padding: Vec2,
    pub alpha: f32,
}

impl Default for TextBox {
    fn default() -> Self {
        Self {
            viewport: Vec2::new(1280.0, 720.0),
            font_size: 14.0,
            fg_color: theme::GUI_FG,
            bg_color: theme::GUI_TOOL_BG,
            text_color: theme::GUI_TEXT,
            padding: Vec2::splat(2.0 * PAD_DIST),
            alpha: 1.0,
        }
    }
}

impl TextBox {
    /// Where the box lands for `text` anchored at `anchor`.
    ///
    /// The box sits just above the anchor and is shifted back on screen if it
    /// would cross a viewport edge.
    pub fn placement(&self, measure: &dyn TextMeasure, anchor: Vec2, text: &str) -> Widget {
        let size = measure.text_size(text, self.font_size) + 2.0 * self.padding;
        let half = 0.5 * size;
        let mut center = anchor + Vec2::new(0.0, half.y + PAD_DIST);
        center = center.max(half).min((self.viewport - half).max(half));
        Widget::new(center, size)
    }

    pub fn draw(
        &self,
        sink: &mut dyn DrawSink,
        measure: &dyn TextMeasure,
        anchor: Vec2,
        text: &str,
    ) -> Widget {
        let rect = self.placement(measure, anchor, text);
        push_rect(
            sink,
            rect.position,
            rect.half_size(),
            self.bg_color,
            self.fg_color,
            self.alpha,
        );

        let line_h = measure.char_size(self.font_size).y;
        let left = rect.min().x + self.padding.x;
        let mut y = rect.max().y - self.padding.y - 0.5 * line_h;
        for line in text.lines() {
            sink.text(
                TextRun::new(
                    Vec2::new(left, y),
                    line,
                    self.font_size,
                    self.text_color.scale_alpha(self.alpha),
                )
                .with_align(TextAlign::Left),
            );
            y -= line_h;
        }
        rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_gui::{DrawList, MonoMeasure};

    #[test]
    fn test_box_stays_inside_viewport() {
        let tb = TextBox::default()
            .with_viewport([200.0, 100.0])
            .with_padding((4.0, 2.0));
        let m = MonoMeasure::default();
        let rect = tb.placement(&m, Vec2::new(199.0, 99.0), "a rather long tooltip");
        assert!(rect.max().x <= 200.0 + 1e-3);
        assert!(rect.max().y <= 100.0 + 1e-3);
        assert!(rect.min().x >= -1e-3);
    }

    #[test]
    fn test_one_run_per_line() {
        let mut list = DrawList::new();
        TextBox::default().draw(
            &mut list,
            &MonoMeasure::default(),
            Vec2::new(300.0, 300.0),
            "first\nsecond",
        );
        let lines: Vec<_> = list.texts().map(|r| r.text.as_str()).collect();
        assert_eq!(lines, ["first", "second"]);
    }
}
