//! Text measurement
//!
//! Font metrics live outside the widget layer. Widgets that size themselves
//! around text, or map a pointer to a character cell, ask a [`TextMeasure`].

use glam::Vec2;

/// Backend-agnostic text metrics
pub trait TextMeasure {
    /// Size of a single line of text
    fn text_size(&self, text: &str, font_size: f32) -> Vec2;

    /// Advance and line height of one character cell (monospace consoles)
    fn char_size(&self, font_size: f32) -> Vec2 {
        self.text_size("M", font_size)
    }
}

/// Fixed-advance metrics, adequate for monospace fonts and for tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonoMeasure {
    /// Advance per character as a fraction of font size
    pub advance: f32,
    /// Line height as a fraction of font size
    pub line_height: f32,
}

impl Default for MonoMeasure {
    fn default() -> Self {
        Self {
            advance: 0.6,
            line_height: 1.2,
        }
    }
}

impl TextMeasure for MonoMeasure {
    fn text_size(&self, text: &str, font_size: f32) -> Vec2 {
        let lines = text.split('\n');
        let mut widest = 0usize;
        let mut count = 0usize;
        for line in lines {
            widest = widest.max(line.chars().count());
            count += 1;
        }
        Vec2::new(
            widest as f32 * self.advance * font_size,
            count as f32 * self.line_height * font_size,
        )
    }

    fn char_size(&self, font_size: f32) -> Vec2 {
        Vec2::new(self.advance * font_size, self.line_height * font_size)
    }
}
