//! Render-append surface
//!
//! Widgets describe their visuals once per frame by appending filled polygons,
//! line loops and text runs to a [`DrawSink`]. GPU submission is the
//! backend's business; [`DrawList`] simply records the calls.

use crate::color::{Color, ALPHA_EPSILON};
use glam::Vec2;

/// Horizontal anchoring of a text run relative to its position.
/// Runs are always vertically centered on `pos.y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// A single line of text to draw
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub pos: Vec2,
    pub text: String,
    pub font_size: f32,
    pub color: Color,
    pub align: TextAlign,
}

impl TextRun {
    pub fn new(pos: Vec2, text: impl Into<String>, font_size: f32, color: Color) -> Self {
        Self {
            pos,
            text: text.into(),
            font_size,
            color,
            align: TextAlign::Center,
        }
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }
}

/// Capability to append primitives to the frame's draw buffer
pub trait DrawSink {
    /// Convex filled polygon
    fn fill_poly(&mut self, points: &[Vec2], color: Color);

    /// Closed outline
    fn line_loop(&mut self, points: &[Vec2], color: Color);

    fn text(&mut self, run: TextRun);
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillPoly { points: Vec<Vec2>, color: Color },
    LineLoop { points: Vec<Vec2>, color: Color },
    Text(TextRun),
}

/// Vertex layout handed to GPU backends
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "bytemuck", derive(bytemuck::Pod, bytemuck::Zeroable))]
pub struct Vertex {
    pub pos: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    fn new(p: Vec2, c: Color) -> Self {
        Self {
            pos: [p.x, p.y],
            color: [c.r, c.g, c.b, c.a],
        }
    }
}

/// Recording draw sink for one frame
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call at the start of each frame
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Text runs in submission order
    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text(run) => Some(run),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|run| run.text.contains(needle))
    }

    /// Triangle list for all filled polygons (fan triangulation)
    pub fn triangle_vertices(&self) -> Vec<Vertex> {
        let mut out = Vec::new();
        for command in &self.commands {
            if let DrawCommand::FillPoly { points, color } = command {
                for i in 1..points.len().saturating_sub(1) {
                    out.push(Vertex::new(points[0], *color));
                    out.push(Vertex::new(points[i], *color));
                    out.push(Vertex::new(points[i + 1], *color));
                }
            }
        }
        out
    }

    /// Line list (vertex pairs) for all outlines
    pub fn line_vertices(&self) -> Vec<Vertex> {
        let mut out = Vec::new();
        for command in &self.commands {
            if let DrawCommand::LineLoop { points, color } = command {
                for (i, p) in points.iter().enumerate() {
                    let next = points[(i + 1) % points.len()];
                    out.push(Vertex::new(*p, *color));
                    out.push(Vertex::new(next, *color));
                }
            }
        }
        out
    }
}

impl DrawSink for DrawList {
    fn fill_poly(&mut self, points: &[Vec2], color: Color) {
        self.commands.push(DrawCommand::FillPoly {
            points: points.to_vec(),
            color,
        });
    }

    fn line_loop(&mut self, points: &[Vec2], color: Color) {
        self.commands.push(DrawCommand::LineLoop {
            points: points.to_vec(),
            color,
        });
    }

    fn text(&mut self, run: TextRun) {
        self.commands.push(DrawCommand::Text(run));
    }
}

/// Sink adapter that moves everything drawn through it by `offset`
pub struct OffsetSink<'a> {
    pub sink: &'a mut dyn DrawSink,
    pub offset: Vec2,
}

impl<'a> OffsetSink<'a> {
    pub fn new(sink: &'a mut dyn DrawSink, offset: Vec2) -> Self {
        Self { sink, offset }
    }

    fn shift(&self, points: &[Vec2]) -> Vec<Vec2> {
        points.iter().map(|p| *p + self.offset).collect()
    }
}

impl DrawSink for OffsetSink<'_> {
    fn fill_poly(&mut self, points: &[Vec2], color: Color) {
        let points = self.shift(points);
        self.sink.fill_poly(&points, color);
    }

    fn line_loop(&mut self, points: &[Vec2], color: Color) {
        let points = self.shift(points);
        self.sink.line_loop(&points, color);
    }

    fn text(&mut self, mut run: TextRun) {
        run.pos += self.offset;
        self.sink.text(run);
    }
}

/// Draw a button shape: a rectangle with two opposite corners cut by 10%.
///
/// `r` is the half size. Fill and outline are skipped when fully transparent.
pub fn push_button(sink: &mut dyn DrawSink, pos: Vec2, r: Vec2, bg: Color, fg: Color, alpha: f32) {
    const CUT: f32 = 0.1;
    let lerp = |a: f32, b: f32| a + (b - a) * CUT;
    let verts = [
        pos + Vec2::new(-r.x, lerp(r.y, -r.y)),
        pos + Vec2::new(lerp(-r.x, r.x), r.y),
        pos + Vec2::new(r.x, r.y),
        pos + Vec2::new(r.x, lerp(-r.y, r.y)),
        pos + Vec2::new(lerp(r.x, -r.x), -r.y),
        pos + Vec2::new(-r.x, -r.y),
    ];
    push_shape(sink, &verts, bg, fg, alpha);
}

/// Draw an axis aligned rectangle given its center and half size
pub fn push_rect(sink: &mut dyn DrawSink, pos: Vec2, r: Vec2, bg: Color, fg: Color, alpha: f32) {
    let verts = [
        pos + Vec2::new(-r.x, r.y),
        pos + Vec2::new(r.x, r.y),
        pos + Vec2::new(r.x, -r.y),
        pos + Vec2::new(-r.x, -r.y),
    ];
    push_shape(sink, &verts, bg, fg, alpha);
}

fn push_shape(sink: &mut dyn DrawSink, verts: &[Vec2], bg: Color, fg: Color, alpha: f32) {
    if alpha <= ALPHA_EPSILON {
        return;
    }
    if bg.is_visible() {
        sink.fill_poly(verts, bg.scale_alpha(alpha));
    }
    if fg.is_visible() {
        sink.line_loop(verts, fg.scale_alpha(alpha));
    }
}

/// Stack of bound render targets.
///
/// Mirrors the GPU's current framebuffer binding. Keep one per rendering
/// context and pass it to whatever binds targets.
#[derive(Debug, Clone)]
pub struct TargetStack<T> {
    stack: Vec<T>,
}

impl<T> Default for TargetStack<T> {
    fn default() -> Self {
        Self { stack: Vec::new() }
    }
}

impl<T> TargetStack<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, target: T) {
        self.stack.push(target);
    }

    /// Unbind the current target, returning to the previous one
    pub fn pop(&mut self) -> Option<T> {
        let popped = self.stack.pop();
        if popped.is_none() {
            log::warn!("render target stack underflow");
        }
        popped
    }

    /// Target `depth` levels below the top (0 is the current target)
    pub fn bound(&self, depth: usize) -> Option<&T> {
        self.stack.iter().rev().nth(depth)
    }

    pub fn current(&self) -> Option<&T> {
        self.stack.last()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme;

    #[test]
    fn test_push_button_emits_fill_and_outline() {
        let mut list = DrawList::new();
        push_button(
            &mut list,
            Vec2::ZERO,
            Vec2::new(10.0, 5.0),
            theme::GUI_BG,
            theme::GUI_FG,
            1.0,
        );
        assert_eq!(list.len(), 2);
        match &list.commands[0] {
            DrawCommand::FillPoly { points, .. } => assert_eq!(points.len(), 6),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(list.triangle_vertices().len(), 4 * 3);
        assert_eq!(list.line_vertices().len(), 6 * 2);
    }

    #[test]
    fn test_transparent_shapes_are_skipped() {
        let mut list = DrawList::new();
        push_rect(
            &mut list,
            Vec2::ZERO,
            Vec2::ONE,
            Color::transparent(),
            theme::GUI_FG,
            1.0,
        );
        assert_eq!(list.len(), 1);
        push_rect(&mut list, Vec2::ZERO, Vec2::ONE, theme::GUI_BG, theme::GUI_FG, 0.0);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_fade_scales_alpha() {
        let mut list = DrawList::new();
        push_rect(
            &mut list,
            Vec2::ZERO,
            Vec2::ONE,
            theme::WHITE,
            Color::transparent(),
            0.25,
        );
        match &list.commands[0] {
            DrawCommand::FillPoly { color, .. } => assert!((color.a - 0.25).abs() < 1e-6),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_offset_sink_moves_everything() {
        let mut list = DrawList::new();
        {
            let mut shifted = OffsetSink::new(&mut list, Vec2::new(10.0, 0.0));
            push_rect(&mut shifted, Vec2::ZERO, Vec2::ONE, theme::GUI_BG, theme::GUI_FG, 1.0);
            shifted.text(TextRun::new(Vec2::ZERO, "x", 10.0, theme::GUI_TEXT));
        }
        match &list.commands[0] {
            DrawCommand::FillPoly { points, .. } => assert_eq!(points[0], Vec2::new(9.0, 1.0)),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(list.texts().next().map(|r| r.pos), Some(Vec2::new(10.0, 0.0)));
    }

    #[test]
    fn test_target_stack() {
        let mut targets = TargetStack::new();
        assert!(targets.current().is_none());
        targets.push("scene");
        targets.push("bloom");
        assert_eq!(targets.current(), Some(&"bloom"));
        assert_eq!(targets.bound(1), Some(&"scene"));
        assert_eq!(targets.pop(), Some("bloom"));
        assert_eq!(targets.depth(), 1);
        targets.pop();
        assert_eq!(targets.pop(), None);
    }
}
