//! Widget geometry and the uniform grid layout solver
//!
//! All positions are in points with y growing upward. A widget is described by
//! its center and full size; grids are laid out from their upper left corner
//! with row 0 at the top.

use glam::{IVec2, Vec2};

/// Base padding distance between widgets, in points
pub const PAD_DIST: f32 = 2.0;

/// Padding applied on each side of a button inside its layout cell
pub const BUTTON_PAD: Vec2 = Vec2::new(2.0 * PAD_DIST, 2.0 * PAD_DIST);

/// Composite widgets stop taking input while fading below this alpha
pub const INPUT_ALPHA: f32 = 0.5;

/// Mirror a vector across the x axis (grid rows grow downward)
#[inline]
pub fn flip_y(v: Vec2) -> Vec2 {
    Vec2::new(v.x, -v.y)
}

/// Position, size and interaction flags shared by every widget kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Widget {
    /// Center of the widget
    pub position: Vec2,
    /// Full width and height in points
    pub size: Vec2,
    /// Pointer is currently inside the widget
    pub hovered: bool,
    /// Widget reacts to input. Inactive widgets still render, dimmed.
    pub active: bool,
    /// Visual fade. Composites ignore input while faded out.
    pub alpha: f32,
}

impl Default for Widget {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            size: Vec2::ZERO,
            hovered: false,
            active: true,
            alpha: 1.0,
        }
    }
}

impl Widget {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            ..Default::default()
        }
    }

    pub fn half_size(&self) -> Vec2 {
        0.5 * self.size
    }

    /// Lower left corner
    pub fn min(&self) -> Vec2 {
        self.position - self.half_size()
    }

    /// Upper right corner
    pub fn max(&self) -> Vec2 {
        self.position + self.half_size()
    }

    /// Check if a point lies within the widget bounds (edges inclusive)
    pub fn contains(&self, point: Vec2) -> bool {
        let d = (point - self.position).abs();
        let r = self.half_size();
        d.x <= r.x && d.y <= r.y
    }

    /// Whether a composite should process input at all
    pub fn accepts_input(&self) -> bool {
        self.active && self.alpha >= INPUT_ALPHA
    }

    /// Place this widget next to `last`.
    ///
    /// `direction` is a unit step such as `(1, 0)` for "to the right" or
    /// `(0, -1)` for "below". Collisions with other widgets are not resolved.
    pub fn set_adjacent(&mut self, last: &Widget, direction: Vec2) {
        self.position =
            last.position + (last.size + self.size + 2.0 * BUTTON_PAD) * (direction / 2.0);
    }
}

/// Uniform grid geometry for a set of equally sized buttons.
///
/// The layout does not own widgets; it computes positions and sizes which are
/// copied into widgets through [`ButtonLayout::setup_pos_size`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonLayout {
    /// Upper left corner of the grid
    pub start_pos: Vec2,
    /// Columns (x) and rows (y)
    pub button_count: IVec2,
    /// Size of a button, footprint minus padding
    pub button_size: Vec2,
    /// Size of one grid cell
    pub button_footprint: Vec2,
    /// Running cursor for row-by-row placement
    pub pos: Vec2,
    /// Current cell
    pub index: IVec2,
}

impl Default for ButtonLayout {
    fn default() -> Self {
        Self {
            start_pos: Vec2::ZERO,
            button_count: IVec2::ONE,
            button_size: Vec2::ZERO,
            button_footprint: Vec2::ZERO,
            pos: Vec2::ZERO,
            index: IVec2::ZERO,
        }
    }
}

impl ButtonLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row-major index of the current cell
    pub fn scalar_index(&self) -> usize {
        (self.index.y * self.button_count.x + self.index.x).max(0) as usize
    }

    pub fn set_scalar_index(&mut self, idx: usize) {
        let cols = self.button_count.x.max(1) as usize;
        self.index = IVec2::new((idx % cols) as i32, (idx / cols) as i32);
    }

    /// Staggered fade-in: cell `i` starts appearing once `intro * count` passes `i`
    pub fn button_alpha(&self, intro: f32) -> f32 {
        let i = self.scalar_index() as f32;
        let count = (self.button_count.x * self.button_count.y) as f32;
        if intro * count > i {
            intro.min(intro * count - i)
        } else {
            0.0
        }
    }

    /// Center of the current cell
    pub fn button_pos(&self) -> Vec2 {
        self.start_pos
            + Vec2::new(self.index.x as f32 + 0.5, -(self.index.y as f32 + 0.5))
                * self.button_footprint
    }

    /// Begin placement at the upper left corner `start`
    pub fn start(&mut self, start: Vec2) {
        self.start_pos = start;
        self.pos = start;
        self.index = IVec2::ZERO;
    }

    /// Move the placement cursor to the start of the next row
    pub fn row(&mut self) {
        self.pos.x = self.start_pos.x;
        self.pos.y -= self.button_footprint.y;
        self.index.x = 0;
        self.index.y += 1;
    }

    pub fn set_total_size(&mut self, size: Vec2) {
        self.set_button_footprint(size / self.button_count.max(IVec2::ONE).as_vec2());
    }

    pub fn total_size(&self) -> Vec2 {
        self.button_count.as_vec2() * self.button_footprint
    }

    pub fn set_button_footprint(&mut self, footprint: Vec2) {
        self.button_footprint = footprint;
        self.button_size = footprint - 2.0 * BUTTON_PAD;
    }

    /// Pick the smallest column count whose cells are at most twice as wide as
    /// they are tall, then size cells to fill `total_size`.
    ///
    /// Columns are tried from 1 up to `count`; if no count satisfies the ratio
    /// the grid degenerates to a single row.
    pub fn flow_count_total_size(&mut self, count: usize, total_size: Vec2) {
        if count > 0 {
            let mut cols = 0usize;
            loop {
                cols += 1;
                let rows = count.div_ceil(cols);
                let cell = total_size / Vec2::new(cols as f32, rows as f32);
                if cell.x <= 2.0 * cell.y || cols >= count {
                    self.button_count = IVec2::new(cols as i32, rows as i32);
                    break;
                }
            }
        }
        self.set_total_size(total_size);
    }

    /// Direct form when the column count is already known
    pub fn set_button_count(&mut self, count: usize, width: usize) {
        let width = width.max(1);
        self.button_count = IVec2::new(width as i32, count.div_ceil(width) as i32);
    }

    /// Copy the current cell's center and button size into a widget
    pub fn setup_pos_size(&self, widget: &mut Widget) {
        widget.position = self.button_pos();
        widget.size = self.button_size;
    }

    /// Size a widget spanning `slots` cells starting at the current cell
    pub fn setup_multi_pos_size(&self, widget: &mut Widget, slots: IVec2) {
        let base = self.start_pos + flip_y(self.index.as_vec2()) * self.button_footprint;
        let span = slots.as_vec2() * self.button_footprint;
        widget.position = base + 0.5 * flip_y(span);
        widget.size = span - BUTTON_PAD;
    }
}
