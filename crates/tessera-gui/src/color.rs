use glam::Vec3;

/// Alpha below which a color is not drawn
pub const ALPHA_EPSILON: f32 = 0.001;

/// RGBA color with components in [0, 1]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::transparent()
    }
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    pub const fn transparent() -> Self {
        Self::rgba(0.0, 0.0, 0.0, 0.0)
    }

    /// Unpack a `0xAARRGGBB` constant
    pub const fn argb(c: u32) -> Self {
        Self::rgba(
            ((c >> 16) & 0xff) as f32 / 255.0,
            ((c >> 8) & 0xff) as f32 / 255.0,
            (c & 0xff) as f32 / 255.0,
            ((c >> 24) & 0xff) as f32 / 255.0,
        )
    }

    /// Unpack an opaque `0xRRGGBB` constant
    pub const fn hex(c: u32) -> Self {
        Self::argb(0xff00_0000 | c)
    }

    /// Pack into `0xAARRGGBB`
    pub fn to_argb(&self) -> u32 {
        let q = |x: f32| (x.clamp(0.0, 1.0) * 255.0).round() as u32;
        (q(self.a) << 24) | (q(self.r) << 16) | (q(self.g) << 8) | q(self.b)
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    /// Multiply alpha, used to apply widget fades
    pub fn scale_alpha(mut self, factor: f32) -> Self {
        self.a *= factor;
        self
    }

    pub fn is_visible(&self) -> bool {
        self.a > ALPHA_EPSILON
    }

    pub fn lerp(&self, other: &Color, t: f32) -> Color {
        Color::rgba(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// Build an opaque color from hue in degrees [0, 360), saturation and value in [0, 1]
    pub fn from_hsv(h: f32, s: f32, v: f32) -> Self {
        let s = s.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);
        if s <= 0.0 {
            return Color::rgb(v, v, v);
        }
        let h = h.rem_euclid(360.0) / 60.0;
        let sector = h.floor();
        let f = h - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        match sector as u32 {
            0 => Color::rgb(v, t, p),
            1 => Color::rgb(q, v, p),
            2 => Color::rgb(p, v, t),
            3 => Color::rgb(p, q, v),
            4 => Color::rgb(t, p, v),
            _ => Color::rgb(v, p, q),
        }
    }

    /// Hue in degrees [0, 360), saturation and value in [0, 1]
    pub fn to_hsv(&self) -> Vec3 {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let delta = max - min;

        let h = if delta <= f32::EPSILON {
            0.0
        } else if max == self.r {
            60.0 * ((self.g - self.b) / delta).rem_euclid(6.0)
        } else if max == self.g {
            60.0 * ((self.b - self.r) / delta + 2.0)
        } else {
            60.0 * ((self.r - self.g) / delta + 4.0)
        };
        let s = if max <= 0.0 { 0.0 } else { delta / max };
        Vec3::new(h.rem_euclid(360.0), s, max)
    }
}

/// Shared widget palette
pub mod theme {
    use super::Color;

    pub const GUI_BG: Color = Color::argb(0xb020_2020);
    pub const GUI_BG_ACTIVE: Color = Color::argb(0xf040_4040);
    pub const GUI_FG: Color = Color::argb(0xf090_9090);
    pub const GUI_FG_MID: Color = Color::argb(0xf0b8_b8b8);
    pub const GUI_FG_ACTIVE: Color = Color::argb(0xffff_ffff);
    pub const GUI_TEXT: Color = Color::argb(0xfff0_f0f0);
    pub const GUI_TEXT_LOW: Color = Color::argb(0xff80_8080);
    pub const GUI_INACTIVE: Color = Color::argb(0xa0a0_a0a0);
    pub const GUI_TOOL_BG: Color = Color::argb(0xc000_0000);

    pub const TEXT_BG: Color = Color::argb(0x8010_1010);
    pub const TEXT_BG_ACTIVE: Color = Color::argb(0xa630_3030);
    pub const MENU_BG: Color = Color::argb(0xf020_2020);
    pub const BG_GRID: Color = Color::argb(0x6030_3050);

    pub const TARGET: Color = Color::hex(0xff3a3c);
    pub const ORANGE: Color = Color::hex(0xff6f1f);
    pub const BLACK: Color = Color::hex(0x000000);
    pub const WHITE: Color = Color::hex(0xffffff);
}
