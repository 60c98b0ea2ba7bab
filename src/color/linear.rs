use super::Color;

/// Color with floating point channels (0.0-255.0)
///
/// Used as the interchange format of the transition engine, so blending
/// happens before the final quantization to bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LinearColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl LinearColor {
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Blend two colors, `t = 0.0` returns `a` and `t = 1.0` returns `b`
    ///
    /// Written as a convex combination so both endpoints are exact.
    pub fn mix(a: Self, b: Self, t: f32) -> Self {
        let s = 1.0 - t;
        Self {
            r: a.r * s + b.r * t,
            g: a.g * s + b.g * t,
            b: a.b * s + b.b * t,
        }
    }

    /// Scale all channels
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            r: self.r * factor,
            g: self.g * factor,
            b: self.b * factor,
        }
    }

    /// Add two colors without clamping
    pub fn plus(self, other: Self) -> Self {
        Self {
            r: self.r + other.r,
            g: self.g + other.g,
            b: self.b + other.b,
        }
    }

    /// Quantize back to an 8-bit color, rounding and clamping every channel
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_color(self) -> Color {
        Color {
            r: libm::roundf(self.r) as u8,
            g: libm::roundf(self.g) as u8,
            b: libm::roundf(self.b) as u8,
        }
    }
}

impl From<Color> for LinearColor {
    fn from(color: Color) -> Self {
        Self {
            r: f32::from(color.r),
            g: f32::from(color.g),
            b: f32::from(color.b),
        }
    }
}

impl From<LinearColor> for Color {
    fn from(color: LinearColor) -> Self {
        color.to_color()
    }
}
