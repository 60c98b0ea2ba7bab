mod linear;
mod palette;
mod utils;

use core::ops::{Add, AddAssign, Div, Mul, Sub};

use smart_leds::{RGB8, hsv::Hsv as HSV};

pub use linear::LinearColor;
pub use palette::{PALETTE_SIZE, Palette};
pub use utils::{hsv2rgb, lerp_hsv, rgb2hsv};

pub type Rgb = RGB8;
pub type Hsv = HSV;

/// 8-bit color with saturating arithmetic
///
/// All operators clamp every channel into `0..=255`, so light sources can be
/// stacked on top of each other without wrapping around.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Returns true if any channel is non-zero
    ///
    /// Writes of a lit color are additive, writes of black overwrite.
    pub const fn is_lit(self) -> bool {
        self.r != 0 || self.g != 0 || self.b != 0
    }

    /// Create a color from a HSV triple (0-255 hue circle)
    pub fn from_hsv(hsv: Hsv) -> Self {
        hsv2rgb(hsv).into()
    }

    /// Convert to HSV (0-255 hue circle)
    pub fn to_hsv(self) -> Hsv {
        rgb2hsv(self.into())
    }
}

#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scale_channel(value: u8, factor: f32) -> u8 {
    // Float to int casts saturate, NaN becomes 0
    (f32::from(value) * factor) as u8
}

impl Add for Color {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            r: self.r.saturating_add(other.r),
            g: self.g.saturating_add(other.g),
            b: self.b.saturating_add(other.b),
        }
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Color {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            r: self.r.saturating_sub(other.r),
            g: self.g.saturating_sub(other.g),
            b: self.b.saturating_sub(other.b),
        }
    }
}

impl Mul<f32> for Color {
    type Output = Self;

    fn mul(self, factor: f32) -> Self {
        Self {
            r: scale_channel(self.r, factor),
            g: scale_channel(self.g, factor),
            b: scale_channel(self.b, factor),
        }
    }
}

impl Div<f32> for Color {
    type Output = Self;

    fn div(self, divisor: f32) -> Self {
        self * divisor.recip()
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::new(rgb.r, rgb.g, rgb.b)
    }
}

impl From<Color> for Rgb {
    fn from(color: Color) -> Self {
        Rgb {
            r: color.r,
            g: color.g,
            b: color.b,
        }
    }
}

impl From<Hsv> for Color {
    fn from(hsv: Hsv) -> Self {
        Self::from_hsv(hsv)
    }
}
