use core::fmt;

use super::{Color, Hsv, lerp_hsv};

/// Number of lights in a palette
pub const PALETTE_SIZE: usize = 3;

/// Three HSV lights requested together with a state
#[derive(Clone, Copy)]
pub struct Palette {
    lights: [Hsv; PALETTE_SIZE],
}

impl Palette {
    pub const fn new(lights: [Hsv; PALETTE_SIZE]) -> Self {
        Self { lights }
    }

    /// Palette with the same light three times
    pub const fn uniform(light: Hsv) -> Self {
        Self {
            lights: [light; PALETTE_SIZE],
        }
    }

    pub fn from_colors(colors: [Color; PALETTE_SIZE]) -> Self {
        Self {
            lights: colors.map(Color::to_hsv),
        }
    }

    pub const fn lights(&self) -> &[Hsv; PALETTE_SIZE] {
        &self.lights
    }

    /// Light `index` as RGB, wraps around for indices past the palette size
    pub fn color(&self, index: usize) -> Color {
        Color::from_hsv(self.lights[index % PALETTE_SIZE])
    }

    pub fn colors(&self) -> [Color; PALETTE_SIZE] {
        self.lights.map(Color::from_hsv)
    }

    /// Interpolate every light along the shortest hue path
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            lights: core::array::from_fn(|i| lerp_hsv(self.lights[i], other.lights[i], t)),
        }
    }
}

impl PartialEq for Palette {
    fn eq(&self, other: &Self) -> bool {
        self.lights.iter().zip(other.lights.iter()).all(|(a, b)| {
            a.hue == b.hue && a.sat == b.sat && a.val == b.val
        })
    }
}

impl fmt::Debug for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for light in &self.lights {
            list.entry(&(light.hue, light.sat, light.val));
        }
        list.finish()
    }
}
