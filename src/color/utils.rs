pub use smart_leds::hsv::hsv2rgb;

use crate::color::{Hsv, Rgb};
use crate::math::lerp;

/// Convert RGB to HSV (all channels are 0-255).
///
/// Hue is represented on a 0-255 circle, matching `smart_leds::hsv::Hsv`.
#[allow(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn rgb2hsv(rgb: Rgb) -> Hsv {
    let r = rgb.r;
    let g = rgb.g;
    let b = rgb.b;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max.wrapping_sub(min);

    let val = max;

    let sat = if max == 0 {
        0
    } else {
        ((u16::from(delta) * 255) / u16::from(max)) as u8
    };

    // 0, 85, 171 offsets for R/G/B sectors
    let hue = if delta == 0 {
        0
    } else if max == r {
        let h = (43i16 * (i16::from(g) - i16::from(b))) / i16::from(delta);
        if h < 0 { (h + 256) as u8 } else { h as u8 }
    } else if max == g {
        let h = 85i16 + (43i16 * (i16::from(b) - i16::from(r))) / i16::from(delta);
        if h < 0 { (h + 256) as u8 } else { h as u8 }
    } else {
        let h = 171i16 + (43i16 * (i16::from(r) - i16::from(g))) / i16::from(delta);
        if h < 0 { (h + 256) as u8 } else { h as u8 }
    };

    Hsv { hue, sat, val }
}

/// Interpolate between two HSV colors
///
/// Hue travels along the shortest arc of the 0-255 circle,
/// `t` is clamped to `0.0..=1.0`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap
)]
pub fn lerp_hsv(a: Hsv, b: Hsv, t: f32) -> Hsv {
    let t = t.clamp(0.0, 1.0);
    let hue_delta = f32::from(b.hue.wrapping_sub(a.hue) as i8);
    let hue_step = libm::roundf(hue_delta * t) as i16;

    Hsv {
        hue: (i16::from(a.hue) + hue_step).rem_euclid(256) as u8,
        sat: libm::roundf(lerp(f32::from(a.sat), f32::from(b.sat), t)) as u8,
        val: libm::roundf(lerp(f32::from(a.val), f32::from(b.val), t)) as u8,
    }
}
