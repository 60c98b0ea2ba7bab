//! Float helpers shared by light sources and transitions.
//!
//! All transcendental functions go through `libm` so results do not depend
//! on the host platform.

use core::f32::consts::{PI, TAU};

use embassy_time::Duration;

/// Wrap an angle into `[0, 2π)`
pub fn normalize_angle(theta: f32) -> f32 {
    let wrapped = libm::fmodf(theta, TAU);
    let wrapped = if wrapped < 0.0 { wrapped + TAU } else { wrapped };
    // fmodf of a tiny negative value can round up to exactly TAU
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Shortest separation between two angles, in `[0, π]`
pub fn angular_difference(a: f32, b: f32) -> f32 {
    let delta = normalize_angle(a - b);
    if delta > PI { TAU - delta } else { delta }
}

/// Shortest signed step that takes angle `from` onto angle `to`, in `(-π, π]`
pub fn signed_angular_delta(from: f32, to: f32) -> f32 {
    let delta = normalize_angle(to - from);
    if delta > PI { delta - TAU } else { delta }
}

/// Convert degrees to radians
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * (PI / 180.0)
}

/// Linear interpolation
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Gaussian falloff `exp(-d² / 2σ²)` for a squared distance
pub fn gaussian_falloff(distance_sq: f32, sigma: f32) -> f32 {
    let sigma = sigma.max(f32::EPSILON);
    libm::expf(-distance_sq / (2.0 * sigma * sigma))
}

/// Cubic ease in out, maps `0.0..=1.0` onto itself
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

/// Cosine ease in out, maps `0.0..=1.0` onto itself
pub fn ease_cosine(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    (1.0 - libm::cosf(PI * t)) / 2.0
}

/// Exponential ease out with steepness `k`, normalized so that `1.0` maps to `1.0`
pub fn ease_out_expo(t: f32, k: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    (1.0 - libm::expf(-k * t)) / (1.0 - libm::expf(-k))
}

/// Hermite smoothstep between two edges
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Progress of `elapsed` through `duration`, clamped to `0.0..=1.0`
#[allow(clippy::cast_precision_loss)]
pub fn progress(elapsed: Duration, duration: Duration) -> f32 {
    let total = duration.as_micros();
    if total == 0 {
        return 1.0;
    }
    let done = elapsed.as_micros().min(total);
    done as f32 / total as f32
}

/// Elapsed time in seconds
#[allow(clippy::cast_precision_loss)]
pub fn seconds(duration: Duration) -> f32 {
    duration.as_micros() as f32 / 1_000_000.0
}
