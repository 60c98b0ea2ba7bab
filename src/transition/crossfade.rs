use embassy_time::{Duration, Instant};

use super::Frame;
use crate::color::LinearColor;
use crate::math::{ease_in_out_cubic, progress};

/// Blend two colors with cubic easing, `t` is the raw progress (0.0-1.0)
pub fn blend(from: LinearColor, to: LinearColor, t: f32) -> LinearColor {
    LinearColor::mix(from, to, ease_in_out_cubic(t))
}

/// Blend two frames LED by LED
pub fn blend_frames(from: &Frame, to: &Frame, t: f32, out: &mut Frame) {
    let eased = ease_in_out_cubic(t);
    for ((out, &a), &b) in out.iter_mut().zip(from.iter()).zip(to.iter()) {
        *out = LinearColor::mix(a, b, eased);
    }
}

/// Time-bounded blend between two snapshots
#[derive(Debug, Clone, Copy)]
pub struct Crossfade {
    started: Instant,
    duration: Duration,
}

impl Crossfade {
    pub const fn new(started: Instant, duration: Duration) -> Self {
        Self { started, duration }
    }

    pub const fn started(&self) -> Instant {
        self.started
    }

    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Raw progress at `now` (0.0-1.0)
    pub fn progress(&self, now: Instant) -> f32 {
        progress(now.saturating_duration_since(self.started), self.duration)
    }

    pub fn is_complete(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }

    /// Write the blended frame for `now`
    pub fn compose(&self, now: Instant, from: &Frame, to: &Frame, out: &mut Frame) {
        blend_frames(from, to, self.progress(now), out);
    }
}
