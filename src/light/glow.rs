//! Breathing glow
//!
//! A radial wave that travels from the center to the outer ring and back.
//! The wave position is a raised cosine of elapsed time, so there is no jump
//! at cycle boundaries.

use core::f32::consts::TAU;

use embassy_time::{Duration, Instant};

use super::{LightKind, LightSource};
use crate::color::Color;
use crate::math::{seconds, smoothstep};
use crate::ring::{Disc, LedAddress, MAX_RING, PolarCoord, RING_COUNT, ring_size};
use crate::transition::ValueTransition;

/// Default half width of the lit front, in ring units
pub const DEFAULT_HALF_WIDTH: f32 = 0.6;

/// Ring-wide breathing light
#[derive(Debug, Clone)]
pub struct Glow {
    color: ValueTransition<Color>,
    period: Duration,
    half_width: f32,
    max_ring: f32,
    intensity: f32,
    floor: f32,
    created: Instant,
    elapsed: Duration,
}

impl Glow {
    pub fn new(color: Color, period: Duration, now: Instant) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let max_ring = MAX_RING as f32;
        Self {
            color: ValueTransition::new_color(color),
            period,
            half_width: DEFAULT_HALF_WIDTH,
            max_ring,
            intensity: 1.0,
            floor: 0.0,
            created: now,
            elapsed: Duration::from_ticks(0),
        }
    }

    #[must_use]
    pub const fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }

    /// Minimum level of every ring, so the disc never goes fully dark
    #[must_use]
    pub const fn with_floor(mut self, floor: f32) -> Self {
        self.floor = floor;
        self
    }

    #[must_use]
    pub const fn with_half_width(mut self, half_width: f32) -> Self {
        self.half_width = half_width;
        self
    }

    /// Outermost ring reached by the wave
    #[must_use]
    pub const fn with_max_ring(mut self, max_ring: f32) -> Self {
        self.max_ring = max_ring;
        self
    }

    pub const fn color(&self) -> Color {
        self.color.current()
    }

    /// Fade to a new color
    pub fn set_color(&mut self, color: Color, duration: Duration, now: Instant) {
        self.color.set(color, duration, now);
    }

    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Current wave position in ring units, `0.0..=max_ring`
    ///
    /// The phase is reduced in integer time first, so the wave stays smooth
    /// after long uptimes.
    pub fn wave_position(&self) -> f32 {
        let period = self.period.as_micros();
        if period == 0 {
            return 0.0;
        }
        let offset = Duration::from_micros(self.elapsed.as_micros() % period);
        let phase = seconds(offset) / seconds(self.period);
        self.max_ring * (1.0 - libm::cosf(TAU * phase)) / 2.0
    }

    /// Brightness of a ring for the current wave position (0.0-1.0)
    #[allow(clippy::cast_precision_loss)]
    pub fn ring_level(&self, ring: usize) -> f32 {
        if ring == 0 {
            return 1.0;
        }
        let offset = ring as f32 - self.wave_position();
        let level = 1.0 - smoothstep(-self.half_width, self.half_width, offset);
        level.max(self.floor)
    }
}

impl LightSource for Glow {
    fn update(&mut self, now: Instant) {
        self.elapsed = now.saturating_duration_since(self.created);
        self.color.tick(now);
    }

    fn render(&self, disc: &mut Disc) {
        let peak = self.color.current() * self.intensity;
        for ring in 0..RING_COUNT {
            let color = peak * self.ring_level(ring);
            if !color.is_lit() {
                continue;
            }
            for slot in 0..ring_size(ring) {
                disc.write(LedAddress { ring, slot }, color);
            }
        }
    }

    fn origin(&self) -> PolarCoord {
        PolarCoord::CENTER
    }

    fn kind(&self) -> LightKind {
        LightKind::Glow
    }
}
