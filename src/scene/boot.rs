use embassy_time::{Duration, Instant};

use super::Scene;
use crate::color::{Color, PALETTE_SIZE, Palette};
use crate::math::progress;
use crate::ring::{Disc, LedAddress, RING_COUNT, ring_size};
use crate::transition::ValueTransition;

/// Time each ring takes to light up
const RING_STEP: Duration = Duration::from_millis(250);

const BOOT_COLOR: Color = Color::new(180, 170, 150);

/// Rings light up one after another from the center, then hold
#[derive(Debug, Clone)]
pub struct BootScene {
    started: Instant,
    color: ValueTransition<Color>,
}

impl BootScene {
    pub const fn new(now: Instant) -> Self {
        Self {
            started: now,
            color: ValueTransition::new_color(BOOT_COLOR),
        }
    }

    /// Brightness of a ring at `now` (0.0-1.0)
    pub fn ring_level(&self, ring: usize, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.started);
        let starts = RING_STEP * u32::try_from(ring.min(RING_COUNT)).unwrap_or(0);
        if elapsed < starts {
            return 0.0;
        }
        progress(elapsed - starts, RING_STEP)
    }

    /// Returns true once every ring is fully lit
    pub fn is_complete(&self, now: Instant) -> bool {
        self.ring_level(RING_COUNT - 1, now) >= 1.0
    }
}

impl Scene for BootScene {
    fn render(&mut self, now: Instant, disc: &mut Disc) {
        self.color.tick(now);
        for ring in 0..RING_COUNT {
            let color = self.color.current() * self.ring_level(ring, now);
            if !color.is_lit() {
                continue;
            }
            for slot in 0..ring_size(ring) {
                disc.write(LedAddress { ring, slot }, color);
            }
        }
    }

    fn apply_palette(&mut self, palette: &Palette, duration: Duration, now: Instant) {
        self.color.set(palette.color(0), duration, now);
    }

    fn palette(&self) -> Palette {
        Palette::from_colors([self.color.current(); PALETTE_SIZE])
    }
}
