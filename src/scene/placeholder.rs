//! Placeholder tint scene
//!
//! Three slowly circling orbs share one tint. Changing the tint runs a
//! spiral fusion: the orbs converge, flash and come back out in the new
//! color.

use embassy_time::{Duration, Instant};

use super::Scene;
use crate::color::{Color, PALETTE_SIZE, Palette};
use crate::light::{LightSource, MotionProfile, Orb};
use crate::ring::Disc;
use crate::transition::{DEFAULT_TRANSITION_DURATION, SpiralFusion, spiral_homes};

/// Tint used until a parameter color is set
pub const DEFAULT_PLACEHOLDER_TINT: Color = Color::new(20, 245, 255);

/// Constant slow rotation
const CIRCLE: MotionProfile = MotionProfile {
    min_speed: 0.4,
    max_speed: 0.4,
    hold: Duration::from_millis(4_000),
    ramp: Duration::from_millis(1_000),
    easing: 4.0,
    breath_period: Duration::from_millis(5_000),
    expansion: 0.0,
};

#[derive(Debug, Clone)]
pub struct PlaceholderScene {
    orbs: [Orb; PALETTE_SIZE],
    tint: Color,
    recolor: Option<SpiralFusion>,
    recolor_duration: Duration,
}

impl PlaceholderScene {
    pub fn new(tint: Color, now: Instant) -> Self {
        let homes = spiral_homes();
        Self {
            orbs: homes.map(|home| Orb::new(home, tint, now).with_motion(CIRCLE)),
            tint,
            recolor: None,
            recolor_duration: DEFAULT_TRANSITION_DURATION,
        }
    }

    #[must_use]
    pub const fn with_recolor_duration(mut self, duration: Duration) -> Self {
        self.recolor_duration = duration;
        self
    }

    /// Duration of later tint changes, a recolor in progress keeps its own
    pub const fn set_recolor_duration(&mut self, duration: Duration) {
        self.recolor_duration = duration;
    }

    pub const fn recolor_duration(&self) -> Duration {
        self.recolor_duration
    }

    pub const fn tint(&self) -> Color {
        self.tint
    }

    pub const fn is_recoloring(&self) -> bool {
        self.recolor.is_some()
    }

    pub const fn recolor(&self) -> Option<&SpiralFusion> {
        self.recolor.as_ref()
    }

    pub const fn orbs(&self) -> &[Orb; PALETTE_SIZE] {
        &self.orbs
    }

    fn finish_recolor(&mut self, now: Instant) {
        for orb in &mut self.orbs {
            orb.set_intensity(1.0);
            orb.resume(now);
        }
    }
}

impl Scene for PlaceholderScene {
    fn render(&mut self, now: Instant, disc: &mut Disc) {
        if let Some(fusion) = self.recolor.as_mut() {
            fusion.update(now);
            if !fusion.is_complete() {
                fusion.render(disc);
                // The resting orbs come back in under the fusion
                let (_, weight) = fusion.weights();
                for orb in &mut self.orbs {
                    orb.set_intensity(weight);
                    if weight > 0.0 {
                        orb.render(disc);
                    }
                }
                return;
            }
            self.recolor = None;
            self.finish_recolor(now);
        }

        for orb in &mut self.orbs {
            orb.update(now);
            orb.render(disc);
        }
    }

    fn palette(&self) -> Palette {
        match &self.recolor {
            Some(fusion) => Palette::from_colors(fusion.orbs().each_ref().map(|orb| orb.color())),
            None => Palette::from_colors(self.orbs.each_ref().map(|orb| orb.color())),
        }
    }

    fn set_parameter(&mut self, color: Color, now: Instant) {
        if color == self.tint && self.recolor.is_none() {
            return;
        }
        let source = self.palette();
        let homes = self.orbs.each_ref().map(|orb| orb.origin());
        let target = Palette::uniform(color.to_hsv());
        self.recolor = Some(SpiralFusion::new(
            homes,
            source,
            target,
            now,
            self.recolor_duration,
        ));

        self.tint = color;
        for orb in &mut self.orbs {
            orb.set_color(color, Duration::from_ticks(0), now);
            orb.set_intensity(0.0);
        }
    }
}
