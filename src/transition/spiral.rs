//! Spiral fusion choreography
//!
//! Three orbs spiral into the center, fuse, flash and spiral back out to
//! their home positions. Their colors travel from a source palette to a
//! target palette over the whole run.
//!
//! Phases: `In -> Fusion -> Flash -> Expansion -> Out -> Done`.

use core::f32::consts::PI;

use embassy_time::{Duration, Instant};

use crate::color::{Color, PALETTE_SIZE, Palette};
use crate::light::{DEFAULT_SIGMA, LightSource, MotionProfile, Orb, orb_distance};
use crate::math::{ease_in_out_cubic, lerp, progress, signed_angular_delta};
use crate::ring::{Disc, PolarCoord};

/// Pairwise separation below which the orbs count as fused
pub const FUSION_THRESHOLD: f32 = 0.25;

/// Extra rotation picked up on the way in
const SPIN: f32 = PI;

/// Angle the orbs converge on
const FUSION_ANGLE: f32 = 0.0;

/// Blur of the orbs once merged in the center
const FUSED_SIGMA: f32 = 1.8;

/// Blur of the center flash
const FLASH_SIGMA: f32 = 1.6;

/// Share of the total duration spent in each phase
const PHASE_SHARES: [(FusionPhase, f32); 5] = [
    (FusionPhase::In, 0.35),
    (FusionPhase::Fusion, 0.10),
    (FusionPhase::Flash, 0.10),
    (FusionPhase::Expansion, 0.20),
    (FusionPhase::Out, 0.25),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FusionPhase {
    In,
    Fusion,
    Flash,
    Expansion,
    Out,
    Done,
}

/// Position on the inward spiral from `home` towards the center
///
/// The angle moves along the shortest arc to `fusion_angle` while the radius
/// collapses cubically, `e` runs from 0.0 (home) to 1.0 (center).
///
/// The radius has to shrink faster than the angular gap of two orbs that
/// approach the fusion angle from opposite sides can grow, otherwise their
/// separation would briefly increase.
pub fn spiral_in(home: PolarCoord, fusion_angle: f32, e: f32) -> PolarCoord {
    let e = e.clamp(0.0, 1.0);
    let theta = home.theta + signed_angular_delta(home.theta, fusion_angle) * e;
    let shrink = 1.0 - e;
    PolarCoord::new(theta, home.r * shrink * shrink * shrink)
}

/// Split the overall progress into a phase and the progress within it
fn phase_at(p: f32) -> (FusionPhase, f32) {
    if p >= 1.0 {
        return (FusionPhase::Done, 1.0);
    }
    let mut start = 0.0;
    for (phase, share) in PHASE_SHARES {
        let end = start + share;
        if p < end {
            return (phase, ((p - start) / share).clamp(0.0, 1.0));
        }
        start = end;
    }
    (FusionPhase::Done, 1.0)
}

/// Scripted three-orb recolor
#[derive(Debug, Clone)]
pub struct SpiralFusion {
    started: Instant,
    duration: Duration,
    phase: FusionPhase,
    local: f32,
    homes: [PolarCoord; PALETTE_SIZE],
    source: Palette,
    target: Palette,
    orbs: [Orb; PALETTE_SIZE],
    flash: Orb,
}

impl SpiralFusion {
    pub fn new(
        homes: [PolarCoord; PALETTE_SIZE],
        source: Palette,
        target: Palette,
        now: Instant,
        duration: Duration,
    ) -> Self {
        let colors = source.colors();
        let orbs = core::array::from_fn(|i| {
            Orb::new(homes[i], colors[i], now).with_motion(MotionProfile::STILL)
        });
        let flash = Orb::new(PolarCoord::CENTER, Color::WHITE, now)
            .with_sigma(FLASH_SIGMA)
            .with_intensity(0.0);

        Self {
            started: now,
            duration,
            phase: FusionPhase::In,
            local: 0.0,
            homes,
            source,
            target,
            orbs,
            flash,
        }
    }

    pub const fn phase(&self) -> FusionPhase {
        self.phase
    }

    pub const fn is_complete(&self) -> bool {
        matches!(self.phase, FusionPhase::Done)
    }

    pub const fn orbs(&self) -> &[Orb; PALETTE_SIZE] {
        &self.orbs
    }

    pub const fn target(&self) -> &Palette {
        &self.target
    }

    /// Overall progress at `now` (0.0-1.0)
    pub fn progress(&self, now: Instant) -> f32 {
        progress(now.saturating_duration_since(self.started), self.duration)
    }

    /// Largest distance between any two orbs
    pub fn max_separation(&self) -> f32 {
        let mut max = 0.0f32;
        for i in 0..PALETTE_SIZE {
            for j in (i + 1)..PALETTE_SIZE {
                max = max.max(orb_distance(self.orbs[i].origin(), self.orbs[j].origin()));
            }
        }
        max
    }

    /// Weights of the outgoing and incoming snapshots for the current phase
    pub fn weights(&self) -> (f32, f32) {
        let eased = ease_in_out_cubic(self.local);
        match self.phase {
            FusionPhase::In => (1.0 - eased, 0.0),
            FusionPhase::Fusion | FusionPhase::Flash => (0.0, 0.0),
            FusionPhase::Expansion => (0.0, 0.5 * eased),
            FusionPhase::Out => (0.0, 0.5 + 0.5 * eased),
            FusionPhase::Done => (0.0, 1.0),
        }
    }

    /// Advance the choreography to `now`
    pub fn update(&mut self, now: Instant) {
        let p = self.progress(now);
        let (phase, local) = phase_at(p);
        self.phase = phase;
        self.local = local;

        let palette = self.source.lerp(&self.target, ease_in_out_cubic(p));
        let eased = ease_in_out_cubic(local);

        // Position along the spiral, 0.0 = home, 1.0 = center
        let (depth, intensity, sigma, flash) = match phase {
            FusionPhase::In => (eased, 1.0, DEFAULT_SIGMA, 0.0),
            FusionPhase::Fusion => (1.0, 1.0, lerp(DEFAULT_SIGMA, FUSED_SIGMA, eased), 0.0),
            FusionPhase::Flash => (1.0, 1.0, FUSED_SIGMA, libm::sinf(PI * local)),
            FusionPhase::Expansion => (
                1.0 - 0.5 * eased,
                1.0,
                lerp(FUSED_SIGMA, DEFAULT_SIGMA, eased),
                0.0,
            ),
            FusionPhase::Out => (0.5 * (1.0 - eased), 1.0 - eased, DEFAULT_SIGMA, 0.0),
            FusionPhase::Done => (0.0, 0.0, DEFAULT_SIGMA, 0.0),
        };

        for (i, orb) in self.orbs.iter_mut().enumerate() {
            let position = spiral_in(self.homes[i], FUSION_ANGLE, depth).rotated(SPIN * depth);
            orb.set_origin(position);
            orb.set_color(palette.color(i), Duration::from_ticks(0), now);
            orb.set_intensity(intensity);
            orb.set_sigma(sigma);
        }
        self.flash.set_intensity(flash);
    }

    /// Add the orbs and the flash to the disc
    pub fn render(&self, disc: &mut Disc) {
        for orb in &self.orbs {
            orb.render(disc);
        }
        if self.flash.intensity() > 0.0 {
            self.flash.render(disc);
        }
    }
}
