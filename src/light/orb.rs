//! Orb light source
//!
//! A colored blob with a Gaussian falloff that wanders around the disc.
//! Angular speed runs through a hold/accelerate/hold/decelerate cycle and the
//! radius breathes in and out on its own period.

use embassy_time::{Duration, Instant};

use super::{LightKind, LightSource};
use crate::color::Color;
use crate::math::{
    angular_difference, ease_cosine, ease_out_expo, gaussian_falloff, progress, seconds,
};
use crate::ring::{Disc, MAX_RING, PolarCoord};
use crate::transition::ValueTransition;

/// Updates closer together than this are skipped
pub const MIN_UPDATE_INTERVAL: Duration = Duration::from_millis(2);

/// Default blur radius in ring units
pub const DEFAULT_SIGMA: f32 = 1.2;

/// Upper bound of phase switches handled in one update
const MAX_PHASE_STEPS: usize = 8;

/// Squared distance between two points using the orb metric
///
/// The angular separation is scaled by the mean radius, which approximates
/// the physical LED spacing across rings of different population.
pub fn orb_distance_sq(source: PolarCoord, target: PolarCoord) -> f32 {
    let d_theta = angular_difference(target.theta, source.theta);
    let mean_r = (target.r + source.r) / 2.0;
    let d_r = target.r - source.r;
    let arc = d_theta * mean_r;
    arc * arc + d_r * d_r
}

/// Distance between two points using the orb metric
pub fn orb_distance(source: PolarCoord, target: PolarCoord) -> f32 {
    libm::sqrtf(orb_distance_sq(source, target))
}

/// Motion parameters of an orb
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionProfile {
    /// Angular speed during the slow hold, radians per second
    pub min_speed: f32,
    /// Angular speed during the fast hold, radians per second
    pub max_speed: f32,
    /// Duration of each hold phase
    pub hold: Duration,
    /// Duration of each acceleration/deceleration phase
    pub ramp: Duration,
    /// Steepness of the exponential speed easing
    pub easing: f32,
    /// Period of the expand/hold/contract/hold radius envelope
    pub breath_period: Duration,
    /// Radius added at the peak of the envelope (ring units, may be negative)
    pub expansion: f32,
}

impl MotionProfile {
    /// No motion at all, used for scripted orbs
    pub const STILL: Self = Self {
        min_speed: 0.0,
        max_speed: 0.0,
        hold: Duration::from_millis(1_000),
        ramp: Duration::from_millis(1_000),
        easing: 4.0,
        breath_period: Duration::from_millis(1_000),
        expansion: 0.0,
    };

    /// Calm wandering
    pub const DRIFT: Self = Self {
        min_speed: 0.15,
        max_speed: 1.2,
        hold: Duration::from_millis(1_800),
        ramp: Duration::from_millis(1_400),
        easing: 4.0,
        breath_period: Duration::from_millis(6_000),
        expansion: 0.6,
    };

    /// Fast orbiting
    pub const SPIN: Self = Self {
        min_speed: 1.5,
        max_speed: 4.5,
        hold: Duration::from_millis(900),
        ramp: Duration::from_millis(700),
        easing: 5.0,
        breath_period: Duration::from_millis(3_000),
        expansion: -0.5,
    };

    /// Speed at a point of a ramp, `progress` in `0.0..=1.0`
    fn ramp_speed(&self, progress: f32, accelerating: bool) -> f32 {
        let eased = ease_out_expo(progress, self.easing);
        let span = self.max_speed - self.min_speed;
        if accelerating {
            self.min_speed + span * eased
        } else {
            self.max_speed - span * eased
        }
    }

    /// Radius envelope (0.0-1.0) at a point of the breathing period
    fn envelope(&self, since_created: Duration) -> f32 {
        let period = self.breath_period.as_micros();
        if period == 0 {
            return 0.0;
        }
        let quarter = period / 4;
        let position = since_created.as_micros() % period;
        let step = Duration::from_micros(position % quarter.max(1));
        let p = progress(step, Duration::from_micros(quarter));

        match position / quarter.max(1) {
            0 => ease_cosine(p),
            1 => 1.0,
            2 => 1.0 - ease_cosine(p),
            _ => 0.0,
        }
    }
}

impl Default for MotionProfile {
    fn default() -> Self {
        Self::DRIFT
    }
}

/// Phase of the angular speed cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedPhase {
    HoldSlow,
    Accelerate,
    HoldFast,
    Decelerate,
}

impl SpeedPhase {
    const fn next(self) -> Self {
        match self {
            Self::HoldSlow => Self::Accelerate,
            Self::Accelerate => Self::HoldFast,
            Self::HoldFast => Self::Decelerate,
            Self::Decelerate => Self::HoldSlow,
        }
    }
}

/// Moving Gaussian light blob
#[derive(Debug, Clone)]
pub struct Orb {
    origin: PolarCoord,
    base_radius: f32,
    color: ValueTransition<Color>,
    intensity: f32,
    sigma: f32,
    motion: MotionProfile,
    created: Instant,
    last_update: Instant,
    phase: SpeedPhase,
    phase_start: Instant,
    direction: f32,
    speed: f32,
}

impl Orb {
    pub fn new(origin: PolarCoord, color: Color, now: Instant) -> Self {
        Self {
            origin,
            base_radius: origin.r,
            color: ValueTransition::new_color(color),
            intensity: 1.0,
            sigma: DEFAULT_SIGMA,
            motion: MotionProfile::STILL,
            created: now,
            last_update: now,
            phase: SpeedPhase::HoldSlow,
            phase_start: now,
            direction: 1.0,
            speed: 0.0,
        }
    }

    #[must_use]
    pub const fn with_motion(mut self, motion: MotionProfile) -> Self {
        self.motion = motion;
        self.speed = motion.min_speed;
        self
    }

    #[must_use]
    pub const fn with_sigma(mut self, sigma: f32) -> Self {
        self.sigma = sigma;
        self
    }

    #[must_use]
    pub const fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }

    /// Start orbiting in the opposite direction
    #[must_use]
    pub const fn reversed(mut self) -> Self {
        self.direction = -self.direction;
        self
    }

    pub const fn color(&self) -> Color {
        self.color.current()
    }

    /// Fade to a new color
    pub fn set_color(&mut self, color: Color, duration: Duration, now: Instant) {
        self.color.set(color, duration, now);
    }

    pub const fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity.max(0.0);
    }

    pub const fn sigma(&self) -> f32 {
        self.sigma
    }

    pub fn set_sigma(&mut self, sigma: f32) {
        self.sigma = sigma.max(f32::EPSILON);
    }

    /// Place the orb, used by scripted choreographies
    pub fn set_origin(&mut self, origin: PolarCoord) {
        self.origin = origin;
        self.base_radius = origin.r;
    }

    /// Continue after a pause without jumping ahead
    pub fn resume(&mut self, now: Instant) {
        let paused = now.saturating_duration_since(self.last_update);
        self.created += paused;
        self.phase_start += paused;
        self.last_update = now;
    }

    pub const fn speed(&self) -> f32 {
        self.speed
    }

    pub const fn direction(&self) -> f32 {
        self.direction
    }

    pub const fn phase(&self) -> SpeedPhase {
        self.phase
    }

    /// Contribution of this orb to the LED at `target`
    pub fn contribution(&self, target: PolarCoord) -> Color {
        let falloff = gaussian_falloff(orb_distance_sq(self.origin, target), self.sigma);
        self.color.current() * (self.intensity * falloff)
    }

    /// Advance the speed cycle up to `now`
    fn advance_speed(&mut self, now: Instant) {
        for _ in 0..MAX_PHASE_STEPS {
            let length = match self.phase {
                SpeedPhase::HoldSlow | SpeedPhase::HoldFast => self.motion.hold,
                SpeedPhase::Accelerate | SpeedPhase::Decelerate => self.motion.ramp,
            };
            let elapsed = now.saturating_duration_since(self.phase_start);
            if elapsed < length {
                let p = progress(elapsed, length);
                self.speed = match self.phase {
                    SpeedPhase::HoldSlow => self.motion.min_speed,
                    SpeedPhase::HoldFast => self.motion.max_speed,
                    SpeedPhase::Accelerate => self.motion.ramp_speed(p, true),
                    SpeedPhase::Decelerate => self.motion.ramp_speed(p, false),
                };
                return;
            }

            if self.phase == SpeedPhase::Decelerate {
                // Slowest point of the cycle
                self.direction = -self.direction;
            }
            self.phase = self.phase.next();
            self.phase_start += length;
        }

        // Stalled for several cycles, restart from the current phase
        self.phase_start = now;
    }
}

impl LightSource for Orb {
    fn update(&mut self, now: Instant) {
        let dt = now.saturating_duration_since(self.last_update);
        if dt < MIN_UPDATE_INTERVAL {
            return;
        }
        self.last_update = now;
        self.color.tick(now);

        self.advance_speed(now);
        let theta = self.origin.theta + self.direction * self.speed * seconds(dt);

        let envelope = self
            .motion
            .envelope(now.saturating_duration_since(self.created));
        #[allow(clippy::cast_precision_loss)]
        let r = (self.base_radius + self.motion.expansion * envelope).clamp(0.0, MAX_RING as f32);

        self.origin = PolarCoord::new(theta, r);
    }

    fn render(&self, disc: &mut Disc) {
        disc.accumulate(|coord| self.contribution(coord));
    }

    fn origin(&self) -> PolarCoord {
        self.origin
    }

    fn kind(&self) -> LightKind {
        LightKind::Orb
    }
}
