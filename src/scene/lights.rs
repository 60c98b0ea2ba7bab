//! Scenes built from glows and orbs
//!
//! Dormant, Active, RespondToUser, Prompt, Processing and Error are all a
//! small set of light sources updated and rendered in order.

use embassy_time::{Duration, Instant};
use heapless::Vec;
use tracing::{debug, warn};

use super::Scene;
use crate::color::{Color, PALETTE_SIZE, Palette};
use crate::light::{Glow, LightSlot, MotionProfile, Orb};
use crate::ring::{Disc, PolarCoord};

/// Maximum number of light sources in one scene
pub const MAX_LIGHTS: usize = 4;

const DORMANT_COLOR: Color = Color::new(10, 40, 160);
const DORMANT_PERIOD: Duration = Duration::from_millis(7_000);

const ACTIVE_COLOR: Color = Color::new(0, 140, 130);
const ACTIVE_ORB_COLOR: Color = Color::new(60, 220, 200);
const ACTIVE_PERIOD: Duration = Duration::from_millis(4_000);

const ERROR_COLOR: Color = Color::new(255, 0, 0);
const ERROR_PERIOD: Duration = Duration::from_millis(1_000);

const PROMPT_GLOW_COLOR: Color = Color::new(30, 24, 10);
const PROMPT_GLOW_PERIOD: Duration = Duration::from_millis(5_000);

const RESPOND_COLORS: [Color; PALETTE_SIZE] = [
    Color::new(255, 120, 20),
    Color::new(200, 40, 200),
    Color::new(40, 90, 255),
];

const PROMPT_COLORS: [Color; PALETTE_SIZE] = [
    Color::new(255, 200, 60),
    Color::new(255, 140, 40),
    Color::new(255, 230, 150),
];

const PROCESSING_COLORS: [Color; PALETTE_SIZE] = [
    Color::new(40, 200, 255),
    Color::new(120, 80, 255),
    Color::new(20, 255, 160),
];

/// Slow, steady lap around the outer ring
const ORBIT: MotionProfile = MotionProfile {
    min_speed: 0.9,
    max_speed: 1.6,
    hold: Duration::from_millis(2_000),
    ramp: Duration::from_millis(1_500),
    easing: 3.0,
    breath_period: Duration::from_millis(4_000),
    expansion: -0.3,
};

/// Orbs evenly spread on one ring
fn spread_orbs(
    radius: f32,
    colors: [Color; PALETTE_SIZE],
    motion: MotionProfile,
    now: Instant,
) -> [Orb; PALETTE_SIZE] {
    core::array::from_fn(|i| {
        #[allow(clippy::cast_precision_loss)]
        let degrees = 360.0 * i as f32 / PALETTE_SIZE as f32;
        Orb::new(PolarCoord::from_degrees(degrees, radius), colors[i], now).with_motion(motion)
    })
}

/// Composition of glows and orbs
#[derive(Debug, Clone)]
pub struct LightScene {
    lights: Vec<LightSlot, MAX_LIGHTS>,
    palette_aware: bool,
}

impl LightScene {
    pub const fn new() -> Self {
        Self {
            lights: Vec::new(),
            palette_aware: false,
        }
    }

    /// Add a light source, dropped when the scene is full
    #[must_use]
    pub fn with_light(mut self, light: impl Into<LightSlot>) -> Self {
        if self.lights.push(light.into()).is_err() {
            warn!("scene is full, light dropped");
        }
        self
    }

    /// Let requested palettes recolor the orbs
    #[must_use]
    pub const fn palette_aware(mut self) -> Self {
        self.palette_aware = true;
        self
    }

    pub fn lights(&self) -> &[LightSlot] {
        &self.lights
    }

    pub const fn is_palette_aware(&self) -> bool {
        self.palette_aware
    }

    pub fn dormant(now: Instant) -> Self {
        Self::new().with_light(
            Glow::new(DORMANT_COLOR, DORMANT_PERIOD, now)
                .with_intensity(0.5)
                .with_floor(0.08),
        )
    }

    pub fn active(now: Instant) -> Self {
        Self::new()
            .with_light(Glow::new(ACTIVE_COLOR, ACTIVE_PERIOD, now).with_floor(0.1))
            .with_light(
                Orb::new(PolarCoord::from_degrees(90.0, 3.5), ACTIVE_ORB_COLOR, now)
                    .with_motion(MotionProfile::DRIFT),
            )
    }

    pub fn respond_to_user(now: Instant) -> Self {
        spread_orbs(3.0, RESPOND_COLORS, MotionProfile::DRIFT, now)
            .into_iter()
            .fold(Self::new(), |scene, orb| scene.with_light(orb))
            .palette_aware()
    }

    pub fn prompt(now: Instant) -> Self {
        Self::new()
            .with_light(
                Glow::new(PROMPT_GLOW_COLOR, PROMPT_GLOW_PERIOD, now)
                    .with_max_ring(2.0)
                    .with_floor(0.2),
            )
            .with_light(
                Orb::new(PolarCoord::from_degrees(0.0, 4.0), PROMPT_COLORS[0], now)
                    .with_motion(ORBIT),
            )
            .palette_aware()
    }

    pub fn processing(now: Instant) -> Self {
        spread_orbs(2.0, PROCESSING_COLORS, MotionProfile::SPIN, now)
            .into_iter()
            .fold(Self::new(), |scene, orb| scene.with_light(orb))
            .palette_aware()
    }

    pub fn error(now: Instant) -> Self {
        Self::new().with_light(Glow::new(ERROR_COLOR, ERROR_PERIOD, now).with_floor(0.15))
    }
}

impl Default for LightScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for LightScene {
    fn render(&mut self, now: Instant, disc: &mut Disc) {
        for light in &mut self.lights {
            light.update(now);
            light.render(disc);
        }
    }

    fn apply_palette(&mut self, palette: &Palette, duration: Duration, now: Instant) {
        if !self.palette_aware {
            debug!("palette ignored by scene without orbs to recolor");
            return;
        }
        let orbs = self.lights.iter_mut().filter_map(LightSlot::as_orb_mut);
        for (i, orb) in orbs.enumerate() {
            orb.set_color(palette.color(i), duration, now);
        }
    }

    fn palette(&self) -> Palette {
        let orbs: Vec<Color, MAX_LIGHTS> = self
            .lights
            .iter()
            .filter_map(LightSlot::as_orb)
            .map(Orb::color)
            .collect();
        let shown: Vec<Color, MAX_LIGHTS> = if orbs.is_empty() {
            self.lights.iter().map(LightSlot::color).collect()
        } else {
            orbs
        };
        if shown.is_empty() {
            return Palette::from_colors([Color::BLACK; PALETTE_SIZE]);
        }
        Palette::from_colors(core::array::from_fn(|i| shown[i % shown.len()]))
    }
}
