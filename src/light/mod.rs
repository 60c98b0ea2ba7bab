//! Light sources
//!
//! All light sources are stored in an enum to avoid heap allocations.
//! Each light source implements the `LightSource` trait.

mod glow;
mod orb;

use embassy_time::{Duration, Instant};

pub use glow::{DEFAULT_HALF_WIDTH, Glow};
pub use orb::{
    DEFAULT_SIGMA, MIN_UPDATE_INTERVAL, MotionProfile, Orb, SpeedPhase, orb_distance,
    orb_distance_sq,
};

use crate::color::Color;
use crate::ring::{Disc, PolarCoord};

/// Kind of a light source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    Orb,
    Glow,
}

pub trait LightSource {
    /// Advance the animation
    fn update(&mut self, now: Instant);

    /// Add the light to the disc
    fn render(&self, disc: &mut Disc);

    /// Current position of the light
    fn origin(&self) -> PolarCoord;

    fn kind(&self) -> LightKind;
}

/// Light slot - enum containing all light source kinds
#[derive(Debug, Clone)]
pub enum LightSlot {
    Orb(Orb),
    Glow(Glow),
}

impl LightSlot {
    pub fn update(&mut self, now: Instant) {
        match self {
            Self::Orb(light) => light.update(now),
            Self::Glow(light) => light.update(now),
        }
    }

    pub fn render(&self, disc: &mut Disc) {
        match self {
            Self::Orb(light) => light.render(disc),
            Self::Glow(light) => light.render(disc),
        }
    }

    pub fn origin(&self) -> PolarCoord {
        match self {
            Self::Orb(light) => light.origin(),
            Self::Glow(light) => light.origin(),
        }
    }

    pub const fn kind(&self) -> LightKind {
        match self {
            Self::Orb(_) => LightKind::Orb,
            Self::Glow(_) => LightKind::Glow,
        }
    }

    pub const fn color(&self) -> Color {
        match self {
            Self::Orb(light) => light.color(),
            Self::Glow(light) => light.color(),
        }
    }

    /// Fade to a new color
    pub fn set_color(&mut self, color: Color, duration: Duration, now: Instant) {
        match self {
            Self::Orb(light) => light.set_color(color, duration, now),
            Self::Glow(light) => light.set_color(color, duration, now),
        }
    }

    pub const fn as_orb(&self) -> Option<&Orb> {
        match self {
            Self::Orb(orb) => Some(orb),
            Self::Glow(_) => None,
        }
    }

    pub const fn as_orb_mut(&mut self) -> Option<&mut Orb> {
        match self {
            Self::Orb(orb) => Some(orb),
            Self::Glow(_) => None,
        }
    }

    pub const fn as_glow(&self) -> Option<&Glow> {
        match self {
            Self::Glow(glow) => Some(glow),
            Self::Orb(_) => None,
        }
    }

    pub const fn as_glow_mut(&mut self) -> Option<&mut Glow> {
        match self {
            Self::Glow(glow) => Some(glow),
            Self::Orb(_) => None,
        }
    }
}

impl From<Orb> for LightSlot {
    fn from(orb: Orb) -> Self {
        Self::Orb(orb)
    }
}

impl From<Glow> for LightSlot {
    fn from(glow: Glow) -> Self {
        Self::Glow(glow)
    }
}
