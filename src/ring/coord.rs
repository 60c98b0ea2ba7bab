use core::f32::consts::TAU;

use super::layout::{MAX_RING, RING_COUNT, RING_OFFSETS, RING_SIZES};
use crate::math::{deg_to_rad, normalize_angle};

/// Radius below which a coordinate addresses the center LED
pub const CENTER_THRESHOLD: f32 = 0.5;

/// Point on the disc in polar form
///
/// `theta` is in radians and kept within `[0, 2π)`, `r` is measured in ring
/// units (0.0 = center, 4.0 = outer ring).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarCoord {
    pub theta: f32,
    pub r: f32,
}

impl PolarCoord {
    pub const CENTER: Self = Self { theta: 0.0, r: 0.0 };

    pub fn new(theta: f32, r: f32) -> Self {
        Self {
            theta: normalize_angle(theta),
            r,
        }
    }

    pub fn from_degrees(degrees: f32, r: f32) -> Self {
        Self::new(deg_to_rad(degrees), r)
    }

    /// Returns the same point rotated by `delta` radians
    pub fn rotated(self, delta: f32) -> Self {
        Self::new(self.theta + delta, self.r)
    }

    /// Returns the same angle at another radius
    pub const fn with_radius(self, r: f32) -> Self {
        Self { theta: self.theta, r }
    }

    /// Check if the coordinate lies on the disc
    #[allow(clippy::cast_precision_loss)]
    pub fn is_addressable(self) -> bool {
        self.theta.is_finite() && self.r.is_finite() && self.r.abs() <= MAX_RING as f32
    }
}

/// Ring and slot of one LED
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LedAddress {
    pub ring: usize,
    pub slot: usize,
}

impl LedAddress {
    /// Create an address, returns `None` if the ring or slot does not exist
    pub fn new(ring: usize, slot: usize) -> Option<Self> {
        let size = *RING_SIZES.get(ring)?;
        (slot < size).then_some(Self { ring, slot })
    }

    /// Index in the physical output buffer
    ///
    /// Returns `usize::MAX` for an address outside the disc.
    pub fn physical_index(self) -> usize {
        if self.ring >= RING_COUNT || self.slot >= RING_SIZES[self.ring] {
            return usize::MAX;
        }
        RING_OFFSETS[self.ring] + self.slot
    }
}

/// Map a polar coordinate onto the nearest LED
///
/// Returns `None` when the coordinate is outside the disc (`|r| > 4`) or not
/// finite.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn polar_to_index(coord: PolarCoord) -> Option<LedAddress> {
    if !coord.is_addressable() {
        return None;
    }
    if coord.r < CENTER_THRESHOLD {
        return Some(LedAddress { ring: 0, slot: 0 });
    }

    let ring = libm::roundf(coord.r.clamp(0.0, MAX_RING as f32)) as usize;
    let size = RING_SIZES[ring];
    let theta = normalize_angle(coord.theta);
    let slot = (libm::roundf(theta / TAU * size as f32) as usize) % size;

    Some(LedAddress { ring, slot })
}
