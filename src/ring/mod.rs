//! Polar addressing of the LED disc
//!
//! The disc is five concentric rings. Each [`Ring`] keeps its own color
//! buffer and knows which slice of the physical strip it owns.
//! [`Disc`] ties the rings together with the coordinate lookup table.

mod coord;
mod layout;

use core::ops::Range;

use tracing::debug;

pub use coord::{CENTER_THRESHOLD, LedAddress, PolarCoord, polar_to_index};
pub use layout::{
    LED_COUNT, Lut, MAX_RING, MAX_RING_SIZE, RING_BRIGHTNESS, RING_COUNT, RING_OFFSETS,
    RING_SIZES, ring_bounds, ring_size,
};

use crate::color::Color;

/// Color buffer of a single ring
#[derive(Debug, Clone)]
pub struct Ring {
    index: usize,
    size: usize,
    leds: [Color; MAX_RING_SIZE],
}

impl Ring {
    fn new(index: usize) -> Self {
        Self {
            index,
            size: ring_size(index),
            leds: [Color::BLACK; MAX_RING_SIZE],
        }
    }

    pub const fn index(&self) -> usize {
        self.index
    }

    pub const fn size(&self) -> usize {
        self.size
    }

    /// Physical strip indices owned by this ring
    pub const fn bounds(&self) -> Range<usize> {
        ring_bounds(self.index)
    }

    /// Colors of the ring, slot 0 first
    pub fn leds(&self) -> &[Color] {
        &self.leds[..self.size]
    }

    pub fn get(&self, slot: usize) -> Option<Color> {
        self.leds().get(slot).copied()
    }

    /// Write a slot
    ///
    /// A lit color is added to the current value (saturating), black clears
    /// the slot.
    pub fn write(&mut self, slot: usize, color: Color) {
        let Some(led) = self.leds[..self.size].get_mut(slot) else {
            return;
        };
        if color.is_lit() {
            *led += color;
        } else {
            *led = Color::BLACK;
        }
    }

    pub fn fill(&mut self, color: Color) {
        for led in &mut self.leds[..self.size] {
            *led = color;
        }
    }

    /// Brightness correction of this ring
    pub fn correction(&self) -> f32 {
        RING_BRIGHTNESS[self.index]
    }
}

/// All rings of the disc plus the coordinate lookup table
#[derive(Debug, Clone)]
pub struct Disc {
    rings: [Ring; RING_COUNT],
    lut: Lut,
}

impl Disc {
    pub fn new() -> Self {
        Self {
            rings: core::array::from_fn(Ring::new),
            lut: Lut::new(),
        }
    }

    pub const fn lut(&self) -> &Lut {
        &self.lut
    }

    pub const fn rings(&self) -> &[Ring; RING_COUNT] {
        &self.rings
    }

    pub fn ring(&self, index: usize) -> Option<&Ring> {
        self.rings.get(index)
    }

    /// Write the LED nearest to a polar coordinate
    ///
    /// Coordinates outside the disc are logged and dropped.
    pub fn set_led(&mut self, coord: PolarCoord, color: Color) {
        match polar_to_index(coord) {
            Some(address) => self.write(address, color),
            None => {
                debug!(
                    theta = coord.theta,
                    r = coord.r,
                    "dropping write to unaddressable coordinate"
                );
            }
        }
    }

    /// Write a ring slot, same blending rules as [`Disc::set_led`]
    pub fn write(&mut self, address: LedAddress, color: Color) {
        match self.rings.get_mut(address.ring) {
            Some(ring) => ring.write(address.slot, color),
            None => debug!(ring = address.ring, "dropping write to unknown ring"),
        }
    }

    /// Evaluate a light function at every LED and add the lit results
    pub fn accumulate(&mut self, mut light: impl FnMut(PolarCoord) -> Color) {
        for (address, coord) in self.lut.iter() {
            let color = light(coord);
            if color.is_lit() {
                self.rings[address.ring].write(address.slot, color);
            }
        }
    }

    /// Read a ring slot
    pub fn get(&self, address: LedAddress) -> Option<Color> {
        self.rings.get(address.ring)?.get(address.slot)
    }

    pub fn clear_ring(&mut self, ring: usize, color: Color) {
        match self.rings.get_mut(ring) {
            Some(ring) => ring.fill(color),
            None => debug!(ring, "ignoring clear of unknown ring"),
        }
    }

    pub fn clear_all(&mut self, color: Color) {
        for ring in &mut self.rings {
            ring.fill(color);
        }
    }

    /// Copy every ring into its physical slice of the output buffer
    pub fn composite_to_output(&self, output: &mut [Color; LED_COUNT]) {
        for ring in &self.rings {
            let correction = ring.correction();
            let target = &mut output[ring.bounds()];
            for (out, &led) in target.iter_mut().zip(ring.leds()) {
                *out = led * correction;
            }
        }
    }
}

impl Default for Disc {
    fn default() -> Self {
        Self::new()
    }
}
