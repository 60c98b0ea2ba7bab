use core::ops::Range;

use super::coord::{LedAddress, PolarCoord};
use crate::math::deg_to_rad;

/// Number of concentric rings
pub const RING_COUNT: usize = 5;

/// Index of the outermost ring
pub const MAX_RING: usize = RING_COUNT - 1;

/// LEDs per ring, from the center outwards
pub const RING_SIZES: [usize; RING_COUNT] = [1, 8, 12, 16, 24];

/// Largest ring population
pub const MAX_RING_SIZE: usize = 24;

/// Total number of LEDs on the disc
pub const LED_COUNT: usize = ring_total();

/// Physical start index of every ring
///
/// The strip is wired from the outer ring inwards, so ring 4 starts at
/// index 0 and the center LED is the last one.
pub const RING_OFFSETS: [usize; RING_COUNT] = ring_offsets();

/// Per-ring brightness correction applied when compositing
///
/// Compensates for LED density differences between rings.
pub const RING_BRIGHTNESS: [f32; RING_COUNT] = [1.0, 1.0, 1.0, 1.66, 0.37];

const fn ring_total() -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < RING_COUNT {
        total += RING_SIZES[i];
        i += 1;
    }
    total
}

const fn ring_offsets() -> [usize; RING_COUNT] {
    let mut offsets = [0; RING_COUNT];
    let mut logical_start = 0;
    let mut i = 0;
    while i < RING_COUNT {
        let logical_end = logical_start + RING_SIZES[i];
        offsets[i] = LED_COUNT - logical_end;
        logical_start = logical_end;
        i += 1;
    }
    offsets
}

/// Physical index range occupied by a ring
///
/// Returns an empty range for a ring index outside the disc.
pub const fn ring_bounds(ring: usize) -> Range<usize> {
    if ring >= RING_COUNT {
        return 0..0;
    }
    RING_OFFSETS[ring]..RING_OFFSETS[ring] + RING_SIZES[ring]
}

/// Number of LEDs in a ring (0 outside the disc)
pub const fn ring_size(ring: usize) -> usize {
    if ring >= RING_COUNT {
        return 0;
    }
    RING_SIZES[ring]
}

/// Lookup table from physical LED index to polar coordinate
///
/// Built once and never modified afterwards.
#[derive(Debug, Clone)]
pub struct Lut {
    coords: [PolarCoord; LED_COUNT],
    addresses: [LedAddress; LED_COUNT],
}

impl Lut {
    pub fn new() -> Self {
        let mut coords = [PolarCoord::CENTER; LED_COUNT];
        let mut addresses = [LedAddress { ring: 0, slot: 0 }; LED_COUNT];

        for (ring, &size) in RING_SIZES.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let step = 360.0 / size as f32;
            for slot in 0..size {
                let address = LedAddress { ring, slot };
                let index = address.physical_index();
                #[allow(clippy::cast_precision_loss)]
                let theta = deg_to_rad(slot as f32 * step);
                #[allow(clippy::cast_precision_loss)]
                let coord = PolarCoord::new(theta, ring as f32);
                coords[index] = coord;
                addresses[index] = address;
            }
        }

        Self { coords, addresses }
    }

    /// Coordinate of a physical LED
    pub fn coord(&self, index: usize) -> Option<PolarCoord> {
        self.coords.get(index).copied()
    }

    /// Coordinate of a ring slot
    pub fn coord_of(&self, address: LedAddress) -> Option<PolarCoord> {
        self.coord(address.physical_index())
    }

    /// Ring/slot of a physical LED
    pub fn address(&self, index: usize) -> Option<LedAddress> {
        self.addresses.get(index).copied()
    }

    /// Iterate over every LED as `(address, coordinate)`
    pub fn iter(&self) -> impl Iterator<Item = (LedAddress, PolarCoord)> + '_ {
        self.addresses.iter().copied().zip(self.coords.iter().copied())
    }

    pub const fn len(&self) -> usize {
        LED_COUNT
    }

    pub const fn is_empty(&self) -> bool {
        false
    }
}

impl Default for Lut {
    fn default() -> Self {
        Self::new()
    }
}
