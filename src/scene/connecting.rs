//! WiFi symbol
//!
//! A center dot and three arcs on rings 2, 3 and 4 pointing in one
//! direction. The symbol is built up one element at a time, each element
//! fading in over its own window, and held once complete.

use embassy_time::{Duration, Instant};

use super::Scene;
use crate::color::{Color, PALETTE_SIZE, Palette};
use crate::math::{angular_difference, deg_to_rad, progress};
use crate::ring::{Disc, PolarCoord, ring_size};
use crate::transition::ValueTransition;

/// Center dot plus three arcs
const ELEMENT_COUNT: usize = 4;

/// Default direction of the symbol, pointing up
const DEFAULT_DIRECTION: f32 = 270.0;

/// Time between two elements appearing
const ELEMENT_PERIOD: Duration = Duration::from_millis(600);

const DEFAULT_COLOR: Color = Color::new(40, 120, 255);

/// Half of the angle covered by an arc, in degrees
const ARC_HALF_SPAN: f32 = 45.0;

/// Ring of each element, the dot first
const ELEMENT_RINGS: [usize; ELEMENT_COUNT] = [0, 2, 3, 4];

#[derive(Debug, Clone)]
pub struct ConnectingScene {
    started: Instant,
    direction: f32,
    color: ValueTransition<Color>,
}

impl ConnectingScene {
    pub fn new(now: Instant) -> Self {
        Self {
            started: now,
            direction: deg_to_rad(DEFAULT_DIRECTION),
            color: ValueTransition::new_color(DEFAULT_COLOR),
        }
    }

    /// Point the symbol at `degrees`
    pub fn set_direction(&mut self, degrees: f32) {
        self.direction = deg_to_rad(degrees);
    }

    /// Direction in radians
    pub const fn direction(&self) -> f32 {
        self.direction
    }

    /// Number of elements visible at `now`, including one still fading in
    #[allow(clippy::cast_possible_truncation)]
    pub fn elements_shown(&self, now: Instant) -> usize {
        let elapsed = now.saturating_duration_since(self.started);
        let built = (elapsed.as_ticks() / ELEMENT_PERIOD.as_ticks().max(1)) as usize;
        (built + 1).min(ELEMENT_COUNT)
    }

    /// Brightness of an element at `now` (0.0-1.0)
    pub fn element_level(&self, element: usize, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.started);
        let appears = ELEMENT_PERIOD * u32::try_from(element.min(ELEMENT_COUNT)).unwrap_or(0);
        if elapsed < appears {
            return 0.0;
        }
        progress(elapsed - appears, ELEMENT_PERIOD)
    }

    #[allow(clippy::cast_precision_loss)]
    fn draw_element(&self, element: usize, color: Color, disc: &mut Disc) {
        let ring = ELEMENT_RINGS[element];
        if ring == 0 {
            disc.set_led(PolarCoord::CENTER, color);
            return;
        }

        let size = ring_size(ring);
        let half_span = deg_to_rad(ARC_HALF_SPAN) + f32::EPSILON;
        for slot in 0..size {
            let angle = core::f32::consts::TAU * slot as f32 / size as f32;
            if angular_difference(angle, self.direction) <= half_span {
                disc.set_led(PolarCoord::new(angle, ring as f32), color);
            }
        }
    }
}

impl Scene for ConnectingScene {
    fn render(&mut self, now: Instant, disc: &mut Disc) {
        self.color.tick(now);
        let color = self.color.current();
        for element in 0..self.elements_shown(now) {
            let level = self.element_level(element, now);
            let lit = color * level;
            if lit.is_lit() {
                self.draw_element(element, lit, disc);
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
