//! State transitions
//!
//! A [`Transition`] blends the snapshots of two scenes over a bounded
//! duration. The default strategy is a cubic crossfade; spiral fusion is an
//! alternate choreography with the same contract (fixed duration, completion
//! after `duration` has elapsed).

mod crossfade;
mod spiral;
mod value;

use embassy_time::{Duration, Instant};

pub use crossfade::{Crossfade, blend, blend_frames};
pub use spiral::{FUSION_THRESHOLD, FusionPhase, SpiralFusion, spiral_in};
pub use value::{ValueBlender, ValueTransition};

use crate::color::{LinearColor, PALETTE_SIZE, Palette};
use crate::ring::{Disc, LED_COUNT, PolarCoord};
use crate::scene::OperatingState;

/// Linear color buffer used while blending
pub type Frame = [LinearColor; LED_COUNT];

/// Default duration of a state transition
pub const DEFAULT_TRANSITION_DURATION: Duration = Duration::from_millis(1200);

/// How two states are blended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionStrategy {
    /// Cubic ease-in-out crossfade of both snapshots
    #[default]
    Crossfade,
    /// Three orbs spiral into the center and back out with the new palette
    SpiralFusion,
}

/// Configuration for state transitions
#[derive(Debug, Clone, Copy)]
pub struct TransitionConfig {
    pub duration: Duration,
    pub strategy: TransitionStrategy,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            duration: DEFAULT_TRANSITION_DURATION,
            strategy: TransitionStrategy::Crossfade,
        }
    }
}

/// Home positions of the spiral orbs, evenly spaced on ring 3
pub fn spiral_homes() -> [PolarCoord; PALETTE_SIZE] {
    [
        PolarCoord::from_degrees(0.0, 3.0),
        PolarCoord::from_degrees(120.0, 3.0),
        PolarCoord::from_degrees(240.0, 3.0),
    ]
}

#[derive(Debug, Clone)]
enum Choreography {
    Crossfade,
    Spiral(SpiralFusion),
}

/// Transition between two operating states in progress
#[derive(Debug, Clone)]
pub struct Transition {
    from: OperatingState,
    to: OperatingState,
    timing: Crossfade,
    choreography: Choreography,
}

impl Transition {
    /// Begin a crossfade
    pub const fn crossfade(
        from: OperatingState,
        to: OperatingState,
        now: Instant,
        duration: Duration,
    ) -> Self {
        Self {
            from,
            to,
            timing: Crossfade::new(now, duration),
            choreography: Choreography::Crossfade,
        }
    }

    /// Begin a spiral fusion from one palette to another
    pub fn spiral(
        from: OperatingState,
        to: OperatingState,
        now: Instant,
        duration: Duration,
        source: Palette,
        target: Palette,
    ) -> Self {
        Self {
            from,
            to,
            timing: Crossfade::new(now, duration),
            choreography: Choreography::Spiral(SpiralFusion::new(
                spiral_homes(),
                source,
                target,
                now,
                duration,
            )),
        }
    }

    pub const fn from(&self) -> OperatingState {
        self.from
    }

    pub const fn to(&self) -> OperatingState {
        self.to
    }

    pub const fn strategy(&self) -> TransitionStrategy {
        match self.choreography {
            Choreography::Crossfade => TransitionStrategy::Crossfade,
            Choreography::Spiral(_) => TransitionStrategy::SpiralFusion,
        }
    }

    /// Raw progress at `now` (0.0-1.0)
    pub fn progress(&self, now: Instant) -> f32 {
        self.timing.progress(now)
    }

    pub fn is_complete(&self, now: Instant) -> bool {
        self.timing.is_complete(now)
    }

    /// Advance the choreography, if any
    pub fn update(&mut self, now: Instant) {
        if let Choreography::Spiral(spiral) = &mut self.choreography {
            spiral.update(now);
        }
    }

    /// Render the choreography overlay into a cleared disc
    ///
    /// Returns false if this strategy has no overlay.
    pub fn render_overlay(&self, disc: &mut Disc) -> bool {
        match &self.choreography {
            Choreography::Crossfade => false,
            Choreography::Spiral(spiral) => {
                spiral.render(disc);
                true
            }
        }
    }

    /// Compose the output frame for `now`
    ///
    /// `overlay` is only used by choreographies that render one.
    pub fn compose(
        &self,
        now: Instant,
        from: &Frame,
        to: &Frame,
        overlay: &Frame,
        out: &mut Frame,
    ) {
        match &self.choreography {
            Choreography::Crossfade => self.timing.compose(now, from, to, out),
            Choreography::Spiral(spiral) => {
                let (from_weight, to_weight) = spiral.weights();
                for (i, pixel) in out.iter_mut().enumerate() {
                    *pixel = from[i]
                        .scaled(from_weight)
                        .plus(to[i].scaled(to_weight))
                        .plus(overlay[i]);
                }
            }
        }
    }
}
