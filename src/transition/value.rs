use embassy_time::{Duration, Instant};

use crate::color::{Color, LinearColor};
use crate::math::{ease_in_out_cubic, lerp, progress};

/// Blends two values of type `T` using an eased progress value (0.0-1.0)
pub type ValueBlender<T> = fn(T, T, f32) -> T;

/// Transition for values of type `T`
#[derive(Debug, Clone)]
pub struct ValueTransition<T: Copy> {
    /// Blender function
    blend: ValueBlender<T>,
    /// Current interpolated value
    current: T,
    /// Value at the start of transition
    source: T,
    /// Target value (None if no transition in progress)
    target: Option<T>,
    /// Total transition duration
    duration: Duration,
    /// Time at which the transition started
    start_time: Instant,
}

impl<T: Copy> ValueTransition<T> {
    /// Create a new value transition
    pub const fn new(initial: T, blend: ValueBlender<T>) -> Self {
        Self {
            blend,
            current: initial,
            source: initial,
            target: None,
            duration: Duration::from_millis(0),
            start_time: Instant::from_millis(0),
        }
    }

    /// Get current value
    pub const fn current(&self) -> T {
        self.current
    }

    /// Get the value the transition is heading to
    pub fn target(&self) -> T {
        self.target.unwrap_or(self.current)
    }

    /// Check if a transition is in progress
    pub const fn is_transitioning(&self) -> bool {
        self.target.is_some()
    }

    /// Set value for transition
    pub fn set(&mut self, value: T, duration: Duration, start_time: Instant) {
        self.start_time = start_time;
        if duration.as_ticks() == 0 {
            self.current = value;
            self.source = value;
            self.target = None;
            self.duration = Duration::from_millis(0);
        } else {
            self.source = self.current;
            self.target = Some(value);
            self.duration = duration;
        }
    }

    /// Update transition state
    ///
    /// Call this once per frame.
    pub fn tick(&mut self, now: Instant) {
        let Some(target) = self.target else {
            return;
        };

        let elapsed = now.saturating_duration_since(self.start_time);
        if elapsed >= self.duration {
            self.current = target;
            self.source = target;
            self.target = None;
            return;
        }

        let t = ease_in_out_cubic(progress(elapsed, self.duration));
        self.current = (self.blend)(self.source, target, t);
    }
}

fn blend_f32(a: f32, b: f32, t: f32) -> f32 {
    lerp(a, b, t)
}

fn blend_color(a: Color, b: Color, t: f32) -> Color {
    LinearColor::mix(a.into(), b.into(), t).to_color()
}

impl ValueTransition<f32> {
    /// Create a new f32 transition
    pub const fn new_f32(initial: f32) -> Self {
        Self::new(initial, blend_f32)
    }
}

impl ValueTransition<Color> {
    /// Create a new color transition
    pub const fn new_color(initial: Color) -> Self {
        Self::new(initial, blend_color)
    }
}
