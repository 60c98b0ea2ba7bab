use embassy_time::Instant;
use tracing::{debug, info};

use crate::color::{Color, LinearColor, Palette};
use crate::mailbox::{ControlSnapshot, StateRequest};
use crate::ring::{Disc, LED_COUNT};
use crate::scene::{OperatingState, SceneStore};
use crate::transition::{Frame, Transition, TransitionConfig, TransitionStrategy};

/// Configuration for the renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct RendererConfig {
    /// State shown before the first request
    pub initial_state: OperatingState,
    pub transition: TransitionConfig,
}

fn capture(colors: &[Color; LED_COUNT], frame: &mut Frame) {
    for (pixel, &color) in frame.iter_mut().zip(colors.iter()) {
        *pixel = color.into();
    }
}

/// Renderer - turns the operating state into LED frames
///
/// Owns the disc, the per-state scenes and the transition in progress.
/// Nothing in here blocks, the caller decides when frames are produced.
pub struct Renderer {
    disc: Disc,
    scenes: SceneStore,
    config: TransitionConfig,

    current: OperatingState,
    requested: OperatingState,
    pending_palette: Option<Palette>,
    transition: Option<Transition>,

    from_frame: Frame,
    to_frame: Frame,
    overlay: Frame,
    blended: Frame,
    output: [Color; LED_COUNT],
}

impl Renderer {
    pub fn new(config: &RendererConfig) -> Self {
        Self {
            disc: Disc::new(),
            scenes: SceneStore::new().with_recolor_duration(config.transition.duration),
            config: config.transition,
            current: config.initial_state,
            requested: config.initial_state,
            pending_palette: None,
            transition: None,
            from_frame: [LinearColor::BLACK; LED_COUNT],
            to_frame: [LinearColor::BLACK; LED_COUNT],
            overlay: [LinearColor::BLACK; LED_COUNT],
            blended: [LinearColor::BLACK; LED_COUNT],
            output: [Color::BLACK; LED_COUNT],
        }
    }

    pub const fn current(&self) -> OperatingState {
        self.current
    }

    pub const fn requested(&self) -> OperatingState {
        self.requested
    }

    pub const fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    pub const fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    pub const fn transition_config(&self) -> TransitionConfig {
        self.config
    }

    /// Change how future transitions run, the one in progress is kept
    ///
    /// The duration also applies to placeholder tint changes.
    pub fn set_transition_config(&mut self, config: TransitionConfig) {
        self.config = config;
        self.scenes.set_recolor_duration(config.duration);
    }

    pub const fn scenes(&self) -> &SceneStore {
        &self.scenes
    }

    pub const fn disc(&self) -> &Disc {
        &self.disc
    }

    /// Last rendered frame
    pub const fn output(&self) -> &[Color; LED_COUNT] {
        &self.output
    }

    /// Ask for a state, optionally with a palette for its scene
    ///
    /// The switch happens on the next render through a transition. A request
    /// made while a transition runs waits for it to finish.
    pub fn request(&mut self, state: OperatingState, palette: Option<Palette>) {
        debug!(state = state.as_str(), "state requested");
        self.requested = state;
        if palette.is_some() {
            self.pending_palette = palette;
        }
    }

    /// Switch to a state immediately, cancelling any transition
    ///
    /// A palette still waiting for its request is dropped with it.
    pub fn set_state(&mut self, state: OperatingState) {
        if let Some(transition) = self.transition.take() {
            debug!(
                from = transition.from().as_str(),
                to = transition.to().as_str(),
                "transition cancelled"
            );
        }
        info!(state = state.as_str(), "state forced");
        self.current = state;
        self.requested = state;
        self.pending_palette = None;
    }

    /// Update the parameter color used by the placeholder scene
    pub fn set_parameter(&mut self, color: Color, now: Instant) {
        debug!(r = color.r, g = color.g, b = color.b, "parameter color set");
        self.scenes.set_parameter(color, now);
    }

    /// Apply everything collected by the mailbox since the last frame
    pub fn apply(&mut self, snapshot: ControlSnapshot, now: Instant) {
        if let Some(state) = snapshot.forced {
            self.set_state(state);
        }
        if let Some(StateRequest { state, palette }) = snapshot.request {
            self.request(state, palette);
        }
        if let Some(color) = snapshot.parameter {
            self.set_parameter(color, now);
        }
    }

    /// Produce the frame for `now`
    pub fn render(&mut self, now: Instant) -> &[Color; LED_COUNT] {
        self.process_request(now);

        match self.transition.take() {
            Some(mut transition) => {
                transition.update(now);
                self.compose_transition(&transition, now);
                if transition.is_complete(now) {
                    self.commit(&transition);
                } else {
                    self.transition = Some(transition);
                }
            }
            None => self.snapshot(self.current, now),
        }

        &self.output
    }

    /// Start a transition or recolor the current scene
    fn process_request(&mut self, now: Instant) {
        if self.transition.is_some() {
            return;
        }

        let duration = self.config.duration;
        if self.requested == self.current {
            if let Some(palette) = self.pending_palette.take() {
                self.scenes
                    .get_or_create(self.current, now)
                    .apply_palette(&palette, duration, now);
            }
            return;
        }

        let from = self.current;
        let to = self.requested;
        let source = self.scenes.get_or_create(from, now).palette();
        let scene = self.scenes.get_or_create(to, now);
        let target = match self.pending_palette.take() {
            Some(palette) => {
                scene.apply_palette(&palette, duration, now);
                palette
            }
            None => scene.palette(),
        };

        self.transition = Some(match self.config.strategy {
            TransitionStrategy::Crossfade => Transition::crossfade(from, to, now, duration),
            TransitionStrategy::SpiralFusion => {
                Transition::spiral(from, to, now, duration, source, target)
            }
        });
        info!(
            from = from.as_str(),
            to = to.as_str(),
            duration_ms = duration.as_millis(),
            "transition started"
        );
    }

    fn commit(&mut self, transition: &Transition) {
        self.current = transition.to();
        info!(state = self.current.as_str(), "transition complete");
    }

    /// Render one scene into the output buffer
    fn snapshot(&mut self, state: OperatingState, now: Instant) {
        self.disc.clear_all(Color::BLACK);
        self.scenes
            .get_or_create(state, now)
            .render(now, &mut self.disc);
        self.disc.composite_to_output(&mut self.output);
    }

    fn compose_transition(&mut self, transition: &Transition, now: Instant) {
        self.snapshot(transition.from(), now);
        capture(&self.output, &mut self.from_frame);
        self.snapshot(transition.to(), now);
        capture(&self.output, &mut self.to_frame);

        self.disc.clear_all(Color::BLACK);
        if transition.render_overlay(&mut self.disc) {
            self.disc.composite_to_output(&mut self.output);
            capture(&self.output, &mut self.overlay);
        } else {
            self.overlay = [LinearColor::BLACK; LED_COUNT];
        }

        transition.compose(
            now,
            &self.from_frame,
            &self.to_frame,
            &self.overlay,
            &mut self.blended,
        );
        for (color, pixel) in self.output.iter_mut().zip(self.blended.iter()) {
            *color = pixel.to_color();
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(&RendererConfig::default())
    }
}

