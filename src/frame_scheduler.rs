//! Frame scheduling and timing utilities.
//!
//! Provides frame pacing without async/await or platform-specific timers.
//! The caller is responsible for sleeping/waiting between frames.

use std::sync::Arc;

use embassy_time::{Duration, Instant};
use tracing::{debug, warn};

use crate::Transport;
use crate::color::Color;
use crate::error::{Error, Result};
use crate::mailbox::ControlMailbox;
use crate::protocol::FrameEncoder;
use crate::renderer::Renderer;
use crate::ring::LED_COUNT;

/// Default target frame rate (60 FPS).
pub const DEFAULT_FPS: u32 = 60;

/// Default frame duration based on target FPS.
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(1000 / DEFAULT_FPS as u64);

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Frame scheduler that manages timing without async.
///
/// This scheduler:
/// - Tracks frame timing with drift correction
/// - Drains the control mailbox and runs the renderer
/// - Encodes the frame and hands it to the transport
/// - Returns timing info so the caller can sleep appropriately
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(renderer, transport, mailbox);
///
/// loop {
///     let result = scheduler.tick(Instant::now());
///     std::thread::sleep(std::time::Duration::from_micros(
///         result.sleep_duration.as_micros(),
///     ));
/// }
/// ```
pub struct FrameScheduler<T: Transport> {
    transport: T,
    renderer: Renderer,
    mailbox: Arc<ControlMailbox>,
    encoder: FrameEncoder,
    next_frame: Instant,
    frame_duration: Duration,
    frames: u64,
    failures: u64,
}

impl<T: Transport> FrameScheduler<T> {
    /// Create a new frame scheduler.
    ///
    /// Uses `DEFAULT_FRAME_DURATION` (60 FPS) for frame timing.
    pub fn new(renderer: Renderer, transport: T, mailbox: Arc<ControlMailbox>) -> Self {
        Self::with_frame_duration(renderer, transport, mailbox, DEFAULT_FRAME_DURATION)
    }

    /// Create a new frame scheduler with custom frame duration.
    pub fn with_frame_duration(
        renderer: Renderer,
        transport: T,
        mailbox: Arc<ControlMailbox>,
        frame_duration: Duration,
    ) -> Self {
        Self {
            transport,
            renderer,
            mailbox,
            encoder: FrameEncoder::new(),
            next_frame: Instant::from_millis(0),
            frame_duration,
            frames: 0,
            failures: 0,
        }
    }

    /// Process one frame and return timing information.
    ///
    /// This method:
    /// 1. Applies drift correction if we've fallen too far behind
    /// 2. Applies pending control requests
    /// 3. Renders, encodes and transfers the current frame
    /// 4. Returns the deadline for the next frame
    ///
    /// A failed transfer drops the frame and is counted, the next tick
    /// carries on as usual.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        // Skip the backlog after long stalls instead of bursting
        let max_drift = self.frame_duration * 2;
        if now > self.next_frame + max_drift {
            self.next_frame = now;
        }

        let snapshot = self.mailbox.take();
        if !snapshot.is_empty() {
            self.renderer.apply(snapshot, now);
        }

        let frame = self.renderer.render(now);
        let payload = self.encoder.encode(frame);
        if let Err(err) = self.transport.transfer(payload) {
            self.failures += 1;
            warn!(error = %err, failures = self.failures, "frame transfer failed, frame dropped");
        }
        self.frames += 1;

        self.next_frame += self.frame_duration;

        let sleep_duration = if self.next_frame > now {
            self.next_frame - now
        } else {
            Duration::from_ticks(0)
        };

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
        }
    }

    /// Write an all-black frame
    pub fn blank(&mut self) -> Result<()> {
        debug!("blanking leds");
        let payload = self.encoder.encode(&[Color::BLACK; LED_COUNT]);
        self.transport
            .transfer(payload)
            .map_err(|err| Error::Transfer(err.to_string()))
    }

    /// Frames produced so far, including dropped ones
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Frames dropped because the transfer failed
    pub const fn failures(&self) -> u64 {
        self.failures
    }

    pub const fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    pub const fn mailbox(&self) -> &Arc<ControlMailbox> {
        &self.mailbox
    }

    /// Get a reference to the renderer.
    pub const fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Get a mutable reference to the renderer.
    pub const fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    pub const fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Give back the transport
    pub fn into_transport(self) -> T {
        self.transport
    }
}
