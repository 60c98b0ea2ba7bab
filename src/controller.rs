//! Threaded LED controller
//!
//! Opens the transport and runs the frame scheduler on a dedicated thread.
//! All control calls go through the shared mailbox and never block on the
//! render loop.

use core::sync::atomic::{AtomicBool, Ordering};

use std::sync::Arc;
use std::thread::JoinHandle;

use embassy_time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use crate::Transport;
use crate::color::{Color, Palette};
use crate::error::{Error, Result};
use crate::frame_scheduler::{DEFAULT_FRAME_DURATION, FrameScheduler};
use crate::mailbox::{ControlHandle, ControlMailbox};
use crate::protocol::WS2812_SPEED_HZ;
use crate::renderer::{Renderer, RendererConfig};
use crate::scene::OperatingState;

const THREAD_NAME: &str = "led-render";

/// Configuration for the controller
#[derive(Debug, Clone, Copy)]
pub struct ControllerConfig {
    pub renderer: RendererConfig,
    /// Transport clock
    pub speed_hz: u32,
    pub frame_duration: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            renderer: RendererConfig::default(),
            speed_hz: WS2812_SPEED_HZ,
            frame_duration: DEFAULT_FRAME_DURATION,
        }
    }
}

/// Owner of the render thread
///
/// Dropping the controller stops the thread, blanks the LEDs and waits for
/// the thread to exit.
pub struct LedController {
    handle: ControlHandle,
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl LedController {
    /// Open the transport and start rendering
    pub fn start<T>(mut transport: T, config: &ControllerConfig) -> Result<Self>
    where
        T: Transport + Send + 'static,
    {
        let speed_hz = config.speed_hz;
        if let Err(err) = transport.open(speed_hz) {
            error!(speed_hz, error = %err, "failed to open transport");
            return Err(Error::TransportOpen {
                speed_hz,
                reason: err.to_string(),
            });
        }
        info!(speed_hz, "transport opened");

        let mailbox = Arc::new(ControlMailbox::new());
        let stop = Arc::new(AtomicBool::new(false));
        let scheduler = FrameScheduler::with_frame_duration(
            Renderer::new(&config.renderer),
            transport,
            Arc::clone(&mailbox),
            config.frame_duration,
        );

        let thread = std::thread::Builder::new()
            .name(THREAD_NAME.into())
            .spawn({
                let stop = Arc::clone(&stop);
                move || run(scheduler, &stop)
            })
            .inspect_err(|err| error!(error = %err, "failed to spawn render thread"))?;

        Ok(Self {
            handle: ControlHandle::new(mailbox),
            stop,
            thread: Some(thread),
        })
    }

    /// Cloneable handle for other threads
    pub fn handle(&self) -> ControlHandle {
        self.handle.clone()
    }

    /// Switch state immediately, without a transition
    pub fn set_state(&self, state: OperatingState) {
        self.handle.set_state(state);
    }

    /// Transition to a state, optionally recoloring its scene
    pub fn request_state(&self, state: OperatingState, palette: Option<Palette>) {
        self.handle.request_state(state, palette);
    }

    pub fn set_parameter(&self, color: Color) {
        self.handle.set_parameter(color);
    }

    pub fn is_running(&self) -> bool {
        self.thread
            .as_ref()
            .is_some_and(|thread| !thread.is_finished())
    }

    /// Stop the render thread and wait for it
    pub fn shutdown(&mut self) {
        let Some(thread) = self.thread.take() else {
            return;
        };
        self.stop.store(true, Ordering::Release);
        if thread.join().is_err() {
            error!("render thread panicked");
        }
    }
}

impl Drop for LedController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run<T: Transport>(mut scheduler: FrameScheduler<T>, stop: &AtomicBool) {
    debug!("render loop started");
    while !stop.load(Ordering::Acquire) {
        let result = scheduler.tick(Instant::now());
        let sleep = result.sleep_duration.as_micros();
        if sleep > 0 {
            std::thread::sleep(core::time::Duration::from_micros(sleep));
        }
    }

    if let Err(err) = scheduler.blank() {
        warn!(error = %err, "failed to blank leds");
    }
    info!(
        frames = scheduler.frames(),
        failures = scheduler.failures(),
        "render loop stopped"
    );
}
