pub mod color;
pub mod controller;
pub mod error;
pub mod frame_scheduler;
pub mod light;
pub mod mailbox;
pub mod math;
pub mod protocol;
pub mod renderer;
pub mod ring;
pub mod scene;
pub mod transition;

pub use color::{Color, Hsv, LinearColor, Palette, Rgb};
pub use controller::{ControllerConfig, LedController};
pub use error::{Error, Result};
pub use frame_scheduler::{FrameResult, FrameScheduler};
pub use light::{Glow, LightKind, LightSlot, LightSource, Orb};
pub use mailbox::{ControlHandle, ControlMailbox, ControlSnapshot, StateRequest};
pub use protocol::{FrameEncoder, WS2812_SPEED_HZ};
pub use renderer::{Renderer, RendererConfig};
pub use ring::{Disc, LED_COUNT, LedAddress, PolarCoord, polar_to_index};
pub use scene::{OperatingState, Scene, SceneSlot, SceneStore};
pub use transition::{Transition, TransitionConfig, TransitionStrategy};

pub use embassy_time::{Duration, Instant};

/// Byte sink the encoded frames are written to
///
/// Implement this trait to support different hardware platforms, an SPI
/// device clocked for WS2812 timing in production.
pub trait Transport {
    type Error: core::fmt::Display;

    /// Prepare the device at the given clock
    fn open(&mut self, speed_hz: u32) -> core::result::Result<(), Self::Error>;

    /// Write one encoded frame
    fn transfer(&mut self, bytes: &[u8]) -> core::result::Result<(), Self::Error>;
}
