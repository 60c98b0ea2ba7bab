use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The transport could not be opened, the render thread is not started
    #[error("failed to open transport at {speed_hz} Hz: {reason}")]
    TransportOpen { speed_hz: u32, reason: String },

    /// A frame could not be written, the frame is dropped
    #[error("frame transfer failed: {0}")]
    Transfer(String),

    #[error("failed to spawn render thread: {0}")]
    Spawn(#[from] std::io::Error),
}
