//! WS2812 waveform encoding
//!
//! Every data bit of the LED protocol is sent as one byte over a byte
//! clocked transport. At 2.5 MHz a byte lasts 3.2 µs, so `1110_0000` gives a
//! long high pulse ("1") and `1000_0000` a short one ("0").
//!
//! Channels are sent in GRB order, most significant bit first.

use crate::color::Color;
use crate::ring::LED_COUNT;

/// Transport clock the waveform bytes are designed for
pub const WS2812_SPEED_HZ: u32 = 2_500_000;

/// Waveform byte for a "1" bit
pub const BIT_HIGH: u8 = 0b1110_0000;

/// Waveform byte for a "0" bit
pub const BIT_LOW: u8 = 0b1000_0000;

/// Transport bytes per color channel
pub const BYTES_PER_CHANNEL: usize = 8;

/// Transport bytes per pixel
pub const BYTES_PER_PIXEL: usize = 3 * BYTES_PER_CHANNEL;

/// Transport bytes per full disc frame
pub const FRAME_BYTES: usize = LED_COUNT * BYTES_PER_PIXEL;

#[inline]
fn encode_channel(value: u8, out: &mut [u8]) {
    for (i, byte) in out.iter_mut().take(BYTES_PER_CHANNEL).enumerate() {
        *byte = if value & (0x80 >> i) != 0 {
            BIT_HIGH
        } else {
            BIT_LOW
        };
    }
}

#[inline]
fn decode_channel(bytes: &[u8]) -> Option<u8> {
    bytes.iter().try_fold(0u8, |acc, &byte| match byte {
        BIT_HIGH => Some((acc << 1) | 1),
        BIT_LOW => Some(acc << 1),
        _ => None,
    })
}

/// Encode one color into its 24 waveform bytes
pub fn encode_color(color: Color, out: &mut [u8; BYTES_PER_PIXEL]) {
    let (green, rest) = out.split_at_mut(BYTES_PER_CHANNEL);
    let (red, blue) = rest.split_at_mut(BYTES_PER_CHANNEL);
    encode_channel(color.g, green);
    encode_channel(color.r, red);
    encode_channel(color.b, blue);
}

/// Decode 24 waveform bytes back into a color
///
/// Returns `None` if any byte is not a valid bit pattern.
pub fn decode_color(bytes: &[u8; BYTES_PER_PIXEL]) -> Option<Color> {
    let g = decode_channel(&bytes[..BYTES_PER_CHANNEL])?;
    let r = decode_channel(&bytes[BYTES_PER_CHANNEL..2 * BYTES_PER_CHANNEL])?;
    let b = decode_channel(&bytes[2 * BYTES_PER_CHANNEL..])?;
    Some(Color { r, g, b })
}

/// Reusable buffer holding an encoded disc frame
#[derive(Debug, Clone)]
pub struct FrameEncoder {
    buffer: [u8; FRAME_BYTES],
}

impl FrameEncoder {
    pub const fn new() -> Self {
        Self {
            buffer: [BIT_LOW; FRAME_BYTES],
        }
    }

    /// Encode a frame and return the transport payload
    pub fn encode(&mut self, colors: &[Color; LED_COUNT]) -> &[u8] {
        for (color, chunk) in colors
            .iter()
            .zip(self.buffer.chunks_exact_mut(BYTES_PER_PIXEL))
        {
            if let Ok(pixel) = <&mut [u8; BYTES_PER_PIXEL]>::try_from(chunk) {
                encode_color(*color, pixel);
            }
        }
        &self.buffer
    }

    /// Last encoded payload
    pub fn payload(&self) -> &[u8] {
        &self.buffer
    }
}

impl Default for FrameEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode a full transport payload
///
/// Returns `None` if the payload has the wrong length or contains invalid
/// bit patterns.
pub fn decode_frame(payload: &[u8]) -> Option<[Color; LED_COUNT]> {
    if payload.len() != FRAME_BYTES {
        return None;
    }
    let mut colors = [Color::BLACK; LED_COUNT];
    for (color, chunk) in colors.iter_mut().zip(payload.chunks_exact(BYTES_PER_PIXEL)) {
        let pixel = <&[u8; BYTES_PER_PIXEL]>::try_from(chunk).ok()?;
        *color = decode_color(pixel)?;
    }
    Some(colors)
}
