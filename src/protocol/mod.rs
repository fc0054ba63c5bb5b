//! Link protocol: frame encoders, CRC, receiver-side decoding.
//!
//! Two mutually exclusive wire formats sit behind the [`Framer`] strategy,
//! chosen at runtime from [`FrameFormat`]:
//!
//! | Format   | Length | Integrity | Use                         |
//! |----------|--------|-----------|-----------------------------|
//! | `Binary` | 3 B    | CRC-8     | production link             |
//! | `Text`   | 11 B   | none      | bench terminal debugging    |

pub mod crc;
pub mod diag;
pub mod frame;
pub mod text;

use core::fmt;

use heapless::Vec;

use crate::config::FrameFormat;
use frame::{BINARY_FRAME_LEN, Frame};
use text::{TEXT_FRAME_LEN, encode_text};

/// Longest encoded frame of any format.
pub const MAX_FRAME_LEN: usize = TEXT_FRAME_LEN;

/// Encoded frame bytes, in wire order.
pub type FrameBytes = Vec<u8, MAX_FRAME_LEN>;

const _: () = assert!(BINARY_FRAME_LEN <= MAX_FRAME_LEN && TEXT_FRAME_LEN <= MAX_FRAME_LEN);

/// Copy an encoded frame into [`FrameBytes`].  Every format fits (checked
/// at compile time above).
fn to_frame_bytes(bytes: &[u8]) -> FrameBytes {
    let out = FrameBytes::from_slice(bytes);
    debug_assert!(out.is_ok(), "{} B frame exceeds MAX_FRAME_LEN", bytes.len());
    out.unwrap_or_default()
}

/// Encodes a station id and value into wire bytes.
pub trait Framer {
    fn format(&self) -> FrameFormat;

    /// Encode `value` for `station_id`.  Fields outside the format's range
    /// are clamped or masked by the implementation.
    fn encode(&self, station_id: u8, value: u16) -> FrameBytes;
}

/// 3-byte station/value/CRC frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryFramer;

impl Framer for BinaryFramer {
    fn format(&self) -> FrameFormat {
        FrameFormat::Binary
    }

    fn encode(&self, station_id: u8, value: u16) -> FrameBytes {
        let bytes: [u8; BINARY_FRAME_LEN] = Frame::new(station_id, value).to_bytes();
        to_frame_bytes(&bytes)
    }
}

/// 11-byte `A..H..C00!` frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFramer;

impl Framer for TextFramer {
    fn format(&self) -> FrameFormat {
        FrameFormat::Text
    }

    fn encode(&self, station_id: u8, value: u16) -> FrameBytes {
        to_frame_bytes(encode_text(station_id, value).as_bytes())
    }
}

static BINARY_FRAMER: BinaryFramer = BinaryFramer;
static TEXT_FRAMER: TextFramer = TextFramer;

/// Strategy instance for `format`.
pub fn framer_for(format: FrameFormat) -> &'static dyn Framer {
    match format {
        FrameFormat::Binary => &BINARY_FRAMER,
        FrameFormat::Text => &TEXT_FRAMER,
    }
}

/// Receiver-side decode failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Frame was not the expected number of bytes.
    BadLength(usize),
    /// Checksum did not match the payload.
    CrcMismatch { expected: u8, actual: u8 },
    /// Framing characters or digits were wrong.
    Malformed(&'static str),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadLength(n) => write!(f, "bad frame length {n}"),
            Self::CrcMismatch { expected, actual } => {
                write!(f, "CRC mismatch (expected 0x{expected:02X}, got 0x{actual:02X})")
            }
            Self::Malformed(what) => write!(f, "malformed frame: {what}"),
        }
    }
}
