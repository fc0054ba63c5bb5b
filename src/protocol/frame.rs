//! Compact binary frame.
//!
//! Wire format (byte 0 first):
//! ```text
//! ┌──────────────┬──────────────┬──────────────┐
//! │ byte 0       │ byte 1       │ byte 2       │
//! │ SSSS VVVV    │ VVVV VVVV    │ CRC-8        │
//! │ station│hi 4 │ value lo 8   │ over 0..=1   │
//! └──────────────┴──────────────┴──────────────┘
//! ```

use super::crc::calc_crc;
use super::DecodeError;

pub const BINARY_FRAME_LEN: usize = 3;

/// Largest station id (4 bits).
pub const STATION_MAX: u8 = 0x0F;
/// Largest value (12 bits).
pub const VALUE_MAX: u16 = 0x0FFF;

/// One transmission unit: station id, value and its checksum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub station_id: u8,
    pub value: u16,
    pub crc: u8,
}

impl Frame {
    /// Build a frame; `station_id` is masked to 4 bits, `value` to 12.
    pub fn new(station_id: u8, value: u16) -> Self {
        let station_id = station_id & STATION_MAX;
        let value = value & VALUE_MAX;
        let header = pack_header(station_id, value);
        Self {
            station_id,
            value,
            crc: calc_crc(&header),
        }
    }

    pub fn to_bytes(&self) -> [u8; BINARY_FRAME_LEN] {
        let [b0, b1] = pack_header(self.station_id, self.value);
        [b0, b1, self.crc]
    }

    /// Parse and verify a received 3-byte frame.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let &[b0, b1, crc] = bytes else {
            return Err(DecodeError::BadLength(bytes.len()));
        };
        let expected = calc_crc(&[b0, b1]);
        if expected != crc {
            return Err(DecodeError::CrcMismatch {
                expected,
                actual: crc,
            });
        }
        Ok(Self {
            station_id: b0 >> 4,
            value: (u16::from(b0 & 0x0F) << 8) | u16::from(b1),
            crc,
        })
    }
}

fn pack_header(station_id: u8, value: u16) -> [u8; 2] {
    [
        ((station_id & 0x0F) << 4) | ((value >> 8) as u8 & 0x0F),
        (value & 0xFF) as u8,
    ]
}
