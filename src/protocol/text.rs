//! Legacy human-readable text frame.
//!
//! `A{station:02}H{value:03}C00!` — always 11 ASCII bytes, no checksum.
//! Kept for bench debugging against a plain serial terminal.
//!
//! [`TextFrameDecoder`] is the receiving side: it resynchronises on `A` and
//! yields one result per `!`.

use core::fmt::Write;

use heapless::{String, Vec};

use super::frame::{Frame, STATION_MAX};
use super::DecodeError;

pub const TEXT_FRAME_LEN: usize = 11;

/// Largest value representable in the 3-digit field.
pub const TEXT_VALUE_MAX: u16 = 999;
/// Largest station representable in the 2-digit field.
pub const TEXT_STATION_MAX: u8 = 99;

/// Render the text frame.  Fields wider than their digit count are clamped.
pub fn encode_text(station_id: u8, value: u16) -> String<TEXT_FRAME_LEN> {
    let mut out = String::new();
    // 11 bytes exactly once both fields are clamped.
    let res = write!(
        out,
        "A{:02}H{:03}C00!",
        station_id.min(TEXT_STATION_MAX),
        value.min(TEXT_VALUE_MAX)
    );
    debug_assert!(res.is_ok(), "text frame overflowed {} B", TEXT_FRAME_LEN);
    out
}

/// Parse one complete text frame.
pub fn decode_text(bytes: &[u8]) -> Result<Frame, DecodeError> {
    if bytes.len() != TEXT_FRAME_LEN {
        return Err(DecodeError::BadLength(bytes.len()));
    }
    if bytes[0] != b'A' || bytes[3] != b'H' || &bytes[7..] != b"C00!" {
        return Err(DecodeError::Malformed("text frame markers"));
    }
    let station = parse_digits(&bytes[1..3]).ok_or(DecodeError::Malformed("station digits"))?;
    let value = parse_digits(&bytes[4..7]).ok_or(DecodeError::Malformed("value digits"))?;
    if station > u16::from(STATION_MAX) {
        return Err(DecodeError::Malformed("station out of range"));
    }
    Ok(Frame::new(station as u8, value))
}

fn parse_digits(digits: &[u8]) -> Option<u16> {
    digits.iter().try_fold(0u16, |acc, &d| {
        d.is_ascii_digit().then(|| acc * 10 + u16::from(d - b'0'))
    })
}

/// Streaming decoder for a byte stream of text frames.
pub struct TextFrameDecoder {
    buf: Vec<u8, TEXT_FRAME_LEN>,
    in_frame: bool,
}

impl TextFrameDecoder {
    pub fn new() -> Self {
        Self {
            buf: Vec::new(),
            in_frame: false,
        }
    }

    /// Feed one byte.  Returns a result whenever a frame terminator arrives
    /// or the buffer overruns without one.
    pub fn feed(&mut self, byte: u8) -> Option<Result<Frame, DecodeError>> {
        if byte == b'A' {
            // Start marker always resynchronises, even mid-frame.
            self.buf.clear();
            self.in_frame = true;
        }
        if !self.in_frame {
            return None;
        }
        if self.buf.push(byte).is_err() {
            self.reset();
            return Some(Err(DecodeError::BadLength(TEXT_FRAME_LEN + 1)));
        }
        if byte == b'!' {
            let result = decode_text(&self.buf);
            self.reset();
            return Some(result);
        }
        None
    }

    /// Drop any partial frame.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.in_frame = false;
    }
}

impl Default for TextFrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_zero_padded_fields() {
        assert_eq!(encode_text(1, 42).as_str(), "A01H042C00!");
        assert_eq!(encode_text(12, 999).as_str(), "A12H999C00!");
    }

    #[test]
    fn always_eleven_bytes() {
        for (s, v) in [(0, 0), (15, 999), (99, 5000), (200, 1)] {
            assert_eq!(encode_text(s, v).len(), TEXT_FRAME_LEN);
        }
    }

    #[test]
    fn decode_recovers_fields() {
        let f = decode_text(b"A07H314C00!").unwrap();
        assert_eq!(f.station_id, 7);
        assert_eq!(f.value, 314);
    }

    #[test]
    fn decode_rejects_bad_markers_and_digits() {
        assert!(matches!(decode_text(b"B07H314C00!"), Err(DecodeError::Malformed(_))));
        assert!(matches!(decode_text(b"A0xH314C00!"), Err(DecodeError::Malformed(_))));
        assert!(matches!(decode_text(b"A42H314C00!"), Err(DecodeError::Malformed(_))));
        assert_eq!(decode_text(b"A07H314C0!"), Err(DecodeError::BadLength(10)));
    }

    #[test]
    fn stream_decoder_skips_noise_and_yields_frames() {
        let mut dec = TextFrameDecoder::new();
        let mut frames = std::vec::Vec::new();
        for &b in b"\x00zzA01H042C00!garbageA02H100C00!".iter() {
            if let Some(r) = dec.feed(b) {
                frames.push(r);
            }
        }
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].as_ref().unwrap().value, 42);
        assert_eq!(frames[1].as_ref().unwrap().station_id, 2);
    }

    #[test]
    fn stream_decoder_resyncs_on_start_marker() {
        let mut dec = TextFrameDecoder::new();
        let mut last = None;
        for &b in b"A01H0A03H005C00!".iter() {
            if let Some(r) = dec.feed(b) {
                last = Some(r);
            }
        }
        let f = last.unwrap().unwrap();
        assert_eq!((f.station_id, f.value), (3, 5));
    }

    #[test]
    fn stream_decoder_reports_overrun() {
        let mut dec = TextFrameDecoder::new();
        let mut results = std::vec::Vec::new();
        for &b in b"A0123456789012".iter() {
            if let Some(r) = dec.feed(b) {
                results.push(r);
            }
        }
        assert_eq!(results, vec![Err(DecodeError::BadLength(TEXT_FRAME_LEN + 1))]);
    }
}
