//! Fuzz target: `Frame::from_bytes`
//!
//! Drives arbitrary byte slices into the binary frame decoder and asserts
//! that it never panics, only accepts exactly three bytes, and that any
//! accepted frame re-encodes to the same bytes.
//!
//! cargo fuzz run fuzz_frame_decoder

#![no_main]

use libfuzzer_sys::fuzz_target;
use luxlink::protocol::frame::{BINARY_FRAME_LEN, Frame};

fuzz_target!(|data: &[u8]| {
    if let Ok(frame) = Frame::from_bytes(data) {
        assert_eq!(data.len(), BINARY_FRAME_LEN, "decoder accepted a short/long frame");
        assert_eq!(&frame.to_bytes()[..], data, "accepted frame must re-encode identically");
    }
});
