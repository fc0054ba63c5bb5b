//! Fuzz target: `TextFrameDecoder::feed`
//!
//! Streams arbitrary bytes through the text-frame decoder.  It must never
//! panic, every accepted frame must be in range, and a reset must leave it
//! able to decode a clean frame.
//!
//! cargo fuzz run fuzz_text_stream

#![no_main]

use libfuzzer_sys::fuzz_target;
use luxlink::protocol::frame::STATION_MAX;
use luxlink::protocol::text::{TEXT_VALUE_MAX, TextFrameDecoder};

fuzz_target!(|data: &[u8]| {
    let mut decoder = TextFrameDecoder::new();

    for &b in data {
        if let Some(Ok(frame)) = decoder.feed(b) {
            assert!(frame.station_id <= STATION_MAX);
            assert!(frame.value <= TEXT_VALUE_MAX);
        }
    }

    decoder.reset();
    let mut last = None;
    for &b in b"A03H123C00!" {
        last = decoder.feed(b);
    }
    let frame = last.expect("terminator yields a result").expect("clean frame decodes");
    assert_eq!((frame.station_id, frame.value), (3, 123));
});
