//! Bit-banged, transmit-only serial line for the secondary link.
//!
//! 8N1 framing, LSB first, one delay per bit:
//!
//! ```text
//!  idle ─┐     ┌──┐  ┌──┐  ┌──┐  ┌──┐  ┌──── idle
//!        │start│d0│d1│..│  │  │  │d7│stop
//!        └─────┘  └──┘  └──┘  └──┘
//! ```
//!
//! With `inverted` every level is swapped (idle low, start bit high), which
//! suits an open-collector or optically isolated receiver.  Generic over
//! `embedded-hal` 1.0 traits so the same driver runs against an ESP-IDF
//! `PinDriver` on target and a recording pin in tests.
//!
//! Timing is blocking and open-loop: a 3-byte frame at 300 baud occupies
//! the caller for ~100 ms, so the driver only ever runs on the link task
//! behind [`link_queue`](super::link_queue).  Interrupts stay enabled, so a
//! bit may stretch while the trigger ISR runs.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::app::ports::{FrameSink, LinkError};

const NS_PER_SEC: u32 = 1_000_000_000;

pub struct SoftSerialTx<P, D> {
    pin: P,
    delay: D,
    bit_ns: u32,
    inverted: bool,
    bytes_sent: u32,
}

impl<P: OutputPin, D: DelayNs> SoftSerialTx<P, D> {
    /// Take the pin and drive it to the idle level.
    pub fn new(pin: P, delay: D, baud: u32, inverted: bool) -> Result<Self, LinkError> {
        if baud == 0 || baud > NS_PER_SEC {
            return Err(LinkError::BadBaud(baud));
        }
        let mut tx = Self {
            pin,
            delay,
            bit_ns: NS_PER_SEC / baud,
            inverted,
            bytes_sent: 0,
        };
        tx.set_line(true)?;
        Ok(tx)
    }

    /// Shift one byte out: start bit, 8 data bits LSB first, stop bit.
    pub fn write_byte(&mut self, byte: u8) -> Result<(), LinkError> {
        self.send_bit(false)?;
        for i in 0..8 {
            self.send_bit((byte >> i) & 1 == 1)?;
        }
        // Stop bit leaves the line idle.
        self.send_bit(true)?;
        self.bytes_sent = self.bytes_sent.wrapping_add(1);
        Ok(())
    }

    pub fn bit_ns(&self) -> u32 {
        self.bit_ns
    }

    pub fn bytes_sent(&self) -> u32 {
        self.bytes_sent
    }

    /// Give back the pin and delay.
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }

    fn send_bit(&mut self, mark: bool) -> Result<(), LinkError> {
        self.set_line(mark)?;
        self.delay.delay_ns(self.bit_ns);
        Ok(())
    }

    /// `mark` is the logical UART level (idle = mark = true).
    fn set_line(&mut self, mark: bool) -> Result<(), LinkError> {
        let high = mark != self.inverted;
        let res = if high { self.pin.set_high() } else { self.pin.set_low() };
        res.map_err(|_| LinkError::PinWriteFailed)
    }
}

impl<P: OutputPin, D: DelayNs> FrameSink for SoftSerialTx<P, D> {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), LinkError> {
        bytes.iter().try_for_each(|&b| self.write_byte(b))
    }
}
