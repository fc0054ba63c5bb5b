//! Byte queue between the main loop and the link transmit task.
//!
//! The bit-banged line needs ~33 ms per byte at 300 baud, several sample
//! periods, so the loop never drives the pin itself.  It pushes whole
//! frames into a `heapless::spsc::Queue` and a dedicated task drains the
//! queue into the line at line speed.
//!
//! ```text
//!  main loop                                         link task
//!  ─────────                                         ─────────
//!  AppService ──▶ QueuedLink ──▶ [ spsc::Queue ] ──▶ LinkPump ──▶ SoftSerialTx
//!                 (Producer)                         (Consumer)
//! ```
//!
//! A frame is queued entirely or not at all, so the receiver never sees a
//! truncated frame caused by a full queue.

use std::time::Duration;

use heapless::spsc::{Consumer, Producer, Queue};
use log::warn;

use crate::app::ports::{FrameSink, LinkError};

/// Queue storage size; usable capacity is one less.
pub const LINK_QUEUE_LEN: usize = 64;

pub type LinkQueue = Queue<u8, LINK_QUEUE_LEN>;

/// Leak a queue and split it around `line`.  Both halves are `'static`,
/// so the pump can move into its own task.
pub fn channel<L: FrameSink>(line: L) -> (QueuedLink<'static>, LinkPump<'static, L>) {
    let queue: &'static mut LinkQueue = Box::leak(Box::new(LinkQueue::new()));
    let (producer, consumer) = queue.split();
    (QueuedLink::new(producer), LinkPump::new(consumer, line))
}

// ── Producer side ─────────────────────────────────────────────

/// [`FrameSink`] for the main loop: enqueues and returns immediately.
pub struct QueuedLink<'a> {
    producer: Producer<'a, u8, LINK_QUEUE_LEN>,
    frames_queued: u32,
}

impl<'a> QueuedLink<'a> {
    pub fn new(producer: Producer<'a, u8, LINK_QUEUE_LEN>) -> Self {
        Self {
            producer,
            frames_queued: 0,
        }
    }

    /// Bytes that can still be queued.  Only grows while the pump runs.
    pub fn free(&self) -> usize {
        self.producer.capacity() - self.producer.len()
    }

    pub fn frames_queued(&self) -> u32 {
        self.frames_queued
    }
}

impl FrameSink for QueuedLink<'_> {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), LinkError> {
        let free = self.free();
        if bytes.len() > free {
            return Err(LinkError::QueueFull {
                needed: bytes.len(),
                free,
            });
        }
        for &b in bytes {
            // Space was checked above and only the pump removes bytes.
            self.producer.enqueue(b).map_err(|_| LinkError::QueueFull {
                needed: bytes.len(),
                free: 0,
            })?;
        }
        self.frames_queued = self.frames_queued.wrapping_add(1);
        Ok(())
    }
}

// ── Consumer side ─────────────────────────────────────────────

/// Drains queued bytes into the physical line, one byte at a time.
pub struct LinkPump<'a, L> {
    consumer: Consumer<'a, u8, LINK_QUEUE_LEN>,
    line: L,
    bytes_sent: u32,
    line_errors: u32,
}

impl<'a, L: FrameSink> LinkPump<'a, L> {
    pub fn new(consumer: Consumer<'a, u8, LINK_QUEUE_LEN>, line: L) -> Self {
        Self {
            consumer,
            line,
            bytes_sent: 0,
            line_errors: 0,
        }
    }

    /// Shift out the next queued byte.  `Ok(false)` when nothing is queued.
    ///
    /// A byte the line rejects is dropped; the receiver's CRC or parser
    /// discards the damaged frame.
    pub fn pump_one(&mut self) -> Result<bool, LinkError> {
        let Some(byte) = self.consumer.dequeue() else {
            return Ok(false);
        };
        if let Err(e) = self.line.write_bytes(&[byte]) {
            self.line_errors = self.line_errors.wrapping_add(1);
            return Err(e);
        }
        self.bytes_sent = self.bytes_sent.wrapping_add(1);
        Ok(true)
    }

    /// Send everything queued right now.  Returns the bytes sent.
    pub fn drain(&mut self) -> usize {
        let mut sent = 0;
        loop {
            match self.pump_one() {
                Ok(true) => sent += 1,
                Ok(false) => return sent,
                Err(e) => warn!("Link line write failed: {}", e),
            }
        }
    }

    /// Bytes waiting in the queue.
    pub fn backlog(&self) -> usize {
        self.consumer.len()
    }

    pub fn bytes_sent(&self) -> u32 {
        self.bytes_sent
    }

    pub fn line_errors(&self) -> u32 {
        self.line_errors
    }

    pub fn line(&self) -> &L {
        &self.line
    }

    /// Link task body: drain, then sleep `idle_ms` whenever the queue runs
    /// dry.
    pub fn run(mut self, idle_ms: u32) -> ! {
        loop {
            self.drain();
            std::thread::sleep(Duration::from_millis(u64::from(idle_ms)));
        }
    }
}
