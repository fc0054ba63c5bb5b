//! Edge-triggered transmit request shared between the GPIO ISR and the
//! main loop.
//!
//! The ISR writes two scalars, the edge timestamp and a wrapping edge
//! counter, and the main loop polls them.  Both are atomics; the ordering
//! is:
//!
//! ```text
//!  ISR                                   main loop
//!  ───                                   ─────────
//!  last_transmit_ms.store(now)           edges.load(Acquire) ── n ─┐
//!  edges.fetch_add(1, Release) ────────▶ last_transmit_ms.load() ◀─┘
//! ```
//!
//! A request is pending while `edges` differs from the count the main loop
//! last served.  The loop records the count it read *before* deciding, so
//! an edge landing mid-decision stays pending for the next poll instead of
//! being cleared with the one just served.  Nothing else is shared with
//! interrupt context.

use core::sync::atomic::{AtomicU32, Ordering};

/// Edge counter plus the transmit-timer origin.
#[derive(Debug)]
pub struct TransmitTrigger {
    edges: AtomicU32,
    served: AtomicU32,
    last_transmit_ms: AtomicU32,
}

impl TransmitTrigger {
    pub const fn new() -> Self {
        Self {
            edges: AtomicU32::new(0),
            served: AtomicU32::new(0),
            last_transmit_ms: AtomicU32::new(0),
        }
    }

    /// ISR entry: request a send and restart the transmit timer at `now_ms`.
    /// Lock-free; safe to call from interrupt context.
    pub fn arm(&self, now_ms: u32) {
        self.last_transmit_ms.store(now_ms, Ordering::Relaxed);
        self.edges.fetch_add(1, Ordering::Release);
    }

    /// Edges seen so far (wrapping).  Acquire: read this before the
    /// timestamp it publishes.
    pub fn edges(&self) -> u32 {
        self.edges.load(Ordering::Acquire)
    }

    /// Edge count covered by the last completed send.
    pub fn served(&self) -> u32 {
        self.served.load(Ordering::Relaxed)
    }

    pub fn is_pending(&self) -> bool {
        self.edges() != self.served()
    }

    /// Start of the current transmit period.
    pub fn last_transmit_ms(&self) -> u32 {
        self.last_transmit_ms.load(Ordering::Relaxed)
    }

    /// Main loop: record a send at `now_ms` that served every edge up to
    /// `edges`, the count read when the send was decided.
    pub fn complete(&self, now_ms: u32, edges: u32) {
        self.served.store(edges, Ordering::Relaxed);
        self.last_transmit_ms.store(now_ms, Ordering::Relaxed);
    }

    /// Boot: drop any request and start the timer at `now_ms`.
    pub fn reset(&self, now_ms: u32) {
        self.complete(now_ms, self.edges());
    }
}

impl Default for TransmitTrigger {
    fn default() -> Self {
        Self::new()
    }
}

/// The board's trigger.  `static` because ESP-IDF ISR callbacks cannot
/// capture state.
pub static TRANSMIT_TRIGGER: TransmitTrigger = TransmitTrigger::new();

/// ISR handler, registered on the trigger GPIO rising edge.
pub fn transmit_isr_handler(now_ms: u32) {
    TRANSMIT_TRIGGER.arm(now_ms);
}
