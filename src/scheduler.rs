//! Cooperative cadence scheduler.
//!
//! Three independent cadences share one millisecond clock reading per
//! loop iteration:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        now_ms (read once)                    │
//! │                                                              │
//! │  ┌─────────────┐   ┌──────────────────────┐   ┌───────────┐  │
//! │  │ sample      │   │ transmit             │   │ print     │  │
//! │  │ 10 ms       │   │ 1000 ms (+ trigger)  │   │ 15 ms     │  │
//! │  └──────┬──────┘   └──────────┬───────────┘   └─────┬─────┘  │
//! │         │                     │                     │        │
//! │         ▼                     ▼                     ▼        │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │                      Fired { .. }                      │  │
//! │  └───────────────────────┬────────────────────────────────┘  │
//! │                          ▼                                   │
//! │                    AppService.poll()                         │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! A cadence that is polled late fires once and restarts from the poll
//! time; missed periods are not replayed.  All elapsed-time arithmetic is
//! `wrapping_sub`, so the 49-day wrap of the millisecond counter is benign.

use log::debug;

use crate::config::{SystemConfig, TransmitMode};
use crate::trigger::TransmitTrigger;

// ═══════════════════════════════════════════════════════════════
//  Cadence
// ═══════════════════════════════════════════════════════════════

/// One fixed-period timer driven by an external clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    period_ms: u32,
    last_ms: u32,
}

impl Cadence {
    pub const fn new(period_ms: u32, now_ms: u32) -> Self {
        Self {
            period_ms,
            last_ms: now_ms,
        }
    }

    /// At least one full period has elapsed since the last fire.
    pub fn is_due(&self, now_ms: u32) -> bool {
        now_ms.wrapping_sub(self.last_ms) >= self.period_ms
    }

    /// Fire if due, restarting the period at `now_ms`.
    pub fn poll(&mut self, now_ms: u32) -> bool {
        if self.is_due(now_ms) {
            self.last_ms = now_ms;
            true
        } else {
            false
        }
    }

    pub fn restart(&mut self, now_ms: u32) {
        self.last_ms = now_ms;
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    pub fn last_ms(&self) -> u32 {
        self.last_ms
    }
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler
// ═══════════════════════════════════════════════════════════════

/// Why a transmit fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransmitCause {
    /// Transmit period elapsed in periodic mode.
    Period,
    /// A trigger edge was pending and its period elapsed.
    Trigger,
}

/// What fired on one [`Scheduler::poll`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fired {
    pub sample: bool,
    pub transmit: Option<TransmitCause>,
    pub print: bool,
}

impl Fired {
    pub fn any(&self) -> bool {
        self.sample || self.transmit.is_some() || self.print
    }
}

/// Sample, transmit and print cadences.
///
/// The transmit timer origin lives in the shared [`TransmitTrigger`] so the
/// ISR can restart it; the scheduler only reads it and clears it after a
/// transmit fires.
#[derive(Debug, Clone)]
pub struct Scheduler {
    sample: Cadence,
    print: Cadence,
    transmit_period_ms: u32,
    mode: TransmitMode,
}

impl Scheduler {
    pub fn new(config: &SystemConfig, now_ms: u32) -> Self {
        Self {
            sample: Cadence::new(config.sample_period_ms, now_ms),
            print: Cadence::new(config.print_period_ms, now_ms),
            transmit_period_ms: config.transmit_period_ms,
            mode: config.transmit_mode,
        }
    }

    /// Evaluate every cadence against one clock reading.
    ///
    /// When a transmit fires the trigger is completed at `now_ms`: the edges
    /// read here are served and the next transmit period starts here.
    pub fn poll(&mut self, now_ms: u32, trigger: &TransmitTrigger) -> Fired {
        let sample = self.sample.poll(now_ms);
        let print = self.print.poll(now_ms);

        // Edge count first: it publishes the timestamp read below.
        let edges = trigger.edges();
        let pending = edges != trigger.served();
        let elapsed = now_ms.wrapping_sub(trigger.last_transmit_ms());
        let period_over = elapsed >= self.transmit_period_ms;

        let transmit = match self.mode {
            TransmitMode::Periodic if period_over => Some(TransmitCause::Period),
            TransmitMode::Triggered if pending && period_over => Some(TransmitCause::Trigger),
            _ => None,
        };
        if let Some(cause) = transmit {
            debug!("Scheduler: transmit fired at {} ms ({:?})", now_ms, cause);
            trigger.complete(now_ms, edges);
        }

        Fired {
            sample,
            transmit,
            print,
        }
    }

    /// Restart every cadence at `now_ms`.
    pub fn restart(&mut self, now_ms: u32, trigger: &TransmitTrigger) {
        self.sample.restart(now_ms);
        self.print.restart(now_ms);
        trigger.reset(now_ms);
    }

    pub fn mode(&self) -> TransmitMode {
        self.mode
    }

    pub fn sample_cadence(&self) -> &Cadence {
        &self.sample
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
