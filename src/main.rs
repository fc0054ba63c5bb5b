//! LuxLink Firmware — Main Entry Point
//!
//! Hexagonal architecture around a cooperative loop, with the link
//! transmitter on its own task.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter   QueuedLink     ConsoleAdapter  LogEventSink │
//! │  (SamplePort)      (FrameSink)    (DiagnosticPort)(EventSink)  │
//! │  Esp32TimeAdapter (Clock)           │                          │
//! │                                     ▼ spsc queue               │
//! │  link task (APP_CPU):  LinkPump ──▶ SoftSerialTx               │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  Scheduler · FilterCascade · Framer                    │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  GPIO ISR ──▶ TRANSMIT_TRIGGER (atomics)                       │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use esp_idf_hal::delay::{Ets, FreeRtos};
use esp_idf_hal::gpio::{AnyOutputPin, PinDriver};
use log::{error, info};

use luxlink::adapters::console::ConsoleAdapter;
use luxlink::adapters::hardware::HardwareAdapter;
use luxlink::adapters::log_sink::LogEventSink;
use luxlink::adapters::time::Esp32TimeAdapter;
use luxlink::app::ports::Clock;
use luxlink::app::service::{AppService, Readiness};
use luxlink::config::SystemConfig;
use luxlink::drivers::hw_init;
use luxlink::drivers::link_queue;
use luxlink::drivers::soft_serial::SoftSerialTx;
use luxlink::drivers::task_pin::{self, Core};
use luxlink::pins;
use luxlink::trigger::TRANSMIT_TRIGGER;

// ── Link task ─────────────────────────────────────────────────

const LINK_TASK_PRIORITY: u8 = 5;
const LINK_TASK_STACK_KB: usize = 4;
/// Link task sleep when the queue is empty.
const LINK_IDLE_MS: u32 = 1;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  LuxLink v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration (compile-time defaults) ──────────────
    let config = SystemConfig::default();

    // ── 3. Peripherals ────────────────────────────────────────
    hw_init::init_peripherals().map_err(luxlink::Error::from)?;

    // SAFETY: LINK_TX_GPIO is claimed by nothing else on this board.
    let tx_pin = PinDriver::output(unsafe { AnyOutputPin::new(pins::LINK_TX_GPIO) })?;
    let line = SoftSerialTx::new(tx_pin, Ets, config.link_baud, config.link_inverted)
        .map_err(luxlink::Error::from)?;
    // The loop only enqueues; bit timing runs on the other core.
    let (mut link, pump) = link_queue::channel(line);
    task_pin::spawn_on_core(Core::App, LINK_TASK_PRIORITY, LINK_TASK_STACK_KB, "link-tx\0", move || {
        pump.run(LINK_IDLE_MS);
    })?;
    info!(
        "Link: GPIO{} @ {} baud{}",
        pins::LINK_TX_GPIO,
        config.link_baud,
        if config.link_inverted { " (inverted)" } else { "" }
    );

    let mut hw = HardwareAdapter::from_config(&config);
    let mut console = ConsoleAdapter::open(config.diag_baud).map_err(luxlink::Error::from)?;
    let mut sink = LogEventSink::new();
    let clock = Esp32TimeAdapter::new();

    // ── 4. Application service ────────────────────────────────
    let mut app = AppService::new(config, &TRANSMIT_TRIGGER).map_err(luxlink::Error::from)?;

    if app.await_diagnostics(&console, &clock, &mut sink) == Readiness::TimedOut {
        info!("Continuing in degraded mode");
    }

    // The ISR goes live only once the trigger has a valid timer origin.
    app.start(clock.now_ms(), &mut sink);
    if let Err(e) = hw_init::init_isr_service() {
        error!("ISR service init failed: {} — transmit trigger disabled", e);
    }

    // ── 5. Main loop ──────────────────────────────────────────
    loop {
        app.poll(clock.now_ms(), &mut hw, &mut link, &mut console, &mut sink);
        // Lets the idle task feed the task watchdog.
        FreeRtos::delay_ms(1);
    }
}
