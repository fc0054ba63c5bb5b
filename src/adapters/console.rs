//! Diagnostic console adapter.
//!
//! Implements [`DiagnosticPort`] on the process stdout, which ESP-IDF routes
//! to the console UART.  Opening the adapter reprograms that UART to the
//! configured baud rate.  A plain UART has no attach detection, so the
//! target build is always ready.  The host build reads readiness from a
//! static so the bounded startup wait can be exercised.

use core::fmt;
use std::io::Write;

use log::info;

use crate::app::ports::DiagnosticPort;
use crate::drivers::hw_init::{self, HwInitError};
use crate::pins;

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, Ordering};

#[cfg(not(target_os = "espidf"))]
static SIM_CONSOLE_READY: AtomicBool = AtomicBool::new(true);

/// Simulate a host attaching to or leaving the console.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_console_ready(ready: bool) {
    SIM_CONSOLE_READY.store(ready, Ordering::Relaxed);
}

#[derive(Debug)]
pub struct ConsoleAdapter {
    baud: u32,
    bytes_written: usize,
}

impl ConsoleAdapter {
    /// Claim the console UART at `baud`.
    pub fn open(baud: u32) -> Result<Self, HwInitError> {
        hw_init::set_console_baud(baud)?;
        info!(
            "Console: TX GPIO{} / RX GPIO{} @ {} baud",
            pins::UART_TX_GPIO,
            pins::UART_RX_GPIO,
            baud
        );
        Ok(Self {
            baud,
            bytes_written: 0,
        })
    }

    pub fn baud(&self) -> u32 {
        self.baud
    }

    pub fn bytes_written(&self) -> usize {
        self.bytes_written
    }
}

impl DiagnosticPort for ConsoleAdapter {
    #[cfg(target_os = "espidf")]
    fn is_ready(&self) -> bool {
        true
    }

    #[cfg(not(target_os = "espidf"))]
    fn is_ready(&self) -> bool {
        SIM_CONSOLE_READY.load(Ordering::Relaxed)
    }

    fn write_fmt(&mut self, args: fmt::Arguments<'_>) {
        let mut out = std::io::stdout().lock();
        let mut counter = CountingWriter {
            inner: &mut out,
            count: 0,
        };
        // Best-effort: a console that drops output is not an error.
        if std::io::Write::write_fmt(&mut counter, args).is_ok() {
            let _ = counter.inner.flush();
        }
        self.bytes_written += counter.count;
    }
}

struct CountingWriter<'a, W> {
    inner: &'a mut W,
    count: usize,
}

impl<W: Write> Write for CountingWriter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.count += n;
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
