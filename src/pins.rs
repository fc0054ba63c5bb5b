//! GPIO / peripheral pin assignments for the LuxLink sensor node.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// LDR voltage divider (ADC1)
// ---------------------------------------------------------------------------

/// LDR divider tap — ADC1 channel 6 (GPIO 7 on ESP32-S3).
pub const LDR_ADC_GPIO: i32 = 7;
/// ADC1 channel wired to [`LDR_ADC_GPIO`].
pub const LDR_ADC_CHANNEL: u32 = 6;

// ---------------------------------------------------------------------------
// Transmit trigger input
// ---------------------------------------------------------------------------

/// Rising edge requests a link transmit.  Pulled down; an external
/// push-button or upstream node drives it high.
pub const TRIGGER_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Secondary link (bit-banged serial)
// ---------------------------------------------------------------------------

/// Soft-serial TX.  The link is transmit-only.
pub const LINK_TX_GPIO: i32 = 11;

// ---------------------------------------------------------------------------
// Primary diagnostic UART (console)
// ---------------------------------------------------------------------------

/// Console UART pins (UART0 default routing).  Baud is set at boot from
/// `SystemConfig::diag_baud`.
pub const UART_TX_GPIO: i32 = 43;
pub const UART_RX_GPIO: i32 = 44;
