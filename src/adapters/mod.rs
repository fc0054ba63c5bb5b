//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements     | Connects to              |
//! |----------------|----------------|--------------------------|
//! | `hardware`     | SamplePort     | ESP32 ADC1 (LDR divider) |
//! | `console`      | DiagnosticPort | stdout / console UART    |
//! | `log_sink`     | EventSink      | `log` facade             |
//! | `time`         | Clock          | ESP32 system timer       |
//!
//! `FrameSink` is implemented directly by
//! [`SoftSerialTx`](crate::drivers::soft_serial::SoftSerialTx).

pub mod console;
pub mod hardware;
pub mod log_sink;
pub mod time;
