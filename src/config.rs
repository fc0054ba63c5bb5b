//! System configuration parameters
//!
//! All tunable parameters for the LuxLink node.  Values are compile-time
//! defaults; there is no persistence, so every boot starts from
//! [`SystemConfig::default()`].

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;
use crate::protocol::frame::STATION_MAX;

/// Wire format on the secondary link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameFormat {
    /// 3-byte station/value/CRC frame.
    Binary,
    /// Legacy 11-byte `A..H..C00!` text frame.
    Text,
}

/// What decides when a frame goes out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransmitMode {
    /// Every `transmit_period_ms`.
    Periodic,
    /// `transmit_period_ms` after a trigger edge; nothing without one.
    Triggered,
}

/// Which filter output is framed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransmitSource {
    Raw,
    Smoothed,
    Notch,
    Fir,
}

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Sampling ---
    /// LDR supply voltage (V)
    pub supply_voltage: f32,
    /// ADC code count (1024 for 10-bit)
    pub adc_resolution: u16,

    // --- Timing ---
    /// Sample + filter period (milliseconds)
    pub sample_period_ms: u32,
    /// Link transmit period (milliseconds)
    pub transmit_period_ms: u32,
    /// Diagnostic record period (milliseconds)
    pub print_period_ms: u32,
    /// Upper bound on the boot-time wait for the diagnostic channel
    pub diag_ready_timeout_ms: u32,

    // --- Link ---
    /// Station identifier carried in every frame (0-15)
    pub station_id: u8,
    pub frame_format: FrameFormat,
    pub transmit_mode: TransmitMode,
    pub transmit_source: TransmitSource,
    /// Secondary link baud rate
    pub link_baud: u32,
    /// Idle-low, start-bit-high line levels on the secondary link
    pub link_inverted: bool,
    /// Mirror every binary frame to the diagnostic channel as bit groups
    pub echo_binary: bool,

    // --- Diagnostics ---
    /// Primary diagnostic serial baud rate
    pub diag_baud: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Sampling
            supply_voltage: 5.0,
            adc_resolution: 1024, // 10-bit

            // Timing
            sample_period_ms: 10,      // 100 Hz
            transmit_period_ms: 1000,  // 1 Hz
            print_period_ms: 15,
            diag_ready_timeout_ms: 3000,

            // Link
            station_id: 1,
            frame_format: FrameFormat::Binary,
            transmit_mode: TransmitMode::Triggered,
            transmit_source: TransmitSource::Smoothed,
            link_baud: 300,
            link_inverted: true,
            echo_binary: true,

            // Diagnostics
            diag_baud: 115_200,
        }
    }
}

impl SystemConfig {
    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.supply_voltage.is_finite() || self.supply_voltage <= 0.0 {
            return Err(ConfigError::ValidationFailed("supply_voltage must be positive"));
        }
        if self.adc_resolution < 2 {
            return Err(ConfigError::ValidationFailed("adc_resolution must be at least 2"));
        }
        if self.sample_period_ms == 0 || self.transmit_period_ms == 0 || self.print_period_ms == 0 {
            return Err(ConfigError::ValidationFailed("periods must be non-zero"));
        }
        if self.station_id > STATION_MAX {
            return Err(ConfigError::ValidationFailed("station_id must fit in 4 bits"));
        }
        if self.link_baud == 0 || self.diag_baud == 0 {
            return Err(ConfigError::ValidationFailed("baud rates must be non-zero"));
        }
        Ok(())
    }
}
