//! Hardware adapter — bridges the LDR driver to the [`SamplePort`].
//!
//! This is the only module on the sampling path that touches an actual
//! peripheral.  On non-espidf targets the underlying driver reads the
//! injectable simulation ADC.

use crate::app::ports::SamplePort;
use crate::config::SystemConfig;
use crate::pins;
use crate::sensors::{LdrSensor, SensorReading};

/// Concrete adapter that puts the LDR behind [`SamplePort`].
pub struct HardwareAdapter {
    ldr: LdrSensor,
}

impl HardwareAdapter {
    pub fn new(ldr: LdrSensor) -> Self {
        Self { ldr }
    }

    /// LDR on its board pin, scaled by the configured supply and resolution.
    pub fn from_config(config: &SystemConfig) -> Self {
        Self::new(LdrSensor::new(
            pins::LDR_ADC_GPIO,
            config.supply_voltage,
            config.adc_resolution,
        ))
    }

    pub fn total_reads(&self) -> u32 {
        self.ldr.total_reads()
    }
}

// ── SamplePort implementation ─────────────────────────────────

impl SamplePort for HardwareAdapter {
    fn sample(&mut self) -> SensorReading {
        self.ldr.sample()
    }
}
