//! Light-dependent resistor (photoresistor) driver.
//!
//! The LDR sits in a voltage divider read through one ADC1 channel.  A read
//! yields the raw code and the divider voltage; [`volts_to_lux`] maps that
//! voltage onto illuminance with the empirically fitted curve of the
//! photoresistor datasheet.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1_CH6 via the oneshot API (initialised by hw_init)
//! and rescales the 12-bit result to the 10-bit code domain.
//! On host/test: reads from a static `AtomicU16` for injection.

use core::sync::atomic::AtomicU16;
#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::Ordering;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

static SIM_LDR_ADC: AtomicU16 = AtomicU16::new(0);

/// Inject the code returned by the next simulated ADC reads.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_ldr_adc(raw: u16) {
    SIM_LDR_ADC.store(raw, Ordering::Relaxed);
}

/// Calibration curve `lux = LUX_SCALE · e^(LUX_EXPONENT · V)`.
/// Must stay bit-for-bit identical across deployments.
pub const LUX_SCALE: f64 = 23.454_812_1;
pub const LUX_EXPONENT: f64 = 1.198_245_56;

/// Illuminance ceiling (display and protocol range).
pub const LUX_MAX: f32 = 999.0;

/// One ADC sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    pub raw_code: u16,
    pub voltage: f32,
}

/// Convert an ADC code to the divider voltage.
pub fn adc_to_volts(raw: u16, supply_voltage: f32, resolution: u16) -> f32 {
    supply_voltage / f32::from(resolution - 1) * f32::from(raw)
}

/// Map a divider voltage to illuminance, clamped to [`LUX_MAX`].
///
/// No floor clamp: `voltage >= 0` already gives `lux > 0`.
pub fn volts_to_lux(voltage: f32) -> f32 {
    let lux = (LUX_SCALE * (LUX_EXPONENT * f64::from(voltage)).exp()) as f32;
    lux.min(LUX_MAX)
}

pub struct LdrSensor {
    supply_voltage: f32,
    resolution: u16,
    total_reads: u32,
    _adc_gpio: i32,
}

impl LdrSensor {
    pub fn new(adc_gpio: i32, supply_voltage: f32, resolution: u16) -> Self {
        Self {
            supply_voltage,
            resolution,
            total_reads: 0,
            _adc_gpio: adc_gpio,
        }
    }

    /// Read one code and convert it to a voltage.
    pub fn sample(&mut self) -> SensorReading {
        self.total_reads = self.total_reads.saturating_add(1);
        let raw_code = self.read_adc().min(self.resolution - 1);
        SensorReading {
            raw_code,
            voltage: adc_to_volts(raw_code, self.supply_voltage, self.resolution),
        }
    }

    pub fn total_reads(&self) -> u32 {
        self.total_reads
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> u16 {
        // ESP32-S3 oneshot reads are 12-bit.
        hw_init::adc1_read(hw_init::ADC1_CH_LDR) >> 2
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> u16 {
        SIM_LDR_ADC.load(Ordering::Relaxed)
    }
}
