//! Sensor subsystem.
//!
//! A single photoresistor channel today.  The hardware adapter owns the
//! driver and exposes it to the application core through
//! [`SamplePort`](crate::app::ports::SamplePort).

pub mod ldr;

pub use ldr::{LdrSensor, SensorReading, adc_to_volts, volts_to_lux};
