//! LuxLink firmware library.
//!
//! Exposes the pipeline modules for integration testing and external
//! inspection.  All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module; on the host the
//! drivers fall back to injectable simulation state.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod filters;
pub mod protocol;
pub mod scheduler;
pub mod trigger;

pub mod error;
pub mod pins;

pub mod adapters;
pub mod drivers;
pub mod sensors;

pub use error::{Error, Result};
