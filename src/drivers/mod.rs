//! Hardware initialisation, the link transmit path and task spawning.

pub mod hw_init;
pub mod link_queue;
pub mod soft_serial;
pub mod task_pin;
