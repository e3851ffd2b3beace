//! Application core: garage domain logic, no direct I/O.
//!
//! Occupancy counting, the fee policy, gate actuation and the "garage full"
//! light live here. All interaction with hardware happens through the
//! **port traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod commands;
pub mod controller;
pub mod events;
pub mod ports;
