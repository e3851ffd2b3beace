//! Parking garage controller library.
//!
//! Exposes the pure-logic modules (controller, fee policy, config) and the
//! adapters that connect them to hardware. Everything builds and tests on
//! the host; a board only has to supply `embedded-hal` pins and an I²C bus.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod fee;
pub mod pins;

pub use app::controller::{GarageController, GarageState};
pub use error::{GarageError, HardwareError};
