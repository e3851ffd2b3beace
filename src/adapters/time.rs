//! Host time adapters.
//!
//! - [`SystemClock`]: [`ClockPort`] backed by the host's local wall clock,
//!   for boards without an RTC or for host-side runs.
//! - [`StdDelay`]: [`DelayNs`] backed by `std::thread::sleep`, used to
//!   hold servo positions.

use std::time::Duration;

use chrono::NaiveDateTime;
use embedded_hal::delay::DelayNs;

use crate::app::ports::ClockPort;
use crate::error::HardwareError;

/// Local wall-clock time adapter.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl ClockPort for SystemClock {
    fn clock_read(&mut self) -> Result<NaiveDateTime, HardwareError> {
        Ok(chrono::Local::now().naive_local())
    }
}

/// Blocking delay on the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdDelay;

impl StdDelay {
    pub fn new() -> Self {
        Self
    }
}

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}
