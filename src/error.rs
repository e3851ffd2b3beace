//! Unified error types for the garage controller.
//!
//! A single [`GarageError`] enum that every fallible controller operation
//! returns, with hardware faults nested as [`HardwareError`]. All variants
//! are `Copy` so they pass through the control loop without allocation.

use core::fmt;

use crate::pins::PinId;

// ---------------------------------------------------------------------------
// Top-level controller error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GarageError {
    /// An occupancy query named a pin that is not one of the registered
    /// occupancy sensors (this includes the servo and light pins).
    InvalidSensor(PinId),
    /// A hardware port failed. Never retried by the controller.
    HardwareIo(HardwareError),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for GarageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSensor(pin) => write!(f, "pin {pin} is not an occupancy sensor"),
            Self::HardwareIo(e) => write!(f, "hardware: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for GarageError {}

// ---------------------------------------------------------------------------
// Hardware errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareError {
    /// Digital read returned an error.
    ReadFailed(PinId),
    /// Digital write returned an error.
    WriteFailed(PinId),
    /// PWM duty-cycle write failed.
    PwmFailed(PinId),
    /// The adapter has no pin registered under this identifier.
    UnknownPin(PinId),
    /// The pin cannot be used in the requested mode (e.g. writing an input).
    UnsupportedMode(PinId),
    /// The real-time clock did not answer.
    ClockUnavailable,
    /// The real-time clock answered with a date/time that does not exist.
    ClockInvalid,
}

impl fmt::Display for HardwareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFailed(pin) => write!(f, "GPIO read failed on pin {pin}"),
            Self::WriteFailed(pin) => write!(f, "GPIO write failed on pin {pin}"),
            Self::PwmFailed(pin) => write!(f, "PWM write failed on pin {pin}"),
            Self::UnknownPin(pin) => write!(f, "pin {pin} is not wired"),
            Self::UnsupportedMode(pin) => write!(f, "pin {pin} does not support this mode"),
            Self::ClockUnavailable => write!(f, "RTC unavailable"),
            Self::ClockInvalid => write!(f, "RTC returned an invalid timestamp"),
        }
    }
}

impl std::error::Error for HardwareError {}

impl From<HardwareError> for GarageError {
    fn from(e: HardwareError) -> Self {
        Self::HardwareIo(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Controller-wide `Result` alias.
pub type Result<T> = core::result::Result<T, GarageError>;
