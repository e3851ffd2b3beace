//! Port traits: the boundary between the garage controller and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ GarageController (domain)
//! ```
//!
//! Driven adapters (GPIO banks, the RTC, event sinks, config storage)
//! implement these traits. The [`GarageController`](super::controller::GarageController)
//! consumes them via generics, so the domain core never touches hardware
//! directly and test doubles substitute without patching global state.
//!
//! All hardware ports are fallible: adapters report faults as
//! [`HardwareError`] and the controller propagates them unrecovered.

use chrono::NaiveDateTime;

use crate::config::GarageConfig;
use crate::error::{GarageError, HardwareError};
use crate::pins::PinId;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to sample digital inputs.
pub trait SensorPort {
    /// Sample a digital input. `true` = logic HIGH.
    fn digital_read(&mut self, pin: PinId) -> Result<bool, HardwareError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Direction / function a pin is configured for at start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    Input,
    Output,
    Pwm { frequency_hz: u32 },
}

/// Write-side port: the domain calls this to command outputs.
pub trait ActuatorPort {
    /// Configure a pin's direction before first use.
    fn setup_pin(&mut self, pin: PinId, mode: PinMode) -> Result<(), HardwareError>;

    /// Drive a digital output HIGH (`true`) or LOW.
    fn digital_write(&mut self, pin: PinId, level: bool) -> Result<(), HardwareError>;

    /// Set a PWM output's duty cycle, in percent (0–100). 0 releases the line.
    fn pwm_set_duty_cycle(&mut self, pin: PinId, percent: f32) -> Result<(), HardwareError>;
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: RTC → domain)
// ───────────────────────────────────────────────────────────────

/// The authoritative time source for billing.
///
/// Weekday classification is derived from the returned date with
/// [`crate::fee::weekday_number`] (Monday = 1 … Sunday = 7).
pub trait ClockPort {
    fn clock_read(&mut self) -> Result<NaiveDateTime, HardwareError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`GarageEvent`](super::events::GarageEvent)s
/// through this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::GarageEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists controller configuration.
///
/// Implementations MUST validate before persisting. Invalid ranges are
/// rejected with [`ConfigError::ValidationFailed`], not silently clamped.
pub trait ConfigPort {
    /// Load configuration. Returns [`GarageConfig::default()`] if nothing is stored.
    fn load(&self) -> Result<GarageConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &GarageConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Stored config failed deserialization.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<GarageError> for ConfigError {
    fn from(e: GarageError) -> Self {
        match e {
            GarageError::Config(msg) => Self::ValidationFailed(msg),
            GarageError::InvalidSensor(_) | GarageError::HardwareIo(_) => Self::IoError,
        }
    }
}

impl From<ConfigError> for GarageError {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::ValidationFailed(msg) => Self::Config(msg),
            ConfigError::Corrupted => Self::Config("config corrupted"),
            ConfigError::IoError => Self::Config("config storage I/O error"),
        }
    }
}
