//! Controller configuration.
//!
//! Every tunable parameter for the garage controller: pin wiring, servo
//! calibration, tariff and control-loop timing. Defaults reproduce the
//! reference board; deployments override them from a JSON file (host) or a
//! postcard blob (flash).

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;
use crate::error::{GarageError, Result};
use crate::fee::FeeSchedule;
use crate::pins::{self, PinId, SPOT_COUNT};

/// Logical role → physical pin mapping. Fixed for the controller's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinAssignment {
    /// Occupancy sensors, one per spot, in counting order.
    pub occupancy: [PinId; SPOT_COUNT],
    /// PWM output for the gate servo.
    pub servo: PinId,
    /// Digital output for the red indicator light.
    pub light: PinId,
}

impl Default for PinAssignment {
    fn default() -> Self {
        Self {
            occupancy: [
                pins::INFRARED_PIN_1,
                pins::INFRARED_PIN_2,
                pins::INFRARED_PIN_3,
            ],
            servo: pins::SERVO_PIN,
            light: pins::LED_PIN,
        }
    }
}

impl PinAssignment {
    /// True if `pin` is one of the registered occupancy sensors.
    pub fn is_occupancy_sensor(&self, pin: PinId) -> bool {
        self.occupancy.contains(&pin)
    }

    /// Every wired pin: sensors first, then servo, then light.
    pub fn all(&self) -> [PinId; SPOT_COUNT + 2] {
        let [a, b, c] = self.occupancy;
        [a, b, c, self.servo, self.light]
    }

    fn has_duplicates(&self) -> bool {
        let all = self.all();
        all.iter()
            .enumerate()
            .any(|(i, pin)| all[i + 1..].contains(pin))
    }
}

/// Servo calibration, expressed as PWM duty-cycle percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ServoConfig {
    /// PWM frame rate.
    pub pwm_frequency_hz: u32,
    /// Duty that sweeps the gate to its 0° rest position at start-up.
    pub home_duty_percent: f32,
    /// Duty for the open position.
    pub open_duty_percent: f32,
    /// Duty for the closed position.
    pub closed_duty_percent: f32,
    /// How long a position command is held before the signal is released.
    pub settle_ms: u32,
}

impl Default for ServoConfig {
    fn default() -> Self {
        Self {
            pwm_frequency_hz: pins::SERVO_PWM_FREQ_HZ,
            home_duty_percent: 2.0,
            open_duty_percent: 12.0,
            closed_duty_percent: 0.0,
            settle_ms: 1000,
        }
    }
}

/// Top-level controller configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GarageConfig {
    pub pins: PinAssignment,
    pub servo: ServoConfig,
    pub fees: FeeSchedule,
    /// Control loop period used by the `run` command.
    pub poll_interval_ms: u32,
}

impl Default for GarageConfig {
    fn default() -> Self {
        Self {
            pins: PinAssignment::default(),
            servo: ServoConfig::default(),
            fees: FeeSchedule::default(),
            poll_interval_ms: 500,
        }
    }
}

fn duty_in_range(duty: f32) -> bool {
    (0.0..=100.0).contains(&duty)
}

impl GarageConfig {
    /// Range-check every field. Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<()> {
        if self.pins.has_duplicates() {
            return Err(GarageError::Config("pin assigned to more than one role"));
        }
        if self.servo.pwm_frequency_hz == 0 {
            return Err(GarageError::Config("servo PWM frequency must be non-zero"));
        }
        let s = &self.servo;
        if ![s.home_duty_percent, s.open_duty_percent, s.closed_duty_percent]
            .into_iter()
            .all(duty_in_range)
        {
            return Err(GarageError::Config("servo duty cycle outside 0..=100"));
        }
        if self.fees.base_fee.is_nan() || self.fees.base_fee <= 0.0 {
            return Err(GarageError::Config("base fee must be positive"));
        }
        if self.fees.weekend_multiplier.is_nan() || self.fees.weekend_multiplier < 1.0 {
            return Err(GarageError::Config("weekend multiplier must be at least 1.0"));
        }
        if !(1..=7).contains(&self.fees.weekend_after_weekday) {
            return Err(GarageError::Config("weekend threshold must be a weekday 1..=7"));
        }
        if self.poll_interval_ms == 0 {
            return Err(GarageError::Config("poll interval must be non-zero"));
        }
        Ok(())
    }

    /// Encode as a compact postcard blob for flash storage.
    pub fn to_blob(&self) -> core::result::Result<Vec<u8>, ConfigError> {
        postcard::to_allocvec(self).map_err(|_| ConfigError::Corrupted)
    }

    /// Decode and validate a blob written by [`to_blob`](Self::to_blob).
    pub fn from_blob(bytes: &[u8]) -> core::result::Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Corrupted)?;
        config.validate().map_err(ConfigError::from)?;
        Ok(config)
    }
}
