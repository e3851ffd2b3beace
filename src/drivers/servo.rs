//! Gate servo driver (SG90-class hobby servo on a 50 Hz PWM line).
//!
//! Position is commanded as a duty-cycle percentage. Every move follows the
//! same pattern: assert the target duty, hold it for the settle time so the
//! horn reaches position, then release the line to 0 % so the servo stops
//! hunting (jitter, heating). The call blocks for the whole settle time.
//!
//! This is a dumb actuator: it knows nothing about door state. The
//! controller decides what a move means.

use embedded_hal::delay::DelayNs;
use log::debug;

use crate::app::ports::{ActuatorPort, PinMode};
use crate::config::ServoConfig;
use crate::error::HardwareError;
use crate::pins::PinId;

/// Duty that releases the servo line.
pub const RELEASE_DUTY_PERCENT: f32 = 0.0;

pub struct ServoGate {
    pin: PinId,
    calibration: ServoConfig,
    last_duty: Option<f32>,
}

impl ServoGate {
    pub fn new(pin: PinId, calibration: ServoConfig) -> Self {
        Self {
            pin,
            calibration,
            last_duty: None,
        }
    }

    /// Configure the PWM output at the calibrated frame rate.
    pub fn setup(&self, hw: &mut impl ActuatorPort) -> Result<(), HardwareError> {
        hw.setup_pin(
            self.pin,
            PinMode::Pwm {
                frequency_hz: self.calibration.pwm_frequency_hz,
            },
        )
    }

    /// Sweep to the 0° rest position.
    pub fn home(
        &mut self,
        hw: &mut impl ActuatorPort,
        delay: &mut impl DelayNs,
    ) -> Result<(), HardwareError> {
        self.move_to(hw, delay, self.calibration.home_duty_percent)
    }

    pub fn open(
        &mut self,
        hw: &mut impl ActuatorPort,
        delay: &mut impl DelayNs,
    ) -> Result<(), HardwareError> {
        self.move_to(hw, delay, self.calibration.open_duty_percent)
    }

    pub fn close(
        &mut self,
        hw: &mut impl ActuatorPort,
        delay: &mut impl DelayNs,
    ) -> Result<(), HardwareError> {
        self.move_to(hw, delay, self.calibration.closed_duty_percent)
    }

    /// Assert `duty_percent`, hold for the settle time, then release.
    pub fn move_to(
        &mut self,
        hw: &mut impl ActuatorPort,
        delay: &mut impl DelayNs,
        duty_percent: f32,
    ) -> Result<(), HardwareError> {
        debug!("servo: pin {} -> {:.1}%", self.pin, duty_percent);
        hw.pwm_set_duty_cycle(self.pin, duty_percent)?;
        self.last_duty = Some(duty_percent);
        delay.delay_ms(self.calibration.settle_ms);
        hw.pwm_set_duty_cycle(self.pin, RELEASE_DUTY_PERCENT)
    }

    pub fn pin(&self) -> PinId {
        self.pin
    }

    /// Most recent position duty (not counting the release), if any.
    pub fn last_commanded_duty(&self) -> Option<f32> {
        self.last_duty
    }
}
