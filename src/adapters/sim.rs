//! In-memory hardware for host runs.
//!
//! [`SimHardware`] is a small pin bank that implements every hardware port.
//! Inputs are set from the outside (a test, or the CLI simulating cars),
//! outputs just latch what the controller wrote. The clock either follows
//! the host wall clock or is pinned to a fixed instant.

use chrono::NaiveDateTime;
use heapless::FnvIndexMap;
use log::debug;

use crate::app::ports::{ActuatorPort, ClockPort, PinMode, SensorPort};
use crate::error::HardwareError;
use crate::pins::PinId;

/// Pins the bank can hold. Must be a power of two.
const MAX_PINS: usize = 8;

/// Latched state of one simulated pin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimPin {
    pub mode: PinMode,
    pub level: bool,
    pub duty_percent: f32,
}

pub struct SimHardware {
    pins: FnvIndexMap<PinId, SimPin, MAX_PINS>,
    fixed_now: Option<NaiveDateTime>,
    pwm_writes: u32,
}

impl Default for SimHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SimHardware {
    pub fn new() -> Self {
        Self {
            pins: FnvIndexMap::new(),
            fixed_now: None,
            pwm_writes: 0,
        }
    }

    /// Pin the clock to `now` instead of following the host.
    pub fn set_now(&mut self, now: NaiveDateTime) {
        self.fixed_now = Some(now);
    }

    /// Drive a simulated input. The pin is created as an input if unknown.
    pub fn set_input(&mut self, pin: PinId, level: bool) -> Result<(), HardwareError> {
        if let Some(p) = self.pins.get_mut(&pin) {
            p.level = level;
            return Ok(());
        }
        self.insert(
            pin,
            SimPin {
                mode: PinMode::Input,
                level,
                duty_percent: 0.0,
            },
        )
    }

    pub fn pin(&self, pin: PinId) -> Option<SimPin> {
        self.pins.get(&pin).copied()
    }

    /// Current level of a digital pin (false if unknown).
    pub fn level(&self, pin: PinId) -> bool {
        self.pin(pin).is_some_and(|p| p.level)
    }

    /// Current duty of a PWM pin (0 if unknown).
    pub fn duty(&self, pin: PinId) -> f32 {
        self.pin(pin).map_or(0.0, |p| p.duty_percent)
    }

    /// Number of PWM commands issued so far.
    pub fn pwm_writes(&self) -> u32 {
        self.pwm_writes
    }

    fn insert(&mut self, pin: PinId, state: SimPin) -> Result<(), HardwareError> {
        self.pins
            .insert(pin, state)
            .map(|_| ())
            .map_err(|_| HardwareError::UnknownPin(pin))
    }

    fn output(&mut self, pin: PinId, expect_pwm: bool) -> Result<&mut SimPin, HardwareError> {
        let p = self
            .pins
            .get_mut(&pin)
            .ok_or(HardwareError::UnknownPin(pin))?;
        let matches = match p.mode {
            PinMode::Output => !expect_pwm,
            PinMode::Pwm { .. } => expect_pwm,
            PinMode::Input => false,
        };
        if matches {
            Ok(p)
        } else {
            Err(HardwareError::UnsupportedMode(pin))
        }
    }
}

impl SensorPort for SimHardware {
    fn digital_read(&mut self, pin: PinId) -> Result<bool, HardwareError> {
        match self.pins.get(&pin) {
            Some(p) if p.mode == PinMode::Input => Ok(p.level),
            Some(_) => Err(HardwareError::UnsupportedMode(pin)),
            None => Err(HardwareError::UnknownPin(pin)),
        }
    }
}

impl ActuatorPort for SimHardware {
    fn setup_pin(&mut self, pin: PinId, mode: PinMode) -> Result<(), HardwareError> {
        debug!("sim: pin {} as {:?}", pin, mode);
        if let Some(p) = self.pins.get_mut(&pin) {
            p.mode = mode;
            return Ok(());
        }
        self.insert(
            pin,
            SimPin {
                mode,
                level: false,
                duty_percent: 0.0,
            },
        )
    }

    fn digital_write(&mut self, pin: PinId, level: bool) -> Result<(), HardwareError> {
        self.output(pin, false)?.level = level;
        Ok(())
    }

    fn pwm_set_duty_cycle(&mut self, pin: PinId, percent: f32) -> Result<(), HardwareError> {
        if !(0.0..=100.0).contains(&percent) {
            return Err(HardwareError::PwmFailed(pin));
        }
        self.output(pin, true)?.duty_percent = percent;
        self.pwm_writes += 1;
        Ok(())
    }
}

impl ClockPort for SimHardware {
    fn clock_read(&mut self) -> Result<NaiveDateTime, HardwareError> {
        Ok(self
            .fixed_now
            .unwrap_or_else(|| chrono::Local::now().naive_local()))
    }
}
