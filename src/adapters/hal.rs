//! embedded-hal adapter. Bridges real peripherals to the domain port traits.
//!
//! Owns the three occupancy inputs, the light output, the servo PWM channel
//! and a clock, each tagged with the [`PinId`] the controller knows it by.
//! Any board whose HAL implements the `embedded-hal` 1.0 traits plugs in
//! here; this is the only module that touches pin types directly.
//!
//! `embedded-hal` pins carry their direction in the type, so
//! [`setup_pin`](ActuatorPort::setup_pin) only checks that the requested
//! mode matches the role the pin was wired for.

use chrono::NaiveDateTime;
use embedded_hal::digital::{Error as _, InputPin, OutputPin, PinState};
use embedded_hal::pwm::{Error as _, SetDutyCycle};
use log::{debug, warn};

use crate::app::ports::{ActuatorPort, ClockPort, PinMode, SensorPort};
use crate::config::PinAssignment;
use crate::error::HardwareError;
use crate::pins::{PinId, SPOT_COUNT};

/// Concrete adapter that puts embedded-hal peripherals behind the ports.
pub struct HalAdapter<I, O, P, C> {
    sensors: [(PinId, I); SPOT_COUNT],
    light: (PinId, O),
    servo: (PinId, P),
    clock: C,
}

impl<I, O, P, C> HalAdapter<I, O, P, C>
where
    I: InputPin,
    O: OutputPin,
    P: SetDutyCycle,
    C: ClockPort,
{
    /// `sensors` must be given in the same order as `pins.occupancy`.
    pub fn new(pins: &PinAssignment, sensors: [I; SPOT_COUNT], light: O, servo: P, clock: C) -> Self {
        let [a, b, c] = sensors;
        let [pa, pb, pc] = pins.occupancy;
        Self {
            sensors: [(pa, a), (pb, b), (pc, c)],
            light: (pins.light, light),
            servo: (pins.servo, servo),
            clock,
        }
    }

    /// Hand the peripherals back (e.g. to reuse the I²C bus behind the clock).
    pub fn release(self) -> ([I; SPOT_COUNT], O, P, C) {
        (
            self.sensors.map(|(_, input)| input),
            self.light.1,
            self.servo.1,
            self.clock,
        )
    }

    fn is_known(&self, pin: PinId) -> bool {
        pin == self.light.0 || pin == self.servo.0 || self.sensors.iter().any(|(id, _)| *id == pin)
    }

    fn misuse(&self, pin: PinId) -> HardwareError {
        if self.is_known(pin) {
            HardwareError::UnsupportedMode(pin)
        } else {
            HardwareError::UnknownPin(pin)
        }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<I, O, P, C> SensorPort for HalAdapter<I, O, P, C>
where
    I: InputPin,
    O: OutputPin,
    P: SetDutyCycle,
    C: ClockPort,
{
    fn digital_read(&mut self, pin: PinId) -> Result<bool, HardwareError> {
        let Some(idx) = self.sensors.iter().position(|(id, _)| *id == pin) else {
            return Err(self.misuse(pin));
        };
        self.sensors[idx].1.is_high().map_err(|e| {
            warn!("GPIO read on pin {} failed: {:?}", pin, e.kind());
            HardwareError::ReadFailed(pin)
        })
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<I, O, P, C> ActuatorPort for HalAdapter<I, O, P, C>
where
    I: InputPin,
    O: OutputPin,
    P: SetDutyCycle,
    C: ClockPort,
{
    fn setup_pin(&mut self, pin: PinId, mode: PinMode) -> Result<(), HardwareError> {
        let ok = match mode {
            PinMode::Input => self.sensors.iter().any(|(id, _)| *id == pin),
            PinMode::Output => pin == self.light.0,
            PinMode::Pwm { frequency_hz } => {
                // Frame rate is fixed when the HAL channel is built.
                debug!("servo pin {} expects {} Hz", pin, frequency_hz);
                pin == self.servo.0
            }
        };
        if ok { Ok(()) } else { Err(self.misuse(pin)) }
    }

    fn digital_write(&mut self, pin: PinId, level: bool) -> Result<(), HardwareError> {
        if pin != self.light.0 {
            return Err(self.misuse(pin));
        }
        self.light.1.set_state(PinState::from(level)).map_err(|e| {
            warn!("GPIO write on pin {} failed: {:?}", pin, e.kind());
            HardwareError::WriteFailed(pin)
        })
    }

    fn pwm_set_duty_cycle(&mut self, pin: PinId, percent: f32) -> Result<(), HardwareError> {
        if pin != self.servo.0 {
            return Err(self.misuse(pin));
        }
        if !(0.0..=100.0).contains(&percent) {
            return Err(HardwareError::PwmFailed(pin));
        }
        let channel = &mut self.servo.1;
        let duty = (percent / 100.0 * f32::from(channel.max_duty_cycle())).round() as u16;
        channel.set_duty_cycle(duty).map_err(|e| {
            warn!("PWM write on pin {} failed: {:?}", pin, e.kind());
            HardwareError::PwmFailed(pin)
        })
    }
}

// ── ClockPort implementation ──────────────────────────────────

impl<I, O, P, C> ClockPort for HalAdapter<I, O, P, C>
where
    C: ClockPort,
{
    fn clock_read(&mut self) -> Result<NaiveDateTime, HardwareError> {
        self.clock.clock_read()
    }
}
