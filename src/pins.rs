//! Pin assignments for the reference garage board (Raspberry Pi header,
//! physical BOARD numbering).
//!
//! These are the defaults behind [`PinAssignment::default`]; a deployment
//! on different wiring overrides them through the configuration file rather
//! than editing this module.
//!
//! [`PinAssignment::default`]: crate::config::PinAssignment

/// Logical pin identifier as understood by the hardware ports.
pub type PinId = u8;

// ---------------------------------------------------------------------------
// Occupancy sensors (infrared break-beam, active HIGH when a car is present)
// ---------------------------------------------------------------------------

pub const INFRARED_PIN_1: PinId = 11;
pub const INFRARED_PIN_2: PinId = 12;
pub const INFRARED_PIN_3: PinId = 13;

/// Number of parking spots watched by the controller (one sensor each).
pub const SPOT_COUNT: usize = 3;

// ---------------------------------------------------------------------------
// Gate servo (SG90-class hobby servo)
// ---------------------------------------------------------------------------

/// PWM output driving the gate servo.
pub const SERVO_PIN: PinId = 16;
/// Servo frame rate: 50 Hz (20 ms period).
pub const SERVO_PWM_FREQ_HZ: u32 = 50;

// ---------------------------------------------------------------------------
// Indicator light
// ---------------------------------------------------------------------------

/// Digital output: red "garage full" lamp (active HIGH).
pub const LED_PIN: PinId = 18;

// ---------------------------------------------------------------------------
// Real-time clock (DS3231 on I²C bus 1)
// ---------------------------------------------------------------------------

/// 7-bit bus address of the DS3231.
pub const RTC_I2C_ADDRESS: u8 = 0x68;
