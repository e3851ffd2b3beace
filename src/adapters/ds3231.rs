//! DS3231 real-time clock over I²C.
//!
//! The reference board keeps billing time on a battery-backed DS3231 at
//! address 0x68. Time lives in seven BCD registers starting at 0x00:
//!
//! | Reg  | Content                                        |
//! |------|------------------------------------------------|
//! | 0x00 | seconds                                        |
//! | 0x01 | minutes                                        |
//! | 0x02 | hours (bit 6 = 12 h mode, bit 5 = PM in 12 h)  |
//! | 0x03 | day of week 1–7 (user defined, not trusted)    |
//! | 0x04 | date                                           |
//! | 0x05 | month (bit 7 = century)                        |
//! | 0x06 | year within century                            |
//!
//! The weekday register is written on [`set_datetime`](Ds3231Clock::set_datetime)
//! but ignored on read: the fee policy derives the weekday from the date.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use embedded_hal::i2c::I2c;
use log::warn;

use crate::app::ports::ClockPort;
use crate::error::HardwareError;
use crate::pins::RTC_I2C_ADDRESS;

const REG_SECONDS: u8 = 0x00;
const HOUR_12H_MODE: u8 = 0x40;
const HOUR_PM: u8 = 0x20;
const MONTH_CENTURY: u8 = 0x80;

pub struct Ds3231Clock<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Ds3231Clock<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, RTC_I2C_ADDRESS)
    }

    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Give the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    pub fn read_datetime(&mut self) -> Result<NaiveDateTime, HardwareError> {
        let mut regs = [0u8; 7];
        self.i2c
            .write_read(self.address, &[REG_SECONDS], &mut regs)
            .map_err(|e| {
                warn!("DS3231 read failed: {:?}", embedded_hal::i2c::Error::kind(&e));
                HardwareError::ClockUnavailable
            })?;
        decode(&regs)
    }

    /// Program the clock. Years outside 2000–2199 cannot be represented.
    pub fn set_datetime(&mut self, at: NaiveDateTime) -> Result<(), HardwareError> {
        let regs = encode(at)?;
        let mut frame = [0u8; 8];
        frame[0] = REG_SECONDS;
        frame[1..].copy_from_slice(&regs);
        self.i2c.write(self.address, &frame).map_err(|e| {
            warn!("DS3231 write failed: {:?}", embedded_hal::i2c::Error::kind(&e));
            HardwareError::ClockUnavailable
        })
    }
}

impl<I2C: I2c> ClockPort for Ds3231Clock<I2C> {
    fn clock_read(&mut self) -> Result<NaiveDateTime, HardwareError> {
        self.read_datetime()
    }
}

fn bcd_to_bin(bcd: u8) -> u8 {
    (bcd >> 4) * 10 + (bcd & 0x0f)
}

fn bin_to_bcd(bin: u8) -> u8 {
    ((bin / 10) << 4) | (bin % 10)
}

fn decode(regs: &[u8; 7]) -> Result<NaiveDateTime, HardwareError> {
    let second = bcd_to_bin(regs[0] & 0x7f);
    let minute = bcd_to_bin(regs[1] & 0x7f);
    let hour = if regs[2] & HOUR_12H_MODE != 0 {
        let h12 = bcd_to_bin(regs[2] & 0x1f) % 12;
        if regs[2] & HOUR_PM != 0 { h12 + 12 } else { h12 }
    } else {
        bcd_to_bin(regs[2] & 0x3f)
    };
    let day = bcd_to_bin(regs[4] & 0x3f);
    let month = bcd_to_bin(regs[5] & 0x1f);
    let century = if regs[5] & MONTH_CENTURY != 0 { 2100 } else { 2000 };
    let year = century + i32::from(bcd_to_bin(regs[6]));

    NaiveDate::from_ymd_opt(year, u32::from(month), u32::from(day))
        .and_then(|d| d.and_hms_opt(u32::from(hour), u32::from(minute), u32::from(second)))
        .ok_or(HardwareError::ClockInvalid)
}

fn encode(at: NaiveDateTime) -> Result<[u8; 7], HardwareError> {
    let year = at.year();
    if !(2000..2200).contains(&year) {
        return Err(HardwareError::ClockInvalid);
    }
    let century = if year >= 2100 { MONTH_CENTURY } else { 0 };
    Ok([
        bin_to_bcd(at.second() as u8),
        bin_to_bcd(at.minute() as u8),
        bin_to_bcd(at.hour() as u8),
        at.weekday().number_from_monday() as u8,
        bin_to_bcd(at.day() as u8),
        bin_to_bcd(at.month() as u8) | century,
        bin_to_bcd((year % 100) as u8),
    ])
}
