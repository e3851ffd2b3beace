//! Parking fee policy.
//!
//! Fees are billed per started hour: the elapsed time between entry and exit
//! is converted to real hours and rounded **up** to the next whole hour, then
//! multiplied by the base rate. Exits on a weekend day carry a surcharge.
//!
//! Weekend classification uses the 1-indexed weekday number (Monday = 1 …
//! Sunday = 7): a day is a weekend day when its number is greater than
//! [`FeeSchedule::weekend_after_weekday`] (5 by default, so Saturday and
//! Sunday). The **exit** day decides, not the entry day.
//!
//! Zero or negative elapsed time (exit at or before entry, e.g. RTC skew)
//! bills zero hours and therefore a zero fee.

use chrono::{Datelike, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

const SECS_PER_HOUR: u64 = 3_600;

/// Tariff applied by [`GarageController::calculate_parking_fee`].
///
/// [`GarageController::calculate_parking_fee`]: crate::app::controller::GarageController::calculate_parking_fee
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Currency units per billed hour.
    pub base_fee: f64,
    /// Factor applied when the exit falls on a weekend day.
    pub weekend_multiplier: f64,
    /// Weekday numbers strictly above this one are weekend days.
    pub weekend_after_weekday: u8,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            base_fee: 2.5,
            weekend_multiplier: 1.25,
            weekend_after_weekday: 5,
        }
    }
}

/// Breakdown of a single fee calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeeQuote {
    pub entry: NaiveDateTime,
    pub exit: NaiveDateTime,
    pub billed_hours: u64,
    pub weekend: bool,
    pub amount: f64,
}

impl FeeSchedule {
    /// Whether `at` falls on a surcharged day.
    pub fn is_weekend(&self, at: NaiveDateTime) -> bool {
        weekday_number(at) > self.weekend_after_weekday
    }

    /// Multiplier for a session ending at `exit`.
    pub fn multiplier_at(&self, exit: NaiveDateTime) -> f64 {
        if self.is_weekend(exit) {
            self.weekend_multiplier
        } else {
            1.0
        }
    }

    /// Price a session from `entry` to `exit`.
    pub fn quote(&self, entry: NaiveDateTime, exit: NaiveDateTime) -> FeeQuote {
        let billed_hours = billed_hours(entry, exit);
        let weekend = self.is_weekend(exit);
        let multiplier = self.multiplier_at(exit);
        FeeQuote {
            entry,
            exit,
            billed_hours,
            weekend,
            amount: billed_hours as f64 * self.base_fee * multiplier,
        }
    }

    /// Amount owed for a session from `entry` to `exit`.
    pub fn fee(&self, entry: NaiveDateTime, exit: NaiveDateTime) -> f64 {
        self.quote(entry, exit).amount
    }
}

/// 1-indexed day of week: Monday = 1 … Saturday = 6, Sunday = 7.
pub fn weekday_number(at: NaiveDateTime) -> u8 {
    at.weekday().number_from_monday() as u8
}

/// Whole hours billed for a stay, partial hours rounded up.
///
/// Non-positive stays bill 0 hours.
pub fn billed_hours(entry: NaiveDateTime, exit: NaiveDateTime) -> u64 {
    let elapsed = exit - entry;
    if elapsed <= TimeDelta::zero() {
        return 0;
    }
    // Positive delta: whole seconds and the sub-second part are both >= 0.
    let secs = elapsed.num_seconds().unsigned_abs();
    let hours = secs.div_ceil(SECS_PER_HOUR);
    if secs % SECS_PER_HOUR == 0 && elapsed.subsec_nanos() > 0 {
        hours + 1
    } else {
        hours
    }
}
