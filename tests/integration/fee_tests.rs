//! Parking fee: hours rounded up, weekend surcharge, RTC as "now".

use chrono::NaiveDateTime;
use parking_garage::app::commands::GarageCommand;
use parking_garage::app::events::GarageEvent;
use parking_garage::error::HardwareError;
use parking_garage::{GarageController, GarageError};

use crate::mock_hw::{MockDelay, MockHardware, RecordingSink, at, make_garage};

fn garage_at(now: NaiveDateTime) -> GarageController<MockHardware, MockDelay> {
    let mut hw = MockHardware::new();
    hw.now = now;
    make_garage(hw)
}

#[test]
fn monday_afternoon_stay_costs_three_hours() {
    // Monday 12:30 -> 15:24 is 2 h 54 min.
    let mut garage = garage_at(at(2024, 11, 4, 15, 24));
    assert_eq!(garage.calculate_parking_fee(at(2024, 11, 4, 12, 30)), Ok(7.5));
}

#[test]
fn weekend_day_stay_costs_eight_surcharged_hours() {
    // 2024-11-03 10:15 -> 18:12 is 7 h 57 min on a weekend day.
    let mut garage = garage_at(at(2024, 11, 3, 18, 12));
    assert_eq!(garage.calculate_parking_fee(at(2024, 11, 3, 10, 15)), Ok(25.0));
}

#[test]
fn weekday_partial_hours_round_up() {
    // Monday 12:00 -> 14:30: 3 billed hours.
    let mut garage = garage_at(at(2024, 11, 4, 14, 30));
    assert_eq!(garage.calculate_parking_fee(at(2024, 11, 4, 12, 0)), Ok(7.5));
}

#[test]
fn weekend_exit_adds_surcharge() {
    // Exit on Sunday 2024-11-03 after 8 h: 8 * 2.5 * 1.25.
    let mut garage = garage_at(at(2024, 11, 3, 20, 0));
    assert_eq!(garage.calculate_parking_fee(at(2024, 11, 3, 12, 0)), Ok(25.0));
}

#[test]
fn saturday_is_weekend_friday_is_not() {
    let mut saturday = garage_at(at(2024, 11, 2, 13, 0));
    assert_eq!(saturday.calculate_parking_fee(at(2024, 11, 2, 12, 0)), Ok(3.125));

    let mut friday = garage_at(at(2024, 11, 1, 13, 0));
    assert_eq!(friday.calculate_parking_fee(at(2024, 11, 1, 12, 0)), Ok(2.5));
}

#[test]
fn surcharge_follows_exit_day_not_entry_day() {
    // Enter Friday evening, leave Saturday morning.
    let mut garage = garage_at(at(2024, 11, 2, 1, 0));
    let quote = garage.quote_parking_fee(at(2024, 11, 1, 22, 0)).unwrap();
    assert_eq!(quote.billed_hours, 3);
    assert!(quote.weekend);
    assert_eq!(quote.amount, 9.375);
}

#[test]
fn exact_hours_are_not_rounded_up() {
    let mut garage = garage_at(at(2024, 11, 4, 14, 0));
    assert_eq!(garage.calculate_parking_fee(at(2024, 11, 4, 12, 0)), Ok(5.0));
}

#[test]
fn a_single_minute_costs_one_hour() {
    let mut garage = garage_at(at(2024, 11, 4, 12, 1));
    assert_eq!(garage.calculate_parking_fee(at(2024, 11, 4, 12, 0)), Ok(2.5));
}

#[test]
fn entry_at_or_after_now_is_free() {
    let mut garage = garage_at(at(2024, 11, 4, 12, 0));
    assert_eq!(garage.calculate_parking_fee(at(2024, 11, 4, 12, 0)), Ok(0.0));
    assert_eq!(garage.calculate_parking_fee(at(2024, 11, 4, 18, 0)), Ok(0.0));
}

#[test]
fn clock_failure_is_hardware_error() {
    let mut garage = garage_at(at(2024, 11, 4, 12, 0));
    garage.hardware_mut().fail_clock = true;
    assert_eq!(
        garage.calculate_parking_fee(at(2024, 11, 4, 10, 0)),
        Err(GarageError::HardwareIo(HardwareError::ClockUnavailable))
    );
}

#[test]
fn quote_command_emits_breakdown() {
    let mut garage = garage_at(at(2024, 11, 4, 15, 24));
    let mut sink = RecordingSink::default();
    garage
        .handle_command(
            GarageCommand::QuoteFee {
                entry: at(2024, 11, 4, 12, 0),
            },
            &mut sink,
        )
        .unwrap();

    let [GarageEvent::FeeQuoted(quote)] = sink.events.as_slice() else {
        panic!("expected one fee event, got {:?}", sink.events);
    };
    assert_eq!(quote.billed_hours, 4);
    assert!(!quote.weekend);
    assert_eq!(quote.amount, 10.0);
    assert_eq!(quote.exit, at(2024, 11, 4, 15, 24));
}
