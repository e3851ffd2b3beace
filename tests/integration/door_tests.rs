//! Gate actuation: duty sequence, settle hold, state tracking.

use parking_garage::app::commands::GarageCommand;
use parking_garage::app::events::{DoorState, GarageEvent};
use parking_garage::app::ports::PinMode;
use parking_garage::config::GarageConfig;
use parking_garage::pins::{LED_PIN, SERVO_PIN};
use parking_garage::{GarageController, GarageError};

use crate::mock_hw::{HwCall, MockDelay, MockHardware, RecordingSink, make_garage};

const ONE_SECOND_NS: u64 = 1_000_000_000;

#[test]
fn startup_configures_pins_and_homes_gate() {
    let garage =
        GarageController::new(GarageConfig::default(), MockHardware::new(), MockDelay::default())
            .unwrap();
    let calls = &garage.hardware().calls;

    assert!(calls.contains(&HwCall::Setup {
        pin: SERVO_PIN,
        mode: PinMode::Pwm { frequency_hz: 50 },
    }));
    assert!(calls.contains(&HwCall::Setup {
        pin: LED_PIN,
        mode: PinMode::Output,
    }));
    assert_eq!(garage.hardware().duties(), vec![2.0, 0.0]);
    assert_eq!(garage.hardware().last_write(LED_PIN), Some(false));
    assert_eq!(garage.door_state(), DoorState::Closed);
}

#[test]
fn open_drives_twelve_percent_then_releases() {
    let mut garage = make_garage(MockHardware::new());
    garage.open_garage_door().unwrap();

    assert_eq!(
        garage.hardware().calls,
        vec![
            HwCall::Duty {
                pin: SERVO_PIN,
                percent: 12.0
            },
            HwCall::Duty {
                pin: SERVO_PIN,
                percent: 0.0
            },
        ]
    );
    assert!(garage.is_door_open());
}

#[test]
fn close_drives_zero_percent() {
    let mut garage = make_garage(MockHardware::new());
    garage.open_garage_door().unwrap();
    garage.hardware_mut().calls.clear();

    garage.close_garage_door().unwrap();
    assert_eq!(garage.hardware().duties(), vec![0.0, 0.0]);
    assert!(!garage.is_door_open());
}

#[test]
fn each_move_holds_for_one_second() {
    let mut garage = make_garage(MockHardware::new());
    garage.open_garage_door().unwrap();
    garage.close_garage_door().unwrap();
    let (_, delay) = garage.into_parts();
    // Start-up home + open + close.
    assert_eq!(delay.total_ns, 3 * ONE_SECOND_NS);
}

#[test]
fn repeated_open_is_idempotent() {
    let mut garage = make_garage(MockHardware::new());
    garage.open_garage_door().unwrap();
    garage.open_garage_door().unwrap();
    assert!(garage.is_door_open());
    assert_eq!(garage.hardware().duties(), vec![12.0, 0.0, 12.0, 0.0]);
}

#[test]
fn pwm_failure_leaves_state_unchanged() {
    let mut garage = make_garage(MockHardware::new());
    garage.hardware_mut().fail_pwm = true;

    assert!(matches!(
        garage.open_garage_door(),
        Err(GarageError::HardwareIo(_))
    ));
    assert!(!garage.is_door_open());

    garage.hardware_mut().fail_pwm = false;
    garage.open_garage_door().unwrap();
    garage.hardware_mut().fail_pwm = true;
    assert!(garage.close_garage_door().is_err());
    assert!(garage.is_door_open());
}

#[test]
fn door_commands_report_transitions() {
    let mut garage = make_garage(MockHardware::new());
    let mut sink = RecordingSink::default();

    garage.handle_command(GarageCommand::OpenDoor, &mut sink).unwrap();
    garage.handle_command(GarageCommand::OpenDoor, &mut sink).unwrap();
    garage.handle_command(GarageCommand::CloseDoor, &mut sink).unwrap();

    assert_eq!(
        sink.events,
        vec![
            GarageEvent::DoorChanged {
                from: DoorState::Closed,
                to: DoorState::Open
            },
            GarageEvent::DoorChanged {
                from: DoorState::Open,
                to: DoorState::Open
            },
            GarageEvent::DoorChanged {
                from: DoorState::Open,
                to: DoorState::Closed
            },
        ]
    );
}

#[test]
fn failed_door_command_emits_nothing() {
    let mut garage = make_garage(MockHardware::new());
    garage.hardware_mut().fail_pwm = true;
    let mut sink = RecordingSink::default();
    assert!(garage.handle_command(GarageCommand::OpenDoor, &mut sink).is_err());
    assert!(sink.events.is_empty());
}

#[test]
fn custom_calibration_is_honoured() {
    let mut config = GarageConfig::default();
    config.servo.open_duty_percent = 10.5;
    config.servo.settle_ms = 500;
    let mut garage = GarageController::new(config, MockHardware::new(), MockDelay::default()).unwrap();
    garage.hardware_mut().calls.clear();

    garage.open_garage_door().unwrap();
    assert_eq!(garage.hardware().duties(), vec![10.5, 0.0]);
    let (_, delay) = garage.into_parts();
    assert_eq!(delay.total_ns, 2 * 500_000_000);
}
