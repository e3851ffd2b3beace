//! Red "garage full" light: manual control, auto management, poll cycle.

use parking_garage::GarageError;
use parking_garage::app::commands::GarageCommand;
use parking_garage::app::events::GarageEvent;
use parking_garage::pins::{INFRARED_PIN_1, INFRARED_PIN_2, INFRARED_PIN_3, LED_PIN};

use crate::mock_hw::{MockHardware, RecordingSink, make_garage};

fn levels(a: bool, b: bool, c: bool) -> MockHardware {
    MockHardware::with_inputs([(INFRARED_PIN_1, a), (INFRARED_PIN_2, b), (INFRARED_PIN_3, c)])
}

#[test]
fn manual_on_and_off() {
    let mut garage = make_garage(MockHardware::new());
    garage.turn_on_red_light().unwrap();
    assert!(garage.is_red_light_on());
    garage.turn_off_red_light().unwrap();
    assert!(!garage.is_red_light_on());
    assert_eq!(garage.hardware().writes(LED_PIN), vec![true, false]);
}

#[test]
fn repeated_on_is_idempotent() {
    let mut garage = make_garage(MockHardware::new());
    garage.turn_on_red_light().unwrap();
    garage.turn_on_red_light().unwrap();
    assert!(garage.is_red_light_on());
    assert_eq!(garage.hardware().writes(LED_PIN), vec![true, true]);
}

#[test]
fn write_failure_keeps_previous_state() {
    let mut garage = make_garage(MockHardware::new());
    garage.turn_on_red_light().unwrap();
    garage.hardware_mut().fail_writes = true;
    assert!(matches!(
        garage.turn_off_red_light(),
        Err(GarageError::HardwareIo(_))
    ));
    assert!(garage.is_red_light_on());
}

#[test]
fn manage_lights_only_when_full() {
    let mut full = make_garage(levels(true, true, true));
    assert_eq!(full.manage_red_light(), Ok(true));
    assert_eq!(full.hardware().last_write(LED_PIN), Some(true));

    for (a, b, c) in [(true, true, false), (false, false, false), (true, false, true)] {
        let mut garage = make_garage(levels(a, b, c));
        garage.turn_on_red_light().unwrap();
        assert_eq!(garage.manage_red_light(), Ok(false));
        assert!(!garage.is_red_light_on());
        assert_eq!(garage.hardware().last_write(LED_PIN), Some(false));
    }
}

#[test]
fn manage_follows_changing_occupancy() {
    let mut garage = make_garage(levels(true, true, false));
    assert_eq!(garage.manage_red_light(), Ok(false));

    garage.hardware_mut().inputs.insert(INFRARED_PIN_3, true);
    assert_eq!(garage.manage_red_light(), Ok(true));

    garage.hardware_mut().inputs.insert(INFRARED_PIN_1, false);
    assert_eq!(garage.manage_red_light(), Ok(false));
}

#[test]
fn manage_with_failed_read_does_not_touch_light() {
    let mut garage = make_garage(levels(true, true, true));
    garage.hardware_mut().fail_reads = true;
    assert!(garage.manage_red_light().is_err());
    assert!(garage.hardware().writes(LED_PIN).is_empty());
}

#[test]
fn poll_reports_light_changes_only_on_edges() {
    let mut garage = make_garage(levels(true, true, true));
    let mut sink = RecordingSink::default();

    let first = garage.poll(&mut sink).unwrap();
    assert!(first.is_full());
    assert!(first.red_light_on);
    assert_eq!(sink.events.len(), 2);
    assert_eq!(sink.events[0], GarageEvent::RedLightChanged { on: true });

    sink.events.clear();
    garage.poll(&mut sink).unwrap();
    assert_eq!(sink.events.len(), 1);
    assert!(matches!(sink.events[0], GarageEvent::Occupancy(_)));

    sink.events.clear();
    garage.hardware_mut().inputs.insert(INFRARED_PIN_2, false);
    let third = garage.poll(&mut sink).unwrap();
    assert_eq!(third.occupied, 2);
    assert_eq!(sink.events[0], GarageEvent::RedLightChanged { on: false });
}

#[test]
fn light_commands_emit_events() {
    let mut garage = make_garage(levels(true, true, true));
    let mut sink = RecordingSink::default();
    garage.handle_command(GarageCommand::RedLightOff, &mut sink).unwrap();
    garage.handle_command(GarageCommand::ManageRedLight, &mut sink).unwrap();
    garage.handle_command(GarageCommand::RedLightOff, &mut sink).unwrap();
    garage.handle_command(GarageCommand::RedLightOn, &mut sink).unwrap();
    // The first "off" finds the light already off and reports nothing.
    assert_eq!(
        sink.events,
        vec![
            GarageEvent::RedLightChanged { on: true },
            GarageEvent::RedLightChanged { on: false },
            GarageEvent::RedLightChanged { on: true },
        ]
    );
}

#[test]
fn repeated_manage_reports_only_the_edge() {
    let mut garage = make_garage(levels(true, true, true));
    let mut sink = RecordingSink::default();
    for _ in 0..3 {
        garage
            .handle_command(GarageCommand::ManageRedLight, &mut sink)
            .unwrap();
    }
    assert_eq!(sink.events, vec![GarageEvent::RedLightChanged { on: true }]);
    // The lamp is still rewritten every time.
    assert_eq!(garage.hardware().writes(LED_PIN), vec![true, true, true]);

    garage.hardware_mut().inputs.insert(INFRARED_PIN_1, false);
    garage
        .handle_command(GarageCommand::ManageRedLight, &mut sink)
        .unwrap();
    assert_eq!(
        sink.events.last(),
        Some(&GarageEvent::RedLightChanged { on: false })
    );
}

#[test]
fn start_announces_closed_door() {
    let mut garage = make_garage(MockHardware::new());
    let mut sink = RecordingSink::default();
    garage.start(&mut sink);
    assert_eq!(
        sink.events,
        vec![GarageEvent::Started {
            door: parking_garage::app::events::DoorState::Closed
        }]
    );
}
