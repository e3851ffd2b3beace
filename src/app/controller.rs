//! Garage controller: the domain core.
//!
//! [`GarageController`] owns the pin assignment, the gate servo and the
//! door/light state. All I/O flows through the port traits it is built
//! with, so the whole controller runs against mock adapters on the host.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────────┐ ──▶ EventSink
//!   ClockPort ──▶ │      GarageController      │
//! ActuatorPort ◀──│ occupancy · fees · gate    │
//!     DelayNs ◀── │ · red light                │
//!                 └────────────────────────────┘
//! ```
//!
//! The controller is single-threaded and blocking: door commands hold the
//! calling thread for the servo settle time. Every hardware operation takes
//! `&mut self`; callers that share one controller across threads must
//! serialise access themselves (one command queue per garage).

use chrono::NaiveDateTime;
use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::config::GarageConfig;
use crate::drivers::servo::ServoGate;
use crate::error::{GarageError, Result};
use crate::fee::FeeQuote;
use crate::pins::{PinId, SPOT_COUNT};

use super::commands::GarageCommand;
use super::events::{DoorState, GarageEvent, OccupancySnapshot};
use super::ports::{ActuatorPort, ClockPort, EventSink, PinMode, SensorPort};

/// Door and light flags. Both reflect the last *successful* command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GarageState {
    pub door_open: bool,
    pub red_light_on: bool,
}

impl GarageState {
    pub fn door(&self) -> DoorState {
        if self.door_open {
            DoorState::Open
        } else {
            DoorState::Closed
        }
    }
}

pub struct GarageController<H, D> {
    hw: H,
    delay: D,
    config: GarageConfig,
    servo: ServoGate,
    state: GarageState,
}

impl<H, D> GarageController<H, D>
where
    H: SensorPort + ActuatorPort + ClockPort,
    D: DelayNs,
{
    /// Validate `config`, configure every pin and re-home the gate.
    ///
    /// The servo is always swept to its rest position, whatever its physical
    /// state, and the light is forced off. Blocks for one settle time.
    pub fn new(config: GarageConfig, mut hw: H, mut delay: D) -> Result<Self> {
        config.validate()?;
        let pins = config.pins;

        for pin in pins.occupancy {
            hw.setup_pin(pin, PinMode::Input)?;
        }
        let mut servo = ServoGate::new(pins.servo, config.servo);
        servo.setup(&mut hw)?;
        hw.setup_pin(pins.light, PinMode::Output)?;

        servo.home(&mut hw, &mut delay)?;
        hw.digital_write(pins.light, false)?;

        info!(
            "GarageController ready: sensors={:?} servo={} light={}",
            pins.occupancy, pins.servo, pins.light
        );

        Ok(Self {
            hw,
            delay,
            config,
            servo,
            state: GarageState::default(),
        })
    }

    // ── Occupancy ─────────────────────────────────────────────

    /// Read one occupancy sensor. `true` = spot occupied.
    pub fn check_occupancy(&mut self, sensor: PinId) -> Result<bool> {
        if !self.config.pins.is_occupancy_sensor(sensor) {
            warn!("occupancy query on non-sensor pin {}", sensor);
            return Err(GarageError::InvalidSensor(sensor));
        }
        Ok(self.hw.digital_read(sensor)?)
    }

    /// Number of occupied spots, sampled fresh from every sensor.
    pub fn get_number_occupied_spots(&mut self) -> Result<u8> {
        Ok(self.read_spots()?.iter().filter(|&&occupied| occupied).count() as u8)
    }

    fn read_spots(&mut self) -> Result<[bool; SPOT_COUNT]> {
        let mut spots = [false; SPOT_COUNT];
        for (spot, pin) in spots.iter_mut().zip(self.config.pins.occupancy) {
            *spot = self.check_occupancy(pin)?;
        }
        Ok(spots)
    }

    // ── Fees ──────────────────────────────────────────────────

    /// Fee for a session that started at `entry_time` and ends now.
    ///
    /// "Now" is the RTC, not the host clock.
    pub fn calculate_parking_fee(&mut self, entry_time: NaiveDateTime) -> Result<f64> {
        Ok(self.quote_parking_fee(entry_time)?.amount)
    }

    /// Same as [`calculate_parking_fee`](Self::calculate_parking_fee) with
    /// the full breakdown.
    pub fn quote_parking_fee(&mut self, entry_time: NaiveDateTime) -> Result<FeeQuote> {
        let now = self.hw.clock_read()?;
        let quote = self.config.fees.quote(entry_time, now);
        info!(
            "fee: {} -> {} = {}h x {} (weekend={}) = {:.2}",
            quote.entry,
            quote.exit,
            quote.billed_hours,
            self.config.fees.base_fee,
            quote.weekend,
            quote.amount
        );
        Ok(quote)
    }

    // ── Door ──────────────────────────────────────────────────

    pub fn open_garage_door(&mut self) -> Result<()> {
        self.servo.open(&mut self.hw, &mut self.delay)?;
        self.state.door_open = true;
        info!("door open");
        Ok(())
    }

    pub fn close_garage_door(&mut self) -> Result<()> {
        self.servo.close(&mut self.hw, &mut self.delay)?;
        self.state.door_open = false;
        info!("door closed");
        Ok(())
    }

    // ── Red light ─────────────────────────────────────────────

    pub fn turn_on_red_light(&mut self) -> Result<()> {
        self.set_red_light(true)
    }

    pub fn turn_off_red_light(&mut self) -> Result<()> {
        self.set_red_light(false)
    }

    /// Light on iff every spot is occupied. Returns the resulting light state.
    pub fn manage_red_light(&mut self) -> Result<bool> {
        let full = usize::from(self.get_number_occupied_spots()?) == SPOT_COUNT;
        self.set_red_light(full)?;
        Ok(full)
    }

    fn set_red_light(&mut self, on: bool) -> Result<()> {
        self.hw.digital_write(self.config.pins.light, on)?;
        self.state.red_light_on = on;
        Ok(())
    }

    /// Drive the light and report [`GarageEvent::RedLightChanged`] only if
    /// its state actually flipped.
    fn drive_red_light(&mut self, on: bool, sink: &mut impl EventSink) -> Result<()> {
        let was_on = self.state.red_light_on;
        self.set_red_light(on)?;
        if on != was_on {
            sink.emit(&GarageEvent::RedLightChanged { on });
        }
        Ok(())
    }

    // ── Control loop ──────────────────────────────────────────

    /// Run one control cycle: sample occupancy, update the red light and
    /// emit an [`GarageEvent::Occupancy`] snapshot.
    pub fn poll(&mut self, sink: &mut impl EventSink) -> Result<OccupancySnapshot> {
        let spots = self.read_spots()?;
        let occupied = spots.iter().filter(|&&s| s).count() as u8;
        self.drive_red_light(usize::from(occupied) == SPOT_COUNT, sink)?;

        let snapshot = OccupancySnapshot {
            spots,
            occupied,
            capacity: SPOT_COUNT as u8,
            red_light_on: self.state.red_light_on,
        };
        sink.emit(&GarageEvent::Occupancy(snapshot));
        Ok(snapshot)
    }

    /// Announce start-up on `sink`. Construction already re-homed the gate.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&GarageEvent::Started {
            door: self.state.door(),
        });
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command and report what happened on `sink`.
    pub fn handle_command(&mut self, cmd: GarageCommand, sink: &mut impl EventSink) -> Result<()> {
        match cmd {
            GarageCommand::OpenDoor | GarageCommand::CloseDoor => {
                let from = self.state.door();
                if cmd == GarageCommand::OpenDoor {
                    self.open_garage_door()?;
                } else {
                    self.close_garage_door()?;
                }
                sink.emit(&GarageEvent::DoorChanged {
                    from,
                    to: self.state.door(),
                });
            }
            GarageCommand::RedLightOn => self.drive_red_light(true, sink)?,
            GarageCommand::RedLightOff => self.drive_red_light(false, sink)?,
            GarageCommand::ManageRedLight => {
                let full = usize::from(self.get_number_occupied_spots()?) == SPOT_COUNT;
                self.drive_red_light(full, sink)?;
            }
            GarageCommand::QuoteFee { entry } => {
                let quote = self.quote_parking_fee(entry)?;
                sink.emit(&GarageEvent::FeeQuoted(quote));
            }
            GarageCommand::CountOccupied => {
                let spots = self.read_spots()?;
                sink.emit(&GarageEvent::Occupancy(OccupancySnapshot {
                    spots,
                    occupied: spots.iter().filter(|&&s| s).count() as u8,
                    capacity: SPOT_COUNT as u8,
                    red_light_on: self.state.red_light_on,
                }));
            }
        }
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> GarageState {
        self.state
    }

    pub fn door_state(&self) -> DoorState {
        self.state.door()
    }

    pub fn is_door_open(&self) -> bool {
        self.state.door_open
    }

    pub fn is_red_light_on(&self) -> bool {
        self.state.red_light_on
    }

    /// Borrow the hardware adapter (e.g. to inspect a simulator).
    pub fn hardware(&self) -> &H {
        &self.hw
    }

    pub fn hardware_mut(&mut self) -> &mut H {
        &mut self.hw
    }

    /// Tear down the controller and hand back its adapters.
    pub fn into_parts(self) -> (H, D) {
        (self.hw, self.delay)
    }
}
