//! Outbound controller events.
//!
//! The [`GarageController`](super::controller::GarageController) emits these
//! through the [`EventSink`](super::ports::EventSink) port. Adapters on the
//! other side decide what to do with them: log to console, drive a
//! display, etc.

use crate::fee::FeeQuote;
use crate::pins::SPOT_COUNT;

/// Observable gate position. There is no "moving" state: actuation blocks
/// until the servo has settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorState {
    Closed,
    Open,
}

/// Structured events emitted by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum GarageEvent {
    /// The controller finished start-up (gate re-homed, light off).
    Started { door: DoorState },

    /// A door command completed. `from == to` for a repeated command.
    DoorChanged { from: DoorState, to: DoorState },

    /// The red light turned on or off. Not emitted when a command leaves it
    /// as it was.
    RedLightChanged { on: bool },

    /// Occupancy sample.
    Occupancy(OccupancySnapshot),

    /// A fee was calculated.
    FeeQuoted(FeeQuote),
}

/// A point-in-time occupancy reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccupancySnapshot {
    /// Per-sensor readings, in the configured sensor order.
    pub spots: [bool; SPOT_COUNT],
    pub occupied: u8,
    pub capacity: u8,
    pub red_light_on: bool,
}

impl OccupancySnapshot {
    pub fn is_full(&self) -> bool {
        self.occupied >= self.capacity
    }

    pub fn free(&self) -> u8 {
        self.capacity.saturating_sub(self.occupied)
    }
}
