//! Inbound commands to the garage controller.
//!
//! These represent actions requested by the outside world (CLI, a ticket
//! machine, a scheduler) that
//! [`GarageController::handle_command`](super::controller::GarageController::handle_command)
//! interprets and acts upon.

use chrono::NaiveDateTime;

/// Commands that external adapters can send into the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GarageCommand {
    /// Swing the gate open.
    OpenDoor,
    /// Swing the gate closed.
    CloseDoor,
    /// Force the red light on.
    RedLightOn,
    /// Force the red light off.
    RedLightOff,
    /// Re-evaluate the "garage full" light from the occupancy sensors.
    ManageRedLight,
    /// Price a session that started at `entry`, ending now (RTC time).
    QuoteFee { entry: NaiveDateTime },
    /// Sample the occupancy sensors and report the count.
    CountOccupied,
}
