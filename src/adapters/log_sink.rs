//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing controller events through the `log`
//! facade. A display or ticket-printer adapter would implement the same
//! trait.

use log::info;

use crate::app::events::GarageEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`GarageEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &GarageEvent) {
        match event {
            GarageEvent::Started { door } => {
                info!("START | door={:?}", door);
            }
            GarageEvent::DoorChanged { from, to } => {
                info!("DOOR  | {:?} -> {:?}", from, to);
            }
            GarageEvent::RedLightChanged { on } => {
                info!("LIGHT | red={}", if *on { "ON" } else { "OFF" });
            }
            GarageEvent::Occupancy(s) => {
                info!(
                    "SPOTS | {}/{} occupied {:?} | free={} | red={}",
                    s.occupied,
                    s.capacity,
                    s.spots,
                    s.free(),
                    if s.red_light_on { "ON" } else { "OFF" },
                );
            }
            GarageEvent::FeeQuoted(q) => {
                info!(
                    "FEE   | {} -> {} | {}h{} | {:.2}",
                    q.entry,
                    q.exit,
                    q.billed_hours,
                    if q.weekend { " weekend" } else { "" },
                    q.amount,
                );
            }
        }
    }
}
