//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing each game event as one
//! `TAG | key=value` line to the logger (UART / USB-CDC on the badge).

use log::{info, warn};

use crate::app::events::{AppEvent, SessionKind};
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { hunger, happiness } => {
                info!("START | hunger={} happiness={}", hunger, happiness);
            }
            AppEvent::MenuChanged(sector) => {
                info!("MENU | selected={}", sector.label());
            }
            AppEvent::ActionStarted(action) => {
                info!("ACTION | {} ok", action.name());
            }
            AppEvent::ActionRejected(action, reason) => {
                warn!("ACTION | {} rejected: {}", action.name(), reason);
            }
            AppEvent::ModeToggled(mode) => {
                info!("ACTION | mode={:?}", mode);
            }
            AppEvent::FoodReached => {
                info!("SESSION | food reached, eating");
            }
            AppEvent::SessionEnded(kind) => {
                let name = match kind {
                    SessionKind::Meal => "meal",
                    SessionKind::Play => "play",
                };
                info!("SESSION | {} finished", name);
            }
            AppEvent::WasteSpawned(p) => {
                info!("WASTE | spawned at ({}, {})", p.x, p.y);
            }
            AppEvent::WasteDropped => {
                info!("WASTE | pool full, dropped");
            }
            AppEvent::WasteCleared(n) => {
                info!("WASTE | cleared={}", n);
            }
            AppEvent::VitalsTick(v) => {
                info!(
                    "VITALS | hunger={} happiness={} bad={} decayed={} waste={}",
                    v.hunger, v.happiness, v.bad_ticks, v.decayed, v.waste
                );
            }
            AppEvent::Died => {
                warn!("DEATH | pet died");
            }
        }
    }
}
