//! Outbound game events.
//!
//! The [`GameService`](super::service::GameService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  The log adapter turns them
//! into serial lines; tests record them.

use super::commands::MenuAction;
use crate::error::ActionRejected;
use crate::pet::menu::MenuSector;
use crate::pet::state::{MovementMode, Point};

/// Structured events emitted by the game core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service has started (carries the boot vitals).
    Started { hunger: u8, happiness: u8 },

    /// The wheel moved onto another menu sector.
    MenuChanged(MenuSector),

    /// A menu action was accepted.
    ActionStarted(MenuAction),

    /// A menu action was refused; nothing changed.
    ActionRejected(MenuAction, ActionRejected),

    /// Locomotion mode flipped.
    ModeToggled(MovementMode),

    /// The pet got to the food and started eating.
    FoodReached,

    /// A feed or play session completed.
    SessionEnded(SessionKind),

    /// A waste marker was placed.
    WasteSpawned(Point),

    /// A waste marker was wanted but the pool is full.
    WasteDropped,

    /// The clean action removed this many markers.
    WasteCleared(usize),

    /// Periodic vitals snapshot after a decay tick.
    VitalsTick(VitalsSnapshot),

    /// The pet died.  Emitted exactly once.
    Died,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Meal,
    Play,
}

/// A point-in-time vitals snapshot suitable for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VitalsSnapshot {
    pub hunger: u8,
    pub happiness: u8,
    pub bad_ticks: u8,
    pub decayed: bool,
    pub waste: usize,
}
