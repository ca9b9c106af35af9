//! Waste pool.
//!
//! Fixed capacity, stack allocated.  A spawn into a full pool is dropped
//! silently; cleaning empties the pool unconditionally.

use heapless::Vec;

use super::state::{PetState, Point};
use crate::config::GameConfig;

/// Maximum number of markers on screen at once.
pub const WASTE_CAPACITY: usize = 25;

/// A single mess left at the pet's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WasteMarker {
    pub position: Point,
}

#[derive(Debug, Clone, Default)]
pub struct WastePool {
    markers: Vec<WasteMarker, WASTE_CAPACITY>,
}

impl WastePool {
    pub fn new() -> Self {
        Self { markers: Vec::new() }
    }

    /// Place one marker.  Returns `false` when the pool is full.
    pub fn try_spawn(&mut self, position: Point) -> bool {
        self.markers.push(WasteMarker { position }).is_ok()
    }

    /// Deactivate every marker; returns how many were cleared.
    pub fn clear(&mut self) -> usize {
        let n = self.markers.len();
        self.markers.clear();
        n
    }

    pub fn active(&self) -> impl Iterator<Item = &WasteMarker> {
        self.markers.iter()
    }

    pub fn active_count(&self) -> usize {
        self.markers.len()
    }

    pub fn is_full(&self) -> bool {
        self.markers.is_full()
    }
}

/// Poor-vitals predicate for the periodic waste check.
pub fn vitals_are_poor(pet: &PetState, config: &GameConfig) -> bool {
    pet.hunger() > config.waste_hunger_high
        || pet.happiness() < config.waste_happiness_low
        || pet.hunger() < config.waste_hunger_low
}

/// Periodic waste check: at most one marker per check, however many
/// poor-vitals conditions hold.  Returns `Some(spawned)` when the check
/// wanted a marker, `None` when vitals were fine.
pub fn check(pool: &mut WastePool, pet: &PetState, config: &GameConfig) -> Option<bool> {
    if !pet.is_alive() || !vitals_are_poor(pet, config) {
        return None;
    }
    Some(pool.try_spawn(pet.position))
}
