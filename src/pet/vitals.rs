//! Vital-stats engine: hunger/happiness decay and the death watch.
//!
//! Called once per decay tick.  Decay pauses while the pet eats or plays,
//! but the death watch runs on every tick regardless.

use log::{info, warn};

use super::state::{PetState, VITAL_MAX};
use crate::config::GameConfig;

/// Result of one decay tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VitalsOutcome {
    /// Whether hunger/happiness were aged this tick.
    pub decayed: bool,
    /// Bad-tick counter after this tick.
    pub bad_ticks: u8,
    /// The pet died on this tick.
    pub died: bool,
}

/// Age the vitals by one tick.  A dead pet is left untouched.
pub fn decay_tick(pet: &mut PetState, paused: bool, config: &GameConfig) -> VitalsOutcome {
    if !pet.is_alive() {
        return VitalsOutcome {
            decayed: false,
            bad_ticks: pet.bad_ticks,
            died: false,
        };
    }

    if !paused {
        pet.set_hunger(i32::from(pet.hunger()) + i32::from(config.hunger_decay));
        pet.set_happiness(i32::from(pet.happiness()) - i32::from(config.happiness_decay));
    }

    if pet.hunger() == VITAL_MAX && pet.happiness() == 0 {
        pet.bad_ticks = pet.bad_ticks.saturating_add(1);
        warn!(
            "vitals: starving and miserable ({}/{})",
            pet.bad_ticks, config.death_threshold
        );
    } else {
        pet.bad_ticks = 0;
    }

    let died = pet.bad_ticks >= config.death_threshold;
    if died {
        pet.kill();
        info!("vitals: pet died after {} bad ticks", pet.bad_ticks);
    }

    VitalsOutcome {
        decayed: !paused,
        bad_ticks: pet.bad_ticks,
        died,
    }
}
