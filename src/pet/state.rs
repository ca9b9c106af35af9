//! Pet state and play-field geometry.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

pub const VITAL_MAX: u8 = 100;

/// Integer screen-space point (top-left of a sprite unless noted).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Inclusive box a sprite's top-left corner must stay inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldBounds {
    pub max_x: i32,
    pub max_y: i32,
}

impl FieldBounds {
    /// Bounds for a `w`×`h` sprite in the configured field.
    pub fn for_sprite(config: &GameConfig, w: i32, h: i32) -> Self {
        Self {
            max_x: (config.field_width - w).max(0),
            max_y: (config.field_height - h).max(0),
        }
    }

    pub fn for_pet(config: &GameConfig) -> Self {
        Self::for_sprite(config, config.pet_width, config.pet_height)
    }

    pub fn clamp(&self, p: Point) -> Point {
        Point {
            x: p.x.clamp(0, self.max_x),
            y: p.y.clamp(0, self.max_y),
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        (0..=self.max_x).contains(&p.x) && (0..=self.max_y).contains(&p.y)
    }
}

/// Free locomotion style, flipped from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementMode {
    Wander,
    DvdBounce,
}

impl MovementMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Wander => Self::DvdBounce,
            Self::DvdBounce => Self::Wander,
        }
    }
}

/// Face shown in the HUD corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Happy,
    Neutral,
    Sad,
}

/// The pet itself.  Hunger grows toward 100 (starving); happiness falls
/// toward 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetState {
    hunger: u8,
    happiness: u8,
    alive: bool,
    /// Consecutive decay ticks spent at hunger 100 and happiness 0.
    pub bad_ticks: u8,
    pub position: Point,
    pub mode: MovementMode,
    /// Current DVD-bounce velocity; signs flip on wall contact.
    pub dvd_velocity: (i32, i32),
}

impl PetState {
    pub fn new(config: &GameConfig) -> Self {
        let bounds = FieldBounds::for_pet(config);
        Self {
            hunger: config.initial_hunger.min(VITAL_MAX),
            happiness: config.initial_happiness.min(VITAL_MAX),
            alive: true,
            bad_ticks: 0,
            position: bounds.clamp(Point::new(config.pet_start.0, config.pet_start.1)),
            mode: MovementMode::Wander,
            dvd_velocity: config.dvd_velocity,
        }
    }

    pub fn hunger(&self) -> u8 {
        self.hunger
    }

    pub fn happiness(&self) -> u8 {
        self.happiness
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Set hunger, clamped to 0–100.
    pub fn set_hunger(&mut self, value: i32) {
        self.hunger = value.clamp(0, VITAL_MAX as i32) as u8;
    }

    /// Set happiness, clamped to 0–100.
    pub fn set_happiness(&mut self, value: i32) {
        self.happiness = value.clamp(0, VITAL_MAX as i32) as u8;
    }

    /// One-way transition to dead.
    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// Pixel center of the pet sprite.
    pub fn center(&self, config: &GameConfig) -> Point {
        Point::new(
            self.position.x + config.pet_width / 2,
            self.position.y + config.pet_height / 2,
        )
    }

    pub fn mood(&self) -> Mood {
        match self.happiness {
            h if h > 66 => Mood::Happy,
            h if h > 33 => Mood::Neutral,
            _ => Mood::Sad,
        }
    }

    /// Sprite choice: the sad face shows below happiness 30.
    pub fn looks_sad(&self) -> bool {
        self.happiness < 30
    }

    /// HUD hearts, 0–5.
    pub fn hearts(&self) -> u8 {
        let score = 100 - i32::from(self.hunger) / 2 - (50 - i32::from(self.happiness) / 2);
        (score / 20).clamp(0, 5) as u8
    }

    /// LED bar fill from hunger: a full stomach lights all six.
    pub fn led_level(&self) -> u8 {
        match self.hunger {
            0..16 => 6,
            16..32 => 5,
            32..48 => 4,
            48..64 => 3,
            64..80 => 2,
            80..100 => 1,
            _ => 0,
        }
    }
}
