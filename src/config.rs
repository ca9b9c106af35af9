//! Game tuning parameters
//!
//! Every constant the behaviour engine depends on lives here so the
//! subsystems never hard-code geometry or timing.  The device has no
//! persistent storage, so the defaults below are what boots unless a
//! tuning file is baked into the firmware image at build time.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Core game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // --- Geometry ---
    /// Width of the play field (the off-screen sprite layer), in pixels
    pub field_width: i32,
    /// Height of the play field, in pixels
    pub field_height: i32,
    /// Screen row at which the play field is pushed
    pub field_y: i32,
    /// Scaled pet sprite width
    pub pet_width: i32,
    /// Scaled pet sprite height
    pub pet_height: i32,
    /// Scaled food sprite size (square)
    pub food_size: i32,
    /// Beach ball radius
    pub ball_radius: i32,
    /// Starting position of the pet
    pub pet_start: (i32, i32),

    // --- Vitals ---
    /// Hunger at boot (0 = full, 100 = starving)
    pub initial_hunger: u8,
    /// Happiness at boot
    pub initial_happiness: u8,
    /// Hunger added per decay tick
    pub hunger_decay: u8,
    /// Happiness removed per decay tick
    pub happiness_decay: u8,
    /// Consecutive bad ticks before the pet dies
    pub death_threshold: u8,

    // --- Timing (milliseconds) ---
    /// Decay tick interval (accumulating deadline)
    pub vitals_interval_ms: u64,
    /// Render / LED frame interval (accumulating deadline)
    pub frame_interval_ms: u64,
    /// Minimum gap between movement steps (resetting gate)
    pub move_interval_ms: u64,
    /// Waste check interval (resetting deadline)
    pub waste_interval_ms: u64,
    /// Idle chirp check interval (resetting deadline)
    pub chirp_interval_ms: u64,
    /// Chance (percent) that an idle chirp check actually chirps
    pub chirp_chance_percent: u8,

    // --- Movement ---
    /// Pixels per wander step
    pub wander_step: i32,
    /// Edge margin that forces wander back toward the centre
    pub wander_edge_margin: i32,
    /// DVD bounce velocity per step
    pub dvd_velocity: (i32, i32),
    /// Pixels per step while heading to food
    pub chase_step_food: i32,
    /// Pixels per step while chasing the ball
    pub chase_step_ball: i32,
    /// Per-axis distance under which the pet has reached the food
    pub food_reach_epsilon: i32,

    // --- Feeding ---
    /// Length of the eating animation
    pub eat_duration_ms: u64,
    /// Bounce half-period during the eating animation
    pub eat_bounce_interval_ms: u64,
    /// Vertical offset per bounce
    pub eat_bounce_height: i32,
    /// Hunger removed when a meal completes
    pub meal_value: u8,

    // --- Playing ---
    /// Length of a play session, measured from its start
    pub play_timeout_ms: u64,
    /// Happiness reward when a play session ends
    pub play_reward: u8,
    /// Multiplicative velocity damping per step
    pub ball_friction: f32,
    /// Velocity magnitude snapped to zero
    pub ball_velocity_floor: f32,
    /// Base hit strength
    pub ball_hit_speed: f32,
    /// Maximum jitter added to / removed from the hit strength
    pub ball_hit_jitter: f32,
    /// Maximum random deflection of the hit direction (radians)
    pub ball_hit_deflection: f32,
    /// Minimum gap between two hits
    pub ball_hit_cooldown_ms: u64,
    /// Chase pause after a hit
    pub chase_cooldown_ms: u64,
    /// Per-axis dead zone of the ball chase
    pub ball_chase_dead_zone: i32,
    /// Spin advance per step while the ball moves (degrees)
    pub ball_spin_step: f32,

    // --- Waste ---
    /// Hunger above which the pet makes a mess
    pub waste_hunger_high: u8,
    /// Hunger below which the pet makes a mess (overfed)
    pub waste_hunger_low: u8,
    /// Happiness below which the pet makes a mess
    pub waste_happiness_low: u8,

    // --- Touch ---
    /// Samples averaged per baseline at calibration
    pub calibration_samples: u16,
    /// Delay between calibration samples
    pub calibration_interval_ms: u32,
    /// Drop below baseline that starts a wheel touch
    pub touch_on_delta: i32,
    /// Extra recovery band needed to end a wheel touch
    pub touch_off_delta: i32,
    /// Drop below baseline that counts as a center press
    pub center_threshold: i32,

    // --- Audio ---
    /// Frequency of the action-accepted cue
    pub select_tone_hz: u16,
    /// Duration of the action-accepted cue
    pub select_tone_ms: u16,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // Geometry
            field_width: 240,
            field_height: 179,
            field_y: 20,
            pet_width: 48,
            pet_height: 48,
            food_size: 24,
            ball_radius: 12,
            pet_start: (60, 60),

            // Vitals
            initial_hunger: 20,
            initial_happiness: 100,
            hunger_decay: 5,
            happiness_decay: 5,
            death_threshold: 5,

            // Timing
            vitals_interval_ms: 5000,
            frame_interval_ms: 100,
            move_interval_ms: 200,
            waste_interval_ms: 5000,
            chirp_interval_ms: 3000,
            chirp_chance_percent: 10,

            // Movement
            wander_step: 5,
            wander_edge_margin: 10,
            dvd_velocity: (5, 5),
            chase_step_food: 8,
            chase_step_ball: 10,
            food_reach_epsilon: 8,

            // Feeding
            eat_duration_ms: 1500,
            eat_bounce_interval_ms: 200,
            eat_bounce_height: 5,
            meal_value: 16,

            // Playing
            play_timeout_ms: 6000,
            play_reward: 20,
            ball_friction: 0.98,
            ball_velocity_floor: 0.05,
            ball_hit_speed: 5.0,
            ball_hit_jitter: 1.0,
            ball_hit_deflection: 0.17,
            ball_hit_cooldown_ms: 300,
            chase_cooldown_ms: 300,
            ball_chase_dead_zone: 4,
            ball_spin_step: 30.0,

            // Waste
            waste_hunger_high: 80,
            waste_hunger_low: 15,
            waste_happiness_low: 20,

            // Touch
            calibration_samples: 100,
            calibration_interval_ms: 10,
            touch_on_delta: 15,
            touch_off_delta: 5,
            center_threshold: 40,

            // Audio
            select_tone_hz: 2000,
            select_tone_ms: 100,
        }
    }
}

impl GameConfig {
    /// Largest legal pet X coordinate.
    pub fn pet_max_x(&self) -> i32 {
        self.field_width - self.pet_width
    }

    /// Largest legal pet Y coordinate.
    pub fn pet_max_y(&self) -> i32 {
        self.field_height - self.pet_height
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pet_width <= 0 || self.pet_height <= 0 {
            return Err(ConfigError::Invalid("pet sprite must have a size"));
        }
        if self.pet_max_x() < 0 || self.pet_max_y() < 0 {
            return Err(ConfigError::Invalid("pet does not fit in the field"));
        }
        let ball_d = self.ball_radius * 2;
        if self.ball_radius <= 0 || ball_d + 40 >= self.field_width.min(self.field_height) {
            return Err(ConfigError::Invalid("ball does not fit in the spawn area"));
        }
        if self.food_size <= 0 || self.food_size + 40 >= self.field_width.min(self.field_height) {
            return Err(ConfigError::Invalid("food does not fit in the spawn area"));
        }
        if self.vitals_interval_ms == 0
            || self.frame_interval_ms == 0
            || self.waste_interval_ms == 0
            || self.chirp_interval_ms == 0
        {
            return Err(ConfigError::Invalid("cadence intervals must be non-zero"));
        }
        if self.eat_duration_ms == 0 || self.play_timeout_ms == 0 {
            return Err(ConfigError::Invalid("session durations must be non-zero"));
        }
        if !(0.0..1.0).contains(&self.ball_friction) {
            return Err(ConfigError::Invalid("ball friction must be in [0, 1)"));
        }
        if self.death_threshold == 0 {
            return Err(ConfigError::Invalid("death threshold must be at least one tick"));
        }
        if self.calibration_samples == 0 {
            return Err(ConfigError::Invalid("calibration needs at least one sample"));
        }
        Ok(())
    }

    /// Parse a JSON tuning file.  Absent fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text).map_err(|_| ConfigError::Malformed)?;
        config.validate()?;
        Ok(config)
    }

    /// Decode a compact postcard blob.
    pub fn from_postcard(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Malformed)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_postcard(&self) -> Result<Vec<u8>, ConfigError> {
        postcard::to_allocvec(self).map_err(|_| ConfigError::Malformed)
    }

    /// Whether both decay steps evenly divide the 0–100 range, so the
    /// death-watch predicate (hunger exactly 100, happiness exactly 0)
    /// lines up with decay-tick boundaries.  Reported, never corrected.
    pub fn death_predicate_reachable(&self) -> bool {
        self.hunger_decay > 0
            && self.happiness_decay > 0
            && 100 % self.hunger_decay == 0
            && 100 % self.happiness_decay == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = GameConfig::default();
        assert!(c.validate().is_ok());
        assert!(c.frame_interval_ms < c.move_interval_ms);
        assert!(c.move_interval_ms < c.vitals_interval_ms);
        assert!(c.eat_duration_ms < c.play_timeout_ms);
    }

    #[test]
    fn default_decay_reaches_death_predicate() {
        assert!(GameConfig::default().death_predicate_reachable());
    }

    #[test]
    fn uneven_decay_is_flagged() {
        let c = GameConfig {
            hunger_decay: 7,
            ..GameConfig::default()
        };
        assert!(!c.death_predicate_reachable());
        assert!(c.validate().is_ok(), "flagged, not rejected");
    }

    #[test]
    fn oversized_pet_is_rejected() {
        let c = GameConfig {
            pet_height: 400,
            ..GameConfig::default()
        };
        assert!(matches!(c.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn zero_interval_is_rejected() {
        let c = GameConfig {
            vitals_interval_ms: 0,
            ..GameConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn serde_roundtrip() {
        let c = GameConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c.vitals_interval_ms, c2.vitals_interval_ms);
        assert_eq!(c.pet_start, c2.pet_start);
        assert!((c.ball_friction - c2.ball_friction).abs() < f32::EPSILON);
    }

    #[test]
    fn postcard_roundtrip() {
        let c = GameConfig::default();
        let bytes = c.to_postcard().unwrap();
        let c2 = GameConfig::from_postcard(&bytes).unwrap();
        assert_eq!(c.meal_value, c2.meal_value);
        assert_eq!(c.dvd_velocity, c2.dvd_velocity);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let c = GameConfig::from_json(r#"{ "meal_value": 30, "play_timeout_ms": 9000 }"#).unwrap();
        assert_eq!(c.meal_value, 30);
        assert_eq!(c.play_timeout_ms, 9000);
        assert_eq!(c.vitals_interval_ms, GameConfig::default().vitals_interval_ms);
    }

    #[test]
    fn bad_tuning_is_refused() {
        assert!(matches!(
            GameConfig::from_json("{ nope"),
            Err(ConfigError::Malformed)
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "frame_interval_ms": 0 }"#),
            Err(ConfigError::Invalid("cadence intervals must be non-zero"))
        ));
        assert!(matches!(
            GameConfig::from_postcard(&[0xFF]),
            Err(ConfigError::Malformed)
        ));
    }
}
