//! Activity manager: the feed / play / clean mini-games.
//!
//! ```text
//!            Feed                 reach food           1.5 s
//!   Idle ───────────▶ Approaching ───────────▶ Eating ───────▶ Idle
//!     │
//!     │      Play                 6 s from start
//!     ├───────────▶ Playing ───────────────────────────────────▶ Idle
//!     │
//!     │      Clean (instant, clears the waste pool)
//!     └───────────▶ Idle
//! ```
//!
//! At most one session exists at a time.  `step` advances the session by
//! one movement step and reports what happened so the caller can play
//! sounds and emit events.

use log::info;
use rand::Rng;

use super::movement::chase;
use super::state::{FieldBounds, PetState, Point};
use super::waste::WastePool;
use crate::config::GameConfig;
use crate::error::ActionRejected;

/// Dead zone of the food approach, per axis.
const FOOD_CHASE_DEAD_ZONE: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedPhase {
    /// Food is on screen and the pet is walking to it.
    Approaching,
    /// Food reached; bounce animation runs until the meal is done.
    Eating {
        started_ms: u64,
        last_bounce_ms: u64,
        bounce_up: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feeding {
    /// Top-left of the food sprite.
    pub food: Point,
    pub phase: FeedPhase,
}

/// Beach-ball physics state.  Position is the top-left of the ball's
/// bounding square, kept fractional so slow rolls still move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Visual spin of the colour slices, degrees in [0, 360).
    pub spin_deg: f32,
}

impl Ball {
    pub fn at_rest(x: i32, y: i32) -> Self {
        Self {
            x: x as f32,
            y: y as f32,
            vx: 0.0,
            vy: 0.0,
            spin_deg: 0.0,
        }
    }

    pub fn is_moving(&self) -> bool {
        self.vx != 0.0 || self.vy != 0.0
    }

    /// Integrate one step: move, damp, snap tiny speeds to zero, then
    /// reflect off the walls.
    pub fn integrate(&mut self, config: &GameConfig) {
        self.x += self.vx;
        self.y += self.vy;
        self.vx *= config.ball_friction;
        self.vy *= config.ball_friction;
        if self.vx.abs() < config.ball_velocity_floor {
            self.vx = 0.0;
        }
        if self.vy.abs() < config.ball_velocity_floor {
            self.vy = 0.0;
        }

        let d = (config.ball_radius * 2) as f32;
        let max_x = config.field_width as f32 - d;
        let max_y = config.field_height as f32 - d;
        if self.x <= 0.0 || self.x >= max_x {
            self.vx = -self.vx;
            self.x = self.x.clamp(0.0, max_x);
        }
        if self.y <= 0.0 || self.y >= max_y {
            self.vy = -self.vy;
            self.y = self.y.clamp(0.0, max_y);
        }
    }

    pub fn center(&self, config: &GameConfig) -> (f32, f32) {
        let r = config.ball_radius as f32;
        (self.x + r, self.y + r)
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x as i32, self.y as i32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playing {
    pub ball: Ball,
    pub started_ms: u64,
    pub last_hit_ms: Option<u64>,
}

/// The single exclusive activity slot.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Session {
    #[default]
    Idle,
    Feeding(Feeding),
    Playing(Playing),
}

/// What one session step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStep {
    /// Walked toward the food or chased the ball.
    Moved,
    FoodReached,
    /// One eating bounce; `up` selects the higher chirp.
    Bounced { up: bool },
    /// Eating still running between bounces.
    Chewing,
    /// Meal complete; hunger already reduced.
    MealFinished,
    /// The pet struck the ball.
    BallHit,
    /// Play timeout reached; happiness already rewarded.
    PlayFinished,
}

#[derive(Debug, Clone, Default)]
pub struct ActivityManager {
    session: Session,
}

impl ActivityManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.session, Session::Idle)
    }

    /// Decay pauses while eating or playing, not while walking to food.
    pub fn pauses_decay(&self) -> bool {
        matches!(
            self.session,
            Session::Feeding(Feeding {
                phase: FeedPhase::Eating { .. },
                ..
            }) | Session::Playing(_)
        )
    }

    /// Food sprite position while the pet is still walking to it.
    pub fn food(&self) -> Option<Point> {
        match self.session {
            Session::Feeding(Feeding {
                food,
                phase: FeedPhase::Approaching,
            }) => Some(food),
            _ => None,
        }
    }

    pub fn ball(&self) -> Option<&Ball> {
        match &self.session {
            Session::Playing(p) => Some(&p.ball),
            _ => None,
        }
    }

    fn ensure_startable(&self, pet: &PetState) -> Result<(), ActionRejected> {
        if !pet.is_alive() {
            return Err(ActionRejected::PetDead);
        }
        match self.session {
            Session::Idle => Ok(()),
            Session::Feeding(_) => Err(ActionRejected::FeedingInProgress),
            Session::Playing(_) => Err(ActionRejected::PlayingInProgress),
        }
    }

    /// Drop food at a random spot inside the field margins.
    pub fn start_feed(
        &mut self,
        pet: &PetState,
        config: &GameConfig,
        rng: &mut impl Rng,
    ) -> Result<Point, ActionRejected> {
        self.ensure_startable(pet)?;
        let food = Point::new(
            spawn_coord(config.field_width, config.food_size, rng),
            spawn_coord(config.field_height, config.food_size, rng),
        );
        self.session = Session::Feeding(Feeding {
            food,
            phase: FeedPhase::Approaching,
        });
        info!("activity: food at ({}, {})", food.x, food.y);
        Ok(food)
    }

    /// Throw a resting ball at a random spot inside the field margins.
    pub fn start_play(
        &mut self,
        pet: &PetState,
        now_ms: u64,
        config: &GameConfig,
        rng: &mut impl Rng,
    ) -> Result<Point, ActionRejected> {
        self.ensure_startable(pet)?;
        let d = config.ball_radius * 2;
        let spot = Point::new(
            spawn_coord(config.field_width, d, rng),
            spawn_coord(config.field_height, d, rng),
        );
        self.session = Session::Playing(Playing {
            ball: Ball::at_rest(spot.x, spot.y),
            started_ms: now_ms,
            last_hit_ms: None,
        });
        info!("activity: ball at ({}, {})", spot.x, spot.y);
        Ok(spot)
    }

    /// Clear every waste marker.  Allowed during sessions.
    pub fn clean(&self, pet: &PetState, pool: &mut WastePool) -> Result<usize, ActionRejected> {
        if !pet.is_alive() {
            return Err(ActionRejected::PetDead);
        }
        Ok(pool.clear())
    }

    /// Advance the active session by one movement step.  Returns `None`
    /// when idle so the caller falls back to free locomotion.
    pub fn step(
        &mut self,
        pet: &mut PetState,
        now_ms: u64,
        config: &GameConfig,
        rng: &mut impl Rng,
    ) -> Option<SessionStep> {
        if !pet.is_alive() {
            return None;
        }
        let bounds = FieldBounds::for_pet(config);
        match &mut self.session {
            Session::Idle => None,
            Session::Feeding(feeding) => {
                let step = step_feeding(feeding, pet, now_ms, bounds, config);
                if step == SessionStep::MealFinished {
                    self.session = Session::Idle;
                }
                Some(step)
            }
            Session::Playing(playing) => {
                let step = step_playing(playing, pet, now_ms, bounds, config, rng);
                if step == SessionStep::PlayFinished {
                    self.session = Session::Idle;
                }
                Some(step)
            }
        }
    }
}

fn spawn_coord(extent: i32, size: i32, rng: &mut impl Rng) -> i32 {
    let hi = extent - size - 20;
    if hi <= 20 { 20 } else { rng.gen_range(20..hi) }
}

fn symmetric(rng: &mut impl Rng, amplitude: f32) -> f32 {
    if amplitude > 0.0 {
        rng.gen_range(-amplitude..amplitude)
    } else {
        0.0
    }
}

fn step_feeding(
    feeding: &mut Feeding,
    pet: &mut PetState,
    now_ms: u64,
    bounds: FieldBounds,
    config: &GameConfig,
) -> SessionStep {
    match &mut feeding.phase {
        FeedPhase::Approaching => {
            let half_food = config.food_size / 2;
            let food_center = Point::new(feeding.food.x + half_food, feeding.food.y + half_food);
            let gap = |pet: &PetState| {
                let c = pet.center(config);
                Point::new(food_center.x - c.x, food_center.y - c.y)
            };

            pet.position = chase(
                pet.position,
                gap(pet),
                config.chase_step_food,
                FOOD_CHASE_DEAD_ZONE,
                bounds,
            );

            let left = gap(pet);
            let eps = config.food_reach_epsilon;
            if left.x.abs() < eps && left.y.abs() < eps {
                feeding.phase = FeedPhase::Eating {
                    started_ms: now_ms,
                    last_bounce_ms: now_ms,
                    bounce_up: true,
                };
                info!("activity: food reached, eating");
                SessionStep::FoodReached
            } else {
                SessionStep::Moved
            }
        }
        FeedPhase::Eating {
            started_ms,
            last_bounce_ms,
            bounce_up,
        } => {
            if now_ms.saturating_sub(*started_ms) >= config.eat_duration_ms {
                pet.set_hunger(i32::from(pet.hunger()) - i32::from(config.meal_value));
                info!("activity: meal done, hunger {}", pet.hunger());
                return SessionStep::MealFinished;
            }
            if now_ms.saturating_sub(*last_bounce_ms) < config.eat_bounce_interval_ms {
                return SessionStep::Chewing;
            }
            *last_bounce_ms = now_ms;
            *bounce_up = !*bounce_up;
            let dy = if *bounce_up {
                -config.eat_bounce_height
            } else {
                config.eat_bounce_height
            };
            pet.position = bounds.clamp(Point::new(pet.position.x, pet.position.y + dy));
            SessionStep::Bounced { up: *bounce_up }
        }
    }
}

fn step_playing(
    playing: &mut Playing,
    pet: &mut PetState,
    now_ms: u64,
    bounds: FieldBounds,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> SessionStep {
    let ball = &mut playing.ball;
    ball.integrate(config);

    let pet_center = pet.center(config);
    let (bcx, bcy) = ball.center(config);
    let dx = bcx as i32 - pet_center.x;
    let dy = bcy as i32 - pet_center.y;
    let reach = config.pet_width / 2 + config.ball_radius;

    let since_hit = playing.last_hit_ms.map(|t| now_ms.saturating_sub(t));
    let mut hit = false;
    if dx * dx + dy * dy < reach * reach
        && since_hit.is_none_or(|gap| gap >= config.ball_hit_cooldown_ms)
    {
        let angle = (dy as f32).atan2(dx as f32) + symmetric(rng, config.ball_hit_deflection);
        let strength = config.ball_hit_speed + symmetric(rng, config.ball_hit_jitter);
        ball.vx = angle.cos() * strength;
        ball.vy = angle.sin() * strength;
        playing.last_hit_ms = Some(now_ms);
        hit = true;
    }

    let chase_allowed = playing
        .last_hit_ms
        .is_none_or(|t| now_ms.saturating_sub(t) > config.chase_cooldown_ms);
    if chase_allowed {
        pet.position = chase(
            pet.position,
            Point::new(dx, dy),
            config.chase_step_ball,
            config.ball_chase_dead_zone,
            bounds,
        );
    }

    if ball.is_moving() {
        ball.spin_deg += config.ball_spin_step;
        if ball.spin_deg >= 360.0 {
            ball.spin_deg -= 360.0;
        }
    }

    if now_ms.saturating_sub(playing.started_ms) >= config.play_timeout_ms {
        pet.set_happiness(i32::from(pet.happiness()) + i32::from(config.play_reward));
        info!("activity: play over, happiness {}", pet.happiness());
        return SessionStep::PlayFinished;
    }

    if hit {
        SessionStep::BallHit
    } else {
        SessionStep::Moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn setup() -> (ActivityManager, PetState, GameConfig, SmallRng) {
        let cfg = GameConfig::default();
        let pet = PetState::new(&cfg);
        (ActivityManager::new(), pet, cfg, SmallRng::seed_from_u64(42))
    }

    /// Run feeding until the meal finishes, returning the finish time.
    fn finish_meal(
        act: &mut ActivityManager,
        pet: &mut PetState,
        cfg: &GameConfig,
        rng: &mut SmallRng,
    ) -> u64 {
        let mut now = 0;
        loop {
            now += cfg.move_interval_ms;
            if act.step(pet, now, cfg, rng) == Some(SessionStep::MealFinished) {
                return now;
            }
            assert!(now < 60_000, "meal never finished");
        }
    }

    #[test]
    fn food_spawns_inside_margins() {
        let (mut act, pet, cfg, mut rng) = setup();
        for _ in 0..200 {
            act = ActivityManager::new();
            let food = act.start_feed(&pet, &cfg, &mut rng).unwrap();
            assert!((20..cfg.field_width - cfg.food_size - 20).contains(&food.x));
            assert!((20..cfg.field_height - cfg.food_size - 20).contains(&food.y));
        }
        assert!(act.food().is_some());
    }

    #[test]
    fn meal_reduces_hunger_by_sixteen() {
        let (mut act, mut pet, cfg, mut rng) = setup();
        pet.set_hunger(50);
        act.start_feed(&pet, &cfg, &mut rng).unwrap();
        finish_meal(&mut act, &mut pet, &cfg, &mut rng);
        assert_eq!(pet.hunger(), 34);
        assert!(act.is_idle());
    }

    #[test]
    fn meal_floors_hunger_at_zero() {
        let (mut act, mut pet, cfg, mut rng) = setup();
        pet.set_hunger(10);
        act.start_feed(&pet, &cfg, &mut rng).unwrap();
        finish_meal(&mut act, &mut pet, &cfg, &mut rng);
        assert_eq!(pet.hunger(), 0);
    }

    #[test]
    fn eating_lasts_its_duration_and_bounces() {
        let (mut act, mut pet, cfg, mut rng) = setup();
        act.start_feed(&pet, &cfg, &mut rng).unwrap();
        let mut now = 0;
        while act.step(&mut pet, now, &cfg, &mut rng) != Some(SessionStep::FoodReached) {
            now += cfg.move_interval_ms;
        }
        let reached = now;
        assert!(act.pauses_decay());
        assert!(act.food().is_none(), "food is eaten once reached");

        let mut bounces = 0;
        let mut last = None;
        loop {
            now += cfg.move_interval_ms;
            match act.step(&mut pet, now, &cfg, &mut rng) {
                Some(SessionStep::Bounced { up }) => {
                    bounces += 1;
                    assert_ne!(last, Some(up), "bounce direction alternates");
                    last = Some(up);
                }
                Some(SessionStep::MealFinished) => break,
                other => panic!("unexpected step {other:?}"),
            }
        }
        assert_eq!(now - reached, cfg.eat_duration_ms + 100);
        assert!(bounces >= 6);
    }

    #[test]
    fn approach_does_not_pause_decay() {
        let (mut act, pet, cfg, mut rng) = setup();
        act.start_feed(&pet, &cfg, &mut rng).unwrap();
        assert!(!act.pauses_decay());
    }

    #[test]
    fn feed_and_play_are_exclusive() {
        let (mut act, pet, cfg, mut rng) = setup();
        act.start_feed(&pet, &cfg, &mut rng).unwrap();
        let before = *act.session();
        assert_eq!(
            act.start_play(&pet, 0, &cfg, &mut rng),
            Err(ActionRejected::FeedingInProgress)
        );
        assert_eq!(
            act.start_feed(&pet, &cfg, &mut rng),
            Err(ActionRejected::FeedingInProgress)
        );
        assert_eq!(*act.session(), before);

        let mut act = ActivityManager::new();
        act.start_play(&pet, 0, &cfg, &mut rng).unwrap();
        assert_eq!(
            act.start_feed(&pet, &cfg, &mut rng),
            Err(ActionRejected::PlayingInProgress)
        );
    }

    #[test]
    fn dead_pet_cannot_start_anything() {
        let (mut act, mut pet, cfg, mut rng) = setup();
        pet.kill();
        assert_eq!(act.start_feed(&pet, &cfg, &mut rng), Err(ActionRejected::PetDead));
        assert_eq!(act.start_play(&pet, 0, &cfg, &mut rng), Err(ActionRejected::PetDead));
        let mut pool = WastePool::new();
        assert_eq!(act.clean(&pet, &mut pool), Err(ActionRejected::PetDead));
        assert!(act.is_idle());
    }

    #[test]
    fn clean_works_mid_session() {
        let (mut act, pet, cfg, mut rng) = setup();
        let mut pool = WastePool::new();
        pool.try_spawn(Point::new(1, 1));
        act.start_play(&pet, 0, &cfg, &mut rng).unwrap();
        assert_eq!(act.clean(&pet, &mut pool), Ok(1));
        assert_eq!(pool.active_count(), 0);
    }

    #[test]
    fn play_rewards_and_caps_happiness() {
        let (mut act, mut pet, cfg, mut rng) = setup();
        pet.set_happiness(90);
        act.start_play(&pet, 1000, &cfg, &mut rng).unwrap();
        let mut now = 1000;
        let mut finished_at = None;
        while finished_at.is_none() {
            now += cfg.move_interval_ms;
            if act.step(&mut pet, now, &cfg, &mut rng) == Some(SessionStep::PlayFinished) {
                finished_at = Some(now);
            }
        }
        assert_eq!(finished_at, Some(1000 + cfg.play_timeout_ms));
        assert_eq!(pet.happiness(), 100);
        assert!(act.is_idle());
    }

    #[test]
    fn play_reward_is_twenty() {
        let (mut act, mut pet, cfg, mut rng) = setup();
        pet.set_happiness(40);
        act.start_play(&pet, 0, &cfg, &mut rng).unwrap();
        act.step(&mut pet, cfg.play_timeout_ms, &cfg, &mut rng);
        assert_eq!(pet.happiness(), 60);
    }

    #[test]
    fn friction_brings_ball_to_exact_rest() {
        let cfg = GameConfig::default();
        let mut ball = Ball::at_rest(100, 70);
        ball.vx = 4.0;
        ball.vy = -3.0;
        for _ in 0..1000 {
            ball.integrate(&cfg);
        }
        assert_eq!(ball.vx, 0.0);
        assert_eq!(ball.vy, 0.0);
        assert!(!ball.is_moving());
    }

    #[test]
    fn ball_reflects_off_walls() {
        let cfg = GameConfig::default();
        let mut ball = Ball::at_rest(1, 70);
        ball.vx = -3.0;
        ball.integrate(&cfg);
        assert_eq!(ball.x, 0.0);
        assert!(ball.vx > 0.0);
    }

    #[test]
    fn touching_ball_gets_hit_away() {
        let (_, mut pet, cfg, mut rng) = setup();
        pet.position = Point::new(100, 60);
        let c = pet.center(&cfg);
        // Ball center 10 px right of the pet center: well inside reach.
        let ball = Ball::at_rest(c.x + 10 - cfg.ball_radius, c.y - cfg.ball_radius);
        let mut playing = Playing {
            ball,
            started_ms: 0,
            last_hit_ms: None,
        };
        let bounds = FieldBounds::for_pet(&cfg);
        let step = step_playing(&mut playing, &mut pet, 500, bounds, &cfg, &mut rng);
        assert_eq!(step, SessionStep::BallHit);
        let speed = playing.ball.vx.hypot(playing.ball.vy);
        assert!((4.0..=6.0).contains(&speed), "speed {speed}");
        assert!(playing.ball.vx > 0.0, "ball flies away from the pet");
        assert_eq!(playing.last_hit_ms, Some(500));
        // Hit just happened, so the pet holds still this step.
        assert_eq!(pet.position, Point::new(100, 60));
    }

    #[test]
    fn hit_cooldown_blocks_second_hit() {
        let (_, mut pet, cfg, mut rng) = setup();
        pet.position = Point::new(100, 60);
        let c = pet.center(&cfg);
        let mut playing = Playing {
            ball: Ball::at_rest(c.x - cfg.ball_radius, c.y - cfg.ball_radius),
            started_ms: 0,
            last_hit_ms: Some(400),
        };
        let bounds = FieldBounds::for_pet(&cfg);
        let step = step_playing(&mut playing, &mut pet, 500, bounds, &cfg, &mut rng);
        assert_eq!(step, SessionStep::Moved);
        assert!(!playing.ball.is_moving());
    }

    #[test]
    fn spin_advances_only_while_moving() {
        let (_, mut pet, cfg, mut rng) = setup();
        pet.position = Point::new(0, 0);
        let bounds = FieldBounds::for_pet(&cfg);
        let mut playing = Playing {
            ball: Ball::at_rest(180, 120),
            started_ms: 0,
            last_hit_ms: Some(0),
        };
        step_playing(&mut playing, &mut pet, 100, bounds, &cfg, &mut rng);
        assert_eq!(playing.ball.spin_deg, 0.0);
        playing.ball.vx = 2.0;
        step_playing(&mut playing, &mut pet, 200, bounds, &cfg, &mut rng);
        assert_eq!(playing.ball.spin_deg, 30.0);
    }
}
