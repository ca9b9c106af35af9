//! Game service: the hexagonal core.
//!
//! [`GameService`] owns the simulation state, the cadence set, the touch
//! interpreter, the buzzer sequencer and the random source.  All I/O
//! flows through port traits injected at call sites, making the entire
//! game testable with mock adapters.
//!
//! ```text
//!    TouchPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                  │      GameService       │
//!  TonePort    ◀── │ menu · vitals · waste  │ ──▶ RenderPort
//!  LedBarPort  ◀── │ activity · movement    │
//!                  └────────────────────────┘
//! ```
//!
//! One call to [`GameService::tick`] is one pass of the cooperative loop:
//!
//! 1. service the scheduled tone
//! 2. touch → menu selection → menu bar redraw
//! 3. center press edge → action dispatch
//! 4. vitals cadence (decay + death watch)
//! 5. waste cadence
//! 6. idle chirp cadence
//! 7. frame cadence: movement gate, LED bar, full redraw
//!
//! Once the pet is dead only step 1 runs; the death screen is drawn once.

use embedded_hal::delay::DelayNs;
use log::{info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::audio::{BOUNCE_DOWN, BOUNCE_UP, Buzzer, DEATH_JINGLE};
use crate::config::GameConfig;
use crate::error::{ActionRejected, ConfigError};
use crate::pet::activity::SessionStep;
use crate::pet::movement;
use crate::pet::state::{FieldBounds, MovementMode};
use crate::pet::vitals;
use crate::pet::waste;
use crate::pet::SimState;
use crate::scheduler::Cadences;
use crate::sensors::touch_wheel::TouchWheel;

use super::commands::MenuAction;
use super::events::{AppEvent, SessionKind, VitalsSnapshot};
use super::ports::{EventSink, LedBarPort, RenderPort, TonePort, TouchPort};

// ───────────────────────────────────────────────────────────────
// GameService
// ───────────────────────────────────────────────────────────────

pub struct GameService {
    config: GameConfig,
    sim: SimState,
    cadences: Cadences,
    touch: TouchWheel,
    buzzer: Buzzer,
    rng: SmallRng,
    /// The death screen has been drawn and the jingle played.
    death_presented: bool,
    tick_count: u64,
}

impl GameService {
    /// Construct the service.  Cadences are anchored at `now_ms`.
    ///
    /// Rejects a configuration that fails [`GameConfig::validate`].
    pub fn new(
        config: GameConfig,
        touch: TouchWheel,
        seed: u64,
        now_ms: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if !config.death_predicate_reachable() {
            warn!(
                "decay steps {}/{} do not divide 100; the death watch may never trigger",
                config.hunger_decay, config.happiness_decay
            );
        }
        Ok(Self {
            sim: SimState::new(&config),
            cadences: Cadences::new(&config, now_ms),
            touch,
            buzzer: Buzzer::new(),
            rng: SmallRng::seed_from_u64(seed),
            death_presented: false,
            tick_count: 0,
            config,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        let pet = &self.sim.pet;
        sink.emit(&AppEvent::Started {
            hunger: pet.hunger(),
            happiness: pet.happiness(),
        });
        info!(
            "GameService started: hunger={} happiness={}",
            pet.hunger(),
            pet.happiness()
        );
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one loop pass.
    ///
    /// `hw` satisfies every hardware port plus [`DelayNs`] for the short
    /// blocking cues; this avoids a double mutable borrow while keeping
    /// the port boundary explicit.
    pub fn tick(
        &mut self,
        now_ms: u64,
        hw: &mut (impl TouchPort + TonePort + LedBarPort + DelayNs),
        render: &mut impl RenderPort,
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;
        self.buzzer.service(hw, now_ms);

        if !self.sim.pet.is_alive() {
            self.present_death(hw, render);
            return;
        }

        // 1. Touch and menu
        let reading = self.touch.sample(hw.read_touch());
        if let Some(angle) = reading.wheel_angle {
            if self.sim.menu.select_from_angle(angle) {
                sink.emit(&AppEvent::MenuChanged(self.sim.menu.current()));
            }
        }
        if let Some(sector) = self.sim.menu.take_redraw() {
            render.draw_menu(sector);
        }
        if self.sim.menu.press_edge(reading.center_pressed) {
            let action = self.sim.menu.current().action();
            self.dispatch(action, now_ms, hw, sink);
        }

        // 2. Vitals
        if self.cadences.vitals.poll(now_ms) {
            let paused = self.sim.activity.pauses_decay();
            let out = vitals::decay_tick(&mut self.sim.pet, paused, &self.config);
            sink.emit(&AppEvent::VitalsTick(VitalsSnapshot {
                hunger: self.sim.pet.hunger(),
                happiness: self.sim.pet.happiness(),
                bad_ticks: out.bad_ticks,
                decayed: out.decayed,
                waste: self.sim.waste.active_count(),
            }));
            if out.died {
                hw.set_lit(0);
                sink.emit(&AppEvent::Died);
                self.present_death(hw, render);
                return;
            }
        }

        // 3. Waste
        if self.cadences.waste.poll(now_ms) {
            match waste::check(&mut self.sim.waste, &self.sim.pet, &self.config) {
                Some(true) => sink.emit(&AppEvent::WasteSpawned(self.sim.pet.position)),
                Some(false) => sink.emit(&AppEvent::WasteDropped),
                None => {}
            }
        }

        // 4. Idle chirp
        if self.sim.activity.is_idle()
            && self.cadences.chirp.poll(now_ms)
            && self.rng.gen_range(0..100u8) < self.config.chirp_chance_percent
        {
            self.buzzer.chirp(hw, now_ms, &mut self.rng);
        }

        // 5. Frame
        if self.cadences.frame.poll(now_ms) {
            if self.cadences.movement.poll(now_ms) {
                self.step_movement(now_ms, hw, sink);
            }
            hw.set_lit(self.sim.pet.led_level());
            render.draw_frame(&self.sim.view());
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn sim(&self) -> &SimState {
        &self.sim
    }

    /// Mutable access to the simulation, for tests and bring-up tooling.
    pub fn sim_mut(&mut self) -> &mut SimState {
        &mut self.sim
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_dead(&self) -> bool {
        !self.sim.pet.is_alive()
    }

    /// Total loop passes since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // ── Internal ──────────────────────────────────────────────

    fn dispatch(
        &mut self,
        action: MenuAction,
        now_ms: u64,
        hw: &mut (impl TonePort + DelayNs),
        sink: &mut impl EventSink,
    ) {
        let sim = &mut self.sim;
        let result: Result<(), ActionRejected> = match action {
            MenuAction::Feed => sim
                .activity
                .start_feed(&sim.pet, &self.config, &mut self.rng)
                .map(drop),
            MenuAction::Play => sim
                .activity
                .start_play(&sim.pet, now_ms, &self.config, &mut self.rng)
                .map(drop),
            MenuAction::Clean => sim
                .activity
                .clean(&sim.pet, &mut sim.waste)
                .map(|n| sink.emit(&AppEvent::WasteCleared(n))),
            MenuAction::ToggleMode => {
                sim.pet.mode = sim.pet.mode.toggled();
                if sim.pet.mode == MovementMode::DvdBounce {
                    sim.pet.dvd_velocity = self.config.dvd_velocity;
                }
                sink.emit(&AppEvent::ModeToggled(sim.pet.mode));
                Ok(())
            }
        };

        match result {
            Ok(()) => {
                info!("action {} accepted", action.name());
                sink.emit(&AppEvent::ActionStarted(action));
                self.buzzer.play_blocking(
                    hw,
                    self.config.select_tone_hz,
                    self.config.select_tone_ms,
                );
            }
            Err(reason) => {
                warn!("action {} rejected: {}", action.name(), reason);
                sink.emit(&AppEvent::ActionRejected(action, reason));
            }
        }
    }

    /// One gated movement step: the active session, or free locomotion.
    fn step_movement(&mut self, now_ms: u64, hw: &mut impl TonePort, sink: &mut impl EventSink) {
        let pet = &mut self.sim.pet;
        let step = self
            .sim
            .activity
            .step(pet, now_ms, &self.config, &mut self.rng);

        match step {
            None => {
                let bounds = FieldBounds::for_pet(&self.config);
                match pet.mode {
                    MovementMode::Wander => {
                        pet.position =
                            movement::wander(pet.position, bounds, &self.config, &mut self.rng);
                    }
                    MovementMode::DvdBounce => {
                        let (p, v) = movement::dvd_bounce(pet.position, pet.dvd_velocity, bounds);
                        pet.position = p;
                        pet.dvd_velocity = v;
                    }
                }
            }
            Some(SessionStep::FoodReached) => sink.emit(&AppEvent::FoodReached),
            Some(SessionStep::Bounced { up }) => {
                let n = if up { BOUNCE_UP } else { BOUNCE_DOWN };
                self.buzzer.play_scheduled(hw, n.freq_hz, n.ms, now_ms);
            }
            Some(SessionStep::MealFinished) => {
                sink.emit(&AppEvent::SessionEnded(SessionKind::Meal));
            }
            Some(SessionStep::PlayFinished) => {
                sink.emit(&AppEvent::SessionEnded(SessionKind::Play));
            }
            Some(SessionStep::Moved | SessionStep::Chewing | SessionStep::BallHit) => {}
        }
    }

    fn present_death(&mut self, hw: &mut (impl TonePort + DelayNs), render: &mut impl RenderPort) {
        if self.death_presented {
            return;
        }
        self.death_presented = true;
        info!("pet is dead; game frozen");
        render.draw_death(&self.sim.view());
        self.buzzer.play_sequence(hw, &DEATH_JINGLE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::touch_wheel::TouchCalibration;

    fn touch() -> TouchWheel {
        let cal = TouchCalibration {
            q1: 500,
            q2: 500,
            q3: 500,
            center: 500,
        };
        TouchWheel::new(cal, &GameConfig::default())
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = GameConfig {
            frame_interval_ms: 0,
            ..GameConfig::default()
        };
        assert!(GameService::new(config, touch(), 1, 0).is_err());
    }

    #[test]
    fn fresh_service_is_alive_and_idle() {
        let svc = GameService::new(GameConfig::default(), touch(), 1, 0).unwrap();
        assert!(!svc.is_dead());
        assert!(svc.sim().activity.is_idle());
        assert_eq!(svc.tick_count(), 0);
    }
}
