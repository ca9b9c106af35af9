//! Integration tests for the GameService → ports pipeline.
//!
//! These run on the host and drive the full loop (touch → menu → action →
//! session → vitals → render) with mock adapters and a simulated clock.

use crate::mock_hw::{BASELINE, MockHardware, MockRenderer, RecordingSink};

use badgepet::app::commands::MenuAction;
use badgepet::app::events::{AppEvent, SessionKind};
use badgepet::app::service::GameService;
use badgepet::config::GameConfig;
use badgepet::error::ActionRejected;
use badgepet::pet::menu::MenuSector;
use badgepet::pet::state::MovementMode;
use badgepet::sensors::touch_wheel::{TouchCalibration, TouchWheel};

const STEP_MS: u64 = 50;

struct Rig {
    app: GameService,
    hw: MockHardware,
    render: MockRenderer,
    sink: RecordingSink,
    now: u64,
}

impl Rig {
    fn new() -> Self {
        let config = GameConfig::default();
        let cal = TouchCalibration {
            q1: BASELINE,
            q2: BASELINE,
            q3: BASELINE,
            center: BASELINE,
        };
        let touch = TouchWheel::new(cal, &config);
        let mut app = GameService::new(config, touch, 7, 0).unwrap();
        let mut sink = RecordingSink::new();
        app.start(&mut sink);
        Self {
            app,
            hw: MockHardware::new(),
            render: MockRenderer::default(),
            sink,
            now: 0,
        }
    }

    fn tick(&mut self) {
        self.app
            .tick(self.now, &mut self.hw, &mut self.render, &mut self.sink);
        self.now += STEP_MS;
    }

    fn run_until(&mut self, ms: u64) {
        while self.now <= ms {
            self.tick();
        }
    }

    /// Move to a sector, release, then press and release the center.
    fn choose(&mut self, sector: MenuSector) {
        self.hw.touch_sector(sector);
        self.tick();
        self.tick();
        self.hw.press_center();
        self.tick();
        self.tick();
        self.hw.release();
        self.tick();
    }
}

// ── Start-up ──────────────────────────────────────────────────

#[test]
fn start_emits_boot_vitals() {
    let rig = Rig::new();
    assert_eq!(
        rig.sink.events.first(),
        Some(&AppEvent::Started {
            hunger: 20,
            happiness: 100
        })
    );
}

#[test]
fn frames_follow_the_frame_cadence() {
    let mut rig = Rig::new();
    rig.run_until(1_000);
    // 100 ms cadence, first fire at 100 ms.
    assert_eq!(rig.render.frames, 10);
    assert_eq!(rig.hw.last_led_level(), Some(5), "hunger 20 lights five LEDs");
}

// ── Menu ──────────────────────────────────────────────────────

#[test]
fn menu_bar_redraws_once_per_sector_change() {
    let mut rig = Rig::new();
    rig.tick();
    assert_eq!(rig.render.menus, vec![MenuSector::Feed]);

    rig.hw.touch_sector(MenuSector::Play);
    for _ in 0..10 {
        rig.tick();
    }
    assert_eq!(rig.render.menus, vec![MenuSector::Feed, MenuSector::Play]);
    assert_eq!(
        rig.sink
            .count(|e| *e == AppEvent::MenuChanged(MenuSector::Play)),
        1
    );

    rig.hw.release();
    rig.tick();
    assert_eq!(rig.render.menus.len(), 2, "lifting the finger keeps the selection");
}

#[test]
fn held_center_press_fires_once() {
    let mut rig = Rig::new();
    rig.hw.press_center();
    for _ in 0..20 {
        rig.tick();
    }
    assert_eq!(
        rig.sink
            .count(|e| matches!(e, AppEvent::ActionStarted(_))),
        1
    );
}

// ── Feed ──────────────────────────────────────────────────────

#[test]
fn feed_walks_to_food_eats_and_finishes() {
    let mut rig = Rig::new();
    rig.choose(MenuSector::Feed);

    assert_eq!(
        rig.sink
            .count(|e| *e == AppEvent::ActionStarted(MenuAction::Feed)),
        1
    );
    assert!(rig.hw.started_tones().contains(&2000), "select cue plays");
    assert!(!rig.app.sim().activity.is_idle());
    assert!(rig.app.sim().activity.food().is_some());

    rig.run_until(20_000);

    let reached = rig.sink.position(|e| *e == AppEvent::FoodReached);
    let ended = rig
        .sink
        .position(|e| *e == AppEvent::SessionEnded(SessionKind::Meal));
    assert!(reached.is_some() && ended.is_some());
    assert!(reached < ended);
    assert!(rig.app.sim().activity.is_idle());

    let tones = rig.hw.started_tones();
    assert!(tones.contains(&1200), "bounce up cue");
    assert!(tones.contains(&700), "bounce down cue");
}

#[test]
fn second_session_is_rejected_while_feeding() {
    let mut rig = Rig::new();
    rig.choose(MenuSector::Feed);
    rig.choose(MenuSector::Play);

    assert_eq!(
        rig.sink.count(|e| *e
            == AppEvent::ActionRejected(MenuAction::Play, ActionRejected::FeedingInProgress)),
        1
    );
    assert!(rig.app.sim().activity.ball().is_none());
}

// ── Play ──────────────────────────────────────────────────────

#[test]
fn play_session_times_out_and_rewards() {
    let mut rig = Rig::new();
    rig.app.sim_mut().pet.set_happiness(40);
    rig.choose(MenuSector::Play);
    assert!(rig.app.sim().activity.ball().is_some());

    rig.run_until(9_000);

    assert_eq!(
        rig.sink
            .count(|e| *e == AppEvent::SessionEnded(SessionKind::Play)),
        1
    );
    assert!(rig.render.ball_frames > 0);
    assert!(rig.app.sim().activity.is_idle());
    // Decay paused during play, then +20.
    assert_eq!(rig.app.sim().pet.happiness(), 60);
}

// ── Clean / waste ─────────────────────────────────────────────

#[test]
fn poor_vitals_spawn_waste_and_clean_clears_it() {
    let mut rig = Rig::new();
    rig.app.sim_mut().pet.set_hunger(90);
    rig.run_until(6_000);

    assert!(
        rig.sink
            .count(|e| matches!(e, AppEvent::WasteSpawned(_)))
            >= 1
    );
    let before = rig.app.sim().waste.active_count();
    assert!(before >= 1);

    rig.choose(MenuSector::Clean);
    assert_eq!(rig.app.sim().waste.active_count(), 0);
    assert!(rig.sink.events.contains(&AppEvent::WasteCleared(before)));
}

// ── Mode toggle ───────────────────────────────────────────────

#[test]
fn toggle_switches_to_dvd_bounce_and_back() {
    let mut rig = Rig::new();
    rig.choose(MenuSector::ToggleMode);
    assert_eq!(rig.app.sim().pet.mode, MovementMode::DvdBounce);
    assert!(
        rig.sink
            .events
            .contains(&AppEvent::ModeToggled(MovementMode::DvdBounce))
    );

    let start = rig.app.sim().pet.position;
    rig.run_until(rig.now + 1_000);
    assert_ne!(rig.app.sim().pet.position, start, "bouncing pet moves");

    rig.choose(MenuSector::ToggleMode);
    assert_eq!(rig.app.sim().pet.mode, MovementMode::Wander);
}

// ── Death ─────────────────────────────────────────────────────

#[test]
fn death_presents_once_and_freezes_the_game() {
    let mut rig = Rig::new();
    rig.app.sim_mut().pet.set_hunger(100);
    rig.app.sim_mut().pet.set_happiness(0);

    // Five bad vitals ticks at 5 s spacing.
    rig.run_until(26_000);
    assert!(rig.app.is_dead());
    assert_eq!(rig.sink.count(|e| *e == AppEvent::Died), 1);
    assert_eq!(rig.render.deaths, 1);
    assert_eq!(rig.hw.last_led_level(), Some(0));

    let tones = rig.hw.started_tones();
    let jingle = [400, 300, 200];
    assert!(tones.windows(3).any(|w| w == jingle), "death jingle plays");

    let frames = rig.render.frames;
    let events = rig.sink.events.len();
    let pet = rig.app.sim().pet.clone();

    rig.choose(MenuSector::Feed);
    rig.run_until(60_000);

    assert_eq!(rig.render.deaths, 1, "death screen drawn once");
    assert_eq!(rig.render.frames, frames, "no frames after death");
    assert_eq!(rig.sink.events.len(), events, "no events after death");
    assert_eq!(rig.app.sim().pet.position, pet.position);
    assert_eq!(rig.app.sim().pet.hunger(), pet.hunger());
    assert_eq!(rig.app.sim().pet.happiness(), pet.happiness());
    assert!(rig.app.sim().activity.is_idle());
}
