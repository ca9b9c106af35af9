//! Mock adapters for integration tests.
//!
//! Records every tone, LED and render call so tests can assert on the
//! full history without touching real peripherals.

use badgepet::app::events::AppEvent;
use badgepet::app::ports::{EventSink, LedBarPort, RenderPort, TonePort, TouchPort};
use badgepet::pet::FrameView;
use badgepet::pet::menu::MenuSector;
use badgepet::sensors::RawTouch;
use embedded_hal::delay::DelayNs;

/// Pad baseline used by every mock; untouched pads read this.
pub const BASELINE: i32 = 1000;

// ── Tone call record ──────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneCall {
    Start(u16),
    Stop,
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub touch: RawTouch,
    pub tones: Vec<ToneCall>,
    pub led_levels: Vec<u8>,
    pub delayed_ns: u64,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            touch: Self::idle(),
            tones: Vec::new(),
            led_levels: Vec::new(),
            delayed_ns: 0,
        }
    }

    pub fn idle() -> RawTouch {
        RawTouch {
            q1: BASELINE,
            q2: BASELINE,
            q3: BASELINE,
            center: BASELINE,
        }
    }

    /// Finger on the wheel at the sector's nominal position, center up.
    pub fn touch_sector(&mut self, sector: MenuSector) {
        let mut raw = Self::idle();
        match sector {
            MenuSector::Feed => raw.q1 = 0,
            MenuSector::Clean => raw.q2 = 0,
            MenuSector::ToggleMode => raw.q3 = 0,
            MenuSector::Play => {
                raw.q1 = 0;
                raw.q2 = 0;
            }
        }
        self.touch = raw;
    }

    pub fn release(&mut self) {
        self.touch = Self::idle();
    }

    pub fn press_center(&mut self) {
        self.touch = Self::idle();
        self.touch.center = BASELINE - 100;
    }

    pub fn started_tones(&self) -> Vec<u16> {
        self.tones
            .iter()
            .filter_map(|t| match t {
                ToneCall::Start(f) => Some(*f),
                ToneCall::Stop => None,
            })
            .collect()
    }

    pub fn last_led_level(&self) -> Option<u8> {
        self.led_levels.last().copied()
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl TouchPort for MockHardware {
    fn read_touch(&mut self) -> RawTouch {
        self.touch
    }
}

impl TonePort for MockHardware {
    fn start_tone(&mut self, freq_hz: u16) {
        self.tones.push(ToneCall::Start(freq_hz));
    }

    fn stop_tone(&mut self) {
        self.tones.push(ToneCall::Stop);
    }
}

impl LedBarPort for MockHardware {
    fn set_lit(&mut self, count: u8) {
        self.led_levels.push(count);
    }
}

impl DelayNs for MockHardware {
    fn delay_ns(&mut self, ns: u32) {
        self.delayed_ns += u64::from(ns);
    }
}

// ── MockRenderer ──────────────────────────────────────────────

#[derive(Default)]
pub struct MockRenderer {
    pub frames: u32,
    pub menus: Vec<MenuSector>,
    pub deaths: u32,
    pub last_hunger: Option<u8>,
    pub last_food: Option<(i32, i32)>,
    pub ball_frames: u32,
}

impl RenderPort for MockRenderer {
    fn draw_frame(&mut self, view: &FrameView<'_>) {
        self.frames += 1;
        self.last_hunger = Some(view.pet.hunger());
        self.last_food = view.food.map(|p| (p.x, p.y));
        if view.ball.is_some() {
            self.ball_frames += 1;
        }
    }

    fn draw_menu(&mut self, selected: MenuSector) {
        self.menus.push(selected);
    }

    fn draw_death(&mut self, _view: &FrameView<'_>) {
        self.deaths += 1;
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn position(&self, pred: impl Fn(&AppEvent) -> bool) -> Option<usize> {
        self.events.iter().position(pred)
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
