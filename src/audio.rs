//! Buzzer sequencing.
//!
//! Two ways to make a sound:
//!
//! - **Blocking cues** (`play_blocking`, jingles): start, hold with a
//!   delay, stop.  Only used for user-triggered feedback and death.
//! - **Scheduled tones** (`play_scheduled`): start now and remember a stop
//!   deadline; [`Buzzer::service`] silences it on a later loop pass.
//!   Ambient sounds (chirps, eating bounces) always use this path.

use embedded_hal::delay::DelayNs;
use log::debug;
use rand::Rng;

use crate::app::ports::TonePort;

/// A single tone in a sequence.  `gap_ms` is silence after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Note {
    pub freq_hz: u16,
    pub ms: u16,
    pub gap_ms: u16,
}

const fn note(freq_hz: u16, ms: u16, gap_ms: u16) -> Note {
    Note { freq_hz, ms, gap_ms }
}

/// Idle chirps, picked uniformly.
pub const CHIRPS: [Note; 4] = [
    note(1500, 90, 0),
    note(1850, 80, 0),
    note(1200, 110, 0),
    note(2000, 70, 0),
];

pub const DEATH_JINGLE: [Note; 3] = [note(400, 300, 100), note(300, 300, 100), note(200, 600, 0)];

pub const BOOT_JINGLE: [Note; 3] = [note(880, 100, 0), note(988, 100, 0), note(1047, 150, 0)];

/// Eating bounce chirps: higher on the way up.
pub const BOUNCE_UP: Note = note(1200, 60, 0);
pub const BOUNCE_DOWN: Note = note(700, 60, 0);

#[derive(Debug, Default)]
pub struct Buzzer {
    stop_at_ms: Option<u64>,
}

impl Buzzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a scheduled tone is still sounding.
    pub fn is_sounding(&self) -> bool {
        self.stop_at_ms.is_some()
    }

    /// Start a tone and return immediately; [`service`](Self::service)
    /// stops it once `ms` have passed.
    pub fn play_scheduled(&mut self, port: &mut impl TonePort, freq_hz: u16, ms: u16, now_ms: u64) {
        port.start_tone(freq_hz);
        self.stop_at_ms = Some(now_ms + u64::from(ms));
    }

    /// Call once per loop pass, before anything else can start a tone.
    pub fn service(&mut self, port: &mut impl TonePort, now_ms: u64) {
        if self.stop_at_ms.is_some_and(|stop| now_ms >= stop) {
            port.stop_tone();
            self.stop_at_ms = None;
        }
    }

    /// Hold a tone for `ms`.  Cancels any scheduled tone.
    pub fn play_blocking(&mut self, hw: &mut (impl TonePort + DelayNs), freq_hz: u16, ms: u16) {
        self.stop_at_ms = None;
        hw.start_tone(freq_hz);
        hw.delay_ms(u32::from(ms));
        hw.stop_tone();
    }

    pub fn play_sequence(&mut self, hw: &mut (impl TonePort + DelayNs), notes: &[Note]) {
        for n in notes {
            self.play_blocking(hw, n.freq_hz, n.ms);
            if n.gap_ms > 0 {
                hw.delay_ms(u32::from(n.gap_ms));
            }
        }
    }

    /// One random idle chirp, non-blocking.
    pub fn chirp(&mut self, port: &mut impl TonePort, now_ms: u64, rng: &mut impl Rng) {
        let n = CHIRPS[rng.gen_range(0..CHIRPS.len())];
        debug!("audio: chirp {} Hz", n.freq_hz);
        self.play_scheduled(port, n.freq_hz, n.ms, now_ms);
    }
}
