//! Fuzz target: `TouchWheel::sample`
//!
//! Drives arbitrary pad-count sequences through the touch interpreter
//! and the menu controller, asserting that angles stay in `[0, 360)` and
//! a held press never fires twice.
//!
//! cargo fuzz run fuzz_touch_wheel

#![no_main]

use badgepet::config::GameConfig;
use badgepet::pet::menu::MenuController;
use badgepet::sensors::RawTouch;
use badgepet::sensors::touch_wheel::{TouchCalibration, TouchWheel};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let config = GameConfig::default();
    let cal = TouchCalibration {
        q1: 600,
        q2: 600,
        q3: 600,
        center: 600,
    };
    let mut wheel = TouchWheel::new(cal, &config);
    let mut menu = MenuController::new();
    let mut held = false;

    // Eight bytes per sample: four little-endian u16 pad counts.
    for chunk in data.chunks_exact(8) {
        let pad = |i: usize| i32::from(u16::from_le_bytes([chunk[i], chunk[i + 1]]));
        let reading = wheel.sample(RawTouch {
            q1: pad(0),
            q2: pad(2),
            q3: pad(4),
            center: pad(6),
        });

        if let Some(angle) = reading.wheel_angle {
            assert!((0.0..360.0).contains(&angle), "angle {angle} out of range");
            menu.select_from_angle(angle);
        }

        let fired = menu.press_edge(reading.center_pressed);
        assert!(!(fired && held), "held press fired twice");
        held = reading.center_pressed;
    }
});
