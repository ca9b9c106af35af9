//! Hardware adapter: bridges the badge peripherals to the domain ports.
//!
//! Owns the LED bar and buzzer drivers and reads the touch pads through
//! hw_init, exposing them as [`TouchPort`], [`TonePort`] and
//! [`LedBarPort`].  It also implements [`DelayNs`] so the short blocking
//! audio cues can pace themselves.  On non-espidf targets the drivers use
//! their cfg-gated simulation stubs.

use embedded_hal::delay::DelayNs;

use crate::app::ports::{LedBarPort, TonePort, TouchPort};
use crate::drivers::buzzer::ToneDriver;
use crate::drivers::hw_init;
use crate::drivers::led_bar::LedBar;
use crate::pins;
use crate::sensors::RawTouch;

/// Concrete adapter combining every badge peripheral except the panel.
pub struct BadgeHardware {
    tone: ToneDriver,
    leds: LedBar,
}

impl BadgeHardware {
    pub fn new(tone: ToneDriver, leds: LedBar) -> Self {
        Self { tone, leds }
    }

    pub fn tone(&self) -> &ToneDriver {
        &self.tone
    }
}

impl Default for BadgeHardware {
    fn default() -> Self {
        Self::new(ToneDriver::new(), LedBar::new())
    }
}

// ── TouchPort ─────────────────────────────────────────────────

impl TouchPort for BadgeHardware {
    fn read_touch(&mut self) -> RawTouch {
        RawTouch {
            q1: hw_init::touch_read(pins::Q1_TOUCH_PAD),
            q2: hw_init::touch_read(pins::Q2_TOUCH_PAD),
            q3: hw_init::touch_read(pins::Q3_TOUCH_PAD),
            center: hw_init::touch_read(pins::SELECT_TOUCH_PAD),
        }
    }
}

// ── Actuator ports ────────────────────────────────────────────

impl TonePort for BadgeHardware {
    fn start_tone(&mut self, freq_hz: u16) {
        self.tone.start(freq_hz);
    }

    fn stop_tone(&mut self) {
        self.tone.stop();
    }
}

impl LedBarPort for BadgeHardware {
    fn set_lit(&mut self, count: u8) {
        self.leds.set_lit(count);
    }
}

// ── Delay ─────────────────────────────────────────────────────

impl DelayNs for BadgeHardware {
    #[cfg(target_os = "espidf")]
    fn delay_ns(&mut self, ns: u32) {
        esp_idf_hal::delay::Ets::delay_us(ns.div_ceil(1_000));
    }

    #[cfg(target_os = "espidf")]
    fn delay_ms(&mut self, ms: u32) {
        esp_idf_hal::delay::FreeRtos::delay_ms(ms);
    }

    #[cfg(not(target_os = "espidf"))]
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }
}

#[cfg(all(test, not(target_os = "espidf")))]
mod tests {
    use super::*;

    #[test]
    fn reads_injected_pad_counts() {
        hw_init::sim_set_touch(pins::Q1_TOUCH_PAD, 410);
        hw_init::sim_set_touch(pins::Q2_TOUCH_PAD, 420);
        hw_init::sim_set_touch(pins::Q3_TOUCH_PAD, 430);
        hw_init::sim_set_touch(pins::SELECT_TOUCH_PAD, 440);

        let raw = BadgeHardware::default().read_touch();
        assert_eq!(
            raw,
            RawTouch {
                q1: 410,
                q2: 420,
                q3: 430,
                center: 440
            }
        );
    }

    #[test]
    fn tone_port_drives_ledc() {
        let mut hw = BadgeHardware::default();
        hw.start_tone(1500);
        assert_eq!(hw.tone().sounding(), Some(1500));
        hw.stop_tone();
        assert_eq!(hw.tone().sounding(), None);
    }
}
