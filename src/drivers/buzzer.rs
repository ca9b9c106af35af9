//! Passive piezo buzzer on one LEDC channel.
//!
//! The driver only starts and stops a square wave; note timing lives in
//! [`crate::audio::Buzzer`].

use log::debug;

use crate::drivers::hw_init;

/// Lowest frequency the 10-bit LEDC timer can produce from the APB clock.
const MIN_FREQ_HZ: u16 = 100;

pub struct ToneDriver {
    sounding: Option<u16>,
}

impl Default for ToneDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl ToneDriver {
    pub fn new() -> Self {
        Self { sounding: None }
    }

    pub fn start(&mut self, freq_hz: u16) {
        if freq_hz < MIN_FREQ_HZ {
            debug!("buzzer: {freq_hz} Hz below range, silencing");
            self.stop();
            return;
        }
        hw_init::ledc_tone(u32::from(freq_hz));
        self.sounding = Some(freq_hz);
    }

    pub fn stop(&mut self) {
        if self.sounding.take().is_some() {
            hw_init::ledc_silence();
        }
    }

    pub fn sounding(&self) -> Option<u16> {
        self.sounding
    }
}
