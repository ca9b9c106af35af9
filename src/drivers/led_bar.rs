//! Six-LED status bar.
//!
//! The bar is a level meter: `set_lit(n)` lights LEDs `0..n` in bar
//! order and turns the rest off.  Writes are skipped when the level has
//! not changed, so calling it every frame costs nothing.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the GPIOs configured in hw_init.
//! On host/test: hw_init records levels in an atomic bitmask.

use crate::drivers::hw_init;
use crate::pins::{LED_GPIOS, NUM_LEDS};

pub struct LedBar {
    lit: Option<u8>,
}

impl Default for LedBar {
    fn default() -> Self {
        Self::new()
    }
}

impl LedBar {
    pub fn new() -> Self {
        Self { lit: None }
    }

    pub fn set_lit(&mut self, count: u8) {
        let count = count.min(NUM_LEDS as u8);
        if self.lit == Some(count) {
            return;
        }
        for (i, &pin) in LED_GPIOS.iter().enumerate() {
            hw_init::gpio_write(pin, i < usize::from(count));
        }
        self.lit = Some(count);
    }

    pub fn off(&mut self) {
        self.set_lit(0);
    }

    /// LEDs currently lit (0 before the first write).
    pub fn lit(&self) -> u8 {
        self.lit.unwrap_or(0)
    }
}
