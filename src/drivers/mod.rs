//! Badge peripheral drivers and one-shot hardware initialisation.

pub mod buzzer;
pub mod hw_init;
pub mod led_bar;
pub mod panel;
pub mod watchdog;
