//! GPIO / peripheral pin assignments for the badge.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Buzzer (passive piezo, driven by an LEDC square wave)
// ---------------------------------------------------------------------------

pub const BUZZER_GPIO: i32 = 5;
/// LEDC channel carrying the tone.
pub const BUZZER_LEDC_CHANNEL: u32 = 0;
/// LEDC timer whose frequency is retuned per note.
pub const BUZZER_LEDC_TIMER: u32 = 0;

// ---------------------------------------------------------------------------
// Capacitive touch wheel
// ---------------------------------------------------------------------------
//
// The wheel is three copper pads spaced 120° apart plus a center pad.
// Readings drop when a finger is close.

/// Center "select" pad: GPIO27 / T7.
pub const SELECT_TOUCH_PAD: u32 = 7;
/// Quadrant 1 pad (120°), GPIO13 / T4.
pub const Q1_TOUCH_PAD: u32 = 4;
/// Quadrant 2 pad (240°), GPIO12 / T5.
pub const Q2_TOUCH_PAD: u32 = 5;
/// Quadrant 3 pad (0°), GPIO14 / T6.
pub const Q3_TOUCH_PAD: u32 = 6;

// ---------------------------------------------------------------------------
// LED bar
// ---------------------------------------------------------------------------

/// Number of LEDs on the status bar.
pub const NUM_LEDS: usize = 6;
/// Bar order, first LED lights first.
pub const LED_GPIOS: [i32; NUM_LEDS] = [21, 22, 19, 17, 16, 25];

// ---------------------------------------------------------------------------
// Display (ST7789 240×240 over SPI)
// ---------------------------------------------------------------------------

// Wiring: SCLK GPIO18, MOSI GPIO23, CS GPIO15, DC GPIO2, RST GPIO4.
// esp-idf-hal hands these out as typed pins, so main takes them by name.

pub const LCD_PIXEL_CLOCK_HZ: u32 = 40_000_000;
pub const LCD_WIDTH: i32 = 240;
pub const LCD_HEIGHT: i32 = 240;
