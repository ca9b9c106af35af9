//! One-shot hardware peripheral initialization and raw register helpers.
//!
//! Configures the touch pads, LED bar GPIOs and the buzzer LEDC
//! timer/channel using raw ESP-IDF sys calls.  Called once from `main()`
//! before the game loop starts.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: every helper is a thin wrapper over the sys call.
//! On host/test: touch counts come from atomics that tests can inject,
//! outputs are recorded in atomics, and init is a no-op.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

use crate::error::HwError;
#[cfg(target_os = "espidf")]
use crate::pins;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwError> {
    // SAFETY: Called once from main() before the game loop; single-threaded.
    unsafe {
        init_touch()?;
        init_gpio_outputs()?;
        init_ledc()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── Touch pads ────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_touch() -> Result<(), HwError> {
    let ret = unsafe { touch_pad_init() };
    if ret != ESP_OK { return Err(HwError::TouchInitFailed(ret)); }

    for pad in [
        pins::SELECT_TOUCH_PAD,
        pins::Q1_TOUCH_PAD,
        pins::Q2_TOUCH_PAD,
        pins::Q3_TOUCH_PAD,
    ] {
        // Threshold 0: no interrupt, polled only.
        let ret = unsafe { touch_pad_config(pad, 0) };
        if ret != ESP_OK { return Err(HwError::TouchInitFailed(ret)); }
    }

    info!("hw_init: touch pads T4-T7 configured");
    Ok(())
}

/// Raw count for one touch pad.  A failed read reports the idle level
/// (no touch) rather than a spurious press.
#[cfg(target_os = "espidf")]
pub fn touch_read(pad: u32) -> i32 {
    let mut raw: u16 = 0;
    // SAFETY: pads were configured in init_touch(); main-loop access only.
    let ret = unsafe { touch_pad_read(pad, &mut raw) };
    if ret != ESP_OK {
        return i32::from(u16::MAX);
    }
    i32::from(raw)
}

#[cfg(not(target_os = "espidf"))]
mod sim {
    use core::sync::atomic::{AtomicI32, AtomicU32};

    /// Pad counts indexed by pad number (T0..T9).
    pub static TOUCH: [AtomicI32; 10] = [const { AtomicI32::new(600) }; 10];
    /// Bitmask of driven-high output GPIOs 0..31.
    pub static GPIO_OUT: AtomicU32 = AtomicU32::new(0);
}

#[cfg(not(target_os = "espidf"))]
pub fn touch_read(pad: u32) -> i32 {
    use core::sync::atomic::Ordering;
    sim::TOUCH
        .get(pad as usize)
        .map_or(0, |a| a.load(Ordering::Relaxed))
}

/// Inject a raw pad count for host tests.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_touch(pad: u32, raw: i32) {
    use core::sync::atomic::Ordering;
    if let Some(a) = sim::TOUCH.get(pad as usize) {
        a.store(raw, Ordering::Relaxed);
    }
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwError> {
    for &pin in &pins::LED_GPIOS {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK { return Err(HwError::GpioConfigFailed(ret)); }
        unsafe { gpio_set_level(pin, 0) };
    }

    info!("hw_init: LED bar GPIOs configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_gpio_outputs(). Main-loop only.
    unsafe { gpio_set_level(pin, u32::from(high)); }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(pin: i32, high: bool) {
    use core::sync::atomic::Ordering;
    if !(0..32).contains(&pin) {
        return;
    }
    let bit = 1u32 << pin;
    if high {
        sim::GPIO_OUT.fetch_or(bit, Ordering::Relaxed);
    } else {
        sim::GPIO_OUT.fetch_and(!bit, Ordering::Relaxed);
    }
}

/// Level last written to an output pin (host only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_gpio_level(pin: i32) -> bool {
    use core::sync::atomic::Ordering;
    (0..32).contains(&pin) && sim::GPIO_OUT.load(Ordering::Relaxed) & (1u32 << pin) != 0
}

// ── LEDC buzzer ───────────────────────────────────────────────

/// 50 % duty at 10-bit resolution.
#[cfg(target_os = "espidf")]
const TONE_DUTY: u32 = 512;

#[cfg(target_os = "espidf")]
unsafe fn init_ledc() -> Result<(), HwError> {
    let timer = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: pins::BUZZER_LEDC_TIMER,
        duty_resolution: ledc_timer_bit_t_LEDC_TIMER_10_BIT,
        freq_hz: 2000,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    // SAFETY: Called from single main-task context via init_peripherals().
    let ret = unsafe { ledc_timer_config(&timer) };
    if ret != ESP_OK { return Err(HwError::LedcInitFailed(ret)); }

    let ret = unsafe { ledc_channel_config(&ledc_channel_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        channel: pins::BUZZER_LEDC_CHANNEL,
        timer_sel: pins::BUZZER_LEDC_TIMER,
        gpio_num: pins::BUZZER_GPIO,
        duty: 0,
        hpoint: 0,
        ..Default::default()
    }) };
    if ret != ESP_OK { return Err(HwError::LedcInitFailed(ret)); }

    info!("hw_init: LEDC buzzer configured (timer0/ch0)");
    Ok(())
}

/// Retune the buzzer timer and drive a square wave.
#[cfg(target_os = "espidf")]
pub fn ledc_tone(freq_hz: u32) {
    // SAFETY: LEDC timer/channel were configured in init_ledc(); only the
    // main loop touches them.
    unsafe {
        ledc_set_freq(ledc_mode_t_LEDC_LOW_SPEED_MODE, pins::BUZZER_LEDC_TIMER, freq_hz);
        ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, pins::BUZZER_LEDC_CHANNEL, TONE_DUTY);
        ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, pins::BUZZER_LEDC_CHANNEL);
    }
}

#[cfg(target_os = "espidf")]
pub fn ledc_silence() {
    // SAFETY: see ledc_tone().
    unsafe {
        ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, pins::BUZZER_LEDC_CHANNEL, 0);
        ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, pins::BUZZER_LEDC_CHANNEL);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_tone(freq_hz: u32) {
    log::trace!("ledc(sim): {freq_hz} Hz");
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_silence() {
    log::trace!("ledc(sim): silent");
}

// ── Random seed ───────────────────────────────────────────────

/// Seed for the game PRNG from the hardware RNG.
#[cfg(target_os = "espidf")]
pub fn random_seed() -> u64 {
    // SAFETY: esp_random is always callable; entropy is best with RF on,
    // which is fine for a game.
    let (hi, lo) = unsafe { (esp_random(), esp_random()) };
    (u64::from(hi) << 32) | u64::from(lo)
}

#[cfg(not(target_os = "espidf"))]
pub fn random_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos() as u64)
}
