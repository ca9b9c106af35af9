//! Badgepet firmware: main entry point.
//!
//! Hexagonal architecture with a single cooperative game loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  BadgeHardware        Renderer<Panel>   LogEventSink           │
//! │  (Touch+Tone+LedBar)  (RenderPort)      (EventSink)            │
//! │  MonotonicClock                                                │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              GameService (pure logic)                  │    │
//! │  │  Menu · Vitals · Activity · Movement · Waste           │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Cadences (accumulating / resetting deadlines)                 │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{AnyIOPin, PinDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::spi::config::Config as SpiConfig;
use esp_idf_hal::spi::{SpiDeviceDriver, SpiDriverConfig};
use esp_idf_hal::units::Hertz;
use log::info;

use badgepet::adapters::hardware::BadgeHardware;
use badgepet::adapters::log_sink::LogEventSink;
use badgepet::adapters::time::MonotonicClock;
use badgepet::app::ports::ClockPort;
use badgepet::app::service::GameService;
use badgepet::audio::{BOOT_JINGLE, Buzzer};
use badgepet::config::GameConfig;
use badgepet::drivers::hw_init;
use badgepet::drivers::panel::Panel;
use badgepet::drivers::watchdog::{LOOP_STALL_MS, Watchdog};
use badgepet::pins;
use badgepet::render::Renderer;
use badgepet::sensors::touch_wheel::TouchWheel;

/// Yield between loop passes so the idle task can run.
const LOOP_YIELD_MS: u32 = 5;
/// How long the splash stays up after the jingle.
const SPLASH_HOLD_MS: u32 = 800;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Badgepet v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = match option_env!("BADGEPET_TUNING") {
        Some(json) => {
            info!("Using tuning baked in at build time");
            GameConfig::from_json(json)?
        }
        None => GameConfig::default(),
    };

    // ── 2. Peripherals ────────────────────────────────────────
    hw_init::init_peripherals()?;
    let mut hw = BadgeHardware::default();

    let p = Peripherals::take()?;
    let spi = SpiDeviceDriver::new_single(
        p.spi2,
        p.pins.gpio18,
        p.pins.gpio23,
        Option::<AnyIOPin>::None,
        Some(p.pins.gpio15),
        &SpiDriverConfig::new(),
        &SpiConfig::new().baudrate(Hertz(pins::LCD_PIXEL_CLOCK_HZ)),
    )?;
    let dc = PinDriver::output(p.pins.gpio2)?;
    let rst = PinDriver::output(p.pins.gpio4)?;
    let mut panel = Panel::new(
        spi,
        dc,
        rst,
        pins::LCD_WIDTH as u32,
        pins::LCD_HEIGHT as u32,
    );
    panel.init(&mut FreeRtos)?;
    let mut renderer = Renderer::new(panel, &config);

    // ── 3. Touch calibration (finger off the wheel) ───────────
    let touch = TouchWheel::calibrate(&mut hw, &mut FreeRtos, &config);

    renderer.draw_splash();
    Buzzer::new().play_sequence(&mut hw, &BOOT_JINGLE);
    FreeRtos::delay_ms(SPLASH_HOLD_MS);

    // ── 4. Game service (cadences anchored after the splash) ──
    let clock = MonotonicClock::new();
    let mut sink = LogEventSink::new();
    let mut service = GameService::new(config, touch, hw_init::random_seed(), clock.now_ms())?;

    let mut watchdog = Watchdog::arm(LOOP_STALL_MS)?;
    service.start(&mut sink);

    // ── 5. Game loop ──────────────────────────────────────────
    loop {
        service.tick(clock.now_ms(), &mut hw, &mut renderer, &mut sink);
        watchdog.feed();
        FreeRtos::delay_ms(LOOP_YIELD_MS);
    }
}
