//! GameService driving the real renderer into an off-screen framebuffer.

use crate::mock_hw::{BASELINE, MockHardware, RecordingSink};

use badgepet::app::service::GameService;
use badgepet::config::GameConfig;
use badgepet::render::{FrameBuffer, Renderer};
use badgepet::sensors::touch_wheel::{TouchCalibration, TouchWheel};
use embedded_graphics::pixelcolor::{Rgb565, RgbColor, WebColors};
use embedded_graphics::prelude::Point;

fn service(config: &GameConfig) -> GameService {
    let cal = TouchCalibration {
        q1: BASELINE,
        q2: BASELINE,
        q3: BASELINE,
        center: BASELINE,
    };
    GameService::new(config.clone(), TouchWheel::new(cal, config), 3, 0).unwrap()
}

#[test]
fn live_game_paints_menu_and_frames() {
    let config = GameConfig::default();
    let mut app = service(&config);
    let mut renderer = Renderer::new(FrameBuffer::new(240, 240), &config);
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    for now in (0..=1_000).step_by(50) {
        app.tick(now, &mut hw, &mut renderer, &mut sink);
    }

    assert_eq!(renderer.frames(), 10);
    // Feed is selected at boot: leftmost button highlighted.
    assert_eq!(renderer.screen().pixel(Point::new(2, 202)), Some(Rgb565::YELLOW));
    assert_eq!(renderer.screen().pixel(Point::new(82, 202)), Some(Rgb565::WHITE));
}

#[test]
fn dead_pet_leaves_the_grave_on_screen() {
    let config = GameConfig::default();
    let mut app = service(&config);
    app.sim_mut().pet.set_hunger(100);
    app.sim_mut().pet.set_happiness(0);
    let mut renderer = Renderer::new(FrameBuffer::new(240, 240), &config);
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    for now in (0..=40_000).step_by(50) {
        app.tick(now, &mut hw, &mut renderer, &mut sink);
    }

    assert!(app.is_dead());
    assert_eq!(
        renderer.screen().pixel(Point::new(120, 139)),
        Some(Rgb565::CSS_DARK_GRAY)
    );
}
