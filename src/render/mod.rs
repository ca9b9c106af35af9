//! Drawing of the HUD, play field, menu bar and death screen.
//!
//! ```text
//!   y   0 ┌──────────────────────────┐
//!         │ ♥♥♥♥♥              :)    │  HUD, drawn on the screen
//!   y  20 ├──────────────────────────┤
//!         │                          │  play field, composed in a
//!         │        pet / food /      │  FrameBuffer then pushed
//!         │        ball / waste      │
//!   y 199 ├────────┬────────┬────────┤
//!         │  Feed  │  Play  │ Clean  │  menu bar, redrawn on change
//!   y 240 └────────┴────────┴────────┘
//! ```
//!
//! Both the screen and the off-screen field are plain
//! `DrawTarget<Color = Rgb565>` surfaces; every helper here is generic
//! over that capability.

pub mod framebuffer;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_10X20};
use embedded_graphics::pixelcolor::{Rgb565, RgbColor, WebColors};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Arc, Circle, Line, PrimitiveStyle, Rectangle, RoundedRectangle, Triangle,
};
use embedded_graphics::text::{Alignment, Text};

pub use framebuffer::FrameBuffer;

use crate::app::ports::RenderPort;
use crate::config::GameConfig;
use crate::pet::FrameView;
use crate::pet::activity::Ball;
use crate::pet::menu::MenuSector;
use crate::pet::state::Mood;

const HUD_HEARTS: u8 = 5;
const WASTE_SIZE: u32 = 16;
const BALL_SLICES: [Rgb565; 4] = [Rgb565::RED, Rgb565::YELLOW, Rgb565::BLUE, Rgb565::GREEN];

#[derive(Debug, Clone, Copy)]
struct Layout {
    field_y: i32,
    pet: Size,
    food: u32,
    ball_radius: i32,
    menu_y: i32,
    menu_h: u32,
    screen_w: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Face {
    Happy,
    Sad,
    Dead,
}

/// Concrete [`RenderPort`] over any RGB565 screen.
pub struct Renderer<D> {
    screen: D,
    field: FrameBuffer,
    layout: Layout,
    frames: u32,
}

impl<D> Renderer<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(screen: D, config: &GameConfig) -> Self {
        let screen_size = screen.bounding_box().size;
        let menu_y = config.field_y + config.field_height;
        let layout = Layout {
            field_y: config.field_y,
            pet: Size::new(config.pet_width as u32, config.pet_height as u32),
            food: config.food_size as u32,
            ball_radius: config.ball_radius,
            menu_y,
            menu_h: (screen_size.height as i32 - menu_y).max(0) as u32,
            screen_w: screen_size.width,
        };
        Self {
            screen,
            field: FrameBuffer::new(config.field_width as u32, config.field_height as u32),
            layout,
            frames: 0,
        }
    }

    pub fn screen(&self) -> &D {
        &self.screen
    }

    pub fn into_inner(self) -> D {
        self.screen
    }

    /// Full frames pushed so far.
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Title and short instructions shown before the game starts.
    pub fn draw_splash(&mut self) {
        let _ = self.screen.clear(Rgb565::BLACK);
        let mid = self.layout.screen_w as i32 / 2;
        let title = MonoTextStyle::new(&FONT_10X20, Rgb565::YELLOW);
        let body = MonoTextStyle::new(&FONT_6X10, Rgb565::WHITE);
        let _ = Text::with_alignment("BADGEPET", Point::new(mid, 60), title, Alignment::Center)
            .draw(&mut self.screen);
        for (i, line) in ["Slide the wheel to pick", "Tap the center to do it", "Keep your pet happy!"]
            .iter()
            .enumerate()
        {
            let y = 110 + i as i32 * 16;
            let _ = Text::with_alignment(line, Point::new(mid, y), body, Alignment::Center)
                .draw(&mut self.screen);
        }
    }

    fn compose_field(&mut self, view: &FrameView<'_>, face: Face) {
        let l = self.layout;
        let field = &mut self.field;
        let _ = field.clear(Rgb565::BLACK);

        for marker in view.waste.active() {
            draw_waste(field, Point::new(marker.position.x, marker.position.y));
        }
        let pos = view.pet.position;
        draw_pet(field, Point::new(pos.x, pos.y), l.pet, face);
        if let Some(food) = view.food {
            draw_food(field, Point::new(food.x, food.y), l.food);
        }
        if let Some(ball) = view.ball {
            draw_ball(field, ball, l.ball_radius);
        }
    }

    fn push_field(&mut self) {
        let area = Rectangle::new(Point::new(0, self.layout.field_y), self.field.size());
        let _ = self
            .screen
            .fill_contiguous(&area, self.field.pixels().iter().copied());
        self.frames += 1;
    }

    fn draw_hud(&mut self, view: &FrameView<'_>) {
        let strip = Rectangle::new(
            Point::zero(),
            Size::new(self.layout.screen_w, self.layout.field_y as u32),
        );
        let _ = self.screen.fill_solid(&strip, Rgb565::BLACK);

        let hearts = view.pet.hearts();
        for i in 0..HUD_HEARTS {
            let color = if i < hearts {
                Rgb565::RED
            } else {
                Rgb565::CSS_DIM_GRAY
            };
            draw_heart(&mut self.screen, Point::new(10 + i32::from(i) * 22, 4), color);
        }

        let face = match view.pet.mood() {
            Mood::Happy => ":)",
            Mood::Neutral => ":|",
            Mood::Sad => ":(",
        };
        let style = MonoTextStyle::new(&FONT_10X20, Rgb565::WHITE);
        let _ = Text::new(face, Point::new(200, 16), style).draw(&mut self.screen);
    }
}

impl<D> RenderPort for Renderer<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn draw_frame(&mut self, view: &FrameView<'_>) {
        let face = if view.pet.looks_sad() {
            Face::Sad
        } else {
            Face::Happy
        };
        self.draw_hud(view);
        self.compose_field(view, face);
        self.push_field();
    }

    fn draw_menu(&mut self, selected: MenuSector) {
        let l = self.layout;
        let width = l.screen_w / MenuSector::BAR.len() as u32;
        for (i, sector) in MenuSector::BAR.iter().enumerate() {
            let x = (i as u32 * width) as i32;
            let bg = if *sector == selected {
                Rgb565::YELLOW
            } else {
                Rgb565::WHITE
            };
            let area = Rectangle::new(Point::new(x, l.menu_y), Size::new(width, l.menu_h));
            let _ = self.screen.fill_solid(&area, bg);
            let style = MonoTextStyle::new(&FONT_10X20, Rgb565::BLACK);
            let _ = Text::with_alignment(
                sector.label(),
                Point::new(x + width as i32 / 2, l.menu_y + 26),
                style,
                Alignment::Center,
            )
            .draw(&mut self.screen);
        }
    }

    fn draw_death(&mut self, view: &FrameView<'_>) {
        self.draw_hud(view);
        self.compose_field(view, Face::Dead);
        let field = &mut self.field;
        let size = field.size();
        let grave = Size::new(80, 100);
        let top_left = Point::new(
            size.width.saturating_sub(grave.width) as i32 / 2,
            size.height.saturating_sub(grave.height) as i32 / 2,
        );
        let _ = RoundedRectangle::with_equal_corners(
            Rectangle::new(top_left, grave),
            Size::new(36, 36),
        )
        .into_styled(PrimitiveStyle::with_fill(Rgb565::CSS_DARK_GRAY))
        .draw(field);
        let style = MonoTextStyle::new(&FONT_10X20, Rgb565::WHITE);
        let _ = Text::with_alignment(
            "RIP",
            top_left + Point::new(grave.width as i32 / 2, 50),
            style,
            Alignment::Center,
        )
        .draw(field);
        self.push_field();
    }
}

// ── Sprites ───────────────────────────────────────────────────

fn draw_heart<T: DrawTarget<Color = Rgb565>>(target: &mut T, top_left: Point, color: Rgb565) {
    let fill = PrimitiveStyle::with_fill(color);
    let _ = Circle::new(top_left, 9).into_styled(fill).draw(target);
    let _ = Circle::new(top_left + Point::new(7, 0), 9)
        .into_styled(fill)
        .draw(target);
    let _ = Triangle::new(
        top_left + Point::new(0, 5),
        top_left + Point::new(15, 5),
        top_left + Point::new(8, 13),
    )
    .into_styled(fill)
    .draw(target);
}

fn draw_pet<T: DrawTarget<Color = Rgb565>>(target: &mut T, top_left: Point, size: Size, face: Face) {
    let w = size.width as i32;
    let h = size.height as i32;
    let _ = RoundedRectangle::with_equal_corners(Rectangle::new(top_left, size), Size::new(16, 16))
        .into_styled(PrimitiveStyle::with_fill(Rgb565::WHITE))
        .draw(target);

    let ink = PrimitiveStyle::with_stroke(Rgb565::BLACK, 2);
    let left_eye = top_left + Point::new(w / 3, h / 3);
    let right_eye = top_left + Point::new(2 * w / 3, h / 3);
    match face {
        Face::Dead => {
            for eye in [left_eye, right_eye] {
                let _ = Line::new(eye + Point::new(-3, -3), eye + Point::new(3, 3))
                    .into_styled(ink)
                    .draw(target);
                let _ = Line::new(eye + Point::new(-3, 3), eye + Point::new(3, -3))
                    .into_styled(ink)
                    .draw(target);
            }
        }
        Face::Happy | Face::Sad => {
            for eye in [left_eye, right_eye] {
                let _ = Circle::with_center(eye, 6)
                    .into_styled(PrimitiveStyle::with_fill(Rgb565::BLACK))
                    .draw(target);
            }
        }
    }

    let mouth_w = (w / 3).max(4) as u32;
    let mouth_center = top_left + Point::new(w / 2, 2 * h / 3);
    match face {
        Face::Happy => {
            let _ = Arc::with_center(mouth_center, mouth_w, 20.0_f32.deg(), 140.0_f32.deg())
                .into_styled(ink)
                .draw(target);
        }
        Face::Sad => {
            let _ = Arc::with_center(
                mouth_center + Point::new(0, mouth_w as i32 / 2),
                mouth_w,
                200.0_f32.deg(),
                140.0_f32.deg(),
            )
            .into_styled(ink)
            .draw(target);
        }
        Face::Dead => {
            let half = mouth_w as i32 / 2;
            let _ = Line::new(
                mouth_center - Point::new(half, 0),
                mouth_center + Point::new(half, 0),
            )
            .into_styled(ink)
            .draw(target);
        }
    }
}

fn draw_food<T: DrawTarget<Color = Rgb565>>(target: &mut T, top_left: Point, size: u32) {
    let _ = Circle::new(top_left + Point::new(0, 2), size.saturating_sub(2))
        .into_styled(PrimitiveStyle::with_fill(Rgb565::CSS_ORANGE))
        .draw(target);
    let stem = top_left + Point::new(size as i32 / 2, 0);
    let _ = Line::new(stem, stem + Point::new(2, 4))
        .into_styled(PrimitiveStyle::with_stroke(Rgb565::GREEN, 2))
        .draw(target);
}

fn draw_waste<T: DrawTarget<Color = Rgb565>>(target: &mut T, top_left: Point) {
    let brown = PrimitiveStyle::with_fill(Rgb565::CSS_SADDLE_BROWN);
    let _ = Circle::new(top_left + Point::new(0, 6), WASTE_SIZE - 6)
        .into_styled(brown)
        .draw(target);
    let _ = Circle::new(top_left + Point::new(4, 1), 8)
        .into_styled(brown)
        .draw(target);
}

fn draw_ball<T: DrawTarget<Color = Rgb565>>(target: &mut T, ball: &Ball, radius: i32) {
    let center = Point::new(ball.x as i32 + radius, ball.y as i32 + radius);
    let d = (radius * 2) as u32;
    let _ = Circle::with_center(center, d)
        .into_styled(PrimitiveStyle::with_fill(Rgb565::WHITE))
        .draw(target);

    let half = radius / 2;
    for (i, color) in BALL_SLICES.iter().enumerate() {
        let angle = (ball.spin_deg + i as f32 * 90.0).to_radians();
        let offset = Point::new(
            (half as f32 * angle.cos()) as i32,
            (half as f32 * angle.sin()) as i32,
        );
        let _ = Circle::with_center(center + offset, radius as u32)
            .into_styled(PrimitiveStyle::with_fill(*color))
            .draw(target);
    }

    let _ = Circle::with_center(center, 6)
        .into_styled(PrimitiveStyle::with_fill(Rgb565::WHITE))
        .draw(target);
    let _ = Circle::with_center(center, d)
        .into_styled(PrimitiveStyle::with_stroke(Rgb565::BLACK, 1))
        .draw(target);
}
