//! Free locomotion and steering helpers.
//!
//! Every function takes the current position and returns one already
//! clamped to the field, so the position invariant holds after each step.

use rand::Rng;

use super::state::{FieldBounds, Point};
use crate::config::GameConfig;

/// Random walk: each axis steps -1, 0 or +1 times `wander_step`, pushed
/// back toward the middle when within `wander_edge_margin` of an edge.
pub fn wander(pos: Point, bounds: FieldBounds, config: &GameConfig, rng: &mut impl Rng) -> Point {
    let margin = config.wander_edge_margin;
    let mut dx: i32 = rng.gen_range(-1..=1);
    let mut dy: i32 = rng.gen_range(-1..=1);

    if pos.x <= margin {
        dx = 1;
    } else if pos.x >= bounds.max_x - margin {
        dx = -1;
    }
    if pos.y <= margin {
        dy = 1;
    } else if pos.y >= bounds.max_y - margin {
        dy = -1;
    }

    bounds.clamp(Point::new(
        pos.x + dx * config.wander_step,
        pos.y + dy * config.wander_step,
    ))
}

/// Screensaver bounce: constant velocity, each axis reflects on its own
/// wall.  Returns the new position and the (possibly flipped) velocity.
pub fn dvd_bounce(pos: Point, velocity: (i32, i32), bounds: FieldBounds) -> (Point, (i32, i32)) {
    let (mut vx, mut vy) = velocity;
    let next = Point::new(pos.x + vx, pos.y + vy);
    if next.x <= 0 || next.x >= bounds.max_x {
        vx = -vx;
    }
    if next.y <= 0 || next.y >= bounds.max_y {
        vy = -vy;
    }
    (bounds.clamp(next), (vx, vy))
}

/// Move `top_left` by `step` toward the target on each axis whose
/// center-to-center gap `delta` exceeds `dead_zone`.
pub fn chase(
    top_left: Point,
    delta: Point,
    step: i32,
    dead_zone: i32,
    bounds: FieldBounds,
) -> Point {
    let mut next = top_left;
    if delta.x.abs() > dead_zone {
        next.x += step * delta.x.signum();
    }
    if delta.y.abs() > dead_zone {
        next.y += step * delta.y.signum();
    }
    bounds.clamp(next)
}
