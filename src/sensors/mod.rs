//! Sensor subsystem: the capacitive touch wheel.
//!
//! Raw pad counts come in through the
//! [`TouchPort`](crate::app::ports::TouchPort); [`touch_wheel`] turns them
//! into an angle and a center press.

pub mod touch_wheel;

/// One raw sample of all four pads.  Lower counts mean a stronger touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawTouch {
    pub q1: i32,
    pub q2: i32,
    pub q3: i32,
    pub center: i32,
}

/// Interpreted touch state for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TouchReading {
    /// Wheel position in degrees `[0, 360)` while a finger is on the ring.
    pub wheel_angle: Option<f32>,
    /// Center pad below its threshold.  Independent of the wheel.
    pub center_pressed: bool,
}
