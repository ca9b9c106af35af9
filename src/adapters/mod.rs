//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements          | Connects to                    |
//! |------------|---------------------|--------------------------------|
//! | `hardware` | TouchPort           | ESP32 touch pads T4-T7         |
//! |            | TonePort            | LEDC buzzer channel            |
//! |            | LedBarPort          | Six LED GPIOs                  |
//! | `log_sink` | EventSink           | Serial log output              |
//! | `time`     | ClockPort           | ESP32 high-resolution timer    |
//!
//! The [`RenderPort`](crate::app::ports::RenderPort) adapter is
//! [`Renderer`](crate::render::Renderer), generic over any draw target.

pub mod hardware;
pub mod log_sink;
pub mod time;
