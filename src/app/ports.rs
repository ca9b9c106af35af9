//! Port traits: the hexagonal boundary between game logic and the badge.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ GameService (domain)
//! ```
//!
//! Driven adapters (touch pads, buzzer, LED bar, panel, event sinks)
//! implement these traits.  The [`GameService`](super::service::GameService)
//! consumes them via generics, so the domain core never touches hardware
//! directly and every rule runs on the host under test.

use crate::pet::FrameView;
use crate::pet::menu::MenuSector;
use crate::sensors::RawTouch;

// ───────────────────────────────────────────────────────────────
// Touch port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for the capacitive wheel and center pad.
pub trait TouchPort {
    /// Sample all four pads.  Lower values mean a stronger touch.
    fn read_touch(&mut self) -> RawTouch;
}

// ───────────────────────────────────────────────────────────────
// Actuator ports (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Square-wave buzzer.
pub trait TonePort {
    /// Start a tone that plays until [`stop_tone`](Self::stop_tone).
    fn start_tone(&mut self, freq_hz: u16);

    /// Silence the buzzer.
    fn stop_tone(&mut self);
}

/// Six-segment status bar.
pub trait LedBarPort {
    /// Light the first `count` LEDs in order, the rest off.
    fn set_lit(&mut self, count: u8);
}

// ───────────────────────────────────────────────────────────────
// Render port (driven adapter: domain → display)
// ───────────────────────────────────────────────────────────────

/// Draws the game.  The service calls [`draw_frame`](Self::draw_frame)
/// on the frame cadence and [`draw_menu`](Self::draw_menu) only when the
/// selection changed.
pub trait RenderPort {
    /// Full redraw of the HUD and play field.
    fn draw_frame(&mut self, view: &FrameView<'_>);

    /// Repaint the menu bar with `selected` highlighted.
    fn draw_menu(&mut self, selected: MenuSector);

    /// Terminal death screen.  Called exactly once.
    fn draw_death(&mut self, view: &FrameView<'_>);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic milliseconds since boot.
pub trait ClockPort {
    fn now_ms(&self) -> u64;
}
