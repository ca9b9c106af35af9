//! Menu / selection controller.
//!
//! The wheel angle picks one of four sectors:
//!
//! ```text
//!              ToggleMode (up)
//!                 315..45
//!   Feed (left)               Clean (right)
//!    225..315                   45..135
//!                Play (down)
//!                 135..225
//! ```
//!
//! Redraws and actions are edge-triggered: the menu bar repaints only on
//! a sector change, and a held center press fires exactly once.

use crate::app::commands::MenuAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MenuSector {
    Feed = 0,
    Play = 1,
    Clean = 2,
    ToggleMode = 3,
}

impl MenuSector {
    /// Sectors drawn as buttons on the menu bar, left to right.
    pub const BAR: [MenuSector; 3] = [Self::Feed, Self::Play, Self::Clean];

    /// Map a wheel angle in degrees (0–360) to its sector.
    pub fn from_angle(deg: f32) -> Self {
        if deg > 45.0 && deg <= 135.0 {
            Self::Clean
        } else if deg > 135.0 && deg <= 225.0 {
            Self::Play
        } else if deg > 225.0 && deg <= 315.0 {
            Self::Feed
        } else {
            Self::ToggleMode
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Feed => "Feed",
            Self::Play => "Play",
            Self::Clean => "Clean",
            Self::ToggleMode => "Mode",
        }
    }

    pub fn action(self) -> MenuAction {
        match self {
            Self::Feed => MenuAction::Feed,
            Self::Play => MenuAction::Play,
            Self::Clean => MenuAction::Clean,
            Self::ToggleMode => MenuAction::ToggleMode,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MenuController {
    current: MenuSector,
    /// Last sector painted on the bar; `None` until the first paint.
    drawn: Option<MenuSector>,
    was_pressed: bool,
}

impl Default for MenuController {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuController {
    pub fn new() -> Self {
        Self {
            current: MenuSector::Feed,
            drawn: None,
            was_pressed: false,
        }
    }

    pub fn current(&self) -> MenuSector {
        self.current
    }

    /// Update the selection from a wheel angle.  Returns `true` when the
    /// sector changed.
    pub fn select_from_angle(&mut self, deg: f32) -> bool {
        let next = MenuSector::from_angle(deg);
        let changed = next != self.current;
        self.current = next;
        changed
    }

    /// The sector to paint, once per change (and once at boot).
    pub fn take_redraw(&mut self) -> Option<MenuSector> {
        if self.drawn == Some(self.current) {
            return None;
        }
        self.drawn = Some(self.current);
        Some(self.current)
    }

    /// Feed the raw center-press level; returns `true` on the rising edge.
    pub fn press_edge(&mut self, pressed: bool) -> bool {
        let rising = pressed && !self.was_pressed;
        self.was_pressed = pressed;
        rising
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sector_boundaries() {
        assert_eq!(MenuSector::from_angle(45.0), MenuSector::ToggleMode);
        assert_eq!(MenuSector::from_angle(45.1), MenuSector::Clean);
        assert_eq!(MenuSector::from_angle(135.0), MenuSector::Clean);
        assert_eq!(MenuSector::from_angle(180.0), MenuSector::Play);
        assert_eq!(MenuSector::from_angle(225.0), MenuSector::Play);
        assert_eq!(MenuSector::from_angle(270.0), MenuSector::Feed);
        assert_eq!(MenuSector::from_angle(315.0), MenuSector::Feed);
        assert_eq!(MenuSector::from_angle(350.0), MenuSector::ToggleMode);
        assert_eq!(MenuSector::from_angle(0.0), MenuSector::ToggleMode);
    }

    #[test]
    fn first_redraw_always_happens() {
        let mut m = MenuController::new();
        assert_eq!(m.take_redraw(), Some(MenuSector::Feed));
        assert_eq!(m.take_redraw(), None);
    }

    #[test]
    fn redraw_once_per_change() {
        let mut m = MenuController::new();
        let _ = m.take_redraw();
        let mut redraws = 0;
        for deg in [180.0, 181.0, 200.0, 90.0, 91.0, 92.0, 180.0] {
            m.select_from_angle(deg);
            if m.take_redraw().is_some() {
                redraws += 1;
            }
        }
        assert_eq!(redraws, 3);
    }

    #[test]
    fn held_press_fires_once() {
        let mut m = MenuController::new();
        let fires = [true, true, true, false, true, true]
            .into_iter()
            .filter(|&p| m.press_edge(p))
            .count();
        assert_eq!(fires, 2);
    }
}
