//! Pet simulation core.
//!
//! Everything the behaviour engine mutates lives in one owned
//! [`SimState`]; subsystems are free functions or small controllers that
//! borrow the pieces they need for one update.

pub mod activity;
pub mod menu;
pub mod movement;
pub mod state;
pub mod vitals;
pub mod waste;

use activity::{ActivityManager, Ball};
use menu::{MenuController, MenuSector};
use state::{PetState, Point};
use waste::WastePool;

use crate::config::GameConfig;

/// The whole mutable simulation.
#[derive(Debug, Clone)]
pub struct SimState {
    pub pet: PetState,
    pub activity: ActivityManager,
    pub waste: WastePool,
    pub menu: MenuController,
}

impl SimState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pet: PetState::new(config),
            activity: ActivityManager::new(),
            waste: WastePool::new(),
            menu: MenuController::new(),
        }
    }

    /// Borrowed snapshot handed to the renderer each frame.
    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            pet: &self.pet,
            food: self.activity.food(),
            ball: self.activity.ball(),
            waste: &self.waste,
            selected: self.menu.current(),
        }
    }
}

/// What a frame needs to draw, without access to mutate any of it.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub pet: &'a PetState,
    pub food: Option<Point>,
    pub ball: Option<&'a Ball>,
    pub waste: &'a WastePool,
    pub selected: MenuSector,
}
