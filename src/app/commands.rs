//! Inbound commands to the game service.
//!
//! The menu turns a center press into one of these; the
//! [`GameService`](super::service::GameService) validates preconditions
//! and either starts the action or reports an
//! [`ActionRejected`](crate::error::ActionRejected).

/// Actions the player can trigger from the touch wheel menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Drop food for the pet to walk to and eat.
    Feed,

    /// Throw a ball for the pet to chase.
    Play,

    /// Remove every waste marker.
    Clean,

    /// Flip between wander and DVD-bounce locomotion.
    ToggleMode,
}

impl MenuAction {
    pub fn name(self) -> &'static str {
        match self {
            Self::Feed => "feed",
            Self::Play => "play",
            Self::Clean => "clean",
            Self::ToggleMode => "toggle_mode",
        }
    }
}
