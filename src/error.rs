//! Unified error types for the badge firmware.
//!
//! The behaviour engine has almost nothing that can fail: sensor reads
//! always succeed and derived values are clamped.  What remains is a
//! refused menu action, a bad tuning table, and peripheral bring-up.
//! All variants are `Copy` so they pass through the event sink without
//! allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A menu action was refused; state is unchanged.
    Action(ActionRejected),
    /// The game configuration is unusable.
    Config(ConfigError),
    /// Peripheral initialisation failed.
    Hw(HwError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Action(e) => write!(f, "action: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Hw(e) => write!(f, "hw: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Action rejections
// ---------------------------------------------------------------------------

/// Why a feed / play / clean request did not start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionRejected {
    /// The pet is dead; nothing can be started.
    PetDead,
    /// Food is out or the pet is eating.
    FeedingInProgress,
    /// A ball session is running.
    PlayingInProgress,
}

impl fmt::Display for ActionRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PetDead => write!(f, "pet is dead"),
            Self::FeedingInProgress => write!(f, "feeding in progress"),
            Self::PlayingInProgress => write!(f, "playing in progress"),
        }
    }
}

impl core::error::Error for ActionRejected {}

impl From<ActionRejected> for Error {
    fn from(e: ActionRejected) -> Self {
        Self::Action(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A field failed range validation; the message names it.
    Invalid(&'static str),
    /// The tuning blob could not be decoded.
    Malformed,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(msg) => write!(f, "invalid: {msg}"),
            Self::Malformed => write!(f, "malformed tuning data"),
        }
    }
}

impl core::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Peripheral errors
// ---------------------------------------------------------------------------

/// Errors during one-shot peripheral initialisation.  The `i32` is the
/// raw ESP-IDF return code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwError {
    TouchInitFailed(i32),
    GpioConfigFailed(i32),
    LedcInitFailed(i32),
    DisplayInitFailed(i32),
    WatchdogFailed(i32),
}

impl fmt::Display for HwError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TouchInitFailed(rc) => write!(f, "touch pad init failed (rc={rc})"),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={rc})"),
            Self::LedcInitFailed(rc) => write!(f, "LEDC timer/channel config failed (rc={rc})"),
            Self::DisplayInitFailed(rc) => write!(f, "display init failed (rc={rc})"),
            Self::WatchdogFailed(rc) => write!(f, "task watchdog setup failed (rc={rc})"),
        }
    }
}

impl core::error::Error for HwError {}

impl From<HwError> for Error {
    fn from(e: HwError) -> Self {
        Self::Hw(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_converts_and_displays() {
        let e: Error = ActionRejected::PlayingInProgress.into();
        assert_eq!(e, Error::Action(ActionRejected::PlayingInProgress));
        assert_eq!(e.to_string(), "action: playing in progress");
    }

    #[test]
    fn hw_error_carries_return_code() {
        let e: Error = HwError::LedcInitFailed(-1).into();
        assert!(e.to_string().contains("rc=-1"));
    }
}
