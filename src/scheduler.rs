//! Cooperative cadence scheduler.
//!
//! The main loop never sleeps between subsystems.  Instead each cadence
//! asks "has enough time elapsed since X?" and the loop moves on when it
//! has not.  Two deadline policies coexist on purpose:
//!
//! ```text
//!  Accumulating   last += interval     fires keep a fixed phase; a late
//!                                      loop catches up on the next polls
//!  Resetting      last  = now          period stretches by the loop lag
//! ```
//!
//! Vitals decay and the frame clock accumulate; waste checks, idle
//! chirps and the movement gate reset.

use log::debug;

/// How a [`Deadline`] re-arms after firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlinePolicy {
    /// `last += interval`: drift-free, missed periods fire on later polls.
    Accumulating,
    /// `last = now`: the next period starts from the poll that fired.
    Resetting,
}

/// Which side of the interval boundary counts as "due".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Due {
    /// `now - last >= interval`
    AtInterval,
    /// `now - last > interval`
    AfterInterval,
}

/// A single non-blocking periodic deadline.
#[derive(Debug, Clone)]
pub struct Deadline {
    /// Human-readable label, used for logging only.
    pub label: &'static str,
    interval_ms: u64,
    last_ms: u64,
    policy: DeadlinePolicy,
    due: Due,
    fired: u64,
}

impl Deadline {
    pub fn new(
        label: &'static str,
        interval_ms: u64,
        policy: DeadlinePolicy,
        due: Due,
        now_ms: u64,
    ) -> Self {
        Self {
            label,
            interval_ms,
            last_ms: now_ms,
            policy,
            due,
            fired: 0,
        }
    }

    /// Returns `true` once per elapsed period and re-arms according to the
    /// policy.  Never blocks.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        let elapsed = now_ms.saturating_sub(self.last_ms);
        let due = match self.due {
            Due::AtInterval => elapsed >= self.interval_ms,
            Due::AfterInterval => elapsed > self.interval_ms,
        };
        if !due {
            return false;
        }
        match self.policy {
            DeadlinePolicy::Accumulating => self.last_ms += self.interval_ms,
            DeadlinePolicy::Resetting => self.last_ms = now_ms,
        }
        self.fired += 1;
        debug!("cadence '{}' fired (#{})", self.label, self.fired);
        true
    }

    /// Number of times this deadline has fired.
    pub fn fired(&self) -> u64 {
        self.fired
    }
}

/// The full set of cadences the game loop polls, anchored at boot.
#[derive(Debug, Clone)]
pub struct Cadences {
    pub vitals: Deadline,
    pub frame: Deadline,
    pub movement: Deadline,
    pub waste: Deadline,
    pub chirp: Deadline,
}

impl Cadences {
    pub fn new(config: &crate::config::GameConfig, now_ms: u64) -> Self {
        use DeadlinePolicy::{Accumulating, Resetting};
        Self {
            vitals: Deadline::new(
                "vitals",
                config.vitals_interval_ms,
                Accumulating,
                Due::AtInterval,
                now_ms,
            ),
            frame: Deadline::new(
                "frame",
                config.frame_interval_ms,
                Accumulating,
                Due::AtInterval,
                now_ms,
            ),
            // The movement gate starts open so the first frame moves.
            movement: Deadline::new(
                "movement",
                config.move_interval_ms,
                Resetting,
                Due::AtInterval,
                now_ms.saturating_sub(config.move_interval_ms),
            ),
            waste: Deadline::new(
                "waste",
                config.waste_interval_ms,
                Resetting,
                Due::AfterInterval,
                now_ms,
            ),
            chirp: Deadline::new(
                "chirp",
                config.chirp_interval_ms,
                Resetting,
                Due::AfterInterval,
                now_ms,
            ),
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
