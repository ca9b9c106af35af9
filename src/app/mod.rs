//! Application core: game orchestration, zero I/O.
//!
//! This module ties the pet simulation, the touch wheel, audio cues and
//! the cadence scheduler into one per-tick update.  All interaction with
//! hardware happens through **port traits** defined in [`ports`], keeping
//! this layer fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
