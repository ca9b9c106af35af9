//! Badgepet firmware library.
//!
//! Exposes the whole behaviour engine for host-side testing. All
//! ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod audio;
pub mod config;
pub mod error;
pub mod pet;
pub mod pins;
pub mod render;
pub mod scheduler;
pub mod sensors;

// Hardware-facing modules compile on the host through their simulation
// stubs.
pub mod adapters;
pub mod drivers;
