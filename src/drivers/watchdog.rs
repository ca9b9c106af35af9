//! Task watchdog guarding the game loop.
//!
//! The loop feeds it once per pass. The death jingle blocks for about a
//! second, well inside [`LOOP_STALL_MS`].

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use crate::error::HwError;

/// Loop stall that resets the badge.
pub const LOOP_STALL_MS: u32 = 5_000;

pub struct Watchdog {
    feeds: u32,
}

impl Watchdog {
    /// Apply the stall budget to the TWDT and subscribe the calling task.
    ///
    /// The bootloader normally starts the TWDT; when it has not, it is
    /// initialised here with the same settings.
    pub fn arm(stall_ms: u32) -> Result<Self, HwError> {
        #[cfg(target_os = "espidf")]
        // SAFETY: called once from the main task before the loop starts.
        unsafe {
            let cfg = esp_task_wdt_config_t {
                timeout_ms: stall_ms,
                idle_core_mask: 0,
                trigger_panic: true,
            };
            if esp_task_wdt_reconfigure(&cfg) != ESP_OK {
                let rc = esp_task_wdt_init(&cfg);
                if rc != ESP_OK {
                    return Err(HwError::WatchdogFailed(rc));
                }
            }
            let rc = esp_task_wdt_add(core::ptr::null_mut());
            if rc != ESP_OK {
                return Err(HwError::WatchdogFailed(rc));
            }
        }

        log::info!("watchdog: loop stall budget {stall_ms} ms");
        Ok(Self { feeds: 0 })
    }

    pub fn feed(&mut self) {
        #[cfg(target_os = "espidf")]
        // SAFETY: the task subscribed in arm().
        unsafe {
            esp_task_wdt_reset();
        }
        self.feeds = self.feeds.wrapping_add(1);
    }

    /// Loop passes seen since arming.
    pub fn feeds(&self) -> u32 {
        self.feeds
    }
}
