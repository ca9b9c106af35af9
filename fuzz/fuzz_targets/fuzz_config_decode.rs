//! Fuzz target: `GameConfig` decoding
//!
//! Feeds arbitrary bytes to both tuning decoders.  Anything they accept
//! must pass validation and survive a postcard round trip.
//!
//! cargo fuzz run fuzz_config_decode

#![no_main]

use badgepet::config::GameConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(config) = GameConfig::from_postcard(data) {
        assert!(config.validate().is_ok());
        let bytes = config.to_postcard().expect("valid config encodes");
        assert!(GameConfig::from_postcard(&bytes).is_ok());
    }

    if let Ok(text) = core::str::from_utf8(data) {
        if let Ok(config) = GameConfig::from_json(text) {
            assert!(config.validate().is_ok());
        }
    }
});
