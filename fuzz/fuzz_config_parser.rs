//! Fuzz target for the group configuration parsers.
//!
//! Run with: cargo +nightly fuzz run fuzz_config_parser
//!
//! Feeds arbitrary text to both the JSON and TOML front ends; any document
//! that parses must also survive re-serialization, and anything recovered
//! field by field must validate.

#![no_main]

use jsongen_config::GroupConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = GroupConfig::parse(s) {
        let json = config.to_json_pretty().expect("valid config must serialize");
        let again = GroupConfig::parse(&json).expect("serialized config must parse");
        assert_eq!(config, again);
    }
    if let Ok(recovered) = GroupConfig::parse_lenient(s) {
        recovered.validate().expect("recovered config must validate");
    }
    let _ = GroupConfig::parse_toml(s);
    if let Ok(recovered) = GroupConfig::parse_toml_lenient(s) {
        recovered.validate().expect("recovered config must validate");
    }
});
