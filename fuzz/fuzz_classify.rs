//! Fuzz target for registry parsing and exclusive grouping.
//!
//! Run with: cargo +nightly fuzz run fuzz_classify
//!
//! Any snapshot document that parses is classified with the packaged default
//! configuration; every entry surviving the blacklist must land in exactly
//! one group.

#![no_main]

use std::collections::BTreeSet;

use jsongen_config::{EntryType, GroupConfig};
use jsongen_core::grouping::fallback_for;
use jsongen_core::{GroupingEngine, RegistrySnapshot};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(registry) = RegistrySnapshot::from_json(s) else {
        return;
    };
    let config = GroupConfig::packaged_default().expect("packaged default is valid");
    let engine = GroupingEngine::new(&config);

    for entry_type in EntryType::ALL {
        let entries = registry.entries(entry_type);
        let grouping = engine.classify(entries, fallback_for(entry_type));
        let members: Vec<&String> = grouping.values().flatten().collect();
        let unique: BTreeSet<&String> = members.iter().copied().collect();
        assert_eq!(members.len(), unique.len());

        let survivors: BTreeSet<String> = engine
            .filter(entries)
            .iter()
            .map(|e| e.id.to_string())
            .collect();
        assert_eq!(unique.len(), survivors.len());

        let _ = engine.tag_by_namespace(entries, entry_type);
    }
});
