//! Registry fixtures.

use jsongen_config::EntryType;
use jsongen_core::{Entry, ItemKind, RegistrySnapshot};

/// An entry from a `namespace:path` string.
///
/// Panics on a malformed identifier.
pub fn entry(id: &str) -> Entry {
    match id.parse() {
        Ok(id) => Entry::new(id),
        Err(e) => panic!("bad fixture identifier {id:?}: {e}"),
    }
}

/// An item entry with kinds and tags.
pub fn item(id: &str, kinds: &[ItemKind], tags: &[&str]) -> Entry {
    entry(id)
        .with_kinds(kinds.iter().copied())
        .with_tags(tags.iter().copied())
}

/// An effect entry with tags.
pub fn effect(id: &str, tags: &[&str]) -> Entry {
    entry(id).with_tags(tags.iter().copied())
}

/// A small vanilla-flavoured registry covering every fallback branch.
pub fn sample_registry() -> RegistrySnapshot {
    RegistrySnapshot::new()
        .with_entries(
            EntryType::Items,
            vec![
                item("minecraft:iron_sword", &[ItemKind::Weapon], &[]),
                item("minecraft:iron_pickaxe", &[ItemKind::Tool], &[]),
                item("minecraft:blaze_powder", &[], &[]),
                item("minecraft:nether_star", &[], &["Uncommon"]),
                item("minecraft:dragon_egg", &[], &["Epic"]),
                item("minecraft:bread", &[ItemKind::Food], &[]),
                item("minecraft:pig_spawn_egg", &[], &[]),
                item("minecraft:stick", &[], &[]),
                item("aether:ambrosium_shard", &[], &[]),
            ],
        )
        .with_entries(
            EntryType::Effects,
            vec![
                effect("minecraft:fire_resistance", &["beneficial"]),
                effect("minecraft:speed", &["beneficial"]),
                effect("minecraft:poison", &["harmful"]),
                effect("minecraft:glowing", &["neutral"]),
                effect("aether:inebriation", &["harmful"]),
            ],
        )
        .with_entries(
            EntryType::Blocks,
            vec![entry("minecraft:stone"), entry("minecraft:magma_block")],
        )
}

/// The same registry as a snapshot JSON document.
pub const SAMPLE_REGISTRY_JSON: &str = r#"{
  "items": [
    {"id": "minecraft:iron_sword", "kinds": ["weapon"]},
    {"id": "minecraft:iron_pickaxe", "kinds": ["tool"]},
    {"id": "minecraft:blaze_powder"},
    {"id": "minecraft:nether_star", "tags": ["Uncommon"]},
    {"id": "minecraft:dragon_egg", "tags": ["Epic"]},
    {"id": "minecraft:bread", "kinds": ["food"]},
    {"id": "minecraft:pig_spawn_egg"},
    {"id": "minecraft:stick"},
    {"id": "aether:ambrosium_shard"}
  ],
  "effects": [
    {"id": "minecraft:fire_resistance", "tags": ["beneficial"]},
    {"id": "minecraft:speed", "tags": ["beneficial"]},
    {"id": "minecraft:poison", "tags": ["harmful"]},
    {"id": "minecraft:glowing", "tags": ["neutral"]},
    {"id": "aether:inebriation", "tags": ["harmful"]}
  ],
  "blocks": [
    {"id": "minecraft:stone"},
    {"id": "minecraft:magma_block"}
  ]
}"#;
