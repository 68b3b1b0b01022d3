//! Fallback classifiers for entries no custom group claimed.

pub use jsongen_config::groups::UNCATEGORIZED;
use jsongen_config::EntryType;

use crate::entry::{Entry, ItemKind, Rarity};

/// Where an entry is filed: a group within a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub category: String,
    pub group: String,
}

impl Placement {
    pub fn new(category: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            group: group.into(),
        }
    }

    /// The catch-all placement.
    pub fn uncategorized() -> Self {
        Self::new(UNCATEGORIZED, UNCATEGORIZED)
    }
}

/// A type-specific heuristic for entries unmatched by any custom group.
pub trait Classifier {
    fn place(&self, entry: &Entry) -> Placement;
}

/// Files items by rarity; common items are refined by item kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemClassifier;

/// Kind flags checked in priority order for common items.
const KIND_GROUPS: [(ItemKind, &str); 7] = [
    (ItemKind::Weapon, "Weapons"),
    (ItemKind::Tool, "Tools"),
    (ItemKind::Armor, "Armor"),
    (ItemKind::Block, "Blocks"),
    (ItemKind::Food, "Food"),
    (ItemKind::Ranged, "Ranged"),
    (ItemKind::Dye, "Dyes"),
];

/// Description substrings checked after the kind flags.
const DESCRIPTION_GROUPS: [(&str, &str); 3] = [
    ("potion", "Potions"),
    ("book", "Books"),
    ("record", "Music Discs"),
];

impl ItemClassifier {
    /// The `Common - <kind>` label of a common item.
    pub fn common_kind(entry: &Entry) -> &'static str {
        if let Some((_, label)) = KIND_GROUPS.iter().find(|(kind, _)| entry.has_kind(*kind)) {
            return *label;
        }
        let description = entry.description.to_lowercase();
        DESCRIPTION_GROUPS
            .iter()
            .find(|(needle, _)| description.contains(needle))
            .map(|(_, label)| *label)
            .unwrap_or("Misc")
    }
}

impl Classifier for ItemClassifier {
    fn place(&self, entry: &Entry) -> Placement {
        match entry.rarity() {
            Rarity::Common => Placement::new(
                "Common",
                format!("Common - {}", Self::common_kind(entry)),
            ),
            rarity => Placement::new("Rarity", format!("Rarity: {}", rarity.title())),
        }
    }
}

/// Files effects by their category tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct EffectClassifier;

impl Classifier for EffectClassifier {
    fn place(&self, entry: &Entry) -> Placement {
        Placement::new(
            "Category",
            format!("Category: {}", entry.effect_category().title()),
        )
    }
}

/// The fallback classifier for an entry type, if it has one.
pub fn fallback_for(entry_type: EntryType) -> Option<&'static dyn Classifier> {
    match entry_type {
        EntryType::Items => Some(&ItemClassifier),
        EntryType::Effects => Some(&EffectClassifier),
        EntryType::Blocks => None,
    }
}
