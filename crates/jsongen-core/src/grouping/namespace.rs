//! Inclusive namespace tagging and its flattened [`EntryValue`] form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use jsongen_config::EntryType;

use crate::entry::{EffectCategory, Entry, ItemKind, Rarity};

use super::GroupingEngine;

/// Namespace → path → tag list.
pub type NamespaceTags = BTreeMap<String, BTreeMap<String, Vec<String>>>;

/// Item kinds left out of namespace tagging entirely.
const UNTAGGED_ITEM_KINDS: [ItemKind; 5] = [
    ItemKind::Block,
    ItemKind::Armor,
    ItemKind::Weapon,
    ItemKind::Tool,
    ItemKind::Ranged,
];

/// A tagged entry, flattened for effect assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryValue {
    /// The identifier path.
    pub name: String,
    pub tags: Vec<String>,
    pub namespace: String,
}

impl EntryValue {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags: Vec::new(),
            namespace: namespace.into(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// `namespace:name`.
    pub fn key(&self) -> String {
        format!("{}:{}", self.namespace, self.name)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// The title-cased intrinsic tag of an entry, if it differs from the
/// type's default.
fn intrinsic_tag(entry: &Entry, entry_type: EntryType) -> Option<&'static str> {
    match entry_type {
        EntryType::Effects => match entry.effect_category() {
            EffectCategory::Neutral => None,
            category => Some(category.title()),
        },
        EntryType::Items | EntryType::Blocks => match entry.rarity() {
            Rarity::Common => None,
            rarity => Some(rarity.title()),
        },
    }
}

fn is_untagged_kind(entry: &Entry, entry_type: EntryType) -> bool {
    entry_type == EntryType::Items && UNTAGGED_ITEM_KINDS.iter().any(|k| entry.has_kind(*k))
}

impl GroupingEngine {
    /// Tag every surviving entry with its intrinsic tag and the name of
    /// every custom group it matches, nested by namespace then path.
    pub fn tag_by_namespace(&self, entries: &[Entry], entry_type: EntryType) -> NamespaceTags {
        let mut tagged = NamespaceTags::new();
        for entry in self.filter(entries) {
            if is_untagged_kind(entry, entry_type) {
                continue;
            }
            let mut tags: Vec<String> = intrinsic_tag(entry, entry_type)
                .map(str::to_string)
                .into_iter()
                .collect();
            tags.extend(self.matching_groups(&entry.id).map(str::to_string));
            tagged
                .entry(entry.id.namespace().to_string())
                .or_default()
                .insert(entry.id.path().to_string(), tags);
        }
        tagged
    }
}

/// Flatten a namespace tagging into entry values, in namespace then path
/// order.
pub fn to_entry_values(tags: &NamespaceTags) -> Vec<EntryValue> {
    tags.iter()
        .flat_map(|(namespace, paths)| {
            paths.iter().map(move |(path, tags)| EntryValue {
                name: path.clone(),
                tags: tags.clone(),
                namespace: namespace.clone(),
            })
        })
        .collect()
}
