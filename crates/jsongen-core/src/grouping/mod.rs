//! Grouping engine — blacklist filtering, custom keyword groups, and
//! type-specific fallback classification.
//!
//! Two operations are offered over the same rules:
//!
//! 1. **Exclusive grouping** ([`GroupingEngine::classify`]): every surviving
//!    entry lands in exactly one group. Custom groups are tried in declared
//!    order and the first match claims the entry; the remainder goes to the
//!    fallback [`Classifier`] (or to `Uncategorized`).
//!
//! 2. **Namespace tagging** ([`GroupingEngine::tag_by_namespace`]): every
//!    surviving entry keeps its identifier and collects an intrinsic tag plus
//!    the name of *every* custom group it matches.
//!
//! ```text
//! entries ──▶ blacklist ──▶ custom groups (first match) ──▶ fallback ──▶ category ▸ group ▸ members
//!                      └──▶ intrinsic tag + all matching groups ──▶ namespace ▸ path ▸ tags
//! ```

pub mod fallback;
pub mod namespace;

use std::collections::BTreeMap;

use serde::Serialize;

use jsongen_config::GroupConfig;

use crate::entry::{Entry, Identifier};

pub use fallback::{Classifier, EffectClassifier, ItemClassifier, Placement, UNCATEGORIZED, fallback_for};
pub use namespace::{EntryValue, NamespaceTags, to_entry_values};

/// Flat grouping: group name → sorted member identifiers.
pub type Grouping = BTreeMap<String, Vec<String>>;

/// Two-level grouping: category → group → sorted member identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NestedGrouping(BTreeMap<String, BTreeMap<String, Vec<String>>>);

impl NestedGrouping {
    fn insert(&mut self, category: &str, group: &str, id: &Identifier) {
        self.0
            .entry(category.to_string())
            .or_default()
            .entry(group.to_string())
            .or_default()
            .push(id.to_string());
    }

    fn sort_members(&mut self) {
        for members in self.0.values_mut().flat_map(|groups| groups.values_mut()) {
            members.sort();
            members.dedup();
        }
    }

    /// Collapse categories, keeping group names as keys.
    ///
    /// A group name used under two categories is merged into one list.
    pub fn flatten(&self) -> Grouping {
        let mut flat = Grouping::new();
        for groups in self.0.values() {
            for (group, members) in groups {
                flat.entry(group.clone())
                    .or_default()
                    .extend(members.iter().cloned());
            }
        }
        for members in flat.values_mut() {
            members.sort();
            members.dedup();
        }
        flat
    }

    /// Category names in sorted order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Group names within a category.
    pub fn groups(&self, category: &str) -> impl Iterator<Item = &str> {
        self.0
            .get(category)
            .into_iter()
            .flat_map(|groups| groups.keys().map(String::as_str))
    }

    /// Members of one group.
    pub fn members(&self, category: &str, group: &str) -> &[String] {
        self.0
            .get(category)
            .and_then(|groups| groups.get(group))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Find the category and group holding an identifier.
    pub fn locate(&self, id: &str) -> Option<(&str, &str)> {
        self.0.iter().find_map(|(category, groups)| {
            groups.iter().find_map(|(group, members)| {
                members
                    .binary_search_by(|m| m.as_str().cmp(id))
                    .ok()
                    .map(|_| (category.as_str(), group.as_str()))
            })
        })
    }

    /// Total number of grouped entries.
    pub fn member_count(&self) -> usize {
        self.0
            .values()
            .flat_map(|groups| groups.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A custom group compiled for matching.
#[derive(Debug, Clone)]
struct KeywordGroup {
    name: String,
    category: String,
    /// Lowercased keyword substrings.
    keywords: Vec<String>,
}

impl KeywordGroup {
    fn matches(&self, id: &Identifier) -> bool {
        let path = id.path();
        self.keywords.iter().any(|k| path.contains(k.as_str()))
    }
}

/// Classifies entries according to a [`GroupConfig`].
///
/// Built once per export from the configuration; classification itself
/// never fails.
#[derive(Debug, Clone)]
pub struct GroupingEngine {
    /// Lowercased blacklist substrings.
    blacklist: Vec<String>,
    /// Custom groups in declared order.
    groups: Vec<KeywordGroup>,
}

impl GroupingEngine {
    /// Compile the blacklist and custom groups of a configuration.
    pub fn new(config: &GroupConfig) -> Self {
        let default_category = config.default_category();
        let groups = config
            .custom_groups
            .iter()
            .map(|(name, group)| KeywordGroup {
                name: name.clone(),
                category: group.category().unwrap_or(default_category).to_string(),
                keywords: group.keywords().iter().map(|k| k.to_lowercase()).collect(),
            })
            .collect();

        Self {
            blacklist: config.blacklist.iter().map(|t| t.to_lowercase()).collect(),
            groups,
        }
    }

    /// Whether any blacklist term is a substring of the identifier.
    pub fn is_blacklisted(&self, id: &Identifier) -> bool {
        let full = id.to_string();
        self.blacklist.iter().any(|term| full.contains(term.as_str()))
    }

    /// Entries that survive the blacklist, in input order.
    pub fn filter<'e>(&self, entries: &'e [Entry]) -> Vec<&'e Entry> {
        entries
            .iter()
            .filter(|e| !self.is_blacklisted(&e.id))
            .collect()
    }

    /// Names of every custom group whose keywords match the identifier's
    /// path, in declared order.
    pub fn matching_groups<'a>(&'a self, id: &'a Identifier) -> impl Iterator<Item = &'a str> + 'a {
        self.groups
            .iter()
            .filter(move |g| g.matches(id))
            .map(|g| g.name.as_str())
    }

    /// Exclusive grouping keyed by group name.
    pub fn classify(&self, entries: &[Entry], fallback: Option<&dyn Classifier>) -> Grouping {
        self.classify_nested(entries, fallback).flatten()
    }

    /// Exclusive grouping keyed by category, then group name.
    pub fn classify_nested(
        &self,
        entries: &[Entry],
        fallback: Option<&dyn Classifier>,
    ) -> NestedGrouping {
        let (claimed, uncategorized) = self.partition_custom(self.filter(entries));

        let mut nested = NestedGrouping::default();
        for (group, members) in claimed {
            for entry in members {
                nested.insert(&group.category, &group.name, &entry.id);
            }
        }
        for entry in uncategorized {
            let placement = match fallback {
                Some(classifier) => classifier.place(entry),
                None => Placement::uncategorized(),
            };
            nested.insert(&placement.category, &placement.group, &entry.id);
        }
        nested.sort_members();
        nested
    }

    /// Assign entries to custom groups, first declared match wins.
    ///
    /// Folds over the groups in order, threading the entries not yet claimed.
    fn partition_custom<'e>(
        &self,
        survivors: Vec<&'e Entry>,
    ) -> (Vec<(&KeywordGroup, Vec<&'e Entry>)>, Vec<&'e Entry>) {
        self.groups
            .iter()
            .fold((Vec::new(), survivors), |(mut claimed, remaining), group| {
                let (hits, rest): (Vec<_>, Vec<_>) =
                    remaining.into_iter().partition(|e| group.matches(&e.id));
                if !hits.is_empty() {
                    claimed.push((group, hits));
                }
                (claimed, rest)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::ItemKind;
    use pretty_assertions::assert_eq;

    fn entry(id: &str) -> Entry {
        Entry::new(id.parse().unwrap())
    }

    fn config(json: &str) -> GroupConfig {
        GroupConfig::parse(json).unwrap()
    }

    #[test]
    fn test_blacklist_is_substring_match() {
        let engine = GroupingEngine::new(&config(r#"{"blacklist": ["spawn_egg", "DEBUG_"]}"#));
        assert!(engine.is_blacklisted(&"minecraft:pig_spawn_egg".parse().unwrap()));
        assert!(engine.is_blacklisted(&"minecraft:debug_stick".parse().unwrap()));
        assert!(!engine.is_blacklisted(&"minecraft:egg".parse().unwrap()));
    }

    #[test]
    fn test_blacklist_matches_namespace_too() {
        let engine = GroupingEngine::new(&config(r#"{"blacklist": ["testmod:"]}"#));
        let entries = vec![entry("testmod:gem"), entry("minecraft:gem")];
        let grouping = engine.classify(&entries, None);
        assert_eq!(grouping["Uncategorized"], vec!["minecraft:gem"]);
    }

    #[test]
    fn test_first_declared_group_wins() {
        let engine = GroupingEngine::new(&config(
            r#"{"CustomGroups": {"Fire": ["fire"], "Charges": ["charge"]}}"#,
        ));
        let entries = vec![entry("minecraft:fire_charge"), entry("minecraft:wind_charge")];
        let grouping = engine.classify(&entries, None);
        assert_eq!(grouping["Fire"], vec!["minecraft:fire_charge"]);
        assert_eq!(grouping["Charges"], vec!["minecraft:wind_charge"]);
    }

    #[test]
    fn test_keywords_match_path_only() {
        let engine = GroupingEngine::new(&config(r#"{"CustomGroups": {"Create": ["create"]}}"#));
        let entries = vec![entry("create:wrench"), entry("minecraft:create_table")];
        let grouping = engine.classify(&entries, None);
        assert_eq!(grouping["Create"], vec!["minecraft:create_table"]);
        assert_eq!(grouping["Uncategorized"], vec!["create:wrench"]);
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        let engine = GroupingEngine::new(&config(r#"{"CustomGroups": {"Gems": ["DIAMOND"]}}"#));
        let grouping = engine.classify(&[entry("minecraft:diamond")], None);
        assert_eq!(grouping["Gems"], vec!["minecraft:diamond"]);
    }

    #[test]
    fn test_members_sorted_and_empty_groups_omitted() {
        let engine = GroupingEngine::new(&config(
            r#"{"CustomGroups": {"Swords": ["sword"], "Wands": ["wand"]}}"#,
        ));
        let entries = vec![
            entry("minecraft:stone_sword"),
            entry("minecraft:diamond_sword"),
            entry("aether:gravitite_sword"),
        ];
        let grouping = engine.classify(&entries, None);
        assert_eq!(
            grouping["Swords"],
            vec![
                "aether:gravitite_sword",
                "minecraft:diamond_sword",
                "minecraft:stone_sword"
            ]
        );
        assert!(!grouping.contains_key("Wands"));
        assert!(!grouping.contains_key(UNCATEGORIZED));
    }

    #[test]
    fn test_nested_places_custom_groups_in_categories() {
        let engine = GroupingEngine::new(&config(
            r#"{
                "categories": ["Loot", "Arcane"],
                "CustomGroups": {
                    "Gems": ["gem"],
                    "Wands": {"category": "Arcane", "keywords": ["wand"]}
                }
            }"#,
        ));
        let entries = vec![entry("mod:ruby_gem"), entry("mod:oak_wand")];
        let nested = engine.classify_nested(&entries, None);
        assert_eq!(nested.members("Loot", "Gems"), ["mod:ruby_gem"]);
        assert_eq!(nested.members("Arcane", "Wands"), ["mod:oak_wand"]);
        assert_eq!(nested.locate("mod:oak_wand"), Some(("Arcane", "Wands")));
        assert_eq!(nested.locate("mod:missing"), None);
        assert_eq!(nested.member_count(), 2);
    }

    #[test]
    fn test_fallback_applies_only_to_remainder() {
        let engine = GroupingEngine::new(&config(r#"{"CustomGroups": {"Weapons": ["sword"]}}"#));
        let entries = vec![
            entry("minecraft:iron_sword").with_kinds([ItemKind::Weapon]),
            entry("minecraft:iron_axe").with_kinds([ItemKind::Tool]),
        ];
        let grouping = engine.classify(&entries, Some(&ItemClassifier));
        assert_eq!(grouping["Weapons"], vec!["minecraft:iron_sword"]);
        assert_eq!(grouping["Common - Tools"], vec!["minecraft:iron_axe"]);
    }

    #[test]
    fn test_duplicate_entries_listed_once() {
        let engine = GroupingEngine::new(&GroupConfig::default());
        let entries = vec![entry("minecraft:stick"), entry("minecraft:stick")];
        let grouping = engine.classify(&entries, None);
        assert_eq!(grouping[UNCATEGORIZED], vec!["minecraft:stick"]);
    }

    #[test]
    fn test_matching_groups_is_inclusive() {
        let engine = GroupingEngine::new(&config(
            r#"{"CustomGroups": {"Fire": ["fire"], "Charges": ["charge"], "Ice": ["ice"]}}"#,
        ));
        let id: Identifier = "minecraft:fire_charge".parse().unwrap();
        let groups: Vec<&str> = engine.matching_groups(&id).collect();
        assert_eq!(groups, vec!["Fire", "Charges"]);
    }

    #[test]
    fn test_empty_input() {
        let engine = GroupingEngine::new(&GroupConfig::default());
        assert!(engine.classify(&[], Some(&ItemClassifier)).is_empty());
    }
}
