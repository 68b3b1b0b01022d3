//! Entry-type selection and custom group definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kinds of registry entries an export can cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryType {
    #[serde(alias = "items")]
    Items,
    #[serde(alias = "effects")]
    Effects,
    #[serde(alias = "blocks")]
    Blocks,
}

impl EntryType {
    /// All entry types in export order.
    pub const ALL: [EntryType; 3] = [EntryType::Items, EntryType::Effects, EntryType::Blocks];

    /// Lowercase name used as the prefix of output file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Items => "items",
            EntryType::Effects => "effects",
            EntryType::Blocks => "blocks",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "items" | "item" => Ok(EntryType::Items),
            "effects" | "effect" => Ok(EntryType::Effects),
            "blocks" | "block" => Ok(EntryType::Blocks),
            other => Err(format!("unknown entry type {other:?}")),
        }
    }
}

/// Group name for entries that no custom group or fallback claims.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Name prefixes of the groups produced by the built-in fallbacks.
pub const FALLBACK_GROUP_PREFIXES: [&str; 3] = ["Rarity: ", "Common - ", "Category: "];

/// Whether a custom group name would collide with a fallback group.
///
/// Flattened groupings key by group name alone, so a custom group sharing a
/// fallback name would merge with it.
pub fn is_reserved_group_name(name: &str) -> bool {
    name == UNCATEGORIZED
        || FALLBACK_GROUP_PREFIXES
            .iter()
            .any(|prefix| name.starts_with(prefix))
}

/// A custom group definition.
///
/// Either a bare keyword list, which places the group in the default
/// category, or a table naming the category explicitly:
///
/// ```json
/// "CustomGroups": {
///     "Weapons": ["sword", "axe"],
///     "Magic": { "category": "Arcane", "keywords": ["wand", "staff"] }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomGroup {
    /// Keyword substrings matched against an entry's path.
    Keywords(Vec<String>),
    /// Keywords plus the category the group is filed under.
    Categorized {
        category: String,
        keywords: Vec<String>,
    },
}

impl CustomGroup {
    /// The keyword substrings of this group.
    pub fn keywords(&self) -> &[String] {
        match self {
            CustomGroup::Keywords(keywords) => keywords,
            CustomGroup::Categorized { keywords, .. } => keywords,
        }
    }

    /// The explicit category, if one was configured.
    pub fn category(&self) -> Option<&str> {
        match self {
            CustomGroup::Keywords(_) => None,
            CustomGroup::Categorized { category, .. } => Some(category),
        }
    }
}

impl From<Vec<String>> for CustomGroup {
    fn from(keywords: Vec<String>) -> Self {
        CustomGroup::Keywords(keywords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_group_names() {
        assert!(is_reserved_group_name("Uncategorized"));
        assert!(is_reserved_group_name("Rarity: Rare"));
        assert!(is_reserved_group_name("Common - Weapons"));
        assert!(is_reserved_group_name("Category: Harmful"));
        assert!(!is_reserved_group_name("Rarity"));
        assert!(!is_reserved_group_name("Weapons"));
    }

    #[test]
    fn test_entry_type_serde_names() {
        let parsed: Vec<EntryType> = serde_json::from_str(r#"["ITEMS", "effects", "BLOCKS"]"#).unwrap();
        assert_eq!(
            parsed,
            vec![EntryType::Items, EntryType::Effects, EntryType::Blocks]
        );
        assert_eq!(serde_json::to_string(&EntryType::Effects).unwrap(), "\"EFFECTS\"");
    }

    #[test]
    fn test_entry_type_from_str() {
        assert_eq!("Items".parse::<EntryType>().unwrap(), EntryType::Items);
        assert_eq!("block".parse::<EntryType>().unwrap(), EntryType::Blocks);
        assert!("fluids".parse::<EntryType>().is_err());
    }

    #[test]
    fn test_custom_group_forms() {
        let bare: CustomGroup = serde_json::from_str(r#"["sword", "axe"]"#).unwrap();
        assert_eq!(bare.keywords(), ["sword", "axe"]);
        assert_eq!(bare.category(), None);

        let table: CustomGroup =
            serde_json::from_str(r#"{"category": "Arcane", "keywords": ["wand"]}"#).unwrap();
        assert_eq!(table.keywords(), ["wand"]);
        assert_eq!(table.category(), Some("Arcane"));
    }
}
