//! Registry entry model: identifiers plus the intrinsic tags and kinds they carry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors from parsing a `namespace:path` identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    #[error("identifier {0:?} has no ':' separator")]
    MissingSeparator(String),

    #[error("identifier {0:?} has an empty namespace")]
    EmptyNamespace(String),

    #[error("identifier {0:?} has an empty path")]
    EmptyPath(String),

    #[error("identifier {id:?} contains invalid character {found:?}")]
    InvalidCharacter { id: String, found: char },
}

/// A `namespace:path` registry identifier, lowercase-normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier {
    namespace: String,
    path: String,
}

impl Identifier {
    /// Build an identifier from its two parts.
    pub fn new(namespace: &str, path: &str) -> Result<Self, IdentifierError> {
        format!("{namespace}:{path}").parse()
    }

    /// The namespace (content origin).
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The path within the namespace.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        let Some((namespace, path)) = lowered.split_once(':') else {
            return Err(IdentifierError::MissingSeparator(s.to_string()));
        };
        if namespace.is_empty() {
            return Err(IdentifierError::EmptyNamespace(s.to_string()));
        }
        if path.is_empty() {
            return Err(IdentifierError::EmptyPath(s.to_string()));
        }
        let bad_namespace = namespace.chars().find(|c| !is_namespace_char(*c));
        let bad_path = path.chars().find(|c| !is_path_char(*c));
        if let Some(found) = bad_namespace.or(bad_path) {
            return Err(IdentifierError::InvalidCharacter {
                id: s.to_string(),
                found,
            });
        }
        Ok(Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        })
    }
}

fn is_namespace_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '.' | '-')
}

fn is_path_char(c: char) -> bool {
    is_namespace_char(c) || c == '/'
}

impl TryFrom<String> for Identifier {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.to_string()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

/// Structural kind flags of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Weapon,
    Tool,
    Armor,
    Block,
    Food,
    Ranged,
    Dye,
}

impl FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "weapon" | "sword" => Ok(ItemKind::Weapon),
            "tool" | "pickaxe" | "axe" | "shovel" | "hoe" => Ok(ItemKind::Tool),
            "armor" | "armour" => Ok(ItemKind::Armor),
            "block" => Ok(ItemKind::Block),
            "food" => Ok(ItemKind::Food),
            "ranged" | "bow" | "crossbow" => Ok(ItemKind::Ranged),
            "dye" => Ok(ItemKind::Dye),
            other => Err(format!("unknown item kind {other:?}")),
        }
    }
}

/// Item rarity tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Title-cased display name.
    pub fn title(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }
}

impl FromStr for Rarity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "common" => Ok(Rarity::Common),
            "uncommon" => Ok(Rarity::Uncommon),
            "rare" => Ok(Rarity::Rare),
            "epic" => Ok(Rarity::Epic),
            "legendary" => Ok(Rarity::Legendary),
            _ => Err(()),
        }
    }
}

/// Status effect categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectCategory {
    Beneficial,
    Harmful,
    Neutral,
}

impl EffectCategory {
    /// Title-cased display name.
    pub fn title(&self) -> &'static str {
        match self {
            EffectCategory::Beneficial => "Beneficial",
            EffectCategory::Harmful => "Harmful",
            EffectCategory::Neutral => "Neutral",
        }
    }
}

impl FromStr for EffectCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "beneficial" => Ok(EffectCategory::Beneficial),
            "harmful" => Ok(EffectCategory::Harmful),
            "neutral" => Ok(EffectCategory::Neutral),
            _ => Err(()),
        }
    }
}

/// A registry entry: identifier plus intrinsic descriptive data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Stable registry identifier.
    pub id: Identifier,
    /// Intrinsic tags such as a rarity or effect-category name.
    pub tags: Vec<String>,
    /// Structural kind flags (items only).
    pub kinds: Vec<ItemKind>,
    /// Description id, e.g. `item.minecraft.potion`.
    pub description: String,
}

impl Entry {
    /// An entry with no tags, kinds, or description.
    pub fn new(id: Identifier) -> Self {
        Self {
            id,
            tags: Vec::new(),
            kinds: Vec::new(),
            description: String::new(),
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

    pub fn with_kinds(mut self, kinds: impl IntoIterator<Item = ItemKind>) -> Self {
        self.kinds = kinds.into_iter().collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The first tag naming a rarity, or [`Rarity::Common`].
    pub fn rarity(&self) -> Rarity {
        self.tags
            .iter()
            .find_map(|t| t.parse().ok())
            .unwrap_or(Rarity::Common)
    }

    /// The first tag naming an effect category, or [`EffectCategory::Neutral`].
    pub fn effect_category(&self) -> EffectCategory {
        self.tags
            .iter()
            .find_map(|t| t.parse().ok())
            .unwrap_or(EffectCategory::Neutral)
    }

    pub fn has_kind(&self, kind: ItemKind) -> bool {
        self.kinds.contains(&kind)
    }
}
