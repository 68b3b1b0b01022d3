#![deny(unsafe_code)]

//! Group configuration loading and validation for jsongen.
//!
//! Loads the JSON (or TOML) group configuration and validates it. Provides the
//! [`GroupConfig`] type as the central configuration structure, and the
//! [`groups`] module for entry-type selection and custom group definitions.
//!
//! A packaged default document ([`DEFAULT_CONFIG`]) is written out by
//! [`GroupConfig::load_or_init`] whenever the configured file is missing or
//! is not JSON (or TOML) at all. A file that parses but contains bad fields
//! is recovered field by field instead.

/// Entry types and custom group definitions.
pub mod groups;
mod lenient;

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{info, warn};

pub use groups::{CustomGroup, EntryType, UNCATEGORIZED, is_reserved_group_name};

/// The packaged default configuration document.
pub const DEFAULT_CONFIG: &str = include_str!("../default_group_config.json");

/// Upper bound for `assignment.multiplier` and `assignment.variation`.
pub const MAX_WEIGHT: f64 = 1000.0;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

/// Top-level group configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupConfig {
    /// Entry types to export.
    #[serde(
        default = "default_entry_types",
        alias = "entryCategories",
        deserialize_with = "entry_types_or_default"
    )]
    pub entry_types: Vec<EntryType>,

    /// Known categories. The first one hosts custom groups that do not name
    /// a category of their own.
    #[serde(default = "default_categories", deserialize_with = "categories_or_default")]
    pub categories: Vec<String>,

    /// Identifier substrings that exclude an entry from every output.
    #[serde(default, deserialize_with = "null_as_default")]
    pub blacklist: Vec<String>,

    /// Custom keyword groups, in declaration order.
    #[serde(
        default,
        rename = "CustomGroups",
        alias = "customGroups",
        deserialize_with = "null_as_default"
    )]
    pub custom_groups: IndexMap<String, CustomGroup>,

    /// Output routing.
    #[serde(default)]
    pub output: OutputConfig,

    /// Effect assignment weights.
    #[serde(default)]
    pub assignment: AssignmentConfig,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            entry_types: default_entry_types(),
            categories: default_categories(),
            blacklist: Vec::new(),
            custom_groups: IndexMap::new(),
            output: OutputConfig::default(),
            assignment: AssignmentConfig::default(),
        }
    }
}

fn default_entry_types() -> Vec<EntryType> {
    vec![EntryType::Items, EntryType::Effects]
}

fn default_categories() -> Vec<String> {
    vec!["Misc".to_string()]
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn entry_types_or_default<'de, D>(deserializer: D) -> Result<Vec<EntryType>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_else(default_entry_types))
}

fn categories_or_default<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_else(default_categories))
}

/// Where and how export artifacts are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    /// Root directory for all artifacts.
    #[serde(default = "default_output_dir")]
    pub dir: String,

    /// Subdirectory (under `dir`) holding one document per item.
    #[serde(default = "default_formatted_dir")]
    pub formatted_dir: String,

    /// Value of the `type` field in per-item documents.
    #[serde(default = "default_document_type")]
    pub document_type: String,

    /// Pretty-print JSON output.
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            formatted_dir: default_formatted_dir(),
            document_type: default_document_type(),
            pretty: default_pretty(),
        }
    }
}

fn default_output_dir() -> String {
    "jsongenerator".to_string()
}

fn default_formatted_dir() -> String {
    "json".to_string()
}

fn default_document_type() -> String {
    "mysticalchemy:potion_ingredient".to_string()
}

fn default_pretty() -> bool {
    true
}

/// Weights of the effect assignment scoring function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentConfig {
    /// Bonus added per matching criterion.
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,

    /// Upper bound of the uniform random base score.
    #[serde(default = "default_variation")]
    pub variation: f64,

    /// Effects kept per ordinary item.
    #[serde(default = "default_effect_count")]
    pub effect_count: usize,

    /// Effects kept per rare item.
    #[serde(default = "default_rare_effect_count")]
    pub rare_effect_count: usize,

    /// Item tags that mark an item as rare.
    #[serde(default = "default_rare_tags")]
    pub rare_tags: Vec<String>,
}

impl Default for AssignmentConfig {
    fn default() -> Self {
        Self {
            multiplier: default_multiplier(),
            variation: default_variation(),
            effect_count: default_effect_count(),
            rare_effect_count: default_rare_effect_count(),
            rare_tags: default_rare_tags(),
        }
    }
}

fn default_multiplier() -> f64 {
    0.25
}

fn default_variation() -> f64 {
    0.35
}

fn default_effect_count() -> usize {
    3
}

fn default_rare_effect_count() -> usize {
    4
}

fn default_rare_tags() -> Vec<String> {
    ["Uncommon", "Rare", "Epic", "Legendary"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl GroupConfig {
    /// Load configuration from a file using async I/O.
    ///
    /// Files with a `.toml` extension are parsed as TOML, everything else as
    /// JSON.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path).await?;
        if is_toml(path) {
            Self::parse_toml(&content)
        } else {
            Self::parse(&content)
        }
    }

    /// Parse configuration from a JSON string.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: GroupConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse_toml(s: &str) -> Result<Self, ConfigError> {
        let config: GroupConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document, dropping fields and group entries that are
    /// malformed instead of rejecting the whole document.
    ///
    /// Fails only when the text is not JSON.
    pub fn parse_lenient(s: &str) -> Result<Self, ConfigError> {
        let document: serde_json::Value = serde_json::from_str(s)?;
        Ok(lenient::from_document(document))
    }

    /// TOML counterpart of [`GroupConfig::parse_lenient`].
    pub fn parse_toml_lenient(s: &str) -> Result<Self, ConfigError> {
        let document: serde_json::Value = toml::from_str(s)?;
        Ok(lenient::from_document(document))
    }

    /// The packaged default configuration.
    pub fn packaged_default() -> Result<Self, ConfigError> {
        Self::parse(DEFAULT_CONFIG)
    }

    /// Load the configuration at `path`, writing the packaged default first
    /// when the file is missing.
    ///
    /// Bad fields are dropped with a warning and the rest of the file is
    /// kept. Only a file that is not JSON (or TOML) at all is moved aside to
    /// `<name>.invalid` and replaced by the packaged default. I/O failures
    /// are returned as errors.
    pub async fn load_or_init(path: &Path) -> Result<Self, ConfigError> {
        if !tokio::fs::try_exists(path).await? {
            Self::write_default(path).await?;
            info!(path = %path.display(), "Created default group config");
            return Self::packaged_default();
        }

        let content = tokio::fs::read_to_string(path).await?;
        let parsed = if is_toml(path) {
            Self::parse_toml_lenient(&content)
        } else {
            Self::parse_lenient(&content)
        };

        match parsed {
            Ok(config) => {
                info!(
                    path = %path.display(),
                    groups = config.custom_groups.len(),
                    blacklist = config.blacklist.len(),
                    "Loaded group config"
                );
                Ok(config)
            }
            Err(e) => {
                let aside = invalid_path(path);
                warn!(
                    path = %path.display(),
                    moved_to = %aside.display(),
                    error = %e,
                    "Group config is not readable, restoring packaged default"
                );
                tokio::fs::rename(path, &aside).await?;
                Self::write_default(path).await?;
                Self::packaged_default()
            }
        }
    }

    /// Write the packaged default document to `path`, creating parent
    /// directories. TOML paths receive the default rendered as TOML.
    pub async fn write_default(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let document = if is_toml(path) {
            toml::to_string_pretty(&Self::packaged_default()?)?
        } else {
            DEFAULT_CONFIG.to_string()
        };
        tokio::fs::write(path, document).await?;
        Ok(())
    }

    /// Render the configuration as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Whether the given entry type is selected for export.
    pub fn is_enabled(&self, entry_type: EntryType) -> bool {
        self.entry_types.contains(&entry_type)
    }

    /// Selected entry types in export order, without duplicates.
    pub fn enabled_types(&self) -> Vec<EntryType> {
        EntryType::ALL
            .into_iter()
            .filter(|t| self.is_enabled(*t))
            .collect()
    }

    /// The category hosting custom groups without an explicit category.
    pub fn default_category(&self) -> &str {
        self.categories.first().map(String::as_str).unwrap_or("Misc")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.categories.is_empty() {
            return Err(ConfigError::Validation(
                "categories must contain at least one category".to_string(),
            ));
        }
        for (i, category) in self.categories.iter().enumerate() {
            if category.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "categories[{i}] must not be empty"
                )));
            }
        }

        for (i, term) in self.blacklist.iter().enumerate() {
            if term.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "blacklist[{i}] must not be empty"
                )));
            }
        }

        for (name, group) in &self.custom_groups {
            if name.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "CustomGroups keys must not be empty".to_string(),
                ));
            }
            if is_reserved_group_name(name) {
                return Err(ConfigError::Validation(format!(
                    "CustomGroups.{name} collides with a built-in fallback group name"
                )));
            }
            for (i, keyword) in group.keywords().iter().enumerate() {
                if keyword.is_empty() {
                    return Err(ConfigError::Validation(format!(
                        "CustomGroups.{name}[{i}] must not be empty"
                    )));
                }
            }
            if let Some(category) = group.category()
                && !self.categories.iter().any(|c| c == category)
            {
                return Err(ConfigError::Validation(format!(
                    "CustomGroups.{name}.category must be one of {:?}, got {category:?}",
                    self.categories
                )));
            }
        }

        let assignment = &self.assignment;
        let in_range = |weight: f64| weight.is_finite() && (0.0..=MAX_WEIGHT).contains(&weight);
        if !in_range(assignment.multiplier) {
            return Err(ConfigError::Validation(format!(
                "assignment.multiplier must be between 0 and {MAX_WEIGHT}, got {}",
                assignment.multiplier
            )));
        }
        if !in_range(assignment.variation) {
            return Err(ConfigError::Validation(format!(
                "assignment.variation must be between 0 and {MAX_WEIGHT}, got {}",
                assignment.variation
            )));
        }
        if assignment.effect_count == 0 {
            return Err(ConfigError::Validation(
                "assignment.effectCount must be at least 1".to_string(),
            ));
        }
        if assignment.rare_effect_count == 0 {
            return Err(ConfigError::Validation(
                "assignment.rareEffectCount must be at least 1".to_string(),
            ));
        }

        if self.output.dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "output.dir must not be empty".to_string(),
            ));
        }
        if self.output.document_type.is_empty() {
            return Err(ConfigError::Validation(
                "output.documentType must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("toml")
}

fn invalid_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".invalid");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = GroupConfig::default();
        assert_eq!(config.entry_types, vec![EntryType::Items, EntryType::Effects]);
        assert_eq!(config.categories, vec!["Misc".to_string()]);
        assert!(config.blacklist.is_empty());
        assert!(config.custom_groups.is_empty());
        assert_eq!(config.assignment.effect_count, 3);
        assert_eq!(config.assignment.rare_effect_count, 4);
    }

    #[test]
    fn test_parse_empty_document() {
        let config = GroupConfig::parse("{}").unwrap();
        assert_eq!(config, GroupConfig::default());
    }

    #[test]
    fn test_packaged_default_is_valid() {
        let config = GroupConfig::packaged_default().unwrap();
        assert!(config.is_enabled(EntryType::Items));
        assert!(config.is_enabled(EntryType::Effects));
        assert!(!config.is_enabled(EntryType::Blocks));
        assert!(config.blacklist.iter().any(|t| t == "spawn_egg"));
        assert!(!config.custom_groups.is_empty());
    }

    #[test]
    fn test_parse_full_json() {
        let json = r#"{
            "entryTypes": ["ITEMS", "BLOCKS"],
            "categories": ["Misc", "Arcane"],
            "blacklist": ["spawn_egg", "debug_"],
            "CustomGroups": {
                "Weapons": ["sword", "axe"],
                "Magic": {"category": "Arcane", "keywords": ["wand"]}
            },
            "output": {"dir": "out", "documentType": "mod:ingredient"},
            "assignment": {"multiplier": 0.5, "effectCount": 2}
        }"#;
        let config = GroupConfig::parse(json).unwrap();
        assert_eq!(config.enabled_types(), vec![EntryType::Items, EntryType::Blocks]);
        assert_eq!(config.blacklist, vec!["spawn_egg", "debug_"]);
        assert_eq!(config.custom_groups["Weapons"].keywords(), ["sword", "axe"]);
        assert_eq!(config.custom_groups["Magic"].category(), Some("Arcane"));
        assert_eq!(config.output.dir, "out");
        assert_eq!(config.output.formatted_dir, "json");
        assert_eq!(config.output.document_type, "mod:ingredient");
        assert_eq!(config.assignment.multiplier, 0.5);
        assert_eq!(config.assignment.effect_count, 2);
        assert_eq!(config.assignment.variation, 0.35);
    }

    #[test]
    fn test_custom_groups_keep_declaration_order() {
        let json = r#"{"CustomGroups": {"Zeta": ["z"], "Alpha": ["a"], "Mid": ["m"]}}"#;
        let config = GroupConfig::parse(json).unwrap();
        let names: Vec<&str> = config.custom_groups.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_aliases_accepted() {
        let json = r#"{"entryCategories": ["EFFECTS"], "customGroups": {"Fire": ["fire"]}}"#;
        let config = GroupConfig::parse(json).unwrap();
        assert_eq!(config.entry_types, vec![EntryType::Effects]);
        assert!(config.custom_groups.contains_key("Fire"));
    }

    #[test]
    fn test_null_fields_treated_as_absent() {
        let json = r#"{"entryTypes": null, "categories": null, "blacklist": null, "CustomGroups": null}"#;
        let config = GroupConfig::parse(json).unwrap();
        assert_eq!(config, GroupConfig::default());
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            entryTypes = ["EFFECTS"]
            blacklist = ["bad_omen"]

            [CustomGroups]
            Speed = ["speed", "haste"]
        "#;
        let config = GroupConfig::parse_toml(toml).unwrap();
        assert_eq!(config.entry_types, vec![EntryType::Effects]);
        assert_eq!(config.custom_groups["Speed"].keywords(), ["speed", "haste"]);
    }

    #[test]
    fn test_validation_rejects_empty_keyword() {
        let json = r#"{"CustomGroups": {"Everything": [""]}}"#;
        assert!(GroupConfig::parse(json).is_err());
    }

    #[test]
    fn test_validation_rejects_empty_blacklist_term() {
        let json = r#"{"blacklist": ["spawn_egg", ""]}"#;
        assert!(GroupConfig::parse(json).is_err());
    }

    #[test]
    fn test_validation_rejects_unknown_group_category() {
        let json = r#"{"CustomGroups": {"Magic": {"category": "Arcane", "keywords": ["wand"]}}}"#;
        let err = GroupConfig::parse(json).unwrap_err();
        assert!(err.to_string().contains("Arcane"));
    }

    #[test]
    fn test_validation_rejects_fallback_group_names() {
        let err = GroupConfig::parse(r#"{"CustomGroups": {"Rarity: Rare": ["gem"]}}"#).unwrap_err();
        assert!(err.to_string().contains("Rarity: Rare"));
        assert!(GroupConfig::parse(r#"{"CustomGroups": {"Uncategorized": ["x"]}}"#).is_err());
    }

    #[test]
    fn test_validation_rejects_empty_categories() {
        assert!(GroupConfig::parse(r#"{"categories": []}"#).is_err());
    }

    #[test]
    fn test_validation_rejects_negative_weights() {
        assert!(GroupConfig::parse(r#"{"assignment": {"multiplier": -0.1}}"#).is_err());
        assert!(GroupConfig::parse(r#"{"assignment": {"variation": -1}}"#).is_err());
        assert!(GroupConfig::parse(r#"{"assignment": {"effectCount": 0}}"#).is_err());
    }

    #[test]
    fn test_validation_rejects_oversized_weights() {
        assert!(GroupConfig::parse(r#"{"assignment": {"multiplier": 50000000.0}}"#).is_err());
        assert!(GroupConfig::parse(r#"{"assignment": {"variation": 1000.5}}"#).is_err());
        assert!(GroupConfig::parse(r#"{"assignment": {"multiplier": 1000.0}}"#).is_ok());
    }

    #[test]
    fn test_validation_rejects_unknown_entry_type() {
        assert!(GroupConfig::parse(r#"{"entryTypes": ["FLUIDS"]}"#).is_err());
    }

    #[test]
    fn test_default_category() {
        let config = GroupConfig::parse(r#"{"categories": ["Loot", "Misc"]}"#).unwrap();
        assert_eq!(config.default_category(), "Loot");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("bad value".to_string());
        assert_eq!(err.to_string(), "validation error: bad value");
    }

    // ── Async file-based loading ──────────────────────────────────────

    #[test_log::test(tokio::test)]
    async fn test_load_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("group_config.json");
        tokio::fs::write(&path, br#"{"blacklist": ["barrier"]}"#)
            .await
            .unwrap();

        let config = GroupConfig::load(&path).await.unwrap();
        assert_eq!(config.blacklist, vec!["barrier"]);
    }

    #[test_log::test(tokio::test)]
    async fn test_load_nonexistent_file() {
        let result = GroupConfig::load(Path::new("/nonexistent/group_config.json")).await;
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test_log::test(tokio::test)]
    async fn test_load_or_init_creates_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("json-generator").join("group_config.json");

        let config = GroupConfig::load_or_init(&path).await.unwrap();
        assert_eq!(config, GroupConfig::packaged_default().unwrap());

        let written = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(written, DEFAULT_CONFIG);
    }

    #[test_log::test(tokio::test)]
    async fn test_load_or_init_keeps_existing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("group_config.json");
        tokio::fs::write(&path, br#"{"CustomGroups": {"Gems": ["gem"]}}"#)
            .await
            .unwrap();

        let config = GroupConfig::load_or_init(&path).await.unwrap();
        assert_eq!(config.custom_groups.len(), 1);
    }

    #[test_log::test(tokio::test)]
    async fn test_load_or_init_replaces_invalid_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("group_config.json");
        tokio::fs::write(&path, b"not valid json {{{").await.unwrap();

        let config = GroupConfig::load_or_init(&path).await.unwrap();
        assert_eq!(config, GroupConfig::packaged_default().unwrap());

        let aside = tmp.path().join("group_config.json.invalid");
        let preserved = tokio::fs::read_to_string(&aside).await.unwrap();
        assert_eq!(preserved, "not valid json {{{");
        let restored = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(restored, DEFAULT_CONFIG);
    }

    #[test_log::test(tokio::test)]
    async fn test_load_or_init_keeps_valid_groups_beside_malformed_one() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("group_config.json");
        let original = r#"{"blacklist":["my_term"],"CustomGroups":{"Gems":["gem"],"Bad":"oops"}}"#;
        tokio::fs::write(&path, original).await.unwrap();

        let config = GroupConfig::load_or_init(&path).await.unwrap();
        let names: Vec<&str> = config.custom_groups.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Gems"]);
        assert_eq!(config.blacklist, vec!["my_term"]);

        // The user's file is left untouched.
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), original);
        assert!(!tmp.path().join("group_config.json.invalid").exists());
    }

    #[test_log::test(tokio::test)]
    async fn test_load_or_init_drops_unknown_entry_type() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("group_config.json");
        tokio::fs::write(&path, r#"{"entryTypes":["ITEMS","FLUIDS"],"CustomGroups":{"Gems":["gem"]}}"#)
            .await
            .unwrap();

        let config = GroupConfig::load_or_init(&path).await.unwrap();
        assert_eq!(config.entry_types, vec![EntryType::Items]);
        assert_eq!(config.custom_groups.len(), 1);
        assert!(config.blacklist.is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn test_load_or_init_recovers_toml_fields() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("group_config.toml");
        let toml = r#"
            blacklist = "not a list"

            [CustomGroups]
            Speed = ["speed"]
            Broken = 3
        "#;
        tokio::fs::write(&path, toml).await.unwrap();

        let config = GroupConfig::load_or_init(&path).await.unwrap();
        assert!(config.blacklist.is_empty());
        assert_eq!(config.custom_groups.keys().collect::<Vec<_>>(), vec!["Speed"]);
    }

    #[test_log::test(tokio::test)]
    async fn test_write_default_as_toml_round_trips() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("group_config.toml");

        GroupConfig::write_default(&path).await.unwrap();
        let config = GroupConfig::load(&path).await.unwrap();
        assert_eq!(config, GroupConfig::packaged_default().unwrap());
    }
}
