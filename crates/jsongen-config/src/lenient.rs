//! Field-by-field recovery of a group config document.
//!
//! A document that parses as JSON or TOML but fails strict deserialization or
//! validation is salvaged here: every field is read on its own, and a bad
//! field (or a bad element inside one) is dropped with a warning while the
//! rest of the user's settings are kept.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

use crate::groups::{CustomGroup, EntryType, is_reserved_group_name};
use crate::{
    AssignmentConfig, GroupConfig, MAX_WEIGHT, OutputConfig, default_categories,
    default_entry_types,
};

/// Build a config from a parsed document, discarding only what is unusable.
///
/// The result always passes [`GroupConfig::validate`].
pub(crate) fn from_document(document: Value) -> GroupConfig {
    let Value::Object(fields) = document else {
        warn!("Group config is not a table, using built-in defaults");
        return GroupConfig::default();
    };

    let categories = categories(&fields);
    let custom_groups = custom_groups(&fields, &categories);

    GroupConfig {
        entry_types: entry_types(&fields),
        blacklist: blacklist(&fields),
        custom_groups,
        output: output(&fields),
        assignment: assignment(&fields),
        categories,
    }
}

/// Look up a field by its primary name or alias. `null` counts as absent.
fn field<'a>(fields: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .find_map(|name| fields.get(*name))
        .filter(|value| !value.is_null())
}

/// Array elements of `value`, or `None` with a warning when it is not an array.
fn elements<'a>(value: &'a Value, name: &str) -> Option<&'a Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        other => {
            warn!(field = name, value = %other, "Expected a list, ignoring field");
            None
        }
    }
}

fn entry_types(fields: &Map<String, Value>) -> Vec<EntryType> {
    let Some(value) = field(fields, &["entryTypes", "entryCategories"]) else {
        return default_entry_types();
    };
    let Some(items) = elements(value, "entryTypes") else {
        return default_entry_types();
    };

    items
        .iter()
        .filter_map(|item| match item.as_str().map(str::parse::<EntryType>) {
            Some(Ok(entry_type)) => Some(entry_type),
            _ => {
                warn!(value = %item, "Unknown entry type, dropping");
                None
            }
        })
        .collect()
}

fn categories(fields: &Map<String, Value>) -> Vec<String> {
    let categories: Vec<String> = field(fields, &["categories"])
        .and_then(|value| elements(value, "categories"))
        .map(|items| strings(items, "categories"))
        .unwrap_or_default();

    if categories.is_empty() {
        default_categories()
    } else {
        categories
    }
}

fn blacklist(fields: &Map<String, Value>) -> Vec<String> {
    field(fields, &["blacklist"])
        .and_then(|value| elements(value, "blacklist"))
        .map(|items| strings(items, "blacklist"))
        .unwrap_or_default()
}

/// Non-blank strings of a list; anything else is dropped with a warning.
fn strings(items: &[Value], name: &str) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| match item.as_str() {
            Some(s) if !s.trim().is_empty() => Some(s.to_string()),
            _ => {
                warn!(field = name, value = %item, "Dropping invalid list element");
                None
            }
        })
        .collect()
}

fn custom_groups(
    fields: &Map<String, Value>,
    categories: &[String],
) -> IndexMap<String, CustomGroup> {
    let Some(value) = field(fields, &["CustomGroups", "customGroups"]) else {
        return IndexMap::new();
    };
    let Value::Object(groups) = value else {
        warn!(value = %value, "CustomGroups is not a table, ignoring field");
        return IndexMap::new();
    };

    let mut kept = IndexMap::new();
    for (name, definition) in groups {
        if name.trim().is_empty() {
            warn!("Skipping custom group with an empty name");
            continue;
        }
        if is_reserved_group_name(name) {
            warn!(group = %name, "Skipping custom group named like a fallback group");
            continue;
        }
        let group = match serde_json::from_value::<CustomGroup>(definition.clone()) {
            Ok(group) => group,
            Err(e) => {
                warn!(group = %name, error = %e, "Skipping malformed custom group");
                continue;
            }
        };
        if let Some(category) = group.category()
            && !categories.iter().any(|c| c == category)
        {
            warn!(group = %name, category, "Skipping custom group with unknown category");
            continue;
        }
        kept.insert(name.clone(), without_empty_keywords(name, group));
    }
    kept
}

fn without_empty_keywords(name: &str, group: CustomGroup) -> CustomGroup {
    let strip = |keywords: Vec<String>| -> Vec<String> {
        let before = keywords.len();
        let kept: Vec<String> = keywords.into_iter().filter(|k| !k.is_empty()).collect();
        if kept.len() != before {
            warn!(group = %name, "Dropping empty keywords");
        }
        kept
    };
    match group {
        CustomGroup::Keywords(keywords) => CustomGroup::Keywords(strip(keywords)),
        CustomGroup::Categorized { category, keywords } => CustomGroup::Categorized {
            category,
            keywords: strip(keywords),
        },
    }
}

/// Deserialize a whole sub-table, falling back to its default on error.
fn section<T: DeserializeOwned + Default>(fields: &Map<String, Value>, name: &str) -> T {
    let Some(value) = field(fields, &[name]) else {
        return T::default();
    };
    serde_json::from_value(value.clone()).unwrap_or_else(|e| {
        warn!(field = name, error = %e, "Malformed config section, using defaults");
        T::default()
    })
}

fn output(fields: &Map<String, Value>) -> OutputConfig {
    let mut output: OutputConfig = section(fields, "output");
    let defaults = OutputConfig::default();
    if output.dir.trim().is_empty() {
        warn!("output.dir is empty, using default");
        output.dir = defaults.dir;
    }
    if output.document_type.is_empty() {
        warn!("output.documentType is empty, using default");
        output.document_type = defaults.document_type;
    }
    output
}

fn assignment(fields: &Map<String, Value>) -> AssignmentConfig {
    let mut assignment: AssignmentConfig = section(fields, "assignment");
    let defaults = AssignmentConfig::default();
    let usable = |weight: f64| weight.is_finite() && (0.0..=MAX_WEIGHT).contains(&weight);

    if !usable(assignment.multiplier) {
        warn!(value = assignment.multiplier, "assignment.multiplier out of range, using default");
        assignment.multiplier = defaults.multiplier;
    }
    if !usable(assignment.variation) {
        warn!(value = assignment.variation, "assignment.variation out of range, using default");
        assignment.variation = defaults.variation;
    }
    if assignment.effect_count == 0 {
        assignment.effect_count = defaults.effect_count;
    }
    if assignment.rare_effect_count == 0 {
        assignment.rare_effect_count = defaults.rare_effect_count;
    }
    assignment
}
