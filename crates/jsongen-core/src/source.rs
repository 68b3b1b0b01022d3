//! Entry sources: where registry entries come from.
//!
//! The exporter only sees the [`EntrySource`] trait. [`RegistrySnapshot`] is
//! the bundled implementation: an immutable dump of the item, effect, and
//! block registries read from a JSON document.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use jsongen_config::EntryType;

use crate::entry::{Entry, Identifier, ItemKind};

/// Supplies the entries of one registry.
///
/// Implementations must return the same entries in the same order for
/// repeated calls within one export run.
pub trait EntrySource {
    fn list_entries(&self, entry_type: EntryType) -> Vec<Entry>;
}

/// Errors from reading a registry snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read registry snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse registry snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

/// An in-memory snapshot of the item, effect, and block registries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrySnapshot {
    items: Vec<Entry>,
    effects: Vec<Entry>,
    blocks: Vec<Entry>,
}

#[derive(Deserialize)]
struct SnapshotDocument {
    #[serde(default)]
    items: Vec<RawEntry>,
    #[serde(default)]
    effects: Vec<RawEntry>,
    #[serde(default)]
    blocks: Vec<RawEntry>,
}

#[derive(Deserialize)]
struct RawEntry {
    id: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    kinds: Vec<String>,
    #[serde(default)]
    description: String,
}

impl RawEntry {
    /// Convert into an [`Entry`], or `None` when the identifier is malformed.
    fn into_entry(self) -> Option<Entry> {
        let id: Identifier = match self.id.parse() {
            Ok(id) => id,
            Err(e) => {
                debug!(error = %e, "Skipping registry entry with malformed identifier");
                return None;
            }
        };
        let kinds: Vec<ItemKind> = self
            .kinds
            .iter()
            .filter_map(|k| match k.parse::<ItemKind>() {
                Ok(kind) => Some(kind),
                Err(e) => {
                    debug!(id = %id, error = %e, "Ignoring unknown item kind");
                    None
                }
            })
            .collect();
        Some(
            Entry::new(id)
                .with_tags(self.tags)
                .with_kinds(kinds)
                .with_description(self.description),
        )
    }
}

fn convert(raw: Vec<RawEntry>) -> Vec<Entry> {
    raw.into_iter().filter_map(RawEntry::into_entry).collect()
}

impl RegistrySnapshot {
    /// An empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a snapshot document from a JSON file using async I/O.
    pub async fn load(path: &Path) -> Result<Self, SourceError> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_json(&content)
    }

    /// Parse a snapshot document.
    ///
    /// Entries with malformed identifiers are skipped; unknown item kinds are
    /// dropped from their entry.
    pub fn from_json(s: &str) -> Result<Self, SourceError> {
        let doc: SnapshotDocument = serde_json::from_str(s)?;
        Ok(Self {
            items: convert(doc.items),
            effects: convert(doc.effects),
            blocks: convert(doc.blocks),
        })
    }

    /// Replace the entries of one registry.
    pub fn with_entries(mut self, entry_type: EntryType, entries: Vec<Entry>) -> Self {
        *self.registry_mut(entry_type) = entries;
        self
    }

    /// Append one entry to a registry.
    pub fn push(&mut self, entry_type: EntryType, entry: Entry) {
        self.registry_mut(entry_type).push(entry);
    }

    /// Entries of one registry.
    pub fn entries(&self, entry_type: EntryType) -> &[Entry] {
        match entry_type {
            EntryType::Items => &self.items,
            EntryType::Effects => &self.effects,
            EntryType::Blocks => &self.blocks,
        }
    }

    /// Total number of entries across all registries.
    pub fn len(&self) -> usize {
        self.items.len() + self.effects.len() + self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn registry_mut(&mut self, entry_type: EntryType) -> &mut Vec<Entry> {
        match entry_type {
            EntryType::Items => &mut self.items,
            EntryType::Effects => &mut self.effects,
            EntryType::Blocks => &mut self.blocks,
        }
    }
}

impl EntrySource for RegistrySnapshot {
    fn list_entries(&self, entry_type: EntryType) -> Vec<Entry> {
        self.entries(entry_type).to_vec()
    }
}
