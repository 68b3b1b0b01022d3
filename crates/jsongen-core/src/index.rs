//! Category index — an explicitly built, read-only view of the nested
//! grouping of every enabled entry type.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use jsongen_config::{EntryType, GroupConfig};

use crate::entry::Entry;
use crate::grouping::{GroupingEngine, NestedGrouping, fallback_for};
use crate::source::EntrySource;

/// Category → group → members for each enabled entry type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryIndex {
    groupings: BTreeMap<EntryType, NestedGrouping>,
}

impl CategoryIndex {
    /// Fetch and classify every enabled entry type.
    pub fn build(source: &dyn EntrySource, config: &GroupConfig) -> Self {
        let fetched: BTreeMap<EntryType, Vec<Entry>> = config
            .enabled_types()
            .into_iter()
            .map(|entry_type| (entry_type, source.list_entries(entry_type)))
            .collect();
        Self::from_entries(&GroupingEngine::new(config), &fetched)
    }

    /// Classify already fetched entries, one grouping per entry type.
    pub fn from_entries(
        engine: &GroupingEngine,
        fetched: &BTreeMap<EntryType, Vec<Entry>>,
    ) -> Self {
        let groupings = fetched
            .iter()
            .map(|(&entry_type, entries)| {
                let nested = engine.classify_nested(entries, fallback_for(entry_type));
                debug!(
                    entry_type = %entry_type,
                    entries = entries.len(),
                    grouped = nested.member_count(),
                    "Indexed entry type"
                );
                (entry_type, nested)
            })
            .collect();
        Self { groupings }
    }

    /// The nested grouping of one entry type, if it was indexed.
    pub fn grouping(&self, entry_type: EntryType) -> Option<&NestedGrouping> {
        self.groupings.get(&entry_type)
    }

    pub fn categories(&self, entry_type: EntryType) -> Vec<&str> {
        self.grouping(entry_type)
            .map(|g| g.categories().collect())
            .unwrap_or_default()
    }

    pub fn groups(&self, entry_type: EntryType, category: &str) -> Vec<&str> {
        self.grouping(entry_type)
            .map(|g| g.groups(category).collect())
            .unwrap_or_default()
    }

    pub fn members(&self, entry_type: EntryType, category: &str, group: &str) -> &[String] {
        self.grouping(entry_type)
            .map(|g| g.members(category, group))
            .unwrap_or_default()
    }

    /// Category and group holding an identifier.
    pub fn locate(&self, entry_type: EntryType, id: &str) -> Option<(&str, &str)> {
        self.grouping(entry_type)?.locate(id)
    }

    /// Total number of indexed entries.
    pub fn len(&self) -> usize {
        self.groupings.values().map(NestedGrouping::member_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A [`CategoryIndex`] that can be replaced while readers hold snapshots.
///
/// Readers see either the previous index or a fully built new one.
#[derive(Debug, Clone, Default)]
pub struct SharedIndex {
    current: Arc<RwLock<Arc<CategoryIndex>>>,
}

impl SharedIndex {
    /// A shared handle starting from an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current index.
    pub fn snapshot(&self) -> Arc<CategoryIndex> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Build a new index and swap it in once complete.
    pub fn rebuild(&self, source: &dyn EntrySource, config: &GroupConfig) -> Arc<CategoryIndex> {
        let index = Arc::new(CategoryIndex::build(source, config));
        self.replace(Arc::clone(&index));
        index
    }

    /// Swap in an already built index.
    pub fn replace(&self, index: Arc<CategoryIndex>) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = index;
    }
}
