//! Export pipeline — classifies every enabled entry type, assigns effects,
//! and writes the resulting JSON artifacts.
//!
//! Export is best effort: each artifact that fails is logged and recorded
//! in the [`ExportReport`], and the remaining phases still run.

pub mod writer;

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tracing::{error, info, warn};

use jsongen_config::{EntryType, GroupConfig};

use crate::assign::{Assignment, EffectAssigner, ScoredEffect, StrengthSource};
use crate::entry::Entry;
use crate::grouping::{EntryValue, GroupingEngine, NestedGrouping, to_entry_values};
use crate::index::{CategoryIndex, SharedIndex};
use crate::source::EntrySource;

pub use writer::ArtifactWriter;

/// File name of the combined assignment artifact.
pub const ASSIGNMENT_FILE: &str = "items_with_effects.json";

/// Errors writing one artifact.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize artifact: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// An artifact that could not be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedArtifact {
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of one export run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// Artifacts written, in write order.
    pub written: Vec<PathBuf>,
    pub failed: Vec<FailedArtifact>,
    /// Per-item documents skipped because their path would leave the
    /// output directory.
    pub skipped: usize,
}

impl ExportReport {
    /// Whether every artifact was written and nothing was skipped.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty() && self.skipped == 0
    }

    fn record(&mut self, relative: &Path, result: Result<PathBuf, ExportError>) {
        match result {
            Ok(path) => {
                info!(path = %path.display(), "Wrote artifact");
                self.written.push(path);
            }
            Err(e) => {
                error!(artifact = %relative.display(), error = %e, "Failed to write artifact");
                self.failed.push(FailedArtifact {
                    path: relative.to_path_buf(),
                    error: e.to_string(),
                });
            }
        }
    }
}

impl fmt::Display for ExportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} written, {} failed, {} skipped",
            self.written.len(),
            self.failed.len(),
            self.skipped
        )
    }
}

#[derive(Serialize)]
struct CategoryDocument<'a> {
    timestamp: u64,
    categories: &'a NestedGrouping,
}

#[derive(Serialize)]
struct ItemDocument<'a> {
    #[serde(rename = "type")]
    document_type: &'a str,
    item: &'a str,
    effects: &'a [ScoredEffect],
}

fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Runs the full export for one configuration and output root.
#[derive(Debug, Clone)]
pub struct Exporter {
    config: GroupConfig,
    engine: GroupingEngine,
    assigner: EffectAssigner,
    writer: ArtifactWriter,
    index: SharedIndex,
}

impl Exporter {
    pub fn new(config: GroupConfig, output_root: impl Into<PathBuf>) -> Self {
        Self {
            engine: GroupingEngine::new(&config),
            assigner: EffectAssigner::from_config(&config.assignment),
            writer: ArtifactWriter::new(output_root, config.output.pretty),
            index: SharedIndex::new(),
            config,
        }
    }

    /// The category index published by the most recent [`Exporter::run`].
    pub fn index(&self) -> &SharedIndex {
        &self.index
    }

    pub fn output_root(&self) -> &Path {
        self.writer.root()
    }

    /// Directory holding the per-item documents.
    pub fn formatted_root(&self) -> PathBuf {
        self.writer.root().join(&self.config.output.formatted_dir)
    }

    /// Run every export phase. Failures are recorded in the report.
    ///
    /// Entries are fetched once per enabled type; the category index built
    /// from them is swapped into [`Exporter::index`] before any artifact is
    /// written.
    pub async fn run(
        &self,
        source: &dyn EntrySource,
        strength: &mut dyn StrengthSource,
    ) -> ExportReport {
        let mut report = ExportReport::default();
        let mut items: Vec<EntryValue> = Vec::new();
        let mut effects: Vec<EntryValue> = Vec::new();

        let fetched: BTreeMap<EntryType, Vec<Entry>> = self
            .config
            .enabled_types()
            .into_iter()
            .map(|entry_type| (entry_type, source.list_entries(entry_type)))
            .collect();
        let index = Arc::new(CategoryIndex::from_entries(&self.engine, &fetched));
        self.index.replace(Arc::clone(&index));

        for (&entry_type, entries) in &fetched {
            let values = self
                .export_type(&index, entry_type, entries, &mut report)
                .await;
            match entry_type {
                EntryType::Items => items = values,
                EntryType::Effects => effects = values,
                EntryType::Blocks => {}
            }
        }

        if self.config.is_enabled(EntryType::Items) && self.config.is_enabled(EntryType::Effects) {
            let assignment = self.assigner.assign(&items, &effects, strength);
            self.export_assignment(&assignment, &mut report).await;
        }

        info!(%report, "Export finished");
        report
    }

    /// Write the grouping artifacts of one entry type and return its
    /// entry values (empty for blocks).
    async fn export_type(
        &self,
        index: &CategoryIndex,
        entry_type: EntryType,
        entries: &[Entry],
        report: &mut ExportReport,
    ) -> Vec<EntryValue> {
        let unindexed = NestedGrouping::default();
        let nested = index.grouping(entry_type).unwrap_or(&unindexed);

        let by_group = PathBuf::from(format!("{entry_type}_by_group.json"));
        let result = self.writer.write_json(&by_group, &nested.flatten()).await;
        report.record(&by_group, result);

        let by_category = PathBuf::from(format!("{entry_type}_by_category.json"));
        let document = CategoryDocument {
            timestamp: epoch_millis(),
            categories: nested,
        };
        let result = self.writer.write_json(&by_category, &document).await;
        report.record(&by_category, result);

        if entry_type == EntryType::Blocks {
            return Vec::new();
        }

        let tags = self.engine.tag_by_namespace(entries, entry_type);
        let by_namespace = PathBuf::from(format!("{entry_type}_by_namespace.json"));
        let result = self.writer.write_json(&by_namespace, &tags).await;
        report.record(&by_namespace, result);

        to_entry_values(&tags)
    }

    async fn export_assignment(&self, assignment: &Assignment, report: &mut ExportReport) {
        let combined = Path::new(ASSIGNMENT_FILE);
        let result = self.writer.write_json(combined, assignment).await;
        report.record(combined, result);

        let formatted = Path::new(&self.config.output.formatted_dir);
        for (item, ranked) in assignment {
            let Some((namespace, path)) = item
                .split_once(':')
                .filter(|(ns, path)| writer::is_contained(ns) && writer::is_contained(path))
            else {
                warn!(item = %item, "Skipping item document outside the output directory");
                report.skipped += 1;
                continue;
            };
            let relative = formatted.join(namespace).join(format!("{path}.json"));
            let document = ItemDocument {
                document_type: &self.config.output.document_type,
                item,
                effects: ranked.as_slice(),
            };
            let result = self.writer.write_json(&relative, &document).await;
            report.record(&relative, result);
        }
    }
}
