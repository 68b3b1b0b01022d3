//! Temp-dir export harness.

use std::path::{Path, PathBuf};

use jsongen_config::GroupConfig;
use jsongen_core::{EntrySource, ExportReport, Exporter, StrengthSource};
use tempfile::TempDir;

/// An [`Exporter`] writing into an owned temporary directory.
///
/// The directory is removed when this value is dropped.
pub struct TestExport {
    pub exporter: Exporter,
    _temp_dir: TempDir,
}

impl TestExport {
    pub fn new(config: GroupConfig) -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let exporter = Exporter::new(config, temp_dir.path());
        Self {
            exporter,
            _temp_dir: temp_dir,
        }
    }

    pub fn root(&self) -> &Path {
        self.exporter.output_root()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    pub async fn run(
        &self,
        source: &dyn EntrySource,
        strength: &mut dyn StrengthSource,
    ) -> ExportReport {
        self.exporter.run(source, strength).await
    }

    /// Parse an artifact written under the output root.
    pub async fn read_json(&self, relative: &str) -> serde_json::Value {
        let text = tokio::fs::read_to_string(self.path(relative))
            .await
            .unwrap_or_else(|e| panic!("failed to read {relative}: {e}"));
        serde_json::from_str(&text).unwrap_or_else(|e| panic!("{relative} is not JSON: {e}"))
    }

    /// Raw text of an artifact.
    pub async fn read_text(&self, relative: &str) -> String {
        tokio::fs::read_to_string(self.path(relative))
            .await
            .unwrap_or_else(|e| panic!("failed to read {relative}: {e}"))
    }
}
