use std::path::{Path, PathBuf};

use serde::Serialize;

use super::ExportError;

/// Serializes artifacts to JSON files beneath an output root.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    root: PathBuf,
    pretty: bool,
}

impl ArtifactWriter {
    pub fn new(root: impl Into<PathBuf>, pretty: bool) -> Self {
        Self {
            root: root.into(),
            pretty,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Render a value as JSON text.
    pub fn render<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, ExportError> {
        let text = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(text)
    }

    /// Write a value to `relative` under the root, creating parent
    /// directories. Returns the full path written.
    pub async fn write_json<T: Serialize + ?Sized>(
        &self,
        relative: &Path,
        value: &T,
    ) -> Result<PathBuf, ExportError> {
        let path = self.root.join(relative);
        let text = self.render(value)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| ExportError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        tokio::fs::write(&path, text)
            .await
            .map_err(|source| ExportError::Io {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }
}

/// Whether a relative path made of `/`-separated segments stays beneath
/// its parent directory.
pub(crate) fn is_contained(relative: &str) -> bool {
    !relative.is_empty()
        && relative
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}
