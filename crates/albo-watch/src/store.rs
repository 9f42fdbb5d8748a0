//! Durable record of links that have already been notified.

use std::collections::{btree_set, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::StoreError;

/// Default location of the state file.
pub const DEFAULT_STATE_PATH: &str = "data/found_tenders.json";

/// Set of announcement links that were already notified.
///
/// Serialized as a plain JSON array of strings. Only grows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeenSet(BTreeSet<String>);

impl SeenSet {
    /// Check if a link has been notified.
    pub fn contains(&self, link: &str) -> bool {
        self.0.contains(link)
    }

    /// Record a link. Returns `false` if it was already present.
    pub fn insert(&mut self, link: impl Into<String>) -> bool {
        self.0.insert(link.into())
    }

    /// Number of recorded links.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no link has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate recorded links in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<'a> IntoIterator for &'a SeenSet {
    type Item = &'a String;
    type IntoIter = btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for SeenSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// JSON file holding the [`SeenSet`].
#[derive(Debug, Clone)]
pub struct SeenStore {
    path: PathBuf,
}

impl SeenStore {
    /// Create a store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the state file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the seen set, falling back to an empty set.
    ///
    /// A missing file is the normal first-run case. An unreadable or corrupt
    /// file is logged and treated as empty so the watcher can still start.
    pub async fn load(&self) -> SeenSet {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "No state file yet, starting empty");
                return SeenSet::default();
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to read state file, starting empty"
                );
                return SeenSet::default();
            }
        };

        match serde_json::from_str::<SeenSet>(&content) {
            Ok(seen) => {
                tracing::info!(path = %self.path.display(), count = seen.len(), "Loaded seen links");
                seen
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "State file is corrupt, starting empty"
                );
                SeenSet::default()
            }
        }
    }

    /// Overwrite the state file with the full set.
    ///
    /// The content goes to a sibling temp file first and is renamed over the
    /// target, so a crash mid-write leaves the previous state intact.
    pub async fn persist(&self, seen: &SeenSet) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(seen)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| self.write_error(e))?;
        }

        let tmp = self.tmp_path();
        fs::write(&tmp, content)
            .await
            .map_err(|e| self.write_error(e))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| self.write_error(e))?;

        tracing::debug!(path = %self.path.display(), count = seen.len(), "Persisted seen links");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source,
        }
    }
}
