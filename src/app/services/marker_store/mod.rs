//! Collection document store
//!
//! This module handles loading and saving marker collections as JSON
//! documents on disk, one file per collection key. A missing file is a
//! normal state (the collection has not been created yet) and loads as an
//! empty collection; a file that exists but cannot be parsed, or parses
//! without the required record array, is an error.

use crate::app::models::{Collection, CollectionKey};
use crate::{Error, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[cfg(test)]
pub mod tests;

/// Filesystem-backed store for marker collections
#[derive(Debug, Clone)]
pub struct MarkerStore {
    /// Directory holding one JSON document per collection key
    data_dir: PathBuf,
}

impl MarkerStore {
    /// Create a store rooted at the given data directory
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// The store's data directory
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the persisted document for a collection key
    pub fn file_path(&self, key: CollectionKey) -> PathBuf {
        self.data_dir.join(key.file_name())
    }

    /// Create the data directory if it does not exist yet
    pub fn ensure_data_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir).map_err(|e| {
            Error::io(
                format!("Failed to create data directory {}", self.data_dir.display()),
                e,
            )
        })
    }

    /// Load the collection for a key
    ///
    /// A missing file yields an empty collection. A file that cannot be
    /// parsed yields `Error::Decode`; a parsed document without the
    /// `STATION` array yields `Error::Structure`.
    pub fn load(&self, key: CollectionKey) -> Result<Collection> {
        let path = self.file_path(key);

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Collection '{}' has no document yet, starting empty", key);
                return Ok(Collection::empty());
            }
            Err(e) => {
                return Err(Error::io(format!("Failed to read {}", path.display()), e));
            }
        };

        let document: serde_json::Value = serde_json::from_str(&raw)
            .map_err(|e| Error::decode(format!("Failed to parse {}", path.display()), e))?;

        Collection::from_document(document).inspect_err(|e| {
            warn!("Collection '{}' failed structural validation: {}", key, e);
        })
    }

    /// Persist the collection for a key
    ///
    /// The document is written pretty-printed with 4-space indentation so
    /// the on-disk files stay diffable. A write failure loses the
    /// in-memory mutation; callers surface that distinctly from
    /// validation failures.
    pub fn save(&self, key: CollectionKey, collection: &Collection) -> Result<()> {
        let path = self.file_path(key);
        let document = collection.to_document();

        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = Serializer::with_formatter(&mut buf, formatter);
        document
            .serialize(&mut serializer)
            .map_err(|e| Error::io_error(format!("Failed to serialize collection: {}", e)))?;

        fs::write(&path, buf)
            .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))?;

        debug!(
            "Persisted collection '{}' ({} records) to {}",
            key,
            collection.len(),
            path.display()
        );
        Ok(())
    }
}
