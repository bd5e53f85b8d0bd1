//! Whole-file JSON document store
//!
//! Each store owns one file holding one serialized document. Loading
//! distinguishes a missing file from a corrupt one; a store that found
//! corrupt data refuses to overwrite it.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use serde::{de::DeserializeOwned, Serialize};
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, info};
use crate::utils::errors::{StorageError, StorageResult};

/// Outcome of reading a document from disk
#[derive(Debug)]
pub enum Loaded<T> {
    /// No file at the configured path
    Absent,
    /// File parsed into a document
    Parsed(T),
    /// File exists but does not hold a valid document
    Corrupt(serde_json::Error),
}

impl<T: Default> Loaded<T> {
    /// The parsed document, or an empty one for absent and corrupt files
    pub fn into_document(self) -> T {
        match self {
            Loaded::Parsed(document) => document,
            Loaded::Absent | Loaded::Corrupt(_) => T::default(),
        }
    }
}

/// JSON file holding a single document
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    kind: &'static str,
    write_protected: AtomicBool,
}

impl JsonStore {
    /// Create a store for the document `kind` (used in log lines) at `path`
    pub fn new(kind: &'static str, path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind,
            write_protected: AtomicBool::new(false),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Whether a corrupt file was found and saves are being refused
    pub fn is_write_protected(&self) -> bool {
        self.write_protected.load(Ordering::SeqCst)
    }

    /// Read and parse the document
    pub async fn load<T: DeserializeOwned>(&self) -> StorageResult<Loaded<T>> {
        let content = match tokio::fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(kind = self.kind, path = %self.path.display(), "No saved document, starting empty");
                return Ok(Loaded::Absent);
            }
            Err(source) => {
                return Err(StorageError::Io { path: self.path.clone(), source });
            }
        };

        match serde_json::from_slice::<T>(&content) {
            Ok(document) => {
                debug!(kind = self.kind, path = %self.path.display(), bytes = content.len(), "Document loaded");
                Ok(Loaded::Parsed(document))
            }
            Err(e) => {
                error!(
                    kind = self.kind,
                    path = %self.path.display(),
                    error = %e,
                    "Saved document is corrupt; it will not be overwritten until repaired"
                );
                self.write_protected.store(true, Ordering::SeqCst);
                Ok(Loaded::Corrupt(e))
            }
        }
    }

    /// Serialize the document and replace the file contents
    pub async fn save<T: Serialize>(&self, document: &T) -> StorageResult<()> {
        if self.is_write_protected() {
            return Err(StorageError::WriteProtected { path: self.path.clone() });
        }

        let mut data = serde_json::to_vec(document)
            .map_err(|source| StorageError::Encode { path: self.path.clone(), source })?;
        data.push(b'\n');

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| StorageError::Io { path: parent.to_path_buf(), source })?;
        }

        let io_err = |source: std::io::Error| StorageError::Io { path: self.path.clone(), source };
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)
            .await
            .map_err(io_err)?;
        file.write_all(&data).await.map_err(io_err)?;
        file.flush().await.map_err(io_err)?;

        info!(kind = self.kind, path = %self.path.display(), "{} saved", self.kind);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn test_load_missing_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new("Users", dir.path().join("nope.json"));

        let loaded = store.load::<BTreeMap<String, u32>>().await.unwrap();
        assert_matches!(loaded, Loaded::Absent);
        assert!(loaded.into_document().is_empty());
        assert!(!store.is_write_protected());
    }

    #[tokio::test]
    async fn test_save_appends_newline_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new("Lessons", dir.path().join("nested").join("lessons.json"));
        let mut doc = BTreeMap::new();
        doc.insert("a".to_string(), 1u32);

        store.save(&doc).await.unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw, "{\"a\":1}\n");
        let loaded = store.load::<BTreeMap<String, u32>>().await.unwrap();
        assert_matches!(loaded, Loaded::Parsed(ref d) if *d == doc);
    }

    #[tokio::test]
    async fn test_save_truncates_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(&path, "x".repeat(200)).unwrap();
        let store = JsonStore::new("Users", &path);

        store.save(&vec![1u8]).await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[1]\n");
    }

    #[tokio::test]
    async fn test_corrupt_file_blocks_saves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(&path, "{\"users\": ").unwrap();
        let store = JsonStore::new("Users", &path);

        let loaded = store.load::<BTreeMap<String, u32>>().await.unwrap();
        assert_matches!(loaded, Loaded::Corrupt(_));
        assert!(store.is_write_protected());

        let result = store.save(&BTreeMap::<String, u32>::new()).await;
        assert_matches!(result, Err(StorageError::WriteProtected { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\"users\": ");
    }
}
