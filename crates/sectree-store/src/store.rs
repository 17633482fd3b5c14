//! Document stores
//!
//! [`DocumentStore`] is the seam between decomposition and whatever keeps the
//! rows. [`MemoryStore`] holds them in a map; [`DirectoryStore`] writes one
//! JSON file per document.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::debug;

use crate::checksum::compute_checksum;
use crate::document::StoredDocument;
use crate::error::{Error, Result};

/// Keyed storage for [`StoredDocument`]s
pub trait DocumentStore: Send + Sync {
    /// Insert or replace the document stored under `doc.path`
    fn put(&mut self, doc: StoredDocument) -> Result<()>;

    /// Fetch a document. Fails with `DocumentNotFound` when absent.
    fn get(&self, path: &str) -> Result<StoredDocument>;

    /// Delete a document and return it
    fn remove(&mut self, path: &str) -> Result<StoredDocument>;

    /// Stored document paths, sorted
    fn paths(&self) -> Result<Vec<String>>;

    fn contains(&self, path: &str) -> Result<bool> {
        Ok(self.paths()?.iter().any(|p| p == path))
    }
}

fn not_found(path: &str) -> Error {
    Error::DocumentNotFound {
        path: path.to_string(),
    }
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: BTreeMap<String, StoredDocument>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentStore for MemoryStore {
    fn put(&mut self, doc: StoredDocument) -> Result<()> {
        debug!(path = %doc.path, rows = doc.rows.len(), "Storing document");
        self.documents.insert(doc.path.clone(), doc);
        Ok(())
    }

    fn get(&self, path: &str) -> Result<StoredDocument> {
        self.documents.get(path).cloned().ok_or_else(|| not_found(path))
    }

    fn remove(&mut self, path: &str) -> Result<StoredDocument> {
        self.documents.remove(path).ok_or_else(|| not_found(path))
    }

    fn paths(&self) -> Result<Vec<String>> {
        Ok(self.documents.keys().cloned().collect())
    }

    fn contains(&self, path: &str) -> Result<bool> {
        Ok(self.documents.contains_key(path))
    }
}

/// Store writing each document to `<root>/<hash of path>.json`
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Open a store rooted at `root`, creating the directory if needed
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| Error::io(&root, e))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn file_for(&self, path: &str) -> PathBuf {
        let hash = compute_checksum(path);
        let hex = hash.trim_start_matches("sha256:");
        self.root.join(format!("{hex}.json"))
    }

    fn read(&self, file: &Path) -> Result<StoredDocument> {
        let json = fs::read_to_string(file).map_err(|e| Error::io(file, e))?;
        StoredDocument::from_json(&json)
    }
}

/// Write-to-temp-then-rename under an exclusive lock
fn write_atomic(target: &Path, content: &[u8]) -> Result<()> {
    let file_name = target
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    let temp = target.with_file_name(format!(".{}.{}.tmp", file_name, std::process::id()));

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp)
        .map_err(|e| Error::io(&temp, e))?;
    file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: target.to_path_buf(),
    })?;
    file.write_all(content).map_err(|e| Error::io(&temp, e))?;
    file.sync_all().map_err(|e| Error::io(&temp, e))?;
    FileExt::unlock(&file).map_err(|_| Error::LockFailed {
        path: target.to_path_buf(),
    })?;

    fs::rename(&temp, target).map_err(|e| Error::io(target, e))
}

impl DocumentStore for DirectoryStore {
    fn put(&mut self, doc: StoredDocument) -> Result<()> {
        let file = self.file_for(&doc.path);
        debug!(path = %doc.path, file = %file.display(), "Writing document");
        write_atomic(&file, doc.to_json()?.as_bytes())
    }

    fn get(&self, path: &str) -> Result<StoredDocument> {
        let file = self.file_for(path);
        if !file.is_file() {
            return Err(not_found(path));
        }
        self.read(&file)
    }

    fn remove(&mut self, path: &str) -> Result<StoredDocument> {
        let doc = self.get(path)?;
        let file = self.file_for(path);
        fs::remove_file(&file).map_err(|e| Error::io(&file, e))?;
        Ok(doc)
    }

    fn paths(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.root).map_err(|e| Error::io(&self.root, e))?;
        let mut paths = Vec::new();
        for entry in entries {
            let file = entry.map_err(|e| Error::io(&self.root, e))?.path();
            if file.extension().is_some_and(|ext| ext == "json") {
                paths.push(self.read(&file)?.path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    fn contains(&self, path: &str) -> Result<bool> {
        Ok(self.file_for(path).is_file())
    }
}
