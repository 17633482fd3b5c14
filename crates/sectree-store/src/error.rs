//! Error types for sectree-store

use std::path::PathBuf;

/// Result type for sectree-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while storing or rebuilding documents
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Duplicate row id {id}")]
    DuplicateId { id: usize },

    #[error("Row {id} references missing parent {parent}")]
    DanglingParent { id: usize, parent: usize },

    #[error("Two rows share position {position} under {parent:?}")]
    DuplicatePosition {
        parent: Option<usize>,
        position: usize,
    },

    #[error("Row {id} has level {level}, expected -1..=6")]
    InvalidLevel { id: usize, level: i8 },

    /// Rows that form a cycle or hang off one
    #[error("{count} row(s) are not reachable from a top-level row")]
    Unreachable { count: usize },

    #[error("Document not found: {path}")]
    DocumentNotFound { path: String },

    /// The rebuilt text does not hash to the checksum taken at ingestion
    #[error("Reconstruction of {path} does not match: expected {expected}, got {actual}")]
    ReconstructionMismatch {
        path: String,
        expected: String,
        actual: String,
    },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to lock {path}")]
    LockFailed { path: PathBuf },

    #[error(transparent)]
    Content(#[from] sectree_content::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
