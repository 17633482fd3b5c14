//! Error types for sectree-content

use std::path::PathBuf;

/// Result type for sectree-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sectree-content operations
///
/// Splitting and parsing never fail: ambiguous input degrades to plain
/// content instead. Errors come from configuration and from section trees
/// that could not have been produced by the parser.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid category pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedConfigFormat { extension: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid section tree: {message}")]
    InvalidTree { message: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_tree(message: impl Into<String>) -> Self {
        Self::InvalidTree {
            message: message.into(),
        }
    }
}
