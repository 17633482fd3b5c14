//! Content checksums in the `sha256:<hex>` format

use sha2::{Digest, Sha256};

const PREFIX: &str = "sha256:";

/// SHA-256 of `content`, formatted as `sha256:<hex>`
pub fn compute_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{}{:x}", PREFIX, hasher.finalize())
}
