//! Checksum-verified reconstruction

use tracing::{debug, warn};

use crate::checksum::compute_checksum;
use crate::document::StoredDocument;
use crate::error::{Error, Result};
use crate::store::DocumentStore;

/// Rebuild the text of `stored` and check it against the ingestion checksum
pub fn verify(stored: &StoredDocument) -> Result<String> {
    let text = stored.to_parsed()?.recompose_checked()?;
    let actual = compute_checksum(&text);

    if actual != stored.checksum {
        warn!(
            path = %stored.path,
            expected = %stored.checksum,
            %actual,
            "Reconstructed document does not match its checksum"
        );
        return Err(Error::ReconstructionMismatch {
            path: stored.path.clone(),
            expected: stored.checksum.clone(),
            actual,
        });
    }

    debug!(path = %stored.path, "Reconstruction verified");
    Ok(text)
}

/// Fetch `path` from `store` and return its verified text
pub fn checkout<S: DocumentStore + ?Sized>(store: &S, path: &str) -> Result<String> {
    verify(&store.get(path)?)
}
