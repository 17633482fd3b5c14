//! Row storage for decomposed documents
//!
//! A [`StoredDocument`] is a [`sectree_content::ParsedDocument`] flattened
//! into [`SectionRow`]s that point at their parent by id. Rows can be kept in
//! any [`DocumentStore`]; [`checkout`] rebuilds the tree, recomposes it and
//! checks the result against the checksum taken at ingestion.

pub mod checksum;
pub mod document;
pub mod error;
pub mod row;
pub mod store;
pub mod verify;

pub use checksum::compute_checksum;
pub use document::StoredDocument;
pub use error::{Error, Result};
pub use row::{SectionRow, flatten, rebuild};
pub use store::{DirectoryStore, DocumentStore, MemoryStore};
pub use verify::{checkout, verify};
