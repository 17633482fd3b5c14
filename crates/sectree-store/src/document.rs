//! Stored form of a decomposed document

use serde::{Deserialize, Serialize};
use sectree_content::{Category, Format, FormatDetector, ParsedDocument, decompose};
use tracing::debug;

use crate::checksum::compute_checksum;
use crate::error::Result;
use crate::row::{SectionRow, flatten, rebuild};

/// A document as a store keeps it: metadata, frontmatter and section rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub path: String,
    pub category: Category,
    pub format: Format,
    #[serde(default)]
    pub frontmatter: String,
    /// Checksum of the original text, taken at ingestion
    pub checksum: String,
    pub rows: Vec<SectionRow>,
}

impl StoredDocument {
    /// Flatten a parsed document; `original` is the text it was parsed from
    pub fn from_parsed(doc: &ParsedDocument, original: &str) -> Self {
        Self {
            path: doc.path.clone(),
            category: doc.category.clone(),
            format: doc.format,
            frontmatter: doc.frontmatter.clone(),
            checksum: compute_checksum(original),
            rows: flatten(&doc.sections),
        }
    }

    /// Detect, parse and flatten `content`
    pub fn ingest(detector: &FormatDetector, path: &str, content: &str) -> Self {
        let doc = decompose(detector, path, content);
        let stored = Self::from_parsed(&doc, content);
        debug!(
            path,
            category = %stored.category,
            format = %stored.format,
            rows = stored.rows.len(),
            "Ingested document"
        );
        stored
    }

    /// Rebuild the section tree
    pub fn to_parsed(&self) -> Result<ParsedDocument> {
        Ok(ParsedDocument {
            path: self.path.clone(),
            frontmatter: self.frontmatter.clone(),
            sections: rebuild(&self.rows)?,
            category: self.category.clone(),
            format: self.format,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
