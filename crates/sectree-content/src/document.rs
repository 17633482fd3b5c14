//! Parsed document type

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::format::{Category, Format};
use crate::recompose::{recompose, recompose_checked};
use crate::section::Section;
use crate::tree::SectionTree;

/// Result of [`crate::parse`]: frontmatter plus the top-level section forest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDocument {
    /// Source path; metadata only
    pub path: String,
    /// Frontmatter text without marker lines, empty when absent
    pub frontmatter: String,
    pub sections: Vec<Section>,
    pub category: Category,
    pub format: Format,
}

impl ParsedDocument {
    /// Navigation view over the sections
    pub fn tree(&self) -> SectionTree<'_> {
        SectionTree::new(&self.sections)
    }

    /// Rebuild the document text
    pub fn recompose(&self) -> String {
        recompose(&self.frontmatter, &self.sections)
    }

    /// Rebuild the document text after validating the tree
    pub fn recompose_checked(&self) -> Result<String> {
        recompose_checked(&self.frontmatter, &self.sections)
    }

    /// First section in document order with the given heading text or tag name
    pub fn find(&self, title: &str) -> Option<&Section> {
        self.tree()
            .iter()
            .map(|node| node.section)
            .find(|section| !section.is_orphaned() && section.title() == title)
    }

    /// Total number of sections at every depth
    pub fn section_count(&self) -> usize {
        self.sections.iter().map(Section::subtree_len).sum()
    }
}
