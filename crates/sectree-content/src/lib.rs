//! Section decomposition and lossless recomposition for structured text documents
//!
//! A document (markdown with a heading hierarchy, or an XML-tag-delimited
//! variant) is split into an optional frontmatter block and an ordered tree of
//! [`Section`]s. [`recompose`] rebuilds the original bytes from that tree.
//!
//! ```
//! use sectree_content::{detect, parse, recompose};
//!
//! let source = "---\ntitle: demo\n---\n\n# Intro\n\nHello\n\n## Details\n\nMore\n";
//! let detection = detect("docs/guide.md", source);
//! let doc = parse("docs/guide.md", source, detection.category, detection.format);
//!
//! assert_eq!(doc.frontmatter, "title: demo\n");
//! assert_eq!(recompose(&doc.frontmatter, &doc.sections), source);
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod format;
pub mod frontmatter;
pub mod parser;
pub mod recompose;
pub mod section;
pub mod tree;

pub use config::{CategoryRule, DetectorConfig};
pub use document::ParsedDocument;
pub use error::{Error, Result};
pub use format::{Category, Detection, Format, FormatDetector, FormatSignals, detect};
pub use frontmatter::split;
pub use parser::{HeadingStrategy, SectionStrategy, TagStrategy, decompose, parse};
pub use recompose::{recompose, recompose_checked};
pub use section::{LineEnding, Section, SectionKind};
pub use tree::{SectionTree, TreeNode};
