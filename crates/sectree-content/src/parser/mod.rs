//! Section parsing
//!
//! [`parse`] splits off frontmatter and runs one [`SectionStrategy`] over the
//! body: [`TagStrategy`] for tag-structured content, [`HeadingStrategy`] for
//! everything else.

pub(crate) mod heading;
pub(crate) mod lines;
pub(crate) mod tag;

use std::path::Path;

use tracing::debug;

pub use heading::HeadingStrategy;
pub use tag::TagStrategy;

use crate::document::ParsedDocument;
use crate::format::{Category, Format, FormatDetector};
use crate::frontmatter;
use crate::section::Section;

/// A way of cutting a document body into sections
///
/// Implementations are pure: the same body always yields the same forest,
/// and concatenating the forest's markers and content in document order gives
/// the body back.
pub trait SectionStrategy: Send + Sync {
    /// Strategy identifier used in logs
    fn name(&self) -> &'static str;

    /// Parse a body (frontmatter already removed) into top-level sections
    fn parse(&self, body: &str) -> Vec<Section>;
}

/// The strategy used for a detected format
pub fn strategy_for(format: Format) -> &'static dyn SectionStrategy {
    match format {
        Format::TagStructured => &TagStrategy,
        Format::HeadingStructured | Format::Mixed | Format::Unknown => &HeadingStrategy,
    }
}

/// Decompose `content` into a [`ParsedDocument`]
///
/// `category` and `format` are recorded on the result as given, even when
/// `format` is mixed or unknown and the heading strategy ran as a fallback.
///
/// When a frontmatter block is present the first section is always the
/// level-0 section (possibly empty), which is what lets the recomposer tell
/// a parsed tree apart from one that needs a separating blank line.
pub fn parse(
    path: impl AsRef<Path>,
    content: &str,
    category: Category,
    format: Format,
) -> ParsedDocument {
    let path = path.as_ref();
    let (frontmatter, body) = frontmatter::split(content);
    let strategy = strategy_for(format);

    let mut sections = strategy.parse(body);
    if !frontmatter.is_empty() && !sections.first().is_some_and(Section::is_orphaned) {
        sections.insert(0, Section::orphaned(""));
    }

    debug!(
        path = %path.display(),
        strategy = strategy.name(),
        %format,
        frontmatter = !frontmatter.is_empty(),
        sections = sections.len(),
        "Parsed document"
    );

    ParsedDocument {
        path: path.to_string_lossy().into_owned(),
        frontmatter: frontmatter.to_string(),
        sections,
        category,
        format,
    }
}

/// Detect and parse in one step
pub fn decompose(
    detector: &FormatDetector,
    path: impl AsRef<Path>,
    content: &str,
) -> ParsedDocument {
    let path = path.as_ref();
    let detection = detector.detect(path, content);
    parse(path, content, detection.category, detection.format)
}
