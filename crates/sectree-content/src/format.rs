//! Format and category detection
//!
//! The category comes from the path alone and the format from the content
//! alone; neither looks at the other.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::{DetectorConfig, glob_to_regex};
use crate::error::Result;
use crate::parser::heading::is_fence;
use crate::parser::lines::split_lines;
use crate::parser::tag::{match_closing_tag, match_opening_tag};

/// A heading marker run followed by whitespace and text
static HEADING_SIGNAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{1,6}\s+\S").unwrap());

/// Structural style of a document's content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    /// `#` heading hierarchy
    HeadingStructured,
    /// `<name>` ... `</name>` blocks
    TagStructured,
    /// Both headings and tag blocks
    Mixed,
    /// Neither
    Unknown,
}

impl Format {
    /// Classify content by counting structural signals
    pub fn from_content(content: &str) -> Self {
        FormatSignals::count(content).format()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HeadingStructured => "heading-structured",
            Self::TagStructured => "tag-structured",
            Self::Mixed => "mixed",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Path-derived classification of a file
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Category of paths no convention matches
    pub const GENERIC: &'static str = "document";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn generic() -> Self {
        Self::new(Self::GENERIC)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::generic()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Structural signals counted in a piece of content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatSignals {
    /// Heading lines outside fenced code blocks
    pub headings: usize,
    /// `<name>` lines followed later by a matching `</name>` line
    pub tag_blocks: usize,
    /// `<name>` lines without a matching closing line
    pub bare_tags: usize,
    /// Lines containing anything but whitespace
    pub non_blank_lines: usize,
}

impl FormatSignals {
    /// Count signals in one pass over the lines
    ///
    /// Recognition is looser than the parsers' for headings (any whitespace
    /// after the `#` run) and stricter for closing tags (the line must be
    /// exactly `</name>`, no indentation).
    pub fn count(content: &str) -> Self {
        let lines = split_lines(content);
        let mut signals = Self::default();
        let mut in_fence = false;

        let mut last_close: HashMap<&str, usize> = HashMap::new();
        for (index, line) in lines.iter().enumerate() {
            if let Some(("", name)) = match_closing_tag(line.text) {
                last_close.insert(name, index);
            }
        }

        for (index, line) in lines.iter().enumerate() {
            if !line.text.trim().is_empty() {
                signals.non_blank_lines += 1;
            }

            if let Some(name) = match_opening_tag(line.text) {
                if last_close.get(name).is_some_and(|&close| close > index) {
                    signals.tag_blocks += 1;
                } else {
                    signals.bare_tags += 1;
                }
            }

            if is_fence(line.text) {
                in_fence = !in_fence;
            } else if !in_fence && HEADING_SIGNAL.is_match(line.text) {
                signals.headings += 1;
            }
        }

        signals
    }

    pub fn format(&self) -> Format {
        match (self.headings > 0, self.tag_blocks > 0) {
            (true, true) => Format::Mixed,
            (false, true) => Format::TagStructured,
            (true, false) => Format::HeadingStructured,
            (false, false) if self.bare_tags > 0 => Format::TagStructured,
            (false, false) => Format::Unknown,
        }
    }

    /// Advisory confidence in [`Self::format`], from `0.0` to `1.0`
    pub fn confidence(&self) -> f64 {
        if self.non_blank_lines == 0 {
            return 0.0;
        }
        let density = |signal: usize| signal as f64 / self.non_blank_lines as f64;

        match self.format() {
            Format::HeadingStructured => (0.5 + density(self.headings) * 2.5).min(1.0),
            Format::TagStructured if self.tag_blocks > 0 => {
                (0.5 + density(self.tag_blocks) * 5.0).min(1.0)
            }
            Format::TagStructured => 0.3,
            Format::Mixed => {
                let dominant = self.headings.max(self.tag_blocks) as f64;
                0.5 * dominant / (self.headings + self.tag_blocks) as f64
            }
            Format::Unknown => 0.0,
        }
    }
}

/// Outcome of [`FormatDetector::detect`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub category: Category,
    pub format: Format,
    /// Advisory only; parsing never looks at it
    pub confidence: f64,
}

#[derive(Debug, Clone)]
struct CompiledRule {
    category: Category,
    patterns: Vec<Regex>,
}

/// Classifies documents by path convention and content structure
#[derive(Debug, Clone)]
pub struct FormatDetector {
    rules: Vec<CompiledRule>,
    default_category: Category,
}

impl FormatDetector {
    /// Compile the category rules of `config`
    pub fn new(config: &DetectorConfig) -> Result<Self> {
        let rules = config
            .categories
            .iter()
            .map(|rule| -> Result<CompiledRule> {
                Ok(CompiledRule {
                    category: Category::new(rule.name.clone()),
                    patterns: rule
                        .patterns
                        .iter()
                        .map(|p| glob_to_regex(p))
                        .collect::<Result<_>>()?,
                })
            })
            .collect::<Result<_>>()?;

        Ok(Self {
            rules,
            default_category: Category::new(config.default_category.clone()),
        })
    }

    /// Category of `path`; the first matching rule wins
    pub fn category(&self, path: impl AsRef<Path>) -> Category {
        let path = path.as_ref().to_string_lossy().replace('\\', "/");
        self.rules
            .iter()
            .find(|rule| rule.patterns.iter().any(|p| p.is_match(&path)))
            .map_or_else(|| self.default_category.clone(), |rule| rule.category.clone())
    }

    pub fn detect(&self, path: impl AsRef<Path>, content: &str) -> Detection {
        let signals = FormatSignals::count(content);
        Detection {
            category: self.category(path),
            format: signals.format(),
            confidence: signals.confidence(),
        }
    }
}

static DEFAULT_DETECTOR: LazyLock<FormatDetector> = LazyLock::new(|| {
    FormatDetector::new(&DetectorConfig::default()).expect("built-in category globs compile")
});

impl Default for FormatDetector {
    fn default() -> Self {
        DEFAULT_DETECTOR.clone()
    }
}

/// Detect category and format with the built-in conventions
pub fn detect(path: impl AsRef<Path>, content: &str) -> Detection {
    DEFAULT_DETECTOR.detect(path, content)
}
