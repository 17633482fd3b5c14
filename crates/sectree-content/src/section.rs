//! Section tree data model
//!
//! A [`Section`] owns its children by value. Parent links are never stored on
//! the node itself; [`crate::tree::SectionTree`] derives them as indices when
//! a consumer needs to navigate upwards.

use serde::{Deserialize, Serialize};

/// Numeric level of the synthetic section holding content before the first marker
pub const ORPHAN_LEVEL: i8 = 0;

/// Numeric level used for tag-delimited sections
pub const TAG_LEVEL: i8 = -1;

/// Deepest heading level recognised by the parser
pub const MAX_HEADING_DEPTH: u8 = 6;

/// Terminator of a marker line (heading line, opening or closing tag line)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
    /// Last line of the input, no terminator
    Eof,
}

impl LineEnding {
    /// The terminator bytes
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::Eof => "",
        }
    }

    /// Split a raw line into its text and terminator
    pub fn split(line: &str) -> (&str, Self) {
        if let Some(text) = line.strip_suffix("\r\n") {
            (text, Self::CrLf)
        } else if let Some(text) = line.strip_suffix('\n') {
            (text, Self::Lf)
        } else {
            (line, Self::Eof)
        }
    }
}

/// What kind of marker opened a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionKind {
    /// Content that appeared before any heading or tag
    Orphaned,
    /// `#`-style heading
    Heading {
        depth: u8,
        title: String,
        #[serde(default)]
        eol: LineEnding,
    },
    /// `<name>` ... `</name>` block
    Tag {
        name: String,
        /// Whitespace in front of the closing tag on its line
        #[serde(default)]
        closing_prefix: String,
        #[serde(default)]
        open_eol: LineEnding,
        #[serde(default)]
        close_eol: LineEnding,
        /// Lines after the closing tag up to the next sibling tag or the
        /// enclosing closing tag
        #[serde(default)]
        trailing: String,
    },
}

/// One node of the decomposition tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub kind: SectionKind,
    /// The section's own text, excluding every descendant's text, verbatim
    pub content: String,
    /// 1-based first line of this section's span in the body
    pub line_start: usize,
    /// 1-based last line of this section's span in the body
    pub line_end: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Section>,
}

impl Section {
    fn with_kind(kind: SectionKind) -> Self {
        Self {
            kind,
            content: String::new(),
            line_start: 0,
            line_end: 0,
            children: Vec::new(),
        }
    }

    /// Create the synthetic section for content preceding the first marker
    pub fn orphaned(content: impl Into<String>) -> Self {
        Self::with_kind(SectionKind::Orphaned).with_content(content)
    }

    /// Create a heading section terminated by `\n`
    pub fn heading(depth: u8, title: impl Into<String>) -> Self {
        Self::with_kind(SectionKind::Heading {
            depth,
            title: title.into(),
            eol: LineEnding::Lf,
        })
    }

    /// Create a tag section with unindented closing tag and `\n` terminators
    pub fn tag(name: impl Into<String>) -> Self {
        Self::with_kind(SectionKind::Tag {
            name: name.into(),
            closing_prefix: String::new(),
            open_eol: LineEnding::Lf,
            close_eol: LineEnding::Lf,
            trailing: String::new(),
        })
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_lines(mut self, line_start: usize, line_end: usize) -> Self {
        self.line_start = line_start;
        self.line_end = line_end;
        self
    }

    pub fn with_children(mut self, children: Vec<Section>) -> Self {
        self.children = children;
        self
    }

    /// Set the closing tag indentation. No effect on non-tag sections.
    pub fn with_closing_prefix(mut self, prefix: impl Into<String>) -> Self {
        if let SectionKind::Tag { closing_prefix, .. } = &mut self.kind {
            *closing_prefix = prefix.into();
        }
        self
    }

    /// Set the text following the closing tag. No effect on non-tag sections.
    pub fn with_trailing(mut self, text: impl Into<String>) -> Self {
        if let SectionKind::Tag { trailing, .. } = &mut self.kind {
            *trailing = text.into();
        }
        self
    }

    /// Signed level: `1..=6` for headings, `0` for orphaned content, `-1` for tags
    pub fn level(&self) -> i8 {
        match &self.kind {
            SectionKind::Orphaned => ORPHAN_LEVEL,
            SectionKind::Heading { depth, .. } => *depth as i8,
            SectionKind::Tag { .. } => TAG_LEVEL,
        }
    }

    /// Heading text or tag name; empty for orphaned content
    pub fn title(&self) -> &str {
        match &self.kind {
            SectionKind::Orphaned => "",
            SectionKind::Heading { title, .. } => title,
            SectionKind::Tag { name, .. } => name,
        }
    }

    pub fn closing_tag_prefix(&self) -> Option<&str> {
        match &self.kind {
            SectionKind::Tag { closing_prefix, .. } => Some(closing_prefix),
            _ => None,
        }
    }

    /// Text after a tag's closing line; empty for other kinds
    pub fn trailing(&self) -> &str {
        match &self.kind {
            SectionKind::Tag { trailing, .. } => trailing,
            _ => "",
        }
    }

    pub fn heading_depth(&self) -> Option<u8> {
        match &self.kind {
            SectionKind::Heading { depth, .. } => Some(*depth),
            _ => None,
        }
    }

    pub fn is_orphaned(&self) -> bool {
        matches!(self.kind, SectionKind::Orphaned)
    }

    pub fn is_heading(&self) -> bool {
        matches!(self.kind, SectionKind::Heading { .. })
    }

    pub fn is_tag(&self) -> bool {
        matches!(self.kind, SectionKind::Tag { .. })
    }

    /// Number of sections in this subtree, including this one
    pub fn subtree_len(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(section) = stack.pop() {
            count += 1;
            stack.extend(&section.children);
        }
        count
    }
}

// Children are released from a heap stack so a deeply nested tree does not
// exhaust the call stack when dropped.
impl Drop for Section {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut section) = stack.pop() {
            stack.append(&mut section.children);
        }
    }
}
