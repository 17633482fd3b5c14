//! Heading-based section parsing
//!
//! A heading line is 1-6 `#`, one space, and a title with at least one
//! non-whitespace character. The title is everything after that space, so
//! the marker line can be rebuilt exactly. Heading lines inside fenced code
//! blocks are content.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use super::SectionStrategy;
use super::lines::{Line, concat, split_lines};
use crate::section::{LineEnding, Section, SectionKind};

static HEADING_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6}) (.*\S.*)$").unwrap());

/// Whether a line opens or closes a fenced code block
pub(crate) fn is_fence(text: &str) -> bool {
    let trimmed = text.trim_start();
    trimmed.starts_with("```") || trimmed.starts_with("~~~")
}

/// Depth and title of a heading line (terminator already stripped)
pub(crate) fn match_heading(text: &str) -> Option<(u8, &str)> {
    let caps = HEADING_LINE.captures(text)?;
    let depth = caps.get(1)?.as_str().len() as u8;
    let title = caps.get(2)?.as_str();
    Some((depth, title))
}

#[derive(Debug, Clone, Copy)]
struct HeadingLine<'a> {
    index: usize,
    depth: u8,
    title: &'a str,
    eol: LineEnding,
}

/// Heading lines of `lines`, with fence tracking starting outside a fence
fn scan_headings<'a>(lines: &[Line<'a>]) -> Vec<HeadingLine<'a>> {
    let mut in_fence = false;
    let mut headings = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        if is_fence(line.text) {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        if let Some((depth, title)) = match_heading(line.text) {
            headings.push(HeadingLine {
                index,
                depth,
                title,
                eol: line.eol,
            });
        }
    }

    headings
}

/// Parses `#` heading hierarchies
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadingStrategy;

impl HeadingStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl SectionStrategy for HeadingStrategy {
    fn name(&self) -> &'static str {
        "heading"
    }

    fn parse(&self, body: &str) -> Vec<Section> {
        let lines = split_lines(body);
        parse_headings(&lines, 0, 0)
    }
}

/// Parse a run of lines into sibling sections
///
/// `offset` is the absolute index of `lines[0]` in the body, so line numbers
/// stay absolute through recursion. Each run re-scans its own lines with the
/// fence flag reset; a fence left open across a heading boundary is not
/// rejected.
fn parse_headings(lines: &[Line<'_>], offset: usize, parent_depth: u8) -> Vec<Section> {
    let headings = scan_headings(lines);
    let mut sections = Vec::new();

    let first = headings.first().map_or(lines.len(), |h| h.index);
    if first > 0 {
        debug_assert_eq!(parent_depth, 0, "child runs start at a heading");
        sections.push(
            Section::orphaned(concat(&lines[..first])).with_lines(offset + 1, offset + first),
        );
    }

    let mut cursor = 0;
    while let Some(head) = headings.get(cursor) {
        // The next heading at this depth or shallower closes the section
        let boundary = headings[cursor + 1..]
            .iter()
            .position(|h| h.depth <= head.depth)
            .map(|p| cursor + 1 + p);
        let end = boundary.map_or(lines.len(), |b| headings[b].index);

        // Anything deeper before the boundary belongs to children
        let first_child = headings
            .get(cursor + 1)
            .map(|h| h.index)
            .filter(|&index| index < end)
            .unwrap_or(end);

        trace!(
            depth = head.depth,
            title = head.title,
            line = offset + head.index + 1,
            "Heading section"
        );

        let children = if first_child < end {
            parse_headings(&lines[first_child..end], offset + first_child, head.depth)
        } else {
            Vec::new()
        };

        sections.push(Section {
            kind: SectionKind::Heading {
                depth: head.depth,
                title: head.title.to_string(),
                eol: head.eol,
            },
            content: concat(&lines[head.index + 1..first_child]),
            line_start: offset + head.index + 1,
            line_end: offset + first_child,
            children,
        });

        cursor = boundary.unwrap_or(headings.len());
    }

    sections
}
