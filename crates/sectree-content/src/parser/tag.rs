//! Tag-based section parsing
//!
//! An opening tag is a line that is exactly `<name>` (lowercase identifier).
//! It opens a section only if a closing line `</name>` follows at the same
//! nesting depth; the closing line may be indented. Unmatched tag lines are
//! ordinary content.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use super::SectionStrategy;
use super::lines::{Line, split_lines};
use crate::section::{Section, SectionKind};

static OPENING_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<([a-z][a-z0-9_-]*)>$").unwrap());

/// Tag name of an opening tag line (terminator already stripped)
pub(crate) fn match_opening_tag(text: &str) -> Option<&str> {
    OPENING_TAG
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// `(indentation, name)` of a `</name>` line, indentation allowed
pub(crate) fn match_closing_tag(text: &str) -> Option<(&str, &str)> {
    let trimmed = text.trim_start();
    let name = trimmed.strip_prefix("</")?.strip_suffix('>')?;
    Some((&text[..text.len() - trimmed.len()], name))
}

/// Closing line and name for every opening line that has one
///
/// One forward pass with a stack of open lines per name: a closing line
/// pairs with the most recent unpaired opening of the same name, which is
/// the line a same-name depth counter would stop at.
fn pair_tags<'a>(lines: &[Line<'a>]) -> Vec<Option<(usize, &'a str)>> {
    let mut pairs = vec![None; lines.len()];
    let mut open: HashMap<&'a str, Vec<usize>> = HashMap::new();

    for (index, line) in lines.iter().enumerate() {
        if let Some(name) = match_opening_tag(line.text) {
            open.entry(name).or_default().push(index);
        } else if let Some((_, name)) = match_closing_tag(line.text) {
            if let Some(start) = open.get_mut(name).and_then(Vec::pop) {
                pairs[start] = Some((index, name));
            }
        }
    }
    pairs
}

/// Parses `<name>` ... `</name>` blocks
#[derive(Debug, Default, Clone, Copy)]
pub struct TagStrategy;

impl TagStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl SectionStrategy for TagStrategy {
    fn name(&self) -> &'static str {
        "tag"
    }

    fn parse(&self, body: &str) -> Vec<Section> {
        let lines = split_lines(body);
        let (lead, mut sections) = parse_tags(&lines);
        if !lead.is_empty() {
            let lead_lines = sections.first().map_or(lines.len(), |s| s.line_start - 1);
            sections.insert(0, Section::orphaned(lead).with_lines(1, lead_lines));
        }
        sections
    }
}

/// A tag section whose closing line has not been reached yet
struct Frame<'a> {
    open: usize,
    close: usize,
    name: &'a str,
    content: String,
    children: Vec<Section>,
}

impl Frame<'_> {
    fn finish(self, lines: &[Line<'_>]) -> Section {
        let closing = lines[self.close];
        let closing_prefix = match_closing_tag(closing.text).map_or("", |(prefix, _)| prefix);

        trace!(tag = self.name, line = self.open + 1, "Tag section");

        Section {
            kind: SectionKind::Tag {
                name: self.name.to_string(),
                closing_prefix: closing_prefix.to_string(),
                open_eol: lines[self.open].eol,
                close_eol: closing.eol,
                trailing: String::new(),
            },
            content: self.content,
            line_start: self.open + 1,
            line_end: self.close + 1,
            children: self.children,
        }
    }
}

/// Where a text line goes: the trailing text of the last finished child, or
/// the enclosing section's own text before any child
fn text_sink<'s>(own: &'s mut String, children: &'s mut [Section]) -> &'s mut String {
    match children.last_mut().map(|last| &mut last.kind) {
        Some(SectionKind::Tag { trailing, .. }) => trailing,
        _ => own,
    }
}

/// Split the body into its leading text and the top-level tag sections
///
/// A single pass with an explicit stack of open sections. An opening line
/// starts a section only if its paired closing line lies inside the section
/// currently open; otherwise it is text. Text between a closing line and the
/// next sibling (or the end of the enclosing section) is kept as trailing
/// text of the section just closed.
fn parse_tags(lines: &[Line<'_>]) -> (String, Vec<Section>) {
    let pairs = pair_tags(lines);
    let mut lead = String::new();
    let mut top = Vec::new();
    let mut stack: Vec<Frame<'_>> = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        if stack.last().is_some_and(|frame| frame.close == index) {
            if let Some(frame) = stack.pop() {
                let section = frame.finish(lines);
                match stack.last_mut() {
                    Some(parent) => parent.children.push(section),
                    None => top.push(section),
                }
            }
            continue;
        }

        let bound = stack.last().map_or(lines.len(), |frame| frame.close);
        if let Some((close, name)) = pairs[index].filter(|&(close, _)| close < bound) {
            stack.push(Frame {
                open: index,
                close,
                name,
                content: String::new(),
                children: Vec::new(),
            });
            continue;
        }

        let sink = match stack.last_mut() {
            Some(frame) => text_sink(&mut frame.content, &mut frame.children),
            None => text_sink(&mut lead, &mut top),
        };
        sink.push_str(line.raw);
    }

    (lead, top)
}
