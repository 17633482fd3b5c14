//! Rebuilding a document from its frontmatter and section tree

use crate::error::Result;
use crate::frontmatter::MARKER_LINE;
use crate::section::{Section, SectionKind};
use crate::tree::SectionTree;

/// Reassemble frontmatter, section markers and content into a document
///
/// For a tree produced by [`crate::parse`] and left untouched, the output
/// equals the parsed input byte for byte. A non-empty frontmatter is framed
/// by `---` lines and followed by a blank line unless the first section is
/// the level-0 section.
pub fn recompose(frontmatter: &str, sections: &[Section]) -> String {
    let mut out = String::new();

    if !frontmatter.is_empty() {
        out.push_str(MARKER_LINE);
        out.push_str(frontmatter);
        if !frontmatter.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(MARKER_LINE);
        if !sections.first().is_some_and(Section::is_orphaned) {
            out.push('\n');
        }
    }

    for section in sections {
        write_section(&mut out, section);
    }
    out
}

/// [`recompose`] after checking the tree's structural invariants
///
/// Trees rebuilt by an external store go through here so a structurally
/// inconsistent tree is reported instead of being turned into wrong bytes.
pub fn recompose_checked(frontmatter: &str, sections: &[Section]) -> Result<String> {
    SectionTree::new(sections).validate()?;
    Ok(recompose(frontmatter, sections))
}

enum Step<'a> {
    Open(&'a Section),
    Close(&'a Section),
}

// Walks the subtree with an explicit stack so nesting depth is bounded by
// the heap, not the call stack.
fn write_section(out: &mut String, root: &Section) {
    let mut steps = vec![Step::Open(root)];
    while let Some(step) = steps.pop() {
        match step {
            Step::Open(section) => {
                write_opening(out, section);
                out.push_str(&section.content);
                if section.is_orphaned() {
                    continue;
                }
                steps.push(Step::Close(section));
                steps.extend(section.children.iter().rev().map(Step::Open));
            }
            Step::Close(section) => write_closing(out, section),
        }
    }
}

fn write_opening(out: &mut String, section: &Section) {
    match &section.kind {
        SectionKind::Orphaned => {}
        SectionKind::Heading { depth, title, eol } => {
            for _ in 0..*depth {
                out.push('#');
            }
            out.push(' ');
            out.push_str(title);
            out.push_str(eol.as_str());
        }
        SectionKind::Tag { name, open_eol, .. } => {
            out.push('<');
            out.push_str(name);
            out.push('>');
            out.push_str(open_eol.as_str());
        }
    }
}

fn write_closing(out: &mut String, section: &Section) {
    if let SectionKind::Tag {
        name,
        closing_prefix,
        close_eol,
        trailing,
        ..
    } = &section.kind
    {
        out.push_str(closing_prefix);
        out.push_str("</");
        out.push_str(name);
        out.push('>');
        out.push_str(close_eol.as_str());
        out.push_str(trailing);
    }
}
