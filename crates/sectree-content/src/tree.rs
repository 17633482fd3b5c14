//! Read-only navigation over a section forest
//!
//! [`SectionTree`] flattens a borrowed forest into a pre-order arena. Parent
//! links are plain indices into that arena, so they can answer questions like
//! "how deep is this node" without taking part in ownership.

use crate::error::{Error, Result};
use crate::parser::heading::match_heading;
use crate::parser::tag::match_opening_tag;
use crate::section::{LineEnding, MAX_HEADING_DEPTH, Section, SectionKind};

/// One node of a [`SectionTree`]
#[derive(Debug, Clone, Copy)]
pub struct TreeNode<'a> {
    pub section: &'a Section,
    /// Arena index of the parent; `None` for top-level sections
    pub parent: Option<usize>,
    /// Nesting depth, 0 for top-level sections
    pub depth: usize,
    /// Position among the parent's children (or among top-level sections)
    pub position: usize,
}

/// Pre-order arena view of a section forest
#[derive(Debug, Clone, Default)]
pub struct SectionTree<'a> {
    nodes: Vec<TreeNode<'a>>,
}

impl<'a> SectionTree<'a> {
    /// Build the arena in document order (parent before children)
    pub fn new(sections: &'a [Section]) -> Self {
        let mut nodes = Vec::new();
        let mut stack: Vec<TreeNode<'a>> = sections
            .iter()
            .enumerate()
            .rev()
            .map(|(position, section)| TreeNode {
                section,
                parent: None,
                depth: 0,
                position,
            })
            .collect();

        while let Some(node) = stack.pop() {
            let index = nodes.len();
            nodes.push(node);
            for (position, child) in node.section.children.iter().enumerate().rev() {
                stack.push(TreeNode {
                    section: child,
                    parent: Some(index),
                    depth: node.depth + 1,
                    position,
                });
            }
        }

        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TreeNode<'a>> {
        self.nodes.get(index)
    }

    /// Nodes in document order
    pub fn iter(&self) -> impl Iterator<Item = &TreeNode<'a>> {
        self.nodes.iter()
    }

    pub fn parent(&self, index: usize) -> Option<&TreeNode<'a>> {
        self.nodes.get(index)?.parent.and_then(|p| self.nodes.get(p))
    }

    /// Arena indices of the direct children of `index`, in order
    pub fn children_of(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, node)| node.parent == Some(index))
            .map(|(i, _)| i)
    }

    /// Whether `index` is the first section of the document
    pub fn is_first(&self, index: usize) -> bool {
        index == 0 && !self.nodes.is_empty()
    }

    /// Number of ancestors between `index` and the top level
    pub fn depth(&self, index: usize) -> Option<usize> {
        self.nodes.get(index).map(|node| node.depth)
    }

    /// Check every structural invariant the parser guarantees
    ///
    /// - at most one orphaned section, first at the top level, without children
    /// - heading depths within `1..=6`; heading children are headings strictly deeper
    /// - heading titles and tag names re-parse as the same marker line
    /// - tag children are tags; closing prefixes are single-line whitespace
    pub fn validate(&self) -> Result<()> {
        for (index, node) in self.nodes.iter().enumerate() {
            let parent = self.parent(index).map(|p| p.section);

            match &node.section.kind {
                SectionKind::Orphaned => {
                    if !(node.parent.is_none() && index == 0) {
                        return Err(Error::invalid_tree(format!(
                            "orphaned section at index {index} is not the first top-level section"
                        )));
                    }
                    if !node.section.children.is_empty() {
                        return Err(Error::invalid_tree("orphaned section has children"));
                    }
                }
                SectionKind::Heading { depth, title, eol } => {
                    if *depth == 0 || *depth > MAX_HEADING_DEPTH {
                        return Err(Error::invalid_tree(format!(
                            "heading '{title}' has depth {depth}, expected 1..={MAX_HEADING_DEPTH}"
                        )));
                    }
                    let line = format!("{} {title}", "#".repeat(usize::from(*depth)));
                    let reparsed = match_heading(&line) == Some((*depth, title.as_str()));
                    // A trailing '\r' before '\n' would be read back as a CRLF terminator
                    let cr_folds = title.ends_with('\r') && *eol == LineEnding::Lf;
                    if !reparsed || cr_folds {
                        return Err(Error::invalid_tree(format!(
                            "heading {title:?} at index {index} would not parse back as a depth {depth} heading"
                        )));
                    }
                    match parent.map(|p| &p.kind) {
                        None => {}
                        Some(SectionKind::Heading {
                            depth: parent_depth,
                            ..
                        }) if parent_depth < depth => {}
                        Some(_) => {
                            return Err(Error::invalid_tree(format!(
                                "heading '{title}' (depth {depth}) is not nested under a shallower heading"
                            )));
                        }
                    }
                }
                SectionKind::Tag {
                    name,
                    closing_prefix,
                    ..
                } => {
                    if match_opening_tag(&format!("<{name}>")) != Some(name.as_str()) {
                        return Err(Error::invalid_tree(format!(
                            "tag section at index {index} has invalid name {name:?}"
                        )));
                    }
                    if !closing_prefix.chars().all(char::is_whitespace)
                        || closing_prefix.contains('\n')
                    {
                        return Err(Error::invalid_tree(format!(
                            "closing prefix of <{name}> is not single-line whitespace"
                        )));
                    }
                    if parent.is_some_and(|p| !p.is_tag()) {
                        return Err(Error::invalid_tree(format!(
                            "tag <{name}> is nested under a non-tag section"
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}
