//! Flat, parent-indexed rows for a section forest
//!
//! A store does not hold [`Section`] trees. Each section becomes one
//! [`SectionRow`] that names its parent by id and its place among siblings
//! by position. [`flatten`] and [`rebuild`] are exact inverses for trees the
//! parser produced.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use sectree_content::section::{ORPHAN_LEVEL, TAG_LEVEL};
use sectree_content::{LineEnding, Section, SectionKind, SectionTree};
use tracing::{trace, warn};

use crate::error::{Error, Result};

/// One stored section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRow {
    /// Pre-order index within the document
    pub id: usize,
    pub parent: Option<usize>,
    /// Order among rows sharing `parent`
    pub position: usize,
    /// `1..=6` heading, `0` orphaned content, `-1` tag
    pub level: i8,
    /// Heading text or tag name
    pub title: String,
    pub content: String,
    pub line_start: usize,
    pub line_end: usize,
    /// Indentation of a tag's closing line; `None` for other levels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closing_tag_prefix: Option<String>,
    /// Terminator of the heading line or opening tag line
    #[serde(default)]
    pub marker_eol: LineEnding,
    /// Terminator of the closing tag line
    #[serde(default)]
    pub closing_eol: LineEnding,
    /// Text between a tag's closing line and its next sibling
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub trailing: String,
}

impl SectionRow {
    fn from_section(section: &Section, id: usize, parent: Option<usize>, position: usize) -> Self {
        let mut row = Self {
            id,
            parent,
            position,
            level: section.level(),
            title: section.title().to_string(),
            content: section.content.clone(),
            line_start: section.line_start,
            line_end: section.line_end,
            closing_tag_prefix: None,
            marker_eol: LineEnding::default(),
            closing_eol: LineEnding::default(),
            trailing: String::new(),
        };

        match &section.kind {
            SectionKind::Orphaned => {}
            SectionKind::Heading { eol, .. } => row.marker_eol = *eol,
            SectionKind::Tag {
                closing_prefix,
                open_eol,
                close_eol,
                trailing,
                ..
            } => {
                row.closing_tag_prefix = Some(closing_prefix.clone());
                row.marker_eol = *open_eol;
                row.closing_eol = *close_eol;
                row.trailing = trailing.clone();
            }
        }
        row
    }

    /// Section for this row, without children
    fn to_section(&self) -> Result<Section> {
        let kind = match self.level {
            ORPHAN_LEVEL => SectionKind::Orphaned,
            TAG_LEVEL => SectionKind::Tag {
                name: self.title.clone(),
                closing_prefix: self.closing_tag_prefix.clone().unwrap_or_default(),
                open_eol: self.marker_eol,
                close_eol: self.closing_eol,
                trailing: self.trailing.clone(),
            },
            1..=6 => SectionKind::Heading {
                depth: self.level as u8,
                title: self.title.clone(),
                eol: self.marker_eol,
            },
            level => return Err(Error::InvalidLevel { id: self.id, level }),
        };

        Ok(Section {
            kind,
            content: self.content.clone(),
            line_start: self.line_start,
            line_end: self.line_end,
            children: Vec::new(),
        })
    }
}

/// Rows for every section, in document order
pub fn flatten(sections: &[Section]) -> Vec<SectionRow> {
    SectionTree::new(sections)
        .iter()
        .enumerate()
        .map(|(id, node)| SectionRow::from_section(node.section, id, node.parent, node.position))
        .collect()
}

/// Rebuild the section forest from rows in any order
///
/// Rows are grouped by parent and ordered by position. The result is checked
/// against the tree invariants before it is returned.
pub fn rebuild(rows: &[SectionRow]) -> Result<Vec<Section>> {
    let mut by_id: HashMap<usize, &SectionRow> = HashMap::with_capacity(rows.len());
    for row in rows {
        if by_id.insert(row.id, row).is_some() {
            return Err(Error::DuplicateId { id: row.id });
        }
    }

    let mut children: BTreeMap<Option<usize>, Vec<&SectionRow>> = BTreeMap::new();
    for row in rows {
        match row.parent {
            Some(parent) if !by_id.contains_key(&parent) => {
                return Err(Error::DanglingParent { id: row.id, parent });
            }
            _ => {}
        }
        children.entry(row.parent).or_default().push(row);
    }

    for (parent, siblings) in children.iter_mut() {
        siblings.sort_by_key(|row| row.position);
        if let Some(pair) = siblings.windows(2).find(|w| w[0].position == w[1].position) {
            return Err(Error::DuplicatePosition {
                parent: *parent,
                position: pair[0].position,
            });
        }
    }

    let mut built = 0usize;
    let roots = children.get(&None).map(Vec::as_slice).unwrap_or_default();
    let sections = build(roots, &children, &mut built)?;

    if built != rows.len() {
        let count = rows.len() - built;
        warn!(count, "Rejected rows not reachable from the top level");
        return Err(Error::Unreachable { count });
    }

    SectionTree::new(&sections).validate()?;
    trace!(rows = rows.len(), "Rebuilt section forest");
    Ok(sections)
}

type Children<'a> = BTreeMap<Option<usize>, Vec<&'a SectionRow>>;

struct Frame<'a> {
    section: Section,
    kids: std::slice::Iter<'a, &'a SectionRow>,
}

fn open<'a>(row: &SectionRow, children: &'a Children<'a>, built: &mut usize) -> Result<Frame<'a>> {
    *built += 1;
    let kids = children.get(&Some(row.id)).map(Vec::as_slice).unwrap_or_default();
    Ok(Frame {
        section: row.to_section()?,
        kids: kids.iter(),
    })
}

// Depth-first with an explicit stack; a finished frame is attached to the
// frame below it.
fn build<'a>(
    roots: &'a [&'a SectionRow],
    children: &'a Children<'a>,
    built: &mut usize,
) -> Result<Vec<Section>> {
    let mut forest = Vec::with_capacity(roots.len());
    for root in roots {
        let mut stack = vec![open(root, children, built)?];
        while let Some(frame) = stack.last_mut() {
            if let Some(child) = frame.kids.next() {
                let next = open(child, children, built)?;
                stack.push(next);
                continue;
            }
            let Some(done) = stack.pop() else { break };
            match stack.last_mut() {
                Some(parent) => parent.section.children.push(done.section),
                None => forest.push(done.section),
            }
        }
    }
    Ok(forest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<Section> {
        vec![
            Section::orphaned("intro\n").with_lines(1, 1),
            Section::heading(1, "A").with_content("a\n").with_children(vec![
                Section::heading(2, "B").with_content("b\n"),
            ]),
        ]
    }

    #[test]
    fn flatten_assigns_pre_order_ids() {
        let rows = flatten(&sample());
        let summary: Vec<_> = rows
            .iter()
            .map(|r| (r.id, r.parent, r.position, r.level, r.title.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (0, None, 0, 0, ""),
                (1, None, 1, 1, "A"),
                (2, Some(1), 0, 2, "B"),
            ]
        );
    }

    #[test]
    fn rebuild_accepts_shuffled_rows() {
        let sections = sample();
        let mut rows = flatten(&sections);
        rows.reverse();
        assert_eq!(rebuild(&rows).unwrap(), sections);
    }

    #[test]
    fn tag_rows_keep_closing_details() {
        let sections = vec![
            Section::tag("a")
                .with_closing_prefix("  ")
                .with_trailing("\n"),
        ];
        let rows = flatten(&sections);
        assert_eq!(rows[0].closing_tag_prefix.as_deref(), Some("  "));
        assert_eq!(rows[0].trailing, "\n");
        assert_eq!(rebuild(&rows).unwrap(), sections);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut rows = flatten(&sample());
        rows[2].id = 1;
        assert!(matches!(rebuild(&rows), Err(Error::DuplicateId { id: 1 })));
    }

    #[test]
    fn dangling_parent_is_rejected() {
        let mut rows = flatten(&sample());
        rows[2].parent = Some(9);
        assert!(matches!(
            rebuild(&rows),
            Err(Error::DanglingParent { id: 2, parent: 9 })
        ));
    }

    #[test]
    fn duplicate_position_is_rejected() {
        let mut rows = flatten(&sample());
        rows[1].position = 0;
        assert!(matches!(
            rebuild(&rows),
            Err(Error::DuplicatePosition {
                parent: None,
                position: 0
            })
        ));
    }

    #[test]
    fn cycles_are_unreachable() {
        let mut rows = flatten(&sample());
        rows[1].parent = Some(2);
        assert!(matches!(rebuild(&rows), Err(Error::Unreachable { count: 2 })));
    }

    #[test]
    fn unknown_level_is_rejected() {
        let mut rows = flatten(&sample());
        rows[2].level = 7;
        assert!(matches!(
            rebuild(&rows),
            Err(Error::InvalidLevel { id: 2, level: 7 })
        ));
    }

    #[test]
    fn structurally_invalid_forest_is_rejected() {
        let mut rows = flatten(&sample());
        // A depth-1 heading under a depth-1 heading
        rows[2].level = 1;
        assert!(matches!(rebuild(&rows), Err(Error::Content(_))));
    }
}
