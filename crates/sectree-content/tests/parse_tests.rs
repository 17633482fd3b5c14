//! Tests for section parsing

use pretty_assertions::assert_eq;
use sectree_content::{
    Category, Format, FormatDetector, LineEnding, Section, SectionKind, decompose, parse,
};
use sectree_test_utils::fixtures;

fn headings(content: &str) -> Vec<Section> {
    parse("doc.md", content, Category::generic(), Format::HeadingStructured).sections
}

fn tags(content: &str) -> Vec<Section> {
    parse("doc.md", content, Category::generic(), Format::TagStructured).sections
}

#[test]
fn heading_level_skip_is_kept() {
    let sections = headings(fixtures::HEADING_SKIP);

    assert_eq!(sections.len(), 1);
    let a = &sections[0];
    assert_eq!((a.title(), a.level()), ("A", 1));
    assert_eq!(a.content, "\n");
    assert_eq!(a.children.len(), 1);

    let b = &a.children[0];
    assert_eq!((b.title(), b.level()), ("B", 3));
    assert_eq!(b.content, "\ncontent\n");
    assert!(b.children.is_empty());
}

#[test]
fn heading_inside_fence_is_content() {
    let fenced = headings("# Top\n```\n## not a heading\n```\n");
    assert_eq!(fenced.len(), 1);
    assert!(fenced[0].children.is_empty());
    assert_eq!(fenced[0].content, "```\n## not a heading\n```\n");

    let bare = headings("# Top\n## not a heading\n");
    assert_eq!(bare[0].children.len(), 1);
    assert_eq!(bare[0].children[0].title(), "not a heading");
}

#[test]
fn tilde_fences_hide_headings_too() {
    let sections = headings(fixtures::FENCED);
    assert_eq!(sections.len(), 1);
    let children: Vec<_> = sections[0].children.iter().map(|s| s.title()).collect();
    assert_eq!(children, vec!["Also real"]);
    assert_eq!(sections[0].children[0].content, "\n~~~\n# still code\n~~~\n");
}

#[test]
fn unclosed_fence_swallows_the_rest() {
    let sections = headings(fixtures::UNCLOSED_FENCE);
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].content, "\n```\n## swallowed\n\n# also swallowed\n");
}

#[test]
fn orphaned_content_comes_first() {
    let sections = headings(fixtures::ORPHANED);
    assert_eq!(sections.len(), 2);
    assert!(sections[0].is_orphaned());
    assert_eq!(sections[0].level(), 0);
    assert_eq!(sections[0].content, "intro text\n\n");
    assert_eq!(sections[1].title(), "First");
    assert_eq!(sections[1].content, "\nbody\n");
}

#[test]
fn empty_sections_have_single_line_spans() {
    let sections = headings(fixtures::EMPTY_SECTIONS);
    let titles: Vec<_> = sections.iter().map(|s| s.title()).collect();
    assert_eq!(titles, vec!["A", "B", "D"]);
    assert_eq!(sections[0].content, "");
    assert_eq!((sections[0].line_start, sections[0].line_end), (1, 1));
    assert_eq!(sections[1].children[0].title(), "C");
}

#[test]
fn tag_nesting_excludes_nested_block() {
    let sections = tags(fixtures::TAG_NESTING);
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].title(), "outer");
    assert_eq!(sections[0].level(), -1);
    assert_eq!(sections[0].content, "text\n");
    assert_eq!(sections[0].children.len(), 1);
    assert_eq!(sections[0].children[0].title(), "inner");
}

#[test]
fn indented_closing_tag_is_captured() {
    let sections = tags(fixtures::TAGS);
    let rules = &sections[1];
    assert_eq!(rules.title(), "rules");
    assert_eq!(rules.content, "Be kind.\n");
    let example = &rules.children[0];
    assert_eq!(example.closing_tag_prefix(), Some("  "));
    assert_eq!(example.content, "  Nice work!\n");
    assert_eq!(example.trailing(), "Be precise.\n");
}

#[test]
fn tag_preamble_and_trailing_text() {
    let sections = tags(fixtures::TAG_PREAMBLE);
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].content, "Preamble line\n\n");
    assert_eq!(sections[1].trailing(), "trailing notes\n");
}

#[test]
fn mixed_content_uses_heading_strategy() {
    let doc = decompose(&FormatDetector::default(), "CLAUDE.md", fixtures::MIXED);
    assert_eq!(doc.format, Format::Mixed);
    assert_eq!(doc.category.as_str(), "instructions");

    assert!(doc.sections.iter().all(|s| s.is_heading()));
    let instructions = &doc.sections[0];
    assert_eq!(instructions.content, "\n<rules>\nNo tabs.\n</rules>\n\n");
    assert_eq!(instructions.children[0].title(), "More");
}

#[test]
fn unknown_format_falls_back_to_headings() {
    let doc = parse("x.txt", "# Looks like a heading\n", Category::generic(), Format::Unknown);
    assert_eq!(doc.format, Format::Unknown);
    assert!(doc.sections[0].is_heading());
}

#[test]
fn frontmatter_is_split_before_parsing() {
    let doc = decompose(&FormatDetector::default(), "a.md", fixtures::FRONTMATTER);
    assert_eq!(doc.frontmatter, "name: reviewer\ndescription: Reviews code\n");
    assert_eq!(doc.sections[0].content, "\n");
    assert_eq!(doc.sections[1].title(), "Reviewer");
    // Line numbers are relative to the body
    assert_eq!(doc.sections[1].line_start, 2);
}

#[test]
fn malformed_frontmatter_stays_in_body() {
    let doc = decompose(&FormatDetector::default(), "a.md", fixtures::MALFORMED_FRONTMATTER);
    assert_eq!(doc.frontmatter, "");
    assert_eq!(doc.sections[0].content, "---\nkey: value\n");
    assert_eq!(doc.sections[1].title(), "Not closed");
}

#[test]
fn crlf_headings_keep_their_terminator() {
    let sections = headings(fixtures::CRLF);
    assert_eq!(
        sections[0].kind,
        SectionKind::Heading {
            depth: 1,
            title: "Windows".into(),
            eol: LineEnding::CrLf,
        }
    );
    assert_eq!(sections[0].content, "\r\nline\r\n");
}

#[test]
fn tree_view_reports_depth_and_parent() {
    let doc = parse("a.md", fixtures::HEADINGS, Category::generic(), Format::HeadingStructured);
    let tree = doc.tree();
    let linux = tree
        .iter()
        .position(|n| n.section.title() == "Linux")
        .unwrap();
    assert_eq!(tree.depth(linux), Some(2));
    assert_eq!(tree.parent(linux).unwrap().section.title(), "Install");
    assert!(tree.validate().is_ok());
}

#[test]
fn deeply_nested_tags_parse_and_recompose() {
    const DEPTH: usize = 10_000;
    let content = "<a>\n".repeat(DEPTH) + &"</a>\n".repeat(DEPTH);
    let doc = parse("deep.md", &content, Category::generic(), Format::TagStructured);

    assert_eq!(doc.section_count(), DEPTH);
    let tree = doc.tree();
    assert!(tree.validate().is_ok());
    assert_eq!(tree.depth(DEPTH - 1), Some(DEPTH - 1));
    assert_eq!(doc.recompose(), content);
}

#[test]
fn many_unmatched_tags_stay_linear() {
    let content = "<a>\n".repeat(50_000);
    let started = std::time::Instant::now();

    let doc = decompose(&FormatDetector::default(), "flat.md", &content);
    assert_eq!(doc.format, Format::TagStructured);
    assert_eq!(doc.section_count(), 1);
    assert!(doc.sections[0].is_orphaned());
    assert_eq!(doc.recompose(), content);
    assert!(started.elapsed() < std::time::Duration::from_secs(5));
}

#[test]
fn parsing_does_not_share_state_between_threads() {
    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = fixtures::ALL
            .iter()
            .map(|fixture| {
                scope.spawn(move || {
                    decompose(&FormatDetector::default(), fixture.path, fixture.content)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (fixture, doc) in fixtures::ALL.iter().zip(results) {
        let sequential = decompose(&FormatDetector::default(), fixture.path, fixture.content);
        assert_eq!(doc, sequential, "fixture {}", fixture.name);
    }
}

fn outline(doc: &sectree_content::ParsedDocument) -> String {
    doc.tree()
        .iter()
        .map(|node| {
            let section = node.section;
            let marker = match &section.kind {
                SectionKind::Orphaned => "(orphan)".to_string(),
                SectionKind::Heading { depth, title, .. } => {
                    format!("{} {title}", "#".repeat(*depth as usize))
                }
                SectionKind::Tag { name, .. } => format!("<{name}>"),
            };
            format!(
                "{}{marker} [{}-{}] {:?}",
                "  ".repeat(node.depth),
                section.line_start,
                section.line_end,
                section.content
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn tag_tree_outline() {
    let doc = parse("p.md", fixtures::TAGS, Category::generic(), Format::TagStructured);
    insta::assert_snapshot!(outline(&doc), @r#"
    <role> [1-3] "You are a reviewer.\n"
    <rules> [5-11] "Be kind.\n"
      <example> [7-9] "  Nice work!\n"
    "#);
}

#[test]
fn frontmatter_document_outline() {
    let doc = decompose(&FormatDetector::default(), "a.md", fixtures::FRONTMATTER);
    insta::assert_snapshot!(outline(&doc), @r#"
    (orphan) [1-1] "\n"
    # Reviewer [2-4] "\nYou review code.\n"
    "#);
}
