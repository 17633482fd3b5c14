//! Named sample documents
//!
//! Each [`Fixture`] pairs a document with the path it is detected under and
//! the format name the detector is expected to report.

/// A sample document
#[derive(Debug, Clone, Copy)]
pub struct Fixture {
    pub name: &'static str,
    pub path: &'static str,
    pub content: &'static str,
    /// Kebab-case format name, as serialised by the detector
    pub format: &'static str,
}

pub const HEADINGS: &str = "# Project\n\nOverview text.\n\n## Install\n\nRun the installer.\n\n### Linux\n\nUse the package.\n\n## Usage\n\nCall it.\n";

pub const HEADING_SKIP: &str = "# A\n\n### B\n\ncontent\n";

pub const ORPHANED: &str = "intro text\n\n# First\n\nbody\n";

pub const FRONTMATTER: &str = "---\nname: reviewer\ndescription: Reviews code\n---\n\n# Reviewer\n\nYou review code.\n";

pub const FRONTMATTER_TIGHT: &str = "---\nname: tight\n---\n# Heading right after\n";

pub const FENCED: &str = "# Real\n\n```markdown\n## not a heading\n```\n\n## Also real\n\n~~~\n# still code\n~~~\n";

pub const UNCLOSED_FENCE: &str = "# Top\n\n```\n## swallowed\n\n# also swallowed\n";

pub const TAGS: &str = "<role>\nYou are a reviewer.\n</role>\n\n<rules>\nBe kind.\n<example>\n  Nice work!\n  </example>\nBe precise.\n</rules>\n";

pub const TAG_NESTING: &str = "<outer>\ntext\n<inner>\nx\n</inner>\n</outer>\n";

pub const TAG_PREAMBLE: &str = "Preamble line\n\n<context>\nDetails\n</context>\ntrailing notes\n";

pub const MIXED: &str = "# Instructions\n\n<rules>\nNo tabs.\n</rules>\n\n## More\n\ntext\n";

pub const CRLF: &str = "# Windows\r\n\r\nline\r\n## Child\r\nmore\r\n";

pub const NO_FINAL_NEWLINE: &str = "# Title\n\nlast line";

pub const HEADING_AT_EOF: &str = "intro\n# Trailing heading";

pub const EMPTY_SECTIONS: &str = "# A\n# B\n## C\n# D\n";

pub const PLAIN: &str = "Just a paragraph.\nNo structure at all.\n";

pub const MALFORMED_FRONTMATTER: &str = "---\nkey: value\n# Not closed\n\nbody\n";

pub const ALL: &[Fixture] = &[
    Fixture {
        name: "headings",
        path: "README.md",
        content: HEADINGS,
        format: "heading-structured",
    },
    Fixture {
        name: "heading_skip",
        path: "docs/skip.md",
        content: HEADING_SKIP,
        format: "heading-structured",
    },
    Fixture {
        name: "orphaned",
        path: "docs/orphaned.md",
        content: ORPHANED,
        format: "heading-structured",
    },
    Fixture {
        name: "frontmatter",
        path: ".claude/agents/reviewer.md",
        content: FRONTMATTER,
        format: "heading-structured",
    },
    Fixture {
        name: "frontmatter_tight",
        path: ".claude/commands/tight.md",
        content: FRONTMATTER_TIGHT,
        format: "heading-structured",
    },
    Fixture {
        name: "fenced",
        path: "docs/fenced.md",
        content: FENCED,
        format: "heading-structured",
    },
    Fixture {
        name: "unclosed_fence",
        path: "docs/unclosed.md",
        content: UNCLOSED_FENCE,
        format: "heading-structured",
    },
    Fixture {
        name: "tags",
        path: "prompts/reviewer.md",
        content: TAGS,
        format: "tag-structured",
    },
    Fixture {
        name: "tag_nesting",
        path: "prompts/nesting.md",
        content: TAG_NESTING,
        format: "tag-structured",
    },
    Fixture {
        name: "tag_preamble",
        path: "prompts/preamble.md",
        content: TAG_PREAMBLE,
        format: "tag-structured",
    },
    Fixture {
        name: "mixed",
        path: "CLAUDE.md",
        content: MIXED,
        format: "mixed",
    },
    Fixture {
        name: "crlf",
        path: "docs/windows.md",
        content: CRLF,
        format: "heading-structured",
    },
    Fixture {
        name: "no_final_newline",
        path: "docs/eof.md",
        content: NO_FINAL_NEWLINE,
        format: "heading-structured",
    },
    Fixture {
        name: "heading_at_eof",
        path: "docs/eof-heading.md",
        content: HEADING_AT_EOF,
        format: "heading-structured",
    },
    Fixture {
        name: "empty_sections",
        path: "docs/empty.md",
        content: EMPTY_SECTIONS,
        format: "heading-structured",
    },
    Fixture {
        name: "plain",
        path: "notes.txt",
        content: PLAIN,
        format: "unknown",
    },
    Fixture {
        name: "malformed_frontmatter",
        path: "docs/malformed.md",
        content: MALFORMED_FRONTMATTER,
        format: "heading-structured",
    },
];

/// Look up a fixture by name
pub fn fixture(name: &str) -> Option<&'static Fixture> {
    ALL.iter().find(|f| f.name == name)
}
