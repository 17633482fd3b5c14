//! `proptest` strategies generating whole documents
//!
//! Documents are assembled from lines that deliberately hit the parser's
//! recognition rules and their near misses: headings at every depth and
//! level skips, fences opened and never closed, tags nested, unmatched or
//! indented, CRLF terminators and a missing final newline.

use proptest::prelude::*;

fn terminator() -> impl Strategy<Value = &'static str> {
    prop_oneof![8 => Just("\n"), 1 => Just("\r\n")]
}

fn word() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9 .,:!?-]{0,20}"
}

fn text_line() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => word(),
        1 => Just(String::new()),
        1 => Just("   ".to_string()),
        1 => word().prop_map(|w| format!("  - {w}")),
    ]
}

fn heading_line() -> impl Strategy<Value = String> {
    (1usize..=6, word()).prop_map(|(depth, title)| format!("{} {title}", "#".repeat(depth)))
}

fn near_miss_heading() -> impl Strategy<Value = String> {
    prop_oneof![
        word().prop_map(|w| format!("#{w}")),
        word().prop_map(|w| format!("####### {w}")),
        word().prop_map(|w| format!(" # {w}")),
        Just("# ".to_string()),
        Just("---".to_string()),
    ]
}

fn fence_line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("```".to_string()),
        Just("```rust".to_string()),
        Just("~~~".to_string()),
        Just("  ```".to_string()),
    ]
}

fn tag_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("rules".to_string()),
        Just("example".to_string()),
        Just("context".to_string()),
        Just("a".to_string()),
    ]
}

fn tag_line() -> impl Strategy<Value = String> {
    prop_oneof![
        tag_name().prop_map(|n| format!("<{n}>")),
        tag_name().prop_map(|n| format!("</{n}>")),
        (tag_name(), "[ \t]{1,3}").prop_map(|(n, indent)| format!("{indent}</{n}>")),
        tag_name().prop_map(|n| format!("<{n}> inline")),
    ]
}

/// Join lines with generated terminators; the last line may lack one
fn assemble(lines: Vec<(String, &'static str)>, final_newline: bool) -> String {
    let count = lines.len();
    let mut out = String::new();
    for (index, (line, eol)) in lines.into_iter().enumerate() {
        out.push_str(&line);
        if index + 1 < count || final_newline {
            out.push_str(eol);
        }
    }
    out
}

fn frontmatter() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => Just(String::new()),
        2 => prop::collection::vec("[a-z]{1,8}: [a-z0-9 ]{0,12}", 1..4)
            .prop_map(|keys| format!("---\n{}\n---\n", keys.join("\n"))),
        1 => Just("---\nunterminated: true\n".to_string()),
    ]
}

/// Documents made mostly of headings, text and fences
pub fn heading_document() -> impl Strategy<Value = String> {
    let line = prop_oneof![
        5 => text_line(),
        3 => heading_line(),
        1 => near_miss_heading(),
        1 => fence_line(),
    ];
    (
        frontmatter(),
        prop::collection::vec((line, terminator()), 0..40),
        any::<bool>(),
    )
        .prop_map(|(fm, lines, final_newline)| fm + &assemble(lines, final_newline))
}

/// Documents made mostly of tags and text
pub fn tag_document() -> impl Strategy<Value = String> {
    let line = prop_oneof![
        4 => text_line(),
        4 => tag_line(),
        1 => heading_line(),
    ];
    (
        frontmatter(),
        prop::collection::vec((line, terminator()), 0..40),
        any::<bool>(),
    )
        .prop_map(|(fm, lines, final_newline)| fm + &assemble(lines, final_newline))
}

/// Any of the generated document shapes
pub fn document() -> impl Strategy<Value = String> {
    prop_oneof![heading_document(), tag_document()]
}
