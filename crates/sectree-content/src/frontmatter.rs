//! Frontmatter splitting
//!
//! A frontmatter block is a run of lines between two `---` marker lines at
//! the very top of a document. The block is opaque text here; nothing parses
//! it as YAML.
//!
//! Only blocks whose framing [`crate::recompose`] can reproduce byte for byte
//! are split off. Anything else (leading blank lines, marker lines with
//! trailing whitespace or `\r\n`, an empty block, a closing marker without a
//! terminator, or no closing marker at all) stays in the body.

use tracing::debug;

/// Marker line delimiting a frontmatter block
pub const MARKER: &str = "---";

/// The exact opening and closing marker line
pub(crate) const MARKER_LINE: &str = "---\n";

fn is_marker(line: &str) -> bool {
    line.trim_end() == MARKER
}

/// Split `content` into `(frontmatter, body)`
///
/// `frontmatter` excludes both marker lines and keeps its own line
/// terminators; `body` is everything after the closing marker line. Without a
/// frontmatter block the result is `("", content)`.
///
/// ```
/// use sectree_content::split;
///
/// assert_eq!(split("---\na: 1\n---\nbody"), ("a: 1\n", "body"));
/// assert_eq!(split("no marker here"), ("", "no marker here"));
/// assert_eq!(split("---\nunterminated"), ("", "---\nunterminated"));
/// ```
pub fn split(content: &str) -> (&str, &str) {
    if content.trim().is_empty() {
        return ("", content);
    }

    let lines: Vec<&str> = content.split_inclusive('\n').collect();
    if lines.len() < 3 {
        return ("", content);
    }

    let Some(first) = lines.iter().position(|l| !l.trim().is_empty()) else {
        return ("", content);
    };
    if !is_marker(lines[first]) {
        return ("", content);
    }

    let Some(close) = lines[first + 1..]
        .iter()
        .position(|l| is_marker(l))
        .map(|p| first + 1 + p)
    else {
        debug!("Frontmatter opening marker has no closing marker; keeping it as body");
        return ("", content);
    };

    if first != 0 || lines[first] != MARKER_LINE || lines[close] != MARKER_LINE {
        debug!("Frontmatter framing is not canonical; keeping it as body");
        return ("", content);
    }
    if close == first + 1 {
        debug!("Frontmatter block is empty; keeping it as body");
        return ("", content);
    }

    let text_start = MARKER_LINE.len();
    let text_end = text_start + lines[1..close].iter().map(|l| l.len()).sum::<usize>();
    let body_start = text_end + MARKER_LINE.len();

    (&content[text_start..text_end], &content[body_start..])
}
