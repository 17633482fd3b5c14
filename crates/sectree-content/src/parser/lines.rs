//! Line splitting that keeps every byte

use crate::section::LineEnding;

/// One input line together with its terminator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Line<'a> {
    /// Text plus terminator, exactly as in the input
    pub raw: &'a str,
    /// Text without the terminator
    pub text: &'a str,
    pub eol: LineEnding,
}

pub(crate) fn split_lines(content: &str) -> Vec<Line<'_>> {
    content
        .split_inclusive('\n')
        .map(|raw| {
            let (text, eol) = LineEnding::split(raw);
            Line { raw, text, eol }
        })
        .collect()
}

/// Concatenate raw lines back into text
pub(crate) fn concat(lines: &[Line<'_>]) -> String {
    lines.iter().map(|l| l.raw).collect()
}
