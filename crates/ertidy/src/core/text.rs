//! Shared text utilities for line-oriented rewriting
//!
//! Lines are split with their terminators kept aside so a rewrite can put
//! back exactly what was there, and edits are expressed as byte ranges of
//! the original line so untouched text is copied through verbatim.

use std::ops::Range;

/// One line of source text, split from its terminator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// Line content without the terminator
    pub body: &'a str,
    /// `"\n"`, `"\r\n"`, or `""` for an unterminated final line
    pub terminator: &'a str,
}

/// Split text into lines, keeping each line's terminator.
///
/// Joining `body + terminator` for every line reproduces the input exactly.
/// A trailing newline does not produce an extra empty line.
///
/// # Example
/// ```
/// use ertidy::core::split_lines;
///
/// let lines = split_lines("erDiagram\r\n    A {\n}");
/// assert_eq!(lines.len(), 3);
/// assert_eq!(lines[0].terminator, "\r\n");
/// assert_eq!(lines[2].terminator, "");
/// ```
pub fn split_lines(input: &str) -> Vec<SourceLine<'_>> {
    input
        .split_inclusive('\n')
        .map(|raw| {
            if let Some(body) = raw.strip_suffix("\r\n") {
                SourceLine {
                    body,
                    terminator: "\r\n",
                }
            } else if let Some(body) = raw.strip_suffix('\n') {
                SourceLine {
                    body,
                    terminator: "\n",
                }
            } else {
                SourceLine {
                    body: raw,
                    terminator: "",
                }
            }
        })
        .collect()
}

/// Split a line into its leading whitespace and the rest
pub fn split_indent(line: &str) -> (&str, &str) {
    let content = line.trim_start();
    line.split_at(line.len() - content.len())
}

/// Replacement of one byte range of a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub range: Range<usize>,
    pub replacement: String,
}

impl Edit {
    pub fn new(range: Range<usize>, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }
}

/// Apply non-overlapping edits to `text`, copying everything else verbatim.
///
/// Edits may be given in any order. Edits whose range falls outside `text`
/// or overlaps an earlier edit are skipped.
pub fn apply_edits(text: &str, mut edits: Vec<Edit>) -> String {
    edits.sort_by_key(|edit| edit.range.start);

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for edit in edits {
        if edit.range.start < cursor
            || edit.range.end > text.len()
            || edit.range.start > edit.range.end
        {
            continue;
        }
        out.push_str(&text[cursor..edit.range.start]);
        out.push_str(&edit.replacement);
        cursor = edit.range.end;
    }
    out.push_str(&text[cursor..]);
    out
}
