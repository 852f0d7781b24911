//! Where and how new array elements are spliced into existing text.

use std::ops::Range;

use super::lexer::last_comment_end;
use super::mapping::Mapping;

/// A text replacement: byte range in the old text and its new content.
pub(crate) type Edit = (Range<usize>, String);

/// Indentation unit and line ending used by a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Layout {
    pub indent_unit: String,
    pub newline: &'static str,
}

impl Layout {
    pub(crate) fn detect(source: &str) -> Self {
        let newline = if source.contains("\r\n") { "\r\n" } else { "\n" };
        let mut smallest: Option<usize> = None;
        for line in source.lines() {
            let body = line.trim_start_matches([' ', '\t']);
            // docblock continuation lines are offset by one space
            if body.is_empty() || body.starts_with('*') {
                continue;
            }
            let lead = &line[..line.len() - body.len()];
            if lead.starts_with('\t') {
                return Layout { indent_unit: "\t".to_string(), newline };
            }
            if lead.len() >= 2 {
                smallest = Some(smallest.map_or(lead.len(), |s| s.min(lead.len())));
            }
        }
        Layout { indent_unit: " ".repeat(smallest.unwrap_or(4)), newline }
    }
}

fn line_start(source: &str, offset: usize) -> usize {
    source[..offset].rfind('\n').map_or(0, |i| i + 1)
}

/// Leading whitespace of the line containing `offset`.
pub(crate) fn line_indent(source: &str, offset: usize) -> &str {
    let start = line_start(source, offset);
    let line = &source[start..];
    let body = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - body.len()]
}

/// Offset at which a new line may be opened after `from`: the end of the
/// current line when only blanks or a line comment follow, otherwise `from`.
fn end_of_line(source: &str, from: usize, limit: usize) -> usize {
    let rest = &source[from..limit];
    let Some(newline) = rest.find('\n') else {
        return from;
    };
    let tail = rest[..newline].trim();
    let line_comment = tail.starts_with("//") || (tail.starts_with('#') && !tail.starts_with("#["));
    if !tail.is_empty() && !line_comment {
        return from;
    }
    let at = from + newline;
    if source[..at].ends_with('\r') { at - 1 } else { at }
}

fn item_indent(source: &str, mapping: &Mapping, layout: &Layout) -> String {
    for item in [mapping.items.last(), mapping.items.first()].into_iter().flatten() {
        let start = line_start(source, item.start);
        let lead = &source[start..item.start];
        if lead.bytes().all(|b| b == b' ' || b == b'\t') {
            return lead.to_string();
        }
    }
    format!("{}{}", line_indent(source, mapping.start), layout.indent_unit)
}

/// Edits that append `item` (already rendered as `key => value`) to `mapping`.
pub(crate) fn plan_insertion(source: &str, mapping: &Mapping, item: &str) -> Vec<Edit> {
    let layout = Layout::detect(source);
    let nl = layout.newline;
    let body = &source[mapping.open_end..mapping.close];

    let Some(last) = mapping.items.last() else {
        let open_indent = line_indent(source, mapping.start);
        let indent = format!("{}{}", open_indent, layout.indent_unit);
        // a newline inside a comment is not a place to insert
        let trivia_end = last_comment_end(source, mapping.open_end, mapping.close);
        if let Some(newline) = source[trivia_end..mapping.close].rfind('\n') {
            let mut at = trivia_end + newline;
            if source[..at].ends_with('\r') {
                at -= 1;
            }
            return vec![(at..at, format!("{nl}{indent}{item},"))];
        }
        let text = format!("{nl}{indent}{item},{nl}{open_indent}");
        if body.trim().is_empty() {
            return vec![(mapping.open_end..mapping.close, text)];
        }
        return vec![(mapping.close..mapping.close, text)];
    };

    if !mapping.is_multiline(source) {
        return match mapping.trailing_comma() {
            Some(comma) => vec![(comma + 1..comma + 1, format!(" {item},"))],
            None => vec![(last.end..last.end, format!(", {item}"))],
        };
    }

    let indent = item_indent(source, mapping, &layout);
    match mapping.trailing_comma() {
        Some(comma) => {
            let at = end_of_line(source, comma + 1, mapping.close);
            vec![(at..at, format!("{nl}{indent}{item},"))]
        }
        None => {
            let at = end_of_line(source, last.end, mapping.close);
            if at == last.end {
                vec![(at..at, format!(",{nl}{indent}{item}"))]
            } else {
                vec![(last.end..last.end, ",".to_string()), (at..at, format!("{nl}{indent}{item}"))]
            }
        }
    }
}

/// Apply non-overlapping edits to `source`.
pub(crate) fn apply_edits(source: &str, mut edits: Vec<Edit>) -> String {
    edits.sort_by(|a, b| b.0.start.cmp(&a.0.start));
    let mut out = source.to_string();
    for (range, text) in edits {
        out.replace_range(range, &text);
    }
    out
}
