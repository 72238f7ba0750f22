//! Line-oriented buffer helpers
//!
//! Everything here works on byte offsets. Columns are clamped to the line and
//! moved back to the nearest char boundary before slicing.

use crate::models::{Language, Position};

/// Byte offset where `line` begins. `None` once past the last line.
pub fn line_start(text: &str, line: u32) -> Option<usize> {
    if line == 0 {
        return Some(0);
    }
    text.match_indices('\n')
        .nth(line as usize - 1)
        .map(|(idx, _)| idx + 1)
}

/// Content of `line` without its terminator
pub fn line_at(text: &str, line: u32) -> Option<&str> {
    let start = line_start(text, line)?;
    if start > text.len() || (start == text.len() && line > 0) {
        return None;
    }
    let rest = &text[start..];
    let end = rest.find('\n').unwrap_or(rest.len());
    Some(rest[..end].trim_end_matches('\r'))
}

/// Leading spaces and tabs
pub fn leading_whitespace(line: &str) -> &str {
    let end = line
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(line.len());
    &line[..end]
}

/// Indentation of the given line, empty when the line does not exist
pub fn indentation_of(text: &str, line: u32) -> String {
    line_at(text, line)
        .map(|l| leading_whitespace(l).to_string())
        .unwrap_or_default()
}

/// Indentation of the first non-blank line at or after `line`
pub fn indentation_from(text: &str, line: u32) -> String {
    (line..)
        .map_while(|l| line_at(text, l))
        .find(|l| !l.trim().is_empty())
        .map(|l| leading_whitespace(l).to_string())
        .unwrap_or_default()
}

/// True when only whitespace or a line comment follows `pos` on its line
pub fn ends_line(text: &str, pos: Position, language: Language) -> bool {
    let Some(line) = line_at(text, pos.line) else {
        return false;
    };
    let mut column = (pos.column as usize).min(line.len());
    while !line.is_char_boundary(column) {
        column -= 1;
    }
    let rest = line[column..].trim();
    let hash_comments = matches!(language, Language::Python | Language::PHP);
    rest.is_empty() || rest.starts_with("//") || (hash_comments && rest.starts_with('#'))
}

/// Line/column of a byte offset
pub fn position_at(bytes: &[u8], offset: usize) -> Position {
    let offset = offset.min(bytes.len());
    let before = &bytes[..offset];
    let line = before.iter().filter(|b| **b == b'\n').count();
    let column = match before.iter().rposition(|b| *b == b'\n') {
        Some(nl) => offset - nl - 1,
        None => offset,
    };
    Position::new(line as u32, column as u32)
}

/// Line where a new top-level import belongs: right after a `package`
/// clause, after a leading run of imports, otherwise the top of the file.
/// Only the first 50 lines are considered.
pub fn import_line(text: &str) -> u32 {
    let lines: Vec<&str> = text.lines().take(50).collect();
    for (idx, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if trimmed.starts_with("package ") {
            return idx as u32 + 1;
        }
        if trimmed.starts_with("import ") || trimmed.starts_with("from ") {
            continue;
        }
        if idx > 0 && lines[idx - 1].trim().starts_with("import") {
            return idx as u32;
        }
    }
    0
}

/// Byte offset for an insertion at `line`/`column`, or `None` when the line
/// lies past the end of the buffer
fn insertion_offset(text: &str, line: u32, column: u32) -> Option<usize> {
    let start = line_start(text, line)?;
    let line_end = text[start..]
        .find('\n')
        .map(|i| start + i)
        .unwrap_or(text.len());
    let mut offset = (start + column as usize).min(line_end);
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    Some(offset)
}

/// Insert `insert` at `line`/`column`. Past the end, the text is appended,
/// adding the missing final newline first.
pub fn insert_at(text: &str, line: u32, column: u32, insert: &str) -> String {
    let mut out = String::with_capacity(text.len() + insert.len() + 1);
    match insertion_offset(text, line, column) {
        Some(offset) => {
            out.push_str(&text[..offset]);
            out.push_str(insert);
            out.push_str(&text[offset..]);
        }
        None => {
            out.push_str(text);
            if !text.is_empty() && !text.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(insert);
        }
    }
    out
}
