//! Seed text for "search the word at the cursor".
//!
//! The selection wins when it is non-empty; otherwise the word touching the
//! selection start is used. Anything else, including positions past the end
//! of the document, degrades to an empty seed.

use crate::{
    controller::EditorView,
    scanner::Document,
    types::{Position, Selection},
};

pub fn seed_from_editor<E, D>(editor: &E, document: &D) -> String
where
    E: EditorView + ?Sized,
    D: Document + ?Sized,
{
    let selection = editor.selection();
    if !selection.is_empty() {
        let text = selected_text(document, selection);
        if !text.is_empty() {
            return text;
        }
    }
    word_at(document, selection.start()).unwrap_or_default()
}

/// Text covered by `selection`, lines joined with `\n`.
pub fn selected_text<D: Document + ?Sized>(document: &D, selection: Selection) -> String {
    let (start, end) = (selection.start(), selection.end());
    let last_line = end.line.min(document.line_count().saturating_sub(1));
    if start.line >= document.line_count() {
        return String::new();
    }

    let mut parts = Vec::new();
    for line in start.line..=last_line {
        let text = document.line_text(line);
        let from = if line == start.line { start.column } else { 0 };
        let part: String = if line == end.line {
            let to = end.column.max(from);
            text.chars().skip(from).take(to - from).collect()
        } else {
            text.chars().skip(from).collect()
        };
        parts.push(part);
    }
    parts.join("\n")
}

/// The run of word characters (alphanumerics and `_`) touching `at`.
pub fn word_at<D: Document + ?Sized>(document: &D, at: Position) -> Option<String> {
    if at.line >= document.line_count() {
        return None;
    }
    let chars: Vec<char> = document.line_text(at.line).chars().collect();
    if at.column > chars.len() {
        return None;
    }

    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let mut start = at.column;
    while start > 0 && is_word(chars[start - 1]) {
        start -= 1;
    }
    let mut end = at.column;
    while end < chars.len() && is_word(chars[end]) {
        end += 1;
    }
    (start < end).then(|| chars[start..end].iter().collect())
}
