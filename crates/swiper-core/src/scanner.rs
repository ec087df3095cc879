//! Document scanner: runs the line matcher over every line of a document.

use std::borrow::Cow;

use crate::{
    matcher::LineMatcher,
    types::{MatchRecord, TermPredicate},
};

/// Read access to the active text buffer.
///
/// Implementations must reflect the document as it is at call time; the
/// engine never caches line text between events.
pub trait Document {
    fn line_count(&self) -> usize;

    /// Text of line `line` without its terminator. Out-of-range lines read
    /// as empty.
    fn line_text(&self, line: usize) -> Cow<'_, str>;
}

impl<S: AsRef<str>> Document for [S] {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line_text(&self, line: usize) -> Cow<'_, str> {
        Cow::Borrowed(self.get(line).map(AsRef::as_ref).unwrap_or(""))
    }
}

impl<S: AsRef<str>> Document for Vec<S> {
    fn line_count(&self) -> usize {
        self.as_slice().line_count()
    }

    fn line_text(&self, line: usize) -> Cow<'_, str> {
        self.as_slice().line_text(line)
    }
}

/// Every line satisfying all `predicates`, in ascending line order.
///
/// Every line is visited exactly once; there is no early exit.
pub fn scan<D: Document + ?Sized>(document: &D, predicates: &[TermPredicate]) -> Vec<MatchRecord> {
    let matcher = LineMatcher::new(predicates);
    let records: Vec<MatchRecord> = (0..document.line_count())
        .filter_map(|line| matcher.match_line(line, &document.line_text(line)))
        .collect();
    tracing::debug!(
        lines = document.line_count(),
        terms = matcher.len(),
        matches = records.len(),
        "scan complete"
    );
    records
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
