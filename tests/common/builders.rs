//! Test builders: ergonomic constructors for predicates, records and items.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use swiper_core::{MatchRecord, PickerItem, Segment, TermPredicate};

// ---------------------------------------------------------------------------
// TermBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`TermPredicate`] fixtures.
///
/// # Example
///
/// ```rust
/// let term = TermBuilder::literal("foo").negated().build();
/// ```
pub struct TermBuilder {
    pattern: String,
    is_regex: bool,
    case_sensitive: bool,
    negate: bool,
}

impl TermBuilder {
    pub fn literal(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            is_regex: false,
            case_sensitive: false,
            negate: false,
        }
    }

    pub fn regex(literal: impl Into<String>) -> Self {
        Self {
            is_regex: true,
            ..Self::literal(literal)
        }
    }

    pub fn case_sensitive(mut self) -> Self {
        self.case_sensitive = true;
        self
    }

    pub fn negated(mut self) -> Self {
        self.negate = true;
        self
    }

    pub fn build(self) -> TermPredicate {
        TermPredicate {
            pattern: self.pattern,
            is_regex: self.is_regex,
            case_sensitive: self.case_sensitive,
            negate: self.negate,
        }
    }
}

// ---------------------------------------------------------------------------
// Records and items
// ---------------------------------------------------------------------------

/// A record for `line` with `(start, len)` segments.
pub fn record(line: usize, segments: &[(usize, usize)]) -> MatchRecord {
    MatchRecord {
        line,
        segments: segments
            .iter()
            .map(|&(start, len)| Segment::new(start, len))
            .collect(),
    }
}

/// The picker item the controller would build for `record` in `lines`.
pub fn item_for(lines: &[&str], record: MatchRecord, query: &str) -> PickerItem {
    let text = lines[record.line];
    PickerItem::new(record, text, query)
}

/// Owned lines from string slices.
pub fn lines_of(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|l| l.to_string()).collect()
}
