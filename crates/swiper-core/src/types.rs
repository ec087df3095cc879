//! Core value types shared by every layer.
//!
//! All columns and lengths are counted in `char`s of the line text, never in
//! bytes, so they can be handed straight to a renderer that walks characters.

use serde::Serialize;

/// One compiled-once query term.
///
/// Built by [`parse_query`](crate::query::parse_query); order follows the
/// left-to-right order of the terms in the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermPredicate {
    /// Term text with a leading `!` removed. Regex terms keep their
    /// `/body/flags` delimiters.
    pub pattern: String,
    pub is_regex: bool,
    /// Smart case: true iff the original token contains an uppercase letter.
    /// Ignored for regex terms, whose case is governed by their flags.
    pub case_sensitive: bool,
    pub negate: bool,
}

/// A `(start_column, length)` span recorded by a satisfied predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Segment {
    pub start: usize,
    pub len: usize,
}

impl Segment {
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Exclusive end column.
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// A line that satisfied every predicate of a query.
///
/// `segments` holds one entry per non-negated predicate, in predicate order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MatchRecord {
    pub line: usize,
    pub segments: Vec<Segment>,
}

impl MatchRecord {
    pub fn new(line: usize) -> Self {
        Self {
            line,
            segments: Vec::new(),
        }
    }
}

/// A position in the host editor, `column` counted in chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// An editor selection. `anchor == active` is a bare cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Selection {
    pub anchor: Position,
    pub active: Position,
}

impl Selection {
    pub fn new(anchor: Position, active: Position) -> Self {
        Self { anchor, active }
    }

    pub fn cursor(at: Position) -> Self {
        Self::new(at, at)
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.active
    }

    /// The earlier of the two ends.
    pub fn start(&self) -> Position {
        self.anchor.min(self.active)
    }

    /// The later of the two ends.
    pub fn end(&self) -> Position {
        self.anchor.max(self.active)
    }
}

/// The scroll state of the host editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Viewport {
    /// First visible line.
    pub top_line: usize,
}
