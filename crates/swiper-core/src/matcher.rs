//! Line matcher: evaluates every predicate of a query against one line.
//!
//! A line matches only if it satisfies ALL predicates. Evaluation walks the
//! predicates in query order and stops at the first one that rejects the
//! line. Each satisfied non-negated predicate contributes exactly one
//! segment; satisfied negated predicates contribute nothing.

use crate::{
    pattern::CompiledTerm,
    types::{MatchRecord, TermPredicate},
};

/// The predicates of one query, compiled once and reused for every line.
#[derive(Debug)]
pub struct LineMatcher {
    terms: Vec<(CompiledTerm, bool)>,
}

impl LineMatcher {
    pub fn new(predicates: &[TermPredicate]) -> Self {
        let terms = predicates
            .iter()
            .map(|p| (CompiledTerm::compile(p), p.negate))
            .collect();
        Self { terms }
    }

    /// Number of predicates, negated ones included.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// `Some(record)` iff `text` satisfies every predicate.
    pub fn match_line(&self, line: usize, text: &str) -> Option<MatchRecord> {
        let mut record = MatchRecord::new(line);
        for (term, negate) in &self.terms {
            // A malformed regex term excludes the line outright, negated or not.
            if term.is_invalid() {
                return None;
            }
            match (term.first_match(text), *negate) {
                (None, false) | (Some(_), true) => return None,
                (None, true) => {}
                (Some(segment), false) => record.segments.push(segment),
            }
        }
        Some(record)
    }
}

/// Match a single line without keeping the compiled predicates around.
pub fn match_line(line: usize, text: &str, predicates: &[TermPredicate]) -> Option<MatchRecord> {
    LineMatcher::new(predicates).match_line(line, text)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
