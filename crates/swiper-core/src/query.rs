//! Query parser: raw query text into an ordered list of [`TermPredicate`]s.
//!
//! # Grammar
//!
//! Terms are separated by whitespace; there is no escaping, so a single term
//! can never contain a space.
//!
//! | Token      | Meaning                                         |
//! |------------|-------------------------------------------------|
//! | `foo`      | literal, case-insensitive                       |
//! | `Foo`      | literal, case-sensitive (token has an uppercase) |
//! | `!foo`     | line must NOT contain `foo`                     |
//! | `/ba+r/i`  | regex, flags from `g i m y`                     |
//! | `!/ba+r/`  | line must NOT match the regex                   |

use crate::types::TermPredicate;

/// Placeholder shown in an empty picker. Never searched.
pub const PROMPT_SENTINEL: &str = "type 2 or more chars to search";

/// Queries shorter than this (after trimming, in chars) are never scanned.
pub const MIN_QUERY_LEN: usize = 2;

/// Parse a raw query into predicates, left to right.
///
/// Returns an empty list when the query is blank.
pub fn parse_query(query: &str) -> Vec<TermPredicate> {
    query.split_whitespace().map(parse_term).collect()
}

fn parse_term(token: &str) -> TermPredicate {
    let (negate, body) = match token.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, token),
    };
    TermPredicate {
        pattern: body.to_string(),
        is_regex: body.starts_with('/'),
        case_sensitive: token.chars().any(char::is_uppercase),
        negate,
    }
}

/// Whether `query` is long enough to run a scan at all.
pub fn is_searchable(query: &str) -> bool {
    let trimmed = query.trim();
    trimmed.chars().count() >= MIN_QUERY_LEN && trimmed != PROMPT_SENTINEL
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
