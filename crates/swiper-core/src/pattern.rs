//! Term compilation: the `/body/flags` regex literal grammar and the
//! compiled form of every predicate.
//!
//! A regex term is only usable if it parses as a delimited literal with
//! supported flags and the body compiles. Anything else becomes
//! [`CompiledTerm::Invalid`], which the matcher treats as "no line matches".

use regex::{Regex, RegexBuilder};

use crate::{error::PatternError, types::{Segment, TermPredicate}};

/// Flags accepted after the closing `/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegexFlags {
    /// `g`: accepted for familiarity; a first-match search ignores it.
    pub global: bool,
    /// `i`
    pub ignore_case: bool,
    /// `m`: `^` and `$` match at line breaks.
    pub multiline: bool,
    /// `y`: the match must start at column 0.
    pub sticky: bool,
}

impl RegexFlags {
    fn parse(flags: &str) -> Result<Self, PatternError> {
        let mut out = RegexFlags::default();
        for flag in flags.chars() {
            let slot = match flag {
                'g' => &mut out.global,
                'i' => &mut out.ignore_case,
                'm' => &mut out.multiline,
                'y' => &mut out.sticky,
                other => return Err(PatternError::UnknownFlag(other)),
            };
            if *slot {
                return Err(PatternError::DuplicateFlag(flag));
            }
            *slot = true;
        }
        Ok(out)
    }
}

/// A parsed `/body/flags` literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegexLiteral {
    pub body: String,
    pub flags: RegexFlags,
}

/// Split a regex term into body and flags.
///
/// The body runs from the opening `/` to the last `/`; whatever follows the
/// last `/` must be a flag string. `/a/b/i` therefore has the body `a/b`.
pub fn parse_regex_literal(term: &str) -> Result<RegexLiteral, PatternError> {
    let not_delimited = || PatternError::NotDelimited(term.to_string());
    let rest = term.strip_prefix('/').ok_or_else(not_delimited)?;
    let (body, flags) = rest.rsplit_once('/').ok_or_else(not_delimited)?;
    Ok(RegexLiteral {
        body: body.to_string(),
        flags: RegexFlags::parse(flags)?,
    })
}

impl RegexLiteral {
    pub fn compile(&self) -> Result<Regex, PatternError> {
        RegexBuilder::new(&self.body)
            .case_insensitive(self.flags.ignore_case)
            .multi_line(self.flags.multiline)
            .build()
            .map_err(PatternError::from)
    }
}

// ---------------------------------------------------------------------------
// Compiled terms
// ---------------------------------------------------------------------------

/// A predicate ready to be evaluated against line text.
#[derive(Debug)]
pub enum CompiledTerm {
    Literal {
        /// Lower-cased when the term is case-insensitive.
        needle: String,
        case_sensitive: bool,
        /// Length of the term as typed, in chars.
        len: usize,
    },
    Regex {
        regex: Regex,
        sticky: bool,
    },
    Invalid(PatternError),
}

impl CompiledTerm {
    pub fn compile(predicate: &TermPredicate) -> Self {
        if predicate.is_regex {
            let compiled = parse_regex_literal(&predicate.pattern).and_then(|literal| {
                let regex = literal.compile()?;
                Ok(CompiledTerm::Regex {
                    regex,
                    sticky: literal.flags.sticky,
                })
            });
            return compiled.unwrap_or_else(|err| {
                tracing::debug!(pattern = %predicate.pattern, error = %err, "invalid regex term");
                CompiledTerm::Invalid(err)
            });
        }

        let needle = if predicate.case_sensitive {
            predicate.pattern.clone()
        } else {
            predicate.pattern.to_lowercase()
        };
        CompiledTerm::Literal {
            needle,
            case_sensitive: predicate.case_sensitive,
            len: predicate.pattern.chars().count(),
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, CompiledTerm::Invalid(_))
    }

    /// First occurrence of this term in `text`, in char columns.
    ///
    /// Always `None` for [`CompiledTerm::Invalid`].
    pub fn first_match(&self, text: &str) -> Option<Segment> {
        match self {
            CompiledTerm::Literal {
                needle,
                case_sensitive: true,
                len,
            } => text
                .find(needle.as_str())
                .map(|byte| Segment::new(char_column(text, byte), *len)),
            CompiledTerm::Literal {
                needle,
                case_sensitive: false,
                len,
            } => find_case_insensitive(text, needle).map(|col| Segment::new(col, *len)),
            CompiledTerm::Regex { regex, sticky } => {
                let m = regex.find(text)?;
                if *sticky && m.start() != 0 {
                    return None;
                }
                Some(Segment::new(
                    char_column(text, m.start()),
                    m.as_str().chars().count(),
                ))
            }
            CompiledTerm::Invalid(_) => None,
        }
    }
}

/// Char column of a byte offset that lies on a char boundary.
fn char_column(text: &str, byte: usize) -> usize {
    text[..byte].chars().count()
}

/// Find `needle_lower` in the lower-cased `haystack` and report the column of
/// the original char the hit starts in.
///
/// Lower-casing can change byte lengths (`İ` → `i̇`), so offsets into the
/// lowered text are mapped back through the start of each original char.
fn find_case_insensitive(haystack: &str, needle_lower: &str) -> Option<usize> {
    if needle_lower.is_empty() {
        return Some(0);
    }
    let mut lowered = String::with_capacity(haystack.len());
    let mut starts = Vec::with_capacity(haystack.len());
    for ch in haystack.chars() {
        starts.push(lowered.len());
        lowered.extend(ch.to_lowercase());
    }
    let byte = lowered.find(needle_lower)?;
    Some(match starts.binary_search(&byte) {
        Ok(col) => col,
        Err(next) => next - 1,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
