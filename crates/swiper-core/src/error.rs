//! Error types for swiper-core.
//!
//! None of these ever reach the user during an interactive search: a
//! [`PatternError`] turns the offending term into a guaranteed non-match, and
//! [`SwiperError`] only guards construction-time invariants.

use thiserror::Error;

/// Why a regex term could not be compiled.
#[derive(Debug, Error)]
pub enum PatternError {
    /// The term is not of the form `/body/flags`.
    #[error("regex term must look like /pattern/flags: {0:?}")]
    NotDelimited(String),
    #[error("unsupported regex flag {0:?} (expected any of g, i, m, y)")]
    UnknownFlag(char),
    #[error("regex flag {0:?} given more than once")]
    DuplicateFlag(char),
    #[error(transparent)]
    Regex(#[from] regex::Error),
}

/// Invariant violations when building engine components.
#[derive(Debug, Error)]
pub enum SwiperError {
    #[error("highlight palette needs at least {min} buckets, got {got}")]
    PaletteTooSmall { min: usize, got: usize },
}
