//! swiper-core: query engine and session state for swiper.
//!
//! This crate holds everything with algorithmic content: the query parser,
//! the per-line matcher, the document scanner, the highlight bucket
//! assignment and the interactive-search state machine. The text buffer,
//! overlay rendering, picker widget and cursor/viewport are collaborators
//! expressed as traits, so any host (the bundled terminal viewer, a test
//! fake, an editor plugin) can drive the engine.
//!
//! # Pipeline
//!
//! ```text
//! query text ──► parse_query ──► scan (LineMatcher per line) ──► MatchRecords
//!                                                              │
//!                                 HighlightAssigner ◄──────────┤
//!                                 picker items      ◄──────────┘
//! ```
//!
//! Everything runs synchronously inside the handler for one event.

pub mod config;
pub mod controller;
pub mod error;
pub mod highlight;
pub mod matcher;
pub mod pattern;
pub mod query;
pub mod scanner;
pub mod session;
pub mod types;
pub mod word;

pub use controller::{jump_target, EditorView, Picker, SavedView, SearchController, SearchHost, SearchPhase};
pub use error::{PatternError, SwiperError};
pub use highlight::{assign_buckets, HighlightAssigner, HighlightRange, HighlightRenderer};
pub use matcher::{match_line, LineMatcher};
pub use query::{is_searchable, parse_query, MIN_QUERY_LEN, PROMPT_SENTINEL};
pub use scanner::{scan, Document};
pub use session::{PickerItem, SearchSession, SelectionKey};
pub use types::{MatchRecord, Position, Segment, Selection, TermPredicate, Viewport};
