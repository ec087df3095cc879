//! Shared test utilities for swiper integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file.

pub mod assertions;
pub mod builders;
pub mod fakes;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fakes::*;
pub use fixtures::*;
