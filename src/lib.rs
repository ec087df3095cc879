//! swiper: incremental multi-term search for navigating a single document.
//!
//! The engine lives in `swiper-core` and the terminal viewer in `swiper-tui`;
//! this crate wires them into the `swiper` binary and adds headless mode.

pub mod headless;
