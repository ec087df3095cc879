//! Ratatui widgets for the swiper TUI.

pub mod document_view;
pub mod picker;
