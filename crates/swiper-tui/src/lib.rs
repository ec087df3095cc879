//! swiper TUI: ratatui application shell hosting the interactive search.

pub mod app;
pub mod document;
pub mod event;
pub mod highlights;
pub mod theme;
pub mod widgets;

use std::path::Path;

pub use app::App;
pub use document::TextDocument;

/// Open `path` in the viewer. With `seed`, the search starts open on that query.
pub fn run(path: &Path, config: swiper_core::config::Config, seed: Option<&str>) -> anyhow::Result<()> {
    let document = TextDocument::open(path)?;
    let theme = theme::Theme::by_name(&config.ui.theme);
    App::new(document, config, theme)?.run(seed)
}
