//! Document view: the scrollable text pane with line numbers and the
//! search highlight overlay.
//!
//! # Navigation
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Cursor up one line (scrolls view if needed) |
//! | `↓` / `j` | Cursor down one line |
//! | `←` / `h`, `→` / `l` | Cursor left / right within the line |
//! | `PageUp` / `Ctrl+u` | Up one page |
//! | `PageDown` / `Ctrl+d` | Down one page |
//! | `g` / `G` | First / last line |
//!
//! # Scroll semantics
//!
//! `top_line` is the first visible line. The cursor (the active end of the
//! selection) is kept within the visible window by keyboard navigation;
//! programmatic moves through [`EditorView`] leave scrolling to the caller.

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::highlights::HighlightStore;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{
        Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};
use swiper_core::{Document, EditorView, Position, Selection, Viewport};

const PAGE_STEP: usize = 10;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct EditorState {
    selection: Selection,
    top_line: usize,
    line_count: usize,
    /// Cached from the last render so scrolling knows the page height.
    last_height: Cell<usize>,
}

impl EditorState {
    pub fn new(line_count: usize) -> Self {
        Self {
            selection: Selection::default(),
            top_line: 0,
            line_count: line_count.max(1),
            last_height: Cell::new(40),
        }
    }

    fn height(&self) -> usize {
        self.last_height.get().max(1)
    }

    pub fn cursor(&self) -> Position {
        self.selection.active
    }

    pub fn top_line(&self) -> usize {
        self.top_line
    }

    fn max_top(&self) -> usize {
        self.line_count.saturating_sub(1)
    }

    /// Collapse the selection to `at` and scroll just enough to show it.
    fn move_cursor(&mut self, at: Position) {
        self.selection = Selection::cursor(at);
        let height = self.height();
        if at.line < self.top_line {
            self.top_line = at.line;
        } else if at.line >= self.top_line + height {
            self.top_line = at.line + 1 - height;
        }
    }

    /// Handle a navigation event from the app shell.
    pub fn handle(&mut self, event: &AppEvent, document: &dyn Document) {
        let cursor = self.cursor();
        let last = self.line_count - 1;
        let line_len = |line: usize| document.line_text(line).chars().count();
        // Vertical moves keep the column where the target line allows it.
        let vertical = |line: usize| Position::new(line, cursor.column.min(line_len(line)));

        let target = match event {
            AppEvent::Nav(Direction::Up) => vertical(cursor.line.saturating_sub(1)),
            AppEvent::Nav(Direction::Down) => vertical((cursor.line + 1).min(last)),
            AppEvent::Nav(Direction::Left) => {
                Position::new(cursor.line, cursor.column.saturating_sub(1))
            }
            AppEvent::Nav(Direction::Right) => Position::new(
                cursor.line,
                (cursor.column + 1).min(line_len(cursor.line)),
            ),
            AppEvent::PageUp => vertical(cursor.line.saturating_sub(PAGE_STEP)),
            AppEvent::PageDown => vertical((cursor.line + PAGE_STEP).min(last)),
            AppEvent::Top => Position::new(0, 0),
            AppEvent::Bottom => Position::new(last, 0),
            _ => return,
        };
        self.move_cursor(target);
        tracing::debug!(
            line = target.line,
            column = target.column,
            top_line = self.top_line,
            "editor: cursor moved"
        );
    }
}

impl EditorView for EditorState {
    fn selection(&self) -> Selection {
        self.selection
    }

    fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    fn reveal_centered(&mut self, range: Selection) {
        let line = range.start().line;
        self.top_line = line.saturating_sub(self.height() / 2).min(self.max_top());
    }

    fn viewport(&self) -> Viewport {
        Viewport {
            top_line: self.top_line,
        }
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.top_line = viewport.top_line.min(self.max_top());
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct DocumentView<'a> {
    document: &'a dyn Document,
    state: &'a EditorState,
    highlights: &'a HighlightStore,
    title: &'a str,
    focused: bool,
    show_line_numbers: bool,
    theme: &'a Theme,
}

impl<'a> DocumentView<'a> {
    pub fn new(
        document: &'a dyn Document,
        state: &'a EditorState,
        highlights: &'a HighlightStore,
        theme: &'a Theme,
    ) -> Self {
        Self {
            document,
            state,
            highlights,
            title: "",
            focused: true,
            show_line_numbers: true,
            theme,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn show_line_numbers(mut self, show: bool) -> Self {
        self.show_line_numbers = show;
        self
    }

    fn render_line(&self, line: usize, gutter: usize) -> Line<'a> {
        let text = self.document.line_text(line);
        let selection = self.state.selection;
        let mut spans: Vec<Span<'static>> = Vec::new();

        if self.show_line_numbers {
            spans.push(Span::styled(
                format!("{:>gutter$} ", line + 1),
                self.theme.line_number,
            ));
        }

        // Group consecutive chars that share a style into one span.
        let mut run = String::new();
        let mut run_style: Option<Style> = None;
        for (column, ch) in text.chars().enumerate() {
            let style = self.char_style(line, column, selection);
            if run_style != Some(style) {
                if let Some(prev) = run_style {
                    spans.push(Span::styled(std::mem::take(&mut run), prev));
                }
                run_style = Some(style);
            }
            run.push(ch);
        }
        if let Some(style) = run_style {
            spans.push(Span::styled(run, style));
        }

        let mut rendered = Line::from(spans);
        if self.focused && line == self.state.cursor().line {
            rendered = rendered.patch_style(self.theme.cursor_line);
        }
        rendered
    }

    fn char_style(&self, line: usize, column: usize, selection: Selection) -> Style {
        let at = Position::new(line, column);
        if !selection.is_empty() && selection.start() <= at && at < selection.end() {
            return self.theme.selection;
        }
        match self.highlights.bucket_at(line, column) {
            Some(bucket) => self.theme.text.patch(self.theme.highlight(bucket)),
            None => self.theme.text,
        }
    }
}

impl Widget for DocumentView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered()
            .title(self.title)
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let height = inner.height as usize;
        // Cache for handle() and reveal_centered(); draw runs before either.
        self.state.last_height.set(height);

        let total = self.document.line_count();
        let start = self.state.top_line.min(total);
        let end = (start + height).min(total);
        let gutter = total.to_string().len();

        let lines: Vec<Line> = (start..end)
            .map(|line| self.render_line(line, gutter))
            .collect();

        // Text fills the inner area minus a 1-column scrollbar strip.
        let text_area = Rect {
            width: inner.width.saturating_sub(1),
            ..inner
        };
        let sb_area = Rect {
            x: inner.right().saturating_sub(1),
            width: 1,
            ..inner
        };

        Paragraph::new(lines).render(text_area, buf);

        if total > height {
            let mut sb_state = ScrollbarState::new(total)
                .position(start)
                .viewport_content_length(height);
            StatefulWidget::render(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(None)
                    .end_symbol(None),
                sb_area,
                buf,
                &mut sb_state,
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::TextDocument;
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, Terminal};
    use swiper_core::{HighlightRange, HighlightRenderer};

    fn doc(n: usize) -> TextDocument {
        let text: Vec<String> = (0..n).map(|i| format!("line {i}")).collect();
        TextDocument::from_text(&text.join("\n"))
    }

    fn state_with_height(lines: usize, height: usize) -> EditorState {
        let state = EditorState::new(lines);
        state.last_height.set(height);
        state
    }

    #[test]
    fn cursor_down_scrolls_past_the_bottom() {
        let document = doc(30);
        let mut state = state_with_height(30, 5);
        for _ in 0..5 {
            state.handle(&AppEvent::Nav(Direction::Down), &document);
        }
        assert_eq!(state.cursor(), Position::new(5, 0));
        assert_eq!(state.top_line(), 1);
    }

    #[test]
    fn cursor_up_clamps_at_the_top() {
        let document = doc(3);
        let mut state = state_with_height(3, 5);
        state.handle(&AppEvent::Nav(Direction::Up), &document);
        assert_eq!(state.cursor(), Position::new(0, 0));
    }

    #[test]
    fn horizontal_moves_stay_inside_the_line() {
        let document = TextDocument::from_text("ab");
        let mut state = state_with_height(1, 5);
        for _ in 0..4 {
            state.handle(&AppEvent::Nav(Direction::Right), &document);
        }
        assert_eq!(state.cursor(), Position::new(0, 2));
        state.handle(&AppEvent::Nav(Direction::Left), &document);
        assert_eq!(state.cursor(), Position::new(0, 1));
    }

    #[test]
    fn bottom_and_top_jump() {
        let document = doc(50);
        let mut state = state_with_height(50, 10);
        state.handle(&AppEvent::Bottom, &document);
        assert_eq!(state.cursor().line, 49);
        assert_eq!(state.top_line(), 40);
        state.handle(&AppEvent::Top, &document);
        assert_eq!(state.cursor().line, 0);
        assert_eq!(state.top_line(), 0);
    }

    #[test]
    fn reveal_centers_the_range() {
        let mut state = state_with_height(100, 10);
        state.reveal_centered(Selection::cursor(Position::new(40, 0)));
        assert_eq!(state.viewport(), Viewport { top_line: 35 });
        state.reveal_centered(Selection::cursor(Position::new(2, 0)));
        assert_eq!(state.viewport(), Viewport { top_line: 0 });
    }

    #[test]
    fn viewport_is_clamped_to_the_document() {
        let mut state = EditorState::new(5);
        state.set_viewport(Viewport { top_line: 99 });
        assert_eq!(state.viewport().top_line, 4);
    }

    #[test]
    fn renders_numbers_and_highlights() {
        let document = TextDocument::from_text("alpha\nbeta");
        let state = EditorState::new(2);
        let mut highlights = HighlightStore::default();
        highlights.set_highlights(
            0,
            &[HighlightRange {
                line: 1,
                start: 0,
                end: 2,
            }],
        );
        let theme = Theme::load_default();

        let mut terminal = Terminal::new(TestBackend::new(20, 4)).unwrap();
        terminal
            .draw(|frame| {
                frame.render_widget(
                    DocumentView::new(&document, &state, &highlights, &theme).title("t"),
                    frame.area(),
                )
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        let row = |y: u16| -> String {
            (0..20).map(|x| buffer[(x, y)].symbol().to_string()).collect()
        };
        assert!(row(1).contains("1 alpha"));
        assert!(row(2).contains("2 beta"));
        // "be" on line 2 carries the first highlight colour.
        assert_eq!(buffer[(3, 2)].symbol(), "b");
        assert_eq!(buffer[(3, 2)].fg, theme.highlight(0).fg.unwrap());
        assert_ne!(buffer[(5, 2)].fg, theme.highlight(0).fg.unwrap());
    }

    #[test]
    fn render_caches_the_page_height() {
        let document = doc(3);
        let state = EditorState::new(3);
        let highlights = HighlightStore::default();
        let theme = Theme::load_default();
        let mut terminal = Terminal::new(TestBackend::new(20, 8)).unwrap();
        terminal
            .draw(|frame| {
                frame.render_widget(
                    DocumentView::new(&document, &state, &highlights, &theme),
                    frame.area(),
                )
            })
            .unwrap();
        assert_eq!(state.height(), 6);
    }
}
