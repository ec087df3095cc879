//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic.
//!
//! The search controller never sees crossterm or widget types. Each picker
//! action is queued by [`PickerState`] and delivered to the controller
//! through a [`SearchHost`] borrowed from the app state for one call.

use crate::{
    document::TextDocument,
    event::{self, AppEvent, Keymap},
    highlights::HighlightStore,
    theme::Theme,
    widgets::{
        document_view::{DocumentView, EditorState},
        picker::{PickerEvent, PickerState, PickerView},
    },
};
use crossterm::{
    event::{self as ct_event, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    text::Line,
    widgets::{Paragraph, Widget},
    Frame, Terminal,
};
use std::{io, time::Duration};
use swiper_core::{
    config::Config, word, HighlightAssigner, Picker, SearchController, SearchHost,
};

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub document: TextDocument,
    pub editor: EditorState,
    pub highlights: HighlightStore,
    pub picker: PickerState,
    pub controller: SearchController,
    pub theme: Theme,
    pub config: Config,
    pub keymap: Keymap,
    pub quit: bool,
}

/// Lend the controller the collaborators it drives for one call.
fn with_host<T>(
    s: &mut AppState,
    f: impl FnOnce(&mut SearchController, &mut SearchHost<'_>) -> T,
) -> T {
    let AppState {
        document,
        editor,
        highlights,
        picker,
        controller,
        ..
    } = s;
    let mut host = SearchHost {
        document: &*document,
        picker,
        editor,
        renderer: highlights,
    };
    f(controller, &mut host)
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    pub fn new(document: TextDocument, config: Config, theme: Theme) -> anyhow::Result<Self> {
        let highlighter = HighlightAssigner::new(theme.palette_len())?;
        let keymap = Keymap::from_config(&config.keybindings);
        let editor = EditorState::new(document.lines().len());

        let state = AppState {
            document,
            editor,
            highlights: HighlightStore::default(),
            picker: PickerState::default(),
            controller: SearchController::new(highlighter),
            theme,
            config,
            keymap,
            quit: false,
        };
        Ok(App { state })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    ///
    /// With `seed`, the search opens immediately with that query.
    pub fn run(mut self, seed: Option<&str>) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        if let Some(seed) = seed {
            self.open_seeded(seed);
        }
        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                self.dispatch(ct_event::read()?);
            }
        }
        Ok(())
    }

    /// Route one raw terminal event. Only key presses count; release and
    /// repeat reports would otherwise replay the key in normal mode.
    pub fn dispatch(&mut self, raw: Event) {
        let app_event = match raw {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                // Picker mode forwards printable keys as text
                if self.state.picker.is_visible() {
                    event::to_app_event_picker(Event::Key(key))
                } else {
                    event::to_app_event(Event::Key(key), &self.state.keymap)
                }
            }
            Event::Key(_) => None,
            other => event::to_app_event(other, &self.state.keymap),
        };
        if let Some(ev) = app_event {
            tracing::debug!(
                picker = self.state.picker.is_visible(),
                event = ?ev,
                "terminal event"
            );
            self.handle(ev);
        }
    }

    pub fn handle(&mut self, event: AppEvent) {
        let s = &mut self.state;

        match event {
            AppEvent::Quit => {
                tracing::debug!("quit");
                s.quit = true;
            }

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            // The picker owns the keyboard while it is open.
            other if s.picker.is_visible() => {
                s.picker.handle(&other);
                self.drain_picker_events();
            }

            AppEvent::OpenSearch => self.open(),
            AppEvent::OpenSearchWord => {
                let seed = word::seed_from_editor(&s.editor, &s.document);
                tracing::debug!(seed = %seed, "search seeded from cursor");
                self.open_seeded(&seed);
            }

            other => s.editor.handle(&other, &s.document),
        }
    }

    /// Open the search with the remembered query.
    pub fn open(&mut self) {
        if self.state.controller.is_searching() {
            return;
        }
        self.state.picker.show();
        with_host(&mut self.state, |ctl, host| ctl.open(host));
        self.drain_picker_events();
    }

    /// Open the search with `seed` as a fresh query.
    pub fn open_seeded(&mut self, seed: &str) {
        if self.state.controller.is_searching() {
            return;
        }
        self.state.picker.show();
        with_host(&mut self.state, |ctl, host| ctl.open_seeded(seed, host));
        self.drain_picker_events();
    }

    /// Deliver queued picker events to the controller, oldest first. Handlers
    /// may queue more events (hiding on accept), which are delivered in turn.
    fn drain_picker_events(&mut self) {
        while let Some(event) = self.state.picker.take_event() {
            tracing::debug!(?event, "picker event");
            with_host(&mut self.state, |ctl, host| match event {
                PickerEvent::ValueChanged(text) => ctl.value_changed(&text, host),
                PickerEvent::ActiveChanged(items) => ctl.active_changed(&items, host),
                PickerEvent::Accepted => ctl.accept(host),
                PickerEvent::Hidden => ctl.hidden(host),
            });
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: body | 1-line status bar
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(1)])
        .split(area);

    let title = state.document.display_name();
    frame.render_widget(
        DocumentView::new(&state.document, &state.editor, &state.highlights, &state.theme)
            .title(&title)
            .focused(!state.picker.is_visible())
            .show_line_numbers(state.config.ui.show_line_numbers),
        vert[0],
    );
    frame.render_widget(StatusBar { state }, vert[1]);

    if state.picker.is_visible() {
        let picker_area = picker_area(vert[0]);
        let view = PickerView::new(&state.picker, &state.theme);
        let (cx, cy) = view.cursor_position(picker_area);
        frame.render_widget(view, picker_area);
        frame.set_cursor_position((cx, cy));
    }
}

/// Upper-centre overlay, at most 80 columns wide and 12 rows tall.
fn picker_area(body: Rect) -> Rect {
    let width = body.width.saturating_sub(4).min(80);
    let height = body.height.saturating_sub(2).min(12);
    Rect {
        x: body.x + (body.width - width) / 2,
        y: body.y + 1u16.min(body.height),
        width,
        height,
    }
}

struct StatusBar<'a> {
    state: &'a AppState,
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let s = self.state;
        let cursor = s.editor.cursor();
        let mut text = format!(
            " {}  Ln {}/{}, Col {}",
            s.document.display_name(),
            cursor.line + 1,
            s.document.lines().len(),
            cursor.column + 1
        );
        if s.picker.is_visible() {
            text.push_str(&format!("  {} matches", s.picker.items().len()));
        }
        Paragraph::new(Line::from(text))
            .style(s.theme.status_bar)
            .render(area, buf);
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
