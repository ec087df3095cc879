//! Interactive-search state machine.
//!
//! The host delivers picker events strictly one at a time; each maps to one
//! entry function on [`SearchController`]:
//!
//! | Event            | Entry function                    |
//! |------------------|-----------------------------------|
//! | open             | [`SearchController::open`]        |
//! | open at cursor   | [`SearchController::open_seeded`] |
//! | value changed    | [`SearchController::value_changed`] |
//! | active changed   | [`SearchController::active_changed`] |
//! | accepted         | [`SearchController::accept`]      |
//! | hidden           | [`SearchController::hidden`]      |
//!
//! ```text
//!   Idle ──open──► Searching { saved view, accepted } ──hidden──► Idle
//! ```
//!
//! Events that arrive in the wrong phase are ignored.

use crate::{
    highlight::{HighlightAssigner, HighlightRenderer},
    query::{is_searchable, parse_query},
    scanner::{scan, Document},
    session::{PickerItem, SearchSession},
    types::{MatchRecord, Position, Segment, Selection, Viewport},
};

// ---------------------------------------------------------------------------
// Collaborator traits
// ---------------------------------------------------------------------------

/// The interactive list the user types into.
///
/// Implementations report user actions back to the controller as events;
/// programmatic changes made through this trait must not echo back as
/// value-changed events.
pub trait Picker {
    fn value(&self) -> &str;
    fn set_value(&mut self, value: &str);
    fn items(&self) -> &[PickerItem];
    fn set_items(&mut self, items: Vec<PickerItem>);
    fn active_items(&self) -> &[PickerItem];
    /// Focus the listed items; items not present in the list are ignored.
    fn set_active_items(&mut self, items: &[PickerItem]);
    fn selected_items(&self) -> &[PickerItem];
    /// Replace the selection; items not present in the list are ignored.
    fn set_selected_items(&mut self, items: &[PickerItem]);
    /// Close the picker. The host follows up with a hidden event.
    fn hide(&mut self);
}

/// Cursor, selection and scroll position of the host editor.
pub trait EditorView {
    fn selection(&self) -> Selection;
    fn set_selection(&mut self, selection: Selection);
    /// Scroll so that `range` sits in the middle of the view.
    fn reveal_centered(&mut self, range: Selection);
    fn viewport(&self) -> Viewport;
    fn set_viewport(&mut self, viewport: Viewport);
}

/// Everything a handler may touch, borrowed for the duration of one event.
pub struct SearchHost<'a> {
    pub document: &'a dyn Document,
    pub picker: &'a mut dyn Picker,
    pub editor: &'a mut dyn EditorView,
    pub renderer: &'a mut dyn HighlightRenderer,
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// Editor state captured when the picker opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavedView {
    pub selection: Selection,
    pub viewport: Viewport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Searching { saved: SavedView, accepted: bool },
}

/// Owns the session memory and drives one interactive search at a time.
#[derive(Debug)]
pub struct SearchController {
    session: SearchSession,
    phase: SearchPhase,
    highlighter: HighlightAssigner,
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new(HighlightAssigner::default())
    }
}

impl SearchController {
    pub fn new(highlighter: HighlightAssigner) -> Self {
        Self {
            session: SearchSession::default(),
            phase: SearchPhase::Idle,
            highlighter,
        }
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn is_searching(&self) -> bool {
        matches!(self.phase, SearchPhase::Searching { .. })
    }

    /// Open the picker pre-filled with the last query and run that search.
    pub fn open(&mut self, host: &mut SearchHost<'_>) {
        if self.is_searching() {
            tracing::debug!("open ignored: search already active");
            return;
        }
        let saved = SavedView {
            selection: host.editor.selection(),
            viewport: host.editor.viewport(),
        };
        tracing::debug!(?saved, query = %self.session.last_query(), "search opened");
        self.phase = SearchPhase::Searching {
            saved,
            accepted: false,
        };

        let query = self.session.last_query().to_string();
        host.picker.set_items(Vec::new());
        host.picker.set_value(&query);
        self.value_changed(&query, host);
    }

    /// Forget the session and open with `seed` as the query.
    pub fn open_seeded(&mut self, seed: &str, host: &mut SearchHost<'_>) {
        if self.is_searching() {
            tracing::debug!("open ignored: search already active");
            return;
        }
        self.session = SearchSession::seeded(seed);
        self.open(host);
    }

    /// Re-run the search for `text` and rebuild the picker list.
    pub fn value_changed(&mut self, text: &str, host: &mut SearchHost<'_>) {
        if !self.is_searching() {
            tracing::debug!("value change ignored: no active search");
            return;
        }
        if !is_searchable(text) {
            host.picker.set_items(Vec::new());
            host.picker.set_selected_items(&[]);
            self.highlighter.clear(&mut *host.renderer);
            return;
        }

        let predicates = parse_query(text);
        tracing::debug!(query = %text, ?predicates, "query parsed");
        let records = scan(host.document, &predicates);

        let items = records
            .iter()
            .map(|r| PickerItem::new(r.clone(), &host.document.line_text(r.line), text))
            .collect();
        host.picker.set_items(items);

        match self.session.reselect(text, host.picker.items()).cloned() {
            Some(item) => {
                tracing::debug!(line = item.line(), "restoring previous selection");
                let item = std::slice::from_ref(&item);
                host.picker.set_active_items(item);
                host.picker.set_selected_items(item);
            }
            None => host.picker.set_selected_items(&[]),
        }

        self.highlighter.apply(&mut *host.renderer, &records);
    }

    /// Preview the focused item without closing the picker.
    pub fn active_changed(&mut self, items: &[PickerItem], host: &mut SearchHost<'_>) {
        if !self.is_searching() {
            return;
        }
        let Some(focused) = items.first() else {
            return;
        };
        let at = Selection::cursor(Position::new(focused.line(), 0));
        host.editor.reveal_centered(at);
        host.editor.set_selection(at);
    }

    /// Commit the selected item, close the picker and jump to the match.
    pub fn accept(&mut self, host: &mut SearchHost<'_>) {
        let SearchPhase::Searching { saved, .. } = self.phase else {
            return;
        };
        let Some(selected) = host.picker.selected_items().first().cloned() else {
            tracing::debug!("accept ignored: nothing selected");
            return;
        };
        tracing::debug!(line = selected.line(), "match accepted");

        self.session
            .remember(host.picker.value().to_string(), selected.clone());
        self.phase = SearchPhase::Searching {
            saved,
            accepted: true,
        };
        host.picker.hide();

        let target = jump_target(&selected.record);
        host.editor.set_selection(target);
        host.editor.reveal_centered(target);
    }

    /// Tear down after the picker closed, restoring the editor when the
    /// search was cancelled.
    pub fn hidden(&mut self, host: &mut SearchHost<'_>) {
        let SearchPhase::Searching { saved, accepted } = self.phase else {
            return;
        };
        self.highlighter.clear(&mut *host.renderer);
        if !accepted {
            tracing::debug!(?saved, "search cancelled, restoring view");
            host.editor.set_selection(saved.selection);
            host.editor.set_viewport(saved.viewport);
        }
        self.phase = SearchPhase::Idle;
    }
}

/// Selection for a jump to `record`: its last recorded segment, or an empty
/// selection at column 0 when it has none.
pub fn jump_target(record: &MatchRecord) -> Selection {
    let segment = record
        .segments
        .last()
        .copied()
        .unwrap_or(Segment::new(0, 0));
    Selection::new(
        Position::new(record.line, segment.start),
        Position::new(record.line, segment.end()),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
