//! Session memory: the last query and the last accepted item.
//!
//! Every search rebuilds the picker items from scratch, so a remembered item
//! is found again by value ([`SelectionKey`]), never by reference.

use crate::{query::PROMPT_SENTINEL, types::MatchRecord};

/// One row of the interactive picker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PickerItem {
    /// `"<line>: <text>"`.
    pub label: String,
    /// The query text that produced this item.
    pub description: String,
    pub record: MatchRecord,
}

impl PickerItem {
    pub fn new(record: MatchRecord, line_text: &str, query: &str) -> Self {
        Self {
            label: format!("{}: {}", record.line, line_text),
            description: query.to_string(),
            record,
        }
    }

    pub fn line(&self) -> usize {
        self.record.line
    }

    pub fn key(&self) -> SelectionKey {
        SelectionKey {
            line: self.record.line,
            description: self.description.clone(),
            label: self.label.clone(),
        }
    }
}

/// Value identity of a [`PickerItem`] across searches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectionKey {
    pub line: usize,
    pub description: String,
    pub label: String,
}

/// What the interactive search remembers between invocations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSession {
    last_query: String,
    last_selected: Option<PickerItem>,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::seeded(PROMPT_SENTINEL)
    }
}

impl SearchSession {
    /// A fresh session whose next search starts from `query` with no
    /// remembered selection.
    pub fn seeded(query: impl Into<String>) -> Self {
        Self {
            last_query: query.into(),
            last_selected: None,
        }
    }

    pub fn last_query(&self) -> &str {
        &self.last_query
    }

    pub fn last_selected(&self) -> Option<&PickerItem> {
        self.last_selected.as_ref()
    }

    /// Record an accepted item together with the query that found it.
    pub fn remember(&mut self, query: impl Into<String>, item: PickerItem) {
        self.last_query = query.into();
        self.last_selected = Some(item);
    }

    /// The item in `items` equal to the remembered selection, provided `query`
    /// is the remembered query.
    pub fn reselect<'a>(&self, query: &str, items: &'a [PickerItem]) -> Option<&'a PickerItem> {
        if query != self.last_query {
            return None;
        }
        let key = self.last_selected.as_ref()?.key();
        items.iter().find(|item| item.key() == key)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
