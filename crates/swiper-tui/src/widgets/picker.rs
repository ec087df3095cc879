//! Search picker: query input plus the live list of matching lines.
//!
//! # Editing
//!
//! - `Char(c)` inserts at the cursor. While the input still shows the
//!   placeholder prompt, the first character replaces it.
//! - `Backspace` deletes the character before the cursor.
//! - `Nav(Left)` / `Nav(Right)` move the text cursor.
//! - `Nav(Up)` / `Nav(Down)` / `PageUp` / `PageDown` move the active item.
//! - `Enter` selects the active item and accepts; `Escape` hides.
//!
//! # Events
//!
//! User actions are queued as [`PickerEvent`]s and drained by the app shell,
//! one at a time, into the search controller. Programmatic changes through
//! the [`Picker`] trait queue only what the host editor would report: focus
//! changes and hiding, never value changes.

use std::collections::VecDeque;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};
use swiper_core::{Picker, PickerItem, PROMPT_SENTINEL};

const PAGE_STEP: usize = 10;

/// Something the user did in the picker, for the controller to react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEvent {
    ValueChanged(String),
    ActiveChanged(Vec<PickerItem>),
    Accepted,
    Hidden,
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct PickerState {
    value: String,
    /// Byte offset of the cursor within `value`.
    cursor: usize,
    items: Vec<PickerItem>,
    active: Option<usize>,
    selected: Vec<PickerItem>,
    visible: bool,
    events: VecDeque<PickerEvent>,
}

impl PickerState {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Make the picker visible with an empty selection.
    pub fn show(&mut self) {
        self.visible = true;
        self.selected.clear();
        self.events.clear();
    }

    /// Next queued event, oldest first.
    pub fn take_event(&mut self) -> Option<PickerEvent> {
        self.events.pop_front()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn shows_prompt(&self) -> bool {
        self.value == PROMPT_SENTINEL
    }

    /// Handle a key event from the app shell.
    pub fn handle(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Char(c) => {
                if self.shows_prompt() {
                    self.value.clear();
                    self.cursor = 0;
                }
                self.value.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                tracing::debug!(value = %self.value, cursor = self.cursor, "picker: char inserted");
                self.value_changed();
            }
            AppEvent::Backspace => {
                if self.cursor > 0 {
                    // Walk back one char boundary
                    let prev = self.value[..self.cursor]
                        .char_indices()
                        .last()
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                    self.value.remove(prev);
                    self.cursor = prev;
                    tracing::debug!(value = %self.value, cursor = self.cursor, "picker: backspace");
                    self.value_changed();
                }
            }
            AppEvent::Nav(Direction::Left) => {
                if self.cursor > 0 {
                    self.cursor = self.value[..self.cursor]
                        .char_indices()
                        .last()
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                }
            }
            AppEvent::Nav(Direction::Right) => {
                if self.cursor < self.value.len() {
                    self.cursor = self.value[self.cursor..]
                        .char_indices()
                        .nth(1)
                        .map(|(i, _)| self.cursor + i)
                        .unwrap_or(self.value.len());
                }
            }
            AppEvent::Nav(Direction::Up) => self.move_active(-1),
            AppEvent::Nav(Direction::Down) => self.move_active(1),
            AppEvent::PageUp => self.move_active(-(PAGE_STEP as isize)),
            AppEvent::PageDown => self.move_active(PAGE_STEP as isize),
            AppEvent::Enter => {
                self.selected = self.active_items().to_vec();
                tracing::debug!(selected = self.selected.len(), "picker: accept");
                self.events.push_back(PickerEvent::Accepted);
            }
            AppEvent::Escape => self.hide(),
            _ => {}
        }
    }

    fn value_changed(&mut self) {
        self.events
            .push_back(PickerEvent::ValueChanged(self.value.clone()));
    }

    fn move_active(&mut self, delta: isize) {
        if self.items.is_empty() {
            return;
        }
        let last = self.items.len() - 1;
        let next = match self.active {
            Some(i) => i.saturating_add_signed(delta).min(last),
            None => 0,
        };
        if self.active != Some(next) {
            self.set_active(next);
        }
    }

    fn set_active(&mut self, index: usize) {
        self.active = Some(index);
        tracing::debug!(active = index, "picker: active changed");
        self.events
            .push_back(PickerEvent::ActiveChanged(self.active_items().to_vec()));
    }
}

impl Picker for PickerState {
    fn value(&self) -> &str {
        &self.value
    }

    fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = self.value.len();
    }

    fn items(&self) -> &[PickerItem] {
        &self.items
    }

    /// Replace the list; the first item becomes active.
    fn set_items(&mut self, items: Vec<PickerItem>) {
        self.items = items;
        self.active = None;
        if !self.items.is_empty() {
            self.set_active(0);
        }
    }

    fn active_items(&self) -> &[PickerItem] {
        match self.active {
            Some(i) => &self.items[i..=i],
            None => &[],
        }
    }

    fn set_active_items(&mut self, items: &[PickerItem]) {
        let index = items
            .first()
            .and_then(|wanted| self.items.iter().position(|item| item == wanted));
        if let Some(index) = index {
            self.set_active(index);
        }
    }

    fn selected_items(&self) -> &[PickerItem] {
        &self.selected
    }

    fn set_selected_items(&mut self, items: &[PickerItem]) {
        self.selected = items
            .iter()
            .filter(|wanted| self.items.contains(*wanted))
            .cloned()
            .collect();
    }

    fn hide(&mut self) {
        if self.visible {
            self.visible = false;
            self.events.push_back(PickerEvent::Hidden);
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct PickerView<'a> {
    state: &'a PickerState,
    theme: &'a Theme,
}

impl<'a> PickerView<'a> {
    pub fn new(state: &'a PickerState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    /// Absolute terminal position of the text cursor within this widget's
    /// rendered area. Pass to `frame.set_cursor_position()` after rendering.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        // The block adds 1-cell borders; text starts at (area.x+1, area.y+1).
        let col = if self.state.shows_prompt() {
            0
        } else {
            self.state.value[..self.state.cursor].chars().count() as u16
        };
        let x = (area.x + 1 + col).min(area.right().saturating_sub(2));
        (x, area.y + 1)
    }
}

impl Widget for PickerView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let count = self.state.items.len();
        let title = match self.state.active {
            Some(i) => format!("Search {}/{}", i + 1, count),
            None => format!("Search 0/{count}"),
        };
        let block = Block::bordered()
            .title(title)
            .border_style(self.theme.border_focused);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 {
            return;
        }

        let query_line = if self.state.shows_prompt() {
            Line::from(Span::styled(self.state.value.as_str(), self.theme.prompt))
        } else {
            Line::from(self.state.value.as_str())
        };
        Paragraph::new(query_line).render(Rect { height: 1, ..inner }, buf);

        // Item list below the query line, scrolled to keep the active row in view.
        let list_height = inner.height.saturating_sub(1) as usize;
        if list_height == 0 {
            return;
        }
        let active = self.state.active.unwrap_or(0);
        let offset = active.saturating_sub(list_height - 1);
        let lines: Vec<Line> = self
            .state
            .items
            .iter()
            .enumerate()
            .skip(offset)
            .take(list_height)
            .map(|(i, item)| {
                if Some(i) == self.state.active {
                    Line::from(Span::styled(item.label.as_str(), self.theme.active_item))
                } else {
                    Line::from(vec![
                        Span::raw(item.label.as_str()),
                        Span::raw("  "),
                        Span::styled(item.description.as_str(), self.theme.description),
                    ])
                }
            })
            .collect();
        let list_area = Rect {
            y: inner.y + 1,
            height: list_height as u16,
            ..inner
        };
        Paragraph::new(lines).render(list_area, buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
