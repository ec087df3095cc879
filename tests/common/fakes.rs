//! In-memory collaborators for driving [`SearchController`] without a
//! terminal. Each fake records what the controller did to it.

use std::{borrow::Cow, cell::Cell};

use super::builders::lines_of;
use swiper_core::{
    Document, EditorView, HighlightRange, HighlightRenderer, Picker, PickerItem,
    SearchController, SearchHost, Selection, Viewport,
};

// ---------------------------------------------------------------------------
// CountingDocument
// ---------------------------------------------------------------------------

/// Lines in memory plus a count of every `line_count`/`line_text` call, so a
/// test can tell a skipped scan from one that found nothing.
#[derive(Debug, Default)]
pub struct CountingDocument {
    pub lines: Vec<String>,
    reads: Cell<usize>,
}

impl CountingDocument {
    pub fn new(lines: Vec<String>) -> Self {
        Self {
            lines,
            reads: Cell::new(0),
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.get()
    }

    pub fn reset_reads(&self) {
        self.reads.set(0);
    }
}

impl Document for CountingDocument {
    fn line_count(&self) -> usize {
        self.reads.set(self.reads.get() + 1);
        self.lines.len()
    }

    fn line_text(&self, line: usize) -> Cow<'_, str> {
        self.reads.set(self.reads.get() + 1);
        self.lines.line_text(line)
    }
}

// ---------------------------------------------------------------------------
// FakePicker
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct FakePicker {
    pub value: String,
    pub items: Vec<PickerItem>,
    pub active: Vec<PickerItem>,
    pub selected: Vec<PickerItem>,
    pub hidden: usize,
}

impl Picker for FakePicker {
    fn value(&self) -> &str {
        &self.value
    }

    fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
    }

    fn items(&self) -> &[PickerItem] {
        &self.items
    }

    fn set_items(&mut self, items: Vec<PickerItem>) {
        self.items = items;
        self.active.clear();
    }

    fn active_items(&self) -> &[PickerItem] {
        &self.active
    }

    fn set_active_items(&mut self, items: &[PickerItem]) {
        self.active = items.to_vec();
    }

    fn selected_items(&self) -> &[PickerItem] {
        &self.selected
    }

    fn set_selected_items(&mut self, items: &[PickerItem]) {
        self.selected = items.to_vec();
    }

    fn hide(&mut self) {
        self.hidden += 1;
    }
}

// ---------------------------------------------------------------------------
// FakeEditor
// ---------------------------------------------------------------------------

/// Editor with a fixed 10-line window; `reveal_centered` puts the range on
/// the fifth visible row.
#[derive(Debug, Default)]
pub struct FakeEditor {
    pub selection: Selection,
    pub viewport: Viewport,
    pub reveals: Vec<Selection>,
}

impl EditorView for FakeEditor {
    fn selection(&self) -> Selection {
        self.selection
    }

    fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    fn reveal_centered(&mut self, range: Selection) {
        self.reveals.push(range);
        self.viewport.top_line = range.start().line.saturating_sub(5);
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }
}

// ---------------------------------------------------------------------------
// FakeRenderer
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct FakeRenderer {
    pub buckets: Vec<Vec<HighlightRange>>,
    pub clears: usize,
}

impl FakeRenderer {
    pub fn is_clear(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }
}

impl HighlightRenderer for FakeRenderer {
    fn set_highlights(&mut self, bucket: usize, ranges: &[HighlightRange]) {
        if self.buckets.len() <= bucket {
            self.buckets.resize_with(bucket + 1, Vec::new);
        }
        self.buckets[bucket] = ranges.to_vec();
    }

    fn clear_all_highlights(&mut self) {
        self.clears += 1;
        self.buckets.clear();
    }
}

// ---------------------------------------------------------------------------
// Rig
// ---------------------------------------------------------------------------

/// A document plus fakes, wired to one controller.
pub struct Rig {
    pub document: CountingDocument,
    pub picker: FakePicker,
    pub editor: FakeEditor,
    pub renderer: FakeRenderer,
    pub controller: SearchController,
}

impl Rig {
    pub fn new(lines: &[&str]) -> Self {
        Self::from_lines(lines_of(lines))
    }

    pub fn from_lines(lines: Vec<String>) -> Self {
        Self {
            document: CountingDocument::new(lines),
            picker: FakePicker::default(),
            editor: FakeEditor::default(),
            renderer: FakeRenderer::default(),
            controller: SearchController::default(),
        }
    }

    pub fn with<T>(
        &mut self,
        f: impl FnOnce(&mut SearchController, &mut SearchHost<'_>) -> T,
    ) -> T {
        let mut host = SearchHost {
            document: &self.document,
            picker: &mut self.picker,
            editor: &mut self.editor,
            renderer: &mut self.renderer,
        };
        f(&mut self.controller, &mut host)
    }

    pub fn open(&mut self) {
        self.with(|ctl, host| ctl.open(host));
    }

    pub fn open_seeded(&mut self, seed: &str) {
        self.with(|ctl, host| ctl.open_seeded(seed, host));
    }

    /// Type `text` into the picker and notify the controller.
    pub fn type_query(&mut self, text: &str) {
        self.picker.value = text.to_string();
        self.with(|ctl, host| ctl.value_changed(text, host));
    }

    /// Focus the item for `line` and notify the controller.
    pub fn focus_line(&mut self, line: usize) {
        let item = self.item_at(line);
        self.picker.active = vec![item.clone()];
        self.with(|ctl, host| ctl.active_changed(&[item], host));
    }

    /// Select the item for `line` and accept; the picker then reports hidden.
    pub fn accept_line(&mut self, line: usize) {
        let item = self.item_at(line);
        self.picker.set_selected_items(&[item]);
        self.with(|ctl, host| ctl.accept(host));
        self.hide();
    }

    pub fn hide(&mut self) {
        self.with(|ctl, host| ctl.hidden(host));
    }

    pub fn item_at(&self, line: usize) -> PickerItem {
        self.picker
            .items
            .iter()
            .find(|i| i.line() == line)
            .cloned()
            .unwrap_or_else(|| panic!("no picker item for line {line}"))
    }

    pub fn item_lines(&self) -> Vec<usize> {
        self.picker.items.iter().map(PickerItem::line).collect()
    }
}
