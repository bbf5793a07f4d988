//! Command palette state machine.
//!
//! # Invariants
//! - Selection is `None` (nothing selected) or a valid index into `results`.
//! - Every query change resets the selection to `None`.
//! - Opening and closing both clear the query, results and selection.

use super::matcher::{SearchEntry, SearchIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteKey {
    ArrowUp,
    ArrowDown,
    Enter,
    Escape,
}

#[derive(Debug, Clone)]
pub enum PaletteOutcome {
    /// Selection moved or the key did nothing visible.
    Handled,
    /// Caller executes this entry, then the palette is already closed.
    Execute(SearchEntry),
    Closed,
    /// Palette is closed; the key belongs to someone else.
    Ignored,
}

#[derive(Debug, Default)]
pub struct CommandPalette {
    open: bool,
    query: String,
    results: Vec<SearchEntry>,
    selected: Option<usize>,
}

impl CommandPalette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SearchEntry] {
        &self.results
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&SearchEntry> {
        self.selected.and_then(|index| self.results.get(index))
    }

    /// Opens with an empty query, the first page of entries and nothing
    /// selected, even when already open.
    pub fn open(&mut self, index: &SearchIndex) {
        self.open = true;
        self.query.clear();
        self.results = index.initial_results().into_iter().cloned().collect();
        self.selected = None;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.query.clear();
        self.results.clear();
        self.selected = None;
    }

    /// Returns the new open state.
    pub fn toggle(&mut self, index: &SearchIndex) -> bool {
        if self.open {
            self.close();
        } else {
            self.open(index);
        }
        self.open
    }

    /// Records the typed query without searching; see [`Self::apply_query`].
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.selected = None;
    }

    /// Runs the current query. An empty query shows the initial entries.
    pub fn apply_query(&mut self, index: &SearchIndex) {
        let hits = if self.query.trim().is_empty() {
            index.initial_results()
        } else {
            index.search(&self.query)
        };
        self.results = hits.into_iter().cloned().collect();
        self.selected = None;
    }

    pub fn move_down(&mut self) {
        let Some(last) = self.results.len().checked_sub(1) else {
            self.selected = None;
            return;
        };
        self.selected = Some(self.selected.map_or(0, |index| (index + 1).min(last)));
    }

    pub fn move_up(&mut self) {
        self.selected = match self.selected {
            None | Some(0) => None,
            Some(index) => Some(index - 1),
        };
    }

    /// Pointer hover selects the hovered row.
    pub fn hover(&mut self, index: usize) {
        if index < self.results.len() {
            self.selected = Some(index);
        }
    }

    /// Takes the entry at `index` for execution and closes the palette.
    pub fn choose(&mut self, index: usize) -> Option<SearchEntry> {
        let entry = self.results.get(index).cloned()?;
        self.close();
        Some(entry)
    }

    pub fn handle_key(&mut self, key: PaletteKey) -> PaletteOutcome {
        if !self.open {
            return PaletteOutcome::Ignored;
        }
        match key {
            PaletteKey::ArrowDown => {
                self.move_down();
                PaletteOutcome::Handled
            }
            PaletteKey::ArrowUp => {
                self.move_up();
                PaletteOutcome::Handled
            }
            PaletteKey::Enter => match self.selected.and_then(|index| self.choose(index)) {
                Some(entry) => PaletteOutcome::Execute(entry),
                None => PaletteOutcome::Handled,
            },
            PaletteKey::Escape => {
                self.close();
                PaletteOutcome::Closed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CommandPalette, PaletteKey, PaletteOutcome};
    use crate::search::{default_entries, SearchIndex};

    fn index() -> SearchIndex {
        SearchIndex::with_entries(10, default_entries())
    }

    #[test]
    fn open_shows_first_page_unselected() {
        let index = index();
        let mut palette = CommandPalette::new();
        palette.open(&index);
        assert!(palette.is_open());
        assert_eq!(palette.results().len(), 10);
        assert_eq!(palette.selected(), None);
    }

    #[test]
    fn reopening_drops_stale_query() {
        let index = index();
        let mut palette = CommandPalette::new();
        palette.open(&index);
        palette.set_query("toggle");
        palette.apply_query(&index);
        palette.handle_key(PaletteKey::ArrowDown);

        palette.open(&index);
        assert_eq!(palette.query(), "");
        assert_eq!(palette.results().len(), 10);
        assert_eq!(palette.selected(), None);
    }

    #[test]
    fn selection_clamps_at_both_ends() {
        let index = index();
        let mut palette = CommandPalette::new();
        palette.open(&index);
        palette.set_query("toggle");
        palette.apply_query(&index);
        assert_eq!(palette.results().len(), 2);

        palette.handle_key(PaletteKey::ArrowUp);
        assert_eq!(palette.selected(), None);
        for _ in 0..5 {
            palette.handle_key(PaletteKey::ArrowDown);
        }
        assert_eq!(palette.selected(), Some(1));
        palette.handle_key(PaletteKey::ArrowUp);
        palette.handle_key(PaletteKey::ArrowUp);
        assert_eq!(palette.selected(), None);
    }

    #[test]
    fn enter_without_selection_does_nothing() {
        let index = index();
        let mut palette = CommandPalette::new();
        palette.open(&index);
        assert!(matches!(palette.handle_key(PaletteKey::Enter), PaletteOutcome::Handled));
        assert!(palette.is_open());
    }

    #[test]
    fn enter_executes_selection_and_closes() {
        let index = index();
        let mut palette = CommandPalette::new();
        palette.open(&index);
        palette.handle_key(PaletteKey::ArrowDown);
        let outcome = palette.handle_key(PaletteKey::Enter);
        assert!(matches!(outcome, PaletteOutcome::Execute(entry) if entry.title == "Dashboard"));
        assert!(!palette.is_open());
        assert_eq!(palette.query(), "");
    }

    #[test]
    fn query_change_resets_selection() {
        let index = index();
        let mut palette = CommandPalette::new();
        palette.open(&index);
        palette.move_down();
        palette.set_query("task");
        assert_eq!(palette.selected(), None);
    }

    #[test]
    fn keys_are_ignored_while_closed() {
        let mut palette = CommandPalette::new();
        assert!(matches!(palette.handle_key(PaletteKey::Escape), PaletteOutcome::Ignored));
    }
}
