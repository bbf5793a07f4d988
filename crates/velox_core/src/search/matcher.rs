//! Token substring matcher over registered entries.
//!
//! # Invariants
//! - A query matches iff every lowercase whitespace token is a substring of
//!   the lowercase `"{title} {description}"`.
//! - Blank queries return no results.
//! - Titles are the removal key; duplicates are all removed together.

use crate::model::page::PageId;
use log::debug;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Page,
    Command,
    Action,
    Help,
}

impl EntryKind {
    /// Badge label shown next to each result.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Command => "command",
            Self::Action => "action",
            Self::Help => "help",
        }
    }
}

/// Error returned by a failing command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Failed(String),
    /// Command depends on a component the app was built without.
    Unavailable(&'static str),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Failed(message) => write!(f, "command failed: {message}"),
            Self::Unavailable(component) => write!(f, "command unavailable: {component}"),
        }
    }
}

impl Error for CommandError {}

/// Host-registered command body.
#[derive(Clone)]
pub struct CustomAction(Rc<dyn Fn() -> Result<(), CommandError>>);

impl CustomAction {
    pub fn new(action: impl Fn() -> Result<(), CommandError> + 'static) -> Self {
        Self(Rc::new(action))
    }

    pub fn run(&self) -> Result<(), CommandError> {
        (self.0)()
    }
}

impl Debug for CustomAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("CustomAction(..)")
    }
}

/// What executing an entry does. Built-ins are dispatched by the app
/// controller; `Custom` runs host code.
#[derive(Debug, Clone)]
pub enum CommandAction {
    Navigate(PageId),
    ToggleTheme,
    ToggleSidebar,
    MarkAllNotificationsRead,
    ExportData,
    ClearCache,
    CreateProject,
    AddTeamMember,
    ScheduleMeeting,
    UploadFile,
    CreateTask,
    ShowKeyboardShortcuts,
    ShowHelp,
    ShowWhatsNew,
    Custom(CustomAction),
}

#[derive(Debug, Clone)]
pub struct SearchEntry {
    pub kind: EntryKind,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub action: CommandAction,
}

impl SearchEntry {
    pub fn new(
        kind: EntryKind,
        title: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
        action: CommandAction,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            description: description.into(),
            icon: icon.into(),
            action,
        }
    }
}

#[derive(Debug, Clone)]
struct IndexedEntry {
    entry: SearchEntry,
    haystack: String,
}

impl IndexedEntry {
    fn new(entry: SearchEntry) -> Self {
        let haystack = format!("{} {}", entry.title, entry.description).to_lowercase();
        Self { entry, haystack }
    }

    fn matches(&self, tokens: &[String]) -> bool {
        tokens.iter().all(|token| self.haystack.contains(token.as_str()))
    }
}

#[derive(Debug, Clone)]
pub struct SearchIndex {
    entries: Vec<IndexedEntry>,
    limit: usize,
}

impl SearchIndex {
    /// An empty index returning at most `limit` results (minimum 1).
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit: limit.max(1),
        }
    }

    pub fn with_entries(limit: usize, entries: impl IntoIterator<Item = SearchEntry>) -> Self {
        let mut index = Self::new(limit);
        for entry in entries {
            index.add(entry);
        }
        index
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn add(&mut self, entry: SearchEntry) {
        self.entries.push(IndexedEntry::new(entry));
    }

    /// Removes every entry titled `title`; returns how many were removed.
    pub fn remove(&mut self, title: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|indexed| indexed.entry.title != title);
        before - self.entries.len()
    }

    pub fn entries(&self) -> impl Iterator<Item = &SearchEntry> {
        self.entries.iter().map(|indexed| &indexed.entry)
    }

    pub fn get(&self, title: &str) -> Option<&SearchEntry> {
        self.entries().find(|entry| entry.title == title)
    }

    /// The first `limit` entries, shown when the palette opens.
    pub fn initial_results(&self) -> Vec<&SearchEntry> {
        self.entries().take(self.limit).collect()
    }

    pub fn search(&self, query: &str) -> Vec<&SearchEntry> {
        let tokens = tokenize(query);
        if tokens.is_empty() {
            return Vec::new();
        }

        let hits = self
            .entries
            .iter()
            .filter(|indexed| indexed.matches(&tokens))
            .map(|indexed| &indexed.entry)
            .take(self.limit)
            .collect::<Vec<_>>();
        debug!(
            "event=search_query module=search status=ok tokens={} hits={}",
            tokens.len(),
            hits.len()
        );
        hits
    }
}

fn tokenize(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{tokenize, CommandAction, EntryKind, SearchEntry, SearchIndex};

    fn entry(title: &str, description: &str) -> SearchEntry {
        SearchEntry::new(
            EntryKind::Command,
            title,
            description,
            "fas fa-star",
            CommandAction::ShowHelp,
        )
    }

    #[test]
    fn tokenize_lowercases_and_drops_blank_runs() {
        assert_eq!(tokenize("  Dash   BOARD "), vec!["dash", "board"]);
        assert!(tokenize(" \t ").is_empty());
    }

    #[test]
    fn tokens_may_span_title_and_description() {
        let index = SearchIndex::with_entries(10, [entry("Upload File", "Upload a new file")]);
        assert_eq!(index.search("file new").len(), 1);
        assert!(index.search("file old").is_empty());
    }

    #[test]
    fn remove_drops_every_entry_with_title() {
        let mut index =
            SearchIndex::with_entries(10, [entry("A", "x"), entry("B", "y"), entry("A", "z")]);
        assert_eq!(index.remove("A"), 2);
        assert_eq!(index.remove("missing"), 0);
        assert_eq!(index.len(), 1);
    }
}
