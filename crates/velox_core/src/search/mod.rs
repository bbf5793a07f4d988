//! Search index, command catalog and command palette state.
//!
//! # Responsibility
//! - Match queries against registered entries (`matcher`).
//! - Register the built-in pages, commands, actions and help entries (`catalog`).
//! - Track palette open state, query, results and selection (`palette`).
//! - Split titles into highlighted spans for rendering (`highlight`).
//!
//! # Invariants
//! - Results keep registration order; there is no relevance ranking.
//! - A search never returns more than the configured limit.

pub mod catalog;
pub mod highlight;
pub mod matcher;
pub mod palette;

pub use catalog::default_entries;
pub use highlight::{highlight_match, TextSpan};
pub use matcher::{CommandAction, CommandError, CustomAction, EntryKind, SearchEntry, SearchIndex};
pub use palette::{CommandPalette, PaletteKey, PaletteOutcome};
