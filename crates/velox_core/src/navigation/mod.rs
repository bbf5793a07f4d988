//! Page routing and sidebar state.
//!
//! # Responsibility
//! - Drive page transitions as a ticketed state machine (`router`).
//! - Own the persisted sidebar-collapsed flag (`sidebar`).
//! - Describe page init work such as counter animations (`animation`).
//!
//! # Invariants
//! - `current_page` changes only when a navigation commits.
//! - At most one navigation is in flight; a newer one supersedes it.

pub mod animation;
pub mod router;
pub mod sidebar;

pub use animation::CounterAnimation;
pub use router::{
    NavigationTicket, PageCommit, PageInitHook, PageView, ResolveOutcome, Router,
};
pub use sidebar::SidebarState;
