//! Shared domain values for the dashboard core.
//!
//! # Responsibility
//! - Define identifiers and records passed between managers and events.
//! - Keep persisted string forms (`as_str`/`parse`) next to each type.

pub mod notification;
pub mod page;
pub mod theme;
