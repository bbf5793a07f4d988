//! Notification tray state and the synthetic polling feed.
//!
//! # Responsibility
//! - Own the ordered notification list and its unread count (`store`).
//! - Produce occasional synthetic notifications on poll (`feed`).
//! - Track which header dropdown is open (`dropdown`).

pub mod dropdown;
pub mod feed;
pub mod store;

pub use dropdown::{Dropdown, DropdownState};
pub use feed::SyntheticFeed;
pub use store::NotificationStore;
