//! Notification domain model.
//!
//! # Responsibility
//! - Define the record shown in the notification tray.
//! - Map each kind to its icon and the page a click should open.
//!
//! # Invariants
//! - `id` is unique within one store and never reused.
//! - `read` only transitions `false -> true` through the store.

use crate::model::page::PageId;
use serde::{Deserialize, Serialize};

pub type NotificationId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Message,
    Task,
    Project,
    File,
    Meeting,
    System,
    Comment,
    Reminder,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Task => "task",
            Self::Project => "project",
            Self::File => "file",
            Self::Meeting => "meeting",
            Self::System => "system",
            Self::Comment => "comment",
            Self::Reminder => "reminder",
        }
    }

    /// Font Awesome glyph used when the record has no avatar.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Message => "envelope",
            Self::Task => "check-circle",
            Self::Project => "folder",
            Self::File => "file",
            Self::Meeting => "calendar",
            Self::System => "cog",
            Self::Comment => "comment",
            Self::Reminder => "bell",
        }
    }

    /// Page opened when a notification of this kind is clicked.
    ///
    /// `None` keeps the user on the current page.
    pub fn target_page(self) -> Option<PageId> {
        match self {
            Self::Message => Some(PageId::Messages),
            Self::Task => Some(PageId::Tasks),
            Self::Project => Some(PageId::Projects),
            Self::File => Some(PageId::Files),
            Self::Meeting => Some(PageId::Calendar),
            Self::System | Self::Comment | Self::Reminder => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub id: NotificationId,
    pub title: String,
    pub message: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    pub read: bool,
    pub kind: NotificationKind,
    pub avatar_url: Option<String>,
}

/// Input for `NotificationStore::add`.
///
/// Missing `id`/`created_at` are generated by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDraft {
    pub id: Option<NotificationId>,
    pub title: String,
    pub message: String,
    pub created_at: Option<i64>,
    pub kind: NotificationKind,
    pub avatar_url: Option<String>,
}

impl NotificationDraft {
    pub fn new(kind: NotificationKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            message: message.into(),
            created_at: None,
            kind,
            avatar_url: None,
        }
    }

    pub fn with_avatar(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }
}
