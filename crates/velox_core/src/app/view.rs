//! Render-ready view model.
//!
//! A snapshot holds plain values only. Renderers read it after each call
//! into the controller; a host without a renderer can ignore it.

use super::toast::Toast;
use crate::data::{DashboardPanels, UserProfile};
use crate::format::{format_number, format_relative_time};
use crate::model::notification::NotificationRecord;
use crate::model::page::PageId;
use crate::model::theme::Theme;
use crate::navigation::{CounterAnimation, PageView};
use crate::notification::Dropdown;
use crate::search::{highlight_match, SearchEntry, TextSpan};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FatalErrorView {
    pub title: String,
    pub message: String,
    pub action_label: String,
}

impl FatalErrorView {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            title: "Failed to Load Application".to_string(),
            message: message.into(),
            action_label: "Reload Application".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    pub id: String,
    pub title: String,
    pub message: String,
    pub time_label: String,
    pub unread: bool,
    /// Shown when `avatar_url` is absent.
    pub icon: &'static str,
    pub avatar_url: Option<String>,
}

impl NotificationView {
    pub fn from_record(record: &NotificationRecord, now_epoch_ms: i64) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            message: record.message.clone(),
            time_label: format_relative_time(record.created_at, now_epoch_ms),
            unread: !record.read,
            icon: record.kind.icon(),
            avatar_url: record.avatar_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub title: Vec<TextSpan>,
    pub description: String,
    pub icon: String,
    pub badge: &'static str,
    pub selected: bool,
}

impl ResultView {
    pub fn from_entry(entry: &SearchEntry, query: &str, selected: bool) -> Self {
        Self {
            title: highlight_match(&entry.title, query),
            description: entry.description.clone(),
            icon: entry.icon.clone(),
            badge: entry.kind.as_str(),
            selected,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaletteView {
    pub open: bool,
    pub query: String,
    pub results: Vec<ResultView>,
    /// `No results found` when open with an empty list.
    pub empty_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterView {
    pub label: String,
    pub value: u64,
    pub text: String,
}

impl CounterView {
    pub fn sample(counter: &CounterAnimation, now_ms: u64) -> Self {
        let value = counter.value_at(now_ms);
        Self {
            label: counter.label.clone(),
            value,
            text: format_number(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppSnapshot {
    pub loading: bool,
    pub fatal_error: Option<FatalErrorView>,
    pub document_title: String,
    pub theme: Theme,
    pub theme_toggle_icon: &'static str,
    pub sidebar_collapsed: bool,
    pub mobile_sidebar_open: bool,
    pub current_page: PageId,
    pub active_menu_item: PageId,
    pub page: PageView,
    pub counters: Vec<CounterView>,
    pub dashboard_panels: Option<DashboardPanels>,
    pub notifications: Vec<NotificationView>,
    /// Bell badge; `None` hides it.
    pub badge: Option<usize>,
    pub open_dropdown: Option<Dropdown>,
    pub palette: PaletteView,
    pub search_results: Vec<ResultView>,
    pub toasts: Vec<Toast>,
    pub online: bool,
    pub shortcuts_help_open: bool,
    pub reload_requested: bool,
    pub user: Option<UserProfile>,
}
