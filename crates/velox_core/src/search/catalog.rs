//! Built-in search entries registered at startup.

use super::matcher::{CommandAction, EntryKind, SearchEntry};
use crate::model::page::PageId;

fn page_entry(page: PageId, description: &str, icon: &str) -> SearchEntry {
    SearchEntry::new(
        EntryKind::Page,
        page.title(),
        description,
        icon,
        CommandAction::Navigate(page),
    )
}

/// Pages, then commands, quick actions and help, in palette order.
pub fn default_entries() -> Vec<SearchEntry> {
    vec![
        page_entry(PageId::Dashboard, "Main dashboard overview", "fas fa-home"),
        page_entry(PageId::Analytics, "View analytics and reports", "fas fa-chart-line"),
        page_entry(PageId::Projects, "Manage your projects", "fas fa-folder"),
        page_entry(PageId::Team, "Team management and collaboration", "fas fa-users"),
        page_entry(PageId::Calendar, "Schedule and events", "fas fa-calendar"),
        page_entry(PageId::Messages, "Communication and chat", "fas fa-comments"),
        page_entry(PageId::Files, "Manage files and documents", "fas fa-file-alt"),
        page_entry(PageId::Tasks, "Track and manage tasks", "fas fa-tasks"),
        page_entry(PageId::TimeTracker, "Track time and productivity", "fas fa-clock"),
        page_entry(PageId::Reports, "Generate and export reports", "fas fa-chart-bar"),
        page_entry(PageId::Settings, "Application settings", "fas fa-cog"),
        SearchEntry::new(
            EntryKind::Command,
            "Toggle Dark Mode",
            "Switch between light and dark themes",
            "fas fa-moon",
            CommandAction::ToggleTheme,
        ),
        SearchEntry::new(
            EntryKind::Command,
            "Toggle Sidebar",
            "Collapse or expand sidebar",
            "fas fa-bars",
            CommandAction::ToggleSidebar,
        ),
        SearchEntry::new(
            EntryKind::Command,
            "Mark All Notifications Read",
            "Clear all unread notifications",
            "fas fa-bell-slash",
            CommandAction::MarkAllNotificationsRead,
        ),
        SearchEntry::new(
            EntryKind::Command,
            "Export Data",
            "Export application data",
            "fas fa-download",
            CommandAction::ExportData,
        ),
        SearchEntry::new(
            EntryKind::Command,
            "Clear Cache",
            "Clear application cache",
            "fas fa-trash",
            CommandAction::ClearCache,
        ),
        SearchEntry::new(
            EntryKind::Action,
            "Create New Project",
            "Start a new project",
            "fas fa-plus",
            CommandAction::CreateProject,
        ),
        SearchEntry::new(
            EntryKind::Action,
            "Add Team Member",
            "Invite a new team member",
            "fas fa-user-plus",
            CommandAction::AddTeamMember,
        ),
        SearchEntry::new(
            EntryKind::Action,
            "Schedule Meeting",
            "Schedule a new meeting",
            "fas fa-calendar-plus",
            CommandAction::ScheduleMeeting,
        ),
        SearchEntry::new(
            EntryKind::Action,
            "Upload File",
            "Upload a new file",
            "fas fa-upload",
            CommandAction::UploadFile,
        ),
        SearchEntry::new(
            EntryKind::Action,
            "Create Task",
            "Create a new task",
            "fas fa-plus-circle",
            CommandAction::CreateTask,
        ),
        SearchEntry::new(
            EntryKind::Help,
            "Keyboard Shortcuts",
            "View available keyboard shortcuts",
            "fas fa-keyboard",
            CommandAction::ShowKeyboardShortcuts,
        ),
        SearchEntry::new(
            EntryKind::Help,
            "Help & Support",
            "Get help and support",
            "fas fa-question-circle",
            CommandAction::ShowHelp,
        ),
        SearchEntry::new(
            EntryKind::Help,
            "What's New",
            "View latest updates and features",
            "fas fa-star",
            CommandAction::ShowWhatsNew,
        ),
    ]
}
