//! Routed page identifiers.
//!
//! # Invariants
//! - The page set is closed; unknown identifiers never reach the router.
//! - `PageId::ALL` order is the sidebar order and the Alt+digit jump order.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageId {
    Dashboard,
    Analytics,
    Projects,
    Team,
    Calendar,
    Messages,
    Files,
    Tasks,
    TimeTracker,
    Reports,
    Settings,
}

impl PageId {
    pub const ALL: [PageId; 11] = [
        PageId::Dashboard,
        PageId::Analytics,
        PageId::Projects,
        PageId::Team,
        PageId::Calendar,
        PageId::Messages,
        PageId::Files,
        PageId::Tasks,
        PageId::TimeTracker,
        PageId::Reports,
        PageId::Settings,
    ];

    /// Stable identifier used by menu items and host bindings.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Analytics => "analytics",
            Self::Projects => "projects",
            Self::Team => "team",
            Self::Calendar => "calendar",
            Self::Messages => "messages",
            Self::Files => "files",
            Self::Tasks => "tasks",
            Self::TimeTracker => "timetracker",
            Self::Reports => "reports",
            Self::Settings => "settings",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|page| page.as_str() == normalized)
    }

    /// Human-facing title shown in the header and document title.
    pub fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Analytics => "Analytics",
            Self::Projects => "Projects",
            Self::Team => "Team",
            Self::Calendar => "Calendar",
            Self::Messages => "Messages",
            Self::Files => "File Manager",
            Self::Tasks => "Task Manager",
            Self::TimeTracker => "Time Tracker",
            Self::Reports => "Reports",
            Self::Settings => "Settings",
        }
    }

    /// Page reachable with `Alt+<digit>`; only 1..=9 are bound.
    pub fn from_quick_jump_digit(digit: u8) -> Option<Self> {
        if !(1..=9).contains(&digit) {
            return None;
        }
        Self::ALL.get(usize::from(digit - 1)).copied()
    }
}

impl Display for PageId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
