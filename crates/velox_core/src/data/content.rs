//! Structured page view models.
//!
//! These replace HTML templates: renderers map sections to widgets.

use crate::model::page::PageId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
    pub page: PageId,
    pub heading: String,
    pub subtitle: Option<String>,
    pub sections: Vec<PageSection>,
}

impl PageContent {
    /// Content shell for pages that only show a heading and a notice.
    pub fn placeholder(page: PageId, heading: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            page,
            heading: heading.into(),
            subtitle: None,
            sections: vec![PageSection::Notice {
                message: message.into(),
            }],
        }
    }

    /// Stat cards that the counter animation runs over.
    pub fn stat_cards(&self) -> impl Iterator<Item = &StatCard> {
        self.sections
            .iter()
            .filter_map(|section| match section {
                PageSection::Stats { cards } => Some(cards.as_slice()),
                _ => None,
            })
            .flatten()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageSection {
    Stats { cards: Vec<StatCard> },
    /// Slot filled by the dashboard init hook.
    ActivityFeed,
    ProjectProgress,
    TeamStats,
    Chart { title: String },
    Notice { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatCard {
    pub label: String,
    /// Final value the counter animates to from 0.
    pub count_to: u64,
    pub change: String,
    pub positive: bool,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DashboardPanels {
    pub activity: Vec<ActivityItem>,
    pub projects: Vec<ProjectSummary>,
    pub team: Vec<TeamStat>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityItem {
    pub user: String,
    pub action: String,
    pub item: String,
    pub time_label: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub name: String,
    /// Percentage in `0..=100`.
    pub progress: u8,
    pub team_size: u32,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStat {
    pub label: String,
    pub value: String,
    pub icon: String,
}
