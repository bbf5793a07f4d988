//! In-memory data source with built-in sample data.
//!
//! Individual calls or pages can be switched to fail so hosts and tests can
//! exercise retry and degraded-startup paths.

use super::content::{
    ActivityItem, DashboardPanels, PageContent, PageSection, ProjectSummary, StatCard, TeamStat,
};
use super::{
    ActivityKind, ActivityRecord, AppSettings, DataError, DataResult, DataSource, FeatureFlags,
    UserProfile,
};
use crate::model::notification::{NotificationId, NotificationKind, NotificationRecord};
use crate::model::page::PageId;
use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;

const AVATAR_ALICE: &str = "https://images.pexels.com/photos/3763188/pexels-photo-3763188.jpeg?auto=compress&cs=tinysrgb&w=64&h=64&dpr=2";
const AVATAR_BOB: &str = "https://images.pexels.com/photos/2379004/pexels-photo-2379004.jpeg?auto=compress&cs=tinysrgb&w=64&h=64&dpr=2";
const AVATAR_CAROL: &str = "https://images.pexels.com/photos/1239291/pexels-photo-1239291.jpeg?auto=compress&cs=tinysrgb&w=64&h=64&dpr=2";
const AVATAR_DAVID: &str = "https://images.pexels.com/photos/2182970/pexels-photo-2182970.jpeg?auto=compress&cs=tinysrgb&w=64&h=64&dpr=2";

/// Calls that can be switched to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DataCall {
    DashboardPanels,
    Notifications,
    PersistReadStatus,
    User,
    Settings,
    RecentActivity,
}

#[derive(Debug)]
pub struct MockDataSource {
    now_epoch_ms: i64,
    failing_calls: RefCell<BTreeSet<DataCall>>,
    failing_pages: RefCell<BTreeSet<PageId>>,
    persisted_reads: RefCell<Vec<NotificationId>>,
    page_fetches: Cell<usize>,
}

impl MockDataSource {
    /// Sample timestamps are placed relative to `now_epoch_ms`.
    pub fn new(now_epoch_ms: i64) -> Self {
        Self {
            now_epoch_ms,
            failing_calls: RefCell::new(BTreeSet::new()),
            failing_pages: RefCell::new(BTreeSet::new()),
            persisted_reads: RefCell::new(Vec::new()),
            page_fetches: Cell::new(0),
        }
    }

    pub fn fail_call(&self, call: DataCall, failing: bool) {
        let mut calls = self.failing_calls.borrow_mut();
        if failing {
            calls.insert(call);
        } else {
            calls.remove(&call);
        }
    }

    pub fn fail_page(&self, page: PageId, failing: bool) {
        let mut pages = self.failing_pages.borrow_mut();
        if failing {
            pages.insert(page);
        } else {
            pages.remove(&page);
        }
    }

    /// Ids passed to `persist_read_status`, in call order.
    pub fn persisted_reads(&self) -> Vec<NotificationId> {
        self.persisted_reads.borrow().clone()
    }

    pub fn page_fetch_count(&self) -> usize {
        self.page_fetches.get()
    }

    fn check(&self, call: DataCall) -> DataResult<()> {
        if self.failing_calls.borrow().contains(&call) {
            return Err(DataError::Unavailable(format!("{call:?} disabled")));
        }
        Ok(())
    }

    fn minutes_ago(&self, minutes: i64) -> i64 {
        self.now_epoch_ms - minutes * MINUTE_MS
    }
}

impl DataSource for MockDataSource {
    fn fetch_page(&self, page: PageId) -> DataResult<PageContent> {
        self.page_fetches.set(self.page_fetches.get() + 1);
        if self.failing_pages.borrow().contains(&page) {
            return Err(DataError::Unavailable(format!("page `{page}` disabled")));
        }
        Ok(sample_page(page))
    }

    fn fetch_dashboard_panels(&self) -> DataResult<DashboardPanels> {
        self.check(DataCall::DashboardPanels)?;
        Ok(sample_dashboard_panels())
    }

    fn fetch_notifications(&self) -> DataResult<Vec<NotificationRecord>> {
        self.check(DataCall::Notifications)?;
        Ok(sample_notifications(self.now_epoch_ms))
    }

    fn persist_read_status(&self, ids: &[NotificationId]) -> DataResult<()> {
        self.check(DataCall::PersistReadStatus)?;
        self.persisted_reads.borrow_mut().extend_from_slice(ids);
        Ok(())
    }

    fn fetch_user(&self) -> DataResult<UserProfile> {
        self.check(DataCall::User)?;
        Ok(UserProfile {
            id: "1".to_string(),
            name: "John Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            role: "Administrator".to_string(),
            avatar_url: Some(AVATAR_ALICE.to_string()),
        })
    }

    fn fetch_settings(&self) -> DataResult<AppSettings> {
        self.check(DataCall::Settings)?;
        Ok(AppSettings {
            version: env!("CARGO_PKG_VERSION").to_string(),
            features: FeatureFlags {
                analytics: true,
                file_manager: true,
                time_tracker: true,
                reports: true,
            },
            max_file_size_bytes: 100 * 1024 * 1024,
            max_projects: 50,
            max_team_members: 25,
        })
    }

    fn fetch_recent_activity(&self) -> DataResult<Vec<ActivityRecord>> {
        self.check(DataCall::RecentActivity)?;
        Ok(vec![
            ActivityRecord {
                kind: ActivityKind::Login,
                occurred_at: self.minutes_ago(5),
            },
            ActivityRecord {
                kind: ActivityKind::ProjectUpdate,
                occurred_at: self.minutes_ago(30),
            },
            ActivityRecord {
                kind: ActivityKind::FileUpload,
                occurred_at: self.minutes_ago(60),
            },
        ])
    }
}

fn stat(label: &str, count_to: u64, change: &str, positive: bool, icon: &str) -> StatCard {
    StatCard {
        label: label.to_string(),
        count_to,
        change: change.to_string(),
        positive,
        icon: icon.to_string(),
    }
}

fn sample_page(page: PageId) -> PageContent {
    match page {
        PageId::Dashboard => PageContent {
            page,
            heading: "Dashboard Overview".to_string(),
            subtitle: Some("Welcome back! Here's what's happening with your projects.".to_string()),
            sections: vec![
                PageSection::Stats {
                    cards: vec![
                        stat("Total Revenue", 152_840, "+12.5% from last month", true, "dollar-sign"),
                        stat("Active Users", 2_847, "+8.2% from last week", true, "users"),
                        stat("Orders", 1_249, "-3.1% from yesterday", false, "shopping-cart"),
                        stat("Conversion Rate", 89, "+2.4% from last month", true, "chart-line"),
                    ],
                },
                PageSection::ActivityFeed,
                PageSection::ProjectProgress,
                PageSection::TeamStats,
            ],
        },
        PageId::Analytics => PageContent {
            page,
            heading: "Analytics".to_string(),
            subtitle: Some("Track performance and user engagement.".to_string()),
            sections: vec![
                PageSection::Chart {
                    title: "Revenue Trend".to_string(),
                },
                PageSection::Chart {
                    title: "Traffic Sources".to_string(),
                },
            ],
        },
        PageId::Projects => PageContent::placeholder(page, "Projects Management", "Projects content coming soon..."),
        PageId::Team => PageContent::placeholder(page, "Team Management", "Team content coming soon..."),
        PageId::Calendar => PageContent::placeholder(page, "Calendar", "Calendar content coming soon..."),
        PageId::Messages => PageContent::placeholder(page, "Messages", "Messages content coming soon..."),
        PageId::Files => PageContent::placeholder(page, "File Manager", "File manager content coming soon..."),
        PageId::Tasks => PageContent::placeholder(page, "Task Manager", "Task manager content coming soon..."),
        PageId::TimeTracker => PageContent::placeholder(page, "Time Tracker", "Time tracker content coming soon..."),
        PageId::Reports => PageContent::placeholder(page, "Reports & Export", "Reports content coming soon..."),
        PageId::Settings => PageContent::placeholder(page, "Settings", "Settings content coming soon..."),
    }
}

fn sample_dashboard_panels() -> DashboardPanels {
    let activity = |user: &str, action: &str, item: &str, time: &str, avatar: &str| ActivityItem {
        user: user.to_string(),
        action: action.to_string(),
        item: item.to_string(),
        time_label: time.to_string(),
        avatar_url: Some(avatar.to_string()),
    };
    let project = |name: &str, progress: u8, team_size: u32, status: &str| ProjectSummary {
        name: name.to_string(),
        progress,
        team_size,
        status: status.to_string(),
    };
    let team = |label: &str, value: &str, icon: &str| TeamStat {
        label: label.to_string(),
        value: value.to_string(),
        icon: icon.to_string(),
    };

    DashboardPanels {
        activity: vec![
            activity("Alice Johnson", "completed task", "Website Redesign", "2 minutes ago", AVATAR_ALICE),
            activity("Bob Smith", "uploaded file", "Project Brief.pdf", "15 minutes ago", AVATAR_BOB),
            activity("Carol Davis", "created project", "Mobile App Development", "1 hour ago", AVATAR_CAROL),
        ],
        projects: vec![
            project("Website Redesign", 75, 4, "On Track"),
            project("Mobile App", 45, 6, "In Progress"),
            project("API Integration", 90, 3, "Nearly Done"),
        ],
        team: vec![
            team("Tasks Completed", "24", "tasks"),
            team("Hours Tracked", "187h", "clock"),
            team("Quality Score", "98%", "trophy"),
        ],
    }
}

/// Eight records, the three most recent unread.
pub fn sample_notifications(now_epoch_ms: i64) -> Vec<NotificationRecord> {
    let record = |id: &str,
                  title: &str,
                  message: &str,
                  age_ms: i64,
                  read: bool,
                  kind: NotificationKind,
                  avatar: Option<&str>| NotificationRecord {
        id: id.to_string(),
        title: title.to_string(),
        message: message.to_string(),
        created_at: now_epoch_ms - age_ms,
        read,
        kind,
        avatar_url: avatar.map(str::to_string),
    };

    vec![
        record("1", "New Message", "You have received a new message from Alice Johnson about the website project.", 5 * MINUTE_MS, false, NotificationKind::Message, Some(AVATAR_ALICE)),
        record("2", "Task Completed", "Bob Smith has completed the \"API Integration\" task.", 15 * MINUTE_MS, false, NotificationKind::Task, Some(AVATAR_BOB)),
        record("3", "Project Update", "The \"Mobile App Development\" project has been updated with new requirements.", 30 * MINUTE_MS, false, NotificationKind::Project, Some(AVATAR_CAROL)),
        record("4", "File Uploaded", "Carol Davis uploaded a new file: \"Design_Mockups_v2.fig\"", HOUR_MS, true, NotificationKind::File, Some(AVATAR_CAROL)),
        record("5", "Team Meeting", "Reminder: Weekly team meeting starts in 15 minutes.", 2 * HOUR_MS, true, NotificationKind::Meeting, None),
        record("6", "System Update", "System maintenance completed successfully. All services are now online.", 3 * HOUR_MS, true, NotificationKind::System, None),
        record("7", "New Comment", "David Wilson commented on your post: \"Great work on the dashboard design!\"", 4 * HOUR_MS, true, NotificationKind::Comment, Some(AVATAR_DAVID)),
        record("8", "Deadline Reminder", "The \"Website Redesign\" project is due in 2 days.", 5 * HOUR_MS, true, NotificationKind::Reminder, None),
    ]
}

#[cfg(test)]
mod tests {
    use super::{sample_notifications, DataCall, MockDataSource};
    use crate::data::{DataError, DataSource};
    use crate::model::page::PageId;

    #[test]
    fn sample_notifications_have_three_unread() {
        let records = sample_notifications(10_000_000);
        assert_eq!(records.len(), 8);
        assert_eq!(records.iter().filter(|record| !record.read).count(), 3);
    }

    #[test]
    fn every_page_has_content() {
        let source = MockDataSource::new(0);
        for page in PageId::ALL {
            let content = source.fetch_page(page).expect("page content");
            assert_eq!(content.page, page);
        }
        assert_eq!(source.page_fetch_count(), PageId::ALL.len());
    }

    #[test]
    fn failure_switches_are_reversible() {
        let source = MockDataSource::new(0);
        source.fail_call(DataCall::User, true);
        assert!(matches!(source.fetch_user(), Err(DataError::Unavailable(_))));
        source.fail_call(DataCall::User, false);
        assert!(source.fetch_user().is_ok());

        source.fail_page(PageId::Reports, true);
        assert!(source.fetch_page(PageId::Reports).is_err());
    }
}
