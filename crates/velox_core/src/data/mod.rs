//! Data access boundary between the core and a backend.
//!
//! # Responsibility
//! - Define the use-case level `DataSource` contract the core calls.
//! - Keep view-model shapes for page content and startup data.
//!
//! # Invariants
//! - Implementations are synchronous; latency is modeled by the app
//!   scheduler, not by the data source.
//! - The core never hardcodes sample data outside `mock`.

pub mod content;
pub mod mock;

use crate::model::notification::{NotificationId, NotificationRecord};
use crate::model::page::PageId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use content::{
    ActivityItem, DashboardPanels, PageContent, PageSection, ProjectSummary, StatCard, TeamStat,
};
pub use mock::{DataCall, MockDataSource};

pub type DataResult<T> = Result<T, DataError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// Backend could not be reached.
    Unavailable(String),
    NotFound(String),
    /// Response arrived but could not be decoded.
    InvalidResponse(String),
}

impl Display for DataError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(message) => write!(f, "data source unavailable: {message}"),
            Self::NotFound(what) => write!(f, "not found: {what}"),
            Self::InvalidResponse(message) => write!(f, "invalid response: {message}"),
        }
    }
}

impl Error for DataError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    pub analytics: bool,
    pub file_manager: bool,
    pub time_tracker: bool,
    pub reports: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    pub version: String,
    pub features: FeatureFlags,
    pub max_file_size_bytes: u64,
    pub max_projects: u32,
    pub max_team_members: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Login,
    ProjectUpdate,
    FileUpload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub kind: ActivityKind,
    /// Unix epoch milliseconds.
    pub occurred_at: i64,
}

/// Backend contract used by the router, notification tray and startup.
pub trait DataSource {
    fn fetch_page(&self, page: PageId) -> DataResult<PageContent>;
    /// Panels filled in by the dashboard init hook after the page is shown.
    fn fetch_dashboard_panels(&self) -> DataResult<DashboardPanels>;
    fn fetch_notifications(&self) -> DataResult<Vec<NotificationRecord>>;
    fn persist_read_status(&self, ids: &[NotificationId]) -> DataResult<()>;
    fn fetch_user(&self) -> DataResult<UserProfile>;
    fn fetch_settings(&self) -> DataResult<AppSettings>;
    fn fetch_recent_activity(&self) -> DataResult<Vec<ActivityRecord>>;
}
