//! Headless core for the Velox Suite dashboard.
//! This crate owns navigation, command search, notifications and theme
//! state; hosts render `AppSnapshot` and feed back `HostEvent`s.

pub mod app;
pub mod clock;
pub mod config;
pub mod data;
pub mod db;
pub mod event;
pub mod format;
pub mod logging;
pub mod model;
pub mod navigation;
pub mod notification;
pub mod scheduler;
pub mod search;
pub mod store;
pub mod theme;

pub use app::{
    AppBuilder, AppController, AppPhase, AppSnapshot, HostEvent, HostOutcome, StartupError,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AppConfig, ConfigError, APP_NAME};
pub use data::{DataError, DataResult, DataSource, MockDataSource};
pub use event::{AppEvent, EventBus, EventName, SubscriptionId};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::notification::{NotificationDraft, NotificationKind, NotificationRecord};
pub use model::page::PageId;
pub use model::theme::Theme;
pub use navigation::Router;
pub use notification::NotificationStore;
pub use search::{CommandAction, CommandError, CommandPalette, SearchEntry, SearchIndex};
pub use store::{KeyValueStore, MemoryKvStore, Preferences, SqliteKvStore, StoreError};
pub use theme::ThemeController;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
