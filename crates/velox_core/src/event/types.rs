use crate::model::notification::NotificationRecord;
use crate::model::page::PageId;
use crate::model::theme::Theme;

/// Event names as exposed to host bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventName {
    ThemeChanged,
    PageChanged,
    SidebarToggled,
    NotificationReceived,
    NotificationsChanged,
    ConnectivityChanged,
    AppReady,
}

impl EventName {
    pub const ALL: [EventName; 7] = [
        EventName::ThemeChanged,
        EventName::PageChanged,
        EventName::SidebarToggled,
        EventName::NotificationReceived,
        EventName::NotificationsChanged,
        EventName::ConnectivityChanged,
        EventName::AppReady,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ThemeChanged => "themeChanged",
            Self::PageChanged => "pageChanged",
            Self::SidebarToggled => "sidebarToggled",
            Self::NotificationReceived => "notificationReceived",
            Self::NotificationsChanged => "notificationsChanged",
            Self::ConnectivityChanged => "connectivityChanged",
            Self::AppReady => "appReady",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|name| name.as_str() == value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    ThemeChanged(Theme),
    /// `from` is the page shown before the transition, never equal to `to`.
    PageChanged { from: PageId, to: PageId },
    SidebarToggled { collapsed: bool },
    NotificationReceived(NotificationRecord),
    /// Any read/remove/clear mutation of the tray.
    NotificationsChanged { unread_count: usize },
    ConnectivityChanged { online: bool },
    AppReady,
}

impl AppEvent {
    pub fn name(&self) -> EventName {
        match self {
            Self::ThemeChanged(_) => EventName::ThemeChanged,
            Self::PageChanged { .. } => EventName::PageChanged,
            Self::SidebarToggled { .. } => EventName::SidebarToggled,
            Self::NotificationReceived(_) => EventName::NotificationReceived,
            Self::NotificationsChanged { .. } => EventName::NotificationsChanged,
            Self::ConnectivityChanged { .. } => EventName::ConnectivityChanged,
            Self::AppReady => EventName::AppReady,
        }
    }
}
