//! Sidebar collapse state.
//!
//! # Invariants
//! - `collapsed` is restored from `sidebar-collapsed` and written on every toggle.
//! - The mobile drawer (`mobile_open`) is never persisted.
//! - Collapse only applies above the mobile breakpoint.

use crate::event::AppEvent;
use crate::store::{Preferences, SIDEBAR_COLLAPSED_KEY};
use log::info;
use std::rc::Rc;

pub struct SidebarState {
    prefs: Rc<Preferences>,
    collapsed: bool,
    mobile_open: bool,
}

impl SidebarState {
    pub fn new(prefs: Rc<Preferences>) -> Self {
        let collapsed = prefs.get_bool(SIDEBAR_COLLAPSED_KEY).unwrap_or(false);
        Self {
            prefs,
            collapsed,
            mobile_open: false,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn is_mobile_open(&self) -> bool {
        self.mobile_open
    }

    /// Whether the collapsed layout applies at `viewport_width`.
    pub fn collapsed_at(&self, viewport_width: u32, mobile_breakpoint_px: u32) -> bool {
        self.collapsed && viewport_width > mobile_breakpoint_px
    }

    pub fn toggle(&mut self) -> AppEvent {
        self.collapsed = !self.collapsed;
        self.prefs.set_bool(SIDEBAR_COLLAPSED_KEY, self.collapsed);
        info!(
            "event=sidebar_toggle module=navigation status=ok collapsed={}",
            self.collapsed
        );
        AppEvent::SidebarToggled {
            collapsed: self.collapsed,
        }
    }

    pub fn toggle_mobile(&mut self) -> bool {
        self.mobile_open = !self.mobile_open;
        self.mobile_open
    }

    /// Returns `true` when the drawer was open.
    pub fn close_mobile(&mut self) -> bool {
        std::mem::replace(&mut self.mobile_open, false)
    }
}

#[cfg(test)]
mod tests {
    use super::SidebarState;
    use crate::event::AppEvent;
    use crate::store::{MemoryKvStore, Preferences, SIDEBAR_COLLAPSED_KEY};
    use std::rc::Rc;

    #[test]
    fn toggle_persists_and_restores() {
        let prefs = Rc::new(Preferences::new(MemoryKvStore::new()));
        let mut sidebar = SidebarState::new(Rc::clone(&prefs));
        assert!(!sidebar.is_collapsed());

        assert_eq!(sidebar.toggle(), AppEvent::SidebarToggled { collapsed: true });
        assert_eq!(prefs.get_string(SIDEBAR_COLLAPSED_KEY).as_deref(), Some("true"));

        let restored = SidebarState::new(prefs);
        assert!(restored.is_collapsed());
        assert!(restored.collapsed_at(1_440, 1_024));
        assert!(!restored.collapsed_at(800, 1_024));
    }

    #[test]
    fn mobile_drawer_is_transient() {
        let prefs = Rc::new(Preferences::new(MemoryKvStore::new()));
        let mut sidebar = SidebarState::new(prefs);
        assert!(sidebar.toggle_mobile());
        assert!(sidebar.close_mobile());
        assert!(!sidebar.close_mobile());
    }
}
