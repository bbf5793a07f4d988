//! Light/dark theme state.
//!
//! # Responsibility
//! - Resolve the startup theme from the persisted choice or the OS signal.
//! - Persist explicit user choices under `theme-preference`.
//!
//! # Invariants
//! - A persisted choice always wins over the OS preference.
//! - OS-driven changes are applied but never persisted.
//! - Every change of `current` produces exactly one `ThemeChanged` event.

use crate::event::AppEvent;
use crate::model::theme::Theme;
use crate::store::{Preferences, THEME_PREFERENCE_KEY};
use log::info;
use std::rc::Rc;

pub struct ThemeController {
    prefs: Rc<Preferences>,
    current: Theme,
    os_prefers_dark: bool,
}

impl ThemeController {
    pub fn new(prefs: Rc<Preferences>, os_prefers_dark: bool) -> Self {
        let current = stored_theme(&prefs).unwrap_or(Theme::from_os_preference(os_prefers_dark));
        Self {
            prefs,
            current,
            os_prefers_dark,
        }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn is_dark(&self) -> bool {
        self.current == Theme::Dark
    }

    pub fn has_explicit_preference(&self) -> bool {
        stored_theme(&self.prefs).is_some()
    }

    /// Flips the theme and persists the new value.
    pub fn toggle_theme(&mut self) -> AppEvent {
        let next = self.current.toggled();
        self.prefs.set_string(THEME_PREFERENCE_KEY, next.as_str());
        self.apply(next, "user");
        AppEvent::ThemeChanged(next)
    }

    /// Persists an explicit choice; returns an event only when it changes the theme.
    pub fn set_theme(&mut self, theme: Theme) -> Option<AppEvent> {
        self.prefs.set_string(THEME_PREFERENCE_KEY, theme.as_str());
        self.change_to(theme, "user")
    }

    /// Handles the OS `prefers-color-scheme` change signal.
    pub fn os_preference_changed(&mut self, prefers_dark: bool) -> Option<AppEvent> {
        self.os_prefers_dark = prefers_dark;
        if self.has_explicit_preference() {
            return None;
        }
        self.change_to(Theme::from_os_preference(prefers_dark), "os")
    }

    /// Forgets the explicit choice and follows the OS preference again.
    pub fn clear_preference(&mut self) -> Option<AppEvent> {
        self.prefs.remove(THEME_PREFERENCE_KEY);
        self.change_to(Theme::from_os_preference(self.os_prefers_dark), "os")
    }

    fn change_to(&mut self, theme: Theme, source: &str) -> Option<AppEvent> {
        if theme == self.current {
            return None;
        }
        self.apply(theme, source);
        Some(AppEvent::ThemeChanged(theme))
    }

    fn apply(&mut self, theme: Theme, source: &str) {
        self.current = theme;
        info!(
            "event=theme_apply module=theme status=ok theme={} source={}",
            theme.as_str(),
            source
        );
    }
}

fn stored_theme(prefs: &Preferences) -> Option<Theme> {
    prefs
        .get_string(THEME_PREFERENCE_KEY)
        .and_then(|value| Theme::parse(&value))
}

#[cfg(test)]
mod tests {
    use super::ThemeController;
    use crate::event::AppEvent;
    use crate::model::theme::Theme;
    use crate::store::{MemoryKvStore, Preferences, THEME_PREFERENCE_KEY};
    use std::rc::Rc;

    fn prefs() -> Rc<Preferences> {
        Rc::new(Preferences::new(MemoryKvStore::new()))
    }

    #[test]
    fn startup_follows_os_until_user_chooses() {
        let prefs = prefs();
        let mut theme = ThemeController::new(Rc::clone(&prefs), true);
        assert_eq!(theme.current(), Theme::Dark);
        assert!(!theme.has_explicit_preference());

        assert_eq!(
            theme.os_preference_changed(false),
            Some(AppEvent::ThemeChanged(Theme::Light))
        );
        assert_eq!(prefs.get_string(THEME_PREFERENCE_KEY), None);
    }

    #[test]
    fn persisted_choice_overrides_os_signal() {
        let prefs = prefs();
        prefs.set_string(THEME_PREFERENCE_KEY, "light");
        let mut theme = ThemeController::new(Rc::clone(&prefs), true);
        assert_eq!(theme.current(), Theme::Light);

        assert_eq!(theme.os_preference_changed(true), None);
        assert_eq!(theme.current(), Theme::Light);
    }

    #[test]
    fn unparseable_stored_value_falls_back_to_os() {
        let prefs = prefs();
        prefs.set_string(THEME_PREFERENCE_KEY, "sepia");
        let theme = ThemeController::new(prefs, false);
        assert_eq!(theme.current(), Theme::Light);
        assert!(!theme.has_explicit_preference());
    }

    #[test]
    fn clear_preference_reverts_to_os() {
        let prefs = prefs();
        let mut theme = ThemeController::new(Rc::clone(&prefs), true);
        theme.toggle_theme();
        assert_eq!(theme.current(), Theme::Light);

        assert_eq!(
            theme.clear_preference(),
            Some(AppEvent::ThemeChanged(Theme::Dark))
        );
        assert!(!theme.has_explicit_preference());
    }

    #[test]
    fn set_theme_to_current_value_persists_without_event() {
        let prefs = prefs();
        let mut theme = ThemeController::new(Rc::clone(&prefs), false);
        assert_eq!(theme.set_theme(Theme::Light), None);
        assert!(theme.has_explicit_preference());
    }
}
