use std::rc::Rc;
use velox_core::store::{SIDEBAR_COLLAPSED_KEY, THEME_PREFERENCE_KEY};
use velox_core::{
    KeyValueStore, MemoryKvStore, Preferences, SqliteKvStore, StoreError, Theme, ThemeController,
};

#[test]
fn sqlite_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.db");

    let store = SqliteKvStore::open(&path).unwrap();
    store.set(THEME_PREFERENCE_KEY, "dark").unwrap();
    store.set(SIDEBAR_COLLAPSED_KEY, "true").unwrap();
    store.set(THEME_PREFERENCE_KEY, "light").unwrap();
    drop(store);

    let reopened = SqliteKvStore::open(&path).unwrap();
    assert_eq!(
        reopened.get(THEME_PREFERENCE_KEY).unwrap().as_deref(),
        Some("light")
    );
    assert_eq!(
        reopened.get(SIDEBAR_COLLAPSED_KEY).unwrap().as_deref(),
        Some("true")
    );

    reopened.remove(SIDEBAR_COLLAPSED_KEY).unwrap();
    assert_eq!(reopened.get(SIDEBAR_COLLAPSED_KEY).unwrap(), None);
    reopened.clear().unwrap();
    assert_eq!(reopened.get(THEME_PREFERENCE_KEY).unwrap(), None);
}

#[test]
fn sqlite_store_rejects_blank_keys() {
    let store = SqliteKvStore::open_in_memory().unwrap();
    assert!(matches!(store.set("  ", "x"), Err(StoreError::InvalidKey(_))));
}

#[test]
fn preferences_swallow_quota_failures() {
    let prefs = Preferences::new(MemoryKvStore::with_quota(1));
    assert!(prefs.set_string(THEME_PREFERENCE_KEY, "dark"));
    assert!(!prefs.set_bool(SIDEBAR_COLLAPSED_KEY, true));
    assert_eq!(prefs.get_bool(SIDEBAR_COLLAPSED_KEY), None);
    assert_eq!(prefs.get_string(THEME_PREFERENCE_KEY).as_deref(), Some("dark"));
}

#[test]
fn theme_restores_from_sqlite_preferences() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("theme.db");

    {
        let prefs = Rc::new(Preferences::new(SqliteKvStore::open(&path).unwrap()));
        let mut theme = ThemeController::new(prefs, false);
        theme.toggle_theme();
        assert_eq!(theme.current(), Theme::Dark);
    }

    let prefs = Rc::new(Preferences::new(SqliteKvStore::open(&path).unwrap()));
    let theme = ThemeController::new(prefs, false);
    assert_eq!(theme.current(), Theme::Dark);
    assert!(theme.has_explicit_preference());
}
