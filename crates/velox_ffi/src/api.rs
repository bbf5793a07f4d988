//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Own the per-thread `AppController` the Dart UI isolate drives.
//! - Flatten core view models into plain string/number envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Calls made before `app_start` fail with a message instead of panicking.
//! - The controller lives on the thread that started it; FRB sync calls
//!   from the UI isolate always land there.

use log::warn;
use std::cell::RefCell;
use std::rc::Rc;
use velox_core::app::{FocusTarget, Key, KeyInput, ResultView};
use velox_core::navigation::PageView;
use velox_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AppBuilder, AppConfig, AppController, Clock, HostEvent, HostOutcome, MemoryKvStore,
    MockDataSource, PageId, SqliteKvStore, SystemClock, Theme,
};

const NOT_STARTED: &str = "app is not started";

thread_local! {
    static APP: RefCell<Option<AppController>> = const { RefCell::new(None) };
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppActionResponse {
    pub ok: bool,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl AppActionResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Result of one scheduler pump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppTickResponse {
    pub fired: u32,
    /// Milliseconds until the next timer, `None` when idle.
    pub next_due_in_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationItem {
    pub id: String,
    pub title: String,
    pub message: String,
    pub time_label: String,
    pub unread: bool,
    pub icon: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResultItem {
    pub title: String,
    pub description: String,
    pub icon: String,
    /// `page|command|action|help`.
    pub badge: String,
    pub selected: bool,
    /// `(start, end)` char ranges of `title` matched by the query.
    pub highlights: Vec<(u32, u32)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastItem {
    pub id: u64,
    /// `info|success|warning|error`.
    pub level: String,
    pub message: String,
}

/// Flattened shell state for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppShellView {
    pub loading: bool,
    pub fatal_error: Option<String>,
    pub document_title: String,
    pub theme: String,
    pub sidebar_collapsed: bool,
    pub mobile_sidebar_open: bool,
    pub current_page: String,
    pub active_menu_item: String,
    /// `empty|loading|fading|ready|entering|failed`.
    pub page_state: String,
    pub page_heading: Option<String>,
    pub page_error: Option<String>,
    pub counters: Vec<(String, String)>,
    pub badge: Option<u32>,
    pub notifications: Vec<NotificationItem>,
    pub palette_open: bool,
    pub palette_query: String,
    pub palette_results: Vec<SearchResultItem>,
    pub search_results: Vec<SearchResultItem>,
    pub toasts: Vec<ToastItem>,
    pub online: bool,
    pub shortcuts_help_open: bool,
    pub reload_requested: bool,
    pub user_name: Option<String>,
}

/// Builds and starts the controller for this thread.
///
/// Input semantics:
/// - `config_json`: optional `AppConfig` JSON; missing fields keep defaults.
/// - `store_path`: SQLite file for preferences; empty keeps them in memory.
///
/// # FFI contract
/// - Fails when an app is already running on this thread.
/// - Never panics; startup failures are reported in `message`.
#[flutter_rust_bridge::frb(sync)]
pub fn app_start(
    config_json: Option<String>,
    store_path: String,
    os_prefers_dark: bool,
    viewport_width: u32,
) -> AppActionResponse {
    if APP.with(|slot| slot.borrow().is_some()) {
        return AppActionResponse::failure("app_start failed: app already started");
    }
    match build_app(config_json, store_path.trim(), os_prefers_dark, viewport_width) {
        Ok(app) => {
            APP.with(|slot| *slot.borrow_mut() = Some(app));
            AppActionResponse::success("App started.")
        }
        Err(err) => {
            warn!("event=ffi_call module=ffi status=error call=app_start error={err}");
            AppActionResponse::failure(format!("app_start failed: {err}"))
        }
    }
}

fn build_app(
    config_json: Option<String>,
    store_path: &str,
    os_prefers_dark: bool,
    viewport_width: u32,
) -> Result<AppController, String> {
    let config = match config_json.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => AppConfig::from_json(raw).map_err(|err| err.to_string())?,
        _ => AppConfig::default(),
    };
    let clock = Rc::new(SystemClock::new());
    let data = Rc::new(MockDataSource::new(clock.epoch_ms()));
    let builder = AppBuilder::new()
        .config(config)
        .clock(clock)
        .data_source(data)
        .os_prefers_dark(os_prefers_dark)
        .viewport_width(viewport_width);
    let builder = if store_path.is_empty() {
        builder.store(MemoryKvStore::new())
    } else {
        builder.store(SqliteKvStore::open(store_path).map_err(|err| err.to_string())?)
    };

    let mut app = builder.build().map_err(|err| err.to_string())?;
    app.start().map_err(|err| err.to_string())?;
    Ok(app)
}

/// Fires due timers; Dart schedules the next call from `next_due_in_ms`.
#[flutter_rust_bridge::frb(sync)]
pub fn app_tick() -> AppTickResponse {
    with_app(|app| {
        let fired = app.tick();
        AppTickResponse {
            fired: u32::try_from(fired).unwrap_or(u32::MAX),
            next_due_in_ms: app.ms_until_next_timer(),
        }
    })
    .unwrap_or(AppTickResponse {
        fired: 0,
        next_due_in_ms: None,
    })
}

/// Starts navigation to `page` (`dashboard`, `analytics`, ...).
#[flutter_rust_bridge::frb(sync)]
pub fn app_navigate(page: String) -> AppActionResponse {
    let Some(target) = PageId::parse(&page) else {
        return AppActionResponse::failure(format!("app_navigate failed: unknown page `{page}`"));
    };
    action(|app| {
        if app.navigate_to(target) {
            "Navigation started.".to_string()
        } else {
            "Already there.".to_string()
        }
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn app_retry_page() -> AppActionResponse {
    action(|app| {
        if app.retry_page() {
            "Retry started.".to_string()
        } else {
            "Nothing to retry.".to_string()
        }
    })
}

/// Returns the new theme, `light|dark`.
#[flutter_rust_bridge::frb(sync)]
pub fn app_toggle_theme() -> String {
    with_app(|app| app.toggle_theme().as_str().to_string()).unwrap_or_default()
}

#[flutter_rust_bridge::frb(sync)]
pub fn app_set_theme(theme: String) -> AppActionResponse {
    let Some(theme) = Theme::parse(&theme) else {
        return AppActionResponse::failure(format!("app_set_theme failed: unknown theme `{theme}`"));
    };
    action(|app| {
        app.set_theme(theme);
        format!("Theme set to {theme}.")
    })
}

/// Returns whether the sidebar is now collapsed.
#[flutter_rust_bridge::frb(sync)]
pub fn app_toggle_sidebar() -> bool {
    with_app(|app| app.toggle_sidebar()).unwrap_or(false)
}

/// Forwards a key press.
///
/// Input semantics:
/// - `key`: a single printable char, or `ArrowUp|ArrowDown|Enter|Escape`.
/// - `target`: `body|text|search|command`.
///
/// Returns `ignored|handled|block_unload`.
#[flutter_rust_bridge::frb(sync)]
pub fn app_key(key: String, ctrl: bool, meta: bool, alt: bool, target: String) -> String {
    let Some(key) = parse_key(&key) else {
        return outcome_label(&HostOutcome::Ignored).to_string();
    };
    let input = KeyInput {
        key,
        ctrl,
        meta,
        alt,
        target: parse_target(&target),
    };
    host_event(HostEvent::Key(input))
}

/// Forwards a non-key host signal.
///
/// `kind` is one of `online|offline|visible|hidden|before_unload|os_dark|
/// os_light|outside_click|error`. `value` carries the width for `resize`
/// and the message for `error`.
#[flutter_rust_bridge::frb(sync)]
pub fn app_host_signal(kind: String, value: String) -> String {
    let event = match kind.trim() {
        "online" => HostEvent::Online,
        "offline" => HostEvent::Offline,
        "visible" => HostEvent::VisibilityChanged { visible: true },
        "hidden" => HostEvent::VisibilityChanged { visible: false },
        "before_unload" => HostEvent::BeforeUnload,
        "os_dark" => HostEvent::OsThemeChanged { prefers_dark: true },
        "os_light" => HostEvent::OsThemeChanged { prefers_dark: false },
        "outside_click" => HostEvent::OutsideClick,
        "error" => HostEvent::RuntimeError { message: value },
        "rejection" => HostEvent::UnhandledRejection { reason: value },
        "resize" => match value.trim().parse::<u32>() {
            Ok(width) => HostEvent::Resize { width },
            Err(_) => return outcome_label(&HostOutcome::Ignored).to_string(),
        },
        _ => return outcome_label(&HostOutcome::Ignored).to_string(),
    };
    host_event(event)
}

#[flutter_rust_bridge::frb(sync)]
pub fn app_set_palette_query(query: String) -> AppActionResponse {
    action(|app| {
        app.set_palette_query(&query);
        "Palette query updated.".to_string()
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn app_toggle_palette() -> bool {
    with_app(|app| app.toggle_palette()).unwrap_or(false)
}

/// Click on a palette row.
#[flutter_rust_bridge::frb(sync)]
pub fn app_choose_palette_result(index: u32) -> AppActionResponse {
    let index = usize::try_from(index).unwrap_or(usize::MAX);
    match with_app(|app| app.choose_palette_result(index)) {
        Ok(Some(Ok(()))) => AppActionResponse::success("Command executed."),
        Ok(Some(Err(err))) => AppActionResponse::failure(format!("command failed: {err}")),
        Ok(None) => AppActionResponse::failure("no palette result at that index"),
        Err(err) => AppActionResponse::failure(err),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn app_set_search_query(query: String) -> AppActionResponse {
    action(|app| {
        app.set_search_query(&query);
        "Search query updated.".to_string()
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn app_click_notification(id: String) -> AppActionResponse {
    action(|app| {
        if app.click_notification(&id) {
            "Notification opened.".to_string()
        } else {
            format!("Notification `{id}` not found.")
        }
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn app_mark_all_notifications_read() -> AppActionResponse {
    action(|app| {
        app.mark_all_notifications_read();
        "All notifications marked as read.".to_string()
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn app_clear_notifications() -> AppActionResponse {
    action(|app| {
        app.clear_notifications();
        "All notifications cleared.".to_string()
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn app_mark_dirty() -> AppActionResponse {
    action(|app| {
        app.mark_dirty();
        "Unsaved changes recorded.".to_string()
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn app_dismiss_toast(id: u64) -> bool {
    with_app(|app| app.dismiss_toast(id)).unwrap_or(false)
}

/// Current shell state; `None` before `app_start`.
#[flutter_rust_bridge::frb(sync)]
pub fn app_snapshot() -> Option<AppShellView> {
    with_app(|app| to_shell_view(app)).ok()
}

/// Stops the controller and drops it. Returns how many timers were cleared.
#[flutter_rust_bridge::frb(sync)]
pub fn app_shutdown() -> u32 {
    let app = APP.with(|slot| slot.borrow_mut().take());
    match app {
        Some(mut app) => u32::try_from(app.shutdown()).unwrap_or(u32::MAX),
        None => 0,
    }
}

fn with_app<T>(f: impl FnOnce(&mut AppController) -> T) -> Result<T, String> {
    APP.with(|slot| {
        let mut slot = slot
            .try_borrow_mut()
            .map_err(|_| "app is busy".to_string())?;
        let app = slot.as_mut().ok_or_else(|| NOT_STARTED.to_string())?;
        Ok(f(app))
    })
}

fn action(f: impl FnOnce(&mut AppController) -> String) -> AppActionResponse {
    match with_app(f) {
        Ok(message) => AppActionResponse::success(message),
        Err(err) => AppActionResponse::failure(err),
    }
}

fn host_event(event: HostEvent) -> String {
    match with_app(|app| app.handle_host_event(event)) {
        Ok(outcome) => outcome_label(&outcome).to_string(),
        Err(_) => outcome_label(&HostOutcome::Ignored).to_string(),
    }
}

fn outcome_label(outcome: &HostOutcome) -> &'static str {
    match outcome {
        HostOutcome::Ignored => "ignored",
        HostOutcome::Handled => "handled",
        HostOutcome::BlockUnload { .. } => "block_unload",
    }
}

fn parse_key(raw: &str) -> Option<Key> {
    match raw {
        "ArrowUp" => Some(Key::ArrowUp),
        "ArrowDown" => Some(Key::ArrowDown),
        "Enter" => Some(Key::Enter),
        "Escape" => Some(Key::Escape),
        _ => {
            let mut chars = raw.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => Some(Key::Char(ch.to_ascii_lowercase())),
                _ => None,
            }
        }
    }
}

fn parse_target(raw: &str) -> FocusTarget {
    match raw.trim() {
        "text" => FocusTarget::TextInput,
        "search" => FocusTarget::SearchInput,
        "command" => FocusTarget::CommandInput,
        _ => FocusTarget::Body,
    }
}

fn to_shell_view(app: &AppController) -> AppShellView {
    let snapshot = app.snapshot();
    let (page_state, page_heading, page_error) = match &snapshot.page {
        PageView::Empty => ("empty", None, None),
        PageView::Loading { .. } => ("loading", None, None),
        PageView::FadingOut { .. } => ("fading", None, None),
        PageView::Ready { content, entering } => (
            if *entering { "entering" } else { "ready" },
            Some(content.heading.clone()),
            None,
        ),
        PageView::Failed { message, .. } => ("failed", None, Some(message.clone())),
    };

    AppShellView {
        loading: snapshot.loading,
        fatal_error: snapshot.fatal_error.map(|view| view.message),
        document_title: snapshot.document_title,
        theme: snapshot.theme.as_str().to_string(),
        sidebar_collapsed: snapshot.sidebar_collapsed,
        mobile_sidebar_open: snapshot.mobile_sidebar_open,
        current_page: snapshot.current_page.as_str().to_string(),
        active_menu_item: snapshot.active_menu_item.as_str().to_string(),
        page_state: page_state.to_string(),
        page_heading,
        page_error,
        counters: snapshot
            .counters
            .into_iter()
            .map(|counter| (counter.label, counter.text))
            .collect(),
        badge: snapshot
            .badge
            .map(|count| u32::try_from(count).unwrap_or(u32::MAX)),
        notifications: snapshot
            .notifications
            .into_iter()
            .map(|view| NotificationItem {
                id: view.id,
                title: view.title,
                message: view.message,
                time_label: view.time_label,
                unread: view.unread,
                icon: view.icon.to_string(),
                avatar_url: view.avatar_url,
            })
            .collect(),
        palette_open: snapshot.palette.open,
        palette_query: snapshot.palette.query,
        palette_results: snapshot
            .palette
            .results
            .into_iter()
            .map(to_search_item)
            .collect(),
        search_results: snapshot
            .search_results
            .into_iter()
            .map(to_search_item)
            .collect(),
        toasts: snapshot
            .toasts
            .into_iter()
            .map(|toast| ToastItem {
                id: toast.id,
                level: toast.level.as_str().to_string(),
                message: toast.message,
            })
            .collect(),
        online: snapshot.online,
        shortcuts_help_open: snapshot.shortcuts_help_open,
        reload_requested: snapshot.reload_requested,
        user_name: snapshot.user.map(|user| user.name),
    }
}

fn to_search_item(view: ResultView) -> SearchResultItem {
    let mut highlights = Vec::new();
    let mut title = String::new();
    let mut offset = 0u32;
    for span in view.title {
        let len = u32::try_from(span.text.chars().count()).unwrap_or(u32::MAX);
        if span.matched {
            highlights.push((offset, offset.saturating_add(len)));
        }
        offset = offset.saturating_add(len);
        title.push_str(&span.text);
    }
    SearchResultItem {
        title,
        description: view.description,
        icon: view.icon,
        badge: view.badge.to_string(),
        selected: view.selected,
        highlights,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        app_host_signal, app_key, app_mark_dirty, app_navigate, app_set_palette_query,
        app_set_search_query, app_shutdown, app_snapshot, app_start, app_tick, app_toggle_palette, app_toggle_theme,
        core_version, init_logging, ping,
    };

    const INSTANT_CONFIG: &str = r#"{
        "min_load_ms": 0,
        "page_load_delay_ms": 0,
        "page_fade_ms": 0,
        "page_enter_ms": 0,
        "command_debounce_ms": 0
    }"#;

    fn start_instant() {
        let response = app_start(Some(INSTANT_CONFIG.to_string()), String::new(), false, 1_440);
        assert!(response.ok, "{}", response.message);
        app_tick();
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn calls_before_start_fail_softly() {
        assert!(app_snapshot().is_none());
        assert!(!app_navigate("team".to_string()).ok);
        assert_eq!(app_toggle_theme(), "");
        for response in [
            app_set_palette_query("dash".to_string()),
            app_set_search_query("team".to_string()),
            app_mark_dirty(),
        ] {
            assert!(!response.ok);
            assert_eq!(response.message, "app is not started");
        }
        assert_eq!(app_shutdown(), 0);
    }

    #[test]
    fn start_rejects_bad_config_and_double_start() {
        let bad = app_start(Some("{\"nope\": 1}".to_string()), String::new(), false, 1_440);
        assert!(!bad.ok);

        start_instant();
        let again = app_start(None, String::new(), false, 1_440);
        assert!(!again.ok);
        app_shutdown();
    }

    #[test]
    fn navigation_and_theme_round_trip_through_snapshot() {
        start_instant();
        let view = app_snapshot().expect("snapshot");
        assert!(!view.loading);
        assert_eq!(view.current_page, "dashboard");
        assert_eq!(view.badge, Some(3));

        assert!(!app_navigate("billing".to_string()).ok);
        assert!(app_navigate("team".to_string()).ok);
        app_tick();
        let view = app_snapshot().expect("snapshot");
        assert_eq!(view.current_page, "team");
        assert_eq!(view.document_title, "Team - Velox Suite");

        assert_eq!(app_toggle_theme(), "dark");
        assert!(app_shutdown() >= 2);
        assert!(app_snapshot().is_none());
    }

    #[test]
    fn palette_results_carry_highlight_ranges() {
        start_instant();
        assert_eq!(app_key("k".to_string(), true, false, false, "body".to_string()), "handled");
        assert!(!app_toggle_palette());
        assert!(app_toggle_palette());
        assert!(app_set_palette_query("dash".to_string()).ok);
        app_tick();

        let view = app_snapshot().expect("snapshot");
        assert!(view.palette_open);
        let first = &view.palette_results[0];
        assert_eq!(first.title, "Dashboard");
        assert_eq!(first.highlights, vec![(0, 4)]);
        assert_eq!(first.badge, "page");
        app_shutdown();
    }

    #[test]
    fn unload_guard_reports_block() {
        start_instant();
        assert_eq!(app_host_signal("before_unload".to_string(), String::new()), "ignored");
        assert!(app_mark_dirty().ok);
        assert_eq!(
            app_host_signal("before_unload".to_string(), String::new()),
            "block_unload"
        );
        assert_eq!(app_host_signal("resize".to_string(), "wide".to_string()), "ignored");
        app_shutdown();
    }
}
