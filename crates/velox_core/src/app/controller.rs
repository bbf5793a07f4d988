//! Top-level orchestrator.
//!
//! # Responsibility
//! - Assemble components from injected collaborators ([`AppBuilder`]).
//! - Run the ordered startup sequence and publish `appReady`.
//! - Own the scheduler and map fired timers to component calls.
//! - Route host events, shortcuts and commands to the right component.
//!
//! # Invariants
//! - `start` stops at the first failing step and enters `AppPhase::Failed`.
//! - Host events are ignored until global listeners are installed.
//! - Global runtime errors only toast once the shell is revealed.
//! - Re-armed one-shot timers clear their previous handle first.
//! - `shutdown` leaves zero pending timers and zero bus subscriptions.

use super::host::{HostEvent, HostOutcome, KeyInput};
use super::shortcuts::{resolve_shortcut, Shortcut};
use super::toast::{Toast, ToastId, ToastLevel, ToastQueue};
use super::view::{
    AppSnapshot, CounterView, FatalErrorView, NotificationView, PaletteView, ResultView,
};
use crate::clock::Clock;
use crate::config::{AppConfig, ConfigError, APP_NAME};
use crate::data::{
    ActivityRecord, AppSettings, DashboardPanels, DataResult, DataSource, UserProfile,
};
use crate::event::{AppEvent, EventBus, EventName, HandlerResult, SubscriptionId};
use crate::logging::{sanitize_message, MAX_LOGGED_TEXT_CHARS};
use crate::model::notification::{NotificationDraft, NotificationId, NotificationRecord};
use crate::model::page::PageId;
use crate::model::theme::Theme;
use crate::navigation::{
    CounterAnimation, NavigationTicket, PageInitHook, PageView, ResolveOutcome, Router,
    SidebarState,
};
use crate::notification::{Dropdown, DropdownState, NotificationStore, SyntheticFeed};
use crate::scheduler::{Scheduler, TimerHandle};
use crate::search::{
    default_entries, CommandAction, CommandError, CommandPalette, CustomAction, PaletteKey,
    PaletteOutcome, SearchEntry, SearchIndex,
};
use crate::store::{KeyValueStore, Preferences};
use crate::theme::ThemeController;
use log::{debug, error, info, warn};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

const COMMAND_ERROR_TOAST: &str = "Error executing command";
const RUNTIME_ERROR_TOAST: &str = "An unexpected error occurred. Please try refreshing the page.";
const UNSAVED_CHANGES_PROMPT: &str = "You have unsaved changes. Are you sure you want to leave?";
const DEFAULT_VIEWPORT_WIDTH: u32 = 1_440;

#[derive(Debug, Clone, PartialEq)]
pub enum StartupError {
    /// A required collaborator was not supplied to the builder.
    MissingComponent(&'static str),
    InvalidConfig(ConfigError),
    AlreadyStarted,
}

impl StartupError {
    pub fn fatal_view(&self) -> FatalErrorView {
        FatalErrorView::new(self.to_string())
    }
}

impl Display for StartupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingComponent(name) => write!(f, "Required system '{name}' is not available"),
            Self::InvalidConfig(err) => write!(f, "invalid configuration: {err}"),
            Self::AlreadyStarted => write!(f, "application already started"),
        }
    }
}

impl Error for StartupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidConfig(err) => Some(err),
            Self::MissingComponent(_) | Self::AlreadyStarted => None,
        }
    }
}

impl From<ConfigError> for StartupError {
    fn from(value: ConfigError) -> Self {
        Self::InvalidConfig(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppPhase {
    Created,
    /// Loading screen visible.
    Loading,
    Ready,
    /// Fatal startup failure; the host offers a reload.
    Failed { message: String },
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    ResolvePage(NavigationTicket),
    SwapPage(NavigationTicket),
    EndPageEnter,
    PollNotifications,
    AutoSave,
    RevealShell,
    SearchQuery,
    CommandQuery,
}

/// State written by bus subscribers.
#[derive(Debug)]
struct Shell {
    document_title: String,
    applied_theme: Theme,
    page_views: usize,
}

#[derive(Debug, Default)]
struct TimerSlots {
    page: Option<TimerHandle>,
    page_enter: Option<TimerHandle>,
    search: Option<TimerHandle>,
    command: Option<TimerHandle>,
    reveal: Option<TimerHandle>,
}

pub struct AppBuilder {
    config: AppConfig,
    clock: Option<Rc<dyn Clock>>,
    data: Option<Rc<dyn DataSource>>,
    prefs: Option<Rc<Preferences>>,
    rng: Option<Box<dyn RngCore>>,
    os_prefers_dark: bool,
    viewport_width: u32,
    initial_page: PageId,
    extra_entries: Vec<SearchEntry>,
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            clock: None,
            data: None,
            prefs: None,
            rng: None,
            os_prefers_dark: false,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            initial_page: PageId::Dashboard,
            extra_entries: Vec::new(),
        }
    }

    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    pub fn clock(mut self, clock: Rc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn data_source(mut self, data: Rc<dyn DataSource>) -> Self {
        self.data = Some(data);
        self
    }

    pub fn preferences(mut self, prefs: Rc<Preferences>) -> Self {
        self.prefs = Some(prefs);
        self
    }

    /// Wraps `store` in a [`Preferences`] facade.
    pub fn store(self, store: impl KeyValueStore + 'static) -> Self {
        self.preferences(Rc::new(Preferences::new(store)))
    }

    pub fn rng(mut self, rng: impl RngCore + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    /// Deterministic synthetic notifications.
    pub fn seed(self, seed: u64) -> Self {
        self.rng(StdRng::seed_from_u64(seed))
    }

    pub fn os_prefers_dark(mut self, prefers_dark: bool) -> Self {
        self.os_prefers_dark = prefers_dark;
        self
    }

    pub fn viewport_width(mut self, width: u32) -> Self {
        self.viewport_width = width;
        self
    }

    pub fn initial_page(mut self, page: PageId) -> Self {
        self.initial_page = page;
        self
    }

    /// Registers an entry after the built-in catalog.
    pub fn command(mut self, entry: SearchEntry) -> Self {
        self.extra_entries.push(entry);
        self
    }

    pub fn build(self) -> Result<AppController, StartupError> {
        let clock = self.clock.ok_or(StartupError::MissingComponent("clock"))?;
        let data = self.data.ok_or(StartupError::MissingComponent("dataSource"))?;
        let prefs = self.prefs.ok_or(StartupError::MissingComponent("storage"))?;
        let rng = self
            .rng
            .unwrap_or_else(|| Box::new(StdRng::from_entropy()) as Box<dyn RngCore>);

        let theme = ThemeController::new(Rc::clone(&prefs), self.os_prefers_dark);
        let sidebar = SidebarState::new(Rc::clone(&prefs));
        let mut search = SearchIndex::with_entries(self.config.search_result_limit, default_entries());
        for entry in self.extra_entries {
            search.add(entry);
        }
        let shell = Shell {
            document_title: page_document_title(self.initial_page),
            applied_theme: theme.current(),
            page_views: 0,
        };

        Ok(AppController {
            load_started_ms: clock.now_ms(),
            feed: SyntheticFeed::new(self.config.synthetic_notification_probability),
            toasts: Rc::new(RefCell::new(ToastQueue::new())),
            bus: Rc::new(EventBus::new()),
            shell: Rc::new(RefCell::new(shell)),
            router: Router::new(self.initial_page),
            viewport_width: self.viewport_width,
            config: self.config,
            clock,
            data,
            prefs,
            rng,
            theme,
            sidebar,
            search,
            palette: CommandPalette::new(),
            search_query: String::new(),
            search_results: Vec::new(),
            notifications: NotificationStore::new(),
            dropdowns: DropdownState::default(),
            scheduler: Scheduler::new(),
            slots: TimerSlots::default(),
            subscriptions: Vec::new(),
            phase: AppPhase::Created,
            listeners_installed: false,
            online: true,
            visible: true,
            dirty: false,
            shortcuts_help_open: false,
            reload_requested: false,
            update_checks: 0,
            autosaves: 0,
            counters: Vec::new(),
            dashboard_panels: None,
            user: None,
            settings: None,
            recent_activity: Vec::new(),
        })
    }
}

pub struct AppController {
    config: AppConfig,
    clock: Rc<dyn Clock>,
    data: Rc<dyn DataSource>,
    prefs: Rc<Preferences>,
    rng: Box<dyn RngCore>,
    bus: Rc<EventBus>,
    shell: Rc<RefCell<Shell>>,
    toasts: Rc<RefCell<ToastQueue>>,
    theme: ThemeController,
    router: Router,
    sidebar: SidebarState,
    search: SearchIndex,
    palette: CommandPalette,
    search_query: String,
    search_results: Vec<SearchEntry>,
    notifications: NotificationStore,
    feed: SyntheticFeed,
    dropdowns: DropdownState,
    scheduler: Scheduler<TimerTask>,
    slots: TimerSlots,
    subscriptions: Vec<(EventName, SubscriptionId)>,
    phase: AppPhase,
    load_started_ms: u64,
    listeners_installed: bool,
    online: bool,
    visible: bool,
    viewport_width: u32,
    dirty: bool,
    shortcuts_help_open: bool,
    reload_requested: bool,
    update_checks: usize,
    autosaves: usize,
    counters: Vec<CounterAnimation>,
    dashboard_panels: Option<DashboardPanels>,
    user: Option<UserProfile>,
    settings: Option<AppSettings>,
    recent_activity: Vec<ActivityRecord>,
}

impl AppController {
    pub fn builder() -> AppBuilder {
        AppBuilder::new()
    }

    // ---- lifecycle ----

    /// Runs the startup sequence.
    ///
    /// The shell is revealed once `min_load_ms` has elapsed since `build`;
    /// until then the app stays in `Loading` and `tick` finishes startup.
    pub fn start(&mut self) -> Result<(), StartupError> {
        if self.phase != AppPhase::Created {
            return Err(StartupError::AlreadyStarted);
        }
        self.phase = AppPhase::Loading;
        info!(
            "event=app_start module=app status=start version={}",
            crate::core_version()
        );

        let result = self.run_startup();
        if let Err(err) = &result {
            error!("event=app_start module=app status=error error={err}");
            self.phase = AppPhase::Failed {
                message: err.to_string(),
            };
        }
        result
    }

    fn run_startup(&mut self) -> Result<(), StartupError> {
        self.verify_components()?;
        self.wire_subscriptions();
        self.load_initial_data();
        self.install_global_listeners();
        self.load_initial_page();
        self.schedule_reveal();
        Ok(())
    }

    fn verify_components(&self) -> Result<(), StartupError> {
        self.config.validate()?;
        debug!(
            "event=app_verify module=app status=ok entries={}",
            self.search.len()
        );
        Ok(())
    }

    fn wire_subscriptions(&mut self) {
        let shell = Rc::clone(&self.shell);
        self.subscribe(EventName::ThemeChanged, move |event| {
            if let AppEvent::ThemeChanged(theme) = event {
                shell.try_borrow_mut()?.applied_theme = *theme;
                info!("event=theme_apply module=app status=ok theme={theme}");
            }
            Ok(())
        });

        let shell = Rc::clone(&self.shell);
        self.subscribe(EventName::PageChanged, move |event| {
            if let AppEvent::PageChanged { from, to } = event {
                let mut shell = shell.try_borrow_mut()?;
                shell.document_title = page_document_title(*to);
                shell.page_views += 1;
                info!("event=page_view module=app status=ok from={from} to={to}");
            }
            Ok(())
        });

        self.subscribe(EventName::SidebarToggled, |event| {
            if let AppEvent::SidebarToggled { collapsed } = event {
                info!("event=layout_update module=app status=ok sidebar_collapsed={collapsed}");
            }
            Ok(())
        });

        let toasts = Rc::clone(&self.toasts);
        let clock = Rc::clone(&self.clock);
        let duration_ms = self.config.toast_duration_ms;
        self.subscribe(EventName::NotificationReceived, move |event| {
            if let AppEvent::NotificationReceived(record) = event {
                toasts.try_borrow_mut()?.push(
                    ToastLevel::Info,
                    record.title.clone(),
                    clock.now_ms(),
                    duration_ms,
                );
            }
            Ok(())
        });
    }

    fn subscribe<F>(&mut self, name: EventName, handler: F)
    where
        F: Fn(&AppEvent) -> HandlerResult + 'static,
    {
        let id = self.bus.subscribe(name, handler);
        self.subscriptions.push((name, id));
    }

    fn load_initial_data(&mut self) {
        let mut failures = 0;
        self.user = loaded("user", self.data.fetch_user(), &mut failures);
        self.settings = loaded("settings", self.data.fetch_settings(), &mut failures);
        self.recent_activity =
            loaded("recent_activity", self.data.fetch_recent_activity(), &mut failures)
                .unwrap_or_default();
        if let Some(records) = loaded("notifications", self.data.fetch_notifications(), &mut failures)
        {
            let event = self.notifications.seed(records);
            self.publish(&event);
        }

        if failures == 0 {
            info!("event=initial_data module=app status=ok");
        } else {
            warn!("event=initial_data module=app status=partial failed={failures}");
        }
    }

    fn install_global_listeners(&mut self) {
        let now = self.clock.now_ms();
        self.scheduler.set_interval(
            now,
            self.config.notification_poll_interval_ms,
            TimerTask::PollNotifications,
        );
        self.scheduler
            .set_interval(now, self.config.autosave_interval_ms, TimerTask::AutoSave);
        self.listeners_installed = true;
        debug!("event=listeners_install module=app status=ok");
    }

    fn load_initial_page(&mut self) {
        let ticket = self.router.reload();
        self.arm_page_timer(TimerTask::ResolvePage(ticket), self.config.page_load_delay_ms);
    }

    fn schedule_reveal(&mut self) {
        let now = self.clock.now_ms();
        let elapsed = now.saturating_sub(self.load_started_ms);
        let remaining = self.config.min_load_ms.saturating_sub(elapsed);
        if remaining == 0 {
            self.reveal_shell();
        } else {
            self.slots.reveal = Some(self.scheduler.set_timeout(
                now,
                remaining,
                TimerTask::RevealShell,
            ));
        }
    }

    fn reveal_shell(&mut self) {
        self.slots.reveal = None;
        if self.phase != AppPhase::Loading {
            return;
        }
        self.phase = AppPhase::Ready;
        self.publish(&AppEvent::AppReady);
        info!(
            "event=app_ready module=app status=ok elapsed_ms={}",
            self.clock.now_ms().saturating_sub(self.load_started_ms)
        );
    }

    /// Clears every timer and subscription. Returns how many timers were pending.
    pub fn shutdown(&mut self) -> usize {
        let cleared = self.scheduler.clear_all();
        self.slots = TimerSlots::default();
        for (name, id) in self.subscriptions.drain(..) {
            self.bus.unsubscribe(name, id);
        }
        self.router.cancel();
        self.palette.close();
        self.toasts.borrow_mut().clear();
        self.listeners_installed = false;
        self.phase = AppPhase::Stopped;
        info!("event=app_shutdown module=app status=ok cleared_timers={cleared}");
        cleared
    }

    /// Fires every timer due on the clock and expires toasts.
    ///
    /// Returns how many timers fired.
    pub fn tick(&mut self) -> usize {
        let now = self.clock.now_ms();
        let mut fired = 0;
        while let Some((handle, task)) = self.scheduler.pop_due(now) {
            fired += 1;
            self.run_task(handle, task, now);
        }
        self.toasts.borrow_mut().expire(now);
        fired
    }

    fn run_task(&mut self, handle: TimerHandle, task: TimerTask, now: u64) {
        match task {
            TimerTask::ResolvePage(ticket) => {
                release(&mut self.slots.page, handle);
                self.resolve_page(ticket);
            }
            TimerTask::SwapPage(ticket) => {
                release(&mut self.slots.page, handle);
                self.swap_page(ticket, now);
            }
            TimerTask::EndPageEnter => {
                release(&mut self.slots.page_enter, handle);
                self.router.finish_enter();
            }
            TimerTask::PollNotifications => self.poll_notifications(),
            TimerTask::AutoSave => self.auto_save(),
            TimerTask::RevealShell => self.reveal_shell(),
            TimerTask::SearchQuery => {
                release(&mut self.slots.search, handle);
                self.run_inline_search();
            }
            TimerTask::CommandQuery => {
                release(&mut self.slots.command, handle);
                self.palette.apply_query(&self.search);
            }
        }
    }

    fn is_running(&self) -> bool {
        matches!(self.phase, AppPhase::Loading | AppPhase::Ready)
    }

    // ---- navigation ----

    /// Starts navigating to `page`. Returns `false` when nothing changes.
    pub fn navigate_to(&mut self, page: PageId) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(ticket) = self.router.navigate_to(page) else {
            return false;
        };
        self.arm_page_timer(TimerTask::ResolvePage(ticket), self.config.page_load_delay_ms);
        if self.viewport_width <= self.config.mobile_breakpoint_px {
            self.sidebar.close_mobile();
        }
        true
    }

    /// Re-runs the failed navigation shown by the retry affordance.
    pub fn retry_page(&mut self) -> bool {
        let PageView::Failed { target, .. } = self.router.view() else {
            return false;
        };
        let target = *target;
        if target != self.router.current_page() {
            return self.navigate_to(target);
        }
        if !self.is_running() {
            return false;
        }
        let ticket = self.router.reload();
        self.arm_page_timer(TimerTask::ResolvePage(ticket), self.config.page_load_delay_ms);
        true
    }

    fn arm_page_timer(&mut self, task: TimerTask, delay_ms: u64) {
        if let Some(previous) = self.slots.page.take() {
            self.scheduler.clear(previous);
        }
        let now = self.clock.now_ms();
        self.slots.page = Some(self.scheduler.set_timeout(now, delay_ms, task));
    }

    fn resolve_page(&mut self, ticket: NavigationTicket) {
        let Some(target) = self
            .router
            .pending_target()
            .filter(|_| self.router.pending_ticket() == Some(ticket))
        else {
            debug!(
                "event=page_load module=app status=stale ticket={}",
                ticket.value()
            );
            return;
        };

        let result = self.data.fetch_page(target);
        match self.router.content_resolved(ticket, result) {
            ResolveOutcome::ReadyToSwap => {
                self.arm_page_timer(TimerTask::SwapPage(ticket), self.config.page_fade_ms);
            }
            ResolveOutcome::Failed { target, .. } => {
                debug!("event=page_load module=app status=retry_available page={target}");
            }
            ResolveOutcome::Stale => {}
        }
    }

    fn swap_page(&mut self, ticket: NavigationTicket, now: u64) {
        let Some(commit) = self.router.commit(ticket) else {
            return;
        };

        self.counters.clear();
        self.dashboard_panels = None;
        for hook in &commit.hooks {
            match hook {
                PageInitHook::AnimateCounters(counters) => {
                    self.counters = counters
                        .iter()
                        .cloned()
                        .map(|mut counter| {
                            counter.start(now, self.config.counter_animation_ms);
                            counter
                        })
                        .collect();
                }
                PageInitHook::LoadDashboardPanels => match self.data.fetch_dashboard_panels() {
                    Ok(panels) => self.dashboard_panels = Some(panels),
                    Err(err) => {
                        warn!("event=dashboard_panels module=app status=error error={err}");
                    }
                },
                PageInitHook::LoadAnalytics => {
                    debug!("event=analytics_init module=app status=ok");
                }
            }
        }

        if let Some(event) = commit.event() {
            self.publish(&event);
        }

        if let Some(previous) = self.slots.page_enter.take() {
            self.scheduler.clear(previous);
        }
        self.slots.page_enter = Some(self.scheduler.set_timeout(
            now,
            self.config.page_enter_ms,
            TimerTask::EndPageEnter,
        ));
    }

    // ---- theme and layout ----

    /// Returns the theme in effect; unchanged once the app has stopped.
    pub fn toggle_theme(&mut self) -> Theme {
        if !self.is_running() {
            return self.theme.current();
        }
        let event = self.theme.toggle_theme();
        self.publish(&event);
        self.theme.current()
    }

    pub fn set_theme(&mut self, theme: Theme) {
        if !self.is_running() {
            return;
        }
        if let Some(event) = self.theme.set_theme(theme) {
            self.publish(&event);
        }
    }

    pub fn toggle_sidebar(&mut self) -> bool {
        if !self.is_running() {
            return self.sidebar.is_collapsed();
        }
        let event = self.sidebar.toggle();
        self.publish(&event);
        self.sidebar.is_collapsed()
    }

    pub fn toggle_mobile_sidebar(&mut self) -> bool {
        self.sidebar.toggle_mobile()
    }

    pub fn toggle_dropdown(&mut self, dropdown: Dropdown) -> bool {
        self.dropdowns.toggle(dropdown)
    }

    // ---- notifications ----

    /// `None` when the app is not running.
    pub fn add_notification(&mut self, draft: NotificationDraft) -> Option<NotificationRecord> {
        if !self.is_running() {
            return None;
        }
        let (record, events) = self.notifications.add(draft, self.clock.epoch_ms());
        for event in &events {
            self.publish(event);
        }
        Some(record)
    }

    pub fn mark_notification_read(&mut self, id: &str) -> bool {
        let Some(event) = self.notifications.mark_as_read(id) else {
            return false;
        };
        self.publish(&event);
        self.persist_reads(&[id.to_string()]);
        true
    }

    pub fn mark_all_notifications_read(&mut self) {
        let (flipped, event) = self.notifications.mark_all_as_read();
        self.publish(&event);
        self.persist_reads(&flipped);
        self.toast(ToastLevel::Success, "All notifications marked as read");
    }

    pub fn remove_notification(&mut self, id: &str) -> bool {
        let Some(event) = self.notifications.remove(id) else {
            return false;
        };
        self.publish(&event);
        true
    }

    pub fn clear_notifications(&mut self) {
        let event = self.notifications.clear();
        self.publish(&event);
        self.toast(ToastLevel::Success, "All notifications cleared");
    }

    /// Marks the notification read, opens the page for its kind and closes
    /// the dropdowns.
    pub fn click_notification(&mut self, id: &str) -> bool {
        let Some(kind) = self.notifications.get(id).map(|record| record.kind) else {
            return false;
        };
        self.mark_notification_read(id);
        if let Some(page) = kind.target_page() {
            self.navigate_to(page);
        }
        self.dropdowns.close_all();
        true
    }

    fn persist_reads(&self, ids: &[NotificationId]) {
        if ids.is_empty() {
            return;
        }
        if let Err(err) = self.data.persist_read_status(ids) {
            warn!(
                "event=notification_sync module=app status=error count={} error={err}",
                ids.len()
            );
        }
    }

    fn poll_notifications(&mut self) {
        if let Some(draft) = self.feed.poll(&mut self.rng) {
            self.add_notification(draft);
        }
    }

    // ---- search and commands ----

    pub fn register_command(&mut self, entry: SearchEntry) {
        self.search.add(entry);
    }

    pub fn unregister_command(&mut self, title: &str) -> usize {
        self.search.remove(title)
    }

    /// Runs `entry` and closes the palette whatever the outcome.
    pub fn execute_command(&mut self, entry: &SearchEntry) -> Result<(), CommandError> {
        let result = self.run_action(&entry.action);
        self.close_palette();
        let title = sanitize_message(&entry.title, MAX_LOGGED_TEXT_CHARS);
        match &result {
            Ok(()) => info!(
                "event=command_execute module=app status=ok kind={} title={title}",
                entry.kind.as_str()
            ),
            Err(err) => {
                warn!("event=command_execute module=app status=error title={title} error={err}");
                self.toast(ToastLevel::Error, COMMAND_ERROR_TOAST);
            }
        }
        result
    }

    fn run_action(&mut self, action: &CommandAction) -> Result<(), CommandError> {
        match action {
            CommandAction::Navigate(page) => {
                self.navigate_to(*page);
            }
            CommandAction::ToggleTheme => {
                self.toggle_theme();
            }
            CommandAction::ToggleSidebar => {
                self.toggle_sidebar();
            }
            CommandAction::MarkAllNotificationsRead => self.mark_all_notifications_read(),
            CommandAction::ExportData => self.toast(ToastLevel::Info, "Exporting data..."),
            CommandAction::ClearCache => return self.clear_cache(),
            CommandAction::CreateProject => {
                self.toast(ToastLevel::Info, "Opening new project dialog...")
            }
            CommandAction::AddTeamMember => {
                self.toast(ToastLevel::Info, "Opening team member invitation...")
            }
            CommandAction::ScheduleMeeting => {
                self.toast(ToastLevel::Info, "Opening meeting scheduler...")
            }
            CommandAction::UploadFile => {
                self.toast(ToastLevel::Info, "Opening file upload dialog...")
            }
            CommandAction::CreateTask => {
                self.toast(ToastLevel::Info, "Opening task creation form...")
            }
            CommandAction::ShowKeyboardShortcuts => {
                self.shortcuts_help_open = true;
                self.toast(ToastLevel::Info, "Keyboard shortcuts displayed");
            }
            CommandAction::ShowHelp => {
                self.toast(ToastLevel::Info, "Opening help documentation...")
            }
            CommandAction::ShowWhatsNew => self.toast(ToastLevel::Info, "Showing latest updates..."),
            CommandAction::Custom(action) => return run_custom(action),
        }
        Ok(())
    }

    /// Wipes persisted preferences and asks the host to reload.
    fn clear_cache(&mut self) -> Result<(), CommandError> {
        if !self.prefs.clear() {
            return Err(CommandError::Failed("storage could not be cleared".to_string()));
        }
        self.reload_requested = true;
        Ok(())
    }

    pub fn open_palette(&mut self) {
        if !self.is_running() {
            return;
        }
        if let Some(pending) = self.slots.command.take() {
            self.scheduler.clear(pending);
        }
        self.palette.open(&self.search);
    }

    pub fn close_palette(&mut self) {
        if let Some(pending) = self.slots.command.take() {
            self.scheduler.clear(pending);
        }
        self.palette.close();
    }

    pub fn toggle_palette(&mut self) -> bool {
        if self.palette.is_open() {
            self.close_palette();
        } else {
            self.open_palette();
        }
        self.palette.is_open()
    }

    /// Records palette input; results refresh after the command debounce.
    pub fn set_palette_query(&mut self, query: &str) {
        if !self.palette.is_open() || !self.is_running() {
            return;
        }
        self.palette.set_query(query);
        if let Some(previous) = self.slots.command.take() {
            self.scheduler.clear(previous);
        }
        let now = self.clock.now_ms();
        self.slots.command = Some(self.scheduler.set_timeout(
            now,
            self.config.command_debounce_ms,
            TimerTask::CommandQuery,
        ));
    }

    pub fn palette_key(&mut self, key: PaletteKey) -> HostOutcome {
        if let Some(pending) = self.slots.command.take() {
            self.scheduler.clear(pending);
            self.palette.apply_query(&self.search);
        }
        match self.palette.handle_key(key) {
            PaletteOutcome::Execute(entry) => {
                // Failures are already reported through a toast.
                let _ = self.execute_command(&entry);
                HostOutcome::Handled
            }
            PaletteOutcome::Handled | PaletteOutcome::Closed => HostOutcome::Handled,
            PaletteOutcome::Ignored => HostOutcome::Ignored,
        }
    }

    pub fn hover_palette_result(&mut self, index: usize) {
        self.palette.hover(index);
    }

    /// Click on a palette row.
    pub fn choose_palette_result(&mut self, index: usize) -> Option<Result<(), CommandError>> {
        let entry = self.palette.choose(index)?;
        Some(self.execute_command(&entry))
    }

    /// Records header search input; results refresh after the search debounce.
    pub fn set_search_query(&mut self, query: &str) {
        if !self.is_running() {
            return;
        }
        self.search_query = query.to_string();
        if let Some(previous) = self.slots.search.take() {
            self.scheduler.clear(previous);
        }
        let now = self.clock.now_ms();
        self.slots.search = Some(self.scheduler.set_timeout(
            now,
            self.config.search_debounce_ms,
            TimerTask::SearchQuery,
        ));
    }

    fn run_inline_search(&mut self) {
        self.search_results = self
            .search
            .search(&self.search_query)
            .into_iter()
            .cloned()
            .collect();
    }

    /// Enter in the header search: runs the first hit or reports no results.
    pub fn submit_search(&mut self) -> Option<Result<(), CommandError>> {
        let query = self.search_query.clone();
        let Some(entry) = self.search.search(&query).into_iter().next().cloned() else {
            self.toast(ToastLevel::Info, format!("No results found for \"{query}\""));
            return None;
        };
        Some(self.execute_command(&entry))
    }

    pub fn dismiss_shortcuts_help(&mut self) {
        self.shortcuts_help_open = false;
    }

    // ---- work state ----

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    pub fn save_work(&mut self) {
        self.dirty = false;
        info!("event=work_save module=app status=ok page={}", self.router.current_page());
        self.toast(ToastLevel::Success, "Work saved successfully");
    }

    fn auto_save(&mut self) {
        if !self.dirty {
            return;
        }
        self.dirty = false;
        self.autosaves += 1;
        info!("event=autosave module=app status=ok count={}", self.autosaves);
    }

    pub fn create_new_item(&mut self) {
        let message = match self.router.current_page() {
            PageId::Projects => "Creating new project...",
            PageId::Tasks => "Creating new task...",
            PageId::Team => "Adding team member...",
            _ => "Create new item...",
        };
        self.toast(ToastLevel::Info, message);
    }

    // ---- host events ----

    pub fn handle_host_event(&mut self, event: HostEvent) -> HostOutcome {
        if !self.listeners_installed {
            debug!(
                "event=host_event module=app status=skipped kind={}",
                event.kind()
            );
            return HostOutcome::Ignored;
        }

        match event {
            HostEvent::RuntimeError { message } => {
                self.report_global_error("error", &message);
                HostOutcome::Handled
            }
            HostEvent::UnhandledRejection { reason } => {
                self.report_global_error("unhandled_rejection", &reason);
                HostOutcome::Handled
            }
            HostEvent::Online => {
                self.set_online(true);
                HostOutcome::Handled
            }
            HostEvent::Offline => {
                self.set_online(false);
                HostOutcome::Handled
            }
            HostEvent::VisibilityChanged { visible } => {
                self.visible = visible;
                if visible {
                    self.update_checks += 1;
                    debug!(
                        "event=update_check module=app status=ok count={}",
                        self.update_checks
                    );
                }
                HostOutcome::Handled
            }
            HostEvent::Key(input) => self.handle_key(input),
            HostEvent::BeforeUnload => {
                if self.dirty {
                    HostOutcome::BlockUnload {
                        message: UNSAVED_CHANGES_PROMPT.to_string(),
                    }
                } else {
                    HostOutcome::Ignored
                }
            }
            HostEvent::OsThemeChanged { prefers_dark } => {
                if let Some(event) = self.theme.os_preference_changed(prefers_dark) {
                    self.publish(&event);
                }
                HostOutcome::Handled
            }
            HostEvent::Resize { width } => {
                self.viewport_width = width;
                if width > self.config.mobile_breakpoint_px {
                    self.sidebar.close_mobile();
                }
                HostOutcome::Handled
            }
            HostEvent::OutsideClick => {
                self.dropdowns.close_all();
                if self.viewport_width <= self.config.mobile_breakpoint_px {
                    self.sidebar.close_mobile();
                }
                HostOutcome::Handled
            }
        }
    }

    fn handle_key(&mut self, input: KeyInput) -> HostOutcome {
        let Some(shortcut) = resolve_shortcut(&input) else {
            return HostOutcome::Ignored;
        };
        debug!("event=shortcut module=app status=ok shortcut={shortcut:?}");

        match shortcut {
            Shortcut::TogglePalette => {
                self.toggle_palette();
            }
            Shortcut::ToggleSidebar => {
                self.toggle_sidebar();
            }
            Shortcut::ToggleTheme => {
                self.toggle_theme();
            }
            Shortcut::NewItem => self.create_new_item(),
            Shortcut::Save => self.save_work(),
            Shortcut::QuickJump(page) => {
                self.navigate_to(page);
            }
            Shortcut::CloseOverlays => {
                let palette_was_open = self.palette.is_open();
                self.close_palette();
                let dropdown_was_open = self.dropdowns.close_all();
                if !palette_was_open && !dropdown_was_open {
                    return HostOutcome::Ignored;
                }
            }
            Shortcut::Palette(key) => {
                if key == PaletteKey::Escape {
                    self.dropdowns.close_all();
                }
                return self.palette_key(key);
            }
            Shortcut::SubmitSearch => {
                self.submit_search();
            }
        }
        HostOutcome::Handled
    }

    fn report_global_error(&mut self, kind: &str, message: &str) {
        error!(
            "event=global_error module=app status=error kind={kind} message={}",
            sanitize_message(message, MAX_LOGGED_TEXT_CHARS)
        );
        if self.phase == AppPhase::Ready {
            self.toast(ToastLevel::Error, RUNTIME_ERROR_TOAST);
        }
    }

    fn set_online(&mut self, online: bool) {
        self.online = online;
        if online {
            self.toast(ToastLevel::Success, "Connection restored");
            info!("event=sync_pending module=app status=start");
        } else {
            self.toast(ToastLevel::Warning, "Connection lost");
        }
        self.publish(&AppEvent::ConnectivityChanged { online });
    }

    // ---- plumbing ----

    fn publish(&self, event: &AppEvent) {
        let report = self.bus.publish(event);
        debug!(
            "event=bus_publish module=app status=ok name={} delivered={} failed={}",
            event.name().as_str(),
            report.delivered,
            report.failed
        );
    }

    fn toast(&self, level: ToastLevel, message: impl Into<String>) {
        self.toasts.borrow_mut().push(
            level,
            message,
            self.clock.now_ms(),
            self.config.toast_duration_ms,
        );
    }

    pub fn dismiss_toast(&mut self, id: ToastId) -> bool {
        self.toasts.borrow_mut().dismiss(id)
    }

    // ---- accessors ----

    pub fn phase(&self) -> &AppPhase {
        &self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == AppPhase::Ready
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Shared bus; hosts may subscribe their own reactions.
    pub fn bus(&self) -> Rc<EventBus> {
        Rc::clone(&self.bus)
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn current_page(&self) -> PageId {
        self.router.current_page()
    }

    pub fn theme(&self) -> Theme {
        self.theme.current()
    }

    /// Theme last applied by the `themeChanged` subscriber.
    pub fn applied_theme(&self) -> Theme {
        self.shell.borrow().applied_theme
    }

    pub fn sidebar(&self) -> &SidebarState {
        &self.sidebar
    }

    pub fn notifications(&self) -> &NotificationStore {
        &self.notifications
    }

    pub fn palette(&self) -> &CommandPalette {
        &self.palette
    }

    pub fn search_index(&self) -> &SearchIndex {
        &self.search
    }

    pub fn search_results(&self) -> &[SearchEntry] {
        &self.search_results
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.borrow().items().to_vec()
    }

    pub fn document_title(&self) -> String {
        self.shell.borrow().document_title.clone()
    }

    pub fn page_views(&self) -> usize {
        self.shell.borrow().page_views
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.len()
    }

    /// When the host should call `tick` next.
    pub fn next_timer_due_ms(&self) -> Option<u64> {
        self.scheduler.next_due_ms()
    }

    /// Delay until the next timer, measured on the app clock.
    pub fn ms_until_next_timer(&self) -> Option<u64> {
        let now = self.clock.now_ms();
        self.next_timer_due_ms().map(|due| due.saturating_sub(now))
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn update_checks(&self) -> usize {
        self.update_checks
    }

    pub fn autosave_count(&self) -> usize {
        self.autosaves
    }

    pub fn shortcuts_help_open(&self) -> bool {
        self.shortcuts_help_open
    }

    pub fn reload_requested(&self) -> bool {
        self.reload_requested
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn settings(&self) -> Option<&AppSettings> {
        self.settings.as_ref()
    }

    pub fn recent_activity(&self) -> &[ActivityRecord] {
        &self.recent_activity
    }

    pub fn counters(&self) -> &[CounterAnimation] {
        &self.counters
    }

    pub fn dashboard_panels(&self) -> Option<&DashboardPanels> {
        self.dashboard_panels.as_ref()
    }

    pub fn snapshot(&self) -> AppSnapshot {
        let now = self.clock.now_ms();
        let now_epoch = self.clock.epoch_ms();
        let theme = self.theme.current();
        let palette_query = self.palette.query();
        let selected = self.palette.selected();
        let palette_results = self
            .palette
            .results()
            .iter()
            .enumerate()
            .map(|(index, entry)| ResultView::from_entry(entry, palette_query, selected == Some(index)))
            .collect::<Vec<_>>();
        let palette_empty = self.palette.is_open() && palette_results.is_empty();

        AppSnapshot {
            loading: matches!(self.phase, AppPhase::Created | AppPhase::Loading),
            fatal_error: match &self.phase {
                AppPhase::Failed { message } => Some(FatalErrorView::new(message.clone())),
                _ => None,
            },
            document_title: self.document_title(),
            theme,
            theme_toggle_icon: theme.toggle_icon(),
            sidebar_collapsed: self
                .sidebar
                .collapsed_at(self.viewport_width, self.config.mobile_breakpoint_px),
            mobile_sidebar_open: self.sidebar.is_mobile_open(),
            current_page: self.router.current_page(),
            active_menu_item: self.router.active_menu_item(),
            page: self.router.view().clone(),
            counters: self
                .counters
                .iter()
                .map(|counter| CounterView::sample(counter, now))
                .collect(),
            dashboard_panels: self.dashboard_panels.clone(),
            notifications: self
                .notifications
                .items()
                .iter()
                .map(|record| NotificationView::from_record(record, now_epoch))
                .collect(),
            badge: self.notifications.badge(),
            open_dropdown: self.dropdowns.open_dropdown(),
            palette: PaletteView {
                open: self.palette.is_open(),
                query: palette_query.to_string(),
                results: palette_results,
                empty_message: palette_empty.then(|| "No results found".to_string()),
            },
            search_results: self
                .search_results
                .iter()
                .map(|entry| ResultView::from_entry(entry, &self.search_query, false))
                .collect(),
            toasts: self.toasts(),
            online: self.online,
            shortcuts_help_open: self.shortcuts_help_open,
            reload_requested: self.reload_requested,
            user: self.user.clone(),
        }
    }
}

fn page_document_title(page: PageId) -> String {
    format!("{} - {APP_NAME}", page.title())
}

fn release(slot: &mut Option<TimerHandle>, fired: TimerHandle) {
    if *slot == Some(fired) {
        *slot = None;
    }
}

fn loaded<T>(what: &str, result: DataResult<T>, failures: &mut usize) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            *failures += 1;
            warn!("event=initial_data module=app status=error call={what} error={err}");
            None
        }
    }
}

/// Runs host code, turning a panic into `CommandError::Failed`.
fn run_custom(action: &CustomAction) -> Result<(), CommandError> {
    catch_unwind(AssertUnwindSafe(|| action.run())).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|message| (*message).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "command panicked".to_string());
        error!(
            "event=command_panic module=app status=error payload={}",
            sanitize_message(&message, MAX_LOGGED_TEXT_CHARS)
        );
        Err(CommandError::Failed(message))
    })
}
