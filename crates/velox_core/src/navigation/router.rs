//! Ticketed page router.
//!
//! A navigation moves through `Loading -> FadingOut -> Ready`, driven by
//! the app controller's timers:
//!
//! 1. [`Router::navigate_to`] marks the menu item and issues a ticket.
//! 2. [`Router::content_resolved`] receives data-source output for the ticket.
//! 3. [`Router::commit`] swaps content in, updates `current_page` and returns
//!    the init hooks plus the `pageChanged` event.
//!
//! # Invariants
//! - A ticket that is no longer pending is ignored at every step.
//! - `PageChanged.from` is captured before `current_page` is reassigned and
//!   no event is produced when `from == to` (a reload).
//! - Failures leave `current_page` unchanged so a retry is a real navigation.

use super::animation::CounterAnimation;
use crate::data::{DataError, PageContent};
use crate::event::AppEvent;
use crate::model::page::PageId;
use log::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NavigationTicket(u64);

impl NavigationTicket {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// What the content region shows.
#[derive(Debug, Clone, PartialEq)]
pub enum PageView {
    Empty,
    Loading { target: PageId },
    /// Old content fading out; the new content is already resolved.
    FadingOut { target: PageId },
    Ready {
        content: PageContent,
        /// `page-enter` transition still running.
        entering: bool,
    },
    /// Retry affordance bound to `target`.
    Failed { target: PageId, message: String },
}

/// Page-specific work run after a commit.
#[derive(Debug, Clone, PartialEq)]
pub enum PageInitHook {
    AnimateCounters(Vec<CounterAnimation>),
    LoadDashboardPanels,
    LoadAnalytics,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResolveOutcome {
    /// Ticket was superseded or cancelled.
    Stale,
    /// Content is ready; call `commit` after the fade.
    ReadyToSwap,
    Failed { target: PageId, message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageCommit {
    pub from: PageId,
    pub to: PageId,
    pub hooks: Vec<PageInitHook>,
}

impl PageCommit {
    pub fn event(&self) -> Option<AppEvent> {
        (self.from != self.to).then_some(AppEvent::PageChanged {
            from: self.from,
            to: self.to,
        })
    }
}

#[derive(Debug, Clone)]
enum Phase {
    Loading,
    FadingOut(PageContent),
}

#[derive(Debug, Clone)]
struct Pending {
    ticket: NavigationTicket,
    target: PageId,
    phase: Phase,
}

#[derive(Debug)]
pub struct Router {
    current_page: PageId,
    active_menu_item: PageId,
    pending: Option<Pending>,
    view: PageView,
    next_ticket: u64,
}

impl Router {
    pub fn new(initial: PageId) -> Self {
        Self {
            current_page: initial,
            active_menu_item: initial,
            pending: None,
            view: PageView::Empty,
            next_ticket: 1,
        }
    }

    pub fn current_page(&self) -> PageId {
        self.current_page
    }

    pub fn active_menu_item(&self) -> PageId {
        self.active_menu_item
    }

    pub fn view(&self) -> &PageView {
        &self.view
    }

    pub fn pending_target(&self) -> Option<PageId> {
        self.pending.as_ref().map(|pending| pending.target)
    }

    pub fn pending_ticket(&self) -> Option<NavigationTicket> {
        self.pending.as_ref().map(|pending| pending.ticket)
    }

    /// Starts a navigation, or returns `None` when it would change nothing.
    ///
    /// No-op cases: `target` is already in flight, or nothing is in flight
    /// and `target` is the current page.
    pub fn navigate_to(&mut self, target: PageId) -> Option<NavigationTicket> {
        match &self.pending {
            Some(pending) if pending.target == target => return None,
            None if target == self.current_page => return None,
            _ => {}
        }
        Some(self.start(target))
    }

    /// Reloads the current page unconditionally (startup and retry).
    pub fn reload(&mut self) -> NavigationTicket {
        self.start(self.current_page)
    }

    /// Feeds data-source output for `ticket`.
    pub fn content_resolved(
        &mut self,
        ticket: NavigationTicket,
        result: Result<PageContent, DataError>,
    ) -> ResolveOutcome {
        let Some(pending) = self.pending.as_mut().filter(|pending| {
            pending.ticket == ticket && matches!(pending.phase, Phase::Loading)
        }) else {
            return ResolveOutcome::Stale;
        };
        let target = pending.target;

        match result {
            Ok(content) => {
                pending.phase = Phase::FadingOut(content);
                self.view = PageView::FadingOut { target };
                ResolveOutcome::ReadyToSwap
            }
            Err(err) => {
                let message = format!("Sorry, there was an error loading the {target} page.");
                warn!(
                    "event=page_load module=router status=error page={} ticket={} error={}",
                    target,
                    ticket.0,
                    err
                );
                self.pending = None;
                self.view = PageView::Failed {
                    target,
                    message: message.clone(),
                };
                ResolveOutcome::Failed { target, message }
            }
        }
    }

    /// Swaps resolved content in and returns the transition record.
    pub fn commit(&mut self, ticket: NavigationTicket) -> Option<PageCommit> {
        let is_ready = self.pending.as_ref().is_some_and(|pending| {
            pending.ticket == ticket && matches!(pending.phase, Phase::FadingOut(_))
        });
        if !is_ready {
            return None;
        }
        let Pending { target, phase, .. } = self.pending.take()?;
        let Phase::FadingOut(content) = phase else {
            return None;
        };

        let from = self.current_page;
        self.current_page = target;
        self.active_menu_item = target;
        let hooks = init_hooks(&content);
        self.view = PageView::Ready {
            content,
            entering: true,
        };

        info!(
            "event=page_navigate module=router status=ok from={} to={} ticket={}",
            from, target, ticket.0
        );
        Some(PageCommit {
            from,
            to: target,
            hooks,
        })
    }

    /// Ends the `page-enter` transition on the shown content.
    pub fn finish_enter(&mut self) {
        if let PageView::Ready { entering, .. } = &mut self.view {
            *entering = false;
        }
    }

    /// Drops the in-flight navigation, restoring the menu to the current page.
    pub fn cancel(&mut self) -> Option<NavigationTicket> {
        let pending = self.pending.take()?;
        self.active_menu_item = self.current_page;
        if matches!(self.view, PageView::Loading { .. } | PageView::FadingOut { .. }) {
            self.view = PageView::Empty;
        }
        Some(pending.ticket)
    }

    fn start(&mut self, target: PageId) -> NavigationTicket {
        let ticket = NavigationTicket(self.next_ticket);
        self.next_ticket += 1;

        if let Some(previous) = self.pending.replace(Pending {
            ticket,
            target,
            phase: Phase::Loading,
        }) {
            info!(
                "event=page_navigate module=router status=superseded from_ticket={} to_ticket={} target={}",
                previous.ticket.0, ticket.0, target
            );
        }
        self.active_menu_item = target;
        self.view = PageView::Loading { target };
        ticket
    }
}

fn init_hooks(content: &PageContent) -> Vec<PageInitHook> {
    match content.page {
        PageId::Dashboard => {
            let counters = content
                .stat_cards()
                .map(|card| CounterAnimation::new(card.label.clone(), card.count_to))
                .collect::<Vec<_>>();
            vec![
                PageInitHook::AnimateCounters(counters),
                PageInitHook::LoadDashboardPanels,
            ]
        }
        PageId::Analytics => vec![PageInitHook::LoadAnalytics],
        _ => Vec::new(),
    }
}
