//! Event bus with per-handler failure isolation.
//!
//! # Invariants
//! - Handlers for one name run in subscription order.
//! - The subscriber list is snapshotted before dispatch; handlers added or
//!   removed during a publish take effect from the next publish.
//! - A handler error or panic is logged and never reaches the publisher.

use super::types::{AppEvent, EventName};
use crate::logging::{sanitize_message, MAX_LOGGED_TEXT_CHARS};
use log::{debug, error, warn};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::error::Error;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

pub type HandlerResult = Result<(), Box<dyn Error>>;

type Handler = Rc<dyn Fn(&AppEvent) -> HandlerResult>;

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

/// Outcome of one publish call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishReport {
    pub delivered: usize,
    pub failed: usize,
}

#[derive(Default)]
pub struct EventBus {
    next_id: Cell<u64>,
    subscribers: RefCell<BTreeMap<EventName, Vec<(SubscriptionId, Handler)>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, name: EventName, handler: F) -> SubscriptionId
    where
        F: Fn(&AppEvent) -> HandlerResult + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.subscribers
            .borrow_mut()
            .entry(name)
            .or_default()
            .push((id, Rc::new(handler)));
        debug!(
            "event=bus_subscribe module=event status=ok name={} id={}",
            name.as_str(),
            id.0
        );
        id
    }

    /// Removes one subscription. Unknown pairs are a no-op returning `false`.
    pub fn unsubscribe(&self, name: EventName, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let Some(handlers) = subscribers.get_mut(&name) else {
            return false;
        };
        let before = handlers.len();
        handlers.retain(|(candidate, _)| *candidate != id);
        before != handlers.len()
    }

    pub fn subscriber_count(&self, name: EventName) -> usize {
        self.subscribers
            .borrow()
            .get(&name)
            .map_or(0, |handlers| handlers.len())
    }

    pub fn publish(&self, event: &AppEvent) -> PublishReport {
        let name = event.name();
        let snapshot: Vec<(SubscriptionId, Handler)> = self
            .subscribers
            .borrow()
            .get(&name)
            .cloned()
            .unwrap_or_default();

        let mut report = PublishReport::default();
        for (id, handler) in snapshot {
            match catch_unwind(AssertUnwindSafe(|| handler(event))) {
                Ok(Ok(())) => report.delivered += 1,
                Ok(Err(err)) => {
                    report.failed += 1;
                    warn!(
                        "event=bus_dispatch module=event status=error name={} id={} error={}",
                        name.as_str(),
                        id.0,
                        sanitize_message(&err.to_string(), MAX_LOGGED_TEXT_CHARS)
                    );
                }
                Err(_) => {
                    report.failed += 1;
                    error!(
                        "event=bus_dispatch module=event status=panic name={} id={}",
                        name.as_str(),
                        id.0
                    );
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::EventBus;
    use crate::event::{AppEvent, EventName};
    use crate::model::theme::Theme;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn unsubscribe_unknown_pair_is_noop() {
        let bus = EventBus::new();
        let id = bus.subscribe(EventName::AppReady, |_| Ok(()));
        assert!(!bus.unsubscribe(EventName::ThemeChanged, id));
        assert!(bus.unsubscribe(EventName::AppReady, id));
        assert!(!bus.unsubscribe(EventName::AppReady, id));
        assert_eq!(bus.subscriber_count(EventName::AppReady), 0);
    }

    #[test]
    fn subscribe_during_dispatch_applies_to_next_publish() {
        let bus = Rc::new(EventBus::new());
        let calls = Rc::new(RefCell::new(0));

        let inner_bus = Rc::clone(&bus);
        let inner_calls = Rc::clone(&calls);
        bus.subscribe(EventName::ThemeChanged, move |_| {
            let calls = Rc::clone(&inner_calls);
            inner_bus.subscribe(EventName::ThemeChanged, move |_| {
                *calls.borrow_mut() += 1;
                Ok(())
            });
            Ok(())
        });

        let first = bus.publish(&AppEvent::ThemeChanged(Theme::Dark));
        assert_eq!(first.delivered, 1);
        assert_eq!(*calls.borrow(), 0);

        bus.publish(&AppEvent::ThemeChanged(Theme::Light));
        assert_eq!(*calls.borrow(), 1);
    }
}
