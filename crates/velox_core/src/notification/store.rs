//! Ordered notification list with a derived unread count.
//!
//! # Invariants
//! - Newest first: `add` prepends.
//! - `unread_count` always equals the number of records with `read == false`
//!   and is recomputed after every mutation.
//! - Mutations return the events to publish; the store never touches the bus.

use crate::event::AppEvent;
use crate::model::notification::{NotificationDraft, NotificationId, NotificationRecord};
use log::{debug, info};
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct NotificationStore {
    items: Vec<NotificationRecord>,
    unread_count: usize,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the list with records fetched from the data source.
    pub fn seed(&mut self, records: Vec<NotificationRecord>) -> AppEvent {
        self.items = records;
        self.recompute();
        debug!(
            "event=notifications_seed module=notification status=ok total={} unread={}",
            self.items.len(),
            self.unread_count
        );
        self.changed()
    }

    pub fn items(&self) -> &[NotificationRecord] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&NotificationRecord> {
        self.items.iter().find(|record| record.id == id)
    }

    pub fn unread_count(&self) -> usize {
        self.unread_count
    }

    pub fn unread(&self) -> Vec<&NotificationRecord> {
        self.items.iter().filter(|record| !record.read).collect()
    }

    /// Count shown on the bell; `None` hides the badge.
    pub fn badge(&self) -> Option<usize> {
        (self.unread_count > 0).then_some(self.unread_count)
    }

    /// Prepends `draft` as an unread record.
    ///
    /// Returns the stored record with `notificationReceived` and
    /// `notificationsChanged` events.
    pub fn add(
        &mut self,
        draft: NotificationDraft,
        now_epoch_ms: i64,
    ) -> (NotificationRecord, Vec<AppEvent>) {
        let record = NotificationRecord {
            id: draft.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            title: draft.title,
            message: draft.message,
            created_at: draft.created_at.unwrap_or(now_epoch_ms),
            read: false,
            kind: draft.kind,
            avatar_url: draft.avatar_url,
        };
        self.items.insert(0, record.clone());
        self.recompute();
        info!(
            "event=notification_add module=notification status=ok id={} kind={} unread={}",
            record.id,
            record.kind.as_str(),
            self.unread_count
        );
        let events = vec![
            AppEvent::NotificationReceived(record.clone()),
            self.changed(),
        ];
        (record, events)
    }

    /// Marks one record read. `None` when it was unknown or already read.
    pub fn mark_as_read(&mut self, id: &str) -> Option<AppEvent> {
        let record = self
            .items
            .iter_mut()
            .find(|record| record.id == id && !record.read)?;
        record.read = true;
        self.recompute();
        Some(self.changed())
    }

    /// Marks everything read and returns the ids that flipped.
    pub fn mark_all_as_read(&mut self) -> (Vec<NotificationId>, AppEvent) {
        let flipped = self
            .items
            .iter_mut()
            .filter(|record| !record.read)
            .map(|record| {
                record.read = true;
                record.id.clone()
            })
            .collect::<Vec<_>>();
        self.recompute();
        info!(
            "event=notifications_mark_all module=notification status=ok flipped={}",
            flipped.len()
        );
        (flipped, self.changed())
    }

    pub fn remove(&mut self, id: &str) -> Option<AppEvent> {
        let before = self.items.len();
        self.items.retain(|record| record.id != id);
        if self.items.len() == before {
            return None;
        }
        self.recompute();
        Some(self.changed())
    }

    pub fn clear(&mut self) -> AppEvent {
        self.items.clear();
        self.recompute();
        self.changed()
    }

    fn recompute(&mut self) {
        self.unread_count = self.items.iter().filter(|record| !record.read).count();
    }

    fn changed(&self) -> AppEvent {
        AppEvent::NotificationsChanged {
            unread_count: self.unread_count,
        }
    }
}
