//! Transient toast messages.
//!
//! Each toast carries its own deadline on the scheduler clock; the app
//! expires them on every tick.

use log::debug;

pub type ToastId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub level: ToastLevel,
    pub message: String,
    pub expires_at_ms: u64,
}

#[derive(Debug, Default)]
pub struct ToastQueue {
    next_id: ToastId,
    items: Vec<Toast>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        level: ToastLevel,
        message: impl Into<String>,
        now_ms: u64,
        duration_ms: u64,
    ) -> ToastId {
        self.next_id += 1;
        let toast = Toast {
            id: self.next_id,
            level,
            message: message.into(),
            expires_at_ms: now_ms.saturating_add(duration_ms),
        };
        debug!(
            "event=toast_show module=app status=ok id={} level={}",
            toast.id,
            level.as_str()
        );
        self.items.push(toast);
        self.next_id
    }

    pub fn dismiss(&mut self, id: ToastId) -> bool {
        let before = self.items.len();
        self.items.retain(|toast| toast.id != id);
        before != self.items.len()
    }

    /// Drops toasts whose deadline has passed; returns how many.
    pub fn expire(&mut self, now_ms: u64) -> usize {
        let before = self.items.len();
        self.items.retain(|toast| toast.expires_at_ms > now_ms);
        before - self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Oldest first.
    pub fn items(&self) -> &[Toast] {
        &self.items
    }

    pub fn last(&self) -> Option<&Toast> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{ToastLevel, ToastQueue};

    #[test]
    fn toasts_expire_at_deadline() {
        let mut toasts = ToastQueue::new();
        let first = toasts.push(ToastLevel::Info, "one", 0, 3_000);
        toasts.push(ToastLevel::Error, "two", 1_000, 3_000);

        assert_eq!(toasts.expire(2_999), 0);
        assert_eq!(toasts.expire(3_000), 1);
        assert_eq!(toasts.last().map(|toast| toast.message.as_str()), Some("two"));
        assert!(!toasts.dismiss(first));
        assert_eq!(toasts.expire(4_000), 1);
        assert!(toasts.is_empty());
    }
}
