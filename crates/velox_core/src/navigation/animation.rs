//! Dashboard counter animation.
//!
//! Counters count up linearly from 0 to their target; the renderer samples
//! `value_at` every frame.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterAnimation {
    pub label: String,
    pub target: u64,
    started_at_ms: Option<u64>,
    duration_ms: u64,
}

impl CounterAnimation {
    pub fn new(label: impl Into<String>, target: u64) -> Self {
        Self {
            label: label.into(),
            target,
            started_at_ms: None,
            duration_ms: 0,
        }
    }

    pub fn start(&mut self, now_ms: u64, duration_ms: u64) {
        self.started_at_ms = Some(now_ms);
        self.duration_ms = duration_ms;
    }

    /// Floored value at `now_ms`; not-yet-started counters read 0.
    pub fn value_at(&self, now_ms: u64) -> u64 {
        let Some(started_at_ms) = self.started_at_ms else {
            return 0;
        };
        if self.duration_ms == 0 {
            return self.target;
        }
        let elapsed = now_ms.saturating_sub(started_at_ms).min(self.duration_ms);
        let value = u128::from(self.target) * u128::from(elapsed) / u128::from(self.duration_ms);
        u64::try_from(value).unwrap_or(self.target)
    }

    pub fn is_finished(&self, now_ms: u64) -> bool {
        self.started_at_ms
            .is_some_and(|started| now_ms.saturating_sub(started) >= self.duration_ms)
    }
}
