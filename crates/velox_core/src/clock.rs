//! Time sources for scheduling and record timestamps.
//!
//! The scheduler runs on a monotonic millisecond counter; notification
//! timestamps use wall-clock epoch milliseconds. Tests drive both through
//! [`ManualClock`].

use std::cell::Cell;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

pub trait Clock {
    /// Monotonic milliseconds since the clock was created.
    fn now_ms(&self) -> u64;
    /// Wall-clock Unix epoch milliseconds.
    fn epoch_ms(&self) -> i64;
}

#[derive(Debug)]
pub struct SystemClock {
    started_at: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.started_at.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn epoch_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}

/// Hand-driven clock; monotonic and epoch time advance together.
#[derive(Debug)]
pub struct ManualClock {
    now_ms: Cell<u64>,
    epoch_base_ms: i64,
}

impl ManualClock {
    pub fn new(epoch_base_ms: i64) -> Self {
        Self {
            now_ms: Cell::new(0),
            epoch_base_ms,
        }
    }

    pub fn advance(&self, delta_ms: u64) -> u64 {
        let next = self.now_ms.get().saturating_add(delta_ms);
        self.now_ms.set(next);
        next
    }

    /// Moves the clock to `now_ms`; earlier values are ignored.
    pub fn set(&self, now_ms: u64) {
        if now_ms > self.now_ms.get() {
            self.now_ms.set(now_ms);
        }
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    fn epoch_ms(&self) -> i64 {
        let offset = i64::try_from(self.now_ms.get()).unwrap_or(i64::MAX);
        self.epoch_base_ms.saturating_add(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, ManualClock};

    #[test]
    fn manual_clock_is_monotonic() {
        let clock = ManualClock::new(1_000);
        clock.advance(250);
        clock.set(100);
        assert_eq!(clock.now_ms(), 250);
        assert_eq!(clock.epoch_ms(), 1_250);
    }
}
