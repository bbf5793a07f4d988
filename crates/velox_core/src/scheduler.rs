//! Cooperative timer queue.
//!
//! # Responsibility
//! - Track every pending timeout and interval behind a handle.
//! - Release due tasks in `(due time, creation order)` order.
//!
//! # Invariants
//! - A cleared handle never fires again.
//! - An interval fires at most once per `pop_due` sweep; periods missed
//!   during a clock jump are coalesced into that single fire.
//! - `clear_all` leaves the queue empty.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct Timer<T> {
    due_ms: u64,
    period_ms: Option<u64>,
    task: T,
}

#[derive(Debug)]
pub struct Scheduler<T> {
    next_id: u64,
    timers: BTreeMap<TimerHandle, Timer<T>>,
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            timers: BTreeMap::new(),
        }
    }

    pub fn set_timeout(&mut self, now_ms: u64, delay_ms: u64, task: T) -> TimerHandle {
        self.insert(now_ms.saturating_add(delay_ms), None, task)
    }

    /// Schedules `task` every `period_ms`; a zero period is treated as 1 ms.
    pub fn set_interval(&mut self, now_ms: u64, period_ms: u64, task: T) -> TimerHandle {
        let period_ms = period_ms.max(1);
        self.insert(now_ms.saturating_add(period_ms), Some(period_ms), task)
    }

    /// Returns `true` when the handle was still pending.
    pub fn clear(&mut self, handle: TimerHandle) -> bool {
        self.timers.remove(&handle).is_some()
    }

    /// Clears every pending timer and returns how many were dropped.
    pub fn clear_all(&mut self) -> usize {
        let count = self.timers.len();
        self.timers.clear();
        count
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.timers.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Earliest due time among pending timers.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.timers.values().map(|timer| timer.due_ms).min()
    }

    /// Pops the next task that is due at `now_ms`.
    ///
    /// Intervals are re-armed to the first period boundary after `now_ms`
    /// before being returned.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(TimerHandle, T)> {
        let (handle, _) = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.due_ms <= now_ms)
            .min_by_key(|(handle, timer)| (timer.due_ms, **handle))
            .map(|(handle, timer)| (*handle, timer.due_ms))?;

        let timer = self.timers.remove(&handle)?;
        let task = timer.task.clone();
        if let Some(period_ms) = timer.period_ms {
            self.timers.insert(
                handle,
                Timer {
                    due_ms: next_boundary(timer.due_ms, period_ms, now_ms),
                    ..timer
                },
            );
        }
        Some((handle, task))
    }

    /// Drains everything due at `now_ms`.
    pub fn drain_due(&mut self, now_ms: u64) -> Vec<(TimerHandle, T)> {
        let mut fired = Vec::new();
        while let Some(entry) = self.pop_due(now_ms) {
            fired.push(entry);
        }
        fired
    }

    fn insert(&mut self, due_ms: u64, period_ms: Option<u64>, task: T) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.timers.insert(
            handle,
            Timer {
                due_ms,
                period_ms,
                task,
            },
        );
        handle
    }
}

impl<T: Clone> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// First `due_ms + k * period_ms` (k >= 1) strictly after `now_ms`.
fn next_boundary(due_ms: u64, period_ms: u64, now_ms: u64) -> u64 {
    let missed = now_ms.saturating_sub(due_ms) / period_ms;
    due_ms.saturating_add(period_ms.saturating_mul(missed.saturating_add(1)))
}

#[cfg(test)]
mod tests {
    use super::Scheduler;

    #[test]
    fn timeouts_fire_in_due_order_then_disappear() {
        let mut scheduler = Scheduler::new();
        scheduler.set_timeout(0, 300, "late");
        scheduler.set_timeout(0, 100, "early");
        scheduler.set_timeout(0, 100, "early-second");

        assert!(scheduler.drain_due(99).is_empty());
        let fired: Vec<_> = scheduler
            .drain_due(300)
            .into_iter()
            .map(|(_, task)| task)
            .collect();
        assert_eq!(fired, vec!["early", "early-second", "late"]);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn intervals_coalesce_missed_periods_and_survive_until_cleared() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.set_interval(0, 30, "poll");

        assert_eq!(scheduler.drain_due(95).len(), 1);
        assert!(scheduler.is_pending(handle));
        assert_eq!(scheduler.next_due_ms(), Some(120));

        assert!(scheduler.clear(handle));
        assert!(!scheduler.clear(handle));
        assert!(scheduler.drain_due(1_000).is_empty());
    }

    #[test]
    fn interval_due_exactly_on_now_rearms_one_period_out() {
        let mut scheduler = Scheduler::new();
        scheduler.set_interval(0, 30, "poll");

        assert_eq!(scheduler.drain_due(30).len(), 1);
        assert_eq!(scheduler.next_due_ms(), Some(60));
        assert_eq!(scheduler.drain_due(86_400_000).len(), 1);
        assert_eq!(scheduler.next_due_ms(), Some(86_400_030));
    }

    #[test]
    fn clear_all_empties_queue() {
        let mut scheduler = Scheduler::new();
        scheduler.set_interval(0, 10, 1);
        scheduler.set_timeout(0, 10, 2);
        assert_eq!(scheduler.clear_all(), 2);
        assert_eq!(scheduler.len(), 0);
    }
}
