//! Transient feedback scheduler
//!
//! Tracks short-lived visual feedback (flash colors, "Copied!" labels) and
//! reports when each one should be reset. Every feedback cycle is scoped to a
//! key: starting a new cycle for a key cancels the pending reset of the
//! previous one, so a rapid second trigger restarts the window instead of
//! racing two resets.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use std::hash::Hash;
use std::time::{Duration, Instant};

new_key_type! {
    pub struct FeedbackId;
}

/// A pending feedback reset
#[derive(Clone, Debug)]
struct Pending<K, V> {
    key: K,
    value: V,
    started: Instant,
    deadline: Instant,
}

/// An expired feedback cycle, returned by [`FeedbackScheduler::tick`]
#[derive(Clone, Debug, PartialEq)]
pub struct Expired<K, V> {
    pub key: K,
    pub value: V,
}

/// Scheduler for cancelable single-shot feedback timers
pub struct FeedbackScheduler<K, V> {
    pending: SlotMap<FeedbackId, Pending<K, V>>,
    by_key: FxHashMap<K, FeedbackId>,
}

impl<K, V> FeedbackScheduler<K, V>
where
    K: Copy + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            pending: SlotMap::with_key(),
            by_key: FxHashMap::default(),
        }
    }

    /// Start a feedback cycle for `key`, replacing any cycle still pending
    pub fn trigger(&mut self, key: K, value: V, duration: Duration, now: Instant) -> FeedbackId {
        if let Some(previous) = self.by_key.remove(&key) {
            if self.pending.remove(previous).is_some() {
                tracing::trace!("feedback restarted before its reset fired");
            }
        }

        let id = self.pending.insert(Pending {
            key,
            value,
            started: now,
            deadline: now + duration,
        });
        self.by_key.insert(key, id);
        id
    }

    /// Cancel the pending cycle for `key` without reporting it as expired
    pub fn cancel(&mut self, key: K) -> Option<V> {
        let id = self.by_key.remove(&key)?;
        self.pending.remove(id).map(|p| p.value)
    }

    /// Value of the cycle currently active for `key`
    pub fn active(&self, key: K) -> Option<&V> {
        let id = self.by_key.get(&key)?;
        self.pending.get(*id).map(|p| &p.value)
    }

    pub fn is_active(&self, key: K) -> bool {
        self.by_key.contains_key(&key)
    }

    /// Fraction of the window elapsed for `key`, in `[0, 1]`
    pub fn progress(&self, key: K, now: Instant) -> Option<f32> {
        let id = self.by_key.get(&key)?;
        let pending = self.pending.get(*id)?;
        let total = pending.deadline.saturating_duration_since(pending.started);
        if total.is_zero() {
            return Some(1.0);
        }
        let elapsed = now.saturating_duration_since(pending.started);
        Some((elapsed.as_secs_f32() / total.as_secs_f32()).clamp(0.0, 1.0))
    }

    /// Earliest pending deadline, if any
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|p| p.deadline).min()
    }

    /// Remove and return every cycle whose deadline is at or before `now`
    ///
    /// Expired cycles come back ordered by deadline.
    pub fn tick(&mut self, now: Instant) -> Vec<Expired<K, V>> {
        let mut due: Vec<(Instant, FeedbackId)> = self
            .pending
            .iter()
            .filter(|(_, p)| p.deadline <= now)
            .map(|(id, p)| (p.deadline, id))
            .collect();
        due.sort_by_key(|(deadline, _)| *deadline);

        due.into_iter()
            .filter_map(|(_, id)| self.pending.remove(id))
            .map(|p| {
                self.by_key.remove(&p.key);
                Expired {
                    key: p.key,
                    value: p.value,
                }
            })
            .collect()
    }

    /// Number of pending cycles
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<K, V> Default for FeedbackScheduler<K, V>
where
    K: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> std::fmt::Debug for FeedbackScheduler<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedbackScheduler")
            .field("pending", &self.pending.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(600);

    #[test]
    fn test_expires_after_window() {
        let start = Instant::now();
        let mut scheduler = FeedbackScheduler::new();
        scheduler.trigger(1u8, "flash", WINDOW, start);

        assert!(scheduler.tick(start + Duration::from_millis(599)).is_empty());
        assert!(scheduler.is_active(1));

        let expired = scheduler.tick(start + WINDOW);
        assert_eq!(expired, vec![Expired { key: 1, value: "flash" }]);
        assert!(!scheduler.is_active(1));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_retrigger_restarts_window() {
        let start = Instant::now();
        let mut scheduler = FeedbackScheduler::new();
        scheduler.trigger(0u8, "first", WINDOW, start);
        scheduler.trigger(0u8, "second", WINDOW, start + Duration::from_millis(400));

        assert_eq!(scheduler.len(), 1);
        // The first reset would have fired here
        assert!(scheduler.tick(start + Duration::from_millis(700)).is_empty());
        assert_eq!(scheduler.active(0), Some(&"second"));

        let expired = scheduler.tick(start + Duration::from_millis(1000));
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].value, "second");
    }

    #[test]
    fn test_keys_are_independent() {
        let start = Instant::now();
        let mut scheduler = FeedbackScheduler::new();
        scheduler.trigger(0u8, 'a', Duration::from_millis(300), start);
        scheduler.trigger(1u8, 'b', Duration::from_millis(100), start);

        assert_eq!(scheduler.next_deadline(), Some(start + Duration::from_millis(100)));

        let expired = scheduler.tick(start + Duration::from_millis(500));
        let keys: Vec<u8> = expired.iter().map(|e| e.key).collect();
        assert_eq!(keys, vec![1, 0]);
    }

    #[test]
    fn test_cancel_and_progress() {
        let start = Instant::now();
        let mut scheduler = FeedbackScheduler::new();
        scheduler.trigger(3u8, (), Duration::from_millis(200), start);

        let half = scheduler.progress(3, start + Duration::from_millis(100)).unwrap();
        assert!((half - 0.5).abs() < 1e-3);

        assert_eq!(scheduler.cancel(3), Some(()));
        assert_eq!(scheduler.cancel(3), None);
        assert!(scheduler.progress(3, start).is_none());
        assert!(scheduler.tick(start + Duration::from_secs(1)).is_empty());
    }
}
