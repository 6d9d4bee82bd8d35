// SPDX-License-Identifier: MPL-2.0
//! Deadline-ordered timer queue.
//!
//! Timers are stored against absolute deadlines. Nothing here ticks: the
//! owner asks for [`TimerQueue::next_deadline`] to know when to wake up and
//! drains due entries with [`TimerQueue::pop_due`].

use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};

/// Handle to a scheduled timer, used to cancel it or to recognise it when
/// it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// A timer that reached its deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expired<K> {
    pub id: TimerId,
    /// The deadline the timer was armed for, not the time it was noticed.
    pub deadline: Instant,
    pub key: K,
}

/// Timers keyed by `K`, ordered by deadline then by scheduling order.
#[derive(Debug)]
pub struct TimerQueue<K> {
    next_id: u64,
    by_deadline: BTreeMap<(Instant, TimerId), K>,
    deadlines: HashMap<TimerId, Instant>,
}

impl<K> TimerQueue<K> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 0,
            by_deadline: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }

    /// Arms a timer for an absolute deadline.
    pub fn schedule_at(&mut self, deadline: Instant, key: K) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.by_deadline.insert((deadline, id), key);
        self.deadlines.insert(id, deadline);
        id
    }

    /// Arms a timer `delay` after `now`.
    pub fn schedule_after(&mut self, now: Instant, delay: Duration, key: K) -> TimerId {
        self.schedule_at(now + delay, key)
    }

    /// Disarms a timer. Returns its key, or `None` if it already fired or
    /// was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> Option<K> {
        let deadline = self.deadlines.remove(&id)?;
        self.by_deadline.remove(&(deadline, id))
    }

    /// Earliest armed deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.by_deadline.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Removes and returns the earliest timer whose deadline is `<= now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<Expired<K>> {
        let (&(deadline, id), _) = self.by_deadline.first_key_value()?;
        if deadline > now {
            return None;
        }
        let key = self.by_deadline.remove(&(deadline, id))?;
        self.deadlines.remove(&id);
        Some(Expired { id, deadline, key })
    }

    #[must_use]
    pub fn contains(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.deadlines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }

    pub fn clear(&mut self) {
        self.by_deadline.clear();
        self.deadlines.clear();
    }
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}
