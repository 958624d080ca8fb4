//! Virtual-time scheduler owned by each engine.
//!
//! A [`Timeline`] is a clock plus the set of timers an engine has scheduled.
//! Time only moves when the host advances it, so a real-time front end feeds
//! in wall-clock deltas while tests feed in exact durations.
//!
//! Each timer carries an engine-defined event value. Firing is pull-based:
//! the engine asks for the next due timer and handles it, which keeps every
//! transition on the engine's own `&mut self` and leaves nothing to orphan.
//!
//! ```
//! use std::time::Duration;
//! use eduplay_games::core::Timeline;
//!
//! let mut timers = Timeline::new();
//! let tick = timers.schedule_in(Duration::from_secs(1), "tick");
//! timers.schedule_in(Duration::from_millis(500), "flash");
//! assert!(timers.cancel(tick));
//!
//! let until = Duration::from_secs(2);
//! assert_eq!(timers.pop_due(until), Some("flash"));
//! assert_eq!(timers.pop_due(until), None);
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Handle to a scheduled timer.
///
/// Ids are allocated in increasing order, which also orders timers that
/// share a deadline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerId(pub u64);

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

/// A clock and its pending timers.
#[derive(Clone, Debug)]
pub struct Timeline<E> {
    now: Duration,
    next_id: u64,
    queue: BTreeMap<(Duration, TimerId), E>,
    deadlines: FxHashMap<TimerId, Duration>,
}

impl<E> Default for Timeline<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Timeline<E> {
    /// Create an empty timeline at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            queue: BTreeMap::new(),
            deadlines: FxHashMap::default(),
        }
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of timers still pending.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Deadline of the earliest pending timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Is this timer still pending?
    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id)
    }

    /// Schedule `event` to fire `delay` after the current time.
    pub fn schedule_in(&mut self, delay: Duration, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let deadline = self.now + delay;
        self.queue.insert((deadline, id), event);
        self.deadlines.insert(id, deadline);
        id
    }

    /// Cancel a timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.deadlines.remove(&id) {
            Some(deadline) => self.queue.remove(&(deadline, id)).is_some(),
            None => false,
        }
    }

    /// Cancel every pending timer, returning how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.queue.len();
        self.queue.clear();
        self.deadlines.clear();
        dropped
    }

    /// Pop the earliest timer due at or before `until`.
    ///
    /// The clock moves to that timer's deadline, so anything the handler
    /// schedules is measured from the moment the timer fired.
    pub fn pop_due(&mut self, until: Duration) -> Option<E> {
        let (&(deadline, id), _) = self.queue.first_key_value()?;
        if deadline > until {
            return None;
        }
        self.deadlines.remove(&id);
        let event = self.queue.remove(&(deadline, id))?;
        self.now = self.now.max(deadline);
        Some(event)
    }

    /// Move the clock to `until` once nothing more is due.
    pub fn settle(&mut self, until: Duration) {
        debug_assert!(
            self.next_deadline().map_or(true, |d| d > until),
            "settle called with due timers"
        );
        self.now = self.now.max(until);
    }
}
