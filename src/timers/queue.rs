//! Virtual-clock timer queue.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Tags every session instance. Deferred actions remember the generation
/// they were scheduled under and are discarded if it is no longer current.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Generation(pub u64);

impl Generation {
    /// Create a new generation.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// The generation that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Gen({})", self.0)
    }
}

/// Unique identifier for a scheduled timer. Also breaks ties between timers
/// due at the same instant, so they fire in scheduling order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(pub u64);

/// A scheduled deferred action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer<A> {
    /// Unique identifier.
    pub id: TimerId,

    /// Clock reading (ms) at which the action fires.
    pub due_at: u64,

    /// Session generation captured when scheduled.
    pub generation: Generation,

    /// What to do when it fires.
    pub action: A,
}

/// Ordered queue of deferred actions on a host-driven clock.
///
/// Nothing fires on its own: the host moves the clock forward and drains
/// what has come due.
///
/// ```
/// use memory_match::timers::{Generation, TimerQueue};
///
/// let mut queue = TimerQueue::new();
/// queue.schedule(500, Generation::new(1), "confirm");
/// queue.schedule(100, Generation::new(1), "early");
///
/// assert_eq!(queue.pop_due(100).map(|t| t.action), Some("early"));
/// assert!(queue.pop_due(499).is_none());
/// assert_eq!(queue.pop_due(500).map(|t| t.action), Some("confirm"));
/// ```
#[derive(Clone, Debug)]
pub struct TimerQueue<A> {
    now: u64,
    next_id: u64,
    entries: BTreeMap<(u64, TimerId), Timer<A>>,
}

impl<A> Default for TimerQueue<A> {
    fn default() -> Self {
        Self {
            now: 0,
            next_id: 0,
            entries: BTreeMap::new(),
        }
    }
}

impl<A> TimerQueue<A> {
    /// Create an empty queue with the clock at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock reading in ms.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Number of outstanding timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Are there no outstanding timers?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// When the earliest outstanding timer fires.
    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.entries.keys().next().map(|&(due_at, _)| due_at)
    }

    /// Schedule `action` to fire `delay_ms` after the current clock reading.
    pub fn schedule(&mut self, delay_ms: u64, generation: Generation, action: A) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let due_at = self.now.saturating_add(delay_ms);
        self.entries.insert(
            (due_at, id),
            Timer {
                id,
                due_at,
                generation,
                action,
            },
        );
        id
    }

    /// Remove and return the earliest timer due at or before `until`,
    /// moving the clock to its due time.
    pub fn pop_due(&mut self, until: u64) -> Option<Timer<A>> {
        let &(due_at, _) = self.entries.keys().next()?;
        if due_at > until {
            return None;
        }
        let (_, timer) = self.entries.pop_first()?;
        self.now = self.now.max(timer.due_at);
        Some(timer)
    }

    /// Move the clock forward. Never moves it backwards.
    pub fn advance_clock(&mut self, to: u64) {
        self.now = self.now.max(to);
    }

    /// Drop every timer scheduled under `generation`. Returns how many.
    pub fn cancel_generation(&mut self, generation: Generation) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, timer| timer.generation != generation);
        before - self.entries.len()
    }
}
