// Scheduler - deterministic timer queue for page components
//
// Components never sleep or spawn timers of their own. They schedule a
// payload here and get it back when the event loop reaches its deadline.
// Time is supplied by the caller as a Duration since some origin, which
// keeps every component testable without touching the wall clock.
//
//   schedule(delay, p) ──▶ [pending, ordered by (deadline, id)]
//                                   │
//   next_due(until) ◀───────────────┘  pops one entry, clock := deadline
//
// Handling a popped entry may schedule more timers; because the clock sits
// at the fired deadline, those are relative to the fire time, not to
// `until`. This matters when the loop wakes late and drains several steps.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Handle for a scheduled callback, used to cancel it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Single-threaded timer queue
#[derive(Debug)]
pub struct Scheduler<T> {
    /// Current logical time
    now: Duration,
    /// Id for the next scheduled timer (monotonic, also breaks deadline ties)
    next_id: u64,
    /// Pending timers ordered by deadline, then scheduling order
    pending: BTreeMap<(Duration, TimerId), T>,
    /// Deadline lookup for cancellation
    deadlines: HashMap<TimerId, Duration>,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            pending: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }

    /// Current logical time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `payload` to fire `delay` after the current logical time
    pub fn schedule(&mut self, delay: Duration, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;

        let deadline = self.now + delay;
        self.pending.insert((deadline, id), payload);
        self.deadlines.insert(id, deadline);
        id
    }

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.deadlines.remove(&id) {
            Some(deadline) => self.pending.remove(&(deadline, id)).is_some(),
            None => false,
        }
    }

    /// Whether a timer is still waiting to fire
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id)
    }

    /// Deadline of the earliest pending timer
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Number of pending timers
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pop the earliest timer due at or before `until`
    ///
    /// On a hit the clock moves to that timer's deadline. When nothing is due
    /// the clock moves to `until` (never backwards) and `None` is returned,
    /// so `while let Some(p) = s.next_due(t)` drains everything up to `t`.
    pub fn next_due(&mut self, until: Duration) -> Option<T> {
        let due = self
            .pending
            .keys()
            .next()
            .copied()
            .filter(|(deadline, _)| *deadline <= until);

        match due {
            Some(key) => {
                let (deadline, id) = key;
                self.deadlines.remove(&id);
                self.now = self.now.max(deadline);
                self.pending.remove(&key)
            }
            None => {
                self.now = self.now.max(until);
                None
            }
        }
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_fires_in_deadline_order() {
        let mut s = Scheduler::new();
        s.schedule(ms(30), "c");
        s.schedule(ms(10), "a");
        s.schedule(ms(20), "b");

        let mut fired = Vec::new();
        while let Some(p) = s.next_due(ms(100)) {
            fired.push(p);
        }
        assert_eq!(fired, vec!["a", "b", "c"]);
        assert_eq!(s.now(), ms(100));
    }

    #[test]
    fn test_ties_fire_in_scheduling_order() {
        let mut s = Scheduler::new();
        s.schedule(ms(10), 1);
        s.schedule(ms(10), 2);
        s.schedule(ms(10), 3);

        assert_eq!(s.next_due(ms(10)), Some(1));
        assert_eq!(s.next_due(ms(10)), Some(2));
        assert_eq!(s.next_due(ms(10)), Some(3));
        assert_eq!(s.next_due(ms(10)), None);
    }

    #[test]
    fn test_not_due_yet() {
        let mut s = Scheduler::new();
        s.schedule(ms(50), ());
        assert_eq!(s.next_due(ms(49)), None);
        assert_eq!(s.now(), ms(49));
        assert_eq!(s.next_due(ms(50)), Some(()));
    }

    #[test]
    fn test_cancel_removes_pending() {
        let mut s = Scheduler::new();
        let id = s.schedule(ms(10), "x");
        assert!(s.is_pending(id));
        assert!(s.cancel(id));
        assert!(!s.is_pending(id));
        assert!(!s.cancel(id));
        assert_eq!(s.next_due(ms(100)), None);
        assert!(s.is_empty());
    }

    #[test]
    fn test_cancel_after_fire_is_noop() {
        let mut s = Scheduler::new();
        let id = s.schedule(ms(10), "x");
        assert_eq!(s.next_due(ms(10)), Some("x"));
        assert!(!s.cancel(id));
    }

    #[test]
    fn test_chained_schedule_is_relative_to_fire_time() {
        let mut s = Scheduler::new();
        s.schedule(ms(10), 0u32);

        // Loop woke late at 35ms; chained steps of 10ms should land at 20 and 30
        let mut fire_times = Vec::new();
        while let Some(n) = s.next_due(ms(35)) {
            fire_times.push(s.now());
            if n < 5 {
                s.schedule(ms(10), n + 1);
            }
        }
        assert_eq!(fire_times, vec![ms(10), ms(20), ms(30)]);
        assert_eq!(s.next_deadline(), Some(ms(40)));
    }

    #[test]
    fn test_clock_never_moves_backwards() {
        let mut s: Scheduler<()> = Scheduler::new();
        s.next_due(ms(100));
        s.next_due(ms(50));
        assert_eq!(s.now(), ms(100));
    }
}
