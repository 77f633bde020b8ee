//! Virtual-clock timer service
//!
//! Time only moves when the owner calls [`ManualTimers::advance`], which makes
//! gesture timing reproducible down to the exact deadline.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use super::{Expiry, Scheduled, TimerHandle, TimerService};
use crate::direction::Direction;

/// Deterministic timer service driven by explicit clock advances
#[derive(Debug)]
pub struct ManualTimers {
    origin: Instant,
    elapsed: Duration,
    next_id: u64,
    queue: BTreeSet<Scheduled>,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Duration::ZERO,
            next_id: 0,
            queue: BTreeSet::new(),
        }
    }

    /// Virtual time since the service was created
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of armed timers
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Check whether a handle is still armed
    pub fn is_armed(&self, handle: TimerHandle) -> bool {
        self.queue.iter().any(|s| s.handle == handle)
    }

    /// Move the clock forward by `by` and collect every timer that came due
    pub fn advance(&mut self, by: Duration) -> Vec<Expiry> {
        self.advance_to(self.elapsed + by)
    }

    /// Move the clock to `elapsed` since creation and collect due timers.
    ///
    /// Expiries come out in deadline order, ties in scheduling order. A
    /// deadline equal to the new time counts as due. The clock never moves
    /// backwards.
    pub fn advance_to(&mut self, elapsed: Duration) -> Vec<Expiry> {
        self.elapsed = self.elapsed.max(elapsed);
        let now = self.now();

        let mut due = Vec::new();
        while let Some(first) = self.queue.first().copied() {
            if first.deadline > now {
                break;
            }
            self.queue.pop_first();
            due.push(first.expiry());
        }
        due
    }
}

impl Default for ManualTimers {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerService for ManualTimers {
    fn now(&self) -> Instant {
        self.origin + self.elapsed
    }

    fn schedule(&mut self, after: Duration, direction: Direction) -> TimerHandle {
        let handle = TimerHandle::new(self.next_id);
        self.next_id += 1;
        self.queue.insert(Scheduled {
            deadline: self.now() + after,
            handle,
            direction,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.queue.retain(|s| s.handle != handle);
    }
}
