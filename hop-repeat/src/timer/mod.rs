//! Reset timer scheduling
//!
//! Accumulators never own a clock. They arm and disarm one-shot timers through
//! [`TimerService`], and expiries come back to the owner as [`Expiry`] values
//! on the same sequential context that handles presses.

mod manual;
mod thread;

use std::time::{Duration, Instant};

use crate::direction::Direction;

pub use manual::ManualTimers;
pub use thread::ThreadTimers;

/// Opaque handle to a scheduled reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw id, monotonically increasing per service
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// A timer that reached its deadline without being cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expiry {
    pub handle: TimerHandle,
    /// Accumulator the timer resets
    pub direction: Direction,
    pub deadline: Instant,
}

/// Scheduling capability used by the accumulators
pub trait TimerService {
    /// Current time on this service's monotonic clock
    fn now(&self) -> Instant;

    /// Arm a one-shot timer that expires `after` from now
    fn schedule(&mut self, after: Duration, direction: Direction) -> TimerHandle;

    /// Disarm a timer.
    ///
    /// Unknown, fired, or already cancelled handles are a no-op. Once this
    /// returns the service emits no expiry for `handle`. An expiry emitted
    /// before the call may still sit in the owner's queue; accumulators treat
    /// it as stale.
    fn cancel(&mut self, handle: TimerHandle);
}

/// Pending timer entry, ordered by deadline then scheduling order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Scheduled {
    pub deadline: Instant,
    pub handle: TimerHandle,
    pub direction: Direction,
}

impl Scheduled {
    pub fn expiry(&self) -> Expiry {
        Expiry {
            handle: self.handle,
            direction: self.direction,
            deadline: self.deadline,
        }
    }
}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.deadline
            .cmp(&other.deadline)
            .then(self.handle.cmp(&other.handle))
    }
}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
