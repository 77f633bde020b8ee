//! Jump repeater - owns both directional accumulators
//!
//! Presses and timer expiries for both directions flow through one
//! `JumpRepeater`, which handles them strictly in arrival order.

use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;

use crate::action::JumpAction;
use crate::direction::Direction;
use crate::state::{RepeatPhase, RepeatState, DEFAULT_REPEAT_WINDOW};
use crate::timer::{Expiry, ManualTimers, TimerService};

/// Events consumed by the repeater loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatEvent {
    /// A jump key was pressed, stamped when the key was read
    Press(Direction, Instant),
    /// A reset timer came due
    Expired(Expiry),
    /// Stop the event loop
    Shutdown,
}

impl From<Expiry> for RepeatEvent {
    fn from(expiry: Expiry) -> Self {
        RepeatEvent::Expired(expiry)
    }
}

/// Forward and backward accumulators sharing one timer service and jump action
pub struct JumpRepeater<T, A> {
    forward: RepeatState,
    backward: RepeatState,
    timers: T,
    action: A,
}

impl<T, A> JumpRepeater<T, A>
where
    T: TimerService,
    A: JumpAction,
{
    /// Create a repeater with the default 2 second window
    pub fn new(timers: T, action: A) -> Self {
        Self::with_window(DEFAULT_REPEAT_WINDOW, timers, action)
    }

    pub fn with_window(window: Duration, timers: T, action: A) -> Self {
        Self {
            forward: RepeatState::new(Direction::Forward, window),
            backward: RepeatState::new(Direction::Backward, window),
            timers,
            action,
        }
    }

    pub fn state(&self, direction: Direction) -> &RepeatState {
        match direction {
            Direction::Forward => &self.forward,
            Direction::Backward => &self.backward,
        }
    }

    pub fn phase(&self, direction: Direction) -> RepeatPhase {
        self.state(direction).phase()
    }

    pub fn timers(&self) -> &T {
        &self.timers
    }

    /// Register a press happening now
    pub fn press(&mut self, direction: Direction) -> u32 {
        let now = self.timers.now();
        self.press_at(direction, now)
    }

    /// Register a press that happened at `at` and hand the resulting magnitude
    /// to the jump action.
    ///
    /// The accumulator is updated before the action runs; an action error is
    /// logged and does not touch repeat state.
    pub fn press_at(&mut self, direction: Direction, at: Instant) -> u32 {
        let state = match direction {
            Direction::Forward => &mut self.forward,
            Direction::Backward => &mut self.backward,
        };
        let magnitude = state.press_at(at, &mut self.timers);
        tracing::trace!(unit_point = ?direction.unit_point(), magnitude, "dispatching jump");

        if let Err(err) = self.action.jump(direction, magnitude) {
            tracing::warn!(
                direction = direction.display_name(),
                magnitude,
                "jump failed: {}",
                err
            );
        }
        magnitude
    }

    /// Route a timer expiry to its accumulator. Returns true if it reset.
    pub fn expire(&mut self, expiry: Expiry) -> bool {
        match expiry.direction {
            Direction::Forward => self.forward.fire(expiry.handle),
            Direction::Backward => self.backward.fire(expiry.handle),
        }
    }

    /// Process one event, returning the jump magnitude for presses
    pub fn handle(&mut self, event: RepeatEvent) -> Option<u32> {
        match event {
            RepeatEvent::Press(direction, at) => Some(self.press_at(direction, at)),
            RepeatEvent::Expired(expiry) => {
                self.expire(expiry);
                None
            }
            RepeatEvent::Shutdown => None,
        }
    }

    /// Drain `events` in order until `Shutdown` or every sender is gone
    pub fn run(&mut self, events: &Receiver<RepeatEvent>) {
        for event in events.iter() {
            if event == RepeatEvent::Shutdown {
                tracing::debug!("repeater loop shutting down");
                break;
            }
            self.handle(event);
        }
    }
}

impl<A> JumpRepeater<ManualTimers, A>
where
    A: JumpAction,
{
    /// Advance virtual time and apply every reset that came due.
    ///
    /// Returns the number of accumulators that went idle.
    pub fn advance(&mut self, by: Duration) -> usize {
        let due = self.timers.advance(by);
        due.into_iter().filter(|e| self.expire(*e)).count()
    }
}
