//! Per-direction repeat accumulator
//!
//! Each press inside the repeat window grows the jump magnitude by one; the
//! window restarts on every press, and the accumulator returns to idle once
//! input pauses for a full window.

use std::time::{Duration, Instant};

use crate::direction::Direction;
use crate::timer::{TimerHandle, TimerService};

/// Default repeat window
pub const DEFAULT_REPEAT_WINDOW: Duration = Duration::from_secs(2);

/// Observable accumulator state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatPhase {
    #[default]
    Idle,
    /// Presses accumulated in the open window (always >= 1)
    Active(u32),
}

/// The reset timer armed by the most recent press
#[derive(Debug, Clone, Copy)]
struct PendingReset {
    handle: TimerHandle,
    deadline: Instant,
}

/// Repeat state for one jump direction
///
/// `pending` is `Some` exactly while a window is open, and `count` is
/// non-zero exactly while `pending` is `Some`.
#[derive(Debug)]
pub struct RepeatState {
    direction: Direction,
    window: Duration,
    count: u32,
    pending: Option<PendingReset>,
}

impl RepeatState {
    /// Create an idle accumulator
    pub fn new(direction: Direction, window: Duration) -> Self {
        Self {
            direction,
            window,
            count: 0,
            pending: None,
        }
    }

    /// Presses accumulated in the current window (0 when idle)
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn phase(&self) -> RepeatPhase {
        match self.pending {
            Some(_) => RepeatPhase::Active(self.count),
            None => RepeatPhase::Idle,
        }
    }

    /// Handle of the outstanding reset timer, if any
    pub fn pending_reset(&self) -> Option<TimerHandle> {
        self.pending.map(|p| p.handle)
    }

    /// Register a press happening now and return the jump magnitude for it
    pub fn press<T>(&mut self, timers: &mut T) -> u32
    where
        T: TimerService + ?Sized,
    {
        let now = timers.now();
        self.press_at(now, timers)
    }

    /// Register a press that happened at `at` and return its jump magnitude.
    ///
    /// The previous reset is cancelled before the new one is armed, and the
    /// new window runs from `at`. A press stamped inside the open window
    /// continues the gesture even when it is handled after the deadline; a
    /// press stamped at or past the deadline starts a new gesture.
    pub fn press_at<T>(&mut self, at: Instant, timers: &mut T) -> u32
    where
        T: TimerService + ?Sized,
    {
        if let Some(previous) = self.pending.take() {
            timers.cancel(previous.handle);
            if at >= previous.deadline {
                tracing::debug!(
                    direction = self.direction.display_name(),
                    count = self.count,
                    "press landed on an elapsed window, restarting"
                );
                self.count = 0;
            }
        }

        self.count = self.count.saturating_add(1);
        let deadline = at + self.window;
        let after = deadline.saturating_duration_since(timers.now());
        let handle = timers.schedule(after, self.direction);
        self.pending = Some(PendingReset { handle, deadline });

        tracing::debug!(
            direction = self.direction.display_name(),
            magnitude = self.count,
            "jump press"
        );
        self.count
    }

    /// Apply a reset timer expiry.
    ///
    /// Returns true if `handle` was the pending reset and the accumulator is
    /// now idle. Superseded or unknown handles leave the state untouched.
    pub fn fire(&mut self, handle: TimerHandle) -> bool {
        match self.pending {
            Some(pending) if pending.handle == handle => {
                tracing::debug!(
                    direction = self.direction.display_name(),
                    count = self.count,
                    "repeat window closed"
                );
                self.pending = None;
                self.count = 0;
                true
            }
            _ => {
                tracing::trace!(
                    direction = self.direction.display_name(),
                    handle = handle.id(),
                    "ignoring stale reset"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::ManualTimers;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn forward() -> RepeatState {
        RepeatState::new(Direction::Forward, DEFAULT_REPEAT_WINDOW)
    }

    /// Advance the clock and feed every due expiry back into `state`
    fn advance(state: &mut RepeatState, timers: &mut ManualTimers, by: Duration) -> usize {
        timers
            .advance(by)
            .into_iter()
            .filter(|e| state.fire(e.handle))
            .count()
    }

    #[test]
    fn test_starts_idle() {
        let state = forward();
        assert_eq!(state.phase(), RepeatPhase::Idle);
        assert_eq!(state.count(), 0);
        assert!(state.pending_reset().is_none());
    }

    #[test]
    fn test_single_press() {
        let mut timers = ManualTimers::new();
        let mut state = forward();

        assert_eq!(state.press(&mut timers), 1);
        assert_eq!(state.phase(), RepeatPhase::Active(1));
        assert_eq!(timers.pending(), 1);
        assert!(timers.is_armed(state.pending_reset().unwrap()));
    }

    #[test]
    fn test_rapid_sequence_grows_magnitude() {
        let mut timers = ManualTimers::new();
        let mut state = forward();

        let mut magnitudes = Vec::new();
        for _ in 0..5 {
            magnitudes.push(state.press(&mut timers));
            assert_eq!(advance(&mut state, &mut timers, ms(1900)), 0);
        }

        assert_eq!(magnitudes, vec![1, 2, 3, 4, 5]);
        assert_eq!(state.phase(), RepeatPhase::Active(5));
        assert_eq!(timers.pending(), 1);
    }

    #[test]
    fn test_resets_after_window() {
        let mut timers = ManualTimers::new();
        let mut state = forward();

        state.press(&mut timers);
        state.press(&mut timers);
        assert_eq!(advance(&mut state, &mut timers, ms(1999)), 0);
        assert_eq!(state.phase(), RepeatPhase::Active(2));

        assert_eq!(advance(&mut state, &mut timers, ms(1)), 1);
        assert_eq!(state.phase(), RepeatPhase::Idle);
        assert_eq!(state.count(), 0);
        assert!(state.pending_reset().is_none());
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_new_gesture_after_reset() {
        let mut timers = ManualTimers::new();
        let mut state = forward();

        state.press(&mut timers);
        state.press(&mut timers);
        advance(&mut state, &mut timers, ms(2500));

        assert_eq!(state.press(&mut timers), 1);
    }

    #[test]
    fn test_window_measured_from_latest_press() {
        let mut timers = ManualTimers::new();
        let mut state = forward();

        // t=0, t=0.5, t=1.0
        assert_eq!(state.press(&mut timers), 1);
        advance(&mut state, &mut timers, ms(500));
        assert_eq!(state.press(&mut timers), 2);
        advance(&mut state, &mut timers, ms(500));
        assert_eq!(state.press(&mut timers), 3);

        // First press's deadline (t=2.0) passes without a reset
        assert_eq!(advance(&mut state, &mut timers, ms(1000)), 0);
        assert_eq!(state.phase(), RepeatPhase::Active(3));
        assert_eq!(advance(&mut state, &mut timers, ms(999)), 0);
        assert_eq!(state.phase(), RepeatPhase::Active(3));

        // t=3.0
        assert_eq!(advance(&mut state, &mut timers, ms(1)), 1);
        assert_eq!(state.phase(), RepeatPhase::Idle);
    }

    #[test]
    fn test_stale_handle_ignored() {
        let mut timers = ManualTimers::new();
        let mut state = forward();

        state.press(&mut timers);
        let stale = state.pending_reset().unwrap();
        state.press(&mut timers);

        assert!(!timers.is_armed(stale));
        assert!(!state.fire(stale));
        assert_eq!(state.phase(), RepeatPhase::Active(2));
    }

    #[test]
    fn test_fire_while_idle_is_noop() {
        let mut timers = ManualTimers::new();
        let mut state = forward();

        state.press(&mut timers);
        let handle = state.pending_reset().unwrap();
        assert!(state.fire(handle));
        // Duplicate delivery
        assert!(!state.fire(handle));
        assert_eq!(state.phase(), RepeatPhase::Idle);
    }

    #[test]
    fn test_press_at_deadline_after_reset_restarts() {
        let mut timers = ManualTimers::new();
        let mut state = forward();

        state.press(&mut timers);
        state.press(&mut timers);
        // Expiry at exactly t=W is delivered before the press at t=W
        assert_eq!(advance(&mut state, &mut timers, DEFAULT_REPEAT_WINDOW), 1);
        assert_eq!(state.press(&mut timers), 1);
    }

    #[test]
    fn test_late_handled_press_inside_window_continues() {
        let mut timers = ManualTimers::new();
        let mut state = forward();

        state.press(&mut timers);
        advance(&mut state, &mut timers, ms(1000));
        let stamped = timers.now();

        // The expiry comes due while the t=1.0 press is still queued ahead of it
        let in_flight = timers.advance(ms(1500));
        assert_eq!(in_flight.len(), 1);
        assert_eq!(state.press_at(stamped, &mut timers), 2);

        // The expiry belongs to the superseded window
        assert!(!state.fire(in_flight[0].handle));
        assert_eq!(state.phase(), RepeatPhase::Active(2));
        assert_eq!(timers.pending(), 1);

        // New window runs from the press stamp (t=3.0), not from handling time
        assert!(timers.advance_to(ms(2999)).is_empty());
        let due = timers.advance_to(ms(3000));
        assert_eq!(due.len(), 1);
        assert!(state.fire(due[0].handle));
        assert_eq!(state.phase(), RepeatPhase::Idle);
    }

    #[test]
    fn test_press_stamped_at_deadline_restarts() {
        let mut timers = ManualTimers::new();
        let mut state = forward();

        state.press(&mut timers);
        state.press(&mut timers);
        let deadline = timers.now() + DEFAULT_REPEAT_WINDOW;

        // Expiry still queued when the press stamped at the deadline is handled
        let in_flight = timers.advance(DEFAULT_REPEAT_WINDOW);
        assert_eq!(in_flight.len(), 1);
        assert_eq!(state.press_at(deadline, &mut timers), 1);

        assert!(!state.fire(in_flight[0].handle));
        assert_eq!(state.phase(), RepeatPhase::Active(1));
        assert_eq!(timers.pending(), 1);
    }

    #[test]
    fn test_magnitude_saturates() {
        let mut timers = ManualTimers::new();
        let mut state = forward();

        state.press(&mut timers);
        state.count = u32::MAX;
        assert_eq!(state.press(&mut timers), u32::MAX);
        assert_eq!(state.phase(), RepeatPhase::Active(u32::MAX));
        assert_eq!(timers.pending(), 1);
    }

    #[test]
    fn test_custom_window() {
        let mut timers = ManualTimers::new();
        let mut state = RepeatState::new(Direction::Backward, ms(300));

        state.press(&mut timers);
        advance(&mut state, &mut timers, ms(299));
        assert_eq!(state.press(&mut timers), 2);
        assert_eq!(advance(&mut state, &mut timers, ms(300)), 1);
        assert_eq!(state.phase(), RepeatPhase::Idle);
    }
}
