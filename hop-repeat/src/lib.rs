//! Hold-to-repeat jump accumulation for HOP
//!
//! This module turns bursts of discrete jump presses into one accelerating
//! seek gesture:
//! - RepeatState: per-direction accumulator with a debounced reset timer
//! - Timer: the scheduling seam, with virtual and real-time services
//! - JumpAction: the collaborator that performs the actual seek
//! - JumpRepeater: owns both directions and serializes presses and expiries

mod action;
mod direction;
mod repeater;
mod state;
pub mod timer;

pub use action::{JumpAction, JumpError};
pub use direction::Direction;
pub use repeater::{JumpRepeater, RepeatEvent};
pub use state::{RepeatPhase, RepeatState, DEFAULT_REPEAT_WINDOW};
pub use timer::{Expiry, ManualTimers, ThreadTimers, TimerHandle, TimerService};
