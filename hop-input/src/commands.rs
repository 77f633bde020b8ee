//! Command definitions for HOP

pub use hop_repeat::Direction;

/// Commands that can be dispatched from input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// One press of a jump key
    Jump(Direction),

    // Application
    Quit,
}
