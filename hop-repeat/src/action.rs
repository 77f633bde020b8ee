//! Jump action collaborator

use thiserror::Error;

use crate::direction::Direction;

/// Errors a jump action may report back
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JumpError {
    #[error("No media loaded")]
    NoMedia,
    #[error("Jump rejected: {0}")]
    Rejected(String),
}

/// Performs the seek for an accumulated jump
pub trait JumpAction {
    /// Jump `magnitude` steps in `direction`
    fn jump(&mut self, direction: Direction, magnitude: u32) -> Result<(), JumpError>;
}

impl<F> JumpAction for F
where
    F: FnMut(Direction, u32) -> Result<(), JumpError>,
{
    fn jump(&mut self, direction: Direction, magnitude: u32) -> Result<(), JumpError> {
        self(direction, magnitude)
    }
}
