//! Jump directions

/// Direction of a jump press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Fixed direction vector handed to the jump action alongside the magnitude
    pub fn unit_point(&self) -> (f32, f32) {
        match self {
            Direction::Forward => (1.0, 0.0),
            Direction::Backward => (0.0, 0.0),
        }
    }

    /// Seek sign: +1 moves the playhead forward, -1 backward
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }

    /// Get display name for the direction
    pub fn display_name(&self) -> &'static str {
        match self {
            Direction::Forward => "FWD",
            Direction::Backward => "BWD",
        }
    }
}
