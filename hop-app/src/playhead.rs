//! Simulated playhead - turns jump magnitudes into seeks

use hop_repeat::{Direction, JumpError};

/// Result of one applied jump
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Seek {
    pub direction: Direction,
    pub magnitude: u32,
    /// Signed offset requested, in seconds
    pub offset: f64,
    /// Playhead position after clamping, in seconds
    pub position: f64,
    pub length: f64,
}

/// Playhead over a loaded media item
#[derive(Debug)]
pub struct Playhead {
    position: f64,
    length: Option<f64>,
    forward_step: f64,
    backward_step: f64,
}

impl Playhead {
    pub fn new(forward_step: f64, backward_step: f64) -> Self {
        Self {
            position: 0.0,
            length: None,
            forward_step,
            backward_step,
        }
    }

    /// Load media of the given length and rewind
    pub fn load(&mut self, length_secs: f64) {
        self.length = Some(length_secs.max(0.0));
        self.position = 0.0;
    }

    /// Signed seek offset for `magnitude` steps in `direction`
    pub fn offset_for(&self, direction: Direction, magnitude: u32) -> f64 {
        let step = match direction {
            Direction::Forward => self.forward_step,
            Direction::Backward => self.backward_step,
        };
        direction.sign() * step * f64::from(magnitude)
    }

    /// Jump relative to the current position, clamped to the media
    pub fn seek(&mut self, direction: Direction, magnitude: u32) -> Result<Seek, JumpError> {
        let length = self.length.ok_or(JumpError::NoMedia)?;
        let offset = self.offset_for(direction, magnitude);
        self.position = (self.position + offset).clamp(0.0, length);

        tracing::info!(
            direction = direction.display_name(),
            magnitude,
            offset,
            position = self.position,
            "seek"
        );

        Ok(Seek {
            direction,
            magnitude,
            offset,
            position: self.position,
            length,
        })
    }
}

/// Format seconds as H:MM:SS
pub fn format_time(secs: f64) -> String {
    let total = secs.max(0.0) as u64;
    format!("{}:{:02}:{:02}", total / 3600, (total / 60) % 60, total % 60)
}
