//! Frame history.
//!
//! The simulation publishes discrete frames at tick boundaries. A renderer
//! running at its own rate interpolates the camera pose between the two most
//! recent frames.

use std::collections::VecDeque;

use combat_character::FrameOutput;
use combat_shared::{camera::CameraPose, math::ease_scalar};

/// Bounded history of published frames.
#[derive(Default)]
pub struct FrameHistory {
    history: VecDeque<FrameOutput>,
    max: usize,
}

impl FrameHistory {
    pub fn new(max: usize) -> Self {
        Self {
            history: VecDeque::new(),
            max,
        }
    }

    pub fn push(&mut self, frame: FrameOutput) {
        self.history.push_back(frame);
        while self.history.len() > self.max {
            self.history.pop_front();
        }
    }

    /// Returns the number of buffered frames.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Returns true if no frames are buffered.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn last_frame(&self) -> Option<&FrameOutput> {
        self.history.back()
    }

    /// Camera pose between the previous and latest frame.
    ///
    /// `alpha` should be in $[0,1]$ where 0 = older frame, 1 = newer.
    /// Rotation is taken from the newer frame.
    pub fn interp_camera(&self, alpha: f32) -> Option<CameraPose> {
        if self.history.len() < 2 {
            return None;
        }
        let a = &self.history[self.history.len() - 2].camera;
        let b = &self.history[self.history.len() - 1].camera;
        Some(CameraPose {
            arm_length: ease_scalar(a.arm_length, b.arm_length, alpha),
            socket_offset: a.socket_offset.lerp(b.socket_offset, alpha),
            rotation: b.rotation,
        })
    }
}
