//! Camera rig abstraction.
//!
//! This crate intentionally does not depend on a graphics backend.
//! A rig receives the resolved boom pose once per tick.

use serde::{Deserialize, Serialize};

use crate::math::{Rotator, Vec3};

/// Resolved camera boom state for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct CameraPose {
    pub arm_length: f32,
    pub socket_offset: Vec3,
    pub rotation: Rotator,
}

/// A minimal camera rig API.
pub trait CameraRig: Send + Sync {
    fn apply(&mut self, pose: &CameraPose);
}

/// A no-op rig useful for headless runs.
#[derive(Default)]
pub struct NullCameraRig;

impl CameraRig for NullCameraRig {
    fn apply(&mut self, _pose: &CameraPose) {}
}

/// Keeps the most recent pose and how many were applied.
#[derive(Debug, Default)]
pub struct RecordingCameraRig {
    last: Option<CameraPose>,
    applied: u64,
}

impl RecordingCameraRig {
    pub fn last(&self) -> Option<&CameraPose> {
        self.last.as_ref()
    }

    pub fn applied(&self) -> u64 {
        self.applied
    }
}

impl CameraRig for RecordingCameraRig {
    fn apply(&mut self, pose: &CameraPose) {
        self.last = Some(*pose);
        self.applied += 1;
    }
}
