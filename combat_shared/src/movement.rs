//! Movement abstraction.
//!
//! The character decides *how fast* and *which way*; an integrator decides
//! where the body actually ends up. `KinematicMover` is a collision-free
//! reference integrator for hosts and tests.

use serde::{Deserialize, Serialize};

use crate::{config::MovementTuning, math::Vec3};

/// Per-tick movement request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct MovementCommand {
    /// Speed cap for this tick.
    pub max_speed: f32,
    /// Accumulated forward input.
    pub forward_axis: f32,
    /// Accumulated right input.
    pub right_axis: f32,
    /// World-space forward derived from controller yaw.
    pub forward: Vec3,
    /// World-space right derived from controller yaw.
    pub right: Vec3,
}

impl MovementCommand {
    /// World-space input vector, magnitude clamped to 1.
    pub fn wish_vector(&self) -> Vec3 {
        let wish = self.forward * self.forward_axis + self.right * self.right_axis;
        if wish.len_sq() > 1.0 {
            wish.normalized_or_zero()
        } else {
            wish
        }
    }
}

/// Movement integrator trait.
pub trait MovementIntegrator: Send + Sync {
    /// Advances the body. `None` means the character is not steering this tick.
    fn apply(&mut self, cmd: Option<&MovementCommand>, dt_sec: f32);
    /// Current velocity as observed by the character at the next tick.
    fn velocity(&self) -> Vec3;
}

/// No-op integrator; the body never moves.
#[derive(Default)]
pub struct NullMover;

impl MovementIntegrator for NullMover {
    fn apply(&mut self, _cmd: Option<&MovementCommand>, _dt_sec: f32) {}

    fn velocity(&self) -> Vec3 {
        Vec3::ZERO
    }
}

/// Ground-plane integrator with acceleration and braking.
#[derive(Debug, Clone, Default)]
pub struct KinematicMover {
    tuning: MovementTuning,
    position: Vec3,
    velocity: Vec3,
}

impl KinematicMover {
    pub fn new(tuning: MovementTuning) -> Self {
        Self {
            tuning,
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    fn accelerate(&mut self, desired: Vec3, dt_sec: f32) {
        let delta = desired - self.velocity;
        let step = self.tuning.max_acceleration * dt_sec;
        if delta.len() <= step {
            self.velocity = desired;
        } else {
            self.velocity += delta.normalized_or_zero() * step;
        }
    }

    fn brake(&mut self, dt_sec: f32) {
        let speed = self.velocity.len();
        let remaining = speed - self.tuning.braking_deceleration * dt_sec;
        if remaining <= 0.0 {
            // Exact zero: the character reads "idle" from it.
            self.velocity = Vec3::ZERO;
        } else {
            self.velocity = self.velocity * (remaining / speed);
        }
    }
}

impl MovementIntegrator for KinematicMover {
    fn apply(&mut self, cmd: Option<&MovementCommand>, dt_sec: f32) {
        if dt_sec.is_nan() || dt_sec <= 0.0 {
            return;
        }

        let wish = cmd.map(|c| (c.wish_vector(), c.max_speed));
        match wish {
            Some((wish, max_speed)) if !wish.is_zero() => {
                let speed = (max_speed * wish.len())
                    .max(self.tuning.min_analog_speed)
                    .min(max_speed);
                self.accelerate(wish.normalized_or_zero() * speed, dt_sec);
            }
            _ => self.brake(dt_sec),
        }

        self.position += self.velocity * dt_sec;
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }
}
