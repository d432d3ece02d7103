//! Vectors, rotations and the easing helpers the camera boom uses.
//!
//! Axis convention: X forward, Y right, Z up. Angles are in degrees.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Moves `current` toward `target` by the fraction `min(1, rate_dt)`.
///
/// Never overshoots; a non-positive `rate_dt` leaves `current` unchanged.
pub fn ease_scalar(current: f32, target: f32, rate_dt: f32) -> f32 {
    let alpha = rate_dt.clamp(0.0, 1.0);
    current + (target - current) * alpha
}

/// 2D axis value as delivered by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// 3D vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const UP: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    pub fn len_sq(self) -> f32 {
        self.dot(self)
    }

    pub fn len(self) -> f32 {
        self.len_sq().sqrt()
    }

    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    /// Returns a unit vector, or zero for a zero-length input.
    pub fn normalized_or_zero(self) -> Self {
        let len = self.len();
        if len > 0.0 {
            self * (1.0 / len)
        } else {
            Self::ZERO
        }
    }

    /// Linear interpolation with `t` clamped to `[0, 1]`.
    pub fn lerp(self, to: Self, t: f32) -> Self {
        self.lerp_unclamped(to, t.clamp(0.0, 1.0))
    }

    /// Linear interpolation that extrapolates for `t` outside `[0, 1]`.
    pub fn lerp_unclamped(self, to: Self, t: f32) -> Self {
        Self::new(
            self.x + (to.x - self.x) * t,
            self.y + (to.y - self.y) * t,
            self.z + (to.z - self.z) * t,
        )
    }

    /// Component-wise [`ease_scalar`].
    pub fn ease_toward(self, target: Self, rate_dt: f32) -> Self {
        Self::new(
            ease_scalar(self.x, target.x, rate_dt),
            ease_scalar(self.y, target.y, rate_dt),
            ease_scalar(self.z, target.z, rate_dt),
        )
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Controller rotation. Only yaw and pitch are driven by look input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Rotator {
    pub yaw: f32,
    pub pitch: f32,
}

impl Rotator {
    pub const PITCH_LIMIT: f32 = 89.0;

    pub const fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }

    /// Applies look input; yaw wraps to `(-180, 180]`, pitch is clamped.
    pub fn add_input(&mut self, yaw: f32, pitch: f32) {
        let mut wrapped = (self.yaw + yaw) % 360.0;
        if wrapped > 180.0 {
            wrapped -= 360.0;
        } else if wrapped <= -180.0 {
            wrapped += 360.0;
        }
        self.yaw = wrapped;
        self.pitch = (self.pitch + pitch).clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
    }

    /// Yaw-only forward direction on the ground plane.
    pub fn forward(self) -> Vec3 {
        let (sin, cos) = self.yaw.to_radians().sin_cos();
        Vec3::new(cos, sin, 0.0)
    }

    /// Yaw-only right direction on the ground plane.
    pub fn right(self) -> Vec3 {
        let (sin, cos) = self.yaw.to_radians().sin_cos();
        Vec3::new(-sin, cos, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_lerp_stops_at_endpoints() {
        let from = Vec3::new(0.0, 0.0, 50.0);
        let to = Vec3::new(0.0, 0.0, 100.0);
        assert_eq!(from.lerp(to, 0.5), Vec3::new(0.0, 0.0, 75.0));
        assert_eq!(from.lerp(to, 3.0), to);
        assert_eq!(from.lerp(to, -1.0), from);
    }

    #[test]
    fn lerp_unclamped_extrapolates_below_zero() {
        let a = Vec3::new(0.0, 0.0, 10.0);
        let out = a.lerp_unclamped(-a, -0.1);
        assert!((out.z - 12.0).abs() < 1e-5);
        // The clamped variant pins to the start point instead.
        assert_eq!(a.lerp(-a, -0.1), a);
    }

    #[test]
    fn ease_never_overshoots() {
        assert_eq!(ease_scalar(0.0, 10.0, 5.0), 10.0);
        assert_eq!(ease_scalar(0.0, 10.0, 0.0), 0.0);
        assert_eq!(ease_scalar(0.0, 10.0, -1.0), 0.0);
        assert!((ease_scalar(0.0, 10.0, 0.25) - 2.5).abs() < 1e-6);
    }

    #[test]
    fn rotator_directions_follow_yaw() {
        let r = Rotator::new(90.0, 0.0);
        let f = r.forward();
        let right = r.right();
        assert!(f.x.abs() < 1e-6 && (f.y - 1.0).abs() < 1e-6);
        assert!((right.x + 1.0).abs() < 1e-6 && right.y.abs() < 1e-6);
    }

    #[test]
    fn rotator_wraps_yaw_and_clamps_pitch() {
        let mut r = Rotator::default();
        r.add_input(190.0, 120.0);
        assert!((r.yaw + 170.0).abs() < 1e-4);
        assert_eq!(r.pitch, Rotator::PITCH_LIMIT);
    }
}
