//! Configuration system.
//!
//! Loads controller tuning from JSON strings (file IO left to the app).
//! Every field has a default, so a JSON document only needs the values it
//! overrides. Configuration is validated once at setup; tick-time code assumes
//! a validated config.

use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};

use crate::math::Vec3;

/// Step durations of one attack chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackChainConfig {
    /// Number of steps in the chain.
    pub length: usize,
    /// Duration in seconds of each step; must have exactly `length` entries.
    pub durations: Vec<f32>,
}

impl AttackChainConfig {
    pub fn new(durations: Vec<f32>) -> Self {
        Self {
            length: durations.len(),
            durations,
        }
    }

    fn validate(&self, name: &str) -> anyhow::Result<()> {
        ensure!(self.length > 0, "{name}: chain length must be at least 1");
        ensure!(
            self.durations.len() == self.length,
            "{name}: chain length is {} but {} step durations are configured",
            self.length,
            self.durations.len()
        );
        for (i, d) in self.durations.iter().enumerate() {
            ensure!(
                d.is_finite() && *d > 0.0,
                "{name}: step {i} duration must be positive, got {d}"
            );
        }
        Ok(())
    }
}

/// Tuning for the reference movement integrator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    /// Acceleration toward the requested speed (units/s^2).
    pub max_acceleration: f32,
    /// Deceleration applied when no input is given (units/s^2).
    pub braking_deceleration: f32,
    /// Lowest speed analog input is allowed to request.
    pub min_analog_speed: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            max_acceleration: 2048.0,
            braking_deceleration: 2000.0,
            min_analog_speed: 20.0,
        }
    }
}

/// Author-tunable controller constants. Not mutated at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Move speed in the `Slow` control mode.
    pub move_speed_slow: f32,
    /// Move speed in the `Action` control mode.
    pub move_speed_action: f32,
    /// Added to the move speed while sprinting, in either mode.
    pub sprint_speed_bonus: f32,

    pub light_chain: AttackChainConfig,
    pub heavy_chain: AttackChainConfig,
    /// Fraction of a step's duration that remains when the follow-up window opens.
    pub attack_buffer_multiplier: f32,

    /// Boom lengths in `Slow` mode for Idle, Moving and Sprinting.
    pub arm_lengths_slow: [f32; 3],
    pub socket_offset_slow: Vec3,
    /// Boom lengths in `Action` mode for the Free and Focus camera.
    pub arm_lengths_action: [f32; 2],
    /// Socket offsets in `Action` mode for the Free and Focus camera.
    pub socket_offsets_action: [Vec3; 2],

    /// Shake timing is clamped to `[-shake_bound, shake_bound]`.
    pub shake_bound: f32,
    /// Divisors of the per-tick shake increment while Moving and Sprinting.
    pub shake_divisors: [f32; 2],
    /// Offset added to the socket target before it oscillates.
    pub shake_lift: Vec3,

    pub arm_ease_rate: f32,
    pub socket_ease_rate: f32,
    /// Boom length at spawn, before any easing.
    pub spawn_arm_length: f32,

    pub movement: MovementTuning,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            move_speed_slow: 200.0,
            move_speed_action: 400.0,
            sprint_speed_bonus: 200.0,
            light_chain: AttackChainConfig::new(vec![1.0, 0.7, 0.7, 0.7, 0.7]),
            heavy_chain: AttackChainConfig::new(vec![1.5, 1.0, 1.0]),
            attack_buffer_multiplier: 0.5,
            arm_lengths_slow: [175.0, 225.0, 275.0],
            socket_offset_slow: Vec3::new(0.0, 50.0, 75.0),
            arm_lengths_action: [300.0, 350.0],
            socket_offsets_action: [Vec3::new(0.0, 0.0, 50.0), Vec3::new(0.0, 0.0, 100.0)],
            shake_bound: 0.1,
            shake_divisors: [2.0, 1.2],
            shake_lift: Vec3::UP,
            arm_ease_rate: 2.5,
            socket_ease_rate: 10.0,
            spawn_arm_length: 300.0,
            movement: MovementTuning::default(),
        }
    }
}

fn ensure_positive(name: &str, v: f32) -> anyhow::Result<()> {
    ensure!(v.is_finite() && v > 0.0, "{name} must be positive, got {v}");
    Ok(())
}

fn ensure_non_negative(name: &str, v: f32) -> anyhow::Result<()> {
    ensure!(v.is_finite() && v >= 0.0, "{name} must be non-negative, got {v}");
    Ok(())
}

impl ControllerConfig {
    /// Parses config from JSON and validates it.
    pub fn from_json_str(s: &str) -> anyhow::Result<Self> {
        let cfg: Self = serde_json::from_str(s).context("parse controller config")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Rejects tuning the state machine cannot run with.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure_non_negative("move_speed_slow", self.move_speed_slow)?;
        ensure_non_negative("move_speed_action", self.move_speed_action)?;
        ensure_non_negative("sprint_speed_bonus", self.sprint_speed_bonus)?;

        self.light_chain.validate("light_chain")?;
        self.heavy_chain.validate("heavy_chain")?;
        ensure!(
            (0.0..=1.0).contains(&self.attack_buffer_multiplier),
            "attack_buffer_multiplier must be within [0, 1], got {}",
            self.attack_buffer_multiplier
        );

        for (i, len) in self.arm_lengths_slow.iter().enumerate() {
            ensure_non_negative(&format!("arm_lengths_slow[{i}]"), *len)?;
        }
        for (i, len) in self.arm_lengths_action.iter().enumerate() {
            ensure_non_negative(&format!("arm_lengths_action[{i}]"), *len)?;
        }
        ensure_non_negative("spawn_arm_length", self.spawn_arm_length)?;

        ensure_positive("shake_bound", self.shake_bound)?;
        for (i, d) in self.shake_divisors.iter().enumerate() {
            ensure_positive(&format!("shake_divisors[{i}]"), *d)?;
        }

        ensure_positive("arm_ease_rate", self.arm_ease_rate)?;
        ensure_positive("socket_ease_rate", self.socket_ease_rate)?;

        ensure_non_negative("movement.max_acceleration", self.movement.max_acceleration)?;
        ensure_non_negative(
            "movement.braking_deceleration",
            self.movement.braking_deceleration,
        )?;
        ensure_non_negative("movement.min_analog_speed", self.movement.min_analog_speed)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        ControllerConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_json_overrides_defaults() {
        let cfg = ControllerConfig::from_json_str(r#"{ "move_speed_action": 450.0 }"#).unwrap();
        assert_eq!(cfg.move_speed_action, 450.0);
        assert_eq!(cfg.move_speed_slow, 200.0);
        assert_eq!(cfg.light_chain.length, 5);
    }

    #[test]
    fn mismatched_chain_length_is_fatal() {
        let json = r#"{ "heavy_chain": { "length": 4, "durations": [1.5, 1.0, 1.0] } }"#;
        let err = ControllerConfig::from_json_str(json).unwrap_err();
        assert!(err.to_string().contains("heavy_chain"));
    }

    #[test]
    fn negative_duration_is_fatal() {
        let mut cfg = ControllerConfig::default();
        cfg.light_chain.durations[2] = -0.5;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn buffer_multiplier_out_of_range_is_fatal() {
        let cfg = ControllerConfig {
            attack_buffer_multiplier: 1.5,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }
}
