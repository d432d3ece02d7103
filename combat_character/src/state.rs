//! Character state record.
//!
//! One owning record per character. Resolvers in sibling modules take it by
//! `&mut` together with the immutable config; nothing else mutates it.

use std::fmt;

use combat_shared::{
    config::{AttackChainConfig, ControllerConfig},
    math::{Rotator, Vec3},
};
use serde::{Deserialize, Serialize};

/// Coarse movement/camera regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ControlMode {
    #[default]
    Slow,
    Action,
}

/// Whether the camera is player-driven or locked onto a target.
/// Only consulted in [`ControlMode::Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CameraMode {
    #[default]
    Free,
    Focus,
}

impl CameraMode {
    /// Row in the action-mode camera tables.
    pub fn slot(self) -> usize {
        match self {
            CameraMode::Free => 0,
            CameraMode::Focus => 1,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            CameraMode::Free => CameraMode::Focus,
            CameraMode::Focus => CameraMode::Free,
        }
    }
}

/// Attack chain selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackKind {
    Light,
    Heavy,
}

impl AttackKind {
    pub fn opposite(self) -> Self {
        match self {
            AttackKind::Light => AttackKind::Heavy,
            AttackKind::Heavy => AttackKind::Light,
        }
    }

    pub fn chain(self, cfg: &ControllerConfig) -> &AttackChainConfig {
        match self {
            AttackKind::Light => &cfg.light_chain,
            AttackKind::Heavy => &cfg.heavy_chain,
        }
    }
}

impl fmt::Display for AttackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttackKind::Light => f.write_str("Light"),
            AttackKind::Heavy => f.write_str("Heavy"),
        }
    }
}

/// Displayed action, consumed by animation selection.
///
/// `Display` renders the animation tag, e.g. `LightAttack_2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ActionTag {
    #[default]
    Idle,
    Moving,
    Sprinting,
    LightAttack(usize),
    HeavyAttack(usize),
}

impl ActionTag {
    pub fn attack(kind: AttackKind, index: usize) -> Self {
        match kind {
            AttackKind::Light => ActionTag::LightAttack(index),
            AttackKind::Heavy => ActionTag::HeavyAttack(index),
        }
    }

    /// Moving or Sprinting.
    pub fn is_locomoting(self) -> bool {
        matches!(self, ActionTag::Moving | ActionTag::Sprinting)
    }

    pub fn is_attack(self) -> bool {
        matches!(self, ActionTag::LightAttack(_) | ActionTag::HeavyAttack(_))
    }
}

impl fmt::Display for ActionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionTag::Idle => f.write_str("Idle"),
            ActionTag::Moving => f.write_str("Moving"),
            ActionTag::Sprinting => f.write_str("Sprinting"),
            ActionTag::LightAttack(i) => write!(f, "LightAttack_{i}"),
            ActionTag::HeavyAttack(i) => write!(f, "HeavyAttack_{i}"),
        }
    }
}

/// Per-chain step counters. At most one is nonzero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttackChains {
    light: usize,
    heavy: usize,
}

impl AttackChains {
    pub fn index(&self, kind: AttackKind) -> usize {
        match kind {
            AttackKind::Light => self.light,
            AttackKind::Heavy => self.heavy,
        }
    }

    pub(crate) fn advance(&mut self, kind: AttackKind) {
        match kind {
            AttackKind::Light => self.light += 1,
            AttackKind::Heavy => self.heavy += 1,
        }
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A follow-up attack requested before the current step allowed it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AttackBuffer {
    /// Last requested kind; a newer request overwrites an older one.
    pub pending: Option<AttackKind>,
    /// Remaining static time at or below which the next step may start.
    pub window: f32,
}

impl AttackBuffer {
    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Boom state. Current values chase the desired ones every free tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraBoom {
    pub arm_length: f32,
    pub desired_arm_length: f32,
    pub socket_offset: Vec3,
    pub desired_socket_offset: Vec3,
}

/// Triangle-wave oscillator driving the socket-offset shake.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CamShake {
    pub timing: f32,
    pub rising: bool,
}

impl Default for CamShake {
    fn default() -> Self {
        Self {
            timing: 0.0,
            rising: true,
        }
    }
}

/// Everything the state machine knows about one character.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterState {
    pub control_mode: ControlMode,
    pub camera_mode: CameraMode,
    pub action: ActionTag,

    /// True while an attack occupies the character.
    pub static_action: bool,
    /// Remaining seconds of the current static action.
    pub static_timer: f32,

    /// Kind of the most recent accepted or buffered attack request.
    pub current_attack: Option<AttackKind>,
    pub chains: AttackChains,
    pub buffer: AttackBuffer,

    pub blocking: bool,
    pub sprinting: bool,

    /// Speed cap handed to the movement integrator.
    pub move_speed: f32,
    pub control_rotation: Rotator,
    pub camera: CameraBoom,
    pub shake: CamShake,
}

impl CharacterState {
    /// Spawn defaults. The boom starts at its spawn length; this is the only
    /// time camera values are set without easing.
    pub fn spawn(cfg: &ControllerConfig) -> Self {
        Self {
            control_mode: ControlMode::Slow,
            camera_mode: CameraMode::Free,
            action: ActionTag::Idle,
            static_action: false,
            static_timer: 0.0,
            current_attack: None,
            chains: AttackChains::default(),
            buffer: AttackBuffer::default(),
            blocking: false,
            sprinting: false,
            move_speed: cfg.move_speed_slow,
            control_rotation: Rotator::default(),
            camera: CameraBoom {
                arm_length: cfg.spawn_arm_length,
                desired_arm_length: cfg.spawn_arm_length,
                socket_offset: Vec3::ZERO,
                desired_socket_offset: Vec3::ZERO,
            },
            shake: CamShake::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_tags_render_animation_names() {
        assert_eq!(ActionTag::Idle.to_string(), "Idle");
        assert_eq!(ActionTag::Sprinting.to_string(), "Sprinting");
        assert_eq!(ActionTag::LightAttack(0).to_string(), "LightAttack_0");
        assert_eq!(ActionTag::attack(AttackKind::Heavy, 2).to_string(), "HeavyAttack_2");
    }

    #[test]
    fn spawn_defaults() {
        let cfg = ControllerConfig::default();
        let s = CharacterState::spawn(&cfg);
        assert_eq!(s.control_mode, ControlMode::Slow);
        assert_eq!(s.camera_mode, CameraMode::Free);
        assert_eq!(s.action, ActionTag::Idle);
        assert!(!s.sprinting && !s.static_action && !s.blocking);
        assert_eq!(s.camera.arm_length, 300.0);
        assert!(s.shake.rising);
    }
}
