//! Locomotion and camera target resolution for free (non-static) ticks.

use combat_shared::{
    config::ControllerConfig,
    math::{ease_scalar, Vec3},
};
use tracing::trace;

use crate::{
    shake::apply_shake,
    state::{ActionTag, CharacterState, ControlMode},
};

/// Idle when the body is exactly at rest, otherwise Moving or Sprinting.
pub fn derive_action(velocity: Vec3, sprinting: bool) -> ActionTag {
    if velocity.is_zero() {
        ActionTag::Idle
    } else if sprinting {
        ActionTag::Sprinting
    } else {
        ActionTag::Moving
    }
}

/// Row in the slow-mode arm length table. Attack tags never reach this
/// resolver; they keep the previous target.
fn slow_arm_slot(action: ActionTag) -> Option<usize> {
    match action {
        ActionTag::Idle => Some(0),
        ActionTag::Moving => Some(1),
        ActionTag::Sprinting => Some(2),
        ActionTag::LightAttack(_) | ActionTag::HeavyAttack(_) => None,
    }
}

/// Picks move speed and camera targets for this tick, then eases the boom.
pub fn resolve_locomotion(
    state: &mut CharacterState,
    cfg: &ControllerConfig,
    dt_sec: f32,
    velocity: Vec3,
) {
    state.action = derive_action(velocity, state.sprinting);

    match state.control_mode {
        ControlMode::Slow => {
            state.move_speed = cfg.move_speed_slow;
            state.camera.desired_socket_offset = cfg.socket_offset_slow;
            state.shake.timing = 0.0;
            if let Some(slot) = slow_arm_slot(state.action) {
                state.camera.desired_arm_length = cfg.arm_lengths_slow[slot];
            }
        }
        ControlMode::Action => {
            let slot = state.camera_mode.slot();
            state.move_speed = cfg.move_speed_action;
            state.camera.desired_arm_length = cfg.arm_lengths_action[slot];
            state.camera.desired_socket_offset = cfg.socket_offsets_action[slot];
        }
    }

    if state.sprinting {
        state.move_speed += cfg.sprint_speed_bonus;
    }

    state.camera.arm_length = ease_scalar(
        state.camera.arm_length,
        state.camera.desired_arm_length,
        dt_sec * cfg.arm_ease_rate,
    );

    apply_shake(state, cfg, dt_sec);

    state.camera.socket_offset = state
        .camera
        .socket_offset
        .ease_toward(state.camera.desired_socket_offset, dt_sec * cfg.socket_ease_rate);

    trace!(
        action = %state.action,
        move_speed = state.move_speed,
        arm = state.camera.arm_length,
        arm_target = state.camera.desired_arm_length,
        "Locomotion resolved"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CameraMode;

    const DT: f32 = 1.0 / 60.0;
    const MOVING: Vec3 = Vec3::new(150.0, 0.0, 0.0);

    #[test]
    fn action_tag_follows_velocity_and_sprint() {
        assert_eq!(derive_action(Vec3::ZERO, true), ActionTag::Idle);
        assert_eq!(derive_action(MOVING, false), ActionTag::Moving);
        assert_eq!(derive_action(MOVING, true), ActionTag::Sprinting);
        assert_eq!(derive_action(Vec3::new(0.0, 0.0, -1e-6), false), ActionTag::Moving);
    }

    #[test]
    fn slow_mode_targets_follow_action() {
        let cfg = ControllerConfig::default();
        let mut state = CharacterState::spawn(&cfg);

        resolve_locomotion(&mut state, &cfg, DT, Vec3::ZERO);
        assert_eq!(state.action, ActionTag::Idle);
        assert_eq!(state.camera.desired_arm_length, cfg.arm_lengths_slow[0]);
        assert_eq!(state.move_speed, 200.0);

        resolve_locomotion(&mut state, &cfg, DT, MOVING);
        assert_eq!(state.action, ActionTag::Moving);
        assert_eq!(state.camera.desired_arm_length, cfg.arm_lengths_slow[1]);

        state.sprinting = true;
        resolve_locomotion(&mut state, &cfg, DT, MOVING);
        assert_eq!(state.action, ActionTag::Sprinting);
        assert_eq!(state.camera.desired_arm_length, cfg.arm_lengths_slow[2]);
        assert_eq!(state.move_speed, 400.0);
        assert_eq!(state.camera.desired_socket_offset, cfg.socket_offset_slow);
    }

    #[test]
    fn action_mode_targets_follow_camera_mode() {
        let cfg = ControllerConfig::default();
        let mut state = CharacterState::spawn(&cfg);
        state.control_mode = ControlMode::Action;
        state.sprinting = true;

        resolve_locomotion(&mut state, &cfg, DT, Vec3::ZERO);
        assert_eq!(state.move_speed, 600.0);
        assert_eq!(state.camera.desired_arm_length, 300.0);

        state.camera_mode = CameraMode::Focus;
        resolve_locomotion(&mut state, &cfg, DT, MOVING);
        assert_eq!(state.camera.desired_arm_length, 350.0);
        assert_eq!(state.camera.desired_socket_offset, cfg.socket_offsets_action[1]);
    }

    #[test]
    fn arm_length_eases_without_snapping() {
        let cfg = ControllerConfig::default();
        let mut state = CharacterState::spawn(&cfg);

        resolve_locomotion(&mut state, &cfg, DT, Vec3::ZERO);

        let expected = 300.0 + (175.0 - 300.0) * (DT * 2.5);
        assert!((state.camera.arm_length - expected).abs() < 1e-3);
    }

    #[test]
    fn socket_offset_eases_at_its_own_rate() {
        let cfg = ControllerConfig::default();
        let mut state = CharacterState::spawn(&cfg);

        resolve_locomotion(&mut state, &cfg, DT, Vec3::ZERO);

        let expected = cfg.socket_offset_slow * (DT * 10.0);
        assert!((state.camera.socket_offset - expected).len() < 1e-3);
    }

    #[test]
    fn slow_mode_resets_shake_timing() {
        let cfg = ControllerConfig::default();
        let mut state = CharacterState::spawn(&cfg);
        state.shake.timing = 0.08;

        resolve_locomotion(&mut state, &cfg, DT, MOVING);

        assert_eq!(state.shake.timing, 0.0);
    }
}
