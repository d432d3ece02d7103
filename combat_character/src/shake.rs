//! Camera shake for the free action camera.
//!
//! `timing` runs a triangle wave between `-shake_bound` and `shake_bound`
//! while the character is moving; the socket target is swung between the
//! lifted offset and its negation by that amount.

use combat_shared::config::ControllerConfig;

use crate::state::{ActionTag, CamShake, CameraMode, CharacterState, ControlMode};

impl CamShake {
    /// Advances the oscillator by one tick. Returns true if the direction flipped.
    pub fn advance(&mut self, action: ActionTag, cfg: &ControllerConfig, dt_sec: f32) -> bool {
        let divisor = match action {
            ActionTag::Moving => Some(cfg.shake_divisors[0]),
            ActionTag::Sprinting => Some(cfg.shake_divisors[1]),
            _ => None,
        };
        let mut step = divisor.map_or(0.0, |d| dt_sec / d);
        if !self.rising {
            step = -step;
        }

        let was_rising = self.rising;
        let bound = cfg.shake_bound;
        self.timing += step;
        if self.timing >= bound {
            self.timing = bound;
            self.rising = false;
        }
        if self.timing <= -bound {
            self.timing = -bound;
            self.rising = true;
        }
        was_rising != self.rising
    }
}

/// True when the shake applies: action mode with a free camera.
pub fn shake_active(state: &CharacterState) -> bool {
    state.control_mode == ControlMode::Action && state.camera_mode == CameraMode::Free
}

/// Perturbs the desired socket offset. Call after the target has been chosen
/// for this tick and before the offset is eased.
pub fn apply_shake(state: &mut CharacterState, cfg: &ControllerConfig, dt_sec: f32) {
    if !shake_active(state) {
        return;
    }

    state.shake.advance(state.action, cfg, dt_sec);

    let target = state.camera.desired_socket_offset;
    let shaken = if state.action.is_locomoting() {
        target + cfg.shake_lift
    } else {
        target
    };

    if shaken != target {
        state.camera.desired_socket_offset = shaken.lerp_unclamped(-shaken, state.shake.timing);
    } else {
        state.shake.timing = 0.0;
    }
}
