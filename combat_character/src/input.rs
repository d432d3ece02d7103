//! Input handling.
//!
//! The input layer delivers discrete named events between ticks. Handlers are
//! short, non-blocking mutations of the state record; movement input is
//! accumulated and handed to the integrator by the next tick.

use combat_shared::math::Vec2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::state::{CameraMode, CharacterState, ControlMode};

/// One delivery from the input-binding layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// `x` is right, `y` is forward.
    Move { axis: Vec2 },
    /// `x` is yaw, `y` is pitch.
    Look { axis: Vec2 },
    Sprint { held: bool },
    LightAttack,
    HeavyAttack,
    Block { held: bool },
    ControlMode { mode: ControlMode },
    CameraMode { mode: CameraMode },
    ToggleFocus,
}

/// Movement input accumulated since the last tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PendingMovement {
    pub forward_axis: f32,
    pub right_axis: f32,
}

impl PendingMovement {
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

/// Adds movement input unless a static action holds the character.
pub fn move_input(state: &CharacterState, pending: &mut PendingMovement, axis: Vec2) -> bool {
    if state.static_action {
        return false;
    }
    pending.forward_axis += axis.y;
    pending.right_axis += axis.x;
    true
}

/// Look input always reaches the controller rotation.
pub fn look(state: &mut CharacterState, axis: Vec2) {
    state.control_rotation.add_input(axis.x, axis.y);
}

pub fn set_sprint(state: &mut CharacterState, held: bool) {
    state.sprinting = held;
}

/// Blocking can only change outside a static action.
pub fn set_block(state: &mut CharacterState, held: bool) -> bool {
    if state.static_action {
        return false;
    }
    state.blocking = held;
    true
}

pub fn set_control_mode(state: &mut CharacterState, mode: ControlMode) {
    if state.control_mode != mode {
        debug!(from = ?state.control_mode, to = ?mode, "Control mode changed");
        state.control_mode = mode;
    }
}

pub fn set_camera_mode(state: &mut CharacterState, mode: CameraMode) {
    if state.camera_mode != mode {
        debug!(from = ?state.camera_mode, to = ?mode, "Camera mode changed");
        state.camera_mode = mode;
    }
}

/// Lock-on toggle. Only meaningful in action mode.
pub fn toggle_focus(state: &mut CharacterState) -> bool {
    if state.control_mode != ControlMode::Action {
        return false;
    }
    let mode = state.camera_mode.toggled();
    set_camera_mode(state, mode);
    true
}

#[cfg(test)]
mod tests {
    use combat_shared::config::ControllerConfig;

    use super::*;

    fn spawn() -> CharacterState {
        CharacterState::spawn(&ControllerConfig::default())
    }

    #[test]
    fn move_accumulates_until_taken() {
        let state = spawn();
        let mut pending = PendingMovement::default();
        assert!(move_input(&state, &mut pending, Vec2::new(0.5, 1.0)));
        assert!(move_input(&state, &mut pending, Vec2::new(0.25, 0.0)));

        let taken = pending.take();
        assert_eq!(taken.forward_axis, 1.0);
        assert_eq!(taken.right_axis, 0.75);
        assert_eq!(pending, PendingMovement::default());
    }

    #[test]
    fn move_is_dropped_during_static_action() {
        let mut state = spawn();
        state.static_action = true;
        let mut pending = PendingMovement::default();
        assert!(!move_input(&state, &mut pending, Vec2::new(0.0, 1.0)));
        assert_eq!(pending, PendingMovement::default());
    }

    #[test]
    fn look_applies_during_static_action() {
        let mut state = spawn();
        state.static_action = true;
        look(&mut state, Vec2::new(30.0, -10.0));
        assert_eq!(state.control_rotation.yaw, 30.0);
        assert_eq!(state.control_rotation.pitch, -10.0);
    }

    #[test]
    fn block_is_idempotent_and_frozen_by_static_action() {
        let mut state = spawn();
        for _ in 0..3 {
            assert!(set_block(&mut state, true));
            assert!(state.blocking);
        }

        state.static_action = true;
        assert!(!set_block(&mut state, false));
        assert!(state.blocking);

        state.blocking = false;
        assert!(!set_block(&mut state, true));
        assert!(!state.blocking);
    }

    #[test]
    fn focus_toggle_requires_action_mode() {
        let mut state = spawn();
        assert!(!toggle_focus(&mut state));
        assert_eq!(state.camera_mode, CameraMode::Free);

        set_control_mode(&mut state, ControlMode::Action);
        assert!(toggle_focus(&mut state));
        assert_eq!(state.camera_mode, CameraMode::Focus);
        assert!(toggle_focus(&mut state));
        assert_eq!(state.camera_mode, CameraMode::Free);
    }

    #[test]
    fn events_use_tagged_json() {
        let json = r#"[
            { "type": "move", "axis": { "x": 0.0, "y": 1.0 } },
            { "type": "light_attack" },
            { "type": "block", "held": true },
            { "type": "control_mode", "mode": "Action" }
        ]"#;
        let events: Vec<InputEvent> = serde_json::from_str(json).unwrap();
        assert_eq!(events[0], InputEvent::Move { axis: Vec2::new(0.0, 1.0) });
        assert_eq!(events[1], InputEvent::LightAttack);
        assert_eq!(events[2], InputEvent::Block { held: true });
        assert_eq!(events[3], InputEvent::ControlMode { mode: ControlMode::Action });
    }
}
