//! Character facade.
//!
//! Owns the config, the state record, the event bus, and pending movement
//! input. A host calls the input handlers whenever its input layer delivers
//! events and `tick` exactly once per simulation frame.
//!
//! Per tick, either the static branch runs (an attack is counting down) or
//! the locomotion/camera resolver runs; never both. Movement is only handed
//! to the integrator on free ticks.

use anyhow::Context;
use combat_shared::{
    camera::CameraPose,
    config::ControllerConfig,
    event::EventBus,
    math::{Vec2, Vec3},
    movement::MovementCommand,
};
use serde::Serialize;
use tracing::debug;

use crate::{
    attack::{self, AttackOutcome, AttackTriggered, ChainEnded},
    input::{self, InputEvent, PendingMovement},
    locomotion,
    state::{ActionTag, AttackKind, CameraMode, CharacterState, ControlMode},
};

/// Everything a tick publishes to collaborators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameOutput {
    pub action: ActionTag,
    pub static_action: bool,
    pub blocking: bool,
    /// `None` while a static action holds the character.
    pub movement: Option<MovementCommand>,
    pub camera: CameraPose,
    /// Hit-detection pulses raised since the previous tick.
    pub attack_triggers: Vec<AttackTriggered>,
    pub chains_ended: Vec<ChainEnded>,
}

/// A controllable combat character.
pub struct Character {
    config: ControllerConfig,
    state: CharacterState,
    events: EventBus,
    pending: PendingMovement,
}

impl Character {
    /// Validates the config and spawns a character with default state.
    pub fn new(config: ControllerConfig) -> anyhow::Result<Self> {
        config.validate().context("invalid controller config")?;
        let state = CharacterState::spawn(&config);
        debug!(
            light_steps = config.light_chain.length,
            heavy_steps = config.heavy_chain.length,
            "Character spawned"
        );
        Ok(Self {
            config,
            state,
            events: EventBus::default(),
            pending: PendingMovement::default(),
        })
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn state(&self) -> &CharacterState {
        &self.state
    }

    pub fn action(&self) -> ActionTag {
        self.state.action
    }

    pub fn is_static(&self) -> bool {
        self.state.static_action
    }

    pub fn attack_index(&self, kind: AttackKind) -> usize {
        self.state.chains.index(kind)
    }

    pub fn desired_arm_length(&self) -> f32 {
        self.state.camera.desired_arm_length
    }

    pub fn arm_length(&self) -> f32 {
        self.state.camera.arm_length
    }

    pub fn camera_pose(&self) -> CameraPose {
        CameraPose {
            arm_length: self.state.camera.arm_length,
            socket_offset: self.state.camera.socket_offset,
            rotation: self.state.control_rotation,
        }
    }

    pub fn move_input(&mut self, axis: Vec2) -> bool {
        input::move_input(&self.state, &mut self.pending, axis)
    }

    pub fn look(&mut self, axis: Vec2) {
        input::look(&mut self.state, axis);
    }

    pub fn set_sprint(&mut self, held: bool) {
        input::set_sprint(&mut self.state, held);
    }

    pub fn set_block(&mut self, held: bool) -> bool {
        input::set_block(&mut self.state, held)
    }

    pub fn light_attack(&mut self) -> AttackOutcome {
        self.attack(AttackKind::Light)
    }

    pub fn heavy_attack(&mut self) -> AttackOutcome {
        self.attack(AttackKind::Heavy)
    }

    pub fn attack(&mut self, kind: AttackKind) -> AttackOutcome {
        let outcome = attack::request_attack(&mut self.state, &self.config, kind, &mut self.events);
        if matches!(outcome, AttackOutcome::Started { .. }) {
            // Movement queued earlier this frame must not leak into the attack.
            self.pending = PendingMovement::default();
        }
        outcome
    }

    pub fn set_control_mode(&mut self, mode: ControlMode) {
        input::set_control_mode(&mut self.state, mode);
    }

    pub fn set_camera_mode(&mut self, mode: CameraMode) {
        input::set_camera_mode(&mut self.state, mode);
    }

    pub fn toggle_focus(&mut self) -> bool {
        input::toggle_focus(&mut self.state)
    }

    /// Dispatches one input event to its handler.
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::Move { axis } => {
                self.move_input(axis);
            }
            InputEvent::Look { axis } => self.look(axis),
            InputEvent::Sprint { held } => self.set_sprint(held),
            InputEvent::LightAttack => {
                self.light_attack();
            }
            InputEvent::HeavyAttack => {
                self.heavy_attack();
            }
            InputEvent::Block { held } => {
                self.set_block(held);
            }
            InputEvent::ControlMode { mode } => self.set_control_mode(mode),
            InputEvent::CameraMode { mode } => self.set_camera_mode(mode),
            InputEvent::ToggleFocus => {
                self.toggle_focus();
            }
        }
    }

    /// Applies a batch of input events in order, then ticks.
    pub fn step(&mut self, dt_sec: f32, velocity: Vec3, events: &[InputEvent]) -> FrameOutput {
        for event in events {
            self.handle(*event);
        }
        self.tick(dt_sec, velocity)
    }

    /// Advances one simulation frame.
    ///
    /// `velocity` is the body velocity reported by the movement integrator.
    /// A non-finite or negative `dt_sec` is treated as zero.
    pub fn tick(&mut self, dt_sec: f32, velocity: Vec3) -> FrameOutput {
        let dt_sec = if dt_sec.is_finite() && dt_sec > 0.0 {
            dt_sec
        } else {
            0.0
        };

        let pending = self.pending.take();
        let was_static = self.state.static_action;

        if was_static {
            attack::advance_static_action(&mut self.state, &self.config, dt_sec, &mut self.events);
        } else {
            locomotion::resolve_locomotion(&mut self.state, &self.config, dt_sec, velocity);
        }

        let movement = (!was_static && !self.state.static_action).then(|| {
            let rotation = self.state.control_rotation;
            MovementCommand {
                max_speed: self.state.move_speed,
                forward_axis: pending.forward_axis,
                right_axis: pending.right_axis,
                forward: rotation.forward(),
                right: rotation.right(),
            }
        });

        FrameOutput {
            action: self.state.action,
            static_action: self.state.static_action,
            blocking: self.state.blocking,
            movement,
            camera: self.camera_pose(),
            attack_triggers: self.events.drain::<AttackTriggered>(),
            chains_ended: self.events.drain::<ChainEnded>(),
        }
    }
}
