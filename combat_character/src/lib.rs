//! `combat_character`
//!
//! Per-frame player character controller:
//! - Locomotion mode and action tag resolution
//! - Attack chains with input buffering
//! - Blocking
//! - Camera boom easing and free-camera shake
//!
//! The state record lives in [`state`]; each concern is a resolver function
//! over `&mut CharacterState` plus the config. [`Character`] wires them into
//! one `tick` per frame.

pub mod attack;
pub mod character;
pub mod input;
pub mod locomotion;
pub mod shake;
pub mod state;

pub use character::{Character, FrameOutput};
pub use input::InputEvent;
pub use state::{ActionTag, AttackKind, CameraMode, ControlMode};
