//! `combat_shared`
//!
//! Shared libraries used by the character core and its hosts.
//!
//! Design goals:
//! - Deterministic and modular where practical.
//! - Clear separation of concerns (math, config, events, collaborators).
//! - Traits for abstraction and dependency injection.
//! - No `unsafe`.

pub mod camera;
pub mod config;
pub mod event;
pub mod math;
pub mod movement;

pub mod prelude {
    //! Commonly used exports.

    pub use crate::camera::*;
    pub use crate::config::*;
    pub use crate::event::*;
    pub use crate::math::*;
    pub use crate::movement::*;
}
