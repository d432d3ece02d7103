//! `combat_host`
//!
//! Host-side systems:
//! - Fixed timestep loop driving one character
//! - Reference movement integrator and camera rig wiring
//! - Scripted and randomized input sources
//! - Frame history for render-rate camera interpolation

pub mod history;
pub mod host;
pub mod masher;
pub mod script;

pub use host::{Host, InputSource, Pacing, RunStats};
