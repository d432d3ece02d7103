//! Host implementation.
//!
//! The host plays the external scheduler: it owns one character and its
//! collaborators, feeds input each tick, and pushes the resolved outputs to
//! the movement integrator and camera rig.
//!
//! Determinism notes:
//! - Keep simulation in a fixed timestep.
//! - Input comes from a script or a seeded masher, never from wall-clock state.
//! - Pacing (`run_for_ticks`) only sleeps between ticks; it never changes `dt`.

use std::time::Duration;

use combat_character::{Character, FrameOutput, InputEvent};
use combat_shared::{
    camera::{CameraRig, RecordingCameraRig},
    config::ControllerConfig,
    movement::{KinematicMover, MovementIntegrator},
};
use tokio::time::Instant;
use tracing::{debug, info};

use crate::{history::FrameHistory, masher::ButtonMasher, script::InputScript};

/// Where per-tick input comes from.
pub enum InputSource {
    /// No input; the character idles.
    Idle,
    Script(InputScript),
    Masher(ButtonMasher),
}

impl InputSource {
    fn events_for(&mut self, tick: u32) -> Vec<InputEvent> {
        match self {
            InputSource::Idle => Vec::new(),
            InputSource::Script(script) => script.events_at(tick),
            InputSource::Masher(masher) => masher.next_events(),
        }
    }
}

/// Whether a run sleeps between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// One tick per `1 / tick_hz` of wall-clock time.
    RealTime,
    /// As fast as possible.
    Headless,
}

/// Counters over a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunStats {
    pub ticks: u32,
    pub attacks_started: u32,
    pub chains_ended: u32,
    pub static_ticks: u32,
}

impl RunStats {
    pub fn record(&mut self, frame: &FrameOutput) {
        self.ticks += 1;
        self.attacks_started += frame.attack_triggers.len() as u32;
        self.chains_ended += frame.chains_ended.len() as u32;
        if frame.static_action {
            self.static_ticks += 1;
        }
    }
}

/// Drives one character with a fixed timestep.
pub struct Host {
    pub character: Character,
    pub mover: KinematicMover,
    pub rig: RecordingCameraRig,
    pub history: FrameHistory,
    source: InputSource,
    tick: u32,
}

impl Host {
    pub fn new(config: ControllerConfig, source: InputSource) -> anyhow::Result<Self> {
        let mover = KinematicMover::new(config.movement);
        let character = Character::new(config)?;
        Ok(Self {
            character,
            mover,
            rig: RecordingCameraRig::default(),
            history: FrameHistory::new(64),
            source,
            tick: 0,
        })
    }

    /// Number of ticks run so far.
    pub fn tick(&self) -> u32 {
        self.tick
    }

    /// Executes one fixed simulation step.
    pub fn step(&mut self, dt_sec: f32) -> FrameOutput {
        let events = self.source.events_for(self.tick);
        let velocity = self.mover.velocity();

        let frame = self.character.step(dt_sec, velocity, &events);

        self.mover.apply(frame.movement.as_ref(), dt_sec);
        self.rig.apply(&frame.camera);

        for hit in &frame.attack_triggers {
            debug!(tick = self.tick, kind = %hit.kind, index = hit.index, "Attack mechanics triggered");
        }

        self.history.push(frame.clone());
        self.tick += 1;
        frame
    }

    /// Runs without pacing. Returns run counters.
    pub fn run_headless(&mut self, ticks: u32, dt_sec: f32) -> RunStats {
        let mut stats = RunStats::default();
        for _ in 0..ticks {
            let frame = self.step(dt_sec);
            stats.record(&frame);
        }
        stats
    }

    /// Runs the host for a number of ticks at `tick_hz`, calling `on_frame`
    /// after every step. With [`Pacing::Headless`] the loop never sleeps.
    pub async fn run_for_ticks<F>(
        &mut self,
        ticks: u32,
        tick_hz: u32,
        pacing: Pacing,
        mut on_frame: F,
    ) -> anyhow::Result<RunStats>
    where
        F: FnMut(&Host, &FrameOutput) -> anyhow::Result<()>,
    {
        anyhow::ensure!(tick_hz > 0, "tick_hz must be positive");
        let dt = Duration::from_secs_f32(1.0 / tick_hz as f32);
        let mut next = Instant::now();
        let mut stats = RunStats::default();

        for _ in 0..ticks {
            let frame = self.step(dt.as_secs_f32());
            stats.record(&frame);
            on_frame(&*self, &frame)?;

            if pacing == Pacing::RealTime {
                next += dt;
                tokio::time::sleep_until(next).await;
            }
        }

        info!(
            ticks = stats.ticks,
            attacks = stats.attacks_started,
            chains = stats.chains_ended,
            static_ticks = stats.static_ticks,
            "Run finished"
        );
        Ok(stats)
    }
}
