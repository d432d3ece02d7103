//! `combat_tests`
//!
//! Shared helpers for the integration tests in `tests/`.

use combat_character::{AttackKind, Character, FrameOutput};
use combat_shared::math::Vec3;

/// Fixed test timestep.
pub const DT: f32 = 1.0 / 60.0;

/// Installs a test-writer subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_test_writer()
        .try_init();
}

/// Ticks until `done` returns true, up to `max_ticks`. Returns the frames seen.
pub fn tick_until(
    character: &mut Character,
    velocity: Vec3,
    max_ticks: usize,
    mut done: impl FnMut(&Character, &FrameOutput) -> bool,
) -> Vec<FrameOutput> {
    let mut frames = Vec::new();
    for _ in 0..max_ticks {
        let frame = character.tick(DT, velocity);
        let stop = done(character, &frame);
        frames.push(frame);
        if stop {
            break;
        }
    }
    frames
}

/// Ticks until the follow-up window of the current step is open.
pub fn tick_into_window(character: &mut Character) {
    while character.state().static_timer > character.state().buffer.window {
        character.tick(DT, Vec3::ZERO);
    }
}

/// Panics if any cross-field invariant of the state record is broken.
pub fn assert_invariants(character: &Character) {
    let s = character.state();
    let light = s.chains.index(AttackKind::Light);
    let heavy = s.chains.index(AttackKind::Heavy);

    assert!(light == 0 || heavy == 0, "both chains active: {light}/{heavy}");
    assert!(light <= character.config().light_chain.length);
    assert!(heavy <= character.config().heavy_chain.length);
    assert!(s.static_timer >= 0.0, "negative static timer {}", s.static_timer);
    assert_eq!(
        s.static_action,
        s.static_timer > 0.0,
        "static flag {} disagrees with timer {}",
        s.static_action,
        s.static_timer
    );
    if s.blocking {
        assert!(!s.static_action, "blocking during a static action");
    }
    if s.static_action {
        assert!(s.action.is_attack(), "static action shows {}", s.action);
    }
    let bound = character.config().shake_bound;
    assert!(s.shake.timing.abs() <= bound);
}
