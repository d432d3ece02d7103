//! Attack-chain sequencing and input buffering.
//!
//! A request either starts the next step of its chain, is buffered until the
//! current step's follow-up window opens, or is dropped. Dropped requests are
//! normal under button mashing and are not errors.

use combat_shared::{config::ControllerConfig, event::EventBus};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::state::{ActionTag, AttackKind, CharacterState};

/// One-shot pulse for hit detection, emitted when a step starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackTriggered {
    pub kind: AttackKind,
    /// Zero-based step index within the chain.
    pub index: usize,
    /// Static duration of the step in seconds.
    pub duration: f32,
}

/// Emitted when a static action runs out and the chains reset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChainEnded {
    pub kind: AttackKind,
    /// Steps performed before the reset.
    pub steps: usize,
}

/// What became of an attack request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOutcome {
    Started { index: usize },
    Buffered,
    Ignored,
}

/// Handles a light/heavy attack request.
pub fn request_attack(
    state: &mut CharacterState,
    cfg: &ControllerConfig,
    kind: AttackKind,
    events: &mut EventBus,
) -> AttackOutcome {
    let index = state.chains.index(kind);
    let length = kind.chain(cfg).length;

    if state.chains.index(kind.opposite()) != 0 || index >= length {
        trace!(%kind, index, "Attack request ignored");
        return AttackOutcome::Ignored;
    }

    if state.static_timer <= state.buffer.window {
        start_step(state, cfg, kind, index, events)
    } else {
        state.current_attack = Some(kind);
        state.buffer.pending = Some(kind);
        debug!(
            %kind,
            remaining = state.static_timer,
            window = state.buffer.window,
            "Attack buffered"
        );
        AttackOutcome::Buffered
    }
}

fn start_step(
    state: &mut CharacterState,
    cfg: &ControllerConfig,
    kind: AttackKind,
    index: usize,
    events: &mut EventBus,
) -> AttackOutcome {
    let Some(&duration) = kind.chain(cfg).durations.get(index) else {
        return AttackOutcome::Ignored;
    };

    state.static_action = true;
    state.blocking = false;
    state.current_attack = Some(kind);
    state.action = ActionTag::attack(kind, index);
    state.static_timer = duration;
    state.buffer.window = duration * cfg.attack_buffer_multiplier;
    state.buffer.pending = None;
    state.chains.advance(kind);

    events.push(AttackTriggered {
        kind,
        index,
        duration,
    });
    debug!(action = %state.action, duration, window = state.buffer.window, "Attack step started");
    AttackOutcome::Started { index }
}

/// Runs the static branch of a tick: counts the step down, ends the chain at
/// zero, or fires a buffered follow-up once its window is open.
pub fn advance_static_action(
    state: &mut CharacterState,
    cfg: &ControllerConfig,
    dt_sec: f32,
    events: &mut EventBus,
) {
    state.static_timer -= dt_sec;

    if state.static_timer <= 0.0 {
        if let Some(kind) = state.current_attack {
            let steps = state.chains.index(kind);
            events.push(ChainEnded { kind, steps });
            debug!(%kind, steps, "Attack chain ended");
        }
        state.static_action = false;
        state.static_timer = 0.0;
        state.chains.reset();
        state.buffer.clear();
    } else if state.static_timer <= state.buffer.window {
        if let Some(kind) = state.buffer.pending {
            request_attack(state, cfg, kind, events);
        }
    }
}
