//! Scripted input.
//!
//! A script is a JSON timeline of input events keyed by tick. Held inputs
//! (movement, look) are delivered every frame by the input layer, so an entry
//! may repeat for several consecutive ticks.
//!
//! ```json
//! [
//!   { "tick": 0,  "event": { "type": "move", "axis": { "x": 0.0, "y": 1.0 } }, "repeat": 90 },
//!   { "tick": 30, "event": { "type": "sprint", "held": true } },
//!   { "tick": 100, "event": { "type": "light_attack" } }
//! ]
//! ```

use anyhow::{ensure, Context};
use combat_character::InputEvent;
use serde::{Deserialize, Serialize};

fn default_repeat() -> u32 {
    1
}

/// One timeline entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptedEvent {
    /// First tick the event is delivered on.
    pub tick: u32,
    pub event: InputEvent,
    /// Number of consecutive ticks to deliver it.
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

impl ScriptedEvent {
    fn covers(&self, tick: u32) -> bool {
        tick >= self.tick && tick - self.tick < self.repeat
    }
}

/// Input timeline ordered by start tick.
#[derive(Debug, Clone, Default)]
pub struct InputScript {
    entries: Vec<ScriptedEvent>,
}

impl InputScript {
    pub fn new(mut entries: Vec<ScriptedEvent>) -> anyhow::Result<Self> {
        for (i, e) in entries.iter().enumerate() {
            ensure!(e.repeat > 0, "script entry {i} (tick {}) has repeat 0", e.tick);
        }
        // Stable: entries on the same tick keep their authored order.
        entries.sort_by_key(|e| e.tick);
        Ok(Self { entries })
    }

    /// Parses a script from JSON.
    pub fn from_json_str(s: &str) -> anyhow::Result<Self> {
        let entries: Vec<ScriptedEvent> =
            serde_json::from_str(s).context("parse input script")?;
        Self::new(entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Last tick on which any event is delivered.
    pub fn last_tick(&self) -> Option<u32> {
        self.entries
            .iter()
            .map(|e| e.tick.saturating_add(e.repeat - 1))
            .max()
    }

    /// Events delivered on `tick`, in authored order.
    pub fn events_at(&self, tick: u32) -> Vec<InputEvent> {
        self.entries
            .iter()
            .take_while(|e| e.tick <= tick)
            .filter(|e| e.covers(tick))
            .map(|e| e.event)
            .collect()
    }
}
