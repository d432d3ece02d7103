//! Randomized input source.
//!
//! Simulates a player mashing buttons: held inputs are pressed and released
//! as pairs, attack taps arrive in bursts, and the stick wanders. Seeded, so
//! a failing soak run can be replayed exactly.

use combat_character::{ControlMode, InputEvent};
use combat_shared::math::Vec2;
use rand::{rngs::StdRng, Rng, SeedableRng};

bitflags::bitflags! {
    /// Inputs the masher is currently holding down.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct HeldButtons: u8 {
        const MOVE = 1 << 0;
        const SPRINT = 1 << 1;
        const BLOCK = 1 << 2;
    }
}

/// Per-tick probabilities for the masher.
#[derive(Debug, Clone, Copy)]
pub struct MashRates {
    pub attack: f64,
    pub heavy_share: f64,
    pub toggle_move: f64,
    pub toggle_sprint: f64,
    pub toggle_block: f64,
    pub switch_mode: f64,
    pub toggle_focus: f64,
}

impl Default for MashRates {
    fn default() -> Self {
        Self {
            attack: 0.08,
            heavy_share: 0.3,
            toggle_move: 0.03,
            toggle_sprint: 0.01,
            toggle_block: 0.02,
            switch_mode: 0.004,
            toggle_focus: 0.006,
        }
    }
}

/// Seeded random input generator.
pub struct ButtonMasher {
    rng: StdRng,
    rates: MashRates,
    held: HeldButtons,
    stick: Vec2,
    mode: ControlMode,
}

impl ButtonMasher {
    pub fn new(seed: u64) -> Self {
        Self::with_rates(seed, MashRates::default())
    }

    pub fn with_rates(seed: u64, rates: MashRates) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            rates,
            held: HeldButtons::empty(),
            stick: Vec2::ZERO,
            mode: ControlMode::Slow,
        }
    }

    pub fn held(&self) -> HeldButtons {
        self.held
    }

    fn toggle(&mut self, button: HeldButtons, rate: f64) -> Option<bool> {
        if !self.rng.gen_bool(rate) {
            return None;
        }
        self.held.toggle(button);
        Some(self.held.contains(button))
    }

    /// Events for the next tick.
    pub fn next_events(&mut self) -> Vec<InputEvent> {
        let rates = self.rates;
        let mut events = Vec::new();

        if let Some(down) = self.toggle(HeldButtons::MOVE, rates.toggle_move) {
            self.stick = if down {
                Vec2::new(self.rng.gen_range(-1.0..=1.0), self.rng.gen_range(-1.0..=1.0))
            } else {
                Vec2::ZERO
            };
        }
        if self.held.contains(HeldButtons::MOVE) && !self.stick.is_zero() {
            events.push(InputEvent::Move { axis: self.stick });
        }

        if self.rng.gen_bool(0.1) {
            events.push(InputEvent::Look {
                axis: Vec2::new(self.rng.gen_range(-2.0..=2.0), self.rng.gen_range(-0.5..=0.5)),
            });
        }

        if let Some(held) = self.toggle(HeldButtons::SPRINT, rates.toggle_sprint) {
            events.push(InputEvent::Sprint { held });
        }
        if let Some(held) = self.toggle(HeldButtons::BLOCK, rates.toggle_block) {
            events.push(InputEvent::Block { held });
        }

        if self.rng.gen_bool(rates.attack) {
            if self.rng.gen_bool(rates.heavy_share) {
                events.push(InputEvent::HeavyAttack);
            } else {
                events.push(InputEvent::LightAttack);
            }
        }

        if self.rng.gen_bool(rates.switch_mode) {
            self.mode = match self.mode {
                ControlMode::Slow => ControlMode::Action,
                ControlMode::Action => ControlMode::Slow,
            };
            events.push(InputEvent::ControlMode { mode: self.mode });
        }
        if self.rng.gen_bool(rates.toggle_focus) {
            events.push(InputEvent::ToggleFocus);
        }

        events
    }
}
