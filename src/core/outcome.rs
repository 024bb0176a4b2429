use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Source of per-operation success/failure decisions for the simulated
/// device. Always injected through the constructor; there is no process-wide
/// generator.
pub trait OutcomeSource: Send {
    /// Draw the next decision; `true` means the operation succeeds.
    fn next_outcome(&mut self) -> bool;
}

/// Fixed script of outcomes, consumed front to back. An exhausted script
/// fails every further draw, so a test that draws more than it scripted
/// notices instead of silently passing.
pub struct ScriptedOutcomes {
    script: VecDeque<bool>,
}

impl ScriptedOutcomes {
    pub fn new<I: IntoIterator<Item = bool>>(script: I) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl OutcomeSource for ScriptedOutcomes {
    fn next_outcome(&mut self) -> bool {
        self.script.pop_front().unwrap_or(false)
    }
}

/// Constant outcome, for always-succeed or always-fail setups.
pub struct FixedOutcomes(pub bool);

impl OutcomeSource for FixedOutcomes {
    fn next_outcome(&mut self) -> bool {
        self.0
    }
}

/// Pseudo-random outcomes from a seedable generator, for interactive use.
/// Succeeds `success_percent` times out of 100 (default 50).
pub struct RandomOutcomes {
    rng: StdRng,
    success_percent: u8,
}

impl RandomOutcomes {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            success_percent: 50,
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            success_percent: 50,
        }
    }

    pub fn with_success_percent(mut self, success_percent: u8) -> Self {
        self.success_percent = success_percent.min(100);
        self
    }
}

impl OutcomeSource for RandomOutcomes {
    fn next_outcome(&mut self) -> bool {
        self.rng.gen_range(1..=100) <= u32::from(self.success_percent)
    }
}
