//! Deterministic [`StrengthSource`]s.

use std::collections::VecDeque;

use jsongen_core::StrengthSource;

/// Always draws the same value, clamped to the requested variation.
#[derive(Debug, Clone, Copy)]
pub struct FixedStrength(pub f64);

impl StrengthSource for FixedStrength {
    fn draw(&mut self, variation: f64) -> f64 {
        self.0.clamp(0.0, variation.max(0.0))
    }
}

/// Draws values from a list in order, then zero once exhausted.
#[derive(Debug, Clone, Default)]
pub struct SequenceStrength {
    draws: VecDeque<f64>,
    taken: usize,
}

impl SequenceStrength {
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            taken: 0,
        }
    }

    /// Number of draws made so far.
    pub fn taken(&self) -> usize {
        self.taken
    }
}

impl StrengthSource for SequenceStrength {
    fn draw(&mut self, _variation: f64) -> f64 {
        self.taken += 1;
        self.draws.pop_front().unwrap_or(0.0)
    }
}
