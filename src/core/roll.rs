//! Cowrie and die rolls with a deterministic, swappable source.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces the identical roll sequence
//! - **Serializable**: O(1) state capture and restore for persisted matches
//! - **Swappable**: `RollSource` lets tests script exact roll sequences
//!
//! The traditional game throws six binary cowrie shells and counts the
//! face-up shells (0..=6, binomial). The long-board variant throws a
//! single six-sided die (1..=6, uniform). Both are expressed as a
//! [`RollKind`] so the same rules code serves either distribution.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A single throw's movement value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Roll(pub u8);

impl Roll {
    /// Create a roll value.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Roll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which random distribution a board variant uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RollKind {
    /// Count of face-up shells out of `shells` fair binary throws.
    Cowries { shells: u8 },
    /// A uniform six-sided die.
    Die,
}

impl RollKind {
    /// Largest value this distribution can produce.
    #[must_use]
    pub fn max_value(self) -> u8 {
        match self {
            RollKind::Cowries { shells } => shells,
            RollKind::Die => 6,
        }
    }
}

/// Source of rolls. Production code uses [`RollRng`]; tests use
/// [`FixedRolls`] to script exact sequences.
pub trait RollSource {
    fn roll(&mut self, kind: RollKind) -> Roll;
}

/// Deterministic roll generator.
///
/// Uses ChaCha8 for speed while keeping high-quality randomness, and
/// supports O(1) state capture so a persisted match replays identically
/// after a reload.
#[derive(Clone, Debug)]
pub struct RollRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl RollRng {
    /// Create a new generator with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> RollRngState {
        RollRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &RollRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl RollSource for RollRng {
    fn roll(&mut self, kind: RollKind) -> Roll {
        match kind {
            RollKind::Cowries { shells } => {
                let mut face_up = 0u8;
                for _ in 0..shells {
                    if self.inner.gen_bool(0.5) {
                        face_up += 1;
                    }
                }
                Roll::new(face_up)
            }
            RollKind::Die => Roll::new(self.inner.gen_range(1..=6)),
        }
    }
}

/// Serializable generator state for checkpointing.
///
/// Uses the ChaCha8 word position for O(1) serialization regardless of
/// how many rolls have been drawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRngState {
    /// Original seed.
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter).
    pub word_pos: u128,
}

/// Scripted roll source for tests.
///
/// Returns the queued values in order and panics when exhausted, which in
/// a test points straight at the scenario step that over-rolled.
#[derive(Clone, Debug, Default)]
pub struct FixedRolls {
    queue: VecDeque<u8>,
}

impl FixedRolls {
    /// Script the given sequence of roll values.
    #[must_use]
    pub fn new(values: &[u8]) -> Self {
        Self {
            queue: values.iter().copied().collect(),
        }
    }

    /// Number of scripted rolls left.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl RollSource for FixedRolls {
    fn roll(&mut self, _kind: RollKind) -> Roll {
        let value = self
            .queue
            .pop_front()
            .expect("FixedRolls: scripted sequence exhausted");
        Roll::new(value)
    }
}
