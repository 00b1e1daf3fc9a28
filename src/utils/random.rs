//! # Random Source
//!
//! Every random decision in a generation run (split axis, split position, room
//! size and offset, corridor endpoints and bends) goes through one
//! [`RandomSource`]. Seeding it with [`RandomSource::from_seed`] replays the same
//! dungeon.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::GenerationError;

/// Uniform boolean, biased boolean and closed-range integer draws over a [`Rng`].
#[derive(Debug, Clone)]
pub struct RandomSource<R = StdRng> {
    rng: R,
}

impl RandomSource<StdRng> {
    /// A reproducible source: the same seed yields the same stream.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// A source seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> RandomSource<R> {
    pub fn new(rng: R) -> Self {
        RandomSource { rng }
    }

    /// Uniform draw in `[0, 1)`.
    pub fn draw(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Fair coin, decided by rounding a uniform draw (`[0.5, 1)` is heads).
    pub fn flip_coin(&mut self) -> bool {
        self.draw().round() == 1.0
    }

    /// Returns `true` with probability `chance`.
    ///
    /// `chance <= 0` never succeeds and `chance >= 1` always does.
    pub fn flip_coin_biased(&mut self, chance: f64) -> bool {
        self.draw() < chance
    }

    /// Uniform integer in the closed interval `[min, max]`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidRange`] when `max < min`.
    pub fn int_in_range(&mut self, min: i32, max: i32) -> Result<i32, GenerationError> {
        if max < min {
            return Err(GenerationError::InvalidRange { min, max });
        }
        Ok(self.rng.random_range(min..=max))
    }
}
