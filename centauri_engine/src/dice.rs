//! Randomness seam.
//!
//! Every random decision in the engine (event assignment, battle rolls, item loss)
//! goes through [`Dice`], so a session can be driven by real entropy, a fixed seed,
//! or a pre-loaded sequence of rolls.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniform rolls.
pub trait Dice {
    /// Roll a fair die with `sides` faces, returning a value in `0..sides`.
    /// A zero-sided die always returns 0.
    fn roll(&mut self, sides: u32) -> u32;
}

/// Dice backed by a `rand` generator.
#[derive(Debug)]
pub struct RandomDice {
    rng: StdRng,
}
impl RandomDice {
    /// Dice seeded from the operating system.
    pub fn from_os() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible dice for a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}
impl Dice for RandomDice {
    fn roll(&mut self, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        self.rng.random_range(0..sides)
    }
}

/// Dice that replay a queued sequence of faces.
///
/// Each queued value is reduced modulo the number of sides. Once the queue is
/// exhausted every roll comes up 0.
#[derive(Debug, Clone, Default)]
pub struct LoadedDice {
    faces: VecDeque<u32>,
    rolled: usize,
}
impl LoadedDice {
    pub fn new(faces: impl IntoIterator<Item = u32>) -> Self {
        Self {
            faces: faces.into_iter().collect(),
            rolled: 0,
        }
    }

    /// Number of rolls made so far.
    pub fn rolled(&self) -> usize {
        self.rolled
    }

    /// Faces still waiting in the queue.
    pub fn remaining(&self) -> usize {
        self.faces.len()
    }
}
impl Dice for LoadedDice {
    fn roll(&mut self, sides: u32) -> u32 {
        self.rolled += 1;
        if sides == 0 {
            return 0;
        }
        self.faces.pop_front().map_or(0, |face| face % sides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_dice_stay_in_range() {
        let mut dice = RandomDice::seeded(7);
        for _ in 0..500 {
            assert!(dice.roll(6) < 6);
        }
        assert_eq!(dice.roll(0), 0);
    }

    #[test]
    fn seeded_dice_are_reproducible() {
        let mut a = RandomDice::seeded(42);
        let mut b = RandomDice::seeded(42);
        let first: Vec<u32> = (0..20).map(|_| a.roll(11)).collect();
        let second: Vec<u32> = (0..20).map(|_| b.roll(11)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn loaded_dice_replay_then_fall_back_to_zero() {
        let mut dice = LoadedDice::new([4, 13, 2]);
        assert_eq!(dice.roll(6), 4);
        assert_eq!(dice.roll(11), 2);
        assert_eq!(dice.remaining(), 1);
        assert_eq!(dice.roll(6), 2);
        assert_eq!(dice.roll(6), 0);
        assert_eq!(dice.rolled(), 4);
    }
}
