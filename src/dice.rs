//! Die-roll providers.
//!
//! The game never draws randomness itself; every turn's shared roll comes
//! from a `DieRoller` supplied by the caller, so replays and tests can fix
//! the sequence.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::board::DIE_SIDES;

/// Source of die rolls in `1..=DIE_SIDES`.
pub trait DieRoller {
    fn roll(&mut self) -> u32;
}

impl<D: DieRoller + ?Sized> DieRoller for &mut D {
    fn roll(&mut self) -> u32 {
        (**self).roll()
    }
}

/// Uniform rolls from a small seedable PRNG.
#[derive(Debug, Clone)]
pub struct SeededDice {
    rng: SmallRng,
}

impl SeededDice {
    /// Seeds the dice; a seed of 0 draws from OS entropy instead.
    pub fn new(seed: u64) -> Self {
        let rng = if seed != 0 {
            SmallRng::seed_from_u64(seed)
        } else {
            SmallRng::from_entropy()
        };
        SeededDice { rng }
    }

    /// Wraps an already-seeded generator.
    pub fn from_rng(rng: SmallRng) -> Self {
        SeededDice { rng }
    }
}

impl DieRoller for SeededDice {
    fn roll(&mut self) -> u32 {
        self.rng.gen_range(1..=DIE_SIDES)
    }
}

/// Replays a fixed sequence of rolls, cycling when it runs out.
///
/// An empty sequence always rolls 1.
#[derive(Debug, Clone)]
pub struct LoadedDice {
    rolls: Vec<u32>,
    next: usize,
}

impl LoadedDice {
    pub fn new(rolls: Vec<u32>) -> Self {
        LoadedDice { rolls, next: 0 }
    }

    /// Dice that always show the same face.
    pub fn always(face: u32) -> Self {
        LoadedDice::new(vec![face])
    }
}

impl DieRoller for LoadedDice {
    fn roll(&mut self) -> u32 {
        if self.rolls.is_empty() {
            return 1;
        }
        let value = self.rolls[self.next % self.rolls.len()];
        self.next = (self.next + 1) % self.rolls.len();
        value
    }
}
