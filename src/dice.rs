use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// One roll of the two dice. A double makes its value usable four times.
///
/// Rolling takes the RNG as a parameter; the caller decides whether it is
/// seeded, which keeps every dice-dependent code path reproducible in
/// tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dice {
    die1: u8,
    die2: u8,
}

impl Dice {
    pub fn new(die1: u8, die2: u8) -> Self {
        assert!(
            (1..=6).contains(&die1) && (1..=6).contains(&die2),
            "die values must be in 1..=6"
        );
        Dice { die1, die2 }
    }

    pub fn roll(rng: &mut impl Rng) -> Self {
        let die1 = rng.random_range(1..=6);
        let die2 = rng.random_range(1..=6);
        Dice::new(die1, die2)
    }

    pub fn die1(&self) -> u8 {
        self.die1
    }

    pub fn die2(&self) -> u8 {
        self.die2
    }

    pub fn is_double(&self) -> bool {
        self.die1 == self.die2
    }

    /// The usable distances of this roll, in roll order: four copies for a
    /// double, otherwise both values.
    pub fn distances(&self) -> Vec<u8> {
        if self.is_double() {
            vec![self.die1; 4]
        } else {
            vec![self.die1, self.die2]
        }
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.die1, self.die2)
    }
}
