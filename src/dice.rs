/// A roll of the craps dice.
///
/// The pair is unordered: (1, 3) and (3, 1) are the same roll, compare
/// equal, and hash identically. Faces are stored sorted to make that
/// structural.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
pub struct Outcome {
    lo: u8,
    hi: u8,
}

impl Outcome {
    pub fn new(first: u8, second: u8) -> Result<Self> {
        for die in [first, second] {
            if !(1..=6).contains(&die) {
                return Err(Error::InvalidOutcome(die));
            }
        }
        Ok(Self {
            lo: first.min(second),
            hi: first.max(second),
        })
    }
    pub fn total(&self) -> u8 {
        self.lo + self.hi
    }
    /// Both dice show the same face.
    pub fn is_hard(&self) -> bool {
        self.lo == self.hi
    }
    /// All 36 ordered pairs.
    pub fn all() -> Vec<Self> {
        (1..=6)
            .flat_map(|a| (1..=6).map(move |b| Self { lo: a.min(b), hi: a.max(b) }))
            .collect()
    }
    /// All 21 unordered pairs.
    pub fn all_unique() -> Vec<Self> {
        (1..=6)
            .flat_map(|a| (a..=6).map(move |b| Self { lo: a, hi: b }))
            .collect()
    }
    /// Count of ordered pairs summing to the given total.
    pub fn ways(total: u8) -> usize {
        Self::all().iter().filter(|o| o.total() == total).count()
    }
}

impl TryFrom<(u8, u8)> for Outcome {
    type Error = Error;
    fn try_from((a, b): (u8, u8)) -> Result<Self> {
        Self::new(a, b)
    }
}
impl From<Outcome> for (u8, u8) {
    fn from(o: Outcome) -> Self {
        (o.lo, o.hi)
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "({}, {})", self.lo, self.hi)
    }
}

impl Arbitrary for Outcome {
    fn random() -> Self {
        let ref mut rng = rand::rng();
        let a = rng.random_range(1..=6);
        let b = rng.random_range(1..=6);
        Self {
            lo: a.min(b),
            hi: a.max(b),
        }
    }
}

use crate::error::Error;
use crate::error::Result;
use crate::Arbitrary;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
