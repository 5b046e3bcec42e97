use crate::error::Error;
use crate::Chips;
use serde::{Deserialize, Serialize};

/// An exact payout fraction, reduced on construction.
///
/// Payouts floor toward the house, so multiplication and division by a
/// wager happen in integer arithmetic against the reduced fraction.
#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "(Chips, Chips)", into = "(Chips, Chips)")]
pub struct Ratio(pub Chips, pub Chips);

impl TryFrom<(Chips, Chips)> for Ratio {
    type Error = Error;
    fn try_from((a, b): (Chips, Chips)) -> Result<Self, Error> {
        match b {
            0 => Err(Error::InconsistentConfig("ratio denominator is zero".into())),
            _ => Ok(Self::of(a, b)),
        }
    }
}
impl From<Ratio> for (Chips, Chips) {
    fn from(r: Ratio) -> Self {
        (r.0, r.1)
    }
}

impl Ratio {
    /// Reduce and construct. Callers guarantee a nonzero denominator.
    pub fn of(a: Chips, b: Chips) -> Self {
        let (a, b) = Self::gcd(a, b);
        Self(a, b)
    }
    fn gcd(a: Chips, b: Chips) -> (Chips, Chips) {
        let (mut x, mut y) = (a, b);
        while y != 0 {
            (x, y) = (y, x % y);
        }
        (a / x, b / x)
    }
    /// floor(amount * self). Widened internally; saturates at `Chips::MAX`.
    pub fn times(&self, amount: Chips) -> Chips {
        let wide = amount as u128 * self.0 as u128 / self.1 as u128;
        Chips::try_from(wide).unwrap_or(Chips::MAX)
    }
    /// floor(amount / self). Widened internally; saturates at `Chips::MAX`.
    pub fn divide(&self, amount: Chips) -> Chips {
        let wide = amount as u128 * self.1 as u128 / self.0 as u128;
        Chips::try_from(wide).unwrap_or(Chips::MAX)
    }
    pub fn recip(&self) -> Self {
        Self(self.1, self.0)
    }
}

impl std::fmt::Display for Ratio {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}:{}", self.0, self.1)
    }
}
