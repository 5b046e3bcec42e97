use crate::error::Error;
use crate::Arbitrary;
use crate::Chips;
use serde::{Deserialize, Serialize};

/// Every wager the table recognizes. A closed union: the wire `type`
/// string resolves through this registry and nothing else.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BetKind {
    PassLine,
    Come,
    DontPass,
    DontCome,
    Put,
    Place,
    Buy,
    Lay,
    Hardway,
    Field,
    AnySeven,
    AnyCraps,
    Hop,
    Horn,
    HornHigh,
    World,
    Craps3Way,
    CE,
}

impl BetKind {
    pub const ALL: [Self; 18] = [
        Self::PassLine,
        Self::Come,
        Self::DontPass,
        Self::DontCome,
        Self::Put,
        Self::Place,
        Self::Buy,
        Self::Lay,
        Self::Hardway,
        Self::Field,
        Self::AnySeven,
        Self::AnyCraps,
        Self::Hop,
        Self::Horn,
        Self::HornHigh,
        Self::World,
        Self::Craps3Way,
        Self::CE,
    ];

    /// Canonical wire name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PassLine => "PassLine",
            Self::Come => "Come",
            Self::DontPass => "DontPass",
            Self::DontCome => "DontCome",
            Self::Put => "Put",
            Self::Place => "Place",
            Self::Buy => "Buy",
            Self::Lay => "Lay",
            Self::Hardway => "Hardway",
            Self::Field => "Field",
            Self::AnySeven => "AnySeven",
            Self::AnyCraps => "AnyCraps",
            Self::Hop => "Hop",
            Self::Horn => "Horn",
            Self::HornHigh => "HornHigh",
            Self::World => "World",
            Self::Craps3Way => "Craps3Way",
            Self::CE => "CE",
        }
    }

    /// Fair odds may ride on top of the flat wager.
    pub const fn allows_odds(&self) -> bool {
        matches!(
            self,
            Self::PassLine | Self::Come | Self::DontPass | Self::DontCome | Self::Put
        )
    }
    /// The house charges a commission on this kind.
    pub const fn has_vig(&self) -> bool {
        matches!(self, Self::Buy | Self::Lay)
    }
    /// The player may pin the bet ON or OFF independent of the puck.
    pub const fn can_toggle(&self) -> bool {
        matches!(self, Self::Place | Self::Buy | Self::Lay | Self::Hardway)
    }
    /// Resolved by the very next roll, win or lose.
    pub const fn single_roll(&self) -> bool {
        matches!(
            self,
            Self::Field
                | Self::AnySeven
                | Self::AnyCraps
                | Self::Hop
                | Self::Horn
                | Self::HornHigh
                | Self::World
                | Self::Craps3Way
                | Self::CE
        )
    }
    /// The wager must divide evenly into this many sub-bets.
    pub const fn multi_bet(&self) -> Chips {
        match self {
            Self::Horn => 4,
            Self::HornHigh => 5,
            Self::World => 5,
            Self::Craps3Way => 3,
            Self::CE => 2,
            _ => 0,
        }
    }
    /// The bet's placement is assigned by the dice after creation.
    pub const fn traveling(&self) -> bool {
        matches!(
            self,
            Self::PassLine | Self::Come | Self::DontPass | Self::DontCome | Self::Put
        )
    }
    /// At most one such bet per table, regardless of placement; identity
    /// comparisons ignore where it sits.
    pub const fn single_identity(&self) -> bool {
        matches!(
            self,
            Self::PassLine
                | Self::DontPass
                | Self::Field
                | Self::AnySeven
                | Self::AnyCraps
                | Self::Horn
                | Self::World
                | Self::Craps3Way
                | Self::CE
        )
    }
    /// Initial activity override applied at construction. Lay works from
    /// the moment it hits the felt, point or no point.
    pub const fn initial_toggle(&self) -> Option<super::signature::BetStatus> {
        match self {
            Self::Lay => Some(super::signature::BetStatus::On),
            _ => None,
        }
    }
}

impl std::str::FromStr for BetKind {
    type Err = Error;
    /// Case-insensitive registry lookup; unknown names fail closed.
    fn from_str(s: &str) -> Result<Self, Error> {
        Self::ALL
            .iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| Error::InvalidBet(format!("{} is not a known bet type", s)))
    }
}

impl TryFrom<String> for BetKind {
    type Error = Error;
    fn try_from(s: String) -> Result<Self, Error> {
        s.parse()
    }
}
impl From<BetKind> for String {
    fn from(kind: BetKind) -> Self {
        kind.name().to_string()
    }
}

impl std::fmt::Display for BetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Arbitrary for BetKind {
    fn random() -> Self {
        use rand::prelude::IndexedRandom;
        let ref mut rng = rand::rng();
        Self::ALL.choose(rng).copied().expect("ALL is empty")
    }
}
