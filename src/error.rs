use thiserror::Error;

/// Everything that can go wrong between a request and a resolved roll.
///
/// These are logic errors, not transient failures: each is raised
/// synchronously at the point of violation and aborts the enclosing
/// instruction batch or construction. Nothing here is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Structurally bad wager, odds, or placement.
    #[error("invalid bet: {0}")]
    InvalidBet(String),
    /// A legal bet used illegally for the current phase.
    #[error("bad bet action: {0}")]
    BadBetAction(String),
    /// A second instance of a bet that must be unique.
    #[error("duplicate bet: {0}")]
    DuplicateBet(String),
    /// Retrieving or resizing a bet its kind forbids.
    #[error("contract bet: {0}")]
    ContractBet(String),
    /// A ruleset that contradicts itself.
    #[error("inconsistent config: {0}")]
    InconsistentConfig(String),
    /// Odds or payout data queried for a point the ruleset does not define.
    #[error("no odds defined for point {0}")]
    UnknownOdds(u8),
    /// Puck placed while on, removed while off, or placed off the ruleset.
    #[error("illegal puck move: {0}")]
    IllegalMove(String),
    /// A die face outside 1-6.
    #[error("die face {0} is out of range")]
    InvalidOutcome(u8),
    /// A dice seed that is not 64 hex characters.
    #[error("invalid seed: {0}")]
    InvalidSeed(String),
}

impl Error {
    /// Stable taxonomy label, used by the wire error envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidBet(_) => "InvalidBet",
            Self::BadBetAction(_) => "BadBetAction",
            Self::DuplicateBet(_) => "DuplicateBet",
            Self::ContractBet(_) => "ContractBet",
            Self::InconsistentConfig(_) => "InconsistentConfig",
            Self::UnknownOdds(_) => "UnknownOdds",
            Self::IllegalMove(_) => "IllegalMove",
            Self::InvalidOutcome(_) => "InvalidOutcome",
            Self::InvalidSeed(_) => "InvalidSeed",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
