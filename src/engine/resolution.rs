use crate::dice::Outcome;
use crate::engine::request::TableState;
use crate::table::Config;
use crate::table::PuckLocation;
use crate::table::signature::BetSignature;
use crate::Chips;
use serde::Serialize;

/// The pre-roll table as echoed back to the caller, with its totals.
#[derive(Debug, Clone, Serialize)]
pub struct TableSnapshot {
    pub config: Config,
    pub puck_location: PuckLocation,
    pub bets: Vec<BetSignature>,
    pub value_on_table: Chips,
    pub value_at_risk: Chips,
}

/// Chip accounting for the roll, from the player's side of the rail.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub dice_outcome: Outcome,
    pub total_returned_to_player: Chips,
    pub total_winnings_to_player: Chips,
    pub value_of_losers: Chips,
    pub value_on_table: Chips,
    pub value_at_risk: Chips,
}

/// Everything one roll produced.
///
/// `table` is the state the dice hit (instructions applied, roll not yet
/// taken), `new_table` the state the next roll starts from. Winner
/// signatures are annotated with their payout and any vig paid.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub table: TableSnapshot,
    pub hash: Option<String>,
    pub winners: Vec<BetSignature>,
    pub losers: Vec<BetSignature>,
    pub returned: Vec<BetSignature>,
    pub new_table: TableState,
    pub summary: Summary,
}
