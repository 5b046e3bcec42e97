use crate::dice::Outcome;
use crate::error::Error;
use crate::error::Result;
use crate::table::Config;
use crate::table::Instructions;
use crate::table::PuckLocation;
use crate::table::Table;
use crate::table::signature::BetSignature;
use serde::{Deserialize, Serialize};

/// Wire shape of a table: the ruleset, the puck, and bet signatures.
///
/// This is how table state crosses the JSON boundary in both directions. A
/// live [`Table`] is rebuilt from it on the way in and reduced back to it
/// on the way out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableState {
    #[serde(default)]
    pub config: Config,
    #[serde(default)]
    pub puck_location: PuckLocation,
    #[serde(default)]
    pub existing_bets: Vec<BetSignature>,
}

impl TryFrom<&TableState> for Table {
    type Error = Error;
    fn try_from(state: &TableState) -> Result<Table> {
        Table::from_state(
            state.config.clone(),
            state.puck_location,
            &state.existing_bets,
        )
    }
}

impl From<&Table> for TableState {
    fn from(table: &Table) -> Self {
        Self {
            config: table.config().clone(),
            puck_location: table.point(),
            existing_bets: table.bet_signatures(),
        }
    }
}

/// One decision point, as submitted by a client. Everything is optional: an
/// empty request is a fresh table, no instructions, and a random roll.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub table: TableState,
    #[serde(default)]
    pub instructions: Instructions,
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default)]
    pub dice: Option<Outcome>,
}
