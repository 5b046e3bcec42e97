use crate::table::signature::BetSignature;
use serde::{Deserialize, Serialize};

/// One batch of dealer instructions, keyed by verb.
///
/// Verbs apply in a fixed order regardless of wire order: retrieve, place,
/// update, set_odds, remove_odds, turn_on, turn_off, follow_puck. Retrieval
/// runs before placement so a bet can be replaced in a single batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instructions {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub retrieve: Vec<BetSignature>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub place: Vec<BetSignature>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub update: Vec<BetSignature>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub set_odds: Vec<BetSignature>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remove_odds: Vec<BetSignature>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub turn_on: Vec<BetSignature>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub turn_off: Vec<BetSignature>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub follow_puck: Vec<BetSignature>,
}

impl Instructions {
    pub fn place(sigs: Vec<BetSignature>) -> Self {
        Self {
            place: sigs,
            ..Self::default()
        }
    }
    pub fn is_empty(&self) -> bool {
        self.retrieve.is_empty()
            && self.place.is_empty()
            && self.update.is_empty()
            && self.set_odds.is_empty()
            && self.remove_odds.is_empty()
            && self.turn_on.is_empty()
            && self.turn_off.is_empty()
            && self.follow_puck.is_empty()
    }
}
