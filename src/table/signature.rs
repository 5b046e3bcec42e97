use crate::dice::Outcome;
use crate::table::kind::BetKind;
use crate::Chips;
use serde::{Deserialize, Serialize};

/// Explicit activity override for a toggleable bet, independent of the puck.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BetStatus {
    On,
    Off,
}

/// What a bet is "on": a point number for line and place-style bets, an
/// exact dice pair for a Hop. Kind-specific meaning; absence is modeled at
/// the use site with `Option<Placement>`.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Placement {
    Point(u8),
    Dice(Outcome),
}

impl Placement {
    pub fn point(&self) -> Option<u8> {
        match self {
            Self::Point(p) => Some(*p),
            Self::Dice(_) => None,
        }
    }
    pub fn dice(&self) -> Option<Outcome> {
        match self {
            Self::Point(_) => None,
            Self::Dice(o) => Some(*o),
        }
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Point(p) => write!(f, "{}", p),
            Self::Dice(o) => write!(f, "{}", o),
        }
    }
}

/// A table- and puck-independent snapshot of one wager.
///
/// This is the wire contract: bets cross the JSON boundary as signatures
/// and are rebuilt against a table on the way in. Absent fields are
/// omitted. `payout` and `vig_paid` are only ever set on the way out, on
/// winning bets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetSignature {
    #[serde(rename = "type")]
    pub kind: BetKind,
    pub wager: Chips,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub odds: Option<Chips>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_puck: Option<BetStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payout: Option<Chips>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vig_paid: Option<Chips>,
}

impl BetSignature {
    pub fn new(kind: BetKind, wager: Chips) -> Self {
        Self {
            kind,
            wager,
            odds: None,
            placement: None,
            override_puck: None,
            payout: None,
            vig_paid: None,
        }
    }
    pub fn on_point(self, point: u8) -> Self {
        Self {
            placement: Some(Placement::Point(point)),
            ..self
        }
    }
    pub fn on_dice(self, dice: Outcome) -> Self {
        Self {
            placement: Some(Placement::Dice(dice)),
            ..self
        }
    }
    pub fn with_odds(self, odds: Chips) -> Self {
        Self {
            odds: Some(odds),
            ..self
        }
    }
    /// Identity used for uniqueness and matching: "single" kinds compare
    /// by kind alone, everything else by kind and placement.
    pub fn identity(&self) -> (BetKind, Option<Placement>) {
        match self.kind.single_identity() {
            true => (self.kind, None),
            false => (self.kind, self.placement),
        }
    }
}

impl std::fmt::Display for BetSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {}", self.kind, self.wager)?;
        if let Some(placement) = &self.placement {
            write!(f, " on {}", placement)?;
        }
        if let Some(odds) = self.odds {
            write!(f, " odds {}", odds)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;

    #[test]
    fn absent_fields_are_omitted() {
        let sig = BetSignature::new(BetKind::PassLine, 10);
        let json = serde_json::to_string(&sig).unwrap();
        assert!(json == r#"{"type":"PassLine","wager":10}"#);
    }

    #[test]
    fn point_placement_is_bare_int() {
        let sig = BetSignature::new(BetKind::Place, 12).on_point(6);
        let json = serde_json::to_string(&sig).unwrap();
        assert!(json == r#"{"type":"Place","wager":12,"placement":6}"#);
    }

    #[test]
    fn hop_placement_is_dice_pair() -> Result<()> {
        let sig = BetSignature::new(BetKind::Hop, 5).on_dice(Outcome::new(3, 3)?);
        let json = serde_json::to_string(&sig).unwrap();
        assert!(json == r#"{"type":"Hop","wager":5,"placement":[3,3]}"#);
        let back: BetSignature = serde_json::from_str(&json).unwrap();
        assert!(back == sig);
        Ok(())
    }

    #[test]
    fn override_serializes_uppercase() {
        let sig = BetSignature {
            override_puck: Some(BetStatus::Off),
            ..BetSignature::new(BetKind::Hardway, 5).on_point(8)
        };
        let json = serde_json::to_string(&sig).unwrap();
        assert!(json.contains(r#""override_puck":"OFF""#));
        let back: BetSignature = serde_json::from_str(&json).unwrap();
        assert!(back.override_puck == Some(BetStatus::Off));
    }

    #[test]
    fn single_kinds_ignore_placement_in_identity() {
        let a = BetSignature::new(BetKind::Field, 5);
        let b = BetSignature::new(BetKind::Field, 10).on_point(4);
        assert!(a.identity() == b.identity());
        let a = BetSignature::new(BetKind::Place, 5).on_point(4);
        let b = BetSignature::new(BetKind::Place, 5).on_point(5);
        assert!(a.identity() != b.identity());
    }
}
