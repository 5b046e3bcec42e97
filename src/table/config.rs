use crate::dice::Outcome;
use crate::error::Error;
use crate::error::Result;
use crate::table::odds::Odds;
use crate::table::odds::OddsSpec;
use crate::table::ratio::Ratio;
use crate::Chips;
use serde::{Deserialize, Serialize};

/// Immutable house rules for one table.
///
/// Built once, validated once, then only read. Every bet resolves against
/// the same `Config` for the lifetime of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawConfig")]
pub struct Config {
    /// Allow a Buy bet on 5 and 9.
    pub allow_buy_59: bool,
    /// Allow Put bets.
    pub allow_put: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bet_max: Option<Chips>,
    pub bet_min: Chips,
    /// The craps number on which Don't bets push instead of winning.
    pub dont_bar: u8,
    /// Field multiplier for a 12.
    pub field_12_pay: Chips,
    /// Field multiplier for a 2.
    pub field_2_pay: Chips,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hard_way_max: Option<Chips>,
    /// Pay-to-one for easy hops (including 3 and 11).
    pub hop_easy_pay_to_one: Chips,
    /// Pay-to-one for hard hops (including 2 and 12).
    pub hop_hard_pay_to_one: Chips,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hop_max: Option<Chips>,
    pub is_crapless: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_buy_lay: Option<Chips>,
    /// Maximum fair-odds multiples for Pass/Come/Don't bets.
    pub odds: Odds,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub odds_max: Option<Chips>,
    /// Vig collected when a Buy bet is placed rather than when it wins.
    pub pay_vig_before_buy: bool,
    /// Vig collected when a Lay bet is placed rather than when it wins.
    pub pay_vig_before_lay: bool,
    /// Place odds for 2 and 12 on a crapless table.
    pub place_2_12_odds: Ratio,
    /// Place odds for 3 and 11 on a crapless table.
    pub place_3_11_odds: Ratio,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            allow_buy_59: false,
            allow_put: false,
            bet_max: None,
            bet_min: 5,
            dont_bar: 12,
            field_12_pay: 3,
            field_2_pay: 2,
            hard_way_max: None,
            hop_easy_pay_to_one: 15,
            hop_hard_pay_to_one: 30,
            hop_max: None,
            is_crapless: false,
            min_buy_lay: None,
            odds: Odds::mirrored345(),
            odds_max: None,
            pay_vig_before_buy: false,
            pay_vig_before_lay: false,
            place_2_12_odds: Ratio(11, 2),
            place_3_11_odds: Ratio(11, 4),
        }
    }
}

impl Config {
    pub fn valid_points(&self) -> Vec<u8> {
        self.odds.valid_points()
    }
    pub fn is_valid_point(&self, point: u8) -> bool {
        self.odds.covers(point)
    }
    /// Maximum fair-odds multiple for a point.
    pub fn max_odds(&self, point: u8) -> Result<Chips> {
        self.odds.multiple(point)
    }
    /// The mathematically fair payout ratio for a point: ways to roll a
    /// seven over ways to roll the point.
    pub fn true_odds(&self, point: u8) -> Result<Ratio> {
        match Outcome::ways(point) {
            0 => Err(Error::UnknownOdds(point)),
            ways => Ok(Ratio::of(Outcome::ways(7) as Chips, ways as Chips)),
        }
    }
    /// House payout ratio for a Place bet, distinct from true odds.
    pub fn place_odds(&self, place: u8) -> Result<Ratio> {
        match place {
            6 | 8 => Ok(Ratio(7, 6)),
            5 | 9 => Ok(Ratio(7, 5)),
            4 | 10 => Ok(Ratio(9, 5)),
            3 | 11 if self.is_crapless => Ok(self.place_3_11_odds),
            2 | 12 if self.is_crapless => Ok(self.place_2_12_odds),
            _ => Err(Error::UnknownOdds(place)),
        }
    }

    fn validate(self) -> Result<Self> {
        if self.is_crapless && !self.odds.is_crapless_shape() {
            return Err(Error::InconsistentConfig(
                "crapless table requires crapless-shaped odds".into(),
            ));
        }
        if !self.is_crapless && self.odds.is_crapless_shape() {
            return Err(Error::InconsistentConfig(
                "standard table requires standard-shaped odds".into(),
            ));
        }
        if ![2, 3, 12].contains(&self.dont_bar) {
            return Err(Error::InconsistentConfig(
                "dont_bar must bar a craps number".into(),
            ));
        }
        if self.bet_min == 0 {
            return Err(Error::InconsistentConfig("bet_min must be positive".into()));
        }
        if self.bet_min % 5 != 0 {
            return Err(Error::InconsistentConfig(
                "bet_min must be a multiple of 5".into(),
            ));
        }
        if let Some(max) = self.bet_max {
            if max % 5 != 0 {
                return Err(Error::InconsistentConfig(
                    "bet_max must be a multiple of 5".into(),
                ));
            }
            if max < self.bet_min {
                return Err(Error::InconsistentConfig(
                    "bet_max must be at least bet_min".into(),
                ));
            }
        }
        Ok(self)
    }
}

/// Unvalidated wire shape. Defaults fill in before validation runs, so a
/// partially specified ruleset is fine but a contradictory one is not.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfig {
    #[serde(default)]
    pub allow_buy_59: Option<bool>,
    #[serde(default)]
    pub allow_put: Option<bool>,
    #[serde(default)]
    pub bet_max: Option<Chips>,
    #[serde(default)]
    pub bet_min: Option<Chips>,
    #[serde(default)]
    pub dont_bar: Option<u8>,
    #[serde(default)]
    pub field_12_pay: Option<Chips>,
    #[serde(default)]
    pub field_2_pay: Option<Chips>,
    #[serde(default)]
    pub hard_way_max: Option<Chips>,
    #[serde(default)]
    pub hop_easy_pay_to_one: Option<Chips>,
    #[serde(default)]
    pub hop_hard_pay_to_one: Option<Chips>,
    #[serde(default)]
    pub hop_max: Option<Chips>,
    #[serde(default)]
    pub is_crapless: Option<bool>,
    #[serde(default)]
    pub min_buy_lay: Option<Chips>,
    #[serde(default)]
    pub odds: Option<OddsSpec>,
    #[serde(default)]
    pub odds_max: Option<Chips>,
    #[serde(default)]
    pub pay_vig_before_buy: Option<bool>,
    #[serde(default)]
    pub pay_vig_before_lay: Option<bool>,
    #[serde(default)]
    pub place_2_12_odds: Option<Ratio>,
    #[serde(default)]
    pub place_3_11_odds: Option<Ratio>,
}

impl TryFrom<RawConfig> for Config {
    type Error = Error;
    fn try_from(raw: RawConfig) -> Result<Self> {
        let defaults = Config::default();
        let is_crapless = raw.is_crapless.unwrap_or(defaults.is_crapless);
        let odds = match raw.odds {
            Some(spec) => spec.resolve(is_crapless)?,
            None => defaults.odds,
        };
        Config {
            allow_buy_59: raw.allow_buy_59.unwrap_or(defaults.allow_buy_59),
            allow_put: raw.allow_put.unwrap_or(defaults.allow_put),
            bet_max: raw.bet_max,
            bet_min: raw.bet_min.unwrap_or(defaults.bet_min),
            dont_bar: raw.dont_bar.unwrap_or(defaults.dont_bar),
            field_12_pay: raw.field_12_pay.unwrap_or(defaults.field_12_pay),
            field_2_pay: raw.field_2_pay.unwrap_or(defaults.field_2_pay),
            hard_way_max: raw.hard_way_max,
            hop_easy_pay_to_one: raw
                .hop_easy_pay_to_one
                .unwrap_or(defaults.hop_easy_pay_to_one),
            hop_hard_pay_to_one: raw
                .hop_hard_pay_to_one
                .unwrap_or(defaults.hop_hard_pay_to_one),
            hop_max: raw.hop_max,
            is_crapless,
            min_buy_lay: raw.min_buy_lay,
            odds,
            odds_max: raw.odds_max,
            pay_vig_before_buy: raw.pay_vig_before_buy.unwrap_or(defaults.pay_vig_before_buy),
            pay_vig_before_lay: raw.pay_vig_before_lay.unwrap_or(defaults.pay_vig_before_lay),
            place_2_12_odds: raw.place_2_12_odds.unwrap_or(defaults.place_2_12_odds),
            place_3_11_odds: raw.place_3_11_odds.unwrap_or(defaults.place_3_11_odds),
        }
        .validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_json(json: &str) -> Result<Config> {
        serde_json::from_str::<Config>(json).map_err(|e| Error::InconsistentConfig(e.to_string()))
    }

    #[test]
    fn default_ruleset() {
        let config = Config::default();
        assert!(config.bet_min == 5);
        assert!(config.dont_bar == 12);
        assert!(config.valid_points() == vec![4, 5, 6, 8, 9, 10]);
    }

    #[test]
    fn empty_object_is_default() {
        assert!(from_json("{}").unwrap() == Config::default());
    }

    #[test]
    fn true_odds_by_point() {
        let config = Config::default();
        assert!(config.true_odds(4).unwrap() == Ratio(2, 1));
        assert!(config.true_odds(5).unwrap() == Ratio(3, 2));
        assert!(config.true_odds(6).unwrap() == Ratio(6, 5));
        assert!(config.true_odds(10).unwrap() == Ratio(2, 1));
        assert!(config.true_odds(13).is_err());
    }

    #[test]
    fn place_odds_by_point() {
        let config = Config::default();
        assert!(config.place_odds(6).unwrap() == Ratio(7, 6));
        assert!(config.place_odds(9).unwrap() == Ratio(7, 5));
        assert!(config.place_odds(10).unwrap() == Ratio(9, 5));
        assert!(config.place_odds(11).is_err());
    }

    #[test]
    fn crapless_place_odds() {
        let config = from_json(r#"{"is_crapless": true, "odds": "flat(5)"}"#).unwrap();
        assert!(config.place_odds(2).unwrap() == Ratio(11, 2));
        assert!(config.place_odds(11).unwrap() == Ratio(11, 4));
        assert!(config.valid_points().contains(&3));
    }

    #[test]
    fn crapless_requires_crapless_odds() {
        assert!(from_json(r#"{"is_crapless": true}"#).is_err());
        assert!(from_json(r#"{"is_crapless": true, "odds": "mirrored345()"}"#).is_err());
    }

    #[test]
    fn standard_rejects_crapless_odds() {
        let multiples: std::collections::BTreeMap<u8, Chips> =
            crate::table::odds::CRAPLESS_POINTS.iter().map(|&p| (p, 5)).collect();
        let json = format!(
            r#"{{"odds": {}}}"#,
            serde_json::to_string(&multiples).unwrap()
        );
        assert!(from_json(&json).is_err());
    }

    #[test]
    fn dont_bar_must_be_craps() {
        assert!(from_json(r#"{"dont_bar": 11}"#).is_err());
        assert!(from_json(r#"{"dont_bar": 2}"#).is_ok());
        assert!(from_json(r#"{"dont_bar": 3}"#).is_ok());
    }

    #[test]
    fn bet_bounds_validated() {
        assert!(from_json(r#"{"bet_min": 0}"#).is_err());
        assert!(from_json(r#"{"bet_min": 7}"#).is_err());
        assert!(from_json(r#"{"bet_max": 3}"#).is_err());
        assert!(from_json(r#"{"bet_min": 10, "bet_max": 5}"#).is_err());
        assert!(from_json(r#"{"bet_min": 10, "bet_max": 500}"#).is_ok());
    }

    #[test]
    fn round_trips_through_json() {
        let config = from_json(r#"{"bet_min": 10, "odds": "flat(2)", "dont_bar": 3}"#).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert!(from_json(&json).unwrap() == config);
    }
}
