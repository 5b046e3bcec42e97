use crate::dice::Outcome;
use crate::error::Error;
use crate::error::Result;
use crate::table::config::Config;
use crate::table::kind::BetKind;
use crate::table::signature::BetSignature;
use crate::table::signature::BetStatus;
use crate::table::signature::Placement;
use crate::table::table::Table;
use crate::Chips;

/// A live wager on the felt.
///
/// Built from a [`BetSignature`] against a table and reducible back to one,
/// which is how bets cross the wire. All behavior dispatches on [`BetKind`]:
/// win/lose predicates, payout arithmetic, odds ceilings, vig, toggling, and
/// travel. The engine resolves copies of these, never the table's originals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bet {
    pub(crate) kind: BetKind,
    pub(crate) wager: Chips,
    pub(crate) odds: Option<Chips>,
    pub(crate) placement: Option<Placement>,
    pub(crate) toggle: Option<BetStatus>,
}

impl Bet {
    /// Rebuild a live bet from its wire signature.
    ///
    /// Validates the wager, the placement against the kind's legal set, and
    /// any riding odds against the ceiling for the placement. `payout` and
    /// `vig_paid` on the signature are output-only and ignored here.
    pub fn from_signature(sig: &BetSignature, table: &Table) -> Result<Self> {
        if sig.wager == 0 {
            return Err(Error::InvalidBet(format!(
                "{} wager must be a positive amount",
                sig.kind
            )));
        }
        let multi = sig.kind.multi_bet();
        if multi > 0 && sig.wager % multi != 0 {
            return Err(Error::InvalidBet(format!(
                "{} wager must divide evenly into {} parts",
                sig.kind, multi
            )));
        }
        Self::check_placement(sig, table.config())?;
        let mut bet = Self {
            kind: sig.kind,
            wager: sig.wager,
            odds: None,
            placement: sig.placement,
            toggle: sig.override_puck.or(sig.kind.initial_toggle()),
        };
        if let Some(odds) = sig.odds {
            match bet.point() {
                Some(_) => bet.set_odds(odds, table.config())?,
                None => bet.ride_odds(odds)?,
            }
        }
        Ok(bet)
    }

    fn check_placement(sig: &BetSignature, config: &Config) -> Result<()> {
        let kind = sig.kind;
        let point = sig.placement.and_then(|p| p.point());
        if config.is_crapless && matches!(kind, BetKind::DontPass | BetKind::DontCome) {
            return Err(Error::InvalidBet(format!(
                "{} is not offered on a crapless table",
                kind
            )));
        }
        match kind {
            BetKind::Put | BetKind::Place | BetKind::Buy | BetKind::Lay => match point {
                Some(p) if config.is_valid_point(p) => Ok(()),
                _ => Err(Error::InvalidBet(format!(
                    "{} requires a valid point placement",
                    kind
                ))),
            },
            BetKind::Hardway => match point {
                Some(4 | 6 | 8 | 10) => Ok(()),
                _ => Err(Error::InvalidBet(
                    "Hardway requires an even point placement".into(),
                )),
            },
            BetKind::HornHigh => match point {
                Some(2 | 3 | 11 | 12) => Ok(()),
                _ => Err(Error::InvalidBet(
                    "HornHigh requires a horn number placement".into(),
                )),
            },
            BetKind::Hop => match sig.placement.and_then(|p| p.dice()) {
                Some(_) => Ok(()),
                None => Err(Error::InvalidBet("Hop requires a dice pair placement".into())),
            },
            BetKind::PassLine | BetKind::Come | BetKind::DontPass | BetKind::DontCome => {
                match sig.placement {
                    None => Ok(()),
                    Some(Placement::Point(p)) if config.is_valid_point(p) => Ok(()),
                    Some(_) => Err(Error::InvalidBet(format!(
                        "{} cannot sit on that placement",
                        kind
                    ))),
                }
            }
            _ => Ok(()),
        }
    }

    pub fn kind(&self) -> BetKind {
        self.kind
    }
    pub fn wager(&self) -> Chips {
        self.wager
    }
    pub fn odds(&self) -> Option<Chips> {
        self.odds
    }
    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }
    /// The point this bet sits on, if its placement is a point at all.
    pub fn point(&self) -> Option<u8> {
        self.placement.and_then(|p| p.point())
    }

    /// Reduce to the wire signature. The inverse of [`Bet::from_signature`].
    pub fn signature(&self) -> BetSignature {
        BetSignature {
            kind: self.kind,
            wager: self.wager,
            odds: self.odds,
            placement: self.placement,
            override_puck: self.toggle,
            payout: None,
            vig_paid: None,
        }
    }

    pub fn identity(&self) -> (BetKind, Option<Placement>) {
        match self.kind.single_identity() {
            true => (self.kind, None),
            false => (self.kind, self.placement),
        }
    }

    /// Whether the bet is working this roll. Non-toggleable kinds are always
    /// working; toggleable kinds follow the puck unless pinned ON or OFF.
    pub fn is_on(&self, table: &Table) -> bool {
        match self.kind.can_toggle() {
            false => true,
            true => match self.toggle {
                Some(BetStatus::On) => true,
                Some(BetStatus::Off) => false,
                None => table.puck().is_on(),
            },
        }
    }

    pub fn is_winner(&self, table: &Table, dice: &Outcome) -> bool {
        let total = dice.total();
        match self.kind {
            BetKind::PassLine | BetKind::Come | BetKind::Put => match self.point() {
                Some(point) => total == point,
                None => total == 7 || (!table.config().is_crapless && total == 11),
            },
            BetKind::DontPass | BetKind::DontCome => match self.point() {
                Some(_) => total == 7,
                None => [2, 3, 12].contains(&total) && total != table.config().dont_bar,
            },
            BetKind::Place | BetKind::Buy => self.is_on(table) && Some(total) == self.point(),
            BetKind::Lay => self.is_on(table) && total == 7,
            BetKind::Hardway => {
                self.is_on(table) && Some(total) == self.point() && dice.is_hard()
            }
            BetKind::Field => [2, 3, 4, 9, 10, 11, 12].contains(&total),
            BetKind::AnySeven => total == 7,
            BetKind::AnyCraps | BetKind::Craps3Way => [2, 3, 12].contains(&total),
            BetKind::Hop => self.placement.and_then(|p| p.dice()) == Some(*dice),
            BetKind::Horn | BetKind::HornHigh | BetKind::World | BetKind::CE => {
                [2, 3, 11, 12].contains(&total)
            }
        }
    }

    pub fn is_loser(&self, table: &Table, dice: &Outcome) -> bool {
        let total = dice.total();
        match self.kind {
            BetKind::PassLine | BetKind::Come | BetKind::Put => match self.point() {
                Some(_) => total == 7,
                None => !table.config().is_crapless && [2, 3, 12].contains(&total),
            },
            BetKind::DontPass | BetKind::DontCome => match self.point() {
                Some(point) => total == point,
                None => [7, 11].contains(&total),
            },
            BetKind::Place | BetKind::Buy => self.is_on(table) && total == 7,
            BetKind::Lay => self.is_on(table) && Some(total) == self.point(),
            BetKind::Hardway => {
                self.is_on(table) && Some(total) == self.point() && !dice.is_hard()
            }
            // seven is a push for World: the AnySeven leg covers the horn legs
            BetKind::World => ![2, 3, 7, 11, 12].contains(&total),
            kind if kind.single_roll() => !self.is_winner(table, dice),
            _ => false,
        }
    }

    /// Winnings owed on this roll, zero when the bet did not win. Line bets
    /// pay even money on the flat wager plus fair odds on the backing; the
    /// wrong side lays through the reciprocal of true odds. Buy and Lay pay
    /// true odds less the vig. Arithmetic saturates at `Chips::MAX` rather
    /// than wrapping.
    pub fn payout(&self, table: &Table, dice: &Outcome) -> Result<Chips> {
        if !self.is_winner(table, dice) {
            return Ok(0);
        }
        let config = table.config();
        let total = dice.total();
        match self.kind {
            BetKind::PassLine | BetKind::Come | BetKind::Put => {
                let backing = match (self.odds, self.point()) {
                    (Some(odds), Some(point)) => config.true_odds(point)?.times(odds),
                    _ => 0,
                };
                Ok(self.wager.saturating_add(backing))
            }
            BetKind::DontPass | BetKind::DontCome => {
                let backing = match (self.odds, self.point()) {
                    (Some(odds), Some(point)) => config.true_odds(point)?.divide(odds),
                    _ => 0,
                };
                Ok(self.wager.saturating_add(backing))
            }
            BetKind::Place => match self.point() {
                Some(point) => Ok(config.place_odds(point)?.times(self.wager)),
                None => Ok(0),
            },
            BetKind::Buy => match self.point() {
                Some(point) => {
                    Ok(config.true_odds(point)?.times(self.wager) - self.vig(config)?)
                }
                None => Ok(0),
            },
            BetKind::Lay => match self.point() {
                Some(point) => {
                    Ok(config.true_odds(point)?.divide(self.wager) - self.vig(config)?)
                }
                None => Ok(0),
            },
            BetKind::Hardway => {
                Ok(self.wager.saturating_mul(if total == 4 || total == 10 { 7 } else { 9 }))
            }
            BetKind::Field => Ok(self.wager.saturating_mul(match total {
                2 => config.field_2_pay,
                12 => config.field_12_pay,
                _ => 1,
            })),
            BetKind::AnySeven => Ok(self.wager.saturating_mul(4)),
            BetKind::AnyCraps => Ok(self.wager.saturating_mul(7)),
            BetKind::Hop => Ok(self.wager.saturating_mul(self.hop_pay(config, dice))),
            BetKind::Horn => Ok((self.wager / 4).saturating_mul(self.hop_pay(config, dice))),
            BetKind::HornHigh => {
                let unit = self.wager / 5;
                match Some(total) == self.point() {
                    true => Ok(unit.saturating_mul(2).saturating_mul(self.hop_pay(config, dice))),
                    false => Ok(unit.saturating_mul(self.hop_pay(config, dice))),
                }
            }
            BetKind::World => Ok((self.wager / 5).saturating_mul(self.hop_pay(config, dice))),
            BetKind::Craps3Way => Ok((self.wager / 3).saturating_mul(self.hop_pay(config, dice))),
            BetKind::CE => match [2, 3, 12].contains(&total) {
                true => Ok((self.wager / 2).saturating_mul(7)),
                false => Ok((self.wager / 2).saturating_mul(config.hop_easy_pay_to_one)),
            },
        }
    }

    fn hop_pay(&self, config: &Config, dice: &Outcome) -> Chips {
        match dice.is_hard() {
            true => config.hop_hard_pay_to_one,
            false => config.hop_easy_pay_to_one,
        }
    }

    /// Ceiling for fair odds on this bet. The right side takes the
    /// configured multiple of the wager; the wrong side's ceiling is that
    /// maximum win translated back through true odds.
    pub fn max_odds(&self, config: &Config) -> Result<Chips> {
        if !self.kind.allows_odds() {
            return Ok(0);
        }
        let point = self.point().ok_or_else(|| {
            Error::InvalidBet(format!("{} has no point to back with odds", self.kind))
        })?;
        let max_win = config.max_odds(point)?.saturating_mul(self.wager);
        match self.kind {
            BetKind::DontPass | BetKind::DontCome => Ok(config.true_odds(point)?.times(max_win)),
            _ => Ok(max_win),
        }
    }

    pub fn set_odds(&mut self, odds: Chips, config: &Config) -> Result<()> {
        if !self.kind.allows_odds() {
            return Err(Error::InvalidBet(format!(
                "odds cannot back a {} bet",
                self.kind
            )));
        }
        if odds == 0 {
            return Err(Error::InvalidBet("odds must be a positive amount".into()));
        }
        let max = self.max_odds(config)?;
        if odds > max {
            return Err(Error::InvalidBet(format!(
                "odds of {} exceed the table maximum of {}",
                odds, max
            )));
        }
        self.odds = Some(odds);
        Ok(())
    }

    /// Re-attach odds that came home with a reset line bet. With no point
    /// there is no ceiling to check yet; the odds go back to work when the
    /// bet travels to its next point.
    fn ride_odds(&mut self, odds: Chips) -> Result<()> {
        if !self.kind.allows_odds() {
            return Err(Error::InvalidBet(format!(
                "odds cannot back a {} bet",
                self.kind
            )));
        }
        if odds == 0 {
            return Err(Error::InvalidBet("odds must be a positive amount".into()));
        }
        self.odds = Some(odds);
        Ok(())
    }

    pub fn remove_odds(&mut self) {
        self.odds = None;
    }

    /// The house commission on Buy and Lay. Buy pays 5% of the wager; Lay
    /// pays 5% of the amount it stands to win.
    pub fn vig(&self, config: &Config) -> Result<Chips> {
        match self.kind {
            BetKind::Buy => Ok(self.wager / 20),
            BetKind::Lay => match self.point() {
                Some(point) => {
                    Ok(config.true_odds(point)?.recip().times(self.wager.saturating_mul(5)) / 100)
                }
                None => Ok(0),
            },
            _ => Ok(0),
        }
    }

    /// Vig refunded when the bet comes down, nonzero only when the config
    /// collects it up front.
    pub fn return_vig(&self, config: &Config) -> Result<Chips> {
        match self.kind {
            BetKind::Buy if config.pay_vig_before_buy => self.vig(config),
            BetKind::Lay if config.pay_vig_before_lay => self.vig(config),
            _ => Ok(0),
        }
    }

    /// Contract rules. A traveling right-side bet locks in once it has a
    /// point; the wrong side may always come down but never press up.
    pub fn can_remove(&self) -> bool {
        match self.kind {
            BetKind::PassLine | BetKind::Come | BetKind::Put => self.placement.is_none(),
            _ => true,
        }
    }
    pub fn can_increase(&self) -> bool {
        match self.kind {
            BetKind::DontPass | BetKind::DontCome => self.placement.is_none(),
            _ => true,
        }
    }
    pub fn can_decrease(&self) -> bool {
        match self.kind {
            BetKind::PassLine | BetKind::Come | BetKind::Put => self.placement.is_none(),
            _ => true,
        }
    }

    /// Assign a traveling bet its point. Happens exactly once per cycle.
    pub fn move_to(&mut self, point: u8, config: &Config) -> Result<()> {
        if !self.kind.traveling() {
            return Err(Error::BadBetAction(format!(
                "{} bets do not travel",
                self.kind
            )));
        }
        if let Some(placement) = self.placement {
            return Err(Error::BadBetAction(format!(
                "{} already sits on {}",
                self.kind, placement
            )));
        }
        if !config.is_valid_point(point) {
            return Err(Error::BadBetAction(format!(
                "{} is not a point on this table",
                point
            )));
        }
        self.placement = Some(Placement::Point(point));
        Ok(())
    }

    /// Point hit: the line bet stays up and the cycle restarts. Riding odds
    /// stay attached and go to work again when the next point is set.
    pub(crate) fn reset_placement(&mut self) {
        self.placement = None;
    }

    pub(crate) fn set_wager(&mut self, wager: Chips) {
        self.wager = wager;
    }

    pub fn turn_on(&mut self) -> Result<()> {
        match self.kind.can_toggle() {
            true => Ok(self.toggle = Some(BetStatus::On)),
            false => Err(Error::BadBetAction(format!(
                "cannot turn on a {} bet",
                self.kind
            ))),
        }
    }
    pub fn turn_off(&mut self) -> Result<()> {
        match self.kind.can_toggle() {
            true => Ok(self.toggle = Some(BetStatus::Off)),
            false => Err(Error::BadBetAction(format!(
                "cannot turn off a {} bet",
                self.kind
            ))),
        }
    }
    pub fn follow_puck(&mut self) -> Result<()> {
        match self.kind.can_toggle() {
            true => Ok(self.toggle = None),
            false => Err(Error::BadBetAction(format!(
                "cannot make a {} bet follow the puck",
                self.kind
            ))),
        }
    }
}

impl std::fmt::Display for Bet {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.signature())
    }
}
