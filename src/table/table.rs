use crate::error::Error;
use crate::error::Result;
use crate::table::bet::Bet;
use crate::table::config::Config;
use crate::table::instructions::Instructions;
use crate::table::kind::BetKind;
use crate::table::puck::Puck;
use crate::table::puck::PuckLocation;
use crate::table::signature::BetSignature;
use crate::table::signature::Placement;
use crate::Chips;

/// The felt: one puck, one ruleset, and the current set of wagers.
///
/// Owns every live [`Bet`] outright. Instruction batches apply atomically:
/// the verbs run against a working copy and commit only if every one of
/// them succeeds, so a failed batch leaves the table untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub(crate) config: Config,
    pub(crate) puck: Puck,
    pub(crate) bets: Vec<Bet>,
    pub(crate) returned: Vec<Bet>,
}

impl Table {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            puck: Puck::new(),
            bets: Vec::new(),
            returned: Vec::new(),
        }
    }

    /// Rebuild a table from its wire state. Rejects bet lists carrying two
    /// wagers with the same identity.
    pub fn from_state(
        config: Config,
        puck_location: PuckLocation,
        existing: &[BetSignature],
    ) -> Result<Self> {
        let mut table = Self::new(config);
        if let Some(location) = puck_location {
            table.puck.place(location, &table.config)?;
        }
        for sig in existing {
            let bet = Bet::from_signature(sig, &table)?;
            if table.bets.iter().any(|b| b.identity() == bet.identity()) {
                return Err(Error::DuplicateBet(format!(
                    "existing bets already hold a {}",
                    bet
                )));
            }
            table.bets.push(bet);
        }
        Ok(table)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
    pub fn puck(&self) -> &Puck {
        &self.puck
    }
    pub fn point(&self) -> PuckLocation {
        self.puck.location()
    }
    pub fn bets(&self) -> &[Bet] {
        &self.bets
    }
    pub fn returned(&self) -> &[Bet] {
        &self.returned
    }
    pub fn bet_signatures(&self) -> Vec<BetSignature> {
        self.bets.iter().map(Bet::signature).collect()
    }
    /// Sum of every flat wager on the felt, saturating at `Chips::MAX`.
    pub fn value_on_table(&self) -> Chips {
        self.bets.iter().map(Bet::wager).fold(0, Chips::saturating_add)
    }
    /// Sum of flat wagers on bets working this roll.
    pub fn value_at_risk(&self) -> Chips {
        self.bets
            .iter()
            .filter(|bet| bet.is_on(self))
            .map(Bet::wager)
            .fold(0, Chips::saturating_add)
    }

    /// Apply one batch of dealer instructions, all or nothing.
    ///
    /// Verbs run in a fixed order regardless of how the batch was written:
    /// retrieve, place, update, set_odds, remove_odds, turn_on, turn_off,
    /// follow_puck. The first failure aborts the whole batch.
    pub fn process_instructions(&mut self, instructions: &Instructions) -> Result<()> {
        let mut next = self.clone();
        next.retrieve(&instructions.retrieve)?;
        next.place(&instructions.place)?;
        next.update(&instructions.update)?;
        next.set_odds(&instructions.set_odds)?;
        next.remove_odds(&instructions.remove_odds)?;
        next.turn_on(&instructions.turn_on)?;
        next.turn_off(&instructions.turn_off)?;
        next.follow_puck(&instructions.follow_puck)?;
        *self = next;
        Ok(())
    }

    fn retrieve(&mut self, sigs: &[BetSignature]) -> Result<()> {
        for sig in sigs {
            let probe = Bet::from_signature(sig, self)?;
            if !probe.can_remove() {
                return Err(Error::ContractBet(format!(
                    "cannot retrieve the contract bet {}",
                    probe
                )));
            }
            let id = probe.identity();
            let (gone, kept): (Vec<Bet>, Vec<Bet>) =
                self.bets.drain(..).partition(|b| b.identity() == id);
            self.bets = kept;
            self.returned.extend(gone);
        }
        Ok(())
    }

    fn place(&mut self, sigs: &[BetSignature]) -> Result<()> {
        for sig in sigs {
            if sig.odds.is_some() {
                return Err(Error::InvalidBet(
                    "cannot place a new bet with odds already riding".into(),
                ));
            }
            let bet = Bet::from_signature(sig, self)?;
            match sig.kind {
                BetKind::PassLine | BetKind::DontPass => {
                    if sig.placement.is_some() {
                        return Err(Error::InvalidBet(format!(
                            "cannot place a {} bet on a point",
                            sig.kind
                        )));
                    }
                    if self.puck.is_on() {
                        return Err(Error::InvalidBet(format!(
                            "cannot place a {} bet while the point is established",
                            sig.kind
                        )));
                    }
                }
                BetKind::Come | BetKind::DontCome => {
                    if sig.placement.is_some() {
                        return Err(Error::InvalidBet(format!(
                            "cannot place a {} bet on a point",
                            sig.kind
                        )));
                    }
                    if self.puck.is_off() {
                        return Err(Error::InvalidBet(format!(
                            "cannot place a {} bet before the point is established",
                            sig.kind
                        )));
                    }
                }
                _ => {}
            }
            if self.bets.iter().any(|b| b.identity() == bet.identity()) {
                return Err(Error::DuplicateBet(format!(
                    "the table already holds a {}",
                    bet
                )));
            }
            self.bets.push(bet);
        }
        Ok(())
    }

    fn update(&mut self, sigs: &[BetSignature]) -> Result<()> {
        for sig in sigs {
            let probe = Bet::from_signature(sig, self)?;
            let id = probe.identity();
            for existing in self.bets.iter_mut() {
                if existing.identity() != id {
                    continue;
                }
                if probe.wager() > existing.wager() && !existing.can_increase() {
                    return Err(Error::ContractBet(format!(
                        "cannot press the contract bet {}",
                        existing
                    )));
                }
                if probe.wager() < existing.wager() && !existing.can_decrease() {
                    return Err(Error::ContractBet(format!(
                        "cannot reduce the contract bet {}",
                        existing
                    )));
                }
                existing.set_wager(probe.wager());
            }
        }
        Ok(())
    }

    fn set_odds(&mut self, sigs: &[BetSignature]) -> Result<()> {
        for sig in sigs {
            let odds = sig
                .odds
                .ok_or_else(|| Error::InvalidBet("set_odds requires an odds amount".into()))?;
            // match on identity alone: the signature may name no point while
            // the placed bet carries one, and the ceiling is the placed
            // bet's to check
            let id = sig.identity();
            let config = &self.config;
            for existing in self.bets.iter_mut() {
                if existing.identity() == id {
                    existing.set_odds(odds, config)?;
                }
            }
        }
        Ok(())
    }

    fn remove_odds(&mut self, sigs: &[BetSignature]) -> Result<()> {
        for sig in sigs {
            let id = sig.identity();
            for existing in self.bets.iter_mut() {
                if existing.identity() == id {
                    existing.remove_odds();
                }
            }
        }
        Ok(())
    }

    fn turn_on(&mut self, sigs: &[BetSignature]) -> Result<()> {
        for sig in sigs {
            let id = self.toggle_target(sig, "turn on")?;
            for existing in self.bets.iter_mut() {
                if existing.identity() == id {
                    existing.turn_on()?;
                }
            }
        }
        Ok(())
    }

    fn turn_off(&mut self, sigs: &[BetSignature]) -> Result<()> {
        for sig in sigs {
            let id = self.toggle_target(sig, "turn off")?;
            for existing in self.bets.iter_mut() {
                if existing.identity() == id {
                    existing.turn_off()?;
                }
            }
        }
        Ok(())
    }

    fn follow_puck(&mut self, sigs: &[BetSignature]) -> Result<()> {
        for sig in sigs {
            let id = self.toggle_target(sig, "release")?;
            for existing in self.bets.iter_mut() {
                if existing.identity() == id {
                    existing.follow_puck()?;
                }
            }
        }
        Ok(())
    }

    /// Toggle verbs fail on a non-toggleable kind even when no matching bet
    /// is on the felt.
    fn toggle_target(
        &self,
        sig: &BetSignature,
        verb: &str,
    ) -> Result<(BetKind, Option<Placement>)> {
        if !sig.kind.can_toggle() {
            return Err(Error::BadBetAction(format!(
                "cannot {} a {} bet",
                verb, sig.kind
            )));
        }
        Ok(sig.identity())
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} with {} bets", self.puck, self.bets.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(kind: BetKind, wager: Chips) -> BetSignature {
        BetSignature::new(kind, wager)
    }

    #[test]
    fn from_state_restores_bets_and_puck() {
        let table = Table::from_state(
            Config::default(),
            Some(6),
            &[
                sig(BetKind::PassLine, 10).on_point(6),
                sig(BetKind::Place, 12).on_point(8),
            ],
        )
        .unwrap();
        assert!(table.point() == Some(6));
        assert!(table.bets().len() == 2);
        assert!(table.value_on_table() == 22);
    }

    #[test]
    fn from_state_rejects_duplicate_identities() {
        let result = Table::from_state(
            Config::default(),
            Some(6),
            &[
                sig(BetKind::Place, 12).on_point(8),
                sig(BetKind::Place, 24).on_point(8),
            ],
        );
        assert!(matches!(result, Err(Error::DuplicateBet(_))));
    }

    #[test]
    fn from_state_rejects_bad_puck_location() {
        let result = Table::from_state(Config::default(), Some(7), &[]);
        assert!(matches!(result, Err(Error::IllegalMove(_))));
    }

    #[test]
    fn place_line_bets_only_before_the_point() {
        let mut table = Table::default();
        table
            .process_instructions(&Instructions::place(vec![sig(BetKind::PassLine, 10)]))
            .unwrap();
        assert!(table.bets().len() == 1);

        let mut table = Table::from_state(Config::default(), Some(6), &[]).unwrap();
        let result = table.process_instructions(&Instructions::place(vec![sig(BetKind::PassLine, 10)]));
        assert!(matches!(result, Err(Error::InvalidBet(_))));
    }

    #[test]
    fn place_come_bets_only_after_the_point() {
        let mut table = Table::default();
        let result = table.process_instructions(&Instructions::place(vec![sig(BetKind::Come, 10)]));
        assert!(matches!(result, Err(Error::InvalidBet(_))));

        let mut table = Table::from_state(Config::default(), Some(6), &[]).unwrap();
        table
            .process_instructions(&Instructions::place(vec![sig(BetKind::Come, 10)]))
            .unwrap();
        assert!(table.bets().len() == 1);
    }

    #[test]
    fn place_rejects_riding_odds() {
        let mut table = Table::default();
        let result = table.process_instructions(&Instructions::place(vec![
            sig(BetKind::PassLine, 10).with_odds(20),
        ]));
        assert!(matches!(result, Err(Error::InvalidBet(_))));
    }

    #[test]
    fn place_rejects_duplicates() {
        let mut table = Table::from_state(Config::default(), Some(6), &[]).unwrap();
        table
            .process_instructions(&Instructions::place(vec![sig(BetKind::Place, 12).on_point(8)]))
            .unwrap();
        let result =
            table.process_instructions(&Instructions::place(vec![sig(BetKind::Place, 12).on_point(8)]));
        assert!(matches!(result, Err(Error::DuplicateBet(_))));
        // a second line bet collides regardless of placement
        let mut table = Table::default();
        table
            .process_instructions(&Instructions::place(vec![sig(BetKind::DontPass, 10)]))
            .unwrap();
        let result = table.process_instructions(&Instructions::place(vec![sig(BetKind::DontPass, 15)]));
        assert!(matches!(result, Err(Error::DuplicateBet(_))));
    }

    #[test]
    fn failed_batches_leave_the_table_untouched() {
        let mut table = Table::default();
        let result = table.process_instructions(&Instructions::place(vec![
            sig(BetKind::Field, 10),
            sig(BetKind::Horn, 10), // wrong multiple, aborts the batch
        ]));
        assert!(result.is_err());
        assert!(table.bets().is_empty());
    }

    #[test]
    fn retrieve_refunds_free_bets() {
        let mut table = Table::from_state(
            Config::default(),
            Some(6),
            &[sig(BetKind::Place, 12).on_point(8)],
        )
        .unwrap();
        table
            .process_instructions(&Instructions {
                retrieve: vec![sig(BetKind::Place, 12).on_point(8)],
                ..Instructions::default()
            })
            .unwrap();
        assert!(table.bets().is_empty());
        assert!(table.returned().len() == 1);
    }

    #[test]
    fn retrieve_rejects_contract_bets() {
        let mut table = Table::from_state(
            Config::default(),
            Some(6),
            &[sig(BetKind::PassLine, 10).on_point(6)],
        )
        .unwrap();
        let result = table.process_instructions(&Instructions {
            retrieve: vec![sig(BetKind::PassLine, 10).on_point(6)],
            ..Instructions::default()
        });
        assert!(matches!(result, Err(Error::ContractBet(_))));
        assert!(table.bets().len() == 1);
    }

    #[test]
    fn retrieve_then_place_replaces_in_one_batch() {
        let mut table = Table::default();
        table
            .process_instructions(&Instructions::place(vec![sig(BetKind::Field, 10)]))
            .unwrap();
        table
            .process_instructions(&Instructions {
                retrieve: vec![sig(BetKind::Field, 10)],
                place: vec![sig(BetKind::Field, 25)],
                ..Instructions::default()
            })
            .unwrap();
        assert!(table.bets().len() == 1);
        assert!(table.bets()[0].wager() == 25);
        assert!(table.returned().len() == 1);
    }

    #[test]
    fn update_respects_contract_rules() {
        let mut table = Table::from_state(
            Config::default(),
            Some(4),
            &[
                sig(BetKind::PassLine, 10).on_point(4),
                sig(BetKind::DontCome, 10).on_point(8),
            ],
        )
        .unwrap();
        // pressing a placed pass line is allowed, reducing it is not
        table
            .process_instructions(&Instructions {
                update: vec![sig(BetKind::PassLine, 20)],
                ..Instructions::default()
            })
            .unwrap();
        assert!(table.bets()[0].wager() == 20);
        let result = table.process_instructions(&Instructions {
            update: vec![sig(BetKind::PassLine, 5)],
            ..Instructions::default()
        });
        assert!(matches!(result, Err(Error::ContractBet(_))));
        // the wrong side may come down but never press up
        let result = table.process_instructions(&Instructions {
            update: vec![sig(BetKind::DontCome, 20).on_point(8)],
            ..Instructions::default()
        });
        assert!(matches!(result, Err(Error::ContractBet(_))));
        table
            .process_instructions(&Instructions {
                update: vec![sig(BetKind::DontCome, 5).on_point(8)],
                ..Instructions::default()
            })
            .unwrap();
        assert!(table.bets()[1].wager() == 5);
    }

    #[test]
    fn set_odds_and_remove_odds_delegate() {
        let mut table = Table::from_state(
            Config::default(),
            Some(4),
            &[sig(BetKind::PassLine, 10).on_point(4)],
        )
        .unwrap();
        table
            .process_instructions(&Instructions {
                set_odds: vec![sig(BetKind::PassLine, 10).with_odds(30)],
                ..Instructions::default()
            })
            .unwrap();
        assert!(table.bets()[0].odds() == Some(30));
        let result = table.process_instructions(&Instructions {
            set_odds: vec![sig(BetKind::PassLine, 10).with_odds(31)],
            ..Instructions::default()
        });
        assert!(matches!(result, Err(Error::InvalidBet(_))));
        assert!(table.bets()[0].odds() == Some(30));
        table
            .process_instructions(&Instructions {
                remove_odds: vec![sig(BetKind::PassLine, 10)],
                ..Instructions::default()
            })
            .unwrap();
        assert!(table.bets()[0].odds().is_none());
    }

    #[test]
    fn set_odds_reaches_the_placed_bet() {
        let mut table = Table::from_state(
            Config::default(),
            Some(4),
            &[
                sig(BetKind::PassLine, 10).on_point(4),
                sig(BetKind::Come, 10).on_point(5),
            ],
        )
        .unwrap();
        // the line signature names no point; the placed bet carries it
        table
            .process_instructions(&Instructions {
                set_odds: vec![
                    sig(BetKind::PassLine, 10).with_odds(30),
                    sig(BetKind::Come, 10).on_point(5).with_odds(20),
                ],
                ..Instructions::default()
            })
            .unwrap();
        assert!(table.bets()[0].odds() == Some(30));
        assert!(table.bets()[1].odds() == Some(20));
        table
            .process_instructions(&Instructions {
                remove_odds: vec![sig(BetKind::PassLine, 10)],
                ..Instructions::default()
            })
            .unwrap();
        assert!(table.bets()[0].odds().is_none());
        assert!(table.bets()[1].odds() == Some(20));
    }

    #[test]
    fn toggle_verbs_pin_and_release() {
        let mut table = Table::from_state(
            Config::default(),
            Some(6),
            &[sig(BetKind::Place, 12).on_point(8)],
        )
        .unwrap();
        table
            .process_instructions(&Instructions {
                turn_off: vec![sig(BetKind::Place, 12).on_point(8)],
                ..Instructions::default()
            })
            .unwrap();
        assert!(!table.bets()[0].is_on(&table));
        table
            .process_instructions(&Instructions {
                follow_puck: vec![sig(BetKind::Place, 12).on_point(8)],
                ..Instructions::default()
            })
            .unwrap();
        assert!(table.bets()[0].is_on(&table));
    }

    #[test]
    fn toggle_verbs_reject_non_toggleable_kinds() {
        let mut table = Table::default();
        let result = table.process_instructions(&Instructions {
            turn_off: vec![sig(BetKind::Field, 10)],
            ..Instructions::default()
        });
        assert!(matches!(result, Err(Error::BadBetAction(_))));
    }

    #[test]
    fn value_at_risk_follows_the_puck() {
        let table = Table::from_state(
            Config::default(),
            None,
            &[
                sig(BetKind::PassLine, 10),
                sig(BetKind::Place, 12).on_point(8),
            ],
        )
        .unwrap();
        assert!(table.value_on_table() == 22);
        // the place bet is off with the puck down, the line is always working
        assert!(table.value_at_risk() == 10);
    }
}
