use crate::dice::Outcome;
use crate::engine::request::Request;
use crate::engine::request::TableState;
use crate::engine::resolution::Resolution;
use crate::engine::resolution::Summary;
use crate::engine::resolution::TableSnapshot;
use crate::engine::roll;
use crate::error::Error;
use crate::error::Result;
use crate::table::Bet;
use crate::table::BetKind;
use crate::table::Instructions;
use crate::table::Table;
use crate::Chips;

/// The dealer: applies one instruction batch, throws the dice, and settles
/// every wager.
///
/// Resolution works on copies of the table's bets, so the caller's table is
/// never half-mutated; the next state comes back inside the [`Resolution`].
pub struct Engine {
    table: Table,
    instructions: Instructions,
    hash: Option<String>,
    dice: Option<Outcome>,
}

impl TryFrom<Request> for Engine {
    type Error = Error;
    fn try_from(request: Request) -> Result<Self> {
        Ok(Self {
            table: Table::try_from(&request.table)?,
            instructions: request.instructions,
            hash: request.hash,
            dice: request.dice,
        })
    }
}

impl Engine {
    pub fn new(table: Table) -> Self {
        Self {
            table,
            instructions: Instructions::default(),
            hash: None,
            dice: None,
        }
    }
    pub fn with_instructions(self, instructions: Instructions) -> Self {
        Self {
            instructions,
            ..self
        }
    }
    pub fn with_dice(self, dice: Outcome) -> Self {
        Self {
            dice: Some(dice),
            ..self
        }
    }
    pub fn with_hash(self, hash: String) -> Self {
        Self {
            hash: Some(hash),
            ..self
        }
    }

    /// Settle one roll end to end.
    ///
    /// 1. Apply the instruction batch, all or nothing.
    /// 2. Fix the dice: as given, else derived from the seed, else random.
    /// 3. Partition working bets into winners and losers.
    /// 4. Travel the surviving line bets and recompute the puck.
    /// 5. Price every winner and every refund.
    pub fn resolve(mut self) -> Result<Resolution> {
        self.table.process_instructions(&self.instructions)?;
        let dice = match self.dice {
            Some(dice) => dice,
            None => {
                let seed = self
                    .hash
                    .take()
                    .unwrap_or_else(roll::random_seed)
                    .to_lowercase();
                let dice = roll::outcome_from_seed(&seed)?;
                self.hash = Some(seed);
                dice
            }
        };
        let table = &self.table;
        log::debug!("resolving {} against {}", dice, table.puck());

        let winners: Vec<Bet> = table
            .bets()
            .iter()
            .filter(|bet| bet.is_on(table) && bet.is_winner(table, &dice))
            .cloned()
            .collect();
        let losers: Vec<Bet> = table
            .bets()
            .iter()
            .filter(|bet| bet.is_on(table) && bet.is_loser(table, &dice))
            .cloned()
            .collect();
        // frozen snapshot the sibling searches run against while traveling
        let carried: Vec<Bet> = table
            .bets()
            .iter()
            .filter(|bet| !(bet.is_on(table) && bet.is_loser(table, &dice)))
            .cloned()
            .collect();

        let mut returned: Vec<Bet> = table.returned().to_vec();
        let mut forward: Vec<Bet> = Vec::new();
        let total = dice.total();
        for bet in carried.iter() {
            let mut bet = bet.clone();
            if !bet.kind().traveling() {
                forward.push(bet);
            } else if bet.point().is_none() && table.config().is_valid_point(total) {
                match Self::sibling_at(&carried, &bet, Some(total)) {
                    true => returned.push(bet),
                    false => {
                        bet.move_to(total, table.config())?;
                        forward.push(bet);
                    }
                }
            } else if bet.point() == Some(total) {
                match bet.kind() {
                    BetKind::PassLine | BetKind::DontPass => {
                        bet.reset_placement();
                        forward.push(bet);
                    }
                    // the equal-wager sibling was just refused its travel,
                    // so this winner comes down without a refund
                    _ if Self::sibling_at(&carried, &bet, None) => {}
                    _ => returned.push(bet),
                }
            } else if total == 7 && bet.is_winner(table, &dice) {
                returned.push(bet);
            } else {
                forward.push(bet);
            }
        }

        let new_puck_location = match table.point() {
            None if table.config().is_valid_point(total) => Some(total),
            Some(point) if total == 7 || total == point => None,
            current => current,
        };

        let mut winner_signatures = Vec::new();
        let mut total_winnings: Chips = 0;
        for bet in &winners {
            let payout = bet.payout(table, &dice)?;
            let mut sig = bet.signature();
            sig.payout = Some(payout);
            if bet.kind().has_vig() {
                sig.vig_paid = Some(bet.vig(table.config())?);
            }
            total_winnings = total_winnings.saturating_add(payout);
            winner_signatures.push(sig);
        }
        let mut total_returned: Chips = 0;
        for bet in &returned {
            let refund = bet
                .wager()
                .saturating_add(bet.return_vig(table.config())?)
                .saturating_add(bet.odds().unwrap_or(0));
            total_returned = total_returned.saturating_add(refund);
        }
        log::debug!(
            "{} winners, {} losers, {} returned worth {}",
            winners.len(),
            losers.len(),
            returned.len(),
            total_returned
        );

        Ok(Resolution {
            table: TableSnapshot {
                config: table.config().clone(),
                puck_location: table.point(),
                bets: table.bet_signatures(),
                value_on_table: table.value_on_table(),
                value_at_risk: table.value_at_risk(),
            },
            hash: self.hash.clone(),
            winners: winner_signatures,
            losers: losers.iter().map(Bet::signature).collect(),
            returned: returned.iter().map(Bet::signature).collect(),
            new_table: TableState {
                config: table.config().clone(),
                puck_location: new_puck_location,
                existing_bets: forward.iter().map(Bet::signature).collect(),
            },
            summary: Summary {
                dice_outcome: dice,
                total_returned_to_player: total_returned,
                total_winnings_to_player: total_winnings,
                value_of_losers: losers.iter().map(Bet::wager).fold(0, Chips::saturating_add),
                value_on_table: forward.iter().map(Bet::wager).fold(0, Chips::saturating_add),
                // activity judged against the pre-roll puck, as the bets were
                value_at_risk: forward
                    .iter()
                    .filter(|bet| bet.is_on(table))
                    .map(Bet::wager)
                    .fold(0, Chips::saturating_add),
            },
        })
    }

    /// Whether a Come-family sibling of the same kind and wager sits at the
    /// given spot in the frozen pre-travel snapshot.
    fn sibling_at(carried: &[Bet], bet: &Bet, point: Option<u8>) -> bool {
        matches!(bet.kind(), BetKind::Come | BetKind::DontCome)
            && carried.iter().any(|other| {
                other.kind() == bet.kind()
                    && other.point() == point
                    && other.wager() == bet.wager()
            })
    }
}
