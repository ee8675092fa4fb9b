//! Betting-round state machine: one street of wagering.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::player::{BettingAction, Player, PlayerHandle};
use crate::rules::{validate_action, ValidatedAction, WagerContext};

/// Where a player stands in the current street's wagering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "amount", rename_all = "snake_case")]
pub enum Contribution {
    /// Folded before this street began, or not dealt in.
    NotInRound,
    /// In the street; has not acted yet or has only checked.
    InRoundUnacted,
    /// In the street with this many chips put in so far.
    InRoundContributed(u32),
}

impl Contribution {
    pub fn amount(self) -> u32 {
        match self {
            Contribution::InRoundContributed(amount) => amount,
            _ => 0,
        }
    }

    pub fn is_in_round(self) -> bool {
        !matches!(self, Contribution::NotInRound)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BettingOutcome {
    /// The street continues with this player to act.
    NextTurn(PlayerHandle),
    /// Everyone has responded; the street is over.
    RoundComplete,
}

/// The parts of a hand a betting action touches.
pub struct BettingTable<'a> {
    pub players: &'a mut [Player],
    /// Participants of the hand in seat order, folded ones included.
    pub order: &'a [PlayerHandle],
    pub folded: &'a mut BTreeSet<PlayerHandle>,
    pub pot: &'a mut u32,
    pub big_blind: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BettingRound {
    starting_player: PlayerHandle,
    last_raiser: Option<PlayerHandle>,
    last_raise: Option<u32>,
    contributions: Vec<Contribution>,
}

impl BettingRound {
    /// A street with no bet yet: every unfolded participant is in and unacted.
    pub fn new(
        starting_player: PlayerHandle,
        arena_len: usize,
        order: &[PlayerHandle],
        folded: &BTreeSet<PlayerHandle>,
    ) -> Self {
        let mut contributions = vec![Contribution::NotInRound; arena_len];
        for &h in order.iter().filter(|h| !folded.contains(h)) {
            contributions[h.0] = Contribution::InRoundUnacted;
        }
        Self {
            starting_player,
            last_raiser: None,
            last_raise: None,
            contributions,
        }
    }

    /// The pre-flop street. The big blind counts as the opening raise of a
    /// full big blind even when it was posted short.
    pub(crate) fn with_blinds(
        big_blind_player: PlayerHandle,
        arena_len: usize,
        order: &[PlayerHandle],
        posts: &[(PlayerHandle, u32)],
        big_blind: u32,
    ) -> Self {
        let mut round = Self::new(big_blind_player, arena_len, order, &BTreeSet::new());
        for &(h, amount) in posts {
            round.contributions[h.0] = Contribution::InRoundContributed(amount);
        }
        round.last_raiser = Some(big_blind_player);
        round.last_raise = Some(big_blind);
        round
    }

    pub fn starting_player(&self) -> PlayerHandle {
        self.starting_player
    }
    pub fn last_raiser(&self) -> Option<PlayerHandle> {
        self.last_raiser
    }
    pub fn last_raise(&self) -> Option<u32> {
        self.last_raise
    }

    pub fn contribution(&self, h: PlayerHandle) -> Contribution {
        self.contributions
            .get(h.0)
            .copied()
            .unwrap_or(Contribution::NotInRound)
    }

    /// Contributions of everyone still in this street.
    pub fn contributions(&self) -> impl Iterator<Item = (PlayerHandle, Contribution)> + '_ {
        self.contributions
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_in_round())
            .map(|(i, c)| (PlayerHandle(i), *c))
    }

    /// Highest contribution this street.
    pub fn current_bet(&self) -> u32 {
        self.contributions
            .iter()
            .map(|c| c.amount())
            .max()
            .unwrap_or(0)
    }

    pub fn to_call(&self, h: PlayerHandle) -> u32 {
        self.current_bet()
            .saturating_sub(self.contribution(h).amount())
    }

    /// Validates and applies one action by `actor`. On error nothing changes.
    ///
    /// Turn ownership is the caller's concern; this only checks that the
    /// actor is still in the street.
    pub fn apply(
        &mut self,
        table: BettingTable<'_>,
        actor: PlayerHandle,
        action: BettingAction,
    ) -> Result<(BettingOutcome, ValidatedAction), GameError> {
        let BettingTable {
            players,
            order,
            folded,
            pot,
            big_blind,
        } = table;

        if folded.contains(&actor) {
            return Err(GameError::PlayerAlreadyFolded);
        }
        let contribution = self.contribution(actor);
        if !contribution.is_in_round() {
            return Err(GameError::NotInHand(actor));
        }
        let stack = players
            .get(actor.0)
            .ok_or(GameError::UnknownPlayer(actor))?
            .stack();

        let ctx = WagerContext {
            stack,
            to_call: self.to_call(actor),
            current_bet: self.current_bet(),
            last_raise: self.last_raise,
            big_blind,
        };
        let validated = validate_action(&ctx, action)?;

        let chips = validated.chips();
        let new_pot = pot.checked_add(chips).ok_or(GameError::ChipOverflow)?;
        players[actor.0].bet(chips)?;
        *pot = new_pot;

        match validated {
            ValidatedAction::Fold => {
                folded.insert(actor);
                players[actor.0].clear_hole();
            }
            ValidatedAction::Check => {}
            ValidatedAction::Call(_) => self.add_contribution(actor, chips),
            ValidatedAction::Bet(amount) => {
                self.add_contribution(actor, chips);
                self.last_raiser = Some(actor);
                self.last_raise = Some(amount);
            }
            ValidatedAction::Raise { raise_by, .. } => {
                self.add_contribution(actor, chips);
                self.last_raiser = Some(actor);
                // an all-in for less than a full raise does not shrink the minimum
                self.last_raise = Some(self.last_raise.map_or(raise_by, |r| r.max(raise_by)));
            }
        }

        let live = order.iter().filter(|h| !folded.contains(h)).count();
        let outcome = if live <= 1 {
            BettingOutcome::RoundComplete
        } else {
            self.next_turn(players, order, folded, actor)
        };
        Ok((outcome, validated))
    }

    /// Walks the seats after `from`. Reaching the last raiser (or the
    /// starting player when nobody bet) ends the street; otherwise the first
    /// unfolded participant with chips acts next. All-in players are skipped.
    pub fn next_turn(
        &self,
        players: &[Player],
        order: &[PlayerHandle],
        folded: &BTreeSet<PlayerHandle>,
        from: PlayerHandle,
    ) -> BettingOutcome {
        let marker = self.last_raiser.unwrap_or(self.starting_player);
        let start = order.iter().position(|&h| h == from).unwrap_or(0);
        for step in 1..=order.len() {
            let candidate = order[(start + step) % order.len()];
            if candidate == marker {
                return BettingOutcome::RoundComplete;
            }
            let has_chips = players.get(candidate.0).is_some_and(|p| p.stack() > 0);
            if !folded.contains(&candidate) && has_chips {
                return BettingOutcome::NextTurn(candidate);
            }
        }
        BettingOutcome::RoundComplete
    }

    fn add_contribution(&mut self, h: PlayerHandle, chips: u32) {
        let total = self.contribution(h).amount() + chips;
        self.contributions[h.0] = Contribution::InRoundContributed(total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Seat;

    fn seated(stacks: &[u32]) -> (Vec<Player>, Vec<PlayerHandle>) {
        let players = stacks
            .iter()
            .enumerate()
            .map(|(i, &chips)| {
                let mut p = Player::new(format!("p{i}"), format!("s{i}"), format!("Guest {i}"));
                p.sit(Seat::ALL[i], chips, None);
                p
            })
            .collect();
        let order = (0..stacks.len()).map(PlayerHandle).collect();
        (players, order)
    }

    #[test]
    fn checks_around_end_the_street_at_the_starter() {
        let (mut players, order) = seated(&[100, 100, 100]);
        let mut folded = BTreeSet::new();
        let mut pot = 0;
        let mut round = BettingRound::new(PlayerHandle(1), 3, &order, &folded);

        for (actor, expected) in [
            (1, BettingOutcome::NextTurn(PlayerHandle(2))),
            (2, BettingOutcome::NextTurn(PlayerHandle(0))),
            (0, BettingOutcome::RoundComplete),
        ] {
            let table = BettingTable {
                players: &mut players,
                order: &order,
                folded: &mut folded,
                pot: &mut pot,
                big_blind: 20,
            };
            let (outcome, _) = round
                .apply(table, PlayerHandle(actor), BettingAction::Check)
                .unwrap();
            assert_eq!(outcome, expected);
        }
        assert_eq!(pot, 0);
        assert_eq!(round.contribution(PlayerHandle(0)), Contribution::InRoundUnacted);
    }

    #[test]
    fn rejected_action_leaves_everything_untouched() {
        let (mut players, order) = seated(&[100, 100]);
        let mut folded = BTreeSet::new();
        let mut pot = 0;
        let mut round = BettingRound::new(PlayerHandle(0), 2, &order, &folded);
        let before = round.clone();

        let table = BettingTable {
            players: &mut players,
            order: &order,
            folded: &mut folded,
            pot: &mut pot,
            big_blind: 20,
        };
        let err = round
            .apply(table, PlayerHandle(0), BettingAction::Bet(10))
            .unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidBetAmount {
                amount: 10,
                minimum: 20
            }
        );
        assert_eq!(round, before);
        assert_eq!(pot, 0);
        assert_eq!(players[0].stack(), 100);
    }

    #[test]
    fn a_pot_that_would_overflow_is_refused() {
        let (mut players, order) = seated(&[100, 100]);
        let mut folded = BTreeSet::new();
        let mut pot = u32::MAX - 5;
        let mut round = BettingRound::new(PlayerHandle(0), 2, &order, &folded);

        let table = BettingTable {
            players: &mut players,
            order: &order,
            folded: &mut folded,
            pot: &mut pot,
            big_blind: 20,
        };
        assert_eq!(
            round.apply(table, PlayerHandle(0), BettingAction::Bet(20)),
            Err(GameError::ChipOverflow)
        );
        assert_eq!(pot, u32::MAX - 5);
        assert_eq!(players[0].stack(), 100);
        assert_eq!(round.contribution(PlayerHandle(0)), Contribution::InRoundUnacted);
    }

    #[test]
    fn next_turn_skips_all_in_players() {
        let (players, order) = seated(&[100, 0, 100]);
        let folded = BTreeSet::new();
        let round = BettingRound::new(PlayerHandle(0), 3, &order, &folded);
        assert_eq!(
            round.next_turn(&players, &order, &folded, PlayerHandle(0)),
            BettingOutcome::NextTurn(PlayerHandle(2))
        );
    }
}
