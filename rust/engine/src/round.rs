//! One hand, from the blinds to the pot being paid out.
//!
//! A [`Round`] owns the deck, board, pot and betting state of a single hand.
//! Players live in the table's arena and are passed in by the caller on every
//! call; the round only stores their handles. Once the pot is paid the round
//! holds a [`RoundSummary`] and refuses further actions, but stays around so
//! the result can be reviewed until the next hand starts.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::betting::{BettingOutcome, BettingRound, BettingTable};
use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::game::seat_order;
use crate::hand::{showdown, HandQuality};
use crate::logger::ActionRecord;
use crate::player::{BettingAction, Player, PlayerHandle};
use crate::pot::split_pot;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Everyone else folded; no cards were compared.
    Uncontested,
    Showdown,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Payout {
    pub player: PlayerHandle,
    pub amount: u32,
    /// The winning hand, when the pot went to a showdown
    pub hand: Option<HandQuality>,
}

/// A hand revealed at showdown.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct ShownHand {
    pub player: PlayerHandle,
    pub hole: [Card; 2],
    pub quality: HandQuality,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct RoundSummary {
    pub resolution: Resolution,
    pub payouts: Vec<Payout>,
    /// Showdown classes, strongest first. Empty when uncontested.
    pub ranking: Vec<Vec<ShownHand>>,
}

#[derive(Debug, Clone)]
pub enum BettingStage {
    Betting(BettingRound),
    Summary(RoundSummary),
}

/// What an accepted action led to.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Progress {
    /// Same street, this player acts next.
    Turn(PlayerHandle),
    /// A new street was dealt and `next` opens its betting.
    Street { phase: Phase, next: PlayerHandle },
    /// The pot has been paid out.
    Complete,
}

#[derive(Debug, Clone)]
pub struct Round {
    deck: Deck,
    dealer: PlayerHandle,
    small_blind_player: PlayerHandle,
    big_blind_player: PlayerHandle,
    current_turn: Option<PlayerHandle>,
    pot: u32,
    folded: BTreeSet<PlayerHandle>,
    community: Vec<Card>,
    phase: Phase,
    stage: BettingStage,
    big_blind: u32,
    order: Vec<PlayerHandle>,
    committed: Vec<u32>,
    actions: Vec<ActionRecord>,
}

impl Round {
    /// Deals a new hand to every eligible player and posts the blinds.
    ///
    /// `dealer` must be one of the eligible players. If nobody can bet
    /// (everyone is all-in from the blinds) the board is run out and the
    /// returned round is already complete.
    pub fn start(
        players: &mut [Player],
        dealer: PlayerHandle,
        big_blind: u32,
        deck: Deck,
    ) -> Result<Self, GameError> {
        let order = seat_order(players);
        let n = order.len();
        if n < 2 {
            return Err(GameError::NotEnoughPlayers { eligible: n });
        }
        let dealer_pos = order
            .iter()
            .position(|&h| h == dealer)
            .ok_or(GameError::NotInHand(dealer))?;
        let left_of_dealer = |offset: usize| order[(dealer_pos + offset) % n];
        // heads-up the dealer posts the small blind
        let (small, big) = if n == 2 {
            (left_of_dealer(0), left_of_dealer(1))
        } else {
            (left_of_dealer(1), left_of_dealer(2))
        };

        for p in players.iter_mut() {
            p.clear_hole();
        }

        let arena_len = players.len();
        let mut round = Round {
            deck,
            dealer,
            small_blind_player: small,
            big_blind_player: big,
            current_turn: None,
            pot: 0,
            folded: BTreeSet::new(),
            community: Vec::with_capacity(5),
            phase: Phase::Preflop,
            stage: BettingStage::Betting(BettingRound::new(big, arena_len, &order, &BTreeSet::new())),
            big_blind,
            order,
            committed: vec![0; arena_len],
            actions: Vec::new(),
        };

        let firsts: Vec<Card> = (0..n).map(|_| round.draw()).collect();
        let seconds: Vec<Card> = (0..n).map(|_| round.draw()).collect();
        for k in 0..n {
            let h = round.order[(dealer_pos + 1 + k) % n];
            players[h.0].give_hole([firsts[k], seconds[k]]);
        }

        let small_post = round.post(players, small, big_blind / 2)?;
        let big_post = round.post(players, big, big_blind)?;
        round.stage = BettingStage::Betting(BettingRound::with_blinds(
            big,
            arena_len,
            &round.order,
            &[(small, small_post), (big, big_post)],
            big_blind,
        ));

        info!(
            dealer = %dealer,
            small_blind = %small,
            big_blind = %big,
            players = n,
            seed = ?round.deck.seed(),
            "round started"
        );

        if round.needs_betting(players) {
            if let BettingStage::Betting(betting) = &round.stage {
                if let BettingOutcome::NextTurn(first) =
                    betting.next_turn(players, &round.order, &round.folded, big)
                {
                    round.current_turn = Some(first);
                }
            }
        }
        if round.current_turn.is_none() {
            round.finish_street(players);
        }
        Ok(round)
    }

    /// Applies `actor`'s action. Rejected actions change nothing.
    pub fn act(
        &mut self,
        players: &mut [Player],
        actor: PlayerHandle,
        action: BettingAction,
    ) -> Result<Progress, GameError> {
        let betting = match &mut self.stage {
            BettingStage::Betting(b) => b,
            BettingStage::Summary(_) => return Err(GameError::HandAlreadyComplete),
        };
        if self.current_turn != Some(actor) {
            return Err(GameError::NotPlayersTurn { actual: actor });
        }

        let table = BettingTable {
            players: &mut *players,
            order: &self.order,
            folded: &mut self.folded,
            pot: &mut self.pot,
            big_blind: self.big_blind,
        };
        let (outcome, validated) = betting.apply(table, actor, action)?;

        let chips = validated.chips();
        self.committed[actor.0] += chips;
        self.actions.push(ActionRecord {
            player: players[actor.0].public_id().to_string(),
            phase: self.phase,
            action,
            chips,
        });
        debug!(player = %actor, ?action, chips, pot = self.pot, "action applied");

        match outcome {
            BettingOutcome::NextTurn(next) => {
                self.current_turn = Some(next);
                Ok(Progress::Turn(next))
            }
            BettingOutcome::RoundComplete => {
                self.current_turn = None;
                Ok(self.finish_street(players))
            }
        }
    }

    /// Gives every participant back what they put in this hand. Used when a
    /// live hand is thrown away by a restart; a finished round refunds
    /// nothing.
    pub(crate) fn abandon(self, players: &mut [Player]) {
        if self.is_complete() {
            return;
        }
        for &h in &self.order {
            if let Some(p) = players.get_mut(h.0) {
                p.add_chips(self.committed[h.0]);
                p.clear_hole();
            }
        }
        info!(pot = self.pot, "round abandoned, chips refunded");
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn dealer(&self) -> PlayerHandle {
        self.dealer
    }
    pub fn small_blind_player(&self) -> PlayerHandle {
        self.small_blind_player
    }
    pub fn big_blind_player(&self) -> PlayerHandle {
        self.big_blind_player
    }
    pub fn big_blind(&self) -> u32 {
        self.big_blind
    }
    pub fn current_turn(&self) -> Option<PlayerHandle> {
        self.current_turn
    }
    pub fn pot(&self) -> u32 {
        self.pot
    }
    pub fn folded(&self) -> &BTreeSet<PlayerHandle> {
        &self.folded
    }
    pub fn community(&self) -> &[Card] {
        &self.community
    }
    pub fn stage(&self) -> &BettingStage {
        &self.stage
    }
    /// Participants in seat order, folded ones included.
    pub fn participants(&self) -> &[PlayerHandle] {
        &self.order
    }
    pub fn actions(&self) -> &[ActionRecord] {
        &self.actions
    }
    pub fn deck_seed(&self) -> Option<u64> {
        self.deck.seed()
    }

    pub fn betting(&self) -> Option<&BettingRound> {
        match &self.stage {
            BettingStage::Betting(b) => Some(b),
            BettingStage::Summary(_) => None,
        }
    }

    pub fn summary(&self) -> Option<&RoundSummary> {
        match &self.stage {
            BettingStage::Summary(s) => Some(s),
            BettingStage::Betting(_) => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.stage, BettingStage::Summary(_))
    }

    pub fn is_participant(&self, h: PlayerHandle) -> bool {
        self.order.contains(&h)
    }

    /// Chips `h` has put into the pot this hand.
    pub fn committed(&self, h: PlayerHandle) -> u32 {
        self.committed.get(h.0).copied().unwrap_or(0)
    }

    /// Unfolded participants in payout order: seat order starting left of
    /// the dealer.
    pub fn live_players(&self) -> Vec<PlayerHandle> {
        let n = self.order.len();
        let dealer_pos = self
            .order
            .iter()
            .position(|&h| h == self.dealer)
            .unwrap_or(0);
        (1..=n)
            .map(|k| self.order[(dealer_pos + k) % n])
            .filter(|h| !self.folded.contains(h))
            .collect()
    }

    fn draw(&mut self) -> Card {
        match self.deck.deal_card() {
            Some(card) => card,
            None => panic!("deck exhausted in the middle of a hand"),
        }
    }

    fn post(&mut self, players: &mut [Player], h: PlayerHandle, blind: u32) -> Result<u32, GameError> {
        let amount = players[h.0].stack().min(blind);
        let pot = self.pot.checked_add(amount).ok_or(GameError::ChipOverflow)?;
        players[h.0].bet(amount)?;
        self.pot = pot;
        self.committed[h.0] += amount;
        Ok(amount)
    }

    /// Whether anyone still has a decision to make this street.
    fn needs_betting(&self, players: &[Player]) -> bool {
        let Some(betting) = self.betting() else {
            return false;
        };
        let able: Vec<PlayerHandle> = self
            .order
            .iter()
            .copied()
            .filter(|h| !self.folded.contains(h) && players[h.0].stack() > 0)
            .collect();
        match able.as_slice() {
            [] => false,
            [only] => betting.to_call(*only) > 0,
            _ => true,
        }
    }

    /// Deals the following streets until someone has to act, or pays the pot.
    fn finish_street(&mut self, players: &mut [Player]) -> Progress {
        loop {
            let live = self.live_players();
            assert!(!live.is_empty(), "round has no unfolded players");
            if let [winner] = live.as_slice() {
                self.award_uncontested(players, *winner);
                return Progress::Complete;
            }

            let (next_phase, count) = match self.phase {
                Phase::Preflop => (Phase::Flop, 3),
                Phase::Flop => (Phase::Turn, 1),
                Phase::Turn => (Phase::River, 1),
                Phase::River | Phase::Showdown => {
                    self.resolve_showdown(players, &live);
                    return Progress::Complete;
                }
            };
            for _ in 0..count {
                let card = self.draw();
                self.community.push(card);
            }
            self.phase = next_phase;
            debug!(phase = ?self.phase, board = ?self.community, "street dealt");

            let starter = live
                .iter()
                .copied()
                .find(|h| players[h.0].stack() > 0);
            if let Some(starter) = starter {
                self.stage = BettingStage::Betting(BettingRound::new(
                    starter,
                    players.len(),
                    &self.order,
                    &self.folded,
                ));
                if self.needs_betting(players) {
                    self.current_turn = Some(starter);
                    return Progress::Street {
                        phase: self.phase,
                        next: starter,
                    };
                }
            }
        }
    }

    fn award_uncontested(&mut self, players: &mut [Player], winner: PlayerHandle) {
        players[winner.0].add_chips(self.pot);
        info!(winner = %winner, pot = self.pot, "pot awarded uncontested");
        self.conclude(RoundSummary {
            resolution: Resolution::Uncontested,
            payouts: vec![Payout {
                player: winner,
                amount: self.pot,
                hand: None,
            }],
            ranking: Vec::new(),
        });
    }

    fn resolve_showdown(&mut self, players: &mut [Player], live: &[PlayerHandle]) {
        let contenders: Vec<(PlayerHandle, [Card; 2])> = live
            .iter()
            .filter_map(|&h| players[h.0].hole_cards().map(|hole| (h, hole)))
            .collect();
        let holes: Vec<[Card; 2]> = contenders.iter().map(|&(_, hole)| hole).collect();

        let ranking: Vec<Vec<ShownHand>> = showdown(&holes, &self.community)
            .into_iter()
            .map(|class| {
                class
                    .into_iter()
                    .map(|ranked| ShownHand {
                        player: contenders[ranked.index].0,
                        hole: contenders[ranked.index].1,
                        quality: ranked.quality,
                    })
                    .collect()
            })
            .collect();

        // classes keep input order, so the top class is already in payout order
        let top: &[ShownHand] = ranking.first().map(Vec::as_slice).unwrap_or(&[]);
        let winners: Vec<PlayerHandle> = top.iter().map(|s| s.player).collect();
        let payouts: Vec<Payout> = split_pot(self.pot, &winners)
            .into_iter()
            .zip(top)
            .map(|((player, amount), shown)| {
                players[player.0].add_chips(amount);
                Payout {
                    player,
                    amount,
                    hand: Some(shown.quality.clone()),
                }
            })
            .collect();

        info!(
            winners = ?winners,
            pot = self.pot,
            category = ?top.first().map(|s| s.quality.category),
            "pot awarded at showdown"
        );
        self.conclude(RoundSummary {
            resolution: Resolution::Showdown,
            payouts,
            ranking,
        });
    }

    fn conclude(&mut self, summary: RoundSummary) {
        self.phase = Phase::Showdown;
        self.current_turn = None;
        self.stage = BettingStage::Summary(summary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::hand::Category;
    use crate::player::Seat;

    fn table(stacks: &[u32]) -> Vec<Player> {
        stacks
            .iter()
            .enumerate()
            .map(|(i, &chips)| {
                let mut p = Player::new(format!("p{i}"), format!("s{i}"), format!("Guest {i}"));
                p.sit(Seat::ALL[i], chips, None);
                p
            })
            .collect()
    }

    // Deal order: first card to everyone starting left of the dealer, then
    // the second card, then flop, turn and river.
    fn staged(text: &str) -> Deck {
        Deck::from_cards(parse_cards(text).unwrap())
    }

    fn total_chips(players: &[Player], round: &Round) -> u32 {
        players.iter().map(Player::stack).sum::<u32>() + if round.is_complete() { 0 } else { round.pot() }
    }

    const P0: PlayerHandle = PlayerHandle(0);
    const P1: PlayerHandle = PlayerHandle(1);
    const P2: PlayerHandle = PlayerHandle(2);

    #[test]
    fn heads_up_dealer_posts_small_blind_and_acts_first() {
        let mut players = table(&[500, 500]);
        let round = Round::start(&mut players, P0, 20, Deck::new_with_seed(3)).unwrap();

        assert_eq!(round.phase(), Phase::Preflop);
        assert_eq!(round.small_blind_player(), P0);
        assert_eq!(round.big_blind_player(), P1);
        assert_eq!(round.pot(), 30);
        assert_eq!(players[0].stack(), 490);
        assert_eq!(players[1].stack(), 480);
        assert_eq!(round.current_turn(), Some(P0));
        assert!(players.iter().all(|p| p.hole_cards().is_some()));
    }

    #[test]
    fn calling_the_big_blind_deals_the_flop() {
        let mut players = table(&[500, 500]);
        let mut round = Round::start(&mut players, P0, 20, Deck::new_with_seed(3)).unwrap();

        let progress = round.act(&mut players, P0, BettingAction::Call).unwrap();
        assert_eq!(
            progress,
            Progress::Street {
                phase: Phase::Flop,
                next: P1
            }
        );
        assert_eq!(round.pot(), 40);
        assert_eq!(round.community().len(), 3);
        assert_eq!(round.betting().unwrap().current_bet(), 0);
    }

    #[test]
    fn three_handed_blinds_sit_left_of_the_dealer() {
        let mut players = table(&[500, 500, 500]);
        let round = Round::start(&mut players, P1, 20, Deck::new_with_seed(9)).unwrap();
        assert_eq!(round.small_blind_player(), P2);
        assert_eq!(round.big_blind_player(), P0);
        // first to act is left of the big blind, which is the dealer
        assert_eq!(round.current_turn(), Some(P1));
    }

    #[test]
    fn short_stack_calls_all_in_and_the_board_runs_out() {
        let mut players = table(&[1000, 60]);
        let deck = staged("AS KD AH KC 2C 7D 9H 3S 4C");
        let mut round = Round::start(&mut players, P0, 20, deck).unwrap();

        assert_eq!(
            round.act(&mut players, P0, BettingAction::Raise(80)).unwrap(),
            Progress::Turn(P1)
        );
        assert_eq!(round.pot(), 120);

        let progress = round.act(&mut players, P1, BettingAction::Call).unwrap();
        assert_eq!(progress, Progress::Complete);
        assert_eq!(round.community().len(), 5);
        assert_eq!(round.committed(P1), 60);
        assert_eq!(round.pot(), 160);

        let summary = round.summary().unwrap();
        assert_eq!(summary.resolution, Resolution::Showdown);
        assert_eq!(summary.payouts.len(), 1);
        assert_eq!(summary.payouts[0].player, P1);
        assert_eq!(summary.payouts[0].amount, 160);
        assert_eq!(
            summary.payouts[0].hand.as_ref().map(|h| h.category),
            Some(Category::Pair)
        );
        assert_eq!(players[0].stack(), 900);
        assert_eq!(players[1].stack(), 160);
    }

    #[test]
    fn last_player_standing_takes_the_pot_uncontested() {
        let mut players = table(&[500, 500, 500]);
        let mut round = Round::start(&mut players, P0, 20, Deck::new_with_seed(11)).unwrap();
        assert_eq!(round.current_turn(), Some(P0));

        assert_eq!(
            round.act(&mut players, P0, BettingAction::Fold).unwrap(),
            Progress::Turn(P1)
        );
        assert!(players[0].hole_cards().is_none());
        assert_eq!(
            round.act(&mut players, P1, BettingAction::Fold).unwrap(),
            Progress::Complete
        );

        let summary = round.summary().unwrap();
        assert_eq!(summary.resolution, Resolution::Uncontested);
        assert!(summary.ranking.is_empty());
        assert_eq!(players[2].stack(), 510);
        assert_eq!(round.phase(), Phase::Showdown);
        assert_eq!(round.current_turn(), None);
        assert_eq!(
            round.act(&mut players, P2, BettingAction::Check),
            Err(GameError::HandAlreadyComplete)
        );
    }

    /// Three-handed with P0 on the button: P1 and P2 post, everyone limps.
    fn limped_to_the_flop(players: &mut [Player]) -> Round {
        let mut round = Round::start(players, P0, 20, Deck::new_with_seed(5)).unwrap();
        assert_eq!(round.act(players, P0, BettingAction::Call).unwrap(), Progress::Turn(P1));
        assert_eq!(
            round.act(players, P1, BettingAction::Call).unwrap(),
            Progress::Street {
                phase: Phase::Flop,
                next: P1
            }
        );
        assert_eq!(round.pot(), 60);
        round
    }

    #[test]
    fn a_raise_reopens_the_action_for_earlier_callers() {
        let mut players = table(&[500, 500, 500]);
        let mut round = limped_to_the_flop(&mut players);

        assert_eq!(round.act(&mut players, P1, BettingAction::Bet(40)).unwrap(), Progress::Turn(P2));
        assert_eq!(round.act(&mut players, P2, BettingAction::Raise(40)).unwrap(), Progress::Turn(P0));
        assert_eq!(round.betting().unwrap().last_raiser(), Some(P2));
        assert_eq!(round.act(&mut players, P0, BettingAction::Fold).unwrap(), Progress::Turn(P1));
        // P1 already bet but owes the raise; calling it reaches the raiser
        assert_eq!(
            round.act(&mut players, P1, BettingAction::Call).unwrap(),
            Progress::Street {
                phase: Phase::Turn,
                next: P1
            }
        );
        assert_eq!(round.pot(), 220);
        assert_eq!(round.community().len(), 4);
        assert!(!round.is_complete());

        assert_eq!(round.act(&mut players, P1, BettingAction::Check).unwrap(), Progress::Turn(P2));
        assert_eq!(round.act(&mut players, P2, BettingAction::Bet(40)).unwrap(), Progress::Turn(P1));
        assert_eq!(round.act(&mut players, P1, BettingAction::Fold).unwrap(), Progress::Complete);

        assert_eq!(round.summary().unwrap().resolution, Resolution::Uncontested);
        assert_eq!(players[0].stack(), 480);
        assert_eq!(players[1].stack(), 400);
        assert_eq!(players[2].stack(), 620);
    }

    #[test]
    fn folding_into_the_bettor_ends_the_street_not_the_hand() {
        let mut players = table(&[500, 500, 500]);
        let mut round = limped_to_the_flop(&mut players);

        assert_eq!(round.act(&mut players, P1, BettingAction::Check).unwrap(), Progress::Turn(P2));
        assert_eq!(round.act(&mut players, P2, BettingAction::Check).unwrap(), Progress::Turn(P0));
        assert_eq!(round.act(&mut players, P0, BettingAction::Bet(40)).unwrap(), Progress::Turn(P1));
        assert_eq!(round.act(&mut players, P1, BettingAction::Call).unwrap(), Progress::Turn(P2));
        assert_eq!(
            round.act(&mut players, P2, BettingAction::Fold).unwrap(),
            Progress::Street {
                phase: Phase::Turn,
                next: P1
            }
        );
        assert_eq!(round.pot(), 140);
        assert_eq!(round.live_players(), vec![P1, P0]);
        assert_eq!(total_chips(&players, &round), 1500);
    }

    #[test]
    fn board_plays_and_the_pot_is_split() {
        let mut players = table(&[500, 500]);
        let deck = staged("2C 2H 3D 3S AS KH QD JC 10S");
        let mut round = Round::start(&mut players, P0, 20, deck).unwrap();

        round.act(&mut players, P0, BettingAction::Call).unwrap();
        for _street in 0..3 {
            assert_eq!(round.current_turn(), Some(P1));
            assert_eq!(
                round.act(&mut players, P1, BettingAction::Check).unwrap(),
                Progress::Turn(P0)
            );
            round.act(&mut players, P0, BettingAction::Check).unwrap();
        }

        let summary = round.summary().unwrap();
        assert_eq!(summary.ranking.len(), 1);
        assert_eq!(summary.ranking[0].len(), 2);
        // payout order starts left of the dealer
        let paid: Vec<(PlayerHandle, u32)> =
            summary.payouts.iter().map(|p| (p.player, p.amount)).collect();
        assert_eq!(paid, vec![(P1, 20), (P0, 20)]);
        assert_eq!(players[0].stack(), 500);
        assert_eq!(players[1].stack(), 500);
    }

    #[test]
    fn rejected_actions_change_nothing() {
        let mut players = table(&[500, 500, 500]);
        let mut round = Round::start(&mut players, P0, 20, Deck::new_with_seed(5)).unwrap();

        assert_eq!(
            round.act(&mut players, P1, BettingAction::Call),
            Err(GameError::NotPlayersTurn { actual: P1 })
        );
        assert_eq!(
            round.act(&mut players, P0, BettingAction::Check),
            Err(GameError::OutstandingBet { to_call: 20 })
        );
        assert_eq!(
            round.act(&mut players, P0, BettingAction::Raise(10)),
            Err(GameError::InvalidBetAmount {
                amount: 10,
                minimum: 20
            })
        );
        assert_eq!(round.pot(), 30);
        assert_eq!(round.current_turn(), Some(P0));
        assert_eq!(players[0].stack(), 500);
        assert!(round.actions().is_empty());
    }

    #[test]
    fn blinds_putting_everyone_all_in_run_the_board() {
        let mut players = table(&[10, 500]);
        let round = Round::start(&mut players, P0, 20, Deck::new_with_seed(21)).unwrap();
        assert!(round.is_complete());
        assert_eq!(round.community().len(), 5);
        assert_eq!(round.pot(), 30);
        assert_eq!(players.iter().map(Player::stack).sum::<u32>(), 510);
    }

    #[test]
    fn abandoning_a_live_hand_refunds_every_commitment() {
        let mut players = table(&[500, 500, 500]);
        let mut round = Round::start(&mut players, P0, 20, Deck::new_with_seed(8)).unwrap();
        round.act(&mut players, P0, BettingAction::Raise(60)).unwrap();
        assert_eq!(total_chips(&players, &round), 1500);

        round.abandon(&mut players);
        assert!(players.iter().all(|p| p.stack() == 500));
        assert!(players.iter().all(|p| p.hole_cards().is_none()));
    }

    #[test]
    fn one_eligible_player_cannot_start() {
        let mut players = table(&[500, 0]);
        assert!(matches!(
            Round::start(&mut players, P0, 20, Deck::new_with_seed(1)),
            Err(GameError::NotEnoughPlayers { eligible: 1 })
        ));
    }
}
