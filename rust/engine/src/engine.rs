use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::{info, warn};

use crate::deck::Deck;
use crate::errors::GameError;
use crate::game::{next_dealer, random_dealer, seat_order};
use crate::logger::{HandLogger, HandRecord, ShowdownInfo};
use crate::player::{BettingAction, Player, PlayerHandle, Seat};
use crate::round::{Progress, Resolution, Round};

/// The table: everyone in the room, the dealer button and the hand in play.
///
/// Players are stored in an arena that only grows, so a [`PlayerHandle`]
/// handed out by [`Engine::add_player`] stays valid. A rejected request
/// returns a [`GameError`] and leaves the table unchanged.
///
/// # Examples
///
/// ```
/// use pokerroom_engine::engine::Engine;
/// use pokerroom_engine::player::{BettingAction, Seat};
///
/// let mut engine = Engine::new(20, Some(7));
/// let a = engine.add_player("pub-a", "sec-a", "Brave Heron");
/// let b = engine.add_player("pub-b", "sec-b", "Calm Lynx");
/// engine.sit(a, Seat::One, 500, None).unwrap();
/// engine.sit(b, Seat::Two, 500, None).unwrap();
/// engine.start_game().unwrap();
///
/// let round = engine.round().unwrap();
/// assert_eq!(round.pot(), 30);
/// // heads-up the dealer posts the small blind and acts first
/// let dealer = round.dealer();
/// assert_eq!(round.current_turn(), Some(dealer));
/// engine.act(dealer, BettingAction::Fold).unwrap();
/// assert!(engine.round().unwrap().is_complete());
/// ```
#[derive(Debug)]
pub struct Engine {
    players: Vec<Player>,
    big_blind: u32,
    dealer_seat: Option<Seat>,
    round: Option<Round>,
    game_started: bool,
    rng: ChaCha20Rng,
    staged_deck: Option<Deck>,
    hand_log: HandLogger,
    last_hand: Option<HandRecord>,
}

impl Engine {
    /// A table with the given big blind. `seed` fixes dealer choice and every
    /// deck shuffle; `None` seeds from the thread RNG.
    pub fn new(big_blind: u32, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        Self {
            players: Vec::new(),
            big_blind,
            dealer_seat: None,
            round: None,
            game_started: false,
            rng: ChaCha20Rng::seed_from_u64(seed),
            staged_deck: None,
            hand_log: HandLogger::detached(&chrono::Utc::now().format("%Y%m%d").to_string()),
            last_hand: None,
        }
    }

    /// Appends every finished hand to the JSONL file at `path`.
    pub fn with_hand_log<P: AsRef<Path>>(mut self, path: P) -> std::io::Result<Self> {
        self.hand_log = HandLogger::create(path)?;
        Ok(self)
    }

    pub fn add_player(
        &mut self,
        public_id: impl Into<String>,
        secret_id: impl Into<String>,
        guest_name: impl Into<String>,
    ) -> PlayerHandle {
        self.players
            .push(Player::new(public_id, secret_id, guest_name));
        PlayerHandle(self.players.len() - 1)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, h: PlayerHandle) -> Option<&Player> {
        self.players.get(h.0)
    }

    /// For connection and leadership flags; seats, chips and cards only
    /// change through the table operations.
    pub fn player_mut(&mut self, h: PlayerHandle) -> Option<&mut Player> {
        self.players.get_mut(h.0)
    }

    pub fn find_by_public_id(&self, public_id: &str) -> Option<PlayerHandle> {
        self.players
            .iter()
            .position(|p| p.public_id() == public_id)
            .map(PlayerHandle)
    }

    pub fn find_by_secret_id(&self, secret_id: &str) -> Option<PlayerHandle> {
        self.players
            .iter()
            .position(|p| p.secret_id() == secret_id)
            .map(PlayerHandle)
    }

    pub fn big_blind(&self) -> u32 {
        self.big_blind
    }
    pub fn small_blind(&self) -> u32 {
        self.big_blind / 2
    }
    pub fn game_started(&self) -> bool {
        self.game_started
    }
    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }
    /// Record of the most recently finished hand.
    pub fn last_hand(&self) -> Option<&HandRecord> {
        self.last_hand.as_ref()
    }

    /// Whether a hand is being played right now.
    pub fn hand_in_progress(&self) -> bool {
        self.round.as_ref().is_some_and(|r| !r.is_complete())
    }

    /// Players who would be dealt in if a hand started now, in seat order.
    pub fn eligible_players(&self) -> Vec<PlayerHandle> {
        seat_order(&self.players)
            .into_iter()
            .filter(|h| !self.players[h.0].is_leaving())
            .collect()
    }

    /// The next hand is dealt from `deck` instead of a fresh shuffle.
    pub fn stage_deck(&mut self, deck: Deck) {
        self.staged_deck = Some(deck);
    }

    /// Takes `seat` with `chips`. The player is dealt in from the next hand.
    ///
    /// All chips in the room, stacks plus the live pot, must fit in a `u32`;
    /// a buy-in that would exceed that fails with [`GameError::ChipOverflow`].
    pub fn sit(
        &mut self,
        h: PlayerHandle,
        seat: Seat,
        chips: u32,
        name: Option<String>,
    ) -> Result<(), GameError> {
        let player = self.players.get(h.0).ok_or(GameError::UnknownPlayer(h))?;
        if player.seat().is_some() {
            return Err(GameError::AlreadySeated);
        }
        if self.players.iter().any(|p| p.seat() == Some(seat)) {
            return Err(GameError::SeatTaken(seat));
        }
        let live_pot = self
            .round
            .as_ref()
            .filter(|r| !r.is_complete())
            .map_or(0, Round::pot);
        let in_play = self
            .players
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != h.0)
            .try_fold(live_pot, |acc, (_, p)| acc.checked_add(p.stack()))
            .and_then(|others| others.checked_add(chips));
        if in_play.is_none() {
            return Err(GameError::ChipOverflow);
        }
        self.players[h.0].sit(seat, chips, name);
        info!(player = %h, ?seat, chips, "player sat down");
        Ok(())
    }

    /// Stands the player up. A player still holding cards in the live hand
    /// keeps playing it and stands when the next hand begins.
    pub fn leave(&mut self, h: PlayerHandle) -> Result<(), GameError> {
        let player = self.players.get(h.0).ok_or(GameError::UnknownPlayer(h))?;
        if player.seat().is_none() {
            return Err(GameError::NotSeated);
        }
        let in_live_hand = self.round.as_ref().is_some_and(|r| {
            !r.is_complete() && r.is_participant(h) && !r.folded().contains(&h)
        });
        if in_live_hand {
            self.players[h.0].mark_leaving();
            info!(player = %h, "player will leave after this hand");
        } else {
            self.players[h.0].stand();
            info!(player = %h, "player left the table");
        }
        Ok(())
    }

    pub fn set_away(&mut self, h: PlayerHandle, away: bool) -> Result<(), GameError> {
        let player = self.players.get_mut(h.0).ok_or(GameError::UnknownPlayer(h))?;
        player.set_away(away);
        Ok(())
    }

    /// Starts the game with a randomly chosen dealer. A hand in progress is
    /// thrown away and every chip committed to it is returned first.
    pub fn start_game(&mut self) -> Result<(), GameError> {
        let refunds: Vec<u32> = match &self.round {
            Some(r) if !r.is_complete() => {
                (0..self.players.len()).map(|i| r.committed(PlayerHandle(i))).collect()
            }
            _ => Vec::new(),
        };
        let eligible = self
            .players
            .iter()
            .enumerate()
            .filter(|(i, p)| {
                let stack = p.stack() + refunds.get(*i).copied().unwrap_or(0);
                p.seat().is_some() && !p.is_away() && !p.is_leaving() && stack > 0
            })
            .count();
        if eligible < 2 {
            return Err(GameError::NotEnoughPlayers { eligible });
        }

        if let Some(round) = self.round.take() {
            round.abandon(&mut self.players);
        }
        self.stand_leavers();
        let dealer = random_dealer(&self.players, &mut self.rng)
            .ok_or(GameError::NotEnoughPlayers { eligible: 0 })?;
        self.deal(dealer)?;
        self.game_started = true;
        Ok(())
    }

    /// Deals the next hand with the button moved one seat clockwise.
    pub fn next_round(&mut self) -> Result<(), GameError> {
        if !self.game_started {
            return Err(GameError::GameNotStarted);
        }
        if self.hand_in_progress() {
            return Err(GameError::HandInProgress);
        }
        let eligible = self.eligible_players().len();
        if eligible < 2 {
            return Err(GameError::NotEnoughPlayers { eligible });
        }

        self.stand_leavers();
        let dealer = match self.dealer_seat {
            Some(seat) => next_dealer(&self.players, seat),
            None => random_dealer(&self.players, &mut self.rng),
        }
        .ok_or(GameError::NotEnoughPlayers { eligible: 0 })?;
        self.deal(dealer)
    }

    /// Applies a wagering action for `h` to the live hand.
    pub fn act(&mut self, h: PlayerHandle, action: BettingAction) -> Result<Progress, GameError> {
        let round = match self.round.as_mut() {
            Some(r) => r,
            None if self.game_started => return Err(GameError::NoHandInProgress),
            None => return Err(GameError::GameNotStarted),
        };
        let progress = round.act(&mut self.players, h, action)?;
        if progress == Progress::Complete {
            self.record_hand();
        }
        Ok(progress)
    }

    fn deal(&mut self, dealer: PlayerHandle) -> Result<(), GameError> {
        let deck = match self.staged_deck.take() {
            Some(deck) => deck,
            None => Deck::shuffled(self.rng.random()),
        };
        let round = Round::start(&mut self.players, dealer, self.big_blind, deck)?;
        self.dealer_seat = self.players[dealer.0].seat();
        let complete = round.is_complete();
        self.round = Some(round);
        if complete {
            self.record_hand();
        }
        Ok(())
    }

    fn stand_leavers(&mut self) {
        for (i, p) in self.players.iter_mut().enumerate() {
            if p.is_leaving() {
                p.stand();
                info!(player = %PlayerHandle(i), "player left the table");
            }
        }
    }

    fn record_hand(&mut self) {
        let Some(round) = &self.round else {
            return;
        };
        let Some(summary) = round.summary() else {
            return;
        };
        let public_id = |h: PlayerHandle| self.players[h.0].public_id().to_string();
        let display_name = |h: PlayerHandle| {
            let p = &self.players[h.0];
            p.name().unwrap_or(p.guest_name()).to_string()
        };

        let result = summary
            .payouts
            .iter()
            .map(|pay| format!("{} wins {}", display_name(pay.player), pay.amount))
            .collect::<Vec<_>>()
            .join(", ");
        let notes = match summary.resolution {
            Resolution::Uncontested => "uncontested".to_string(),
            Resolution::Showdown if summary.payouts.len() > 1 => "split pot".to_string(),
            Resolution::Showdown => summary
                .payouts
                .first()
                .and_then(|p| p.hand.as_ref())
                .map(|q| q.category.to_string())
                .unwrap_or_default(),
        };

        let record = HandRecord {
            hand_id: self.hand_log.next_id(),
            seed: round.deck_seed(),
            dealer: public_id(round.dealer()),
            actions: round.actions().to_vec(),
            board: round.community().to_vec(),
            pot: round.pot(),
            result: Some(result),
            ts: None,
            meta: None,
            showdown: Some(ShowdownInfo {
                winners: summary.payouts.iter().map(|p| public_id(p.player)).collect(),
                notes: Some(notes),
            }),
        };
        if let Err(e) = self.hand_log.write(&record) {
            warn!(error = %e, hand_id = %record.hand_id, "failed to append hand history");
        }
        self.last_hand = Some(record);
    }
}
