use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;

/// Stable index of a player in the table's player arena. Players are never
/// removed from the arena, so a handle stays valid for the table's lifetime.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct PlayerHandle(pub usize);

impl fmt::Display for PlayerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One of the nine seats around the table, in clockwise order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Seat {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
}

impl Seat {
    pub const ALL: [Seat; 9] = [
        Seat::One,
        Seat::Two,
        Seat::Three,
        Seat::Four,
        Seat::Five,
        Seat::Six,
        Seat::Seven,
        Seat::Eight,
        Seat::Nine,
    ];
}

/// A wagering action. `Bet(n)` opens the betting, `Raise(n)` raises by `n`
/// chips on top of what the player owes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BettingAction {
    /// Fold and forfeit the hand
    Fold,
    /// Pass without wagering, only valid when nothing is owed
    Check,
    /// Match the outstanding bet, or go all-in for less
    Call,
    /// Open the betting with the given amount
    Bet(u32),
    /// Raise the outstanding bet by the given amount
    Raise(u32),
}

/// Someone in the room: identity, seat, chips and cards.
///
/// `chips` is `None` until the player first sits down. Hole cards are present
/// only while the player holds a live hand.
#[derive(Debug, Clone)]
pub struct Player {
    public_id: String,
    secret_id: String,
    guest_name: String,
    name: Option<String>,
    seat: Option<Seat>,
    chips: Option<u32>,
    hole: Option<[Card; 2]>,
    is_leader: bool,
    is_connected: bool,
    is_away: bool,
    leaving: bool,
}

impl Player {
    pub fn new(
        public_id: impl Into<String>,
        secret_id: impl Into<String>,
        guest_name: impl Into<String>,
    ) -> Self {
        Self {
            public_id: public_id.into(),
            secret_id: secret_id.into(),
            guest_name: guest_name.into(),
            name: None,
            seat: None,
            chips: None,
            hole: None,
            is_leader: false,
            is_connected: false,
            is_away: false,
            leaving: false,
        }
    }

    pub fn public_id(&self) -> &str {
        &self.public_id
    }
    pub fn secret_id(&self) -> &str {
        &self.secret_id
    }
    pub fn guest_name(&self) -> &str {
        &self.guest_name
    }
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
    pub fn seat(&self) -> Option<Seat> {
        self.seat
    }
    pub fn chips(&self) -> Option<u32> {
        self.chips
    }
    /// Chips behind, zero when the player never sat down.
    pub fn stack(&self) -> u32 {
        self.chips.unwrap_or(0)
    }
    pub fn hole_cards(&self) -> Option<[Card; 2]> {
        self.hole
    }
    pub fn is_leader(&self) -> bool {
        self.is_leader
    }
    pub fn is_connected(&self) -> bool {
        self.is_connected
    }
    pub fn is_away(&self) -> bool {
        self.is_away
    }
    pub fn is_leaving(&self) -> bool {
        self.leaving
    }

    pub fn set_leader(&mut self, leader: bool) {
        self.is_leader = leader;
    }
    pub fn set_connected(&mut self, connected: bool) {
        self.is_connected = connected;
    }
    pub fn set_away(&mut self, away: bool) {
        self.is_away = away;
    }

    /// Seated, holding chips and not sitting out: will be dealt the next hand.
    pub fn is_eligible(&self) -> bool {
        self.seat.is_some() && self.stack() > 0 && !self.is_away
    }

    pub(crate) fn sit(&mut self, seat: Seat, chips: u32, name: Option<String>) {
        self.seat = Some(seat);
        self.chips = Some(chips);
        self.name = name;
        self.leaving = false;
    }

    pub(crate) fn stand(&mut self) {
        self.seat = None;
        self.hole = None;
        self.leaving = false;
    }

    pub(crate) fn mark_leaving(&mut self) {
        self.leaving = true;
    }

    pub(crate) fn give_hole(&mut self, cards: [Card; 2]) {
        self.hole = Some(cards);
    }

    pub(crate) fn clear_hole(&mut self) {
        self.hole = None;
    }

    pub(crate) fn add_chips(&mut self, amount: u32) {
        self.chips = Some(self.stack().saturating_add(amount));
    }

    /// Moves `amount` chips out of the stack.
    pub(crate) fn bet(&mut self, amount: u32) -> Result<(), GameError> {
        if amount == 0 {
            return Ok(());
        }
        let stack = self.stack();
        if amount > stack {
            return Err(GameError::InsufficientChips {
                needed: amount,
                stack,
            });
        }
        self.chips = Some(stack - amount);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_is_zero_until_seated() {
        let mut p = Player::new("pub", "sec", "Quiet Otter");
        assert_eq!(p.chips(), None);
        assert_eq!(p.stack(), 0);
        assert!(!p.is_eligible());
        p.sit(Seat::Three, 500, Some("Ann".into()));
        assert_eq!(p.stack(), 500);
        assert!(p.is_eligible());
        p.set_away(true);
        assert!(!p.is_eligible());
    }

    #[test]
    fn bet_never_overdraws() {
        let mut p = Player::new("pub", "sec", "Quiet Otter");
        p.sit(Seat::One, 100, None);
        assert_eq!(
            p.bet(150),
            Err(GameError::InsufficientChips {
                needed: 150,
                stack: 100
            })
        );
        assert_eq!(p.stack(), 100);
        p.bet(100).unwrap();
        assert_eq!(p.chips(), Some(0));
    }

    #[test]
    fn seats_serialize_as_words() {
        let json = serde_json::to_string(&Seat::Seven).unwrap();
        assert_eq!(json, "\"SEVEN\"");
    }
}
