use thiserror::Error;

use crate::player::{PlayerHandle, Seat};

/// Why the engine refused a request. A refused request never changes state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid bet amount: {amount}, minimum: {minimum}")]
    InvalidBetAmount { amount: u32, minimum: u32 },
    #[error("Insufficient chips for action: needs {needed}, has {stack}")]
    InsufficientChips { needed: u32, stack: u32 },
    #[error("Player has no chips left")]
    NoChips,
    #[error("A bet of {to_call} is outstanding")]
    OutstandingBet { to_call: u32 },
    #[error("There is no bet to call or raise")]
    NoOutstandingBet,
    #[error("No hand in progress")]
    NoHandInProgress,
    #[error("Hand already complete")]
    HandAlreadyComplete,
    #[error("The current hand has not finished")]
    HandInProgress,
    #[error("The game has not been started")]
    GameNotStarted,
    #[error("Player already folded")]
    PlayerAlreadyFolded,
    #[error("Player {0} was not dealt into this hand")]
    NotInHand(PlayerHandle),
    #[error("It's not player {actual}'s turn")]
    NotPlayersTurn { actual: PlayerHandle },
    #[error("Need at least 2 seated players with chips, found {eligible}")]
    NotEnoughPlayers { eligible: usize },
    #[error("Seat {0:?} is already taken")]
    SeatTaken(Seat),
    #[error("Player is already seated")]
    AlreadySeated,
    #[error("Player is not seated")]
    NotSeated,
    #[error("Unknown player {0}")]
    UnknownPlayer(PlayerHandle),
    #[error("Chips on the table would exceed {max}", max = u32::MAX)]
    ChipOverflow,
}
