//! Wire messages exchanged with a room's clients.
//!
//! Both directions are JSON objects tagged by a `"type"` field with camelCase
//! fields, e.g. `{"type":"BettingRaise","amount":40}`.

use pokerroom_engine::player::{BettingAction, Seat};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use thiserror::Error;

use crate::views::{GameStateView, PlayerStateView};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    SitAtTable {
        position: Seat,
        chip_count: Number,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    LeaveTable,
    SetAway {
        away: bool,
    },
    StartGame,
    NextRound,
    BettingFold,
    BettingCall,
    BettingBet {
        amount: Number,
    },
    BettingRaise {
        amount: Number,
    },
    SendTextMessage {
        message: String,
    },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("not a whole number of chips: {0}")]
pub struct InvalidAmount(pub Number);

impl ClientMessage {
    /// The wagering action this message asks for, or `None` for messages
    /// that are not wagers.
    pub fn betting_action(&self) -> Option<Result<BettingAction, InvalidAmount>> {
        let action = match self {
            ClientMessage::BettingFold => Ok(BettingAction::Fold),
            ClientMessage::BettingCall => Ok(BettingAction::Call),
            ClientMessage::BettingBet { amount } => whole_chips(amount).map(BettingAction::Bet),
            ClientMessage::BettingRaise { amount } => whole_chips(amount).map(BettingAction::Raise),
            _ => return None,
        };
        Some(action)
    }
}

/// A non-negative integer that fits a chip count. `20.0`, `-5` and `1e3`
/// are all rejected.
pub fn whole_chips(n: &Number) -> Result<u32, InvalidAmount> {
    n.as_u64()
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| InvalidAmount(n.clone()))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    GameState(GameStateView),
    PlayerState(PlayerStateView),
    RoomNotFound { message: String },
    MissingPlayerId { message: String },
    PlayerIdRoomMismatch { message: String },
}
