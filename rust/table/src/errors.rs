use pokerroom_engine::errors::GameError;
use thiserror::Error;

use crate::messages::{InvalidAmount, ServerMessage};
use crate::registry::RoomId;
use crate::settings::SettingsError;

/// A fault the caller must hear about. Rule violations by players are not
/// errors at this level; see [`Rejection`].
#[derive(Debug, Error)]
pub enum RoomError {
    #[error("Room not found: {0}")]
    RoomNotFound(RoomId),
    #[error("No player id was supplied")]
    MissingPlayerId,
    #[error("Player id does not belong to room {0}")]
    PlayerIdRoomMismatch(RoomId),
    #[error("Room storage poisoned")]
    StoragePoisoned,
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("failed to open hand history: {0}")]
    HandLog(#[source] std::io::Error),
}

impl RoomError {
    /// Machine-readable code, matching the outbound message type name where
    /// one exists.
    pub fn error_code(&self) -> &'static str {
        match self {
            RoomError::RoomNotFound(_) => "RoomNotFound",
            RoomError::MissingPlayerId => "MissingPlayerId",
            RoomError::PlayerIdRoomMismatch(_) => "PlayerIdRoomMismatch",
            RoomError::StoragePoisoned => "StoragePoisoned",
            RoomError::Settings(_) => "Settings",
            RoomError::HandLog(_) => "HandLog",
        }
    }

    /// The message to send back to the client, for connection faults.
    pub fn to_message(&self) -> Option<ServerMessage> {
        let message = self.to_string();
        match self {
            RoomError::RoomNotFound(_) => Some(ServerMessage::RoomNotFound { message }),
            RoomError::MissingPlayerId => Some(ServerMessage::MissingPlayerId { message }),
            RoomError::PlayerIdRoomMismatch(_) => {
                Some(ServerMessage::PlayerIdRoomMismatch { message })
            }
            _ => None,
        }
    }
}

/// Why a client message was ignored. Logged, never sent back.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Rejection {
    #[error("only the room leader may do that")]
    NotLeader,
    #[error("name length out of bounds")]
    NameLength,
    #[error("chip count {0} out of bounds")]
    ChipBounds(u64),
    #[error("text message longer than {0} characters")]
    MessageTooLong(usize),
    #[error(transparent)]
    InvalidAmount(#[from] InvalidAmount),
    #[error(transparent)]
    Game(#[from] GameError),
}
