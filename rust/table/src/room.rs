use chrono::Utc;
use pokerroom_engine::engine::Engine;
use pokerroom_engine::errors::GameError;
use pokerroom_engine::player::PlayerHandle;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::{Rejection, RoomError};
use crate::messages::{whole_chips, ClientMessage, ServerMessage};
use crate::registry::RoomId;
use crate::settings::TableSettings;
use crate::views::{GameStateView, PlayerStateView, TextMessageEntry};

/// Credentials handed to a player when they join. The secret id
/// authenticates every later message; the public id is what other players
/// see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinTicket {
    pub secret_id: String,
    pub public_id: String,
}

/// What one connected player should receive after a change.
#[derive(Debug, Clone, PartialEq)]
pub struct Outbound {
    pub secret_id: String,
    pub game_state: ServerMessage,
    pub player_state: ServerMessage,
}

/// One table and everyone who has joined it.
#[derive(Debug)]
pub struct Room {
    id: RoomId,
    name: String,
    settings: TableSettings,
    engine: Engine,
    chat: Vec<TextMessageEntry>,
}

impl Room {
    pub fn new(
        id: RoomId,
        name: impl Into<String>,
        settings: &TableSettings,
    ) -> Result<Self, RoomError> {
        let mut engine = Engine::new(settings.big_blind, settings.seed);
        if let Some(dir) = &settings.hand_log_dir {
            engine = engine
                .with_hand_log(dir.join(format!("{id}.jsonl")))
                .map_err(RoomError::HandLog)?;
        }
        Ok(Self {
            id,
            name: name.into(),
            settings: settings.clone(),
            engine,
            chat: Vec::new(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Direct table access, e.g. to stage a known deck.
    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    /// Adds a player to the room. The first player to join leads it for the
    /// room's lifetime.
    pub fn join(&mut self, guest_name: impl Into<String>) -> JoinTicket {
        let first = self.engine.players().is_empty();
        let ticket = JoinTicket {
            secret_id: Uuid::new_v4().to_string(),
            public_id: Uuid::new_v4().to_string(),
        };
        let h = self
            .engine
            .add_player(&ticket.public_id, &ticket.secret_id, guest_name);
        if first {
            if let Some(p) = self.engine.player_mut(h) {
                p.set_leader(true);
            }
        }
        info!(room_id = %self.id, public_id = %ticket.public_id, leader = first, "player joined");
        ticket
    }

    pub fn player_handle(&self, secret_id: &str) -> Result<PlayerHandle, RoomError> {
        if secret_id.is_empty() {
            return Err(RoomError::MissingPlayerId);
        }
        self.engine
            .find_by_secret_id(secret_id)
            .ok_or_else(|| RoomError::PlayerIdRoomMismatch(self.id.clone()))
    }

    pub fn connect(&mut self, secret_id: &str) -> Result<(), RoomError> {
        self.set_connected(secret_id, true)
    }

    /// Marks the player disconnected. Returns `true` when nobody is left
    /// connected.
    pub fn disconnect(&mut self, secret_id: &str) -> Result<bool, RoomError> {
        self.set_connected(secret_id, false)?;
        Ok(self.is_idle())
    }

    pub fn is_idle(&self) -> bool {
        !self.engine.players().iter().any(|p| p.is_connected())
    }

    /// Applies a client message. `Ok(false)` means the message broke a rule
    /// and was ignored; nothing changed and nobody needs an update.
    pub fn handle(&mut self, secret_id: &str, message: ClientMessage) -> Result<bool, RoomError> {
        let h = self.player_handle(secret_id)?;
        match self.apply(h, &message) {
            Ok(()) => {
                debug!(room_id = %self.id, player = %h, ?message, "message applied");
                Ok(true)
            }
            Err(rejection) => {
                debug!(room_id = %self.id, player = %h, ?message, %rejection, "message ignored");
                Ok(false)
            }
        }
    }

    pub fn apply(&mut self, h: PlayerHandle, message: &ClientMessage) -> Result<(), Rejection> {
        match message {
            ClientMessage::SitAtTable {
                position,
                chip_count,
                name,
            } => {
                let chips = whole_chips(chip_count)?;
                if !self.settings.chips_allowed(chips) {
                    return Err(Rejection::ChipBounds(u64::from(chips)));
                }
                if name.as_deref().is_some_and(|n| !self.settings.name_allowed(n)) {
                    return Err(Rejection::NameLength);
                }
                self.engine.sit(h, *position, chips, name.clone())?;
            }
            ClientMessage::LeaveTable => self.engine.leave(h)?,
            ClientMessage::SetAway { away } => self.engine.set_away(h, *away)?,
            ClientMessage::StartGame => {
                self.require_leader(h)?;
                self.engine.start_game()?;
                info!(room_id = %self.id, "game started");
            }
            ClientMessage::NextRound => {
                self.require_leader(h)?;
                self.engine.next_round()?;
            }
            ClientMessage::BettingFold
            | ClientMessage::BettingCall
            | ClientMessage::BettingBet { .. }
            | ClientMessage::BettingRaise { .. } => {
                if let Some(action) = message.betting_action() {
                    self.engine.act(h, action?)?;
                }
            }
            ClientMessage::SendTextMessage { message } => self.say(h, message)?,
        }
        Ok(())
    }

    pub fn game_state(&self) -> GameStateView {
        GameStateView::build(&self.engine, &self.settings, &self.chat)
    }

    /// Chat history, oldest first.
    pub fn text_messages(&self) -> &[TextMessageEntry] {
        &self.chat
    }

    pub fn player_state(&self, secret_id: &str) -> Result<PlayerStateView, RoomError> {
        let h = self.player_handle(secret_id)?;
        let player = self
            .engine
            .player(h)
            .ok_or_else(|| RoomError::PlayerIdRoomMismatch(self.id.clone()))?;
        Ok(PlayerStateView::from_player(player))
    }

    /// The shared game state plus each connected player's private state.
    pub fn outbound(&self) -> Vec<Outbound> {
        let game_state = self.game_state();
        self.engine
            .players()
            .iter()
            .filter(|p| p.is_connected())
            .map(|p| Outbound {
                secret_id: p.secret_id().to_string(),
                game_state: ServerMessage::GameState(game_state.clone()),
                player_state: ServerMessage::PlayerState(PlayerStateView::from_player(p)),
            })
            .collect()
    }

    fn require_leader(&self, h: PlayerHandle) -> Result<(), Rejection> {
        match self.engine.player(h) {
            Some(p) if p.is_leader() => Ok(()),
            _ => Err(Rejection::NotLeader),
        }
    }

    fn say(&mut self, h: PlayerHandle, message: &str) -> Result<(), Rejection> {
        if !self.settings.text_message_allowed(message) {
            return Err(Rejection::MessageTooLong(
                self.settings.max_text_message_length,
            ));
        }
        let public_player_id = self
            .engine
            .player(h)
            .ok_or(GameError::UnknownPlayer(h))?
            .public_id()
            .to_string();
        self.chat.push(TextMessageEntry {
            public_player_id,
            time: Utc::now().timestamp_millis(),
            message: message.to_string(),
        });
        Ok(())
    }

    fn set_connected(&mut self, secret_id: &str, connected: bool) -> Result<(), RoomError> {
        let h = self.player_handle(secret_id)?;
        if let Some(p) = self.engine.player_mut(h) {
            p.set_connected(connected);
        }
        debug!(room_id = %self.id, player = %h, connected, "connection changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokerroom_engine::player::Seat;
    use serde_json::Number;

    fn room() -> Room {
        let settings = TableSettings {
            seed: Some(11),
            ..TableSettings::default()
        };
        Room::new("room-1".into(), "Friday game", &settings).unwrap()
    }

    fn sit(position: Seat, chips: u32) -> ClientMessage {
        ClientMessage::SitAtTable {
            position,
            chip_count: Number::from(chips),
            name: None,
        }
    }

    #[test]
    fn first_joiner_leads() {
        let mut room = room();
        let a = room.join("Brave Heron");
        let b = room.join("Calm Lynx");
        assert!(room.player_state(&a.secret_id).unwrap().is_leader);
        assert!(!room.player_state(&b.secret_id).unwrap().is_leader);
        assert_ne!(a.secret_id, a.public_id);
    }

    #[test]
    fn unknown_and_missing_ids_are_errors() {
        let mut room = room();
        assert!(matches!(
            room.handle("", ClientMessage::StartGame),
            Err(RoomError::MissingPlayerId)
        ));
        assert!(matches!(
            room.handle("nobody", ClientMessage::StartGame),
            Err(RoomError::PlayerIdRoomMismatch(id)) if id == "room-1"
        ));
    }

    #[test]
    fn only_the_leader_starts() {
        let mut room = room();
        let a = room.join("Brave Heron");
        let b = room.join("Calm Lynx");
        assert!(room.handle(&a.secret_id, sit(Seat::One, 500)).unwrap());
        assert!(room.handle(&b.secret_id, sit(Seat::Four, 500)).unwrap());

        let h = room.player_handle(&b.secret_id).unwrap();
        assert_eq!(
            room.apply(h, &ClientMessage::StartGame),
            Err(Rejection::NotLeader)
        );
        assert!(!room.engine().game_started());
        assert!(room.handle(&a.secret_id, ClientMessage::StartGame).unwrap());
        assert!(room.engine().game_started());
    }

    #[test]
    fn sit_checks_bounds() {
        let mut room = room();
        let a = room.join("Brave Heron");
        let h = room.player_handle(&a.secret_id).unwrap();
        assert_eq!(
            room.apply(h, &sit(Seat::One, 2_000_000)),
            Err(Rejection::ChipBounds(2_000_000))
        );
        let long_name = ClientMessage::SitAtTable {
            position: Seat::One,
            chip_count: Number::from(100u32),
            name: Some("x".repeat(31)),
        };
        assert_eq!(room.apply(h, &long_name), Err(Rejection::NameLength));
        let fractional = ClientMessage::SitAtTable {
            position: Seat::One,
            chip_count: Number::from_f64(99.5).unwrap(),
            name: None,
        };
        assert!(matches!(
            room.apply(h, &fractional),
            Err(Rejection::InvalidAmount(_))
        ));
        assert_eq!(room.engine().player(h).unwrap().seat(), None);
    }

    #[test]
    fn chat_is_recorded_in_order_and_bounded() {
        let mut room = room();
        let a = room.join("Brave Heron");
        let b = room.join("Calm Lynx");
        let say = |text: &str| ClientMessage::SendTextMessage {
            message: text.to_string(),
        };

        let before = Utc::now().timestamp_millis();
        assert!(room.handle(&a.secret_id, say("good luck")).unwrap());
        assert!(room.handle(&b.secret_id, say("you too")).unwrap());
        let h = room.player_handle(&b.secret_id).unwrap();
        assert_eq!(
            room.apply(h, &say(&"x".repeat(501))),
            Err(Rejection::MessageTooLong(500))
        );

        let chat = room.text_messages();
        assert_eq!(chat.len(), 2);
        assert_eq!(chat[0].public_player_id, a.public_id);
        assert_eq!(chat[0].message, "good luck");
        assert_eq!(chat[1].public_player_id, b.public_id);
        assert!(chat[0].time >= before && chat[0].time <= chat[1].time);
        assert_eq!(room.game_state().text_message_history, chat);
    }

    #[test]
    fn disconnect_reports_idle_room() {
        let mut room = room();
        let a = room.join("Brave Heron");
        let b = room.join("Calm Lynx");
        room.connect(&a.secret_id).unwrap();
        room.connect(&b.secret_id).unwrap();
        assert_eq!(room.outbound().len(), 2);
        assert!(!room.disconnect(&a.secret_id).unwrap());
        assert!(room.disconnect(&b.secret_id).unwrap());
        assert!(room.outbound().is_empty());
    }
}
