//! Rooms around a [`pokerroom_engine`] table: joining, connection tracking,
//! client messages, the views sent back and inactive-room eviction.
//!
//! Transport is left to the hosting service. It hands each decoded
//! [`ClientMessage`] to [`RoomRegistry::dispatch`] and delivers the returned
//! [`Outbound`] payloads to the matching connections.
//!
//! ```
//! use pokerroom_table::{ClientMessage, RoomRegistry, TableSettings};
//!
//! let registry = RoomRegistry::new(TableSettings::default());
//! let room = registry.create_room("Friday game").unwrap();
//! let ticket = registry.join(&room, "Brave Heron").unwrap();
//! registry.connect(&room, &ticket.secret_id).unwrap();
//!
//! let sit: ClientMessage =
//!     serde_json::from_str(r#"{"type":"SitAtTable","position":"ONE","chipCount":500}"#).unwrap();
//! let updates = registry.dispatch(&room, &ticket.secret_id, sit).unwrap();
//! assert_eq!(updates.len(), 1);
//! ```

pub mod errors;
pub mod logging;
pub mod messages;
pub mod registry;
pub mod room;
pub mod settings;
pub mod views;

pub use errors::{Rejection, RoomError};
pub use logging::{init_logging, LogEntry, TestLogSubscriber};
pub use messages::{ClientMessage, InvalidAmount, ServerMessage};
pub use registry::{RoomId, RoomRegistry};
pub use room::{JoinTicket, Outbound, Room};
pub use settings::{SettingsError, TableSettings};
pub use views::{GameStateView, PlayerStateView, PublicPlayer, RoundView, TextMessageEntry};
