use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use std::time::{Duration, Instant};

use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::RoomError;
use crate::messages::ClientMessage;
use crate::room::{JoinTicket, Outbound, Room};
use crate::settings::TableSettings;

pub type RoomId = String;

#[derive(Debug)]
struct Entry {
    room: Arc<Mutex<Room>>,
    /// Set while nobody is connected
    inactive_since: Option<Instant>,
}

/// Every live room on a server, keyed by id.
///
/// Rooms are independent; each one's `Mutex` serializes its messages. A room
/// with nobody connected for longer than the configured TTL is removed by
/// [`RoomRegistry::evict_expired`], which the hosting service calls
/// periodically.
#[derive(Debug)]
pub struct RoomRegistry {
    rooms: RwLock<HashMap<RoomId, Entry>>,
    settings: TableSettings,
}

impl RoomRegistry {
    pub fn new(settings: TableSettings) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            settings,
        }
    }

    pub fn settings(&self) -> &TableSettings {
        &self.settings
    }

    pub fn room_ttl(&self) -> Duration {
        self.settings.room_ttl()
    }

    /// Creates an empty room. It counts as inactive until someone connects.
    pub fn create_room(&self, name: &str) -> Result<RoomId, RoomError> {
        let id = Uuid::new_v4().simple().to_string();
        let room = Room::new(id.clone(), name, &self.settings)?;
        {
            let mut guard = self
                .rooms
                .write()
                .map_err(|_| RoomError::StoragePoisoned)?;
            guard.insert(
                id.clone(),
                Entry {
                    room: Arc::new(Mutex::new(room)),
                    inactive_since: Some(Instant::now()),
                },
            );
        }
        info!(room_id = %id, name, "room created");
        Ok(id)
    }

    pub fn get(&self, id: &str) -> Result<Arc<Mutex<Room>>, RoomError> {
        let guard = self.rooms.read().map_err(|_| RoomError::StoragePoisoned)?;
        guard
            .get(id)
            .map(|e| Arc::clone(&e.room))
            .ok_or_else(|| RoomError::RoomNotFound(id.to_string()))
    }

    pub fn remove(&self, id: &str) -> Result<(), RoomError> {
        let removed = self
            .rooms
            .write()
            .map_err(|_| RoomError::StoragePoisoned)?
            .remove(id);
        match removed {
            Some(_) => {
                info!(room_id = %id, "room removed");
                Ok(())
            }
            None => Err(RoomError::RoomNotFound(id.to_string())),
        }
    }

    pub fn join(&self, id: &str, guest_name: &str) -> Result<JoinTicket, RoomError> {
        let room = self.get(id)?;
        let ticket = lock(&room)?.join(guest_name);
        Ok(ticket)
    }

    pub fn connect(&self, id: &str, secret_id: &str) -> Result<(), RoomError> {
        let room = self.get(id)?;
        lock(&room)?.connect(secret_id)?;
        self.mark_active(id)
    }

    /// Starts the room's inactivity clock at `now` once its last player
    /// disconnects.
    pub fn disconnect(&self, id: &str, secret_id: &str, now: Instant) -> Result<(), RoomError> {
        let room = self.get(id)?;
        let idle = lock(&room)?.disconnect(secret_id)?;
        if idle {
            self.mark_inactive(id, now)?;
        }
        Ok(())
    }

    /// Applies a client message and returns what every connected player
    /// should now receive. Empty when the message was ignored.
    pub fn dispatch(
        &self,
        id: &str,
        secret_id: &str,
        message: ClientMessage,
    ) -> Result<Vec<Outbound>, RoomError> {
        let handle = self.get(id)?;
        let mut room = lock(&handle)?;
        if room.handle(secret_id, message)? {
            Ok(room.outbound())
        } else {
            Ok(Vec::new())
        }
    }

    /// Starts the inactivity clock unless someone is connected by the time
    /// the registry lock is held.
    pub fn mark_inactive(&self, id: &str, now: Instant) -> Result<(), RoomError> {
        self.with_entry(id, |e| {
            if lock(&e.room)?.is_idle() {
                e.inactive_since.get_or_insert(now);
            }
            Ok(())
        })
    }

    /// Stops the inactivity clock unless everyone has left again by the time
    /// the registry lock is held.
    pub fn mark_active(&self, id: &str) -> Result<(), RoomError> {
        self.with_entry(id, |e| {
            if !lock(&e.room)?.is_idle() {
                e.inactive_since = None;
            }
            Ok(())
        })
    }

    /// Removes every room that has been inactive for at least the TTL as of
    /// `now`, returning their ids.
    pub fn evict_expired(&self, now: Instant) -> Vec<RoomId> {
        let ttl = self.room_ttl();
        let mut evicted = Vec::new();
        let mut guard = match self.rooms.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.retain(|id, entry| {
            let expired = entry
                .inactive_since
                .is_some_and(|since| now.saturating_duration_since(since) >= ttl);
            if expired {
                evicted.push(id.clone());
            }
            !expired
        });
        drop(guard);

        for id in &evicted {
            info!(room_id = %id, "room expired after inactivity");
        }
        evicted
    }

    pub fn room_ids(&self) -> Vec<RoomId> {
        let mut ids: Vec<RoomId> = match self.rooms.read() {
            Ok(guard) => guard.keys().cloned().collect(),
            Err(_) => Vec::new(),
        };
        ids.sort();
        ids
    }

    /// Runs `f` under the registry write lock. Room locks may be taken inside
    /// `f`; nothing takes the registry lock while holding a room lock.
    fn with_entry(
        &self,
        id: &str,
        f: impl FnOnce(&mut Entry) -> Result<(), RoomError>,
    ) -> Result<(), RoomError> {
        let mut guard = self
            .rooms
            .write()
            .map_err(|_| RoomError::StoragePoisoned)?;
        let entry = guard
            .get_mut(id)
            .ok_or_else(|| RoomError::RoomNotFound(id.to_string()))?;
        f(entry)?;
        debug!(room_id = %id, inactive = entry.inactive_since.is_some(), "room activity updated");
        Ok(())
    }
}

fn lock(room: &Mutex<Room>) -> Result<MutexGuard<'_, Room>, RoomError> {
    room.lock().map_err(|_| RoomError::StoragePoisoned)
}
