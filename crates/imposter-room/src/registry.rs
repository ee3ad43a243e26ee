//! Room registry: generates room codes, creates rooms, hands out
//! handles.
//!
//! The registry is an injected, lifecycle-scoped store — constructed
//! once per process by the embedding layer, never global state. Rooms
//! live for the process lifetime; there is no expiry or deletion.

use std::collections::HashMap;
use std::sync::Arc;

use imposter_protocol::{PlayerId, RoomCode};

use crate::actor::spawn_room;
use crate::{GameError, GameRoom, RoomHandle, WordBank, ids};

/// Default command channel size for room actors.
const DEFAULT_CHANNEL_SIZE: usize = 64;

/// Owns the room-code → room mapping.
pub struct RoomRegistry {
    rooms: HashMap<RoomCode, RoomHandle>,
    /// Shared with every room actor; injected at construction.
    words: Arc<WordBank>,
}

impl RoomRegistry {
    /// Creates an empty registry over the given word lists.
    pub fn new(words: WordBank) -> Self {
        Self {
            rooms: HashMap::new(),
            words: Arc::new(words),
        }
    }

    /// Creates a room with a fresh code and host id, spawns its actor,
    /// and returns both identifiers.
    ///
    /// Codes are 4 digits, so the space is 9000 rooms — plenty for a
    /// party server. Collisions are handled by regenerating until the
    /// code is unused.
    pub fn create_room(&mut self) -> (RoomCode, PlayerId) {
        let room_code = loop {
            let code = ids::generate_room_code();
            if !self.rooms.contains_key(&code) {
                break code;
            }
        };
        let host_id = ids::generate_player_id();

        let room = GameRoom::new(room_code.clone(), host_id.clone());
        let handle =
            spawn_room(room, Arc::clone(&self.words), DEFAULT_CHANNEL_SIZE);
        self.rooms.insert(room_code.clone(), handle);

        tracing::info!(%room_code, "room created");
        (room_code, host_id)
    }

    /// Looks up a room's handle by code.
    pub fn get(&self, room_code: &RoomCode) -> Result<RoomHandle, GameError> {
        self.rooms
            .get(room_code)
            .cloned()
            .ok_or_else(|| GameError::RoomNotFound(room_code.clone()))
    }

    /// Returns the number of active rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}
