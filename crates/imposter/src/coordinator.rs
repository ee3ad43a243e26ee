//! The coordinator: resolves rooms, runs operations, fans out state.
//!
//! Control flow for every mutating command is the same: resolve the
//! room handle under a short registry lock, drop the lock, run the
//! operation on the room actor, then push the resulting snapshot
//! through the hub to every subscriber of that room. The response
//! returns as soon as the state transition completes — hub sends are
//! non-blocking pushes, attempted for every current subscriber before
//! the call returns.

use imposter_hub::{BroadcastHub, ChannelId, Subscription};
use imposter_protocol::{
    GameEvent, PlayerId, PlayerSecret, RoomCode, RoomSnapshot,
};
use imposter_room::{GameError, RoomHandle, RoomRegistry, WordBank};
use tokio::sync::Mutex;

/// Reply to a successful `create_room`.
#[derive(Debug, Clone)]
pub struct CreatedRoom {
    pub room_code: RoomCode,
    pub host_id: PlayerId,
}

/// Reply to a successful `join_room`.
#[derive(Debug, Clone)]
pub struct JoinedRoom {
    pub player_id: PlayerId,
    pub snapshot: RoomSnapshot,
}

/// The party-game coordinator. Construct one per process and share it
/// behind an `Arc` across connection handlers.
pub struct Coordinator {
    registry: Mutex<RoomRegistry>,
    hub: BroadcastHub,
}

impl Coordinator {
    /// Creates a coordinator over the injected word lists.
    pub fn new(words: WordBank) -> Self {
        Self {
            registry: Mutex::new(RoomRegistry::new(words)),
            hub: BroadcastHub::new(),
        }
    }

    /// Creates a new room and returns its code and the host's id.
    pub async fn create_room(&self) -> CreatedRoom {
        let (room_code, host_id) = self.registry.lock().await.create_room();
        CreatedRoom { room_code, host_id }
    }

    /// Adds a player to a waiting room and announces the new roster.
    pub async fn join_room(
        &self,
        room_code: &RoomCode,
        name: &str,
    ) -> Result<JoinedRoom, GameError> {
        let handle = self.handle(room_code).await?;
        let (player_id, snapshot) = handle.join(name).await?;
        self.publish_update(room_code, &snapshot).await;
        Ok(JoinedRoom {
            player_id,
            snapshot,
        })
    }

    /// Starts the game (host only): deals roles and the secret word,
    /// delivers each player's private assignment to that player's
    /// channels, then announces the reveal phase.
    pub async fn start_game(
        &self,
        room_code: &RoomCode,
        host_id: PlayerId,
        category: &str,
        num_imposters: usize,
    ) -> Result<RoomSnapshot, GameError> {
        let handle = self.handle(room_code).await?;
        let outcome = handle
            .start(host_id, category.to_string(), num_imposters)
            .await?;

        // Private assignments first, then the public update — clients
        // switch to the reveal screen on the update and must already
        // hold their card by then.
        for (player_id, secret) in outcome.secrets {
            self.hub
                .send_to_player(
                    room_code,
                    &player_id,
                    GameEvent::PlayerInfo(secret),
                )
                .await;
        }
        self.publish_update(room_code, &outcome.snapshot).await;
        Ok(outcome.snapshot)
    }

    /// One player's private role/word assignment.
    pub async fn get_player_info(
        &self,
        room_code: &RoomCode,
        player_id: PlayerId,
    ) -> Result<PlayerSecret, GameError> {
        self.handle(room_code).await?.player_info(player_id).await
    }

    /// The current public snapshot of a room.
    pub async fn get_room_state(
        &self,
        room_code: &RoomCode,
    ) -> Result<RoomSnapshot, GameError> {
        self.handle(room_code).await?.snapshot().await
    }

    /// Acknowledges that a player has seen their role card. When the
    /// last player acknowledges, the room advances to voting.
    pub async fn mark_revealed(
        &self,
        room_code: &RoomCode,
        player_id: PlayerId,
    ) -> Result<RoomSnapshot, GameError> {
        let handle = self.handle(room_code).await?;
        let snapshot = handle.mark_revealed(player_id).await?;
        self.publish_update(room_code, &snapshot).await;
        Ok(snapshot)
    }

    /// Opens voting without waiting for every reveal (host only).
    pub async fn start_voting(
        &self,
        room_code: &RoomCode,
        host_id: PlayerId,
    ) -> Result<RoomSnapshot, GameError> {
        let handle = self.handle(room_code).await?;
        let snapshot = handle.start_voting(host_id).await?;
        self.publish_update(room_code, &snapshot).await;
        Ok(snapshot)
    }

    /// Records (or overwrites) a vote. The final vote tallies the
    /// round and the published snapshot carries the elimination and
    /// result.
    pub async fn submit_vote(
        &self,
        room_code: &RoomCode,
        player_id: PlayerId,
        voted_for: PlayerId,
    ) -> Result<RoomSnapshot, GameError> {
        let handle = self.handle(room_code).await?;
        let snapshot = handle.submit_vote(player_id, voted_for).await?;
        self.publish_update(room_code, &snapshot).await;
        Ok(snapshot)
    }

    /// Opens a subscriber channel for a room, one per live connection.
    ///
    /// Pass the connection's player id so the channel receives that
    /// player's `player_info` events. A late subscriber is immediately
    /// handed the room's current snapshot, if the room exists.
    pub async fn open_channel(
        &self,
        room_code: &RoomCode,
        player_id: Option<PlayerId>,
    ) -> Subscription {
        let subscription = self.hub.subscribe(room_code, player_id).await;

        if let Ok(handle) = self.handle(room_code).await {
            if let Ok(snapshot) = handle.snapshot().await {
                self.hub
                    .send_to(
                        room_code,
                        subscription.id(),
                        GameEvent::RoomUpdate(snapshot),
                    )
                    .await;
            }
        }
        subscription
    }

    /// Explicitly removes a subscriber channel. Dropping the
    /// [`Subscription`] works too — the hub prunes dead channels on the
    /// next delivery.
    pub async fn close_channel(&self, room_code: &RoomCode, channel: ChannelId) {
        self.hub.unsubscribe(room_code, channel).await;
    }

    /// Resolves a room handle. Locks the registry only for the lookup,
    /// never across a room operation or fanout.
    async fn handle(
        &self,
        room_code: &RoomCode,
    ) -> Result<RoomHandle, GameError> {
        self.registry.lock().await.get(room_code)
    }

    async fn publish_update(
        &self,
        room_code: &RoomCode,
        snapshot: &RoomSnapshot,
    ) {
        self.hub
            .publish(room_code, GameEvent::RoomUpdate(snapshot.clone()))
            .await;
    }
}
