//! Per-room broadcast fanout.
//!
//! The hub keeps one set of live subscriber channels per room and
//! pushes [`GameEvent`]s through them. It knows nothing about game
//! rules — callers decide what to publish and when.
//!
//! Delivery is non-blocking: each channel is an unbounded mpsc sender,
//! so a slow or dead subscriber can never stall delivery to the rest.
//! A failed send means the receiver is gone; the channel is pruned and
//! delivery continues — disconnects are a silent unsubscribe, never an
//! error.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use imposter_protocol::{GameEvent, PlayerId, RoomCode};
use tokio::sync::{Mutex, mpsc};

/// A unique identifier for one subscriber channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelId(u64);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ch-{}", self.0)
    }
}

/// Counter for generating channel ids.
static NEXT_CHANNEL_ID: AtomicU64 = AtomicU64::new(1);

/// One registered listener for a room.
struct Subscriber {
    id: ChannelId,
    /// The player this channel belongs to, when known. `player_info`
    /// events are delivered only to matching channels.
    player_id: Option<PlayerId>,
    tx: mpsc::UnboundedSender<GameEvent>,
}

/// The receiving half handed to the transport layer, one per live
/// connection.
pub struct Subscription {
    id: ChannelId,
    receiver: mpsc::UnboundedReceiver<GameEvent>,
}

impl Subscription {
    /// This subscription's channel id, for explicit unsubscribe.
    pub fn id(&self) -> ChannelId {
        self.id
    }

    /// Waits for the next event. `None` once unsubscribed.
    pub async fn recv(&mut self) -> Option<GameEvent> {
        self.receiver.recv().await
    }

    /// Returns the next already-queued event without waiting.
    pub fn try_recv(&mut self) -> Option<GameEvent> {
        self.receiver.try_recv().ok()
    }
}

/// Maintains per-room sets of live subscriber channels.
#[derive(Default)]
pub struct BroadcastHub {
    rooms: Mutex<HashMap<RoomCode, Vec<Subscriber>>>,
}

impl BroadcastHub {
    /// Creates an empty hub.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new listener for a room and returns its receiving
    /// half. Pass the owning player's id to receive that player's
    /// `player_info` events.
    ///
    /// The room does not have to exist yet — the caller is responsible
    /// for delivering any current state to the new channel.
    pub async fn subscribe(
        &self,
        room_code: &RoomCode,
        player_id: Option<PlayerId>,
    ) -> Subscription {
        let id = ChannelId(NEXT_CHANNEL_ID.fetch_add(1, Ordering::Relaxed));
        let (tx, receiver) = mpsc::unbounded_channel();

        let mut rooms = self.rooms.lock().await;
        rooms.entry(room_code.clone()).or_default().push(Subscriber {
            id,
            player_id,
            tx,
        });

        tracing::debug!(%room_code, channel = %id, "channel subscribed");
        Subscription { id, receiver }
    }

    /// Removes a channel. When the last channel for a room goes, the
    /// room's subscriber set is dropped (the room itself persists
    /// elsewhere).
    pub async fn unsubscribe(&self, room_code: &RoomCode, channel: ChannelId) {
        let mut rooms = self.rooms.lock().await;
        if let Some(subscribers) = rooms.get_mut(room_code) {
            subscribers.retain(|s| s.id != channel);
            if subscribers.is_empty() {
                rooms.remove(room_code);
            }
            tracing::debug!(%room_code, %channel, "channel unsubscribed");
        }
    }

    /// Delivers an event to every channel subscribed to a room.
    ///
    /// Channels whose receiver is gone are removed without aborting
    /// delivery to the rest.
    pub async fn publish(&self, room_code: &RoomCode, event: GameEvent) {
        let mut rooms = self.rooms.lock().await;
        let Some(subscribers) = rooms.get_mut(room_code) else {
            return;
        };

        subscribers.retain(|s| {
            let delivered = s.tx.send(event.clone()).is_ok();
            if !delivered {
                tracing::warn!(
                    %room_code,
                    channel = %s.id,
                    "dropping dead channel"
                );
            }
            delivered
        });
        if subscribers.is_empty() {
            rooms.remove(room_code);
        }
    }

    /// Delivers an event only to the channels belonging to one player.
    pub async fn send_to_player(
        &self,
        room_code: &RoomCode,
        player_id: &PlayerId,
        event: GameEvent,
    ) {
        let mut rooms = self.rooms.lock().await;
        let Some(subscribers) = rooms.get_mut(room_code) else {
            return;
        };

        subscribers.retain(|s| {
            if s.player_id.as_ref() != Some(player_id) {
                return true;
            }
            s.tx.send(event.clone()).is_ok()
        });
        if subscribers.is_empty() {
            rooms.remove(room_code);
        }
    }

    /// Delivers an event to one specific channel — used to hand a late
    /// subscriber the current snapshot.
    pub async fn send_to(
        &self,
        room_code: &RoomCode,
        channel: ChannelId,
        event: GameEvent,
    ) {
        let rooms = self.rooms.lock().await;
        if let Some(subscriber) = rooms
            .get(room_code)
            .and_then(|subs| subs.iter().find(|s| s.id == channel))
        {
            let _ = subscriber.tx.send(event);
        }
    }

    /// Number of live channels for a room.
    pub async fn subscriber_count(&self, room_code: &RoomCode) -> usize {
        self.rooms
            .lock()
            .await
            .get(room_code)
            .map_or(0, Vec::len)
    }
}
