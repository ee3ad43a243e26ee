//! # imposter
//!
//! A small multiplayer party-game coordinator: players join a shared
//! room, receive secret roles ("crew" vs "imposter") and a secret word,
//! then vote to eliminate a suspected imposter.
//!
//! This crate is the surface the transport layer (HTTP/WebSocket,
//! CORS, process bootstrap — all out of scope here) calls into:
//! request/response operations on [`Coordinator`] plus a subscription
//! interface ([`Coordinator::open_channel`]) that pushes
//! `room_update` / `player_info` events for the transport to serialize
//! to the wire.
//!
//! ```rust,no_run
//! use imposter::{Coordinator, WordBank};
//!
//! # async fn run() -> Result<(), imposter::GameError> {
//! let words = WordBank::new().with_category("Animals", &["Penguin"]);
//! let coordinator = Coordinator::new(words);
//!
//! let created = coordinator.create_room().await;
//! let joined = coordinator.join_room(&created.room_code, "Ana").await?;
//! # let _ = joined;
//! # Ok(())
//! # }
//! ```

mod coordinator;

pub use coordinator::{Coordinator, CreatedRoom, JoinedRoom};
pub use imposter_hub::{BroadcastHub, ChannelId, Subscription};
pub use imposter_protocol::{
    GameEvent, GameResult, Phase, PlayerId, PlayerSecret, PlayerSummary,
    Role, RoomCode, RoomSnapshot,
};
pub use imposter_room::{GameError, WordBank};
