//! Wire-visible types for the imposter game coordinator.
//!
//! Everything a client ever sees is defined here: identifiers, the phase
//! and role enums, the public room snapshot, the per-player secret
//! payload, and the outbound event envelope. The serde attributes on
//! these types ARE the wire format — the shape tests in this crate pin
//! it down field by field.
//!
//! # Key types
//!
//! - [`PlayerId`], [`RoomCode`] — opaque string identifiers
//! - [`Phase`] — waiting → reveal → voting → results
//! - [`RoomSnapshot`] — public room state, safe to broadcast
//! - [`PlayerSecret`] — one player's private role/word assignment
//! - [`GameEvent`] — the `room_update` / `player_info` envelope

mod types;

pub use types::{
    GameEvent, GameResult, Phase, PlayerId, PlayerSecret, PlayerSummary,
    Role, RoomCode, RoomSnapshot,
};
