//! Room lifecycle for the imposter game.
//!
//! Each room runs as an isolated Tokio task (actor model) owning its
//! [`GameRoom`] state machine, so concurrent joins and votes against one
//! room are serialized while different rooms proceed in parallel.
//!
//! # Key types
//!
//! - [`GameRoom`] — the pure room state machine (waiting → reveal →
//!   voting → results)
//! - [`RoomRegistry`] — generates room codes, creates rooms, looks up
//!   handles
//! - [`RoomHandle`] — send operations to a running room actor
//! - [`WordBank`] — injected category → word-list configuration
//! - [`GameError`] — typed caller-input failures

mod actor;
mod error;
mod ids;
mod registry;
mod room;
mod words;

pub use actor::{RoomHandle, StartOutcome};
pub use error::GameError;
pub use registry::RoomRegistry;
pub use room::{GameRoom, Player};
pub use words::WordBank;
