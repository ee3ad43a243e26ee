//! Error types for the room layer.

use imposter_protocol::{Phase, PlayerId, RoomCode};

/// Errors surfaced to callers of room operations.
///
/// All of these are caller-input errors, not transient faults — there is
/// nothing to retry. Transport-level failures (a dead subscriber) never
/// appear here; the broadcast hub absorbs them as silent unsubscribes.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// No room registered under this code.
    #[error("room {0} not found")]
    RoomNotFound(RoomCode),

    /// The player id is not a member of this room.
    #[error("player {0} not found in this room")]
    PlayerNotFound(PlayerId),

    /// The command requires host identity and the caller is not host.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The operation is not valid in the room's current phase.
    #[error("requires the {expected} phase, room is in {actual}")]
    InvalidPhase { expected: Phase, actual: Phase },

    /// Missing/malformed fields, unknown category, bad player or
    /// imposter counts.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The room's command channel is closed. Rooms live for the
    /// process, so this only fires if the actor task died.
    #[error("room {0} is unavailable")]
    RoomUnavailable(RoomCode),
}
