//! Core types shared between the room layer, the broadcast hub, and the
//! transport layer that serializes them to the wire.
//!
//! The JSON shapes here are load-bearing: web clients match on the exact
//! key spelling (`roomCode`, `eliminatedPlayerId`, ...) and the exact
//! string values of the enums (`"waiting"`, `"crew_win"`, ...).

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a player, stable for the session.
///
/// Opaque random token — clients echo it back verbatim and must not
/// parse it. `#[serde(transparent)]` keeps it a plain JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A short numeric room code — the public identifier players type in to
/// join, and the registry key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomCode(pub String);

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RoomCode {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RoomCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ---------------------------------------------------------------------------
// Game enums
// ---------------------------------------------------------------------------

/// The phase of a room.
///
/// Transitions only ever move forward:
///
/// ```text
/// Waiting → Reveal → Voting → Results
/// ```
///
/// - **Waiting**: lobby open, players may join.
/// - **Reveal**: roles assigned, each player privately views their card.
/// - **Voting**: every player votes for a suspected imposter.
/// - **Results**: votes tallied, a player eliminated, winner decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Waiting,
    Reveal,
    Voting,
    Results,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Waiting => write!(f, "waiting"),
            Self::Reveal => write!(f, "reveal"),
            Self::Voting => write!(f, "voting"),
            Self::Results => write!(f, "results"),
        }
    }
}

/// A player's secret role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Knows the secret word.
    Crew,
    /// Gets no word and must bluff.
    Imposter,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Crew => write!(f, "crew"),
            Self::Imposter => write!(f, "imposter"),
        }
    }
}

/// The outcome of a finished round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    /// The eliminated player was an imposter.
    CrewWin,
    /// The eliminated player was crew.
    ImposterWin,
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CrewWin => write!(f, "crew_win"),
            Self::ImposterWin => write!(f, "imposter_win"),
        }
    }
}

// ---------------------------------------------------------------------------
// Public snapshot
// ---------------------------------------------------------------------------

/// A player as shown to everyone in the room: id and display name only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub id: PlayerId,
    pub name: String,
}

/// The public view of a room, safe to broadcast to every participant.
///
/// Never contains the secret word, any player's role, or any player's
/// word — those travel only in [`PlayerSecret`], addressed to the owning
/// player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSnapshot {
    pub room_code: RoomCode,
    /// Join order; the host is always first.
    pub players: Vec<PlayerSummary>,
    pub status: Phase,
    pub category: Option<String>,
    pub num_imposters: Option<usize>,
    pub eliminated_player_id: Option<PlayerId>,
    pub game_result: Option<GameResult>,
}

// ---------------------------------------------------------------------------
// Private payload
// ---------------------------------------------------------------------------

/// One player's private assignment, delivered only to that player.
///
/// All fields are `None` until the game starts. Imposters get a role but
/// no word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSecret {
    pub role: Option<Role>,
    pub word: Option<String>,
    pub category: Option<String>,
}

// ---------------------------------------------------------------------------
// Outbound events
// ---------------------------------------------------------------------------

/// A message pushed to subscriber channels by the broadcast hub.
///
/// Adjacently tagged so the wire form is
/// `{ "type": "room_update", "data": { ... } }` — the envelope web
/// clients consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum GameEvent {
    /// Public snapshot, fanned out to every channel in the room.
    RoomUpdate(RoomSnapshot),
    /// Private assignment, delivered only to the addressed player's
    /// channels.
    PlayerInfo(PlayerSecret),
}

// =========================================================================
// Tests
// =========================================================================
