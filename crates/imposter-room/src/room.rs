//! The room state machine: players, phase, secret word, and votes.
//!
//! `GameRoom` is a plain synchronous struct — all the game rules live
//! here, fully unit-testable without a runtime. The actor in
//! [`crate::actor`] owns one instance and serializes access to it.

use std::collections::HashMap;

use imposter_protocol::{
    GameResult, Phase, PlayerId, PlayerSecret, PlayerSummary, Role,
    RoomCode, RoomSnapshot,
};
use rand::seq::SliceRandom;

use crate::{GameError, WordBank, ids};

/// Minimum players required to start a round.
const MIN_PLAYERS: usize = 3;

/// One player's server-side state.
///
/// Owned exclusively by its room; mutated only through [`GameRoom`]
/// operations. A player's current vote lives in the room's `votes` map.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub role: Option<Role>,
    /// The secret word — populated only for crew.
    pub word: Option<String>,
    pub has_revealed: bool,
}

/// One independent game session.
///
/// Phase transitions only move forward:
///
/// ```text
/// Waiting ──start──→ Reveal ──all revealed / start_voting──→ Voting
///                                        ──all voted──→ Results
/// ```
#[derive(Debug)]
pub struct GameRoom {
    room_code: RoomCode,
    host_id: PlayerId,
    /// Join order; the host is always index 0 and is never removed.
    players: Vec<Player>,
    status: Phase,
    category: Option<String>,
    num_imposters: Option<usize>,
    /// Never exposed in snapshots.
    secret_word: Option<String>,
    /// voter id → voted-for id. Cleared whenever voting (re)starts.
    votes: HashMap<PlayerId, PlayerId>,
    eliminated_player_id: Option<PlayerId>,
    game_result: Option<GameResult>,
}

impl GameRoom {
    /// Creates a room containing only the host, in the waiting phase.
    pub fn new(room_code: RoomCode, host_id: PlayerId) -> Self {
        Self {
            room_code,
            players: vec![Player {
                id: host_id.clone(),
                name: "Host".to_string(),
                role: None,
                word: None,
                has_revealed: false,
            }],
            host_id,
            status: Phase::Waiting,
            category: None,
            num_imposters: None,
            secret_word: None,
            votes: HashMap::new(),
            eliminated_player_id: None,
            game_result: None,
        }
    }

    pub fn room_code(&self) -> &RoomCode {
        &self.room_code
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn status(&self) -> Phase {
        self.status
    }

    /// Adds a player to the lobby. Only valid while waiting.
    pub fn join(&mut self, name: &str) -> Result<PlayerId, GameError> {
        self.require_phase(Phase::Waiting)?;
        if name.trim().is_empty() {
            return Err(GameError::InvalidArgument(
                "player name must not be empty".to_string(),
            ));
        }

        let player_id = ids::generate_player_id();
        self.players.push(Player {
            id: player_id.clone(),
            name: name.to_string(),
            role: None,
            word: None,
            has_revealed: false,
        });

        tracing::info!(
            room_code = %self.room_code,
            %player_id,
            players = self.players.len(),
            "player joined"
        );
        Ok(player_id)
    }

    /// Starts the game: shuffles players, deals `num_imposters` imposter
    /// roles, gives everyone else one shared word from `category`.
    ///
    /// Host only; requires the waiting phase, at least three players,
    /// a known category, and `0 < num_imposters < player count`.
    pub fn start(
        &mut self,
        host_id: &PlayerId,
        category: &str,
        num_imposters: usize,
        words: &WordBank,
    ) -> Result<(), GameError> {
        self.require_host(host_id, "only the host can start the game")?;
        self.require_phase(Phase::Waiting)?;
        if self.players.len() < MIN_PLAYERS {
            return Err(GameError::InvalidArgument(format!(
                "need at least {MIN_PLAYERS} players to start"
            )));
        }
        let secret_word = words
            .pick(category)
            .ok_or_else(|| {
                GameError::InvalidArgument(format!(
                    "unknown category: {category}"
                ))
            })?
            .to_string();
        if num_imposters == 0 || num_imposters >= self.players.len() {
            return Err(GameError::InvalidArgument(format!(
                "numImposters must be between 1 and {}",
                self.players.len() - 1
            )));
        }

        // Uniform shuffle of ids; the first `num_imposters` become
        // imposters. Player order itself (join order) is untouched.
        let mut order: Vec<PlayerId> =
            self.players.iter().map(|p| p.id.clone()).collect();
        order.shuffle(&mut rand::rng());

        for player in &mut self.players {
            let is_imposter = order[..num_imposters].contains(&player.id);
            if is_imposter {
                player.role = Some(Role::Imposter);
                player.word = None;
            } else {
                player.role = Some(Role::Crew);
                player.word = Some(secret_word.clone());
            }
            player.has_revealed = false;
        }

        self.category = Some(category.to_string());
        self.num_imposters = Some(num_imposters);
        self.secret_word = Some(secret_word);
        self.votes.clear();
        self.status = Phase::Reveal;

        tracing::info!(
            room_code = %self.room_code,
            category,
            num_imposters,
            players = self.players.len(),
            "game started"
        );
        Ok(())
    }

    /// Records that a player has seen their role card. When the last
    /// player reveals, the room advances to voting on its own.
    pub fn mark_revealed(
        &mut self,
        player_id: &PlayerId,
    ) -> Result<(), GameError> {
        self.require_phase(Phase::Reveal)?;
        let player = self
            .players
            .iter_mut()
            .find(|p| &p.id == player_id)
            .ok_or_else(|| GameError::PlayerNotFound(player_id.clone()))?;
        player.has_revealed = true;
        tracing::debug!(room_code = %self.room_code, %player_id, "revealed");

        if self.players.iter().all(|p| p.has_revealed) {
            self.votes.clear();
            self.status = Phase::Voting;
            tracing::info!(
                room_code = %self.room_code,
                "all revealed, voting open"
            );
        }
        Ok(())
    }

    /// Opens voting without waiting for every reveal. Host only.
    pub fn start_voting(
        &mut self,
        host_id: &PlayerId,
    ) -> Result<(), GameError> {
        self.require_host(host_id, "only the host can start voting")?;
        self.require_phase(Phase::Reveal)?;
        self.votes.clear();
        self.status = Phase::Voting;
        tracing::info!(room_code = %self.room_code, "voting open");
        Ok(())
    }

    /// Records (or overwrites) one player's vote. When every player has
    /// a vote on record, tallies and moves to results.
    pub fn submit_vote(
        &mut self,
        player_id: &PlayerId,
        voted_for: &PlayerId,
    ) -> Result<(), GameError> {
        self.require_phase(Phase::Voting)?;
        if !self.players.iter().any(|p| &p.id == player_id) {
            return Err(GameError::PlayerNotFound(player_id.clone()));
        }
        if !self.players.iter().any(|p| &p.id == voted_for) {
            return Err(GameError::PlayerNotFound(voted_for.clone()));
        }

        self.votes.insert(player_id.clone(), voted_for.clone());
        tracing::debug!(
            room_code = %self.room_code,
            voter = %player_id,
            target = %voted_for,
            votes = self.votes.len(),
            "vote recorded"
        );

        if self.players.iter().all(|p| self.votes.contains_key(&p.id)) {
            self.resolve_votes();
        }
        Ok(())
    }

    /// Tallies votes, eliminates the top-voted player, decides the round.
    ///
    /// Tie-break rule: counts are compared with strict `>` while
    /// scanning players in join order, so the FIRST player to reach the
    /// maximum is eliminated.
    fn resolve_votes(&mut self) {
        let mut eliminated: Option<(&Player, usize)> = None;
        for player in &self.players {
            let count =
                self.votes.values().filter(|v| **v == player.id).count();
            if eliminated.is_none_or(|(_, best)| count > best) {
                eliminated = Some((player, count));
            }
        }

        // players is never empty, so eliminated is always set here.
        if let Some((player, count)) = eliminated {
            self.eliminated_player_id = Some(player.id.clone());
            let result = if player.role == Some(Role::Imposter) {
                GameResult::CrewWin
            } else {
                GameResult::ImposterWin
            };
            self.game_result = Some(result);
            self.status = Phase::Results;
            tracing::info!(
                room_code = %self.room_code,
                eliminated = %player.id,
                votes = count,
                %result,
                "round finished"
            );
        }
    }

    /// The public view: all secrets stripped.
    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            room_code: self.room_code.clone(),
            players: self
                .players
                .iter()
                .map(|p| PlayerSummary {
                    id: p.id.clone(),
                    name: p.name.clone(),
                })
                .collect(),
            status: self.status,
            category: self.category.clone(),
            num_imposters: self.num_imposters,
            eliminated_player_id: self.eliminated_player_id.clone(),
            game_result: self.game_result,
        }
    }

    /// One player's private assignment. All fields are `None` before
    /// the game starts.
    pub fn player_info(
        &self,
        player_id: &PlayerId,
    ) -> Result<PlayerSecret, GameError> {
        let player = self
            .players
            .iter()
            .find(|p| &p.id == player_id)
            .ok_or_else(|| GameError::PlayerNotFound(player_id.clone()))?;
        Ok(PlayerSecret {
            role: player.role,
            word: player.word.clone(),
            category: self.category.clone(),
        })
    }

    /// Every player's private assignment, for post-start fanout.
    pub fn player_secrets(&self) -> Vec<(PlayerId, PlayerSecret)> {
        self.players
            .iter()
            .map(|p| {
                (
                    p.id.clone(),
                    PlayerSecret {
                        role: p.role,
                        word: p.word.clone(),
                        category: self.category.clone(),
                    },
                )
            })
            .collect()
    }

    fn require_host(
        &self,
        caller: &PlayerId,
        action: &str,
    ) -> Result<(), GameError> {
        if caller == &self.host_id {
            Ok(())
        } else {
            Err(GameError::Forbidden(action.to_string()))
        }
    }

    fn require_phase(&self, expected: Phase) -> Result<(), GameError> {
        if self.status == expected {
            Ok(())
        } else {
            Err(GameError::InvalidPhase {
                expected,
                actual: self.status,
            })
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
