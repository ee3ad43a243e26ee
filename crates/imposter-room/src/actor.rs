//! Room actor: an isolated Tokio task that owns one [`GameRoom`].
//!
//! Every operation against a room goes through its command channel, so
//! concurrent joins or votes are serialized per room — two simultaneous
//! final votes cannot both observe "not all voted yet". Different rooms
//! run on independent tasks and never contend.

use std::sync::Arc;

use imposter_protocol::{PlayerId, PlayerSecret, RoomCode, RoomSnapshot};
use tokio::sync::{mpsc, oneshot};

use crate::{GameError, GameRoom, WordBank};

/// Everything the caller needs to announce a started game: the new
/// public snapshot plus each player's private assignment for targeted
/// `player_info` fanout.
#[derive(Debug)]
pub struct StartOutcome {
    pub snapshot: RoomSnapshot,
    pub secrets: Vec<(PlayerId, PlayerSecret)>,
}

/// Commands sent to a room actor through its channel.
///
/// Mutating commands reply with the updated public snapshot so the
/// caller can both answer the request and fan the new state out.
pub(crate) enum RoomCommand {
    Join {
        name: String,
        reply: oneshot::Sender<Result<(PlayerId, RoomSnapshot), GameError>>,
    },
    Start {
        host_id: PlayerId,
        category: String,
        num_imposters: usize,
        reply: oneshot::Sender<Result<StartOutcome, GameError>>,
    },
    MarkRevealed {
        player_id: PlayerId,
        reply: oneshot::Sender<Result<RoomSnapshot, GameError>>,
    },
    StartVoting {
        host_id: PlayerId,
        reply: oneshot::Sender<Result<RoomSnapshot, GameError>>,
    },
    SubmitVote {
        player_id: PlayerId,
        voted_for: PlayerId,
        reply: oneshot::Sender<Result<RoomSnapshot, GameError>>,
    },
    GetSnapshot {
        reply: oneshot::Sender<RoomSnapshot>,
    },
    GetPlayerInfo {
        player_id: PlayerId,
        reply: oneshot::Sender<Result<PlayerSecret, GameError>>,
    },
}

/// Handle to a running room actor. Cheap to clone — it's an
/// `mpsc::Sender` wrapper. The [`crate::RoomRegistry`] holds one per
/// room.
#[derive(Clone)]
pub struct RoomHandle {
    room_code: RoomCode,
    sender: mpsc::Sender<RoomCommand>,
}

impl RoomHandle {
    pub fn room_code(&self) -> &RoomCode {
        &self.room_code
    }

    /// Sends one command and waits for its reply. Both a closed command
    /// channel and a dropped reply mean the actor is gone.
    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> RoomCommand,
    ) -> Result<T, GameError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(command(reply_tx))
            .await
            .map_err(|_| GameError::RoomUnavailable(self.room_code.clone()))?;
        reply_rx
            .await
            .map_err(|_| GameError::RoomUnavailable(self.room_code.clone()))
    }

    /// Adds a player; replies with the new id and snapshot.
    pub async fn join(
        &self,
        name: &str,
    ) -> Result<(PlayerId, RoomSnapshot), GameError> {
        let name = name.to_string();
        self.request(|reply| RoomCommand::Join { name, reply })
            .await?
    }

    /// Starts the game (host only).
    pub async fn start(
        &self,
        host_id: PlayerId,
        category: String,
        num_imposters: usize,
    ) -> Result<StartOutcome, GameError> {
        self.request(|reply| RoomCommand::Start {
            host_id,
            category,
            num_imposters,
            reply,
        })
        .await?
    }

    /// Marks a player's reveal acknowledged.
    pub async fn mark_revealed(
        &self,
        player_id: PlayerId,
    ) -> Result<RoomSnapshot, GameError> {
        self.request(|reply| RoomCommand::MarkRevealed { player_id, reply })
            .await?
    }

    /// Opens the voting phase (host only).
    pub async fn start_voting(
        &self,
        host_id: PlayerId,
    ) -> Result<RoomSnapshot, GameError> {
        self.request(|reply| RoomCommand::StartVoting { host_id, reply })
            .await?
    }

    /// Records or overwrites one player's vote.
    pub async fn submit_vote(
        &self,
        player_id: PlayerId,
        voted_for: PlayerId,
    ) -> Result<RoomSnapshot, GameError> {
        self.request(|reply| RoomCommand::SubmitVote {
            player_id,
            voted_for,
            reply,
        })
        .await?
    }

    /// The current public snapshot.
    pub async fn snapshot(&self) -> Result<RoomSnapshot, GameError> {
        self.request(|reply| RoomCommand::GetSnapshot { reply }).await
    }

    /// One player's private assignment.
    pub async fn player_info(
        &self,
        player_id: PlayerId,
    ) -> Result<PlayerSecret, GameError> {
        self.request(|reply| RoomCommand::GetPlayerInfo { player_id, reply })
            .await?
    }
}

/// The internal room actor. Runs inside a Tokio task.
struct RoomActor {
    room: GameRoom,
    words: Arc<WordBank>,
    receiver: mpsc::Receiver<RoomCommand>,
}

impl RoomActor {
    /// Processes commands until every handle is dropped.
    async fn run(mut self) {
        tracing::debug!(
            room_code = %self.room.room_code(),
            "room actor started"
        );

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                RoomCommand::Join { name, reply } => {
                    let result = self
                        .room
                        .join(&name)
                        .map(|player_id| (player_id, self.room.snapshot()));
                    let _ = reply.send(result);
                }
                RoomCommand::Start {
                    host_id,
                    category,
                    num_imposters,
                    reply,
                } => {
                    let result = self
                        .room
                        .start(&host_id, &category, num_imposters, &self.words)
                        .map(|()| StartOutcome {
                            snapshot: self.room.snapshot(),
                            secrets: self.room.player_secrets(),
                        });
                    let _ = reply.send(result);
                }
                RoomCommand::MarkRevealed { player_id, reply } => {
                    let result = self
                        .room
                        .mark_revealed(&player_id)
                        .map(|()| self.room.snapshot());
                    let _ = reply.send(result);
                }
                RoomCommand::StartVoting { host_id, reply } => {
                    let result = self
                        .room
                        .start_voting(&host_id)
                        .map(|()| self.room.snapshot());
                    let _ = reply.send(result);
                }
                RoomCommand::SubmitVote {
                    player_id,
                    voted_for,
                    reply,
                } => {
                    let result = self
                        .room
                        .submit_vote(&player_id, &voted_for)
                        .map(|()| self.room.snapshot());
                    let _ = reply.send(result);
                }
                RoomCommand::GetSnapshot { reply } => {
                    let _ = reply.send(self.room.snapshot());
                }
                RoomCommand::GetPlayerInfo { player_id, reply } => {
                    let _ = reply.send(self.room.player_info(&player_id));
                }
            }
        }

        tracing::debug!(
            room_code = %self.room.room_code(),
            "room actor stopped"
        );
    }
}

/// Spawns a new room actor task and returns a handle to it.
///
/// `channel_size` bounds the command queue — if it fills up, senders
/// wait rather than pile up unboundedly.
pub(crate) fn spawn_room(
    room: GameRoom,
    words: Arc<WordBank>,
    channel_size: usize,
) -> RoomHandle {
    let (tx, rx) = mpsc::channel(channel_size);
    let room_code = room.room_code().clone();

    let actor = RoomActor {
        room,
        words,
        receiver: rx,
    };
    tokio::spawn(actor.run());

    RoomHandle {
        room_code,
        sender: tx,
    }
}
