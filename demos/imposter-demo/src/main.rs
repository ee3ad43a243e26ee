//! Runs one scripted round in-process: create a room, join two
//! players, deal roles, reveal, vote. Each player's subscription is
//! printed as events arrive — the same stream a WebSocket layer would
//! serialize to clients.
//!
//! ```text
//! RUST_LOG=debug cargo run -p imposter-demo
//! ```

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use imposter::{Coordinator, GameEvent, PlayerId, RoomCode, WordBank};

fn demo_words() -> WordBank {
    WordBank::new()
        .with_category("Animals", &["Penguin", "Giraffe", "Octopus", "Koala"])
        .with_category("Foods", &["Pizza", "Sushi", "Ramen", "Taco"])
}

/// Tails one player's event channel, printing everything that arrives.
async fn watch(
    coordinator: &Coordinator,
    room_code: &RoomCode,
    name: &str,
    player_id: PlayerId,
) {
    let mut sub = coordinator
        .open_channel(room_code, Some(player_id))
        .await;
    let name = name.to_string();
    tokio::spawn(async move {
        while let Some(event) = sub.recv().await {
            match event {
                GameEvent::RoomUpdate(s) => println!(
                    "  [{name}] room_update: phase={} players={}",
                    s.status,
                    s.players.len()
                ),
                GameEvent::PlayerInfo(secret) => println!(
                    "  [{name}] player_info: role={} word={}",
                    secret.role.map_or("?".into(), |r| r.to_string()),
                    secret.word.as_deref().unwrap_or("-"),
                ),
            }
        }
    });
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let coordinator = Arc::new(Coordinator::new(demo_words()));

    let created = coordinator.create_room().await;
    println!("room {} created", created.room_code);

    let ana = coordinator.join_room(&created.room_code, "Ana").await?;
    let ben = coordinator.join_room(&created.room_code, "Ben").await?;

    watch(&coordinator, &created.room_code, "Host", created.host_id.clone()).await;
    watch(&coordinator, &created.room_code, "Ana", ana.player_id.clone()).await;
    watch(&coordinator, &created.room_code, "Ben", ben.player_id.clone()).await;

    let everyone = [created.host_id, ana.player_id, ben.player_id];

    println!("starting: category=Animals, 1 imposter");
    coordinator
        .start_game(&created.room_code, everyone[0].clone(), "Animals", 1)
        .await?;

    for id in &everyone {
        coordinator
            .mark_revealed(&created.room_code, id.clone())
            .await?;
    }

    // Everyone suspects Ben.
    for id in &everyone {
        coordinator
            .submit_vote(&created.room_code, id.clone(), everyone[2].clone())
            .await?;
    }

    // Let the watcher tasks drain their queues before reading the end
    // state.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let snapshot = coordinator.get_room_state(&created.room_code).await?;
    let eliminated = snapshot
        .eliminated_player_id
        .map_or("-".into(), |id| id.to_string());
    let result = snapshot
        .game_result
        .map_or("-".into(), |r| r.to_string());
    println!("eliminated={eliminated} result={result}");

    Ok(())
}
