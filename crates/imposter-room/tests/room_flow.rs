//! Integration tests for the registry and room actors.

use std::collections::HashSet;

use imposter_protocol::{GameResult, Phase, PlayerId, RoomCode};
use imposter_room::{GameError, RoomHandle, RoomRegistry, WordBank};

fn bank() -> WordBank {
    WordBank::new()
        .with_category("Animals", &["Penguin", "Tiger", "Koala"])
        .with_category("Foods", &["Pizza"])
}

fn registry() -> RoomRegistry {
    RoomRegistry::new(bank())
}

/// Creates a room and joins two more players. Returns the handle and
/// ids in join order (host first).
async fn three_player_room(
    registry: &mut RoomRegistry,
) -> (RoomHandle, Vec<PlayerId>) {
    let (room_code, host_id) = registry.create_room();
    let handle = registry.get(&room_code).unwrap();
    let (ana, _) = handle.join("Ana").await.unwrap();
    let (ben, snapshot) = handle.join("Ben").await.unwrap();
    assert_eq!(snapshot.players.len(), 3);
    (handle, vec![host_id, ana, ben])
}

// =========================================================================
// Registry
// =========================================================================

#[tokio::test]
async fn test_create_room_returns_distinct_codes() {
    let mut registry = registry();
    let (c1, h1) = registry.create_room();
    let (c2, h2) = registry.create_room();

    assert_ne!(c1, c2);
    assert_ne!(h1, h2);
    assert_eq!(registry.room_count(), 2);
}

#[tokio::test]
async fn test_room_codes_never_collide() {
    let mut registry = registry();
    let mut codes = HashSet::new();
    for _ in 0..50 {
        let (code, _) = registry.create_room();
        assert!(codes.insert(code), "collision retry must keep codes unique");
    }
    assert_eq!(registry.room_count(), 50);
}

#[tokio::test]
async fn test_get_unknown_room_is_not_found() {
    let registry = registry();
    let result = registry.get(&RoomCode::from("0000"));
    assert!(matches!(result, Err(GameError::RoomNotFound(_))));
}

#[tokio::test]
async fn test_new_room_snapshot_contains_the_host() {
    let mut registry = registry();
    let (room_code, host_id) = registry.create_room();
    let handle = registry.get(&room_code).unwrap();

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.room_code, room_code);
    assert_eq!(snapshot.status, Phase::Waiting);
    assert_eq!(snapshot.players.len(), 1);
    assert_eq!(snapshot.players[0].id, host_id);
}

// =========================================================================
// Full round through handles
// =========================================================================

#[tokio::test]
async fn test_full_round_reaches_results() {
    let mut registry = registry();
    let (handle, ids) = three_player_room(&mut registry).await;
    let host_id = ids[0].clone();

    let outcome = handle
        .start(host_id, "Animals".into(), 1)
        .await
        .unwrap();
    assert_eq!(outcome.snapshot.status, Phase::Reveal);
    assert_eq!(outcome.secrets.len(), 3);

    for id in &ids {
        handle.mark_revealed(id.clone()).await.unwrap();
    }
    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.status, Phase::Voting, "all revealed");

    // Everyone votes for Ana.
    let target = ids[1].clone();
    let mut last = None;
    for id in &ids {
        last = Some(
            handle
                .submit_vote(id.clone(), target.clone())
                .await
                .unwrap(),
        );
    }

    let final_snapshot = last.unwrap();
    assert_eq!(final_snapshot.status, Phase::Results);
    assert_eq!(final_snapshot.eliminated_player_id, Some(target.clone()));

    let info = handle.player_info(target).await.unwrap();
    let expected = match info.role.unwrap() {
        imposter_protocol::Role::Imposter => GameResult::CrewWin,
        imposter_protocol::Role::Crew => GameResult::ImposterWin,
    };
    assert_eq!(final_snapshot.game_result, Some(expected));
}

#[tokio::test]
async fn test_start_with_unknown_category_fails_through_handle() {
    let mut registry = registry();
    let (handle, ids) = three_player_room(&mut registry).await;

    let result = handle
        .start(ids[0].clone(), "Sports".into(), 1)
        .await;
    assert!(matches!(result, Err(GameError::InvalidArgument(_))));

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.status, Phase::Waiting, "state unchanged");
}

#[tokio::test]
async fn test_start_by_non_host_fails_through_handle() {
    let mut registry = registry();
    let (handle, ids) = three_player_room(&mut registry).await;

    let result = handle
        .start(ids[1].clone(), "Animals".into(), 1)
        .await;
    assert!(matches!(result, Err(GameError::Forbidden(_))));
}

// =========================================================================
// Concurrency — the point of the per-room actor
// =========================================================================

#[tokio::test]
async fn test_simultaneous_joins_are_all_recorded() {
    let mut registry = registry();
    let (room_code, _) = registry.create_room();
    let handle = registry.get(&room_code).unwrap();

    let tasks: Vec<_> = (0..5)
        .map(|i| {
            let handle = handle.clone();
            tokio::spawn(async move { handle.join(&format!("Player {i}")).await })
        })
        .collect();

    let mut ids = HashSet::new();
    for task in tasks {
        let (player_id, _) = task.await.unwrap().unwrap();
        assert!(ids.insert(player_id), "ids must be unique");
    }

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.players.len(), 6, "host + 5 joins, none lost");
}

#[tokio::test]
async fn test_simultaneous_final_votes_produce_one_results_transition() {
    let mut registry = registry();
    let (handle, ids) = three_player_room(&mut registry).await;
    let host_id = ids[0].clone();

    handle
        .start(host_id.clone(), "Animals".into(), 1)
        .await
        .unwrap();
    handle.start_voting(host_id).await.unwrap();

    // All three vote at once, everyone for Ben.
    let target = ids[2].clone();
    let tasks: Vec<_> = ids
        .iter()
        .map(|id| {
            let handle = handle.clone();
            let voter = id.clone();
            let target = target.clone();
            tokio::spawn(async move { handle.submit_vote(voter, target).await })
        })
        .collect();

    let mut snapshots = Vec::new();
    for task in tasks {
        snapshots.push(task.await.unwrap().unwrap());
    }

    // The actor serializes the votes: exactly one of the replies
    // observes the voting → results transition, the rest still see
    // voting in progress.
    let results_seen = snapshots
        .iter()
        .filter(|s| s.status == Phase::Results)
        .count();
    assert_eq!(results_seen, 1);

    let final_snapshot = handle.snapshot().await.unwrap();
    assert_eq!(final_snapshot.status, Phase::Results);
    assert_eq!(final_snapshot.eliminated_player_id, Some(target));
}
