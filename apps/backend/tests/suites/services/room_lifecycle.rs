//! Create, join, start and delete through `RoomService`.

use colorpass::db::txn::with_txn;
use colorpass::domain::room::RoomPhase;
use colorpass::entities::rooms::RoomState;
use colorpass::entities::{RoomCards, RoomPlayers, Rooms};
use colorpass::errors::ErrorCode;
use colorpass::services::rooms::RoomService;
use colorpass::AppError;
use colorpass_test_support::unique_helpers::unique_name;
use sea_orm::{EntityTrait, PaginatorTrait};

use crate::support::room_setup::{quiet_seed, seat_players, started_room, view, NAMES};
use crate::support::test_state::build_test_state;

#[tokio::test]
async fn create_room_seats_host_as_player_zero() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let created = with_txn(&state, |txn| {
        Box::pin(async move { RoomService.create_room(txn, "  Alice ").await })
    })
    .await?;

    assert_eq!(created.player_id, 0);
    assert_eq!(created.room_id.len(), 6);
    assert!(created
        .room_id
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));

    let room = view(&state, &created.room_id, Some(0)).await?;
    assert_eq!(room.phase, RoomPhase::Lobby);
    assert!(!room.game_started);
    assert_eq!(room.current_turn, None);
    assert_eq!(room.players.len(), 1);
    assert_eq!(room.players[0].name, "Alice");
    assert!(room.players[0].is_host);
    assert_eq!(room.lock_version, created.lock_version);
    Ok(())
}

#[tokio::test]
async fn blank_host_name_creates_nothing() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let err = with_txn(&state, |txn| {
        Box::pin(async move { RoomService.create_room(txn, "   ").await })
    })
    .await
    .unwrap_err();

    assert_eq!(err.code(), ErrorCode::EmptyName);
    assert_eq!(Rooms::find().count(state.db()).await?, 0);
    Ok(())
}

#[tokio::test]
async fn joins_get_dense_ids_until_the_room_is_full() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let room_id = seat_players(&state, 4).await?;

    let full = view(&state, &room_id, None).await?;
    let ids: Vec<u8> = full.players.iter().map(|p| p.player_id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);
    let names: Vec<&str> = full.players.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, NAMES.to_vec());

    let room = room_id.clone();
    let err = with_txn(&state, move |txn| {
        Box::pin(async move { RoomService.join_room(txn, &room, "Eve").await })
    })
    .await
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::RoomFull);

    assert_eq!(RoomPlayers::find().count(state.db()).await?, 4);
    let after = view(&state, &room_id, None).await?;
    assert_eq!(after.lock_version, full.lock_version);
    Ok(())
}

#[tokio::test]
async fn join_accepts_lowercase_codes() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let room_id = seat_players(&state, 1).await?;

    let lower = room_id.to_lowercase();
    let joined = with_txn(&state, move |txn| {
        Box::pin(async move { RoomService.join_room(txn, &lower, "Bob").await })
    })
    .await?;

    assert_eq!(joined.room_id, room_id);
    assert_eq!(joined.player_id, 1);
    Ok(())
}

#[tokio::test]
async fn join_unknown_room_is_not_found() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let err = with_txn(&state, |txn| {
        Box::pin(async move { RoomService.join_room(txn, "ZZZZZZ", "Bob").await })
    })
    .await
    .unwrap_err();

    assert_eq!(err.code(), ErrorCode::RoomNotFound);
    Ok(())
}

#[tokio::test]
async fn join_checks_the_name_before_the_room() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let room_id = seat_players(&state, 1).await?;

    let err = with_txn(&state, |txn| {
        Box::pin(async move { RoomService.join_room(txn, "ZZZZZZ", "   ").await })
    })
    .await
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::EmptyName);

    let long = "x".repeat(33);
    let room = room_id.clone();
    let err = with_txn(&state, move |txn| {
        Box::pin(async move { RoomService.join_room(txn, &room, &long).await })
    })
    .await
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NameTooLong);

    let after = view(&state, &room_id, None).await?;
    assert_eq!(after.players.len(), 1);
    assert_eq!(after.lock_version, 1);
    Ok(())
}

#[tokio::test]
async fn malformed_room_code_is_a_validation_error() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let err = with_txn(&state, |txn| {
        Box::pin(async move { RoomService.join_room(txn, "AB-1", "Bob").await })
    })
    .await
    .unwrap_err();

    assert_eq!(err.code(), ErrorCode::InvalidRoomCode);
    Ok(())
}

#[tokio::test]
async fn start_gates_on_host_and_player_count() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let solo = seat_players(&state, 1).await?;
    let room = solo.clone();
    let err = with_txn(&state, move |txn| {
        Box::pin(async move { RoomService.start_game(txn, &room, 0).await })
    })
    .await
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotEnoughPlayers);

    let pair = seat_players(&state, 2).await?;
    let room = pair.clone();
    let err = with_txn(&state, move |txn| {
        Box::pin(async move { RoomService.start_game(txn, &room, 1).await })
    })
    .await
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotHost);

    let room = pair.clone();
    let err = with_txn(&state, move |txn| {
        Box::pin(async move { RoomService.start_game(txn, &room, 9).await })
    })
    .await
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::PlayerNotFound);

    assert_eq!(RoomCards::find().count(state.db()).await?, 0);
    assert_eq!(view(&state, &pair, None).await?.phase, RoomPhase::Lobby);
    Ok(())
}

#[tokio::test]
async fn start_deals_four_cards_each_and_records_the_seed() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (room_id, started) = started_room(&state, 3).await?;

    assert!(started.first_turn < 3);
    assert!(started.winner.is_none());
    assert_eq!(started.rng_seed, quiet_seed(3));

    // 12 of 16 cards are in play at a three-player table.
    assert_eq!(RoomCards::find().count(state.db()).await?, 12);

    for viewer in 0..3u8 {
        let room = view(&state, &room_id, Some(viewer)).await?;
        assert_eq!(room.phase, RoomPhase::Playing);
        assert_eq!(room.current_turn, Some(started.first_turn));
        assert_eq!(room.turn_count, 0);
        for p in &room.players {
            assert_eq!(p.hand_count, 4);
            assert_eq!(p.hand.is_some(), p.player_id == viewer);
        }
    }

    let row = Rooms::find_by_id(room_id.clone())
        .one(state.db())
        .await?
        .expect("room row");
    assert_eq!(row.state, RoomState::Playing);
    assert_eq!(row.rng_seed, Some(started.rng_seed));
    assert!(row.started_at.is_some());
    assert!(row.ended_at.is_none());
    assert_eq!(row.lock_version, started.lock_version);
    Ok(())
}

#[tokio::test]
async fn second_start_never_redeals() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (room_id, _) = started_room(&state, 2).await?;
    let before = view(&state, &room_id, Some(0)).await?;

    let room = room_id.clone();
    let err = with_txn(&state, move |txn| {
        Box::pin(async move { RoomService.start_game_with_seed(txn, &room, 0, 4242).await })
    })
    .await
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::AlreadyStarted);

    assert_eq!(view(&state, &room_id, Some(0)).await?, before);
    assert_eq!(RoomCards::find().count(state.db()).await?, 8);
    Ok(())
}

#[tokio::test]
async fn join_after_start_is_rejected() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (room_id, _) = started_room(&state, 2).await?;

    let err = with_txn(&state, move |txn| {
        Box::pin(async move { RoomService.join_room(txn, &room_id, "Late").await })
    })
    .await
    .unwrap_err();

    assert_eq!(err.code(), ErrorCode::AlreadyStarted);
    assert_eq!(RoomPlayers::find().count(state.db()).await?, 2);
    Ok(())
}

#[tokio::test]
async fn same_seed_deals_the_same_hands() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let first = seat_players(&state, 2).await?;
    let second = seat_players(&state, 2).await?;

    for room_id in [first.clone(), second.clone()] {
        with_txn(&state, move |txn| {
            Box::pin(async move { RoomService.start_game_with_seed(txn, &room_id, 0, 77).await })
        })
        .await?;
    }

    let a = view(&state, &first, Some(0)).await?;
    let b = view(&state, &second, Some(0)).await?;
    assert_eq!(a.current_turn, b.current_turn);
    assert_eq!(a.players[0].hand, b.players[0].hand);
    Ok(())
}

#[tokio::test]
async fn delete_removes_everything_and_is_idempotent() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (room_id, _) = started_room(&state, 2).await?;

    let room = room_id.clone();
    let deleted = with_txn(&state, move |txn| {
        Box::pin(async move { RoomService.delete_room(txn, &room).await })
    })
    .await?;
    assert!(deleted);

    assert_eq!(Rooms::find().count(state.db()).await?, 0);
    assert_eq!(RoomPlayers::find().count(state.db()).await?, 0);
    assert_eq!(RoomCards::find().count(state.db()).await?, 0);

    let err = view(&state, &room_id, None).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::RoomNotFound);

    let again = with_txn(&state, move |txn| {
        Box::pin(async move { RoomService.delete_room(txn, &room_id).await })
    })
    .await?;
    assert!(!again);
    Ok(())
}

#[tokio::test]
async fn full_length_names_are_stored_verbatim() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let host = unique_name("host");
    let guest = unique_name("guest");

    let host_name = host.clone();
    let created = with_txn(&state, move |txn| {
        Box::pin(async move { RoomService.create_room(txn, &host_name).await })
    })
    .await?;
    let room_id = created.room_id.clone();
    let guest_name = guest.clone();
    with_txn(&state, move |txn| {
        Box::pin(async move { RoomService.join_room(txn, &room_id, &guest_name).await })
    })
    .await?;

    let room = view(&state, &created.room_id, None).await?;
    let names: Vec<&str> = room.players.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec![host.as_str(), guest.as_str()]);
    Ok(())
}
