//! Room repository functions for domain layer.
//!
//! A room is stored across three tables. These functions load all of it into
//! a `domain::Room` and write the effects of one action back.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use tracing::debug;

use crate::adapters::rooms_sea as rooms_adapter;
use crate::domain::room::{PlayOutcome, Player, Room, RoomPhase, Winner};
use crate::entities::rooms::{self, RoomState};
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::repos::{hands, players};

/// A room together with its storage metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRoom {
    pub room: Room,
    pub lock_version: i32,
    pub rng_seed: Option<i64>,
    pub created_at: OffsetDateTime,
    pub started_at: Option<OffsetDateTime>,
    pub ended_at: Option<OffsetDateTime>,
}

impl From<RoomPhase> for RoomState {
    fn from(phase: RoomPhase) -> Self {
        match phase {
            RoomPhase::Lobby => RoomState::Lobby,
            RoomPhase::Playing => RoomState::Playing,
            RoomPhase::Ended => RoomState::Ended,
        }
    }
}

impl From<RoomState> for RoomPhase {
    fn from(state: RoomState) -> Self {
        match state {
            RoomState::Lobby => RoomPhase::Lobby,
            RoomState::Playing => RoomPhase::Playing,
            RoomState::Ended => RoomPhase::Ended,
        }
    }
}

fn corrupt(room_id: &str, detail: impl std::fmt::Display) -> DomainError {
    DomainError::infra(
        InfraErrorKind::DataCorruption,
        format!("Room {room_id}: {detail}"),
    )
}

/// Rebuild the domain room from its row, players and cards.
async fn assemble<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    row: rooms::Model,
) -> Result<StoredRoom, DomainError> {
    let room_id = row.room_id.as_str();
    let mut seated: Vec<Player> = players::load_players(conn, room_id).await?;

    for held in hands::load_cards(conn, room_id).await? {
        let holder = seated
            .get_mut(usize::from(held.holder_id))
            .ok_or_else(|| corrupt(room_id, format!("card held by unknown player {}", held.holder_id)))?;
        holder.hand.push(held.card);
    }

    let current_turn = row
        .current_player_index
        .map(|i| usize::try_from(i).map_err(|_| corrupt(room_id, format!("turn index {i}"))))
        .transpose()?;

    let winner = match (row.winner_id, row.winner_color) {
        (Some(id), Some(color)) => {
            let player = usize::try_from(id)
                .ok()
                .and_then(|seat| seated.get(seat))
                .ok_or_else(|| corrupt(room_id, format!("winner {id} not seated")))?;
            Some(Winner {
                player_id: player.id,
                name: player.name.clone(),
                color: color.into(),
            })
        }
        (None, None) => None,
        _ => return Err(corrupt(room_id, "partial winner record")),
    };

    let turn_count =
        u32::try_from(row.turn_count).map_err(|_| corrupt(room_id, "negative turn count"))?;

    let room = Room::restore(
        row.room_id.clone(),
        row.state.into(),
        seated,
        current_turn,
        winner,
        turn_count,
    )?;

    Ok(StoredRoom {
        room,
        lock_version: row.lock_version,
        rng_seed: row.rng_seed,
        created_at: row.created_at,
        started_at: row.started_at,
        ended_at: row.ended_at,
    })
}

pub async fn find_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<Option<StoredRoom>, DomainError> {
    match rooms_adapter::find_by_id(conn, room_id).await? {
        Some(row) => Ok(Some(assemble(conn, row).await?)),
        None => Ok(None),
    }
}

/// Load room or return `RoomNotFound`.
pub async fn require_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<StoredRoom, DomainError> {
    find_room(conn, room_id)
        .await?
        .ok_or_else(|| DomainError::room_not_found(room_id))
}

/// Load room for mutation, holding the row lock until the transaction ends.
pub async fn lock_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<StoredRoom, DomainError> {
    let row = rooms_adapter::find_by_id_for_update(conn, room_id)
        .await?
        .ok_or_else(|| DomainError::room_not_found(room_id))?;
    debug!(room_id, lock_version = row.lock_version, "Locked room row");
    assemble(conn, row).await
}

pub async fn room_exists<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<bool, DomainError> {
    Ok(rooms_adapter::exists(conn, room_id).await?)
}

/// Insert a new lobby room and its host.
pub async fn create_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room: &Room,
) -> Result<StoredRoom, DomainError> {
    let row = rooms_adapter::create_room(conn, rooms_adapter::RoomCreate::new(room.code())).await?;
    for player in room.players() {
        players::insert_player(conn, room.code(), player).await?;
    }
    Ok(StoredRoom {
        room: room.clone(),
        lock_version: row.lock_version,
        rng_seed: row.rng_seed,
        created_at: row.created_at,
        started_at: row.started_at,
        ended_at: row.ended_at,
    })
}

/// Seat the newest player of `stored.room` and bump the room version.
pub async fn save_join<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    stored: &StoredRoom,
    player: &Player,
) -> Result<i32, DomainError> {
    let code = stored.room.code();
    players::insert_player(conn, code, player).await?;
    let row =
        rooms_adapter::update_room(conn, rooms_adapter::RoomUpdate::new(code, stored.lock_version))
            .await?;
    Ok(row.lock_version)
}

/// Persist a freshly started room: dealt hands, turn, seed and timestamps.
pub async fn save_start<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    stored: &StoredRoom,
    seed: i64,
) -> Result<i32, DomainError> {
    let room = &stored.room;
    let turn = room
        .current_turn()
        .ok_or_else(|| corrupt(room.code(), "started without a turn"))?;

    hands::insert_dealt_hands(conn, room.code(), room.players()).await?;

    let now = OffsetDateTime::now_utc();
    let mut dto = rooms_adapter::RoomUpdate::new(room.code(), stored.lock_version)
        .with_state(room.phase().into())
        .with_current_player_index(turn as i16)
        .with_rng_seed(seed)
        .with_turn_count(0)
        .with_started_at(now);
    if let Some(winner) = room.winner() {
        dto = dto
            .with_winner(i16::from(winner.player_id), winner.color.into())
            .with_ended_at(now);
    }

    let row = rooms_adapter::update_room(conn, dto).await?;
    Ok(row.lock_version)
}

/// Persist one pass and the turn/winner state that followed it.
pub async fn save_play<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    stored: &StoredRoom,
    outcome: &PlayOutcome,
) -> Result<i32, DomainError> {
    let room = &stored.room;
    hands::record_pass(
        conn,
        room.code(),
        &outcome.card.id,
        outcome.from,
        outcome.to,
        room.turn_count(),
    )
    .await?;

    let mut dto = rooms_adapter::RoomUpdate::new(room.code(), stored.lock_version)
        .with_state(room.phase().into())
        .with_current_player_index(outcome.next_turn as i16)
        .with_turn_count(i32::try_from(room.turn_count()).unwrap_or(i32::MAX));
    if let Some(winner) = &outcome.winner {
        dto = dto
            .with_winner(i16::from(winner.player_id), winner.color.into())
            .with_ended_at(OffsetDateTime::now_utc());
    }

    let row = rooms_adapter::update_room(conn, dto).await?;
    Ok(row.lock_version)
}

/// Delete the room and everything in it. Returns whether a room existed.
pub async fn delete_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<bool, DomainError> {
    Ok(rooms_adapter::delete_room(conn, room_id).await?)
}
