//! SeaORM adapter for rooms - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QuerySelect, Set,
};

use crate::entities::{room_cards, room_players, rooms};

pub mod dto;

pub use dto::{RoomCreate, RoomUpdate};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

fn room_not_found(room_id: &str) -> sea_orm::DbErr {
    sea_orm::DbErr::RecordNotFound(format!("Room {room_id} not found"))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<Option<rooms::Model>, sea_orm::DbErr> {
    rooms::Entity::find_by_id(room_id.to_string()).one(conn).await
}

/// Fetch the room row with `SELECT ... FOR UPDATE`.
///
/// SQLite has no row locks and the clause is dropped there; the
/// `lock_version` check in `update_room` still catches lost updates.
pub async fn find_by_id_for_update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<Option<rooms::Model>, sea_orm::DbErr> {
    rooms::Entity::find_by_id(room_id.to_string())
        .lock_exclusive()
        .one(conn)
        .await
}

pub async fn exists<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<bool, sea_orm::DbErr> {
    let count = rooms::Entity::find()
        .filter(rooms::Column::RoomId.eq(room_id))
        .count(conn)
        .await?;
    Ok(count > 0)
}

pub async fn create_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoomCreate,
) -> Result<rooms::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let room = rooms::ActiveModel {
        room_id: Set(dto.room_id),
        state: Set(rooms::RoomState::Lobby),
        current_player_index: Set(None),
        winner_id: Set(None),
        winner_color: Set(None),
        rng_seed: Set(None),
        turn_count: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
        started_at: Set(None),
        ended_at: Set(None),
        lock_version: Set(1),
    };

    room.insert(conn).await
}

/// Apply `dto` if the stored `lock_version` still equals `expected_version`,
/// bump the version, and return the fresh row.
///
/// A version mismatch surfaces as `DbErr::Custom("OPTIMISTIC_LOCK:{..}")`,
/// a missing row as `DbErr::RecordNotFound`.
pub async fn update_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoomUpdate,
) -> Result<rooms::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();

    let mut changes = rooms::ActiveModel {
        room_id: NotSet,
        state: NotSet,
        current_player_index: NotSet,
        winner_id: NotSet,
        winner_color: NotSet,
        rng_seed: NotSet,
        turn_count: NotSet,
        created_at: NotSet,
        updated_at: Set(now),
        started_at: NotSet,
        ended_at: NotSet,
        lock_version: NotSet,
    };
    if let Some(state) = dto.state {
        changes.state = Set(state);
    }
    if let Some(index) = dto.current_player_index {
        changes.current_player_index = Set(Some(index));
    }
    if let Some((player_id, color)) = dto.winner {
        changes.winner_id = Set(Some(player_id));
        changes.winner_color = Set(Some(color));
    }
    if let Some(seed) = dto.rng_seed {
        changes.rng_seed = Set(Some(seed));
    }
    if let Some(turn_count) = dto.turn_count {
        changes.turn_count = Set(turn_count);
    }
    if let Some(at) = dto.started_at {
        changes.started_at = Set(Some(at));
    }
    if let Some(at) = dto.ended_at {
        changes.ended_at = Set(Some(at));
    }

    let result = rooms::Entity::update_many()
        .set(changes)
        .col_expr(
            rooms::Column::LockVersion,
            Expr::col(rooms::Column::LockVersion).add(1),
        )
        .filter(rooms::Column::RoomId.eq(dto.room_id.as_str()))
        .filter(rooms::Column::LockVersion.eq(dto.expected_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        // Either the room is gone or somebody else bumped the version first
        return match find_by_id(conn, &dto.room_id).await? {
            Some(room) => Err(sea_orm::DbErr::Custom(format!(
                "OPTIMISTIC_LOCK:{{\"expected\":{},\"actual\":{}}}",
                dto.expected_version, room.lock_version
            ))),
            None => Err(room_not_found(&dto.room_id)),
        };
    }

    find_by_id(conn, &dto.room_id)
        .await?
        .ok_or_else(|| room_not_found(&dto.room_id))
}

/// Remove a room with its players and cards. Returns whether a room row
/// was deleted; deleting a missing room is not an error.
pub async fn delete_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<bool, sea_orm::DbErr> {
    room_cards::Entity::delete_many()
        .filter(room_cards::Column::RoomId.eq(room_id))
        .exec(conn)
        .await?;
    room_players::Entity::delete_many()
        .filter(room_players::Column::RoomId.eq(room_id))
        .exec(conn)
        .await?;
    let result = rooms::Entity::delete_many()
        .filter(rooms::Column::RoomId.eq(room_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected > 0)
}
