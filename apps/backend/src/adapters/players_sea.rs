//! SeaORM adapter for room membership rows.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::room_players;

#[derive(Debug, Clone)]
pub struct PlayerCreate {
    pub room_id: String,
    pub player_id: i16,
    pub name: String,
    pub is_host: bool,
}

/// All players of a room, ordered by player id.
pub async fn find_all_by_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<Vec<room_players::Model>, sea_orm::DbErr> {
    room_players::Entity::find()
        .filter(room_players::Column::RoomId.eq(room_id))
        .order_by_asc(room_players::Column::PlayerId)
        .all(conn)
        .await
}

pub async fn create_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PlayerCreate,
) -> Result<room_players::Model, sea_orm::DbErr> {
    let player = room_players::ActiveModel {
        room_id: Set(dto.room_id),
        player_id: Set(dto.player_id),
        name: Set(dto.name),
        is_host: Set(dto.is_host),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };

    player.insert(conn).await
}
