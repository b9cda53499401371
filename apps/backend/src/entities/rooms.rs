use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::room_cards::CardColor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum RoomState {
    #[sea_orm(string_value = "LOBBY")]
    Lobby,
    #[sea_orm(string_value = "PLAYING")]
    Playing,
    #[sea_orm(string_value = "ENDED")]
    Ended,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rooms")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "room_id")]
    pub room_id: String,
    pub state: RoomState,
    #[sea_orm(column_name = "current_player_index", column_type = "SmallInteger")]
    pub current_player_index: Option<i16>,
    #[sea_orm(column_name = "winner_id", column_type = "SmallInteger")]
    pub winner_id: Option<i16>,
    #[sea_orm(column_name = "winner_color")]
    pub winner_color: Option<CardColor>,
    #[sea_orm(column_name = "rng_seed")]
    pub rng_seed: Option<i64>,
    #[sea_orm(column_name = "turn_count")]
    pub turn_count: i32,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
    #[sea_orm(column_name = "started_at")]
    pub started_at: Option<OffsetDateTime>,
    #[sea_orm(column_name = "ended_at")]
    pub ended_at: Option<OffsetDateTime>,
    #[sea_orm(column_name = "lock_version")]
    pub lock_version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::room_players::Entity")]
    RoomPlayers,
    #[sea_orm(has_many = "super::room_cards::Entity")]
    RoomCards,
}

impl Related<super::room_players::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoomPlayers.def()
    }
}

impl Related<super::room_cards::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoomCards.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
