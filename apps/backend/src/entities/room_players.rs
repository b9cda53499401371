use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "room_players")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "room_id")]
    pub room_id: String,
    #[sea_orm(
        primary_key,
        auto_increment = false,
        column_name = "player_id",
        column_type = "SmallInteger"
    )]
    pub player_id: i16,
    pub name: String,
    #[sea_orm(column_name = "is_host")]
    pub is_host: bool,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::rooms::Entity",
        from = "Column::RoomId",
        to = "super::rooms::Column::RoomId",
        on_delete = "Cascade"
    )]
    Room,
}

impl Related<super::rooms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
