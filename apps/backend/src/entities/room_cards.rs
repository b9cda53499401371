use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum CardColor {
    #[sea_orm(string_value = "red")]
    Red,
    #[sea_orm(string_value = "green")]
    Green,
    #[sea_orm(string_value = "orange")]
    Orange,
    #[sea_orm(string_value = "blue")]
    Blue,
}

/// One card of a room's deck. `hand_seq` orders cards within a hand.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "room_cards")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "room_id")]
    pub room_id: String,
    #[sea_orm(primary_key, auto_increment = false, column_name = "card_id")]
    pub card_id: String,
    #[sea_orm(column_name = "holder_id", column_type = "SmallInteger")]
    pub holder_id: i16,
    pub color: CardColor,
    #[sea_orm(column_name = "hand_seq")]
    pub hand_seq: i32,
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
