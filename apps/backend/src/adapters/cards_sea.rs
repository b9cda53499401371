//! SeaORM adapter for card ownership rows.

use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::entities::room_cards::{self, CardColor};

#[derive(Debug, Clone)]
pub struct CardCreate {
    pub card_id: String,
    pub holder_id: i16,
    pub color: CardColor,
    pub hand_seq: i32,
}

/// Every card in a room, grouped by holder and in hand order.
pub async fn find_all_by_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<Vec<room_cards::Model>, sea_orm::DbErr> {
    room_cards::Entity::find()
        .filter(room_cards::Column::RoomId.eq(room_id))
        .order_by_asc(room_cards::Column::HolderId)
        .order_by_asc(room_cards::Column::HandSeq)
        .all(conn)
        .await
}

/// Insert a dealt deck in one statement.
pub async fn insert_cards<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
    cards: Vec<CardCreate>,
) -> Result<(), sea_orm::DbErr> {
    if cards.is_empty() {
        return Ok(());
    }
    let models = cards.into_iter().map(|c| room_cards::ActiveModel {
        room_id: Set(room_id.to_string()),
        card_id: Set(c.card_id),
        holder_id: Set(c.holder_id),
        color: Set(c.color),
        hand_seq: Set(c.hand_seq),
    });

    room_cards::Entity::insert_many(models)
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

/// Reassign a card to `to_holder`, placing it at `hand_seq`.
///
/// The update is guarded on the current holder so a stale caller cannot move
/// a card it no longer owns.
pub async fn move_card<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
    card_id: &str,
    from_holder: i16,
    to_holder: i16,
    hand_seq: i32,
) -> Result<(), sea_orm::DbErr> {
    let result = room_cards::Entity::update_many()
        .col_expr(room_cards::Column::HolderId, Expr::value(to_holder))
        .col_expr(room_cards::Column::HandSeq, Expr::value(hand_seq))
        .filter(room_cards::Column::RoomId.eq(room_id))
        .filter(room_cards::Column::CardId.eq(card_id))
        .filter(room_cards::Column::HolderId.eq(from_holder))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(sea_orm::DbErr::RecordNotFound(format!(
            "Card {card_id} not held by player {from_holder} in room {room_id}"
        )));
    }
    Ok(())
}
