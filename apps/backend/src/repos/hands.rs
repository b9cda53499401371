//! Card ownership repository functions (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;

use crate::adapters::cards_sea as cards_adapter;
use crate::domain::cards::{Card, CardId, Color};
use crate::domain::room::{Player, PlayerId};
use crate::domain::rules::{CARDS_PER_PLAYER, DECK_SIZE};
use crate::entities::room_cards::{self, CardColor};
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Sequence numbers below this are dealt positions; passes append above it.
pub const PASS_SEQ_BASE: i32 = DECK_SIZE as i32;

/// A stored card with its holder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeldCard {
    pub holder_id: PlayerId,
    pub card: Card,
    pub hand_seq: i32,
}

/// Every card in the room, grouped by holder in hand order.
pub async fn load_cards<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<Vec<HeldCard>, DomainError> {
    let rows = cards_adapter::find_all_by_room(conn, room_id).await?;
    rows.into_iter().map(HeldCard::try_from).collect()
}

/// Persist freshly dealt hands. Position in hand becomes `hand_seq`.
pub async fn insert_dealt_hands<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
    players: &[Player],
) -> Result<(), DomainError> {
    let mut cards = Vec::with_capacity(players.len() * CARDS_PER_PLAYER);
    for player in players {
        for (seq, card) in player.hand.iter().enumerate() {
            cards.push(cards_adapter::CardCreate {
                card_id: card.id.as_str().to_string(),
                holder_id: i16::from(player.id),
                color: card.color.into(),
                hand_seq: seq as i32,
            });
        }
    }
    cards_adapter::insert_cards(conn, room_id, cards).await?;
    Ok(())
}

/// Move one card between hands. `turn_count` is the count after the pass,
/// which keeps the received card last in the new holder's hand.
pub async fn record_pass<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
    card_id: &CardId,
    from: PlayerId,
    to: PlayerId,
    turn_count: u32,
) -> Result<(), DomainError> {
    let hand_seq = PASS_SEQ_BASE.saturating_add(i32::try_from(turn_count).unwrap_or(i32::MAX));
    cards_adapter::move_card(
        conn,
        room_id,
        card_id.as_str(),
        i16::from(from),
        i16::from(to),
        hand_seq,
    )
    .await?;
    Ok(())
}

// Conversions between SeaORM models and domain models

impl From<Color> for CardColor {
    fn from(color: Color) -> Self {
        match color {
            Color::Red => CardColor::Red,
            Color::Green => CardColor::Green,
            Color::Orange => CardColor::Orange,
            Color::Blue => CardColor::Blue,
        }
    }
}

impl From<CardColor> for Color {
    fn from(color: CardColor) -> Self {
        match color {
            CardColor::Red => Color::Red,
            CardColor::Green => Color::Green,
            CardColor::Orange => Color::Orange,
            CardColor::Blue => Color::Blue,
        }
    }
}

impl TryFrom<room_cards::Model> for HeldCard {
    type Error = DomainError;

    fn try_from(model: room_cards::Model) -> Result<Self, Self::Error> {
        let holder_id = PlayerId::try_from(model.holder_id).map_err(|_| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("Card {} has invalid holder {}", model.card_id, model.holder_id),
            )
        })?;
        Ok(Self {
            holder_id,
            card: Card::new(CardId::new(model.card_id), model.color.into()),
            hand_seq: model.hand_seq,
        })
    }
}
