//! Room membership repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::players_sea as players_adapter;
use crate::domain::room::{Player, PlayerId};
use crate::entities::room_players;
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Seated players of a room in id order, with empty hands.
pub async fn load_players<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<Vec<Player>, DomainError> {
    let rows = players_adapter::find_all_by_room(conn, room_id).await?;
    rows.into_iter().map(Player::try_from).collect()
}

pub async fn insert_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
    player: &Player,
) -> Result<(), DomainError> {
    let dto = players_adapter::PlayerCreate {
        room_id: room_id.to_string(),
        player_id: i16::from(player.id),
        name: player.name.clone(),
        is_host: player.is_host,
    };
    players_adapter::create_player(conn, dto).await?;
    Ok(())
}

impl TryFrom<room_players::Model> for Player {
    type Error = DomainError;

    fn try_from(model: room_players::Model) -> Result<Self, Self::Error> {
        let id = PlayerId::try_from(model.player_id).map_err(|_| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("Invalid player id {} in room {}", model.player_id, model.room_id),
            )
        })?;
        Ok(Self {
            id,
            name: model.name,
            is_host: model.is_host,
            hand: Vec::new(),
        })
    }
}
