//! Per-viewer projection of a room.
//!
//! A player's cards are only ever visible to that player. Everyone else
//! sees a count.

use serde::Serialize;

use crate::domain::cards::Card;
use crate::domain::room::{PlayerId, Room, RoomPhase, Winner};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerView {
    pub player_id: PlayerId,
    pub name: String,
    pub is_host: bool,
    pub hand_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hand: Option<Vec<Card>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomView {
    pub room_id: String,
    pub phase: RoomPhase,
    pub game_started: bool,
    pub game_ended: bool,
    pub current_turn: Option<PlayerId>,
    pub turn_count: u32,
    pub lock_version: i32,
    pub viewer: Option<PlayerId>,
    pub players: Vec<PlayerView>,
    pub winner: Option<Winner>,
}

impl RoomView {
    pub fn player(&self, id: PlayerId) -> Option<&PlayerView> {
        self.players.iter().find(|p| p.player_id == id)
    }
}

/// Build the view `viewer` is allowed to see. An unknown or absent viewer
/// sees no hands at all.
pub fn room_view(room: &Room, viewer: Option<PlayerId>, lock_version: i32) -> RoomView {
    let viewer = viewer.filter(|id| room.player(*id).is_some());

    let players = room
        .players()
        .iter()
        .map(|p| PlayerView {
            player_id: p.id,
            name: p.name.clone(),
            is_host: p.is_host,
            hand_count: p.hand.len(),
            hand: (viewer == Some(p.id)).then(|| p.hand.clone()),
        })
        .collect();

    RoomView {
        room_id: room.code().to_string(),
        phase: room.phase(),
        game_started: room.is_started(),
        game_ended: room.is_ended(),
        current_turn: room.current_turn().map(|t| t as PlayerId),
        turn_count: room.turn_count(),
        lock_version,
        viewer,
        players,
        winner: room.winner().cloned(),
    }
}
