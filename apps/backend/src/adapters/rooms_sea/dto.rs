//! DTOs for rooms_sea adapter.

use time::OffsetDateTime;

use crate::entities::room_cards::CardColor;
use crate::entities::rooms::RoomState;

/// DTO for creating a new room in the lobby state.
#[derive(Debug, Clone)]
pub struct RoomCreate {
    pub room_id: String,
}

impl RoomCreate {
    pub fn new(room_id: impl Into<String>) -> Self {
        Self {
            room_id: room_id.into(),
        }
    }
}

/// Unified DTO for updating room fields with optimistic locking.
///
/// Any combination of fields may be set; all land in one statement with a
/// single `lock_version` bump. `expected_version` must match the stored
/// version or the update fails.
#[derive(Debug, Clone)]
pub struct RoomUpdate {
    pub room_id: String,
    pub expected_version: i32,
    pub state: Option<RoomState>,
    pub current_player_index: Option<i16>,
    pub winner: Option<(i16, CardColor)>,
    pub rng_seed: Option<i64>,
    pub turn_count: Option<i32>,
    pub started_at: Option<OffsetDateTime>,
    pub ended_at: Option<OffsetDateTime>,
}

impl RoomUpdate {
    pub fn new(room_id: impl Into<String>, expected_version: i32) -> Self {
        Self {
            room_id: room_id.into(),
            expected_version,
            state: None,
            current_player_index: None,
            winner: None,
            rng_seed: None,
            turn_count: None,
            started_at: None,
            ended_at: None,
        }
    }

    pub fn with_state(mut self, state: RoomState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn with_current_player_index(mut self, index: i16) -> Self {
        self.current_player_index = Some(index);
        self
    }

    pub fn with_winner(mut self, player_id: i16, color: CardColor) -> Self {
        self.winner = Some((player_id, color));
        self
    }

    pub fn with_rng_seed(mut self, seed: i64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_turn_count(mut self, turn_count: i32) -> Self {
        self.turn_count = Some(turn_count);
        self
    }

    pub fn with_started_at(mut self, at: OffsetDateTime) -> Self {
        self.started_at = Some(at);
        self
    }

    pub fn with_ended_at(mut self, at: OffsetDateTime) -> Self {
        self.ended_at = Some(at);
        self
    }
}
