//! Room coordinator - bridges the pure room rules with DB persistence.
//!
//! Each method is one client action. Mutations lock the room row, apply the
//! action to the rehydrated `Room`, and write the result back under the
//! caller's transaction; any error leaves the store untouched once the
//! transaction rolls back.

use rand::Rng;
use sea_orm::{ConnectionTrait, DatabaseTransaction};
use tracing::{debug, info};

use crate::domain::cards::CardId;
use crate::domain::dealing::seeded_rng;
use crate::domain::room::{PlayOutcome, PlayerId, Room, Winner};
use crate::domain::rules::validate_player_name;
use crate::domain::view::{room_view, RoomView};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::repos::rooms;
use crate::utils::room_code::{generate_room_code, normalize_room_code};

/// Fresh codes tried before giving up on room creation.
pub const MAX_ROOM_CODE_ATTEMPTS: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedRoom {
    pub room_id: String,
    pub player_id: PlayerId,
    pub lock_version: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedRoom {
    pub room_id: String,
    pub player_id: PlayerId,
    pub lock_version: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartedGame {
    pub first_turn: PlayerId,
    pub rng_seed: i64,
    /// Set when the deal itself produced a winner.
    pub winner: Option<Winner>,
    pub lock_version: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayedCard {
    pub outcome: PlayOutcome,
    pub lock_version: i32,
}

/// Room coordinator. Stateless; every call works against the store.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoomService;

impl RoomService {
    /// Create a room with `player_name` as host (player 0).
    pub async fn create_room(
        &self,
        txn: &DatabaseTransaction,
        player_name: &str,
    ) -> Result<CreatedRoom, AppError> {
        self.create_room_with_codes(txn, player_name, generate_room_code)
            .await
    }

    /// `create_room` with an injectable code source.
    pub async fn create_room_with_codes<G>(
        &self,
        txn: &DatabaseTransaction,
        player_name: &str,
        mut next_code: G,
    ) -> Result<CreatedRoom, AppError>
    where
        G: FnMut() -> String + Send,
    {
        let name = validate_player_name(player_name)?;

        for attempt in 1..=MAX_ROOM_CODE_ATTEMPTS {
            let code = next_code();
            if rooms::room_exists(txn, &code).await? {
                debug!(room_id = %code, attempt, "Room code collision, regenerating");
                continue;
            }

            let room = Room::new(code, &name)?;
            let stored = rooms::create_room(txn, &room).await?;
            info!(room_id = %room.code(), host = %name, "Room created");
            return Ok(CreatedRoom {
                room_id: room.code().to_string(),
                player_id: 0,
                lock_version: stored.lock_version,
            });
        }

        Err(DomainError::conflict(
            ConflictKind::RoomCodeConflict,
            format!("No free room code after {MAX_ROOM_CODE_ATTEMPTS} attempts"),
        )
        .into())
    }

    /// Seat `player_name` in an unstarted room.
    pub async fn join_room(
        &self,
        txn: &DatabaseTransaction,
        room_id: &str,
        player_name: &str,
    ) -> Result<JoinedRoom, AppError> {
        let room_id = normalize_room_code(room_id)?;
        let name = validate_player_name(player_name)?;
        debug!(room_id = %room_id, "Joining room");

        let mut stored = rooms::lock_room(txn, &room_id).await?;
        let player_id = stored.room.add_player(&name)?;
        let player = stored
            .room
            .player(player_id)
            .cloned()
            .ok_or_else(|| DomainError::room_not_found(&room_id))?;
        let lock_version = rooms::save_join(txn, &stored, &player).await?;

        info!(room_id = %room_id, player_id, name = %player.name, "Player joined");
        Ok(JoinedRoom {
            room_id,
            player_id,
            lock_version,
        })
    }

    /// Host starts the game with a fresh random seed.
    pub async fn start_game(
        &self,
        txn: &DatabaseTransaction,
        room_id: &str,
        caller: PlayerId,
    ) -> Result<StartedGame, AppError> {
        let seed: i64 = rand::rng().random();
        self.start_game_with_seed(txn, room_id, caller, seed).await
    }

    /// Host starts the game; the deal and first turn derive from `seed`.
    pub async fn start_game_with_seed(
        &self,
        txn: &DatabaseTransaction,
        room_id: &str,
        caller: PlayerId,
        seed: i64,
    ) -> Result<StartedGame, AppError> {
        let room_id = normalize_room_code(room_id)?;
        debug!(room_id = %room_id, caller, "Starting game");

        let mut stored = rooms::lock_room(txn, &room_id).await?;
        // Sign is irrelevant to the RNG; keep the bit pattern.
        let mut rng = seeded_rng(seed as u64);
        stored.room.start(caller, &mut rng)?;
        let lock_version = rooms::save_start(txn, &stored, seed).await?;

        let first_turn = stored.room.current_turn().unwrap_or_default() as PlayerId;
        let winner = stored.room.winner().cloned();
        info!(
            room_id = %room_id,
            players = stored.room.players().len(),
            first_turn,
            ended_on_deal = winner.is_some(),
            "Game started"
        );
        Ok(StartedGame {
            first_turn,
            rng_seed: seed,
            winner,
            lock_version,
        })
    }

    /// `caller` passes `card_id` to the next seat.
    pub async fn play_card(
        &self,
        txn: &DatabaseTransaction,
        room_id: &str,
        caller: PlayerId,
        card_id: &CardId,
    ) -> Result<PlayedCard, AppError> {
        let room_id = normalize_room_code(room_id)?;
        debug!(room_id = %room_id, caller, card_id = %card_id, "Playing card");

        let mut stored = rooms::lock_room(txn, &room_id).await?;
        let outcome = stored.room.play_card(caller, card_id)?;
        let lock_version = rooms::save_play(txn, &stored, &outcome).await?;

        info!(
            room_id = %room_id,
            from = outcome.from,
            to = outcome.to,
            next_turn = outcome.next_turn,
            turn_count = stored.room.turn_count(),
            "Card passed"
        );
        if let Some(winner) = &outcome.winner {
            info!(
                room_id = %room_id,
                winner = winner.player_id,
                color = %winner.color,
                "Game won"
            );
        }
        Ok(PlayedCard {
            outcome,
            lock_version,
        })
    }

    /// Snapshot of the room as `viewer` may see it.
    pub async fn get_state<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        room_id: &str,
        viewer: Option<PlayerId>,
    ) -> Result<RoomView, AppError> {
        let room_id = normalize_room_code(room_id)?;
        let stored = rooms::require_room(conn, &room_id).await?;
        Ok(room_view(&stored.room, viewer, stored.lock_version))
    }

    /// Winner of the room, if the game has ended. Never writes.
    pub async fn check_winner<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        room_id: &str,
    ) -> Result<Option<Winner>, AppError> {
        let room_id = normalize_room_code(room_id)?;
        let mut stored = rooms::require_room(conn, &room_id).await?;
        Ok(stored.room.check_winner().cloned())
    }

    /// Remove the room and everything in it. Deleting a missing room succeeds.
    pub async fn delete_room(
        &self,
        txn: &DatabaseTransaction,
        room_id: &str,
    ) -> Result<bool, AppError> {
        let room_id = normalize_room_code(room_id)?;
        let deleted = rooms::delete_room(txn, &room_id).await?;
        if deleted {
            info!(room_id = %room_id, "Room deleted");
        } else {
            debug!(room_id = %room_id, "Delete of missing room ignored");
        }
        Ok(deleted)
    }
}
