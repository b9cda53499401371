//! Table constants and small rule helpers.

use crate::errors::domain::{DomainError, ValidationKind};

/// Seats at a table.
pub const MAX_PLAYERS: usize = 4;

/// Players required before the host may start.
pub const MIN_PLAYERS_TO_START: usize = 2;

/// Copies of each color in a fresh deck.
pub const CARDS_PER_COLOR: usize = 4;

/// Cards in a fresh deck, one run of `CARDS_PER_COLOR` per color.
pub const DECK_SIZE: usize = CARDS_PER_COLOR * 4;

/// Cards dealt to every seated player.
pub const CARDS_PER_PLAYER: usize = 4;

/// Same-colored cards needed in one hand to win.
pub const WINNING_COUNT: usize = 4;

/// Room codes are this many characters of `[A-Z0-9]`.
pub const ROOM_CODE_LEN: usize = 6;

/// Longest accepted player name, in characters, after trimming.
pub const MAX_NAME_LEN: usize = 32;

/// Seat that receives a pass from `seat` at a table of `player_count`.
pub fn next_seat(seat: usize, player_count: usize) -> usize {
    debug_assert!(player_count > 0);
    (seat + 1) % player_count
}

/// Trim and check a display name. Returns the trimmed name.
pub fn validate_player_name(raw: &str) -> Result<String, DomainError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::EmptyName,
            "Player name must not be empty",
        ));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::validation(
            ValidationKind::NameTooLong,
            format!("Player name must be at most {MAX_NAME_LEN} characters"),
        ));
    }
    Ok(name.to_string())
}
