//! Error codes for the colorpass API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Player name empty after trimming
    EmptyName,
    /// Player name longer than the limit
    NameTooLong,
    /// Room code not 6 characters of [A-Z0-9]
    InvalidRoomCode,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    RoomNotFound,
    PlayerNotFound,
    CardNotFound,
    /// General not found error
    NotFound,

    // Room State Conflicts
    NotYourTurn,
    NotStarted,
    AlreadyStarted,
    RoomFull,
    NotEnoughPlayers,
    GameEnded,
    NotHost,
    /// Room was modified concurrently
    OptimisticLock,
    /// Could not allocate a free room code
    RoomCodeConflict,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    DbError,
    DbUnavailable,
    DbTimeout,
    DataCorruption,
    Internal,
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyName => "EMPTY_NAME",
            Self::NameTooLong => "NAME_TOO_LONG",
            Self::InvalidRoomCode => "INVALID_ROOM_CODE",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::RoomNotFound => "ROOM_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::CardNotFound => "CARD_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::NotYourTurn => "NOT_YOUR_TURN",
            Self::NotStarted => "NOT_STARTED",
            Self::AlreadyStarted => "ALREADY_STARTED",
            Self::RoomFull => "ROOM_FULL",
            Self::NotEnoughPlayers => "NOT_ENOUGH_PLAYERS",
            Self::GameEnded => "GAME_ENDED",
            Self::NotHost => "NOT_HOST",
            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::RoomCodeConflict => "ROOM_CODE_CONFLICT",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }

    /// Every code, for uniqueness checks.
    pub const ALL: &'static [ErrorCode] = &[
        Self::EmptyName,
        Self::NameTooLong,
        Self::InvalidRoomCode,
        Self::ValidationError,
        Self::BadRequest,
        Self::RoomNotFound,
        Self::PlayerNotFound,
        Self::CardNotFound,
        Self::NotFound,
        Self::NotYourTurn,
        Self::NotStarted,
        Self::AlreadyStarted,
        Self::RoomFull,
        Self::NotEnoughPlayers,
        Self::GameEnded,
        Self::NotHost,
        Self::OptimisticLock,
        Self::RoomCodeConflict,
        Self::Conflict,
        Self::DbError,
        Self::DbUnavailable,
        Self::DbTimeout,
        Self::DataCorruption,
        Self::Internal,
        Self::ConfigError,
    ];
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
