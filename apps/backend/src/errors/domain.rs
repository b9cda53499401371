//! Domain-level error type used across services and repos.
//!
//! This error type is HTTP- and DB-agnostic. Handlers return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! through `From<DomainError> for AppError`.

use thiserror::Error;

/// Input rejected before touching any state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    EmptyName,
    NameTooLong,
    InvalidRoomCode,
    Other(String),
}

/// Request is well-formed but the room's current state forbids it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    NotYourTurn,
    NotStarted,
    AlreadyStarted,
    RoomFull,
    NotEnoughPlayers,
    GameEnded,
    NotHost,
    OptimisticLock,
    RoomCodeConflict,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Room,
    Player,
    Card,
    Other(String),
}

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    DataCorruption,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("validation error {0:?}: {1}")]
    Validation(ValidationKind, String),
    #[error("conflict {0:?}: {1}")]
    Conflict(ConflictKind, String),
    #[error("not found {0:?}: {1}")]
    NotFound(NotFoundKind, String),
    #[error("infra {0:?}: {1}")]
    Infra(InfraErrorKind, String),
}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    pub fn room_not_found(room_id: &str) -> Self {
        Self::not_found(NotFoundKind::Room, format!("Room {room_id} not found"))
    }

    /// Conflict kind, if this is a state conflict.
    pub fn conflict_kind(&self) -> Option<&ConflictKind> {
        match self {
            Self::Conflict(kind, _) => Some(kind),
            _ => None,
        }
    }

    /// Not-found kind, if this is a missing resource.
    pub fn not_found_kind(&self) -> Option<&NotFoundKind> {
        match self {
            Self::NotFound(kind, _) => Some(kind),
            _ => None,
        }
    }
}
