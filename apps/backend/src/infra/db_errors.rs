//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; repos convert here, and higher layers
//! map `DomainError` to `AppError` via `From`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Extract `table.column` from SQLite "UNIQUE constraint failed: table.column" messages.
fn extract_sqlite_table_column(error_msg: &str) -> Option<&str> {
    let prefix = "UNIQUE constraint failed: ";
    let start = error_msg.find(prefix)? + prefix.len();
    error_msg[start..]
        .split_whitespace()
        .next()
        .map(|s| s.trim_end_matches([',', '"']))
}

/// Unique violations that mean something to callers.
fn map_unique_violation(error_msg: &str) -> Option<(ConflictKind, &'static str)> {
    let room_code_taken = (ConflictKind::RoomCodeConflict, "Room code already in use");
    let seat_taken = (
        ConflictKind::OptimisticLock,
        "Seat was taken by a concurrent join; please retry",
    );

    match extract_sqlite_table_column(error_msg) {
        Some("rooms.room_id") => return Some(room_code_taken),
        Some("room_players.room_id") => return Some(seat_taken),
        _ => {}
    }
    if error_msg.contains("rooms_pkey") {
        return Some(room_code_taken);
    }
    if error_msg.contains("room_players_pkey") {
        return Some(seat_taken);
    }
    None
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(msg) => {
            if msg.starts_with("Room ") {
                return DomainError::not_found(NotFoundKind::Room, msg.clone());
            }
            return DomainError::not_found(NotFoundKind::Other("Record".into()), msg.clone());
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with("OPTIMISTIC_LOCK:") => {
            if let Some(json_str) = msg.strip_prefix("OPTIMISTIC_LOCK:") {
                #[derive(serde::Deserialize)]
                struct LockInfo {
                    expected: i32,
                    actual: i32,
                }

                if let Ok(info) = serde_json::from_str::<LockInfo>(json_str) {
                    warn!(
                        trace_id = %trace_id,
                        expected = info.expected,
                        actual = info.actual,
                        "Optimistic lock conflict detected"
                    );

                    return DomainError::conflict(
                        ConflictKind::OptimisticLock,
                        format!(
                            "Room was modified concurrently (expected version {}, actual version {}). Please refresh and retry.",
                            info.expected, info.actual
                        ),
                    );
                }
            }

            warn!(trace_id = %trace_id, "Optimistic lock conflict detected (version info unavailable)");
            return DomainError::conflict(
                ConflictKind::OptimisticLock,
                "Room was modified by another request; please retry",
            );
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Unique constraint violation");
        if let Some((kind, detail)) = map_unique_violation(&error_msg) {
            return DomainError::conflict(kind, detail);
        }
        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    // 40001 serialization_failure, 40P01 deadlock_detected, 55P03 lock_not_available
    if mentions_sqlstate(&error_msg, "40001")
        || mentions_sqlstate(&error_msg, "40P01")
        || mentions_sqlstate(&error_msg, "55P03")
        || error_msg.contains("database is locked")
    {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Lock contention");
        return DomainError::conflict(
            ConflictKind::OptimisticLock,
            "Room is busy with another request; please retry",
        );
    }

    if error_msg.contains("timeout")
        || error_msg.contains("canceling statement")
        || error_msg.contains("pool")
    {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Database timeout or pool issue");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        map_db_err(e)
    }
}
