//! Room code generation and normalization.
//!
//! Room codes are 6-character strings of `[A-Z0-9]`. Codes typed by users
//! are trimmed and uppercased before lookup.

use rand::Rng;

use crate::domain::rules::ROOM_CODE_LEN;
use crate::errors::domain::{DomainError, ValidationKind};

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a random room code using the thread-local RNG.
///
/// Uniqueness is not guaranteed here; callers check the store and retry.
///
/// # Example
/// ```
/// use colorpass::utils::room_code::generate_room_code;
///
/// let code = generate_room_code();
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
/// ```
pub fn generate_room_code() -> String {
    generate_room_code_with(&mut rand::rng())
}

pub fn generate_room_code_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..ROOM_CODE_LEN)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Trim and uppercase a user-supplied code, then check its shape.
pub fn normalize_room_code(raw: &str) -> Result<String, DomainError> {
    let code = raw.trim().to_ascii_uppercase();
    let valid = code.len() == ROOM_CODE_LEN
        && code
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit());
    if !valid {
        return Err(DomainError::validation(
            ValidationKind::InvalidRoomCode,
            format!("'{}' is not a valid room code", raw.trim()),
        ));
    }
    Ok(code)
}
