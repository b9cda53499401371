use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};
use tracing::Span;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::utils::room_code::normalize_room_code;

/// Room code taken from the `{room_id}` path segment, trimmed and uppercased.
///
/// Only the format is checked here; whether the room exists is the service's
/// call, so a well-formed unknown code still reaches the handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomCode(pub String);

impl RoomCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequest for RoomCode {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = match req.match_info().get("room_id") {
            Some(raw) => normalize_room_code(raw).map_err(AppError::from).map(|code| {
                Span::current().record("room_id", code.as_str());
                let room = RoomCode(code);
                // Read back by the request logger once the response is built.
                req.extensions_mut().insert(room.clone());
                room
            }),
            None => Err(AppError::bad_request(
                ErrorCode::InvalidRoomCode,
                "Missing room_id parameter",
            )),
        };
        ready(result)
    }
}
