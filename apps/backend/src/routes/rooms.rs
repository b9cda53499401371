//! Room HTTP routes.
//!
//! Thin handlers: extract, run one `RoomService` call inside a transaction,
//! shape the JSON. All rules live in the domain layer.

use actix_web::http::header::ETAG;
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::db::txn::{with_read_txn, with_txn};
use crate::domain::cards::CardId;
use crate::domain::room::{PlayerId, Winner};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::room_code::RoomCode;
use crate::extractors::validated_json::ValidatedJson;
use crate::http::etag::{if_none_match_matches, room_etag};
use crate::services::rooms::RoomService;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct PlayerNameRequest {
    pub player_name: String,
}

#[derive(Debug, Deserialize)]
pub struct StartGameRequest {
    pub player_id: PlayerId,
}

#[derive(Debug, Deserialize)]
pub struct PlayCardRequest {
    pub player_id: PlayerId,
    pub card_id: String,
}

#[derive(Debug, Deserialize)]
struct StateQuery {
    player_id: Option<PlayerId>,
}

#[derive(Debug, Serialize)]
struct SeatResponse {
    room_id: String,
    player_id: PlayerId,
}

#[derive(Debug, Serialize)]
struct WinnerResponse {
    winner: Option<Winner>,
}

/// POST /api/rooms
async fn create_room(
    app_state: web::Data<AppState>,
    body: ValidatedJson<PlayerNameRequest>,
) -> Result<HttpResponse, AppError> {
    let player_name = body.into_inner().player_name;

    let created = with_txn(&app_state, move |txn| {
        Box::pin(async move { RoomService.create_room(txn, &player_name).await })
    })
    .await?;

    Ok(HttpResponse::Created()
        .insert_header((ETAG, room_etag(&created.room_id, created.lock_version)))
        .json(SeatResponse {
            room_id: created.room_id,
            player_id: created.player_id,
        }))
}

/// POST /api/rooms/{room_id}/join
async fn join_room(
    room: RoomCode,
    app_state: web::Data<AppState>,
    body: ValidatedJson<PlayerNameRequest>,
) -> Result<HttpResponse, AppError> {
    let player_name = body.into_inner().player_name;

    let joined = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            RoomService
                .join_room(txn, room.as_str(), &player_name)
                .await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(SeatResponse {
        room_id: joined.room_id,
        player_id: joined.player_id,
    }))
}

/// POST /api/rooms/{room_id}/start
async fn start_game(
    room: RoomCode,
    app_state: web::Data<AppState>,
    body: ValidatedJson<StartGameRequest>,
) -> Result<HttpResponse, AppError> {
    let caller = body.player_id;

    with_txn(&app_state, move |txn| {
        Box::pin(async move { RoomService.start_game(txn, room.as_str(), caller).await })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/rooms/{room_id}/play
///
/// Responds with the winner when this pass ended the game.
async fn play_card(
    room: RoomCode,
    app_state: web::Data<AppState>,
    body: ValidatedJson<PlayCardRequest>,
) -> Result<HttpResponse, AppError> {
    let PlayCardRequest { player_id, card_id } = body.into_inner();
    let card_id = CardId::new(card_id);

    let played = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            RoomService
                .play_card(txn, room.as_str(), player_id, &card_id)
                .await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(WinnerResponse {
        winner: played.outcome.winner,
    }))
}

/// GET /api/rooms/{room_id}/state?player_id=N
///
/// The view is filtered for `player_id`; omit it to see counts only.
/// Supports `If-None-Match`: an unchanged room answers `304 Not Modified`.
/// The ETag is per room, so clients must not share a cache across viewers.
async fn get_state(
    http_req: HttpRequest,
    room: RoomCode,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let viewer = web::Query::<StateQuery>::from_query(http_req.query_string())
        .map_err(|e| AppError::bad_request(ErrorCode::BadRequest, format!("Invalid query: {e}")))?
        .into_inner()
        .player_id;

    let view = with_read_txn(&app_state, move |txn| {
        Box::pin(async move { RoomService.get_state(txn, room.as_str(), viewer).await })
    })
    .await?;

    let etag_value = room_etag(&view.room_id, view.lock_version);

    if if_none_match_matches(&http_req, &etag_value) {
        return Ok(HttpResponse::build(StatusCode::NOT_MODIFIED)
            .insert_header((ETAG, etag_value))
            .finish());
    }

    Ok(HttpResponse::Ok()
        .insert_header((ETAG, etag_value))
        .json(view))
}

/// GET /api/rooms/{room_id}/winner
async fn get_winner(
    room: RoomCode,
    app_state: web::Data<AppState>,
) -> Result<web::Json<WinnerResponse>, AppError> {
    let winner = with_read_txn(&app_state, move |txn| {
        Box::pin(async move { RoomService.check_winner(txn, room.as_str()).await })
    })
    .await?;

    Ok(web::Json(WinnerResponse { winner }))
}

/// DELETE /api/rooms/{room_id}
///
/// Idempotent: deleting a room that does not exist is still a 204.
async fn delete_room(
    room: RoomCode,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    with_txn(&app_state, move |txn| {
        Box::pin(async move { RoomService.delete_room(txn, room.as_str()).await })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(create_room)));
    cfg.service(web::resource("/{room_id}").route(web::delete().to(delete_room)));
    cfg.service(web::resource("/{room_id}/join").route(web::post().to(join_room)));
    cfg.service(web::resource("/{room_id}/start").route(web::post().to(start_game)));
    cfg.service(web::resource("/{room_id}/play").route(web::post().to(play_card)));
    cfg.service(web::resource("/{room_id}/state").route(web::get().to(get_state)));
    cfg.service(web::resource("/{room_id}/winner").route(web::get().to(get_winner)));
}
