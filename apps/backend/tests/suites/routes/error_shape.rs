//! Failures render as ProblemDetails with matching trace ids.

use actix_web::http::StatusCode;
use actix_web::test;
use colorpass::AppError;
use colorpass_test_support::problem_details::assert_problem_details_from_service_response;
use serde_json::{json, Value};

use crate::support::app_builder::create_test_app;
use crate::support::test_state::build_test_state;

#[actix_web::test]
async fn unknown_room_is_404() -> Result<(), AppError> {
    let app = create_test_app(build_test_state().await?).await;

    let req = test::TestRequest::post()
        .uri("/api/rooms/ZZZZZZ/join")
        .set_json(json!({ "player_name": "Bob" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "ROOM_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some("ZZZZZZ"),
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn malformed_room_code_is_400() -> Result<(), AppError> {
    let app = create_test_app(build_test_state().await?).await;

    let req = test::TestRequest::get()
        .uri("/api/rooms/NOPE/state")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_ROOM_CODE",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn broken_json_and_blank_names_are_400() -> Result<(), AppError> {
    let app = create_test_app(build_test_state().await?).await;

    let req = test::TestRequest::post()
        .uri("/api/rooms")
        .insert_header(("content-type", "application/json"))
        .set_payload(r#"{"player_name": "#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        Some("Invalid JSON"),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/rooms")
        .set_json(json!({ "player_name": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "EMPTY_NAME",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn state_conflicts_are_409() -> Result<(), AppError> {
    let app = create_test_app(build_test_state().await?).await;

    let req = test::TestRequest::post()
        .uri("/api/rooms")
        .set_json(json!({ "player_name": "Alice" }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let room_id = created["room_id"].as_str().expect("room_id").to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/rooms/{room_id}/start"))
        .set_json(json!({ "player_id": 0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "NOT_ENOUGH_PLAYERS",
        StatusCode::CONFLICT,
        None,
    )
    .await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/rooms/{room_id}/join"))
        .set_json(json!({ "player_name": "Bob" }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/rooms/{room_id}/start"))
        .set_json(json!({ "player_id": 1 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(resp, "NOT_HOST", StatusCode::CONFLICT, None)
        .await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/rooms/{room_id}/play"))
        .set_json(json!({ "player_id": 0, "card_id": "whatever" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(resp, "NOT_STARTED", StatusCode::CONFLICT, None)
        .await;
    Ok(())
}

#[actix_web::test]
async fn bad_viewer_query_is_400() -> Result<(), AppError> {
    let app = create_test_app(build_test_state().await?).await;

    let req = test::TestRequest::post()
        .uri("/api/rooms")
        .set_json(json!({ "player_name": "Alice" }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let room_id = created["room_id"].as_str().expect("room_id").to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/api/rooms/{room_id}/state?player_id=abc"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;
    Ok(())
}
