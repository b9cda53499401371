//! Conditional polling of room state.

use actix_web::http::header::{ETAG, IF_NONE_MATCH};
use actix_web::http::StatusCode;
use actix_web::test;
use colorpass::AppError;
use serde_json::{json, Value};

use crate::support::app_builder::create_test_app;
use crate::support::test_state::build_test_state;

fn etag_of(resp: &actix_web::dev::ServiceResponse) -> String {
    resp.headers()
        .get(ETAG)
        .and_then(|v| v.to_str().ok())
        .expect("ETag header")
        .to_string()
}

#[actix_web::test]
async fn unchanged_room_answers_304_until_it_changes() -> Result<(), AppError> {
    let app = create_test_app(build_test_state().await?).await;

    let req = test::TestRequest::post()
        .uri("/api/rooms")
        .set_json(json!({ "player_name": "Alice" }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let room_id = created["room_id"].as_str().expect("room_id").to_string();
    let state_uri = format!("/api/rooms/{room_id}/state");

    let resp = test::call_service(&app, test::TestRequest::get().uri(&state_uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let etag = etag_of(&resp);
    assert!(etag.starts_with(&format!("\"room-{room_id}-v")));

    let req = test::TestRequest::get()
        .uri(&state_uri)
        .insert_header((IF_NONE_MATCH, etag.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);
    assert_eq!(etag_of(&resp), etag);
    assert!(test::read_body(resp).await.is_empty());

    let req = test::TestRequest::post()
        .uri(&format!("/api/rooms/{room_id}/join"))
        .set_json(json!({ "player_name": "Bob" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&state_uri)
        .insert_header((IF_NONE_MATCH, etag.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_ne!(etag_of(&resp), etag);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["players"].as_array().map(Vec::len), Some(2));
    Ok(())
}
