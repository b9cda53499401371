use actix_web::http::StatusCode;
use actix_web::test;
use colorpass::AppError;
use serde_json::Value;

use crate::support::app_builder::create_test_app;
use crate::support::test_state::build_test_state;

#[actix_web::test]
async fn health_reports_db_and_latest_migration() -> Result<(), AppError> {
    let app = create_test_app(build_test_state().await?).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-trace-id"));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert_eq!(body["migrations"], "m20250901_000001_rooms");
    assert!(body.get("db_error").is_none());
    Ok(())
}
