use std::env;

use actix_cors::Cors;
use actix_web::http::header;

use crate::middleware::request_trace::TRACE_ID_HEADER;

/// Build CORS middleware with a restrictive, explicit configuration:
/// - Origins come from CORS_ALLOWED_ORIGINS
/// - Only allow methods actually used by the API
/// - Lightly validate origins, and ignore empty / \"null\" entries
pub fn cors_middleware() -> Cors {
    // Comma-separated origins, e.g.:
    // CORS_ALLOWED_ORIGINS=http://localhost:3000,https://play.colorpass.app
    let allowed_raw = env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default();
    let effective_origins = parse_allowed_origins(&allowed_raw);

    let mut cors = Cors::default()
        // Methods actually used by the API
        .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
        // Headers the browser may send
        .allowed_headers(vec![
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::IF_NONE_MATCH,
        ])
        // Headers the browser is allowed to read from responses
        .expose_headers(vec![
            header::HeaderName::from_static(TRACE_ID_HEADER),
            header::ETAG,
        ])
        .max_age(3600);

    // Add each validated origin explicitly
    for origin in effective_origins {
        cors = cors.allowed_origin(&origin);
    }

    cors
}

/// Valid origins from a comma-separated list; localhost-only when none survive.
fn parse_allowed_origins(raw: &str) -> Vec<String> {
    let allowed: Vec<String> = raw
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(|s| s.to_string())
        .collect();

    if allowed.is_empty() {
        vec![
            "http://localhost:3000".to_string(),
            "http://127.0.0.1:3000".to_string(),
        ]
    } else {
        allowed
    }
}
