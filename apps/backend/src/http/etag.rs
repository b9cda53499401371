//! ETag helpers for room state polling.
//!
//! A room's ETag is derived from its `lock_version`, which every mutation
//! bumps, so an unchanged tag means an unchanged room.

use actix_web::http::header::IF_NONE_MATCH;
use actix_web::HttpRequest;

/// Generate an ETag for a room.
///
/// Format: `"room-{code}-v{version}"` (with quotes, as required by HTTP spec)
///
/// # Example
/// ```
/// # use colorpass::http::etag::room_etag;
/// assert_eq!(room_etag("AB12CD", 5), r#""room-AB12CD-v5""#);
/// ```
pub fn room_etag(room_id: &str, version: i32) -> String {
    format!(r#""room-{room_id}-v{version}""#)
}

/// Whether the request's `If-None-Match` covers `etag`.
///
/// Accepts the wildcard `*` (RFC 9110) and comma-separated tag lists. Weak
/// validators (`W/"..."`) compare by their opaque tag.
pub fn if_none_match_matches(req: &HttpRequest, etag: &str) -> bool {
    let Some(raw) = req
        .headers()
        .get(IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    raw.trim() == "*"
        || raw
            .split(',')
            .map(|tag| tag.trim().trim_start_matches("W/"))
            .any(|tag| tag == etag)
}
