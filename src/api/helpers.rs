//! Common response builders for the HTTP handlers.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Returns a 200 OK response with an empty JSON body.
#[must_use]
pub fn ok_empty() -> Response {
    (StatusCode::OK, Json(json!({}))).into_response()
}

/// Echoes the Events API verification challenge.
#[must_use]
pub fn challenge_response(challenge: &str) -> Response {
    (StatusCode::OK, Json(json!({ "challenge": challenge }))).into_response()
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// Returns a plain-text response, used by the browser-facing OAuth redirect.
#[must_use]
pub fn plain_text(status: StatusCode, text: &str) -> Response {
    (status, text.to_string()).into_response()
}
