use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// A failed request. Each endpoint picks its own status and message; some
/// answer in plain text and some in a `{"message": ...}` JSON body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    Text(StatusCode, &'static str),
    Json(StatusCode, &'static str),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Text(status, message) => (status, message).into_response(),
            ApiError::Json(status, message) => (status, Json(json!({ "message": message }))).into_response(),
        }
    }
}
