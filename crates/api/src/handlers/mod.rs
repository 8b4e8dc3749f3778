//! REST-Handler Module

pub mod auth;
pub mod tasks;
pub mod users;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use serde_json::json;

use crate::error::ApiError;

/// `{"status": "ok"}` mit dem gegebenen Status
pub(crate) fn ok(status: StatusCode) -> impl IntoResponse {
    (status, Json(json!({ "status": "ok" })))
}

/// GET /health
pub async fn health() -> impl IntoResponse {
    ok(StatusCode::OK)
}

/// Fallback fuer unbekannte Routen
pub async fn nicht_gefunden() -> ApiError {
    ApiError::RouteNichtGefunden
}
