//! Fehlerantworten der REST-API
//!
//! Jeder Fehler wird zu `{"error": <code>, "message": <text>}`, bei
//! Validierungsfehlern ergaenzt um `"field"`. Interne Fehler werden
//! protokolliert und nach aussen nur generisch gemeldet.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use taskdesk_auth::AuthError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Anfrage ist kein gueltiges JSON: {0}")]
    UngueltigesJson(String),

    #[error("Request-Body ist zu gross")]
    ZuGross,

    /// Pfad-ID ist keine positive Ganzzahl
    #[error("{0} muss eine positive Ganzzahl sein")]
    UngueltigeId(&'static str),

    #[error("Route nicht gefunden")]
    RouteNichtGefunden,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<JsonRejection> for ApiError {
    fn from(r: JsonRejection) -> Self {
        if r.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return Self::ZuGross;
        }
        Self::UngueltigesJson(r.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Auth(e) => match e {
                AuthError::Validierung { .. } => StatusCode::BAD_REQUEST,
                AuthError::UngueltigeAnmeldedaten | AuthError::NichtAngemeldet => {
                    StatusCode::UNAUTHORIZED
                }
                AuthError::Verboten(_) => StatusCode::FORBIDDEN,
                AuthError::NichtGefunden(_) => StatusCode::NOT_FOUND,
                AuthError::LoginVergeben(_) => StatusCode::CONFLICT,
                AuthError::PasswortHashing(_)
                | AuthError::Zufallsquelle(_)
                | AuthError::SchluesselFehlt
                | AuthError::Datenbank(_)
                | AuthError::Intern(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::UngueltigesJson(_) | Self::UngueltigeId(_) => StatusCode::BAD_REQUEST,
            Self::ZuGross => StatusCode::PAYLOAD_TOO_LARGE,
            Self::RouteNichtGefunden => StatusCode::NOT_FOUND,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Auth(e) => e.code(),
            Self::UngueltigesJson(_) => "invalid_json",
            Self::ZuGross => "payload_too_large",
            Self::UngueltigeId(_) => "validation_error",
            Self::RouteNichtGefunden => "not_found",
        }
    }

    fn feld(&self) -> Option<&str> {
        match self {
            Self::Auth(AuthError::Validierung { feld, .. }) => Some(feld.as_str()),
            Self::UngueltigeId(_) => Some("id"),
            _ => None,
        }
    }

    fn ist_intern(&self) -> bool {
        matches!(self, Self::Auth(e) if e.ist_intern())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let nachricht = if self.ist_intern() {
            tracing::error!(fehler = %self, code, "Anfrage mit internem Fehler abgebrochen");
            "Interner Serverfehler".to_string()
        } else {
            self.to_string()
        };

        let mut body = json!({ "error": code, "message": nachricht });
        if let Some(feld) = self.feld() {
            body["field"] = json!(feld);
        }

        (status, Json(body)).into_response()
    }
}
