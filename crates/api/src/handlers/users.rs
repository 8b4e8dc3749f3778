//! REST-Handler fuer Benutzer

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Serialize;
use serde_json::json;
use taskdesk_auth::Registrierung;
use taskdesk_core::UserId;
use taskdesk_db::models::BenutzerRecord;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Oeffentliche Sicht auf einen Benutzer (ohne Login und Admin-Flag)
#[derive(Debug, Serialize)]
pub struct OeffentlichesProfil {
    pub id: UserId,
    pub family: String,
    pub name: String,
    pub surname: String,
}

impl From<BenutzerRecord> for OeffentlichesProfil {
    fn from(b: BenutzerRecord) -> Self {
        Self {
            id: b.id,
            family: b.family,
            name: b.name,
            surname: b.surname,
        }
    }
}

/// GET /users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<OeffentlichesProfil>>> {
    let benutzer = state.auth.benutzer_liste().await?;
    Ok(Json(benutzer.into_iter().map(Into::into).collect()))
}

/// GET /users/:id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<OeffentlichesProfil>> {
    let id = UserId::parsen(&id).ok_or(ApiError::UngueltigeId("user id"))?;
    let benutzer = state.auth.benutzer_laden(id).await?;
    Ok(Json(benutzer.into()))
}

/// POST /users (Registrierung)
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<Registrierung>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(daten) = body?;
    let benutzer = state.auth.registrieren(daten).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "ok",
            "user": OeffentlichesProfil::from(benutzer),
        })),
    ))
}
