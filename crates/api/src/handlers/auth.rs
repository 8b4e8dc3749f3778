//! REST-Handler fuer Login, Logout und Profil

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use taskdesk_core::UserId;
use taskdesk_db::models::BenutzerRecord;

use crate::cookie::{session_loeschen, session_setzen};
use crate::error::ApiResult;
use crate::middleware::{token_aus_anfrage, AktuelleIdentitaet};
use crate::state::AppState;

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct AnmeldeAnfrage {
    pub login: String,
    pub password: String,
}

/// Profil des angemeldeten Benutzers
#[derive(Debug, Serialize)]
pub struct Profil {
    pub id: UserId,
    pub family: String,
    pub name: String,
    pub surname: String,
    pub is_admin: bool,
}

impl From<BenutzerRecord> for Profil {
    fn from(b: BenutzerRecord) -> Self {
        Self {
            id: b.id,
            family: b.family,
            name: b.name,
            surname: b.surname,
            is_admin: b.is_admin,
        }
    }
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<AnmeldeAnfrage>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(anfrage) = body?;
    let (benutzer, session) = state.auth.anmelden(&anfrage.login, &anfrage.password).await?;

    let cookie = session_setzen(&session.token, state.cookie_secure);
    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(json!({
            "status": "ok",
            "token": session.token,
            "user": Profil::from(benutzer),
        })),
    ))
}

/// POST /auth/logout
///
/// Immer 200 mit geloeschtem Cookie, egal ob die Session noch existierte.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<impl IntoResponse> {
    state.auth.abmelden(token_aus_anfrage(&headers)).await?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, session_loeschen(state.cookie_secure))],
        Json(json!({ "status": "ok" })),
    ))
}

/// GET /auth/me
pub async fn me(
    State(state): State<AppState>,
    AktuelleIdentitaet(identitaet): AktuelleIdentitaet,
) -> ApiResult<Json<Profil>> {
    let benutzer = state.auth.profil(identitaet).await?;
    Ok(Json(benutzer.into()))
}
