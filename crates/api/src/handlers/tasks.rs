//! REST-Handler fuer Aufgaben
//!
//! Reihenfolge in jedem Handler: Anmeldung/Rolle, dann Pfad-ID, dann Body.
//! So bekommt ein anonymer Aufrufer immer 401, auch bei kaputter Eingabe.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use serde_json::json;
use taskdesk_auth::{zugriff, NeueAufgabeEingabe};
use taskdesk_core::TaskId;
use taskdesk_db::models::AufgabeRecord;

use crate::error::{ApiError, ApiResult};
use crate::handlers::ok;
use crate::middleware::AktuellerAufrufer;
use crate::state::AppState;

fn task_id(roh: &str) -> ApiResult<TaskId> {
    TaskId::parsen(roh).ok_or(ApiError::UngueltigeId("task id"))
}

/// GET /tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    AktuellerAufrufer(aufrufer): AktuellerAufrufer,
) -> ApiResult<Json<Vec<AufgabeRecord>>> {
    Ok(Json(state.aufgaben.auflisten(&aufrufer).await?))
}

/// POST /tasks
pub async fn create_task(
    State(state): State<AppState>,
    AktuellerAufrufer(aufrufer): AktuellerAufrufer,
    body: Result<Json<NeueAufgabeEingabe>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    zugriff::erstellen(&aufrufer)?;
    let Json(eingabe) = body?;

    let aufgabe = state.aufgaben.erstellen(&aufrufer, eingabe).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "status": "ok", "task": aufgabe })),
    ))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ZuweisungsAnfrage {
    pub user_ids: Vec<i64>,
}

/// POST /tasks/:id/users
pub async fn bind_users(
    State(state): State<AppState>,
    AktuellerAufrufer(aufrufer): AktuellerAufrufer,
    Path(id): Path<String>,
    body: Result<Json<ZuweisungsAnfrage>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    zugriff::zuweisen(&aufrufer)?;
    let task_id = task_id(&id)?;
    let Json(anfrage) = body?;

    let neu = state
        .aufgaben
        .zuweisen(&aufrufer, task_id, &anfrage.user_ids)
        .await?;
    Ok(Json(json!({ "status": "ok", "bound": neu })))
}

/// POST /tasks/:id/complete
pub async fn complete_task(
    State(state): State<AppState>,
    AktuellerAufrufer(aufrufer): AktuellerAufrufer,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    aufrufer.angemeldet()?;
    let task_id = task_id(&id)?;

    state.aufgaben.abschliessen(&aufrufer, task_id).await?;
    Ok(ok(StatusCode::OK))
}
