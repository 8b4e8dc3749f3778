//! Route-Definitionen fuer die REST-API

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Erstellt den vollstaendigen Router (ohne Layer)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health))
        // Auth
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
        // Benutzer
        .route(
            "/users",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route("/users/:id", get(handlers::users::get_user))
        // Aufgaben
        .route(
            "/tasks",
            get(handlers::tasks::list_tasks).post(handlers::tasks::create_task),
        )
        .route("/tasks/:id/users", post(handlers::tasks::bind_users))
        .route("/tasks/:id/complete", post(handlers::tasks::complete_task))
        .fallback(handlers::nicht_gefunden)
}
