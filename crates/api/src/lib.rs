//! taskdesk-api – REST-Schnittstelle fuer Taskdesk
//!
//! Stellt die HTTP-Endpunkte fuer Login, Benutzer und Aufgaben bereit.
//! Jede Anfrage laeuft durch den Auth-Resolver (Middleware), die Rolle wird
//! erst im Extractor aufgeloest.

pub mod cookie;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use server::{RestServer, RestServerKonfig};
pub use state::AppState;
