//! Axum HTTP-Server fuer Taskdesk

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::middleware;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::auth_resolver;
use crate::routes::router;
use crate::state::AppState;

/// REST-Server-Konfiguration
#[derive(Debug, Clone)]
pub struct RestServerKonfig {
    pub bind_addr: SocketAddr,
    /// Erlaubte CORS-Origins. Leer = alle Origins erlaubt (nur fuer Entwicklung).
    pub cors_origins: Vec<String>,
    /// Frist pro Anfrage; danach wird der Handler samt DB-Abfrage verworfen
    pub anfrage_timeout: Duration,
    /// Maximale Groesse eines Request-Bodys in Bytes
    ///
    /// Greift erst beim Lesen des Bodys im Handler, also nach der
    /// Rollenpruefung; ein anonymer Aufrufer bekommt weiterhin 401.
    pub max_body_bytes: usize,
}

impl Default for RestServerKonfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            cors_origins: vec![],
            anfrage_timeout: Duration::from_secs(30),
            max_body_bytes: 1024 * 1024,
        }
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(tower_http::cors::Any)
}

/// Baut die komplette Anwendung: Routen, Auth-Resolver und alle Layer
pub fn app(state: AppState, konfig: &RestServerKonfig) -> Router {
    router()
        // Auth-Resolver als innersten Layer (laeuft direkt vor den Handlern)
        .layer(middleware::from_fn_with_state(state.clone(), auth_resolver))
        .layer(DefaultBodyLimit::max(konfig.max_body_bytes))
        .layer(TimeoutLayer::new(konfig.anfrage_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&konfig.cors_origins))
        .with_state(state)
}

/// Axum HTTP-Server fuer Taskdesk
pub struct RestServer {
    konfig: RestServerKonfig,
}

impl RestServer {
    pub fn neu(konfig: RestServerKonfig) -> Self {
        Self { konfig }
    }

    /// Startet den Server und laeuft bis `shutdown` abgeschlossen ist
    pub async fn starten(
        self,
        state: AppState,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<()> {
        let app = app(state, &self.konfig);

        let listener = tokio::net::TcpListener::bind(self.konfig.bind_addr).await?;
        tracing::info!(addr = %self.konfig.bind_addr, "REST-Server gestartet");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("REST-Server beendet");
        Ok(())
    }
}
