//! taskdesk-server – Bibliotheks-Root
//!
//! Deklariert die Server-Module und stellt den oeffentlichen Einstiegspunkt
//! fuer Integrationstests bereit.

pub mod config;

use anyhow::{Context, Result};
use config::ServerConfig;
use taskdesk_api::{AppState, RestServer};
use taskdesk_auth::TokenDigest;
use taskdesk_db::SqliteDb;

/// Haelt den laufenden Server-Zustand zusammen
pub struct Server {
    pub config: ServerConfig,
}

impl Server {
    /// Erstellt einen neuen Server aus der gegebenen Konfiguration
    pub fn neu(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Startet alle Server-Subsysteme und laeuft bis zum Shutdown-Signal
    ///
    /// Reihenfolge:
    /// 1. Konfiguration pruefen (ohne Schluessel kein Start)
    /// 2. Datenbank oeffnen und migrieren
    /// 3. Bootstrap-Admins ernennen
    /// 4. REST-API starten
    /// 5. Auf Ctrl-C warten, dann Pool schliessen
    pub async fn starten(self) -> Result<()> {
        let schluessel = self.config.validieren()?;
        let digest = TokenDigest::neu(&schluessel)?;
        let rest_konfig = self.config.rest_konfig()?;

        tracing::info!(
            url = %self.config.datenbank.url,
            "Datenbankverbindung wird hergestellt"
        );
        let db = SqliteDb::oeffnen(&self.config.datenbank_konfig())
            .await
            .context("Datenbank konnte nicht geoeffnet werden")?;

        let state = AppState::neu(db.clone(), digest, self.config.sicherheit.cookie_secure);

        if !self.config.sicherheit.admin_logins.is_empty() {
            let anzahl = state
                .auth
                .admins_ernennen(&self.config.sicherheit.admin_logins)
                .await?;
            tracing::info!(anzahl, "Bootstrap-Admins gesetzt");
        }

        RestServer::neu(rest_konfig)
            .starten(state, shutdown_signal())
            .await?;

        db.schliessen().await;
        tracing::info!("Server beendet");
        Ok(())
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown-Signal empfangen, Server wird beendet"),
        Err(e) => tracing::error!(fehler = %e, "Ctrl-C-Handler konnte nicht installiert werden"),
    }
}
