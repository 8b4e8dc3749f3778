//! Server-Konfiguration
//!
//! Wird beim Start aus einer TOML-Datei geladen. Alle Felder ausser dem
//! geheimen Schluessel haben sinnvolle Standardwerte. Der Schluessel kann
//! auch ueber die Umgebungsvariable `SECRET_KEY` gesetzt werden.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;
use taskdesk_api::RestServerKonfig;
use taskdesk_auth::GeheimSchluessel;
use taskdesk_db::DatabaseConfig;

/// Umgebungsvariable, die den Schluessel aus der Datei ueberschreibt
pub const SECRET_KEY_ENV: &str = "SECRET_KEY";

/// Vollstaendige Server-Konfiguration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// HTTP-Einstellungen (REST-API)
    pub http: HttpEinstellungen,
    /// Datenbank-Einstellungen
    pub datenbank: DatenbankEinstellungen,
    /// Schluessel, Cookie und Bootstrap-Admins
    pub sicherheit: SicherheitsEinstellungen,
    /// Logging-Einstellungen
    pub logging: LoggingEinstellungen,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpEinstellungen {
    pub bind_adresse: String,
    pub port: u16,
    /// CORS-Origins (leer = alle erlaubt)
    pub cors_origins: Vec<String>,
    /// Frist pro Anfrage in Sekunden
    pub timeout_sek: u64,
    pub max_body_bytes: usize,
}

impl Default for HttpEinstellungen {
    fn default() -> Self {
        Self {
            bind_adresse: "0.0.0.0".into(),
            port: 8080,
            cors_origins: vec![],
            timeout_sek: 30,
            max_body_bytes: 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatenbankEinstellungen {
    /// Verbindungs-URL
    pub url: String,
    /// Maximale Verbindungspool-Groesse
    pub max_verbindungen: u32,
    pub wal: bool,
    /// Maximale Wartezeit auf eine freie Verbindung in Sekunden
    pub acquire_timeout_sek: u64,
}

impl Default for DatenbankEinstellungen {
    fn default() -> Self {
        Self {
            url: "sqlite://taskdesk.db".into(),
            max_verbindungen: 5,
            wal: true,
            acquire_timeout_sek: 5,
        }
    }
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct SicherheitsEinstellungen {
    /// Schluessel fuer den Token-Digest (Pflicht)
    pub geheimer_schluessel: Option<String>,
    /// `Secure`-Attribut am Session-Cookie; nur fuer lokale Entwicklung abschalten
    pub cookie_secure: bool,
    /// Logins, die beim Start zu Admins ernannt werden
    pub admin_logins: Vec<String>,
}

impl Default for SicherheitsEinstellungen {
    fn default() -> Self {
        Self {
            geheimer_schluessel: None,
            cookie_secure: true,
            admin_logins: vec![],
        }
    }
}

impl std::fmt::Debug for SicherheitsEinstellungen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SicherheitsEinstellungen")
            .field(
                "geheimer_schluessel",
                &self.geheimer_schluessel.as_ref().map(|_| "***"),
            )
            .field("cookie_secure", &self.cookie_secure)
            .field("admin_logins", &self.admin_logins)
            .finish()
    }
}

/// Logging-Einstellungen
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingEinstellungen {
    /// Log-Level: "trace", "debug", "info", "warn", "error"
    pub level: String,
    /// Format: "json" oder "text"
    pub format: String,
}

impl Default for LoggingEinstellungen {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

impl ServerConfig {
    /// Laedt die Konfiguration aus einer TOML-Datei.
    /// Gibt die Standardkonfiguration zurueck wenn die Datei nicht existiert.
    pub fn laden(pfad: &str) -> anyhow::Result<Self> {
        match std::fs::read_to_string(pfad) {
            Ok(inhalt) => {
                let config: Self = toml::from_str(&inhalt)
                    .map_err(|e| anyhow::anyhow!("Konfigurationsfehler in '{pfad}': {e}"))?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    pfad = pfad,
                    "Konfigurationsdatei nicht gefunden, verwende Standardwerte"
                );
                Ok(Self::default())
            }
            Err(e) => Err(anyhow::anyhow!(
                "Konfigurationsdatei '{pfad}' nicht lesbar: {e}"
            )),
        }
    }

    /// Uebernimmt Werte aus der Umgebung (aktuell nur `SECRET_KEY`)
    pub fn umgebung_anwenden(&mut self, lesen: impl Fn(&str) -> Option<String>) {
        if let Some(schluessel) = lesen(SECRET_KEY_ENV).filter(|s| !s.trim().is_empty()) {
            self.sicherheit.geheimer_schluessel = Some(schluessel);
        }
    }

    /// Prueft die Konfiguration vor dem Start und baut den Schluessel
    pub fn validieren(&self) -> anyhow::Result<GeheimSchluessel> {
        self.rest_bind_adresse()?;
        GeheimSchluessel::aus_konfig(self.sicherheit.geheimer_schluessel.as_deref()).with_context(
            || {
                format!(
                    "Kein geheimer Schluessel konfiguriert ([sicherheit].geheimer_schluessel oder {SECRET_KEY_ENV})"
                )
            },
        )
    }

    /// Gibt die Bind-Adresse fuer den REST-Server zurueck
    pub fn rest_bind_adresse(&self) -> anyhow::Result<SocketAddr> {
        let roh = format!("{}:{}", self.http.bind_adresse, self.http.port);
        roh.parse()
            .with_context(|| format!("Ungueltige Bind-Adresse '{roh}'"))
    }

    pub fn rest_konfig(&self) -> anyhow::Result<RestServerKonfig> {
        Ok(RestServerKonfig {
            bind_addr: self.rest_bind_adresse()?,
            cors_origins: self.http.cors_origins.clone(),
            anfrage_timeout: Duration::from_secs(self.http.timeout_sek),
            max_body_bytes: self.http.max_body_bytes,
        })
    }

    pub fn datenbank_konfig(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.datenbank.url.clone(),
            max_verbindungen: self.datenbank.max_verbindungen,
            sqlite_wal: self.datenbank.wal,
            acquire_timeout: Duration::from_secs(self.datenbank.acquire_timeout_sek),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_config() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.http.port, 8080);
        assert_eq!(cfg.http.timeout_sek, 30);
        assert_eq!(cfg.datenbank.url, "sqlite://taskdesk.db");
        assert_eq!(cfg.logging.level, "info");
        assert!(cfg.sicherheit.cookie_secure);
        assert_eq!(cfg.rest_bind_adresse().unwrap().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn config_aus_toml_string() {
        let toml = r#"
            [http]
            port = 9000

            [sicherheit]
            geheimer_schluessel = "aus-datei"
            admin_logins = ["chef"]
        "#;
        let cfg: ServerConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.http.port, 9000);
        assert_eq!(cfg.sicherheit.admin_logins, vec!["chef".to_string()]);
        // Nicht angegebene Felder behalten Standardwerte
        assert_eq!(cfg.http.bind_adresse, "0.0.0.0");
        assert!(cfg.datenbank.wal);
        assert!(cfg.validieren().is_ok());
    }

    #[test]
    fn ohne_schluessel_kein_start() {
        let cfg = ServerConfig::default();
        assert!(cfg.validieren().is_err());

        let mut leer = ServerConfig::default();
        leer.sicherheit.geheimer_schluessel = Some("  ".into());
        assert!(leer.validieren().is_err());
    }

    #[test]
    fn umgebung_ueberschreibt_datei() {
        let mut cfg = ServerConfig::default();
        cfg.sicherheit.geheimer_schluessel = Some("aus-datei".into());

        cfg.umgebung_anwenden(|k| (k == SECRET_KEY_ENV).then(|| "aus-env".to_string()));
        assert_eq!(cfg.sicherheit.geheimer_schluessel.as_deref(), Some("aus-env"));

        // Leere Variable aendert nichts
        cfg.umgebung_anwenden(|_| Some(String::new()));
        assert_eq!(cfg.sicherheit.geheimer_schluessel.as_deref(), Some("aus-env"));
    }

    #[test]
    fn schluessel_nicht_im_debug() {
        let mut cfg = ServerConfig::default();
        cfg.sicherheit.geheimer_schluessel = Some("streng-geheim".into());
        assert!(!format!("{cfg:?}").contains("streng-geheim"));
    }

    #[test]
    fn ungueltige_bind_adresse() {
        let mut cfg = ServerConfig::default();
        cfg.http.bind_adresse = "kein host".into();
        assert!(cfg.rest_bind_adresse().is_err());
    }
}
