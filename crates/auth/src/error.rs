//! Fehlertypen fuer den Auth-Service
//!
//! Deckt die gesamte Fehler-Taxonomie der Anwendung ab. Jede Variante hat
//! einen maschinenlesbaren Code; interne Varianten geben nach aussen keine
//! Details preis.

use thiserror::Error;

/// Alle moeglichen Fehler im Auth- und Aufgaben-Service
#[derive(Debug, Error)]
pub enum AuthError {
    // --- Eingabe ---
    #[error("{nachricht}")]
    Validierung { feld: String, nachricht: String },

    // --- Authentifizierung ---
    #[error("Benutzer existiert nicht oder Passwort falsch")]
    UngueltigeAnmeldedaten,

    #[error("Nicht angemeldet")]
    NichtAngemeldet,

    // --- Autorisierung ---
    #[error("Zugriff verweigert: {0}")]
    Verboten(String),

    // --- Ressourcen ---
    #[error("Nicht gefunden: {0}")]
    NichtGefunden(String),

    #[error("Login bereits vergeben: {0}")]
    LoginVergeben(String),

    // --- Krypto ---
    #[error("Passwort-Hashing fehlgeschlagen: {0}")]
    PasswortHashing(String),

    #[error("Zufallsquelle nicht verfuegbar: {0}")]
    Zufallsquelle(String),

    #[error("Geheimer Schluessel fehlt oder ist leer")]
    SchluesselFehlt,

    // --- Datenbank ---
    #[error("Datenbankfehler: {0}")]
    Datenbank(#[from] taskdesk_db::DbError),

    // --- Intern ---
    #[error("Interner Fehler: {0}")]
    Intern(String),
}

impl AuthError {
    pub fn intern(msg: impl Into<String>) -> Self {
        Self::Intern(msg.into())
    }

    pub fn validierung(feld: impl Into<String>, nachricht: impl Into<String>) -> Self {
        Self::Validierung {
            feld: feld.into(),
            nachricht: nachricht.into(),
        }
    }

    /// Maschinenlesbarer Fehler-Code fuer API-Antworten
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validierung { .. } => "validation_error",
            Self::UngueltigeAnmeldedaten => "invalid_credentials",
            Self::NichtAngemeldet => "not_authorized",
            Self::Verboten(_) => "forbidden",
            Self::NichtGefunden(_) => "not_found",
            Self::LoginVergeben(_) => "conflict",
            Self::PasswortHashing(_) => "hash_error",
            Self::Zufallsquelle(_) => "token_error",
            Self::Datenbank(_) => "db_error",
            Self::SchluesselFehlt | Self::Intern(_) => "internal",
        }
    }

    /// Gibt true zurueck wenn Details nicht an Clients gehen duerfen
    pub fn ist_intern(&self) -> bool {
        matches!(
            self,
            Self::PasswortHashing(_)
                | Self::Zufallsquelle(_)
                | Self::SchluesselFehlt
                | Self::Datenbank(_)
                | Self::Intern(_)
        )
    }
}

/// Result-Alias fuer den Auth-Service
pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_und_intern_flag() {
        assert_eq!(AuthError::NichtAngemeldet.code(), "not_authorized");
        assert_eq!(AuthError::Verboten("x".into()).code(), "forbidden");
        assert_eq!(AuthError::validierung("title", "fehlt").code(), "validation_error");
        assert!(AuthError::PasswortHashing("oom".into()).ist_intern());
        assert!(!AuthError::UngueltigeAnmeldedaten.ist_intern());
    }

    #[test]
    fn validierung_zeigt_nachricht() {
        let e = AuthError::validierung("login", "login is required");
        assert_eq!(e.to_string(), "login is required");
    }
}
