//! Session-Verwaltung fuer Taskdesk
//!
//! Verbindet Token-Ausstellung, Digest und Session-Repository.
//! Sessions laufen nicht ab; sie leben bis zum expliziten Logout.

use std::sync::Arc;

use taskdesk_core::UserId;
use taskdesk_db::{models::SessionRecord, repository::SessionRepository};

use crate::error::AuthResult;
use crate::identitaet::Identitaet;
use crate::token::{token_ausstellen, TokenDigest};

/// Frisch ausgestellte Session; der Klartext-Token ist nur hier sichtbar
pub struct AusgestellteSession {
    /// Der Token fuer den Client (wird nicht gespeichert!)
    pub token: String,
    /// Der gespeicherte Datensatz (nur Digest)
    pub record: SessionRecord,
}

impl std::fmt::Debug for AusgestellteSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AusgestellteSession")
            .field("token", &"***")
            .field("record", &self.record)
            .finish()
    }
}

/// Session-Manager ueber einem beliebigen SessionRepository
pub struct SessionManager<S: SessionRepository> {
    repo: Arc<S>,
    digest: TokenDigest,
}

impl<S: SessionRepository> SessionManager<S> {
    pub fn neu(repo: Arc<S>, digest: TokenDigest) -> Self {
        Self { repo, digest }
    }

    pub fn digest(&self) -> &TokenDigest {
        &self.digest
    }

    /// Stellt einen Token aus und speichert dessen Digest fuer den Benutzer
    pub async fn erstellen(&self, user_id: UserId) -> AuthResult<AusgestellteSession> {
        let token = token_ausstellen()?;
        let token_hash = self.digest.digest(&token);

        let record = self.repo.create(&token_hash, user_id).await?;
        tracing::debug!(user_id = %user_id, "Neue Session erstellt");

        Ok(AusgestellteSession { token, record })
    }

    /// Loest einen vorgelegten Token zu einer Identitaet auf
    ///
    /// Liefert nie einen Fehler: fehlender Token, unbekannter Digest und
    /// Fehler im Store ergeben gleichermassen `Identitaet::Anonym`.
    pub async fn aufloesen(&self, token: Option<&str>) -> Identitaet {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return Identitaet::Anonym;
        };

        match self.repo.get_by_hash(&self.digest.digest(token)).await {
            Ok(Some(session)) => Identitaet::Aufgeloest(session.user_id),
            Ok(None) => {
                tracing::debug!("Unbekannter Session-Token");
                Identitaet::Anonym
            }
            Err(e) => {
                tracing::warn!(fehler = %e, "Session-Lookup fehlgeschlagen, Anfrage laeuft anonym");
                Identitaet::Anonym
            }
        }
    }

    /// Loescht die Session zum Token, falls vorhanden
    ///
    /// Gibt `true` zurueck wenn eine Session entfernt wurde. Ein leerer oder
    /// unbekannter Token ist kein Fehler.
    pub async fn beenden(&self, token: Option<&str>) -> AuthResult<bool> {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return Ok(false);
        };

        let entfernt = self.repo.delete_by_hash(&self.digest.digest(token)).await?;
        if entfernt {
            tracing::debug!("Session invalidiert");
        }
        Ok(entfernt)
    }
}
