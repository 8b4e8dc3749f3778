//! Repository-Trait-Definitionen
//!
//! Das Repository-Pattern entkoppelt die Geschaeftslogik von der konkreten
//! Datenbank-Implementierung. Alle Methoden liefern `Send`-Futures, damit
//! sie direkt in Axum-Handlern awaited werden koennen.

use std::future::Future;
use std::time::Duration;

use taskdesk_core::{TaskId, UserId};

use crate::error::DbError;
use crate::models::{AufgabeRecord, BenutzerRecord, NeueAufgabe, NeuerBenutzer, SessionRecord};

/// Result-Alias fuer alle Repository-Operationen
pub type DbResult<T> = Result<T, DbError>;

/// Konfiguration fuer die Datenbankverbindung
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Verbindungs-URL (z.B. "sqlite://taskdesk.db")
    pub url: String,
    /// Maximale Anzahl gleichzeitiger Verbindungen im Pool
    pub max_verbindungen: u32,
    /// Ob WAL-Modus bei SQLite aktiviert werden soll
    pub sqlite_wal: bool,
    /// Maximale Wartezeit auf eine freie Verbindung
    pub acquire_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://taskdesk.db".into(),
            max_verbindungen: 5,
            sqlite_wal: true,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

/// Repository fuer Benutzer-Datenzugriffe
pub trait UserRepository: Send + Sync {
    /// Legt einen neuen Benutzer an
    ///
    /// Gibt `DbError::Eindeutigkeit` zurueck wenn der Login vergeben ist.
    fn create(
        &self,
        data: NeuerBenutzer<'_>,
    ) -> impl Future<Output = DbResult<BenutzerRecord>> + Send;

    /// Laedt einen Benutzer anhand seiner ID
    fn get_by_id(&self, id: UserId)
        -> impl Future<Output = DbResult<Option<BenutzerRecord>>> + Send;

    /// Laedt einen Benutzer anhand seines Logins
    fn get_by_login(
        &self,
        login: &str,
    ) -> impl Future<Output = DbResult<Option<BenutzerRecord>>> + Send;

    /// Listet alle Benutzer (nach ID sortiert)
    fn list(&self) -> impl Future<Output = DbResult<Vec<BenutzerRecord>>> + Send;

    /// Liest nur das Admin-Flag; `None` wenn der Benutzer nicht existiert
    fn ist_admin(&self, id: UserId) -> impl Future<Output = DbResult<Option<bool>>> + Send;

    /// Prueft ob ein Benutzer existiert
    fn existiert(&self, id: UserId) -> impl Future<Output = DbResult<bool>> + Send;

    /// Setzt das Admin-Flag anhand des Logins; `false` wenn kein Benutzer betroffen war
    fn admin_setzen(
        &self,
        login: &str,
        is_admin: bool,
    ) -> impl Future<Output = DbResult<bool>> + Send;
}

/// Repository fuer Session-Datensaetze (Schluessel ist der Token-Digest)
pub trait SessionRepository: Send + Sync {
    /// Speichert eine neue Session
    fn create(
        &self,
        token_hash: &str,
        user_id: UserId,
    ) -> impl Future<Output = DbResult<SessionRecord>> + Send;

    /// Sucht eine Session anhand des Digests
    fn get_by_hash(
        &self,
        token_hash: &str,
    ) -> impl Future<Output = DbResult<Option<SessionRecord>>> + Send;

    /// Loescht eine Session; `true` wenn eine Zeile entfernt wurde
    fn delete_by_hash(&self, token_hash: &str) -> impl Future<Output = DbResult<bool>> + Send;
}

/// Repository fuer Aufgaben und Zuweisungen
pub trait TaskRepository: Send + Sync {
    /// Legt eine neue Aufgabe an
    fn create(
        &self,
        data: NeueAufgabe<'_>,
    ) -> impl Future<Output = DbResult<AufgabeRecord>> + Send;

    /// Laedt eine Aufgabe anhand ihrer ID
    fn get(&self, id: TaskId) -> impl Future<Output = DbResult<Option<AufgabeRecord>>> + Send;

    /// Prueft ob eine Aufgabe existiert
    fn existiert(&self, id: TaskId) -> impl Future<Output = DbResult<bool>> + Send;

    /// Listet alle Aufgaben
    fn list_all(&self) -> impl Future<Output = DbResult<Vec<AufgabeRecord>>> + Send;

    /// Listet nur die Aufgaben, die dem Benutzer zugewiesen sind
    fn list_for_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = DbResult<Vec<AufgabeRecord>>> + Send;

    /// Prueft ob eine Zuweisung (task_id, user_id) existiert
    fn ist_zugewiesen(
        &self,
        task_id: TaskId,
        user_id: UserId,
    ) -> impl Future<Output = DbResult<bool>> + Send;

    /// Weist Benutzer einer Aufgabe zu (idempotent, eine Transaktion)
    ///
    /// Bereits bestehende Paare werden uebersprungen. Gibt die Anzahl der
    /// neu angelegten Zuweisungen zurueck.
    fn zuweisen(
        &self,
        task_id: TaskId,
        user_ids: &[UserId],
    ) -> impl Future<Output = DbResult<u64>> + Send;

    /// Markiert eine Aufgabe als erledigt; `false` wenn sie nicht existiert
    fn abschliessen(&self, id: TaskId) -> impl Future<Output = DbResult<bool>> + Send;
}
