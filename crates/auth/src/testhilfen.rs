//! Gemeinsame Test-Hilfen: In-Memory-SQLite und ein Store, der immer fehlschlaegt

use std::sync::Arc;

use taskdesk_core::{TaskId, UserId};
use taskdesk_db::{
    models::{AufgabeRecord, BenutzerRecord, NeueAufgabe, NeuerBenutzer, SessionRecord},
    DbError, DbResult, SessionRepository, SqliteDb, TaskRepository, UserRepository,
};

use crate::token::{GeheimSchluessel, TokenDigest};

pub(crate) fn digest() -> TokenDigest {
    TokenDigest::neu(&GeheimSchluessel::neu("test-schluessel").unwrap()).unwrap()
}

pub(crate) async fn sqlite() -> Arc<SqliteDb> {
    Arc::new(SqliteDb::in_memory().await.unwrap())
}

pub(crate) async fn benutzer_anlegen(db: &SqliteDb, login: &str, is_admin: bool) -> UserId {
    UserRepository::create(
        db,
        NeuerBenutzer {
            login,
            family: "Muster",
            name: "Erika",
            surname: "M.",
            password_hash: "kein-echter-hash",
            is_admin,
        },
    )
    .await
    .unwrap()
    .id
}

pub(crate) async fn sqlite_mit_benutzer(login: &str, is_admin: bool) -> (Arc<SqliteDb>, UserId) {
    let db = sqlite().await;
    let id = benutzer_anlegen(&db, login, is_admin).await;
    (db, id)
}

/// Simuliert einen nicht erreichbaren Store
pub(crate) struct FehlerRepo;

fn kaputt<T>() -> DbResult<T> {
    Err(DbError::intern("Store nicht erreichbar"))
}

impl UserRepository for FehlerRepo {
    async fn create(&self, _data: NeuerBenutzer<'_>) -> DbResult<BenutzerRecord> {
        kaputt()
    }
    async fn get_by_id(&self, _id: UserId) -> DbResult<Option<BenutzerRecord>> {
        kaputt()
    }
    async fn get_by_login(&self, _login: &str) -> DbResult<Option<BenutzerRecord>> {
        kaputt()
    }
    async fn list(&self) -> DbResult<Vec<BenutzerRecord>> {
        kaputt()
    }
    async fn ist_admin(&self, _id: UserId) -> DbResult<Option<bool>> {
        kaputt()
    }
    async fn existiert(&self, _id: UserId) -> DbResult<bool> {
        kaputt()
    }
    async fn admin_setzen(&self, _login: &str, _is_admin: bool) -> DbResult<bool> {
        kaputt()
    }
}

impl SessionRepository for FehlerRepo {
    async fn create(&self, _token_hash: &str, _user_id: UserId) -> DbResult<SessionRecord> {
        kaputt()
    }
    async fn get_by_hash(&self, _token_hash: &str) -> DbResult<Option<SessionRecord>> {
        kaputt()
    }
    async fn delete_by_hash(&self, _token_hash: &str) -> DbResult<bool> {
        kaputt()
    }
}

impl TaskRepository for FehlerRepo {
    async fn create(&self, _data: NeueAufgabe<'_>) -> DbResult<AufgabeRecord> {
        kaputt()
    }
    async fn get(&self, _id: TaskId) -> DbResult<Option<AufgabeRecord>> {
        kaputt()
    }
    async fn existiert(&self, _id: TaskId) -> DbResult<bool> {
        kaputt()
    }
    async fn list_all(&self) -> DbResult<Vec<AufgabeRecord>> {
        kaputt()
    }
    async fn list_for_user(&self, _user_id: UserId) -> DbResult<Vec<AufgabeRecord>> {
        kaputt()
    }
    async fn ist_zugewiesen(&self, _task_id: TaskId, _user_id: UserId) -> DbResult<bool> {
        kaputt()
    }
    async fn zuweisen(&self, _task_id: TaskId, _user_ids: &[UserId]) -> DbResult<u64> {
        kaputt()
    }
    async fn abschliessen(&self, _id: TaskId) -> DbResult<bool> {
        kaputt()
    }
}
