//! Axum-State fuer den REST-Server

use std::sync::Arc;

use taskdesk_auth::{AufgabenService, AuthService, RollenAufloeser, SessionManager, TokenDigest};
use taskdesk_db::SqliteDb;

/// Geteilter Zustand aller Handler
///
/// Enthaelt nur unveraenderliche Services; der einzige geteilte Zustand
/// darunter ist der Connection-Pool.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService<SqliteDb, SqliteDb>>,
    pub aufgaben: Arc<AufgabenService<SqliteDb, SqliteDb>>,
    pub rollen: Arc<RollenAufloeser<SqliteDb>>,
    /// Ob das Session-Cookie das `Secure`-Attribut traegt
    pub cookie_secure: bool,
}

impl AppState {
    pub fn neu(db: SqliteDb, digest: TokenDigest, cookie_secure: bool) -> Self {
        let db = Arc::new(db);
        Self {
            auth: Arc::new(AuthService::neu(
                db.clone(),
                SessionManager::neu(db.clone(), digest),
            )),
            aufgaben: Arc::new(AufgabenService::neu(db.clone(), db.clone())),
            rollen: Arc::new(RollenAufloeser::neu(db)),
            cookie_secure,
        }
    }
}
