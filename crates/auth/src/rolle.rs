//! Rollenaufloesung pro Anfrage
//!
//! Liest bei jeder Anfrage das Admin-Flag frisch aus dem Store. Anders als
//! die Identitaet schlaegt die Rolle geschlossen fehl: ein Store-Fehler wird
//! nie zu "kein Admin" heruntergestuft, sondern bricht die Anfrage ab.

use std::sync::Arc;

use taskdesk_db::repository::UserRepository;

use crate::error::{AuthError, AuthResult};
use crate::identitaet::{Aufrufer, Identitaet};

pub struct RollenAufloeser<U: UserRepository> {
    user_repo: Arc<U>,
}

impl<U: UserRepository> RollenAufloeser<U> {
    pub fn neu(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// Ergaenzt eine Identitaet um die aktuelle Rolle
    pub async fn aufloesen(&self, identitaet: Identitaet) -> AuthResult<Aufrufer> {
        let Identitaet::Aufgeloest(user_id) = identitaet else {
            return Ok(Aufrufer::anonym());
        };

        match self.user_repo.ist_admin(user_id).await {
            Ok(Some(true)) => Ok(Aufrufer::admin(user_id)),
            Ok(Some(false)) => Ok(Aufrufer::mitglied(user_id)),
            Ok(None) => {
                // Session zeigt auf einen Benutzer, den es nicht mehr gibt
                tracing::error!(user_id = %user_id, "Benutzer zur Session fehlt");
                Err(AuthError::intern("Benutzer zur Session nicht gefunden"))
            }
            Err(e) => {
                tracing::error!(user_id = %user_id, fehler = %e, "Rollenaufloesung fehlgeschlagen");
                Err(e.into())
            }
        }
    }
}
