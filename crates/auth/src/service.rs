//! Auth-Service fuer Taskdesk
//!
//! Zentraler Service fuer Registrierung, Login, Logout und Profilabfragen.
//! Nutzt das UserRepository und den SessionManager.

use std::sync::Arc;

use serde::Deserialize;
use taskdesk_core::UserId;
use taskdesk_db::{
    models::{BenutzerRecord, NeuerBenutzer},
    repository::{SessionRepository, UserRepository},
};

use crate::{
    error::{AuthError, AuthResult},
    identitaet::Identitaet,
    password::{passwort_hashen_blockierfrei, passwort_verifizieren_blockierfrei},
    session::{AusgestellteSession, SessionManager},
    validierung,
};

/// Daten einer Registrierung (POST /users)
///
/// Fehlende Felder werden zu leeren Strings und scheitern dann an der
/// Validierung statt am JSON-Parser.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Registrierung {
    pub login: String,
    pub family: String,
    pub name: String,
    pub surname: String,
    pub password: String,
}

impl std::fmt::Debug for Registrierung {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registrierung")
            .field("login", &self.login)
            .field("family", &self.family)
            .field("name", &self.name)
            .field("surname", &self.surname)
            .field("password", &"***")
            .finish()
    }
}

/// Auth-Service: zentraler Einstiegspunkt fuer alle Authentifizierungsvorgaenge
pub struct AuthService<U: UserRepository, S: SessionRepository> {
    user_repo: Arc<U>,
    sessions: SessionManager<S>,
}

impl<U: UserRepository, S: SessionRepository> AuthService<U, S> {
    pub fn neu(user_repo: Arc<U>, sessions: SessionManager<S>) -> Self {
        Self { user_repo, sessions }
    }

    pub fn sessions(&self) -> &SessionManager<S> {
        &self.sessions
    }

    /// Registriert einen neuen (nicht-administrativen) Benutzer
    pub async fn registrieren(&self, daten: Registrierung) -> AuthResult<BenutzerRecord> {
        validierung::registrierung_pruefen(
            &daten.login,
            &daten.family,
            &daten.name,
            &daten.surname,
            &daten.password,
        )?;

        if self.user_repo.get_by_login(&daten.login).await?.is_some() {
            return Err(AuthError::LoginVergeben(daten.login));
        }

        let passwort_hash = passwort_hashen_blockierfrei(daten.password.clone()).await?;

        let ergebnis = self
            .user_repo
            .create(NeuerBenutzer {
                login: &daten.login,
                family: &daten.family,
                name: &daten.name,
                surname: &daten.surname,
                password_hash: &passwort_hash,
                is_admin: false,
            })
            .await;

        let benutzer = match ergebnis {
            Ok(b) => b,
            // Paralleler Insert mit demselben Login
            Err(e) if e.ist_eindeutigkeit() => return Err(AuthError::LoginVergeben(daten.login)),
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            user_id = %benutzer.id,
            login = %benutzer.login,
            "Neuer Benutzer registriert"
        );

        Ok(benutzer)
    }

    /// Meldet einen Benutzer an und erstellt eine neue Session
    ///
    /// Unbekannter Login und falsches Passwort sind nach aussen nicht
    /// unterscheidbar, auch nicht ueber die Antwortzeit: beide Pfade
    /// laufen durch Argon2.
    pub async fn anmelden(
        &self,
        login: &str,
        passwort: &str,
    ) -> AuthResult<(BenutzerRecord, AusgestellteSession)> {
        validierung::anmeldung_pruefen(login, passwort)?;

        let Some(benutzer) = self.user_repo.get_by_login(login).await? else {
            passwort_verifizieren_blockierfrei(passwort.to_string(), None).await;
            tracing::warn!(login = %login, "Login fuer unbekannten Benutzer");
            return Err(AuthError::UngueltigeAnmeldedaten);
        };

        let hash = Some(benutzer.password_hash.clone());
        if !passwort_verifizieren_blockierfrei(passwort.to_string(), hash).await {
            tracing::warn!(login = %login, "Fehlgeschlagener Login-Versuch");
            return Err(AuthError::UngueltigeAnmeldedaten);
        }

        let session = self.sessions.erstellen(benutzer.id).await?;

        tracing::info!(
            user_id = %benutzer.id,
            login = %benutzer.login,
            "Benutzer angemeldet"
        );

        Ok((benutzer, session))
    }

    /// Meldet ab; ein fehlender oder unbekannter Token ist kein Fehler
    pub async fn abmelden(&self, token: Option<&str>) -> AuthResult<()> {
        self.sessions.beenden(token).await?;
        Ok(())
    }

    /// Auth Resolver: Token zu Identitaet (schlaegt nie fehl)
    pub async fn identitaet_aufloesen(&self, token: Option<&str>) -> Identitaet {
        self.sessions.aufloesen(token).await
    }

    /// Profil des angemeldeten Benutzers (GET /auth/me)
    pub async fn profil(&self, identitaet: Identitaet) -> AuthResult<BenutzerRecord> {
        let user_id = identitaet.user_id().ok_or(AuthError::NichtAngemeldet)?;

        self.user_repo
            .get_by_id(user_id)
            .await?
            .ok_or(AuthError::NichtAngemeldet)
    }

    pub async fn benutzer_liste(&self) -> AuthResult<Vec<BenutzerRecord>> {
        Ok(self.user_repo.list().await?)
    }

    pub async fn benutzer_laden(&self, id: UserId) -> AuthResult<BenutzerRecord> {
        self.user_repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AuthError::NichtGefunden(format!("Benutzer {}", id.inner())))
    }

    /// Befoerdert die angegebenen Logins zu Administratoren
    ///
    /// Unbekannte Logins werden protokolliert und uebersprungen. Gibt die
    /// Anzahl der tatsaechlich gesetzten Flags zurueck.
    pub async fn admins_ernennen(&self, logins: &[String]) -> AuthResult<usize> {
        let mut gesetzt = 0;
        for login in logins.iter().map(|l| l.trim()).filter(|l| !l.is_empty()) {
            if self.user_repo.admin_setzen(login, true).await? {
                tracing::info!(login = %login, "Benutzer zum Admin ernannt");
                gesetzt += 1;
            } else {
                tracing::warn!(login = %login, "Admin-Login existiert nicht");
            }
        }
        Ok(gesetzt)
    }
}
