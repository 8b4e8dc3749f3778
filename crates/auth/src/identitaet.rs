//! Identitaet und Rolle einer Anfrage
//!
//! Beide Werte sind fluechtig: sie werden bei jeder Anfrage neu aus der
//! Session und dem Benutzerdatensatz berechnet und nie gecacht.

use taskdesk_core::UserId;

use crate::error::{AuthError, AuthResult};

/// Ergebnis der Token-Aufloesung
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Identitaet {
    /// Kein oder kein gueltiger Token
    #[default]
    Anonym,
    /// Token gehoert zu einer bestehenden Session dieses Benutzers
    Aufgeloest(UserId),
}

impl Identitaet {
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Self::Anonym => None,
            Self::Aufgeloest(id) => Some(*id),
        }
    }

    pub fn ist_anonym(&self) -> bool {
        matches!(self, Self::Anonym)
    }
}

/// Rolle eines Aufrufers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rolle {
    Admin,
    /// Normaler Benutzer; auch anonyme Aufrufer zaehlen hierzu
    #[default]
    Mitglied,
}

/// Identitaet plus aufgeloeste Rolle; Eingabe fuer alle Zugriffsentscheidungen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Aufrufer {
    pub identitaet: Identitaet,
    pub rolle: Rolle,
}

impl Aufrufer {
    pub fn anonym() -> Self {
        Self::default()
    }

    pub fn mitglied(id: UserId) -> Self {
        Self {
            identitaet: Identitaet::Aufgeloest(id),
            rolle: Rolle::Mitglied,
        }
    }

    pub fn admin(id: UserId) -> Self {
        Self {
            identitaet: Identitaet::Aufgeloest(id),
            rolle: Rolle::Admin,
        }
    }

    pub fn ist_admin(&self) -> bool {
        !self.identitaet.ist_anonym() && self.rolle == Rolle::Admin
    }

    /// Verlangt eine aufgeloeste Identitaet (sonst 401)
    pub fn angemeldet(&self) -> AuthResult<UserId> {
        self.identitaet.user_id().ok_or(AuthError::NichtAngemeldet)
    }

    /// Verlangt Anmeldung und Admin-Rolle (401 vor 403)
    pub fn admin_erforderlich(&self) -> AuthResult<UserId> {
        let id = self.angemeldet()?;
        if self.rolle != Rolle::Admin {
            return Err(AuthError::Verboten(
                "Nur Administratoren duerfen diese Aktion ausfuehren".into(),
            ));
        }
        Ok(id)
    }
}
