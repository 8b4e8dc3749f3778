//! Zugriffsentscheidungen fuer Aufgaben-Operationen
//!
//! Reine Funktionen ohne I/O. Jede Pruefung laeuft in derselben Reihenfolge:
//! zuerst Anmeldung (401), dann Rolle bzw. Zuweisung (403). Dadurch erfaehrt
//! ein anonymer Aufrufer nie, ob eine Ressource existiert.

use taskdesk_core::UserId;

use crate::error::{AuthError, AuthResult};
use crate::identitaet::{Aufrufer, Rolle};

/// Welche Aufgaben ein Aufrufer sehen darf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sichtbarkeit {
    Alle,
    NurZugewiesen(UserId),
}

/// Was fuer das Abschliessen einer Aufgabe noch geprueft werden muss
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Abschlussrecht {
    /// Admin: immer erlaubt
    Uneingeschraenkt,
    /// Mitglied: nur mit Zuweisung (task, user)
    ZuweisungErforderlich(UserId),
}

/// GET /tasks
pub fn sichtbarkeit(aufrufer: &Aufrufer) -> AuthResult<Sichtbarkeit> {
    let id = aufrufer.angemeldet()?;
    Ok(match aufrufer.rolle {
        Rolle::Admin => Sichtbarkeit::Alle,
        Rolle::Mitglied => Sichtbarkeit::NurZugewiesen(id),
    })
}

/// POST /tasks
pub fn erstellen(aufrufer: &Aufrufer) -> AuthResult<UserId> {
    aufrufer.admin_erforderlich()
}

/// POST /tasks/{id}/users
pub fn zuweisen(aufrufer: &Aufrufer) -> AuthResult<UserId> {
    aufrufer.admin_erforderlich()
}

/// POST /tasks/{id}/complete, erster Schritt
pub fn abschlussrecht(aufrufer: &Aufrufer) -> AuthResult<Abschlussrecht> {
    let id = aufrufer.angemeldet()?;
    Ok(match aufrufer.rolle {
        Rolle::Admin => Abschlussrecht::Uneingeschraenkt,
        Rolle::Mitglied => Abschlussrecht::ZuweisungErforderlich(id),
    })
}

/// POST /tasks/{id}/complete, zweiter Schritt fuer Mitglieder
pub fn zuweisung_verlangen(ist_zugewiesen: bool) -> AuthResult<()> {
    if ist_zugewiesen {
        Ok(())
    } else {
        Err(AuthError::Verboten(
            "Kein Zugriff auf diese Aufgabe".into(),
        ))
    }
}
