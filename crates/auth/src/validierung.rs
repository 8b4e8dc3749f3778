//! Eingabepruefung fuer Login, Registrierung und Aufgaben
//!
//! Felder gelten als leer, wenn sie nur aus Leerzeichen bestehen. Die erste
//! Verletzung gewinnt; der Fehler nennt das betroffene Feld.

use crate::error::{AuthError, AuthResult};

/// Mindestlaenge fuer neue Passwoerter (in Zeichen)
pub const PASSWORT_MIN_LAENGE: usize = 6;

fn pflichtfeld(feld: &str, wert: &str) -> AuthResult<()> {
    if wert.trim().is_empty() {
        return Err(AuthError::validierung(feld, format!("{feld} ist erforderlich")));
    }
    Ok(())
}

pub fn anmeldung_pruefen(login: &str, passwort: &str) -> AuthResult<()> {
    pflichtfeld("login", login)?;
    pflichtfeld("password", passwort)
}

pub fn registrierung_pruefen(
    login: &str,
    family: &str,
    name: &str,
    surname: &str,
    passwort: &str,
) -> AuthResult<()> {
    pflichtfeld("login", login)?;
    pflichtfeld("family", family)?;
    pflichtfeld("name", name)?;
    pflichtfeld("surname", surname)?;
    pflichtfeld("password", passwort)?;

    if passwort.chars().count() < PASSWORT_MIN_LAENGE {
        return Err(AuthError::validierung(
            "password",
            format!("password muss mindestens {PASSWORT_MIN_LAENGE} Zeichen lang sein"),
        ));
    }
    Ok(())
}

pub fn aufgabe_pruefen(title: &str) -> AuthResult<()> {
    pflichtfeld("title", title)
}
