//! Passwort-Hashing mit Argon2id
//!
//! Der Arbeitsaufwand ist fest im Code verankert und nicht konfigurierbar.
//! Die Verifikation schlaegt geschlossen fehl: jeder Fehler gilt als
//! "stimmt nicht ueberein".
//!
//! Async-Aufrufer nutzen die `*_blockierfrei`-Varianten; Argon2 laeuft dann
//! im Blocking-Pool von tokio statt auf einem Worker-Thread.

use std::sync::OnceLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params, Version,
};

use crate::error::{AuthError, AuthResult};

/// Argon2id-Parameter fuer sicheres Passwort-Hashing
///
/// - Speicher: 64 MiB
/// - Iterationen: 3
/// - Parallelismus: 1
fn argon2_instanz() -> AuthResult<Argon2<'static>> {
    let params = Params::new(
        64 * 1024, // m_cost: 64 MiB
        3,         // t_cost: 3 Iterationen
        1,         // p_cost: 1 Thread
        None,      // output_len: Standard (32 Bytes)
    )
    .map_err(|e| AuthError::PasswortHashing(format!("Argon2-Parameter ungueltig: {e}")))?;

    Ok(Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params))
}

/// Hasht ein Passwort mit Argon2id und einem zufaelligen Salt
///
/// Gibt den PHC-String zurueck (inkl. Algorithmus, Parameter und Salt).
pub fn passwort_hashen(passwort: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    argon2_instanz()?
        .hash_password(passwort.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswortHashing(e.to_string()))
}

/// Verifiziert ein Passwort gegen einen gespeicherten PHC-Hash
///
/// Gibt nur bei exakter Uebereinstimmung `true` zurueck. Ein kaputter Hash
/// wird protokolliert und als Nicht-Uebereinstimmung behandelt.
pub fn passwort_verifizieren(passwort: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(e) => {
            tracing::warn!("Gespeicherter Passwort-Hash ungueltig: {e}");
            return false;
        }
    };

    let argon2 = match argon2_instanz() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!("Argon2 nicht verfuegbar: {e}");
            return false;
        }
    };

    match argon2.verify_password(passwort.as_bytes(), &parsed_hash) {
        Ok(()) => true,
        Err(argon2::password_hash::Error::Password) => false,
        Err(e) => {
            tracing::warn!("Passwort-Verifikation fehlgeschlagen: {e}");
            false
        }
    }
}

/// Fester Vergleichs-Hash mit denselben Parametern wie echte Hashes
static ATTRAPPE: OnceLock<Option<String>> = OnceLock::new();

fn attrappe_hash() -> Option<&'static str> {
    ATTRAPPE
        .get_or_init(|| match passwort_hashen("taskdesk-attrappe") {
            Ok(hash) => Some(hash),
            Err(e) => {
                tracing::error!("Vergleichs-Hash konnte nicht erzeugt werden: {e}");
                None
            }
        })
        .as_deref()
}

/// Verifiziert gegen den Vergleichs-Hash und liefert immer `false`
///
/// Fuer unbekannte Logins: der Aufwand entspricht einem falschen Passwort,
/// die Antwortzeit verraet also nicht ob der Login existiert.
pub fn attrappe_verifizieren(passwort: &str) -> bool {
    if let Some(hash) = attrappe_hash() {
        let _ = passwort_verifizieren(passwort, hash);
    }
    false
}

/// `passwort_hashen` im Blocking-Pool
pub async fn passwort_hashen_blockierfrei(passwort: String) -> AuthResult<String> {
    tokio::task::spawn_blocking(move || passwort_hashen(&passwort))
        .await
        .map_err(|e| AuthError::intern(format!("Hashing-Task abgebrochen: {e}")))?
}

/// Prueft ein Passwort im Blocking-Pool
///
/// Ohne gespeicherten Hash (unbekannter Login) wird gegen den
/// Vergleichs-Hash geprueft und `false` geliefert.
pub async fn passwort_verifizieren_blockierfrei(passwort: String, hash: Option<String>) -> bool {
    let ergebnis = tokio::task::spawn_blocking(move || match hash {
        Some(hash) => passwort_verifizieren(&passwort, &hash),
        None => attrappe_verifizieren(&passwort),
    })
    .await;

    match ergebnis {
        Ok(passt) => passt,
        Err(e) => {
            tracing::error!("Verifikations-Task abgebrochen: {e}");
            false
        }
    }
}
