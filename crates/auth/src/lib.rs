//! taskdesk-auth – Authentifizierung und Autorisierung
//!
//! Dieses Crate implementiert:
//! - Passwort-Hashing mit Argon2id
//! - Session-Tokens (Ausstellung, HMAC-Digest, Aufloesung)
//! - Rollenaufloesung (Admin / Mitglied) pro Anfrage
//! - Zugriffsentscheidungen fuer Aufgaben-Operationen
//! - AuthService (Registrierung, Login, Logout, Profil)
//! - AufgabenService (Auflisten, Erstellen, Zuweisen, Abschliessen)

pub mod aufgaben;
pub mod error;
pub mod identitaet;
pub mod password;
pub mod rolle;
pub mod service;
pub mod session;
pub mod token;
pub mod validierung;
pub mod zugriff;

// Bequeme Re-Exporte
pub use aufgaben::{AufgabenService, NeueAufgabeEingabe};
pub use error::{AuthError, AuthResult};
pub use identitaet::{Aufrufer, Identitaet, Rolle};
pub use password::{
    passwort_hashen, passwort_hashen_blockierfrei, passwort_verifizieren,
    passwort_verifizieren_blockierfrei,
};
pub use rolle::RollenAufloeser;
pub use service::{AuthService, Registrierung};
pub use session::{AusgestellteSession, SessionManager};
pub use token::{token_ausstellen, GeheimSchluessel, TokenDigest};

#[cfg(test)]
pub(crate) mod testhilfen;
