//! Session-Tokens: Ausstellung und HMAC-Digest
//!
//! Ein Token ist 32 Byte aus der Zufallsquelle des Betriebssystems,
//! kodiert als URL-sicheres Base64 ohne Padding (43 Zeichen). Gespeichert
//! wird nie der Token selbst, sondern nur `hex(HMAC-SHA256(schluessel, token))`.
//! Der Digest ist deterministisch, damit ein vorgelegter Token per
//! Gleichheitssuche gefunden werden kann.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use rand::{rngs::OsRng, RngCore};
use sha2::Sha256;

use crate::error::{AuthError, AuthResult};

type HmacSha256 = Hmac<Sha256>;

/// Anzahl Zufallsbytes pro Token (256 Bit)
pub const TOKEN_BYTES: usize = 32;

/// Stellt einen neuen Session-Token aus
///
/// Ist die Zufallsquelle nicht verfuegbar, wird ein Fehler geliefert;
/// es gibt keinen Rueckfall auf schwaechere Quellen.
pub fn token_ausstellen() -> AuthResult<String> {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| AuthError::Zufallsquelle(e.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

/// Prozessweiter geheimer Schluessel fuer den Token-Digest
///
/// Wird einmal beim Start aus der Konfiguration gebaut. Leere Schluessel
/// werden abgelehnt.
#[derive(Clone)]
pub struct GeheimSchluessel(Vec<u8>);

impl GeheimSchluessel {
    pub fn neu(bytes: impl Into<Vec<u8>>) -> AuthResult<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(AuthError::SchluesselFehlt);
        }
        Ok(Self(bytes))
    }

    /// Baut den Schluessel aus einem optionalen Konfigurationswert
    pub fn aus_konfig(wert: Option<&str>) -> AuthResult<Self> {
        match wert.map(str::trim) {
            Some(s) if !s.is_empty() => Self::neu(s.as_bytes()),
            _ => Err(AuthError::SchluesselFehlt),
        }
    }
}

impl std::fmt::Debug for GeheimSchluessel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("GeheimSchluessel(***)")
    }
}

/// Berechnet Token-Digests
#[derive(Clone)]
pub struct TokenDigest {
    /// Bereits mit dem Schluessel initialisierter MAC, wird pro Digest geklont
    mac: HmacSha256,
}

impl TokenDigest {
    pub fn neu(schluessel: &GeheimSchluessel) -> AuthResult<Self> {
        let mac = HmacSha256::new_from_slice(&schluessel.0)
            .map_err(|e| AuthError::intern(format!("HMAC-Schluessel ungueltig: {e}")))?;
        Ok(Self { mac })
    }

    /// Hex-kodierter HMAC-SHA256 ueber den Token (64 Zeichen)
    pub fn digest(&self, token: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

impl std::fmt::Debug for TokenDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenDigest").finish_non_exhaustive()
    }
}
