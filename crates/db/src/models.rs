//! Datenbankmodelle fuer Taskdesk
//!
//! Diese Typen repraesentieren Datensaetze aus der Datenbank.
//! Sie sind von den API-Antworttypen getrennt und dienen als reine
//! Datenuebertragungsobjekte.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskdesk_core::{TaskId, UserId};

// ---------------------------------------------------------------------------
// Benutzer
// ---------------------------------------------------------------------------

/// Benutzer-Datensatz aus der Datenbank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenutzerRecord {
    pub id: UserId,
    pub login: String,
    pub family: String,
    pub name: String,
    pub surname: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Daten zum Erstellen eines neuen Benutzers
#[derive(Debug, Clone)]
pub struct NeuerBenutzer<'a> {
    pub login: &'a str,
    pub family: &'a str,
    pub name: &'a str,
    pub surname: &'a str,
    pub password_hash: &'a str,
    pub is_admin: bool,
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

/// Session-Datensatz; enthaelt nur den Digest, nie den Klartext-Token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub id: i64,
    pub token_hash: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Aufgaben
// ---------------------------------------------------------------------------

/// Aufgaben-Datensatz aus der Datenbank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AufgabeRecord {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub is_completed: bool,
}

/// Daten zum Erstellen einer neuen Aufgabe
#[derive(Debug, Clone, Default)]
pub struct NeueAufgabe<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub is_completed: bool,
}
