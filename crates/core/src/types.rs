//! Gemeinsame Identifikationstypen fuer Taskdesk
//!
//! Alle IDs verwenden das Newtype-Pattern um Verwechslungen zwischen
//! Benutzer- und Aufgaben-IDs zur Compilezeit auszuschliessen.
//! Die Datenbank vergibt fortlaufende positive Ganzzahlen.

use serde::{Deserialize, Serialize};

/// Eindeutige Benutzer-ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    /// Nimmt einen Rohwert nur an wenn er eine positive Ganzzahl ist
    pub fn aus_roh(wert: i64) -> Option<Self> {
        (wert > 0).then_some(Self(wert))
    }

    /// Parst eine ID aus einem Pfadsegment
    pub fn parsen(s: &str) -> Option<Self> {
        s.trim().parse::<i64>().ok().and_then(Self::aus_roh)
    }

    /// Gibt den inneren Wert zurueck
    pub fn inner(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user:{}", self.0)
    }
}

/// Eindeutige Aufgaben-ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl TaskId {
    /// Nimmt einen Rohwert nur an wenn er eine positive Ganzzahl ist
    pub fn aus_roh(wert: i64) -> Option<Self> {
        (wert > 0).then_some(Self(wert))
    }

    /// Parst eine ID aus einem Pfadsegment
    pub fn parsen(s: &str) -> Option<Self> {
        s.trim().parse::<i64>().ok().and_then(Self::aus_roh)
    }

    /// Gibt den inneren Wert zurueck
    pub fn inner(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "task:{}", self.0)
    }
}
