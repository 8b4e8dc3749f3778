//! SQLite-Backend-Implementierungen fuer alle Repository-Traits

pub mod pool;
pub mod sessions;
pub mod tasks;
pub mod users;

pub use pool::SqliteDb;

use chrono::{DateTime, Utc};

use crate::error::DbError;

/// Parst einen als RFC 3339 gespeicherten Zeitstempel
pub(crate) fn zeitstempel_parsen(spalte: &str, wert: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(wert)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DbError::intern(format!("Ungueltiger Zeitstempel in {spalte} '{wert}': {e}")))
}

/// Erkennt UNIQUE-/PRIMARY-KEY-Verletzungen
pub(crate) fn ist_unique_verletzung(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}
