//! taskdesk-db – Datenbank-Abstraktion
//!
//! Dieses Crate stellt das Repository-Pattern bereit, das die Geschaefts-
//! logik von der konkreten Datenbank entkoppelt. Die einzige Implementierung
//! ist SQLite ueber sqlx; Migrationen werden beim Oeffnen ausgefuehrt.

pub mod error;
pub mod models;
pub mod repository;
pub mod sqlite;

pub use error::DbError;
pub use repository::{
    DatabaseConfig, DbResult, SessionRepository, TaskRepository, UserRepository,
};
pub use sqlite::SqliteDb;
