//! taskdesk-core – Gemeinsame Typen
//!
//! Dieses Crate stellt die Identifikationstypen bereit, die von allen
//! anderen Taskdesk-Crates gemeinsam genutzt werden.

pub mod types;

// Re-Exporte fuer bequemen Zugriff
pub use types::{TaskId, UserId};
