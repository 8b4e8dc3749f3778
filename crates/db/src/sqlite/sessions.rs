//! SQLite-Implementierung des SessionRepository

use chrono::Utc;
use sqlx::Row as _;
use taskdesk_core::UserId;

use crate::error::DbError;
use crate::models::SessionRecord;
use crate::repository::{DbResult, SessionRepository};
use crate::sqlite::pool::SqliteDb;
use crate::sqlite::{ist_unique_verletzung, zeitstempel_parsen};

impl SessionRepository for SqliteDb {
    async fn create(&self, token_hash: &str, user_id: UserId) -> DbResult<SessionRecord> {
        let now = Utc::now();

        let ergebnis = sqlx::query(
            "INSERT INTO sessions (token_hash, user_id, created_at) VALUES (?, ?, ?)",
        )
        .bind(token_hash)
        .bind(user_id.0)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if ist_unique_verletzung(&e) {
                DbError::Eindeutigkeit("Session-Digest bereits vorhanden".into())
            } else {
                DbError::Sqlx(e)
            }
        })?;

        Ok(SessionRecord {
            id: ergebnis.last_insert_rowid(),
            token_hash: token_hash.to_string(),
            user_id,
            created_at: now,
        })
    }

    async fn get_by_hash(&self, token_hash: &str) -> DbResult<Option<SessionRecord>> {
        let row = sqlx::query(
            "SELECT id, token_hash, user_id, created_at FROM sessions WHERE token_hash = ?",
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_to_session(&r)).transpose()
    }

    async fn delete_by_hash(&self, token_hash: &str) -> DbResult<bool> {
        let affected = sqlx::query("DELETE FROM sessions WHERE token_hash = ?")
            .bind(token_hash)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }
}

fn row_to_session(row: &sqlx::sqlite::SqliteRow) -> DbResult<SessionRecord> {
    let created_at: String = row.try_get("created_at")?;

    Ok(SessionRecord {
        id: row.try_get("id")?,
        token_hash: row.try_get("token_hash")?,
        user_id: UserId(row.try_get("user_id")?),
        created_at: zeitstempel_parsen("created_at", &created_at)?,
    })
}
