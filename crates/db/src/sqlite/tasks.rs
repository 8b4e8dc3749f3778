//! SQLite-Implementierung des TaskRepository (Aufgaben und Zuweisungen)

use chrono::Utc;
use sqlx::Row as _;
use taskdesk_core::{TaskId, UserId};

use crate::models::{AufgabeRecord, NeueAufgabe};
use crate::repository::{DbResult, TaskRepository};
use crate::sqlite::pool::SqliteDb;
use crate::sqlite::zeitstempel_parsen;

impl TaskRepository for SqliteDb {
    async fn create(&self, data: NeueAufgabe<'_>) -> DbResult<AufgabeRecord> {
        let now = Utc::now();

        let ergebnis = sqlx::query(
            "INSERT INTO tasks (title, description, created_at, is_completed) VALUES (?, ?, ?, ?)",
        )
        .bind(data.title)
        .bind(data.description)
        .bind(now.to_rfc3339())
        .bind(data.is_completed as i64)
        .execute(&self.pool)
        .await?;

        Ok(AufgabeRecord {
            id: TaskId(ergebnis.last_insert_rowid()),
            title: data.title.to_string(),
            description: data.description.to_string(),
            created_at: now,
            is_completed: data.is_completed,
        })
    }

    async fn get(&self, id: TaskId) -> DbResult<Option<AufgabeRecord>> {
        let row = sqlx::query(
            "SELECT id, title, description, created_at, is_completed FROM tasks WHERE id = ?",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_to_aufgabe(&r)).transpose()
    }

    async fn existiert(&self, id: TaskId) -> DbResult<bool> {
        let wert: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM tasks WHERE id = ?)")
            .bind(id.0)
            .fetch_one(&self.pool)
            .await?;
        Ok(wert != 0)
    }

    async fn list_all(&self) -> DbResult<Vec<AufgabeRecord>> {
        let rows = sqlx::query(
            "SELECT id, title, description, created_at, is_completed FROM tasks ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_aufgabe).collect()
    }

    async fn list_for_user(&self, user_id: UserId) -> DbResult<Vec<AufgabeRecord>> {
        let rows = sqlx::query(
            "SELECT t.id, t.title, t.description, t.created_at, t.is_completed
             FROM tasks t
             JOIN task_users tu ON tu.task_id = t.id
             WHERE tu.user_id = ?
             ORDER BY t.id",
        )
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_aufgabe).collect()
    }

    async fn ist_zugewiesen(&self, task_id: TaskId, user_id: UserId) -> DbResult<bool> {
        let wert: i64 = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM task_users WHERE task_id = ? AND user_id = ?)",
        )
        .bind(task_id.0)
        .bind(user_id.0)
        .fetch_one(&self.pool)
        .await?;
        Ok(wert != 0)
    }

    async fn zuweisen(&self, task_id: TaskId, user_ids: &[UserId]) -> DbResult<u64> {
        let mut tx = self.pool.begin().await?;
        let mut neu = 0;

        // Primaerschluessel (task_id, user_id) macht doppelte Paare zu No-Ops
        for user_id in user_ids {
            neu += sqlx::query("INSERT OR IGNORE INTO task_users (task_id, user_id) VALUES (?, ?)")
                .bind(task_id.0)
                .bind(user_id.0)
                .execute(&mut *tx)
                .await?
                .rows_affected();
        }

        tx.commit().await?;
        Ok(neu)
    }

    async fn abschliessen(&self, id: TaskId) -> DbResult<bool> {
        let affected = sqlx::query("UPDATE tasks SET is_completed = 1 WHERE id = ?")
            .bind(id.0)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }
}

fn row_to_aufgabe(row: &sqlx::sqlite::SqliteRow) -> DbResult<AufgabeRecord> {
    let created_at: String = row.try_get("created_at")?;
    let is_completed: i64 = row.try_get("is_completed")?;

    Ok(AufgabeRecord {
        id: TaskId(row.try_get("id")?),
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        created_at: zeitstempel_parsen("created_at", &created_at)?,
        is_completed: is_completed != 0,
    })
}
