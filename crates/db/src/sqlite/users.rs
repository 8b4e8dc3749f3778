//! SQLite-Implementierung des UserRepository

use chrono::Utc;
use sqlx::Row as _;
use taskdesk_core::UserId;

use crate::error::DbError;
use crate::models::{BenutzerRecord, NeuerBenutzer};
use crate::repository::{DbResult, UserRepository};
use crate::sqlite::pool::SqliteDb;
use crate::sqlite::{ist_unique_verletzung, zeitstempel_parsen};

const SPALTEN: &str =
    "id, login, family, name, surname, password_hash, is_admin, created_at, updated_at";

impl UserRepository for SqliteDb {
    async fn create(&self, data: NeuerBenutzer<'_>) -> DbResult<BenutzerRecord> {
        let now = Utc::now();
        let now_str = now.to_rfc3339();

        let ergebnis = sqlx::query(
            "INSERT INTO users (login, family, name, surname, password_hash, is_admin, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(data.login)
        .bind(data.family)
        .bind(data.name)
        .bind(data.surname)
        .bind(data.password_hash)
        .bind(data.is_admin as i64)
        .bind(&now_str)
        .bind(&now_str)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if ist_unique_verletzung(&e) {
                DbError::Eindeutigkeit(format!("Login '{}' bereits vergeben", data.login))
            } else {
                DbError::Sqlx(e)
            }
        })?;

        Ok(BenutzerRecord {
            id: UserId(ergebnis.last_insert_rowid()),
            login: data.login.to_string(),
            family: data.family.to_string(),
            name: data.name.to_string(),
            surname: data.surname.to_string(),
            password_hash: data.password_hash.to_string(),
            is_admin: data.is_admin,
            created_at: now,
            updated_at: now,
        })
    }

    async fn get_by_id(&self, id: UserId) -> DbResult<Option<BenutzerRecord>> {
        let sql = format!("SELECT {SPALTEN} FROM users WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| row_to_benutzer(&r)).transpose()
    }

    async fn get_by_login(&self, login: &str) -> DbResult<Option<BenutzerRecord>> {
        let sql = format!("SELECT {SPALTEN} FROM users WHERE login = ?");
        let row = sqlx::query(&sql)
            .bind(login)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| row_to_benutzer(&r)).transpose()
    }

    async fn list(&self) -> DbResult<Vec<BenutzerRecord>> {
        let sql = format!("SELECT {SPALTEN} FROM users ORDER BY id");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        rows.iter().map(row_to_benutzer).collect()
    }

    async fn ist_admin(&self, id: UserId) -> DbResult<Option<bool>> {
        let wert: Option<i64> = sqlx::query_scalar("SELECT is_admin FROM users WHERE id = ?")
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?;
        Ok(wert.map(|v| v != 0))
    }

    async fn existiert(&self, id: UserId) -> DbResult<bool> {
        let wert: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = ?)")
            .bind(id.0)
            .fetch_one(&self.pool)
            .await?;
        Ok(wert != 0)
    }

    async fn admin_setzen(&self, login: &str, is_admin: bool) -> DbResult<bool> {
        let affected = sqlx::query("UPDATE users SET is_admin = ?, updated_at = ? WHERE login = ?")
            .bind(is_admin as i64)
            .bind(Utc::now().to_rfc3339())
            .bind(login)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }
}

fn row_to_benutzer(row: &sqlx::sqlite::SqliteRow) -> DbResult<BenutzerRecord> {
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;
    let is_admin: i64 = row.try_get("is_admin")?;

    Ok(BenutzerRecord {
        id: UserId(row.try_get("id")?),
        login: row.try_get("login")?,
        family: row.try_get("family")?,
        name: row.try_get("name")?,
        surname: row.try_get("surname")?,
        password_hash: row.try_get("password_hash")?,
        is_admin: is_admin != 0,
        created_at: zeitstempel_parsen("created_at", &created_at)?,
        updated_at: zeitstempel_parsen("updated_at", &updated_at)?,
    })
}
