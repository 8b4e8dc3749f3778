//! Aufgaben-Service: Auflisten, Erstellen, Zuweisen, Abschliessen
//!
//! Jede Operation fragt zuerst die Zugriffsentscheidung ab und beruehrt
//! den Store erst danach. Ein anonymer Aufrufer erhaelt daher immer 401,
//! bevor eine 403 oder 404 etwas ueber vorhandene Daten verraten koennte.

use std::sync::Arc;

use serde::Deserialize;
use taskdesk_core::{TaskId, UserId};
use taskdesk_db::{
    models::{AufgabeRecord, NeueAufgabe},
    repository::{TaskRepository, UserRepository},
};

use crate::{
    error::{AuthError, AuthResult},
    identitaet::Aufrufer,
    validierung,
    zugriff::{self, Abschlussrecht, Sichtbarkeit},
};

/// Eingabe fuer POST /tasks
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NeueAufgabeEingabe {
    pub title: String,
    pub description: Option<String>,
    pub is_completed: Option<bool>,
}

pub struct AufgabenService<T: TaskRepository, U: UserRepository> {
    task_repo: Arc<T>,
    user_repo: Arc<U>,
}

impl<T: TaskRepository, U: UserRepository> AufgabenService<T, U> {
    pub fn neu(task_repo: Arc<T>, user_repo: Arc<U>) -> Self {
        Self { task_repo, user_repo }
    }

    /// Alle Aufgaben fuer Admins, sonst nur die zugewiesenen
    pub async fn auflisten(&self, aufrufer: &Aufrufer) -> AuthResult<Vec<AufgabeRecord>> {
        let aufgaben = match zugriff::sichtbarkeit(aufrufer)? {
            Sichtbarkeit::Alle => self.task_repo.list_all().await?,
            Sichtbarkeit::NurZugewiesen(user_id) => self.task_repo.list_for_user(user_id).await?,
        };
        Ok(aufgaben)
    }

    pub async fn erstellen(
        &self,
        aufrufer: &Aufrufer,
        eingabe: NeueAufgabeEingabe,
    ) -> AuthResult<AufgabeRecord> {
        let admin = zugriff::erstellen(aufrufer)?;
        validierung::aufgabe_pruefen(&eingabe.title)?;

        let aufgabe = self
            .task_repo
            .create(NeueAufgabe {
                title: &eingabe.title,
                description: eingabe.description.as_deref().unwrap_or_default(),
                is_completed: eingabe.is_completed.unwrap_or(false),
            })
            .await?;

        tracing::info!(task_id = %aufgabe.id, admin = %admin, "Aufgabe erstellt");
        Ok(aufgabe)
    }

    /// Weist Benutzer einer Aufgabe zu
    ///
    /// Alle IDs werden geprueft, bevor etwas geschrieben wird. Bereits
    /// bestehende Zuweisungen werden still uebersprungen. Gibt die Anzahl
    /// neu angelegter Zuweisungen zurueck.
    pub async fn zuweisen(
        &self,
        aufrufer: &Aufrufer,
        task_id: TaskId,
        user_ids: &[i64],
    ) -> AuthResult<u64> {
        zugriff::zuweisen(aufrufer)?;

        if user_ids.is_empty() {
            return Err(AuthError::validierung(
                "user_ids",
                "user_ids darf nicht leer sein",
            ));
        }

        if !self.task_repo.existiert(task_id).await? {
            return Err(AuthError::NichtGefunden(format!("Aufgabe {}", task_id.inner())));
        }

        let mut ziele = Vec::with_capacity(user_ids.len());
        for &roh in user_ids {
            let user_id = UserId::aus_roh(roh).ok_or_else(|| {
                AuthError::validierung("user_ids", "Benutzer-ID muss eine positive Ganzzahl sein")
            })?;
            if !self.user_repo.existiert(user_id).await? {
                return Err(AuthError::NichtGefunden(format!("Benutzer {}", user_id.inner())));
            }
            ziele.push(user_id);
        }

        let neu = self.task_repo.zuweisen(task_id, &ziele).await?;
        tracing::info!(task_id = %task_id, angefragt = ziele.len(), neu, "Benutzer zugewiesen");
        Ok(neu)
    }

    /// Markiert eine Aufgabe als erledigt
    pub async fn abschliessen(&self, aufrufer: &Aufrufer, task_id: TaskId) -> AuthResult<()> {
        match zugriff::abschlussrecht(aufrufer)? {
            Abschlussrecht::Uneingeschraenkt => {}
            Abschlussrecht::ZuweisungErforderlich(user_id) => {
                let zugewiesen = self.task_repo.ist_zugewiesen(task_id, user_id).await?;
                zugriff::zuweisung_verlangen(zugewiesen)?;
            }
        }

        if !self.task_repo.abschliessen(task_id).await? {
            return Err(AuthError::NichtGefunden(format!("Aufgabe {}", task_id.inner())));
        }

        tracing::info!(task_id = %task_id, "Aufgabe abgeschlossen");
        Ok(())
    }
}
