//! Integration-Tests fuer SessionRepository (In-Memory SQLite)

use taskdesk_db::{models::NeuerBenutzer, SessionRepository, SqliteDb, UserRepository};

async fn db_mit_benutzer() -> (SqliteDb, taskdesk_core::UserId) {
    let db = SqliteDb::in_memory()
        .await
        .expect("In-Memory DB konnte nicht erstellt werden");
    let user = UserRepository::create(
        &db,
        NeuerBenutzer {
            login: "alice",
            family: "A",
            name: "Alice",
            surname: "X",
            password_hash: "hash",
            is_admin: false,
        },
    )
    .await
    .unwrap();
    (db, user.id)
}

#[tokio::test]
async fn session_speichern_und_finden() {
    let (db, user_id) = db_mit_benutzer().await;

    let session = SessionRepository::create(&db, "digest_1", user_id).await.unwrap();
    assert_eq!(session.user_id, user_id);

    let gefunden = SessionRepository::get_by_hash(&db, "digest_1")
        .await
        .unwrap()
        .expect("Session sollte gefunden werden");
    assert_eq!(gefunden, session);

    assert!(SessionRepository::get_by_hash(&db, "anderer").await.unwrap().is_none());
}

#[tokio::test]
async fn digest_ist_eindeutig() {
    let (db, user_id) = db_mit_benutzer().await;
    SessionRepository::create(&db, "digest", user_id).await.unwrap();

    let err = SessionRepository::create(&db, "digest", user_id)
        .await
        .expect_err("Doppelter Digest muss fehlschlagen");
    assert!(err.ist_eindeutigkeit());
}

#[tokio::test]
async fn session_loeschen_ist_idempotent() {
    let (db, user_id) = db_mit_benutzer().await;
    SessionRepository::create(&db, "weg", user_id).await.unwrap();

    assert!(SessionRepository::delete_by_hash(&db, "weg").await.unwrap());
    assert!(!SessionRepository::delete_by_hash(&db, "weg").await.unwrap());
    assert!(SessionRepository::get_by_hash(&db, "weg").await.unwrap().is_none());
}

#[tokio::test]
async fn session_fuer_unbekannten_benutzer_scheitert() {
    let (db, _) = db_mit_benutzer().await;
    let ergebnis = SessionRepository::create(&db, "x", taskdesk_core::UserId(999)).await;
    assert!(ergebnis.is_err(), "Fremdschluessel muss greifen");
}
