//! Integration-Tests fuer die REST-API (kompletter Router, In-Memory SQLite)

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use taskdesk_api::{server::app, AppState, RestServerKonfig};
use taskdesk_auth::{GeheimSchluessel, TokenDigest};
use taskdesk_db::SqliteDb;
use tower::ServiceExt;

struct Antwort {
    status: StatusCode,
    set_cookie: Option<String>,
    body: Value,
}

struct Testserver {
    app: Router,
    state: AppState,
}

impl Testserver {
    async fn neu() -> Self {
        Self::mit_konfig(RestServerKonfig::default()).await
    }

    async fn mit_konfig(konfig: RestServerKonfig) -> Self {
        let db = SqliteDb::in_memory()
            .await
            .expect("In-Memory DB konnte nicht erstellt werden");
        let digest = TokenDigest::neu(&GeheimSchluessel::neu("test-geheimnis").unwrap()).unwrap();
        let state = AppState::neu(db, digest, true);
        let app = app(state.clone(), &konfig);
        Self { app, state }
    }

    async fn senden(&self, req: Request<Body>) -> Antwort {
        let resp = self.app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let set_cookie = resp
            .headers()
            .get(header::SET_COOKIE)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        Antwort { status, set_cookie, body }
    }

    async fn get(&self, uri: &str, token: Option<&str>) -> Antwort {
        let mut req = Request::builder().method("GET").uri(uri);
        if let Some(t) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
        }
        self.senden(req.body(Body::empty()).unwrap()).await
    }

    async fn post_roh(&self, uri: &str, token: Option<&str>, body: &str) -> Antwort {
        let mut req = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(t) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
        }
        self.senden(req.body(Body::from(body.to_string())).unwrap()).await
    }

    async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> Antwort {
        self.post_roh(uri, token, &body.to_string()).await
    }

    /// Registriert einen Benutzer und gibt seine ID zurueck
    async fn registrieren(&self, login: &str, passwort: &str) -> i64 {
        let a = self
            .post(
                "/users",
                None,
                json!({
                    "login": login,
                    "family": "Muster",
                    "name": login,
                    "surname": "M.",
                    "password": passwort,
                }),
            )
            .await;
        assert_eq!(a.status, StatusCode::CREATED, "{}", a.body);
        a.body["user"]["id"].as_i64().unwrap()
    }

    async fn anmelden(&self, login: &str, passwort: &str) -> String {
        let a = self
            .post("/auth/login", None, json!({ "login": login, "password": passwort }))
            .await;
        assert_eq!(a.status, StatusCode::OK, "{}", a.body);
        a.body["token"].as_str().unwrap().to_string()
    }

    async fn admin(&self, login: &str) -> String {
        self.registrieren(login, "adminpass").await;
        self.state
            .auth
            .admins_ernennen(&[login.to_string()])
            .await
            .unwrap();
        self.anmelden(login, "adminpass").await
    }

    async fn aufgabe(&self, admin: &str, title: &str) -> i64 {
        let a = self.post("/tasks", Some(admin), json!({ "title": title })).await;
        assert_eq!(a.status, StatusCode::CREATED, "{}", a.body);
        a.body["task"]["id"].as_i64().unwrap()
    }
}

#[tokio::test]
async fn login_me_logout_szenario() {
    let s = Testserver::neu().await;
    let alice = s.registrieren("alice", "secret1").await;

    let login = s
        .post("/auth/login", None, json!({ "login": "alice", "password": "secret1" }))
        .await;
    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.body["status"], "ok");
    assert_eq!(login.body["user"]["id"], alice);
    assert_eq!(login.body["user"]["is_admin"], false);
    let token = login.body["token"].as_str().unwrap().to_string();
    assert_eq!(token.len(), 43);

    let cookie = login.set_cookie.unwrap();
    assert!(cookie.starts_with(&format!("session_token={token};")));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Secure"));
    assert!(cookie.contains("SameSite=Strict"));

    let me = s.get("/auth/me", Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["id"], alice);
    assert_eq!(me.body["family"], "Muster");

    let logout = s.post_roh("/auth/logout", Some(&token), "").await;
    assert_eq!(logout.status, StatusCode::OK);
    assert_eq!(logout.body["status"], "ok");
    assert!(logout.set_cookie.unwrap().contains("Max-Age=0"));

    let danach = s.get("/auth/me", Some(&token)).await;
    assert_eq!(danach.status, StatusCode::UNAUTHORIZED);
    assert_eq!(danach.body["error"], "not_authorized");
}

#[tokio::test]
async fn cookie_wird_als_token_akzeptiert() {
    let s = Testserver::neu().await;
    s.registrieren("alice", "secret1").await;
    let token = s.anmelden("alice", "secret1").await;

    let req = Request::builder()
        .method("GET")
        .uri("/auth/me")
        .header(header::COOKIE, format!("session_token={token}"))
        .body(Body::empty())
        .unwrap();
    assert_eq!(s.senden(req).await.status, StatusCode::OK);
}

#[tokio::test]
async fn logout_ist_idempotent() {
    let s = Testserver::neu().await;

    let ohne = s.post_roh("/auth/logout", None, "").await;
    assert_eq!(ohne.status, StatusCode::OK);
    assert!(ohne.set_cookie.unwrap().contains("Expires=Thu, 01 Jan 1970 00:00:00 GMT"));

    let unbekannt = s.post_roh("/auth/logout", Some("gibt-es-nicht"), "").await;
    assert_eq!(unbekannt.status, StatusCode::OK);
}

#[tokio::test]
async fn login_fehler() {
    let s = Testserver::neu().await;
    s.registrieren("alice", "secret1").await;

    let falsch = s
        .post("/auth/login", None, json!({ "login": "alice", "password": "falsch1" }))
        .await;
    assert_eq!(falsch.status, StatusCode::UNAUTHORIZED);
    assert_eq!(falsch.body["error"], "invalid_credentials");
    assert!(falsch.set_cookie.is_none());

    let leer = s.post("/auth/login", None, json!({ "login": "alice" })).await;
    assert_eq!(leer.status, StatusCode::BAD_REQUEST);
    assert_eq!(leer.body["error"], "validation_error");
    assert_eq!(leer.body["field"], "password");

    let kaputt = s.post_roh("/auth/login", None, "{nicht json").await;
    assert_eq!(kaputt.status, StatusCode::BAD_REQUEST);
    assert_eq!(kaputt.body["error"], "invalid_json");
}

#[tokio::test]
async fn benutzer_endpunkte() {
    let s = Testserver::neu().await;
    let alice = s.registrieren("alice", "secret1").await;

    let doppelt = s
        .post(
            "/users",
            None,
            json!({ "login": "alice", "family": "a", "name": "b", "surname": "c", "password": "secret1" }),
        )
        .await;
    assert_eq!(doppelt.status, StatusCode::CONFLICT);
    assert_eq!(doppelt.body["error"], "conflict");

    let kurz = s
        .post(
            "/users",
            None,
            json!({ "login": "bob", "family": "a", "name": "b", "surname": "c", "password": "123" }),
        )
        .await;
    assert_eq!(kurz.status, StatusCode::BAD_REQUEST);
    assert_eq!(kurz.body["field"], "password");

    let liste = s.get("/users", None).await;
    assert_eq!(liste.status, StatusCode::OK);
    let liste = liste.body.as_array().unwrap().clone();
    assert_eq!(liste.len(), 1);
    assert!(liste[0].get("password_hash").is_none());
    assert!(liste[0].get("login").is_none());

    let einer = s.get(&format!("/users/{alice}"), None).await;
    assert_eq!(einer.status, StatusCode::OK);
    assert_eq!(einer.body["id"], alice);

    assert_eq!(s.get("/users/0", None).await.status, StatusCode::BAD_REQUEST);
    assert_eq!(s.get("/users/abc", None).await.status, StatusCode::BAD_REQUEST);
    assert_eq!(s.get("/users/999", None).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn aufgabe_erstellen_401_vor_403() {
    let s = Testserver::neu().await;
    s.registrieren("bob", "secret1").await;
    let bob = s.anmelden("bob", "secret1").await;

    let anonym = s.post("/tasks", None, json!({ "title": "x" })).await;
    assert_eq!(anonym.status, StatusCode::UNAUTHORIZED);

    // Auch mit kaputtem Body zuerst 401
    let anonym_kaputt = s.post_roh("/tasks", None, "{").await;
    assert_eq!(anonym_kaputt.status, StatusCode::UNAUTHORIZED);

    let mitglied = s.post("/tasks", Some(&bob), json!({ "title": "x" })).await;
    assert_eq!(mitglied.status, StatusCode::FORBIDDEN);
    assert_eq!(mitglied.body["error"], "forbidden");

    let admin = s.admin("chef").await;
    let ohne_titel = s.post("/tasks", Some(&admin), json!({ "description": "d" })).await;
    assert_eq!(ohne_titel.status, StatusCode::BAD_REQUEST);
    assert_eq!(ohne_titel.body["field"], "title");

    let ok = s
        .post(
            "/tasks",
            Some(&admin),
            json!({ "title": "Bericht", "description": "Q3", "is_completed": false }),
        )
        .await;
    assert_eq!(ok.status, StatusCode::CREATED);
    assert_eq!(ok.body["status"], "ok");
    assert_eq!(ok.body["task"]["title"], "Bericht");
    assert_eq!(ok.body["task"]["description"], "Q3");
}

#[tokio::test]
async fn sichtbarkeit_nach_rolle() {
    let s = Testserver::neu().await;
    let admin = s.admin("chef").await;
    let bob_id = s.registrieren("bob", "secret1").await;
    s.registrieren("carol", "secret1").await;
    let bob = s.anmelden("bob", "secret1").await;
    let carol = s.anmelden("carol", "secret1").await;

    let t1 = s.aufgabe(&admin, "eins").await;
    s.aufgabe(&admin, "zwei").await;

    let bind = s
        .post(&format!("/tasks/{t1}/users"), Some(&admin), json!({ "user_ids": [bob_id] }))
        .await;
    assert_eq!(bind.status, StatusCode::OK);

    let alle = s.get("/tasks", Some(&admin)).await;
    assert_eq!(alle.body.as_array().unwrap().len(), 2);

    let bobs = s.get("/tasks", Some(&bob)).await;
    let bobs = bobs.body.as_array().unwrap().clone();
    assert_eq!(bobs.len(), 1);
    assert_eq!(bobs[0]["id"], t1);

    let carols = s.get("/tasks", Some(&carol)).await;
    assert!(carols.body.as_array().unwrap().is_empty());

    assert_eq!(s.get("/tasks", None).await.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn zuweisung_regeln() {
    let s = Testserver::neu().await;
    let admin = s.admin("chef").await;
    let bob_id = s.registrieren("bob", "secret1").await;
    let bob = s.anmelden("bob", "secret1").await;
    let t = s.aufgabe(&admin, "eins").await;
    let uri = format!("/tasks/{t}/users");

    let leer = s.post(&uri, Some(&admin), json!({ "user_ids": [] })).await;
    assert_eq!(leer.status, StatusCode::BAD_REQUEST);
    assert_eq!(leer.body["error"], "validation_error");

    let fehlt = s.post(&uri, Some(&admin), json!({})).await;
    assert_eq!(fehlt.status, StatusCode::BAD_REQUEST);

    let erst = s.post(&uri, Some(&admin), json!({ "user_ids": [bob_id] })).await;
    assert_eq!(erst.status, StatusCode::OK);
    assert_eq!(erst.body["bound"], 1);

    let nochmal = s.post(&uri, Some(&admin), json!({ "user_ids": [bob_id] })).await;
    assert_eq!(nochmal.status, StatusCode::OK);
    assert_eq!(nochmal.body["bound"], 0);

    let unbekannt = s.post(&uri, Some(&admin), json!({ "user_ids": [4242] })).await;
    assert_eq!(unbekannt.status, StatusCode::NOT_FOUND);

    let negativ = s.post(&uri, Some(&admin), json!({ "user_ids": [-1] })).await;
    assert_eq!(negativ.status, StatusCode::BAD_REQUEST);

    let ohne_task = s
        .post("/tasks/999/users", Some(&admin), json!({ "user_ids": [bob_id] }))
        .await;
    assert_eq!(ohne_task.status, StatusCode::NOT_FOUND);

    let kaputte_id = s
        .post("/tasks/abc/users", Some(&admin), json!({ "user_ids": [bob_id] }))
        .await;
    assert_eq!(kaputte_id.status, StatusCode::BAD_REQUEST);

    assert_eq!(
        s.post(&uri, Some(&bob), json!({ "user_ids": [bob_id] })).await.status,
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        s.post(&uri, None, json!({ "user_ids": [] })).await.status,
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn abschliessen_regeln() {
    let s = Testserver::neu().await;
    let admin = s.admin("chef").await;
    let bob_id = s.registrieren("bob", "secret1").await;
    s.registrieren("carol", "secret1").await;
    let bob = s.anmelden("bob", "secret1").await;
    let carol = s.anmelden("carol", "secret1").await;
    let t = s.aufgabe(&admin, "eins").await;
    s.post(&format!("/tasks/{t}/users"), Some(&admin), json!({ "user_ids": [bob_id] }))
        .await;
    let uri = format!("/tasks/{t}/complete");

    assert_eq!(s.post_roh(&uri, None, "").await.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        s.post_roh("/tasks/0/complete", Some(&bob), "").await.status,
        StatusCode::BAD_REQUEST
    );
    assert_eq!(s.post_roh(&uri, Some(&carol), "").await.status, StatusCode::FORBIDDEN);
    assert_eq!(
        s.post_roh("/tasks/999/complete", Some(&admin), "").await.status,
        StatusCode::NOT_FOUND
    );

    let ok = s.post_roh(&uri, Some(&bob), "").await;
    assert_eq!(ok.status, StatusCode::OK);
    assert_eq!(ok.body["status"], "ok");

    let liste = s.get("/tasks", Some(&bob)).await;
    assert_eq!(liste.body[0]["is_completed"], true);
}

#[tokio::test]
async fn health_und_fallback() {
    let s = Testserver::neu().await;

    let health = s.get("/health", None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["status"], "ok");

    let unbekannt = s.get("/gibt/es/nicht", None).await;
    assert_eq!(unbekannt.status, StatusCode::NOT_FOUND);
    assert_eq!(unbekannt.body["error"], "not_found");
}

#[tokio::test]
async fn zu_grosser_body_nach_rollenpruefung() {
    let s = Testserver::mit_konfig(RestServerKonfig {
        max_body_bytes: 128,
        ..Default::default()
    })
    .await;
    let admin = s.admin("chefin").await;
    let gross = json!({ "title": "x".repeat(200) });

    // Anonym: 401 gewinnt vor der Body-Groesse
    let a = s.post("/tasks", None, gross.clone()).await;
    assert_eq!(a.status, StatusCode::UNAUTHORIZED);
    assert_eq!(a.body["error"], "not_authorized");

    // Admin: 413 im ueblichen JSON-Format
    let a = s.post("/tasks", Some(&admin), gross).await;
    assert_eq!(a.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(a.body["error"], "payload_too_large");
    assert!(a.body["message"].is_string());

    // Kleine Bodies gehen weiter durch
    s.aufgabe(&admin, "kurz").await;
}
