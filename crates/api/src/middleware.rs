//! Axum-Middleware und Extractors fuer Identitaet und Rolle
//!
//! Die Middleware loest jeden vorgelegten Token zu einer Identitaet auf und
//! legt sie als Request-Extension ab. Sie lehnt nie ab. Die Rolle wird erst
//! im Extractor `AktuellerAufrufer` frisch aus dem Store gelesen.

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use taskdesk_auth::{Aufrufer, Identitaet};

use crate::cookie::{cookie_wert, SESSION_COOKIE};
use crate::error::ApiError;
use crate::state::AppState;

/// Extrahiert Bearer-Token aus Authorization-Header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Token einer Anfrage: Authorization-Header vor Cookie
pub fn token_aus_anfrage(headers: &HeaderMap) -> Option<&str> {
    bearer_token(headers).or_else(|| cookie_wert(headers, SESSION_COOKIE).filter(|t| !t.is_empty()))
}

/// Auth-Resolver: setzt fuer jede Anfrage eine `Identitaet`-Extension
pub async fn auth_resolver(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let token = token_aus_anfrage(req.headers()).map(str::to_owned);
    let identitaet = state.auth.identitaet_aufloesen(token.as_deref()).await;

    req.extensions_mut().insert(identitaet);
    next.run(req).await
}

/// Identitaet der Anfrage ohne Rollenabfrage
#[derive(Debug, Clone, Copy)]
pub struct AktuelleIdentitaet(pub Identitaet);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AktuelleIdentitaet {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(
            parts.extensions.get::<Identitaet>().copied().unwrap_or_default(),
        ))
    }
}

/// Identitaet plus aktuelle Rolle
///
/// Scheitert nur, wenn die Rolle eines angemeldeten Benutzers nicht
/// bestimmt werden kann (500). Anonyme Aufrufer werden durchgereicht; die
/// 401 entscheidet der Handler.
#[derive(Debug, Clone, Copy)]
pub struct AktuellerAufrufer(pub Aufrufer);

#[async_trait]
impl FromRequestParts<AppState> for AktuellerAufrufer {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AktuelleIdentitaet(identitaet) =
            AktuelleIdentitaet::from_request_parts(parts, state).await?;
        let aufrufer = state.rollen.aufloesen(identitaet).await?;
        Ok(Self(aufrufer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderValue};

    #[test]
    fn bearer_token_extrahieren() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "authorization",
            HeaderValue::from_static("Bearer mein_token_123"),
        );
        assert_eq!(bearer_token(&headers), Some("mein_token_123"));
    }

    #[test]
    fn bearer_token_fehlt() {
        let headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn header_vor_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("session_token=aus_cookie"));
        assert_eq!(token_aus_anfrage(&headers), Some("aus_cookie"));

        headers.insert("authorization", HeaderValue::from_static("Bearer aus_header"));
        assert_eq!(token_aus_anfrage(&headers), Some("aus_header"));
    }

    #[test]
    fn leeres_cookie_ist_kein_token() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("session_token="));
        assert_eq!(token_aus_anfrage(&headers), None);
    }
}
