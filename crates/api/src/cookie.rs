//! Session-Cookie setzen, loeschen und lesen

use axum::http::{header, HeaderMap};

pub const SESSION_COOKIE: &str = "session_token";

fn attribute(secure: bool) -> &'static str {
    if secure {
        "Path=/; HttpOnly; Secure; SameSite=Strict"
    } else {
        "Path=/; HttpOnly; SameSite=Strict"
    }
}

/// Set-Cookie-Wert fuer einen frisch ausgestellten Token
pub fn session_setzen(token: &str, secure: bool) -> String {
    format!("{SESSION_COOKIE}={token}; {}", attribute(secure))
}

/// Set-Cookie-Wert, der das Session-Cookie sofort verfallen laesst
pub fn session_loeschen(secure: bool) -> String {
    format!(
        "{SESSION_COOKIE}=; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT; {}",
        attribute(secure)
    )
}

/// Liest einen Cookie-Wert aus allen `Cookie`-Headern
pub fn cookie_wert<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|s| s.split(';'))
        .filter_map(|paar| paar.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.trim())
}
