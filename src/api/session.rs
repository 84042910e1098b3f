//! Session cookie glue between the HTTP layer and the session context.
//!
//! The cookie carries nothing but the opaque token; everything else lives in
//! the session store. Handlers build a `SessionContext` from the incoming
//! jar, pass it into the service by parameter, and write the result back.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::config::SESSION_COOKIE_NAME;
use crate::domain::SessionContext;

/// Build a session context from the request's cookie jar.
pub fn session_from_jar(jar: &CookieJar) -> SessionContext {
    match jar.get(SESSION_COOKIE_NAME) {
        Some(cookie) => SessionContext::from_token(cookie.value()),
        None => SessionContext::anonymous(),
    }
}

/// Write the session context back to the jar.
///
/// Sets the cookie when a token is present, removes it otherwise.
pub fn apply_session(jar: CookieJar, session: &SessionContext) -> CookieJar {
    match session.token() {
        Some(token) => jar.add(
            Cookie::build((SESSION_COOKIE_NAME, token.to_owned()))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .build(),
        ),
        None => jar.remove(Cookie::build(SESSION_COOKIE_NAME).path("/").build()),
    }
}
