//! Account session handlers.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::session::{apply_session, session_from_jar};
use crate::api::AppState;
use crate::domain::{Credentials, FieldError, UserResponse};
use crate::errors::AppResult;
use crate::services::AuthAttempt;

/// Register/login response body.
///
/// Success carries the user; error carries field-attributed messages
/// suitable for display next to the offending form field.
#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AuthResponse {
    Success { user: UserResponse },
    Error { errors: Vec<FieldError> },
}

impl From<AuthAttempt> for AuthResponse {
    fn from(attempt: AuthAttempt) -> Self {
        match attempt {
            AuthAttempt::Success(user) => AuthResponse::Success {
                user: UserResponse::from(user),
            },
            AuthAttempt::Rejected(errors) => AuthResponse::Error { errors },
        }
    }
}

/// Create account session routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
        .route("/logout", post(logout))
}

/// Register a new account and start a session
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Auth",
    request_body = Credentials,
    responses(
        (status = 200, description = "Registration outcome; sets the session cookie on success", body = AuthResponse)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(credentials): Json<Credentials>,
) -> AppResult<(CookieJar, Json<AuthResponse>)> {
    let mut session = session_from_jar(&jar);
    let attempt = state
        .account_service
        .register(credentials, &mut session)
        .await?;

    Ok((apply_session(jar, &session), Json(attempt.into())))
}

/// Log in with username and password
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Auth",
    request_body = Credentials,
    responses(
        (status = 200, description = "Login outcome; sets the session cookie on success", body = AuthResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(credentials): Json<Credentials>,
) -> AppResult<(CookieJar, Json<AuthResponse>)> {
    let mut session = session_from_jar(&jar);
    let attempt = state
        .account_service
        .login(credentials, &mut session)
        .await?;

    Ok((apply_session(jar, &session), Json(attempt.into())))
}

/// Get the currently authenticated user
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "Auth",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Current user, or null when anonymous", body = UserResponse)
    )
)]
pub async fn me(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<Json<Option<UserResponse>>> {
    let session = session_from_jar(&jar);
    let user = state.account_service.me(&session).await?;

    Ok(Json(user.map(UserResponse::from)))
}

/// Terminate the session
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "Auth",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "True when the session was destroyed and the cookie cleared", body = bool)
    )
)]
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<bool>) {
    let mut session = session_from_jar(&jar);
    let confirmed = state.account_service.logout(&mut session).await;

    // On failure the token is kept, so the cookie stays until a retry works.
    (apply_session(jar, &session), Json(confirmed))
}
