//! Account session service - identity lifecycle and session management.
//!
//! Owns the four account operations: register, login, me, logout. Expected
//! failures (bad input, duplicate username, wrong credentials) come back as
//! field-attributed data in `AuthAttempt`; only infrastructure failures
//! travel the error channel.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Credentials, FieldError, Password, SessionContext, User};
use crate::errors::{AppError, AppResult};
use crate::infra::{SessionStore, UserRepository};

/// Outcome of a register or login attempt.
#[derive(Debug, Clone)]
pub enum AuthAttempt {
    /// The account operation succeeded; the session is now bound.
    Success(User),
    /// The attempt was rejected; each error names the offending field.
    Rejected(Vec<FieldError>),
}

impl AuthAttempt {
    fn rejected(field: &'static str, message: impl Into<String>) -> Self {
        AuthAttempt::Rejected(vec![FieldError::new(field, message)])
    }
}

/// Account service trait for dependency injection.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Create an account and log the new user in immediately.
    async fn register(
        &self,
        credentials: Credentials,
        session: &mut SessionContext,
    ) -> AppResult<AuthAttempt>;

    /// Verify credentials and bind the session to the user.
    async fn login(
        &self,
        credentials: Credentials,
        session: &mut SessionContext,
    ) -> AppResult<AuthAttempt>;

    /// Resolve the currently authenticated user, if any.
    ///
    /// An anonymous session is a normal state, not an error.
    async fn me(&self, session: &SessionContext) -> AppResult<Option<User>>;

    /// Terminate the session. Returns false when termination could not be
    /// confirmed; never errors.
    async fn logout(&self, session: &mut SessionContext) -> bool;
}

/// Concrete implementation of AccountService using the user and session stores.
pub struct AccountManager {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionStore>,
}

impl AccountManager {
    /// Create new account service instance
    pub fn new(users: Arc<dyn UserRepository>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { users, sessions }
    }
}

#[async_trait]
impl AccountService for AccountManager {
    async fn register(
        &self,
        credentials: Credentials,
        session: &mut SessionContext,
    ) -> AppResult<AuthAttempt> {
        // Fail fast: no hashing or store work for invalid input.
        let errors = credentials.validate();
        if !errors.is_empty() {
            return Ok(AuthAttempt::Rejected(errors));
        }

        let Credentials { username, password } = credentials;
        let password_hash = Password::hash(&password)?.into_string();

        let user = match self.users.create(username, password_hash).await {
            Ok(user) => user,
            Err(AppError::Conflict(_)) => {
                return Ok(AuthAttempt::rejected("username", "username already exists"));
            }
            Err(err) => return Err(err),
        };

        // Log the new user in immediately.
        self.sessions.bind(session, user.id).await?;
        tracing::info!(username = %user.username, "registered new user");

        Ok(AuthAttempt::Success(user))
    }

    async fn login(
        &self,
        credentials: Credentials,
        session: &mut SessionContext,
    ) -> AppResult<AuthAttempt> {
        let Credentials { username, password } = credentials;

        let Some(user) = self.users.find_by_username(&username).await? else {
            // Discloses account existence; the frontend relies on this
            // message to point at the username field.
            return Ok(AuthAttempt::rejected(
                "username",
                "that username doesn't exist",
            ));
        };

        if !Password::from_hash(user.password_hash.clone()).verify(&password) {
            return Ok(AuthAttempt::rejected("password", "incorrect password"));
        }

        self.sessions.bind(session, user.id).await?;
        tracing::debug!(username = %user.username, "user logged in");

        Ok(AuthAttempt::Success(user))
    }

    async fn me(&self, session: &SessionContext) -> AppResult<Option<User>> {
        let Some(user_id) = self.sessions.current_user_id(session).await? else {
            return Ok(None);
        };

        // A dangling id (user removed out of band) reads as anonymous.
        self.users.find_by_id(user_id).await
    }

    async fn logout(&self, session: &mut SessionContext) -> bool {
        match self.sessions.destroy(session).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!("failed to destroy session: {}", err);
                false
            }
        }
    }
}
