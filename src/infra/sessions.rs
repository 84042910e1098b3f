//! Redis-backed session store.
//!
//! Maps an opaque, cryptographically random token to a user identifier with
//! a TTL. Expiry is owned here: an expired record simply disappears and the
//! session reads as anonymous.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError};
use uuid::Uuid;

use crate::config::{Config, SESSION_KEY_PREFIX};
use crate::domain::SessionContext;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Session store contract: create/read/destroy for the token -> user binding.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Bind the session to a user, issuing a fresh token.
    ///
    /// Always rotates: any previous token on the context is invalidated, so
    /// a login over an existing session cannot ride the old token.
    async fn bind(&self, session: &mut SessionContext, user_id: Uuid) -> AppResult<()>;

    /// Resolve the user identifier the session is bound to, if any.
    async fn current_user_id(&self, session: &SessionContext) -> AppResult<Option<Uuid>>;

    /// Destroy the backing record and clear the token.
    ///
    /// Calling with an anonymous session is benign. The token is only
    /// cleared once the record is confirmed gone.
    async fn destroy(&self, session: &mut SessionContext) -> AppResult<()>;
}

/// Concrete implementation of SessionStore backed by Redis.
#[derive(Clone)]
pub struct RedisSessionStore {
    connection: ConnectionManager,
    ttl_seconds: u64,
}

impl RedisSessionStore {
    /// Connect to Redis using the configured URL and session TTL.
    pub async fn connect(config: &Config) -> Result<Self, RedisError> {
        let client = Client::open(config.redis_url.as_str())?;
        let connection = ConnectionManager::new(client).await?;

        Ok(Self {
            connection,
            ttl_seconds: config.session_ttl_seconds,
        })
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn bind(&self, session: &mut SessionContext, user_id: Uuid) -> AppResult<()> {
        let mut conn = self.connection.clone();

        if let Some(old) = session.clear() {
            let _: () = conn
                .del(session_key(&old))
                .await
                .map_err(session_error)?;
        }

        let token = generate_token();
        conn.set_ex::<_, _, ()>(session_key(&token), user_id.to_string(), self.ttl_seconds)
            .await
            .map_err(session_error)?;

        session.set_token(token);
        Ok(())
    }

    async fn current_user_id(&self, session: &SessionContext) -> AppResult<Option<Uuid>> {
        let Some(token) = session.token() else {
            return Ok(None);
        };

        let mut conn = self.connection.clone();
        let value: Option<String> = conn
            .get(session_key(token))
            .await
            .map_err(session_error)?;

        match value {
            Some(raw) => match raw.parse::<Uuid>() {
                Ok(user_id) => Ok(Some(user_id)),
                Err(_) => {
                    // Corrupted record; treat as an expired session.
                    tracing::warn!("session record held a malformed user id");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    async fn destroy(&self, session: &mut SessionContext) -> AppResult<()> {
        let Some(token) = session.token().map(str::to_owned) else {
            return Ok(());
        };

        let mut conn = self.connection.clone();
        let _: () = conn
            .del(session_key(&token))
            .await
            .map_err(session_error)?;

        session.clear();
        Ok(())
    }
}

/// Redis key for a session token.
fn session_key(token: &str) -> String {
    format!("{}{}", SESSION_KEY_PREFIX, token)
}

/// Issue a fresh opaque session token (128 random bits, hex-encoded).
fn generate_token() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Wrap a Redis failure as an internal error.
fn session_error(err: RedisError) -> AppError {
    AppError::internal(format!("Session store error: {}", err))
}
