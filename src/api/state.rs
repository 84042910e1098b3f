//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Database, SessionStore};
use crate::services::{AccountService, PostService, Services};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Account session service
    pub account_service: Arc<dyn AccountService>,
    /// Post service
    pub post_service: Arc<dyn PostService>,
    /// Database connection
    pub database: Arc<Database>,
    /// Application configuration
    pub config: Config,
}

impl AppState {
    /// Create application state from the database, session store, and config.
    pub fn from_parts(
        database: Arc<Database>,
        sessions: Arc<dyn SessionStore>,
        config: Config,
    ) -> Self {
        let container = Services::from_connection(database.get_connection(), sessions);

        Self {
            account_service: container.account(),
            post_service: container.posts(),
            database,
            config,
        }
    }

    /// Create application state with manually injected services.
    pub fn new(
        account_service: Arc<dyn AccountService>,
        post_service: Arc<dyn PostService>,
        database: Arc<Database>,
        config: Config,
    ) -> Self {
        Self {
            account_service,
            post_service,
            database,
            config,
        }
    }
}
