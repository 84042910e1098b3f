//! Service container - wires infrastructure into application services.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::{AccountManager, AccountService, PostManager, PostService};
use crate::infra::{PostStore, SessionStore, UserStore};

/// Concrete container holding all application services.
pub struct Services {
    account_service: Arc<dyn AccountService>,
    post_service: Arc<dyn PostService>,
}

impl Services {
    /// Create a container with manually injected services
    pub fn new(
        account_service: Arc<dyn AccountService>,
        post_service: Arc<dyn PostService>,
    ) -> Self {
        Self {
            account_service,
            post_service,
        }
    }

    /// Create a container from a database connection and session store
    pub fn from_connection(db: DatabaseConnection, sessions: Arc<dyn SessionStore>) -> Self {
        let users = Arc::new(UserStore::new(db.clone()));
        let posts = Arc::new(PostStore::new(db));

        Self {
            account_service: Arc::new(AccountManager::new(users, sessions)),
            post_service: Arc::new(PostManager::new(posts)),
        }
    }

    /// Get the account session service
    pub fn account(&self) -> Arc<dyn AccountService> {
        self.account_service.clone()
    }

    /// Get the post service
    pub fn posts(&self) -> Arc<dyn PostService> {
        self.post_service.clone()
    }
}
