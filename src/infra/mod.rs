//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections, migrations, and repositories
//! - Redis-backed session storage

pub mod db;
pub mod repositories;
pub mod sessions;

pub use db::{Database, Migrator};
pub use repositories::{PostRepository, PostStore, UserRepository, UserStore};
pub use sessions::{RedisSessionStore, SessionStore};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockPostRepository, MockUserRepository};
#[cfg(any(test, feature = "test-utils"))]
pub use sessions::MockSessionStore;
