//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on store traits for dependency
//! inversion.

mod account_service;
pub mod container;
mod post_service;

pub use account_service::{AccountManager, AccountService, AuthAttempt};
pub use container::Services;
pub use post_service::{PostManager, PostService};
