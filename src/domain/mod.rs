//! Domain layer - Core business entities and value objects.
//!
//! Pure domain logic with no infrastructure dependencies.

pub mod credentials;
pub mod password;
pub mod post;
pub mod session;
pub mod user;

pub use credentials::{Credentials, FieldError};
pub use password::Password;
pub use post::{Post, PostResponse};
pub use session::SessionContext;
pub use user::{User, UserResponse};
