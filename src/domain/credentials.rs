//! Credential input and field-level validation.
//!
//! Validation is an explicit function over a plain struct: the rules live
//! here, next to the data, instead of in derive metadata. Expected failures
//! come back as `FieldError`s suitable for direct display next to the
//! offending form field.

use serde::Deserialize;
use utoipa::ToSchema;

use crate::config::{MIN_PASSWORD_LENGTH, MIN_USERNAME_LENGTH};

/// A structured error naming the input field it concerns.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, ToSchema)]
pub struct FieldError {
    /// The offending input field ("username" or "password")
    pub field: String,
    /// Human-readable message for display
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Transient username/password input.
///
/// Discarded after hashing or verification; deliberately not serializable
/// and redacted in debug output so the plain password can never leak into
/// logs or responses.
#[derive(Clone, Deserialize, ToSchema)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    /// Check length rules, returning one error per offending field.
    ///
    /// Lengths are counted in characters, not bytes.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if self.username.chars().count() < MIN_USERNAME_LENGTH {
            errors.push(FieldError::new(
                "username",
                format!("length must be greater than {}", MIN_USERNAME_LENGTH - 1),
            ));
        }

        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.push(FieldError::new(
                "password",
                format!("length must be greater than {}", MIN_PASSWORD_LENGTH - 1),
            ));
        }

        errors
    }
}
