//! Password value object.
//!
//! Encapsulates one-way, salted hashing. Verification re-hashes the
//! candidate and compares; the plain text is never stored or recoverable.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::errors::{AppError, AppResult};

/// A stored password credential, held only in hashed form.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a plain text password with a fresh random salt.
    ///
    /// Length rules are enforced by credential validation before any
    /// hashing work happens; this only performs the transformation.
    pub fn hash(plain_text: &str) -> AppResult<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;

        Ok(Self {
            hash: hash.to_string(),
        })
    }

    /// Wrap an existing hash loaded from storage.
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    ///
    /// A malformed stored hash verifies as false rather than erroring.
    pub fn verify(&self, plain_text: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok()
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let plain = "correct horse battery";
        let password = Password::hash(plain).unwrap();

        assert!(password.verify(plain));
        assert!(!password.verify("wrong horse battery"));
    }

    #[test]
    fn test_hash_is_not_plaintext() {
        let plain = "longenough1";
        let password = Password::hash(plain).unwrap();

        assert!(!password.as_str().contains(plain));
    }

    #[test]
    fn test_round_trip_through_storage() {
        let plain = "stored then reloaded";
        let hash = Password::hash(plain).unwrap().into_string();

        let restored = Password::from_hash(hash);
        assert!(restored.verify(plain));
    }

    #[test]
    fn test_same_password_different_salts() {
        let plain = "same password twice";
        let first = Password::hash(plain).unwrap();
        let second = Password::hash(plain).unwrap();

        assert_ne!(first.as_str(), second.as_str());
        assert!(first.verify(plain));
        assert!(second.verify(plain));
    }

    #[test]
    fn test_malformed_hash_verifies_false() {
        let password = Password::from_hash("not a phc string".to_string());
        assert!(!password.verify("anything"));
    }
}
