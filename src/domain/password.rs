//! Password value object.
//!
//! Owns hashing and verification so the rest of the crate only ever
//! sees opaque hash strings.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::errors::{AppError, AppResult};

/// A stored password. Holds an argon2id PHC string that embeds the
/// salt and parameters; the plaintext never leaves [`Password::new`].
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Keep the hash out of debug output.
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a plaintext password with a fresh random salt.
    ///
    /// # Errors
    /// Returns a validation error when the password is empty.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        if plain_text.is_empty() {
            return Err(AppError::validation("Password must not be empty"));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?
            .to_string();

        Ok(Self { hash })
    }

    /// Wrap a hash loaded from storage.
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// The hash string, for persisting.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Check a plaintext candidate against the stored hash. A hash
    /// that fails to parse counts as a mismatch.
    pub fn verify(&self, plain_text: &str) -> bool {
        match PasswordHash::new(&self.hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(plain_text.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Password {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_accepts_original_and_rejects_others() {
        let password = Password::new("SecurePassword123!").unwrap();

        assert!(password.verify("SecurePassword123!"));
        assert!(!password.verify("WrongPassword123"));
    }

    #[test]
    fn test_round_trip_through_storage() {
        let password = Password::new("TestPassword123").unwrap();
        let stored = password.as_str().to_string();

        assert!(Password::from_hash(stored).verify("TestPassword123"));
    }

    #[test]
    fn test_fresh_salt_per_hash() {
        let first = Password::new("SamePassword123").unwrap();
        let second = Password::new("SamePassword123").unwrap();

        assert_ne!(first.as_str(), second.as_str());
        assert!(first.verify("SamePassword123"));
        assert!(second.verify("SamePassword123"));
    }

    #[test]
    fn test_empty_password_rejected() {
        assert!(Password::new("").is_err());
    }

    #[test]
    fn test_hash_is_phc_format() {
        let password = Password::new("SomePassword").unwrap();
        assert!(password.as_str().starts_with("$argon2id$"));
    }

    #[test]
    fn test_garbage_hash_never_verifies() {
        let password = Password::from_hash("not-a-phc-string".to_string());
        assert!(!password.verify("anything"));
    }
}
