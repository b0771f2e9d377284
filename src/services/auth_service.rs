//! Authentication and registration service.
//!
//! Orchestrates credential checks and account creation over the user
//! repository. Password hashing lives in the domain Password value object.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::domain::{Password, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UserRepository;

/// Digest verified when the user does not exist, so a login attempt
/// costs the same hashing work whether or not the username is taken.
static UNKNOWN_USER_HASH: Lazy<String> = Lazy::new(|| {
    Password::new("not-the-password-of-any-user")
        .map(Password::into_string)
        .expect("hashing a fixed non-empty input cannot fail")
});

/// Credential and account operations.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user
    async fn register(&self, username: String, password: String, email: String)
        -> AppResult<User>;

    /// Validate credentials and return the matching user
    async fn authenticate(&self, username: String, password: String) -> AppResult<User>;

    /// Look up a user by login name
    async fn get_user(&self, username: &str) -> AppResult<User>;
}

/// Repository-backed [`AuthService`].
pub struct Authenticator {
    repo: Arc<dyn UserRepository>,
}

impl Authenticator {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(&self, username: String, password: String, email: String)
        -> AppResult<User> {
        if username.is_empty() || password.is_empty() || email.is_empty() {
            return Err(AppError::validation(
                "Username, password and email must not be empty",
            ));
        }

        // Friendly pre-check; the insert's unique constraints remain the
        // authority when two registrations race.
        if self.repo.email_exists(&email).await? {
            return Err(AppError::conflict("Email"));
        }

        let password_hash = Password::new(&password)?.into_string();
        self.repo.create(username, email, password_hash).await
    }

    async fn authenticate(&self, username: String, password: String) -> AppResult<User> {
        let found = self.repo.find_by_username(&username).await?;

        // Verify against a fixed hash when the username is unknown, so
        // both outcomes cost one argon2 verification and the error never
        // says which part of the credentials was wrong.
        let candidate = match &found {
            Some(user) => user.password_hash.clone(),
            None => UNKNOWN_USER_HASH.clone(),
        };

        if !Password::from_hash(candidate).verify(&password) {
            return Err(AppError::InvalidCredentials);
        }

        found.ok_or(AppError::InvalidCredentials)
    }

    async fn get_user(&self, username: &str) -> AppResult<User> {
        self.repo.find_by_username(username).await?.ok_or_not_found()
    }
}
