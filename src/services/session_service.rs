//! Session and remember-me token service.
//!
//! Sessions are opaque server-side markers in Redis with a sliding idle
//! TTL. Remember-me tokens are signed JWTs whose `jti` must also exist
//! as a server-side record, which is what makes them revocable.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{Config, SECONDS_PER_DAY};
use crate::errors::AppResult;
use crate::infra::Cache;

/// Claims carried by a signed remember-me token.
///
/// The token holds no credential material; `sub` is the username and
/// `jti` points at the revocable server-side record.
#[derive(Debug, Serialize, Deserialize)]
pub struct RememberClaims {
    pub sub: String,
    pub jti: Uuid,
    pub exp: i64,
    pub iat: i64,
}

/// Session service trait for dependency injection.
#[async_trait]
pub trait SessionService: Send + Sync {
    /// Start a session for a username and return the opaque session id
    async fn start_session(&self, username: &str) -> AppResult<String>;

    /// Resolve a session id to its username, refreshing the idle TTL.
    /// Unknown or expired ids resolve to None.
    async fn session_user(&self, session_id: &str) -> AppResult<Option<String>>;

    /// End a session. Idempotent.
    async fn end_session(&self, session_id: &str) -> AppResult<()>;

    /// Issue a signed remember-me token for a username
    async fn issue_remember_token(&self, username: &str) -> AppResult<String>;

    /// Redeem a remember-me token for its username. Every failure mode
    /// (bad signature, expiry, revocation) resolves to None, not an error.
    async fn redeem_remember_token(&self, token: &str) -> AppResult<Option<String>>;

    /// Revoke a remember-me token's server-side record.
    /// Tolerates garbage tokens.
    async fn revoke_remember_token(&self, token: &str) -> AppResult<()>;

    /// Check connectivity of the backing session store
    async fn ping(&self) -> AppResult<()>;
}

/// Sign remember-me claims for a username (shared helper)
fn sign_remember_token(
    username: &str,
    ttl_days: i64,
    secret: &[u8],
) -> AppResult<(String, RememberClaims)> {
    let now = Utc::now();
    let expires_at = now + Duration::days(ttl_days);

    let claims = RememberClaims {
        sub: username.to_string(),
        jti: Uuid::new_v4(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )?;

    Ok((token, claims))
}

/// Verify a remember-me token signature and expiry, extracting claims
/// (shared helper)
fn decode_remember_token(token: &str, secret: &[u8]) -> AppResult<RememberClaims> {
    let token_data = decode::<RememberClaims>(
        token,
        &DecodingKey::from_secret(secret),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Concrete implementation of SessionService backed by Redis.
pub struct SessionManager {
    cache: Cache,
    config: Config,
}

impl SessionManager {
    /// Create new session service instance
    pub fn new(cache: Cache, config: Config) -> Self {
        Self { cache, config }
    }
}

#[async_trait]
impl SessionService for SessionManager {
    async fn start_session(&self, username: &str) -> AppResult<String> {
        let session_id = Uuid::new_v4().to_string();
        self.cache
            .set_session(&session_id, &username, self.config.session_idle_seconds)
            .await?;

        tracing::debug!(username = %username, "Session started");
        Ok(session_id)
    }

    async fn session_user(&self, session_id: &str) -> AppResult<Option<String>> {
        let username: Option<String> = self.cache.get_session(session_id).await?;

        // Each authenticated access slides the idle window forward
        if username.is_some() {
            self.cache
                .touch_session(session_id, self.config.session_idle_seconds)
                .await?;
        }

        Ok(username)
    }

    async fn end_session(&self, session_id: &str) -> AppResult<()> {
        self.cache.delete_session(session_id).await
    }

    async fn issue_remember_token(&self, username: &str) -> AppResult<String> {
        let ttl_days = self.config.remember_token_ttl_days;
        let (token, claims) =
            sign_remember_token(username, ttl_days, self.config.auth_secret_bytes())?;

        self.cache
            .set_remember_record(
                &claims.jti.to_string(),
                &claims.sub,
                (ttl_days * SECONDS_PER_DAY) as u64,
            )
            .await?;

        tracing::debug!(username = %username, "Remember-me token issued");
        Ok(token)
    }

    async fn redeem_remember_token(&self, token: &str) -> AppResult<Option<String>> {
        // Bad signature or expiry is an unauthenticated outcome, not an error
        let claims = match decode_remember_token(token, self.config.auth_secret_bytes()) {
            Ok(claims) => claims,
            Err(_) => return Ok(None),
        };

        // The record must still exist and name the same user; a revoked
        // token fails here even though its signature is still valid
        let recorded: Option<String> = self
            .cache
            .get_remember_record(&claims.jti.to_string())
            .await?;

        Ok(recorded.filter(|username| *username == claims.sub))
    }

    async fn revoke_remember_token(&self, token: &str) -> AppResult<()> {
        if let Ok(claims) = decode_remember_token(token, self.config.auth_secret_bytes()) {
            self.cache
                .delete_remember_record(&claims.jti.to_string())
                .await?;
            tracing::debug!("Remember-me token revoked");
        }

        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        self.cache.exists("health:ping").await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret-key-minimum-32-chars!";

    #[test]
    fn test_remember_token_round_trip() {
        let (token, claims) = sign_remember_token("alice", 7, SECRET).unwrap();
        let decoded = decode_remember_token(&token, SECRET).unwrap();

        assert_eq!(decoded.sub, "alice");
        assert_eq!(decoded.jti, claims.jti);
        assert_eq!(decoded.exp, claims.exp);
    }

    #[test]
    fn test_remember_token_wrong_secret_rejected() {
        let (token, _) = sign_remember_token("alice", 7, SECRET).unwrap();
        let result = decode_remember_token(&token, b"another-secret-key-32-chars-long!");

        assert!(result.is_err());
    }

    #[test]
    fn test_remember_token_tampered_rejected() {
        let (token, _) = sign_remember_token("alice", 7, SECRET).unwrap();
        let tampered = format!("{}x", token);

        assert!(decode_remember_token(&tampered, SECRET).is_err());
    }

    #[test]
    fn test_expired_remember_token_rejected() {
        let (token, _) = sign_remember_token("alice", -1, SECRET).unwrap();

        assert!(decode_remember_token(&token, SECRET).is_err());
    }

    #[test]
    fn test_remember_token_carries_no_password() {
        let (token, _) = sign_remember_token("alice", 7, SECRET).unwrap();

        // JWT payloads are base64, not encrypted; nothing secret goes in
        let decoded = decode_remember_token(&token, SECRET).unwrap();
        assert_eq!(decoded.sub, "alice");
        assert!(decoded.jti != Uuid::nil());
    }
}
