//! Redis-backed storage for session markers and remember-me records.

use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError};
use serde::{de::DeserializeOwned, Serialize};

use crate::config::{Config, CACHE_PREFIX_REMEMBER, CACHE_PREFIX_SESSION};
use crate::errors::{AppError, AppResult};

/// Redis cache wrapper. `ConnectionManager` multiplexes and reconnects,
/// so clones share one underlying connection.
#[derive(Clone)]
pub struct Cache {
    connection: ConnectionManager,
}

impl Cache {
    /// Connect to Redis.
    ///
    /// # Panics
    /// Panics when the connection cannot be established.
    pub async fn connect(config: &Config) -> Self {
        let client =
            Client::open(config.redis_url.as_str()).expect("Failed to create Redis client");

        let connection = ConnectionManager::new(client)
            .await
            .expect("Failed to connect to Redis");

        tracing::info!("Redis cache connected");

        Self { connection }
    }

    // =========================================================================
    // Generic Operations
    // =========================================================================

    /// Fetch and deserialize a value.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let mut conn = self.connection.clone();
        let raw: Option<String> = conn.get(key).await.map_err(cache_error)?;

        raw.map(|json| {
            serde_json::from_str(&json)
                .map_err(|e| AppError::internal(format!("Cache deserialization error: {}", e)))
        })
        .transpose()
    }

    /// Serialize and store a value that expires after `ttl_seconds`.
    pub async fn set_with_ttl<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: u64,
    ) -> AppResult<()> {
        let json = serde_json::to_string(value)
            .map_err(|e| AppError::internal(format!("Cache serialization error: {}", e)))?;

        let mut conn = self.connection.clone();
        conn.set_ex::<_, _, ()>(key, json, ttl_seconds)
            .await
            .map_err(cache_error)
    }

    /// Remove a key. Missing keys are not an error.
    pub async fn delete(&self, key: &str) -> AppResult<()> {
        let mut conn = self.connection.clone();
        conn.del::<_, ()>(key).await.map_err(cache_error)
    }

    /// Whether a key currently exists.
    pub async fn exists(&self, key: &str) -> AppResult<bool> {
        let mut conn = self.connection.clone();
        conn.exists(key).await.map_err(cache_error)
    }

    /// Reset a key's TTL.
    pub async fn expire(&self, key: &str, seconds: u64) -> AppResult<()> {
        let mut conn = self.connection.clone();
        conn.expire::<_, ()>(key, seconds as i64)
            .await
            .map_err(cache_error)
    }

    // =========================================================================
    // Session Marker Operations
    // =========================================================================

    /// Store session data with an idle TTL.
    pub async fn set_session<T: Serialize>(
        &self,
        session_id: &str,
        data: &T,
        ttl_seconds: u64,
    ) -> AppResult<()> {
        let key = format!("{}{}", CACHE_PREFIX_SESSION, session_id);
        self.set_with_ttl(&key, data, ttl_seconds).await
    }

    /// Get session data without touching the TTL.
    pub async fn get_session<T: DeserializeOwned>(&self, session_id: &str) -> AppResult<Option<T>> {
        let key = format!("{}{}", CACHE_PREFIX_SESSION, session_id);
        self.get(&key).await
    }

    /// Refresh the idle TTL of a session (sliding expiry).
    pub async fn touch_session(&self, session_id: &str, ttl_seconds: u64) -> AppResult<()> {
        let key = format!("{}{}", CACHE_PREFIX_SESSION, session_id);
        self.expire(&key, ttl_seconds).await
    }

    /// Delete session. Idempotent.
    pub async fn delete_session(&self, session_id: &str) -> AppResult<()> {
        let key = format!("{}{}", CACHE_PREFIX_SESSION, session_id);
        self.delete(&key).await
    }

    // =========================================================================
    // Remember-Me Record Operations
    // =========================================================================

    /// Store a remember-me token record keyed by token id.
    pub async fn set_remember_record<T: Serialize>(
        &self,
        token_id: &str,
        data: &T,
        ttl_seconds: u64,
    ) -> AppResult<()> {
        let key = format!("{}{}", CACHE_PREFIX_REMEMBER, token_id);
        self.set_with_ttl(&key, data, ttl_seconds).await
    }

    /// Get a remember-me token record.
    pub async fn get_remember_record<T: DeserializeOwned>(
        &self,
        token_id: &str,
    ) -> AppResult<Option<T>> {
        let key = format!("{}{}", CACHE_PREFIX_REMEMBER, token_id);
        self.get(&key).await
    }

    /// Delete a remember-me token record. Idempotent.
    pub async fn delete_remember_record(&self, token_id: &str) -> AppResult<()> {
        let key = format!("{}{}", CACHE_PREFIX_REMEMBER, token_id);
        self.delete(&key).await
    }
}

/// Convert Redis error to AppError.
fn cache_error(e: RedisError) -> AppError {
    tracing::error!("Redis error: {}", e);
    AppError::internal(format!("Cache error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_prefixes() {
        assert_eq!(CACHE_PREFIX_SESSION, "session:");
        assert_eq!(CACHE_PREFIX_REMEMBER, "remember:");
    }
}
