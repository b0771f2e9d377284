//! Runtime configuration, read once from the environment at startup.

use std::env;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_REDIS_URL, DEFAULT_REMEMBER_TOKEN_TTL_DAYS, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT, DEFAULT_SESSION_IDLE_SECONDS, MIN_AUTH_SECRET_LENGTH,
};

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    auth_secret: String,
    pub session_idle_seconds: u64,
    pub remember_token_ttl_days: i64,
    pub server_host: String,
    pub server_port: u16,
    pub cookie_secure: bool,
}

// URLs carry credentials and the secret signs tokens; neither belongs
// in debug output.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("redis_url", &"[REDACTED]")
            .field("auth_secret", &"[REDACTED]")
            .field("session_idle_seconds", &self.session_idle_seconds)
            .field("remember_token_ttl_days", &self.remember_token_ttl_days)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("cookie_secure", &self.cookie_secure)
            .finish()
    }
}

impl Config {
    /// Read configuration from the environment, after loading `.env`
    /// if one exists.
    ///
    /// # Panics
    /// Panics when AUTH_SECRET is missing in a release build, or set
    /// but shorter than [`MIN_AUTH_SECRET_LENGTH`].
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let auth_secret = env::var("AUTH_SECRET").unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                tracing::warn!("AUTH_SECRET not set, falling back to the development key");
                "dev-secret-key-minimum-32-chars!!".to_string()
            } else {
                panic!("AUTH_SECRET environment variable must be set in production");
            }
        });

        if auth_secret.len() < MIN_AUTH_SECRET_LENGTH {
            panic!(
                "AUTH_SECRET must be at least {} characters long",
                MIN_AUTH_SECRET_LENGTH
            );
        }

        Self {
            database_url: env_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            redis_url: env_or("REDIS_URL", DEFAULT_REDIS_URL),
            auth_secret,
            session_idle_seconds: env_parse("SESSION_IDLE_SECONDS", DEFAULT_SESSION_IDLE_SECONDS),
            remember_token_ttl_days: env_parse(
                "REMEMBER_TOKEN_TTL_DAYS",
                DEFAULT_REMEMBER_TOKEN_TTL_DAYS,
            ),
            server_host: env_or("SERVER_HOST", DEFAULT_SERVER_HOST),
            server_port: env_parse("SERVER_PORT", DEFAULT_SERVER_PORT),
            cookie_secure: env_parse("COOKIE_SECURE", false),
        }
    }

    /// Secret bytes for signing and verifying remember-me tokens.
    pub fn auth_secret_bytes(&self) -> &[u8] {
        self.auth_secret.as_bytes()
    }

    /// Bind address in `host:port` form.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
