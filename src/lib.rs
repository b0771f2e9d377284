//! Session-backed login and registration service.
//!
//! Users register with a username, password and email, sign in against
//! argon2 password hashes, and hold their authenticated state in a
//! Redis-backed server-side session referenced by an opaque cookie. An
//! optional signed remember-me token restores the session across
//! browser restarts.
//!
//! The crate is layered bottom-up: [`domain`] holds the core types,
//! [`infra`] talks to Postgres and Redis, [`services`] implements the
//! account and session use cases behind traits, and [`api`] exposes
//! them over HTTP. [`cli`] and [`commands`] wrap everything in a small
//! binary with `serve` and `migrate` subcommands.

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Password, User};
pub use errors::{AppError, AppResult};
pub use infra::Cache;
