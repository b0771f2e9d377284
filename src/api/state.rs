//! Application state - Dependency injection.
//!
//! Services are constructed once at startup and injected into handlers
//! as trait objects; there is no ambient container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Cache, Database, UserStore};
use crate::services::{AuthService, Authenticator, SessionManager, SessionService};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Authentication and registration service
    pub auth_service: Arc<dyn AuthService>,
    /// Session and remember-me token service
    pub session_service: Arc<dyn SessionService>,
    /// Database connection
    pub database: Arc<Database>,
    /// Application configuration
    pub config: Config,
}

impl AppState {
    /// Create application state from connected infrastructure.
    pub fn from_config(database: Arc<Database>, cache: Cache, config: Config) -> Self {
        let repo = Arc::new(UserStore::new(database.clone()));
        let auth_service = Arc::new(Authenticator::new(repo));
        let session_service = Arc::new(SessionManager::new(cache, config.clone()));

        Self {
            auth_service,
            session_service,
            database,
            config,
        }
    }

    /// Create application state with manually injected services (tests).
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        session_service: Arc<dyn SessionService>,
        database: Arc<Database>,
        config: Config,
    ) -> Self {
        Self {
            auth_service,
            session_service,
            database,
            config,
        }
    }
}
