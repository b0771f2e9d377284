//! The serve command. Wires infrastructure and runs the HTTP server.

use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Cache, Database};

pub async fn execute(args: ServeArgs, config: Config) -> AppResult<()> {
    let db = Arc::new(Database::connect(&config).await);
    let cache = Cache::connect(&config).await;
    tracing::info!("Database and session store connected");

    let state = AppState::from_config(db, cache, config);
    let app = create_router(state);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Could not bind {}: {}", addr, e)))?;

    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))
}
