//! Session-cookie authentication middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::api::cookies;
use crate::api::AppState;
use crate::config::SESSION_COOKIE;
use crate::errors::AppError;

/// Authenticated user extracted from the session cookie
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub username: String,
    pub session_id: String,
}

/// Session authentication middleware.
///
/// Resolves the session cookie against the session store (refreshing the
/// idle TTL), then injects the CurrentUser into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let session_id = cookies::cookie_value(request.headers(), SESSION_COOKIE)
        .ok_or(AppError::Unauthorized)?;

    let username = state
        .session_service
        .session_user(&session_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let current_user = CurrentUser {
        username,
        session_id,
    };

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}
