//! Account handlers: login, registration, logout, and the session probe.
//!
//! Handlers stay thin: they translate form fields into service calls and
//! manage cookie side effects. Business rules live in the services.

use axum::{
    extract::{Extension, State},
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::cookies;
use crate::api::extractors::ValidatedForm;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::config::{REMEMBER_COOKIE, SECONDS_PER_DAY, SESSION_COOKIE};
use crate::domain::UserResponse;
use crate::errors::AppResult;
use crate::types::MessageResponse;

/// Login form fields
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginForm {
    /// Login name
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "alice")]
    pub username: String,
    /// Password
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "correct horse battery staple")]
    pub password: String,
    /// Remember-me checkbox; browsers send a value when checked and omit
    /// the field otherwise
    #[serde(default)]
    #[schema(example = "on")]
    pub remember: Option<String>,
}

/// Registration form fields
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterForm {
    /// Login name
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "alice")]
    pub username: String,
    /// Password
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "correct horse battery staple")]
    pub password: String,
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "alice@example.com")]
    pub email: String,
}

/// Active session description returned by the probe
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    /// Username the session belongs to
    #[schema(example = "alice")]
    pub username: String,
}

/// Create account routes (public).
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_probe).post(login))
        .route("/register", get(register_form).post(register))
        .route("/logout", get(logout))
}

/// Log in with username and password
#[utoipa::path(
    post,
    path = "/login",
    tag = "Account",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Login successful, session cookie set", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid username or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedForm(payload): ValidatedForm<LoginForm>,
) -> AppResult<(HeaderMap, Json<UserResponse>)> {
    let remember = payload.remember.is_some();
    let user = state
        .auth_service
        .authenticate(payload.username, payload.password)
        .await?;

    // Replace any session the browser was already holding
    if let Some(old_session) = cookies::cookie_value(&headers, SESSION_COOKIE) {
        state.session_service.end_session(&old_session).await?;
    }

    let session_id = state.session_service.start_session(&user.username).await?;

    let mut response_headers = HeaderMap::new();
    response_headers.append(
        SET_COOKIE,
        cookies::session_cookie(&session_id, state.config.cookie_secure)?,
    );

    if remember {
        let token = state
            .session_service
            .issue_remember_token(&user.username)
            .await?;
        let max_age = state.config.remember_token_ttl_days * SECONDS_PER_DAY;
        response_headers.append(
            SET_COOKIE,
            cookies::remember_cookie(&token, max_age, state.config.cookie_secure)?,
        );
    } else {
        // Logging in with the box unchecked withdraws an earlier grant
        if let Some(token) = cookies::cookie_value(&headers, REMEMBER_COOKIE) {
            state.session_service.revoke_remember_token(&token).await?;
        }
        response_headers.append(
            SET_COOKIE,
            cookies::clear_remember_cookie(state.config.cookie_secure)?,
        );
    }

    tracing::info!(username = %user.username, remember = remember, "User logged in");

    Ok((response_headers, Json(UserResponse::from(user))))
}

/// Probe the current session
///
/// Resolves the session cookie if one is valid; otherwise a valid
/// remember-me token re-authenticates silently and a fresh session is
/// started. With neither, responds 204.
#[utoipa::path(
    get,
    path = "/login",
    tag = "Account",
    responses(
        (status = 200, description = "Active session", body = SessionResponse),
        (status = 204, description = "No active session")
    )
)]
pub async fn login_probe(State(state): State<AppState>, headers: HeaderMap) -> AppResult<Response> {
    // An existing session wins; resolving it also slides the idle TTL
    if let Some(session_id) = cookies::cookie_value(&headers, SESSION_COOKIE) {
        if let Some(username) = state.session_service.session_user(&session_id).await? {
            return Ok(Json(SessionResponse { username }).into_response());
        }
    }

    // Fall back to the remember-me token: re-authenticate without credentials
    if let Some(token) = cookies::cookie_value(&headers, REMEMBER_COOKIE) {
        if let Some(username) = state.session_service.redeem_remember_token(&token).await? {
            let session_id = state.session_service.start_session(&username).await?;

            let mut response_headers = HeaderMap::new();
            response_headers.append(
                SET_COOKIE,
                cookies::session_cookie(&session_id, state.config.cookie_secure)?,
            );

            tracing::info!(username = %username, "Session restored from remember-me token");

            return Ok(
                (response_headers, Json(SessionResponse { username })).into_response()
            );
        }
    }

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/register",
    tag = "Account",
    request_body(content = RegisterForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "User registered successfully", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username or email already exists"),
        (status = 500, description = "Registration could not be completed")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedForm(payload): ValidatedForm<RegisterForm>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state
        .auth_service
        .register(payload.username, payload.password, payload.email)
        .await?;

    tracing::info!(username = %user.username, "User registered");

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Describe the registration form
#[utoipa::path(
    get,
    path = "/register",
    tag = "Account",
    responses(
        (status = 200, description = "Expected registration fields", body = MessageResponse)
    )
)]
pub async fn register_form() -> Json<MessageResponse> {
    Json(MessageResponse::new(
        "Submit username, password and email to create an account",
    ))
}

/// Log out
///
/// Ends the session, revokes any presented remember-me token, and clears
/// both cookies. Safe to call without a session.
#[utoipa::path(
    get,
    path = "/logout",
    tag = "Account",
    responses(
        (status = 204, description = "Session ended and cookies cleared")
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<(StatusCode, HeaderMap)> {
    if let Some(session_id) = cookies::cookie_value(&headers, SESSION_COOKIE) {
        if let Err(e) = state.session_service.end_session(&session_id).await {
            tracing::error!("Failed to end session: {}", e);
        }
    }

    if let Some(token) = cookies::cookie_value(&headers, REMEMBER_COOKIE) {
        if let Err(e) = state.session_service.revoke_remember_token(&token).await {
            tracing::error!("Failed to revoke remember-me token: {}", e);
        }
    }

    // Always clear the cookies, even if no server-side record existed
    let mut response_headers = HeaderMap::new();
    response_headers.append(
        SET_COOKIE,
        cookies::clear_session_cookie(state.config.cookie_secure)?,
    );
    response_headers.append(
        SET_COOKIE,
        cookies::clear_remember_cookie(state.config.cookie_secure)?,
    );

    Ok((StatusCode::NO_CONTENT, response_headers))
}

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/me",
    tag = "Account",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "No active session")
    ),
    security(("session_cookie" = []))
)]
pub async fn me(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<UserResponse>> {
    let user = state.auth_service.get_user(&current_user.username).await?;

    Ok(Json(UserResponse::from(user)))
}
