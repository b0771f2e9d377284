//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::account_handler;
use crate::config::SESSION_COOKIE;
use crate::domain::UserResponse;
use crate::types::MessageResponse;

/// OpenAPI documentation for wicket
#[derive(OpenApi)]
#[openapi(
    info(
        title = "wicket",
        version = "0.1.0",
        description = "Login and registration service with session and remember-me support",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        account_handler::login,
        account_handler::login_probe,
        account_handler::register,
        account_handler::register_form,
        account_handler::logout,
        account_handler::me,
    ),
    components(
        schemas(
            UserResponse,
            MessageResponse,
            account_handler::LoginForm,
            account_handler::RegisterForm,
            account_handler::SessionResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Account", description = "Registration, login, and session management")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for session cookie authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
            );
        }
    }
}
