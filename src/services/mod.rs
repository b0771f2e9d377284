//! Application services. The traits are the seams handlers depend on;
//! the concrete types wire infrastructure underneath.

mod auth_service;
mod session_service;

pub use auth_service::{AuthService, Authenticator};
pub use session_service::{RememberClaims, SessionManager, SessionService};
