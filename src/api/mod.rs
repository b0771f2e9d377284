//! The HTTP surface: routes, handlers, session middleware, cookie
//! helpers and the shared application state.

pub mod cookies;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use routes::create_router;
pub use state::AppState;
