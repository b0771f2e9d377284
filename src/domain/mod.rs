//! Core domain types, free of infrastructure concerns.

pub mod password;
pub mod user;

pub use password::Password;
pub use user::{User, UserResponse};
