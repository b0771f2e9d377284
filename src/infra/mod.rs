//! External systems: Postgres, Redis and the repositories over them.

pub mod cache;
pub mod db;
pub mod repositories;

pub use cache::Cache;
pub use db::{Database, Migrator};
pub use repositories::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockUserRepository;
