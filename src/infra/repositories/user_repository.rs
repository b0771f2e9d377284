//! User repository implementation.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set, SqlErr,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::User;
use crate::errors::{AppError, AppResult};
use crate::infra::db::Database;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by login name. Absence is not an error.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Check whether an email address is already registered.
    async fn email_exists(&self, email: &str) -> AppResult<bool>;

    /// Insert a new user. A duplicate username or email surfaces as
    /// `AppError::Conflict` via the table's unique constraints.
    async fn create(&self, username: String, email: String, password_hash: String)
        -> AppResult<User>;
}

/// Concrete implementation of UserRepository backed by PostgreSQL
pub struct UserStore {
    db: Arc<Database>,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.db.connection())
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn email_exists(&self, email: &str) -> AppResult<bool> {
        let count = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .count(self.db.connection())
            .await
            .map_err(AppError::from)?;

        Ok(count > 0)
    }

    async fn create(
        &self,
        username: String,
        email: String,
        password_hash: String,
    ) -> AppResult<User> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(username),
            email: Set(email),
            password_hash: Set(password_hash),
            created_at: Set(chrono::Utc::now()),
        };

        // The insert is the authority on uniqueness; a racing duplicate
        // lands here as a constraint violation, not a generic failure.
        let model = match active_model.insert(self.db.connection()).await {
            Ok(model) => model,
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(detail)) => {
                    let field = if detail.contains("username") {
                        "Username"
                    } else {
                        "Email"
                    };
                    return Err(AppError::conflict(field));
                }
                _ => return Err(AppError::from(err)),
            },
        };

        Ok(User::from(model))
    }
}
