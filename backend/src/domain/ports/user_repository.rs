//! Port abstraction for user persistence adapters and their errors.
//!
//! Each method maps to exactly one statement against the users table. Adapters
//! neither retry nor wrap calls in transactions; failures surface unchanged as
//! [`UserPersistenceError`].

use async_trait::async_trait;

use crate::domain::{User, UserId, UserProfile};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Return every stored user ordered by ascending id.
    async fn list_users(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a user by primary key.
    async fn get_user(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Insert a user and return the identifier the store assigned.
    async fn create_user(&self, profile: &UserProfile) -> Result<UserId, UserPersistenceError>;

    /// Replace all five fields of the user with `id`.
    ///
    /// Returns the number of rows the statement matched; zero means no user
    /// has that id.
    async fn update_user(
        &self,
        id: UserId,
        profile: &UserProfile,
    ) -> Result<u64, UserPersistenceError>;
}
