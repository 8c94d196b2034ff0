//! User repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::User;
use crate::domain::DomainError;

/// Repository for user persistence.
///
/// Identity-based calls take a (possibly partial) [`User`] and only read its
/// identifier, so callers can pass entity values uniformly.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Get a user by the identifier carried in `user`
    async fn get_by_id(&self, user: &User) -> Result<User, DomainError>;

    /// Create a new user
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Overwrite a user's mutable fields
    async fn update(&self, user: User) -> Result<(), DomainError>;

    /// Delete the user identified by `user`
    async fn delete_by_id(&self, user: &User) -> Result<(), DomainError>;
}
