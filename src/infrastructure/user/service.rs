//! User service - use-case orchestration for user records

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::user::{User, UserRepository};
use crate::domain::{OperationError, OperationResultExt};

/// User use-cases.
///
/// Update and delete confirm the record exists before mutating it, so an
/// unknown identity fails loudly instead of silently affecting zero rows.
/// Every error is tagged with the operation name and keeps its kind.
#[derive(Debug)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    /// Create a new user service
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Fetch the user identified by `user`
    pub async fn get_user_by_id(&self, user: User) -> Result<User, OperationError> {
        debug!(id = %user.id(), "Getting user");

        self.repository.get_by_id(&user).await.operation("GetUserById")
    }

    /// Persist a new user
    pub async fn create_user(&self, user: User) -> Result<User, OperationError> {
        info!(id = %user.id(), "Creating user");

        self.repository.create(user).await.operation("CreateUser")
    }

    /// Overwrite an existing user's fields
    pub async fn update_user(&self, user: User) -> Result<(), OperationError> {
        info!(id = %user.id(), "Updating user");

        self.repository.get_by_id(&user).await.operation("UpdateUser")?;
        self.repository.update(user).await.operation("UpdateUser")
    }

    /// Delete an existing user
    pub async fn delete_user(&self, user: User) -> Result<(), OperationError> {
        info!(id = %user.id(), "Deleting user");

        self.repository.get_by_id(&user).await.operation("DeleteUser")?;
        self.repository.delete_by_id(&user).await.operation("DeleteUser")
    }
}
