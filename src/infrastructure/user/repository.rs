//! Storage-backed user repository

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::storage::Repository;
use crate::domain::user::{User, UserRepository};
use crate::domain::DomainError;

/// Binds the generic [`Repository`] to the user entity
#[derive(Debug, Clone)]
pub struct StorageUserRepository {
    storage: Arc<dyn Repository<User>>,
}

impl StorageUserRepository {
    /// Create a new storage-backed repository
    pub fn new(storage: Arc<dyn Repository<User>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl UserRepository for StorageUserRepository {
    async fn get_by_id(&self, user: &User) -> Result<User, DomainError> {
        self.storage.get(user.id()).await
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        self.storage.create(user).await
    }

    async fn update(&self, user: User) -> Result<(), DomainError> {
        self.storage.update(user).await
    }

    async fn delete_by_id(&self, user: &User) -> Result<(), DomainError> {
        self.storage.delete(user.id()).await
    }
}
