//! Generic repository trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

use super::entity::StorageEntity;

/// Generic repository for CRUD operations on any entity type.
///
/// Store errors are surfaced with their kind intact. Every call is a future
/// that aborts the in-flight store operation when dropped.
#[async_trait]
pub trait Repository<E>: Send + Sync + Debug
where
    E: StorageEntity + 'static,
{
    /// Retrieves an entity by its key, `NotFound` if absent or soft-deleted
    async fn get(&self, key: &E::Key) -> Result<E, DomainError>;

    /// Inserts an entity and returns it as persisted
    async fn create(&self, entity: E) -> Result<E, DomainError>;

    /// Writes every mutable field of the entity, inserting it when the key is
    /// unknown to the store. `NotFound` if the key belongs to a soft-deleted
    /// record
    async fn update(&self, entity: E) -> Result<(), DomainError>;

    /// Removes (or soft-removes) an entity by its key, `NotFound` if nothing
    /// was affected
    async fn delete(&self, key: &E::Key) -> Result<(), DomainError>;
}
