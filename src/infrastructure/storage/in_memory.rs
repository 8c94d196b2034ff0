//! In-memory repository implementation

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::storage::{Repository, StorageEntity, StorageKey};
use crate::domain::DomainError;

/// Thread-safe in-memory repository
///
/// Useful for testing and development. Data is lost when the process terminates.
#[derive(Debug)]
pub struct InMemoryRepository<E>
where
    E: StorageEntity,
{
    entities: RwLock<HashMap<String, E>>,
}

impl<E> Default for InMemoryRepository<E>
where
    E: StorageEntity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryRepository<E>
where
    E: StorageEntity,
{
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            entities: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a repository pre-populated with entities
    pub fn with_entities(entities: Vec<E>) -> Self {
        let map = entities
            .into_iter()
            .map(|entity| (entity.key().as_str(), entity))
            .collect();

        Self {
            entities: RwLock::new(map),
        }
    }

    /// Number of stored records, soft-deleted ones included
    pub fn len(&self) -> usize {
        self.entities.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock_error(e: impl std::fmt::Display) -> DomainError {
    DomainError::internal(format!("Failed to acquire lock: {}", e))
}

#[async_trait]
impl<E> Repository<E> for InMemoryRepository<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, key: &E::Key) -> Result<E, DomainError> {
        let entities = self.entities.read().map_err(lock_error)?;

        entities
            .get(&key.as_str())
            .filter(|e| !e.is_deleted())
            .cloned()
            .ok_or_else(|| DomainError::not_found("record not found"))
    }

    async fn create(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str();
        let mut entities = self.entities.write().map_err(lock_error)?;

        if entities.contains_key(&key) {
            return Err(DomainError::conflict(format!(
                "Entity with key '{}' already exists",
                key
            )));
        }

        entities.insert(key, entity.clone());
        Ok(entity)
    }

    async fn update(&self, mut entity: E) -> Result<(), DomainError> {
        let key = entity.key().as_str();
        let mut entities = self.entities.write().map_err(lock_error)?;

        let stored = entities.get(&key);
        if stored.is_some_and(|stored| stored.is_deleted()) {
            return Err(DomainError::not_found("record not found"));
        }

        entity.touch(stored);
        entities.insert(key, entity);
        Ok(())
    }

    async fn delete(&self, key: &E::Key) -> Result<(), DomainError> {
        let key = key.as_str();
        let mut entities = self.entities.write().map_err(lock_error)?;

        let soft_deleted = match entities.get_mut(&key) {
            Some(entity) if entity.is_deleted() => {
                return Err(DomainError::not_found("record not found"));
            }
            Some(entity) => entity.mark_deleted(),
            None => return Err(DomainError::not_found("record not found")),
        };

        if !soft_deleted {
            entities.remove(&key);
        }

        Ok(())
    }
}
