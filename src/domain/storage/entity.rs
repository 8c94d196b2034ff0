//! Storage entity traits and types

use std::fmt::Debug;

/// Trait for types that can be used as storage keys
pub trait StorageKey: Clone + Debug + Send + Sync + Eq + std::hash::Hash {
    /// Returns the key as a string for storage backends that index by string
    fn as_str(&self) -> String;
}

/// Trait for types that can be stored through a [`Repository`](super::Repository)
pub trait StorageEntity: Clone + Debug + Send + Sync {
    /// The key type for this entity
    type Key: StorageKey;

    /// Returns the entity's key
    fn key(&self) -> &Self::Key;

    /// Prepares the entity to overwrite a stored record.
    ///
    /// Implementations refresh modification stamps and carry create-only
    /// fields over from `stored` when the backend provides it.
    fn touch(&mut self, _stored: Option<&Self>) {}

    /// Whether the entity carries a soft-delete marker
    fn is_deleted(&self) -> bool {
        false
    }

    /// Sets the soft-delete marker. Returns `false` when the entity has none
    /// and must be physically removed instead.
    fn mark_deleted(&mut self) -> bool {
        false
    }
}
