//! Domain layer - Core business entities, errors and repository contracts

pub mod error;
pub mod storage;
pub mod user;

pub use error::{DomainError, OperationError, OperationResultExt};
pub use storage::{Repository, StorageEntity, StorageKey};
pub use user::{User, UserId, UserRepository};
