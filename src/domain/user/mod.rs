//! User domain
//!
//! This module provides the user entity, its identifier and the repository
//! trait the use-case layer depends on.

mod entity;
mod repository;

pub use entity::{User, UserId};
pub use repository::UserRepository;

#[cfg(test)]
pub use repository::MockUserRepository;
