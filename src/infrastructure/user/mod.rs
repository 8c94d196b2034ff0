//! User infrastructure module
//!
//! Binds the generic repository to the user entity, maps users onto the
//! relational schema and hosts the user use-case service.

mod postgres;
mod repository;
mod service;

pub use repository::StorageUserRepository;
pub use service::UserService;
