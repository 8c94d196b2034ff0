//! Storage infrastructure - Repository implementations

mod in_memory;
pub mod migrations;
mod postgres;

pub use in_memory::InMemoryRepository;
pub use migrations::{revert_last_migration, run_schema_migrations, Migration, PostgresMigrator};
pub use postgres::{map_sqlx_error, PostgresConfig, PostgresRepository, SqlEntity};

/// Supported storage backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl StorageType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            _ => None,
        }
    }
}
