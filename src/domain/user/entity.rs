//! User entity and related types

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::storage::{StorageEntity, StorageKey};

/// User identifier - a v4 UUID assigned at creation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for UserId {
    fn as_str(&self) -> String {
        self.0.to_string()
    }
}

/// User record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    phone: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    /// Soft-delete marker; set records are invisible to lookups
    #[serde(skip_serializing_if = "Option::is_none")]
    deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new user with a freshly generated identifier
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self::with_fields(UserId::generate(), name, phone)
    }

    /// Create a user carrying a known identifier and new attribute values
    pub fn with_fields(id: UserId, name: impl Into<String>, phone: impl Into<String>) -> Self {
        let now = Utc::now();

        Self {
            id,
            name: name.into(),
            phone: phone.into(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Create a user populated only with its identity, for lookups and deletes
    pub fn with_id(id: UserId) -> Self {
        Self::with_fields(id, String::new(), String::new())
    }

    /// Rebuild a user from persisted state
    pub fn restore(
        id: UserId,
        name: String,
        phone: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        deleted_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            name,
            phone,
            created_at,
            updated_at,
            deleted_at,
        }
    }

    // Getters

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
}

impl StorageEntity for User {
    type Key = UserId;

    fn key(&self) -> &Self::Key {
        &self.id
    }

    fn touch(&mut self, stored: Option<&Self>) {
        // Updates never revive or re-date a record
        if let Some(stored) = stored {
            self.created_at = stored.created_at;
            self.deleted_at = stored.deleted_at;
        }

        self.updated_at = Utc::now().max(self.created_at);
    }

    fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    fn mark_deleted(&mut self) -> bool {
        let now = Utc::now();
        self.deleted_at = Some(now);
        self.updated_at = now.max(self.created_at);
        true
    }
}
