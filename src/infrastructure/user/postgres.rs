//! PostgreSQL mapping for the user entity

use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::query_builder::Separated;
use sqlx::{FromRow, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use crate::domain::user::{User, UserId};
use crate::infrastructure::storage::SqlEntity;

impl SqlEntity for User {
    const TABLE: &'static str = r#""user""#;
    const KEY_COLUMN: &'static str = "id";
    const COLUMNS: &'static [&'static str] =
        &["id", "name", "phone", "created_at", "updated_at", "deleted_at"];
    const UPDATE_COLUMNS: &'static [&'static str] = &["name", "phone", "updated_at"];
    const SOFT_DELETE_COLUMN: Option<&'static str> = Some("deleted_at");
    const UPDATED_AT_COLUMN: Option<&'static str> = Some("updated_at");

    fn push_key(builder: &mut QueryBuilder<'_, Postgres>, key: &UserId) {
        builder.push_bind(*key.as_uuid());
    }

    fn push_values(&self, values: &mut Separated<'_, '_, Postgres, &'static str>) {
        values
            .push_bind(*self.id().as_uuid())
            .push_bind(self.name().to_string())
            .push_bind(self.phone().to_string())
            .push_bind(self.created_at())
            .push_bind(self.updated_at())
            .push_bind(self.deleted_at());
    }
}

impl<'r> FromRow<'r, PgRow> for User {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let id: Uuid = row.try_get("id")?;
        let created_at: DateTime<Utc> = row.try_get("created_at")?;
        let updated_at: DateTime<Utc> = row.try_get("updated_at")?;
        let deleted_at: Option<DateTime<Utc>> = row.try_get("deleted_at")?;

        Ok(User::restore(
            UserId::from_uuid(id),
            row.try_get("name")?,
            row.try_get("phone")?,
            created_at,
            updated_at,
            deleted_at,
        ))
    }
}
