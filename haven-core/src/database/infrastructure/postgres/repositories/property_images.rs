use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    database::ports::property_images::PropertyImageRepository,
    domain::PropertyImageRecord,
    error::{HavenError, Result},
};

#[derive(Debug, sqlx::FromRow)]
struct PropertyImageRow {
    id: Uuid,
    property_id: Uuid,
    file: String,
    enabled: bool,
}

impl From<PropertyImageRow> for PropertyImageRecord {
    fn from(row: PropertyImageRow) -> Self {
        Self {
            id: row.id,
            property_id: row.property_id,
            file: row.file,
            enabled: row.enabled,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PostgresPropertyImageRepository {
    pool: PgPool,
}

impl PostgresPropertyImageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl PropertyImageRepository for PostgresPropertyImageRepository {
    async fn first_enabled_for_property(
        &self,
        property_id: Uuid,
    ) -> Result<Option<PropertyImageRecord>> {
        // ORDER BY id makes "first" deterministic for a given stored state
        // instead of leaning on storage return order.
        let row = sqlx::query_as::<_, PropertyImageRow>(
            r#"
            SELECT id, property_id, file, enabled
            FROM property_images
            WHERE property_id = $1 AND enabled
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(property_id)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| {
            HavenError::Internal(format!(
                "Failed to fetch image for property {}: {}",
                property_id, e
            ))
        })?;

        Ok(row.map(PropertyImageRecord::from))
    }
}
