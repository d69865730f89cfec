use sqlx::{
    PgPool,
    postgres::PgPoolOptions,
};
use std::fmt;
use tracing::info;

use crate::error::{HavenError, Result};

/// Schema applied on startup and by `db migrate`. Idempotent: every
/// statement is guarded with IF NOT EXISTS.
const SCHEMA_SQL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS owners (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        address TEXT NOT NULL,
        photo TEXT,
        birthday DATE NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS properties (
        id UUID PRIMARY KEY,
        owner_id UUID NOT NULL REFERENCES owners(id),
        name TEXT NOT NULL,
        address TEXT NOT NULL,
        price NUMERIC(14,2) NOT NULL CHECK (price >= 0),
        code_internal TEXT NOT NULL,
        year INT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS property_images (
        id UUID PRIMARY KEY,
        property_id UUID NOT NULL REFERENCES properties(id),
        file TEXT NOT NULL,
        enabled BOOLEAN NOT NULL DEFAULT TRUE
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_properties_price ON properties (price)
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_property_images_property
        ON property_images (property_id, enabled)
    "#,
];

/// Owned PostgreSQL connection pool for the listing store.
#[derive(Clone)]
pub struct PostgresDatabase {
    pool: PgPool,
}

impl fmt::Debug for PostgresDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresDatabase").finish_non_exhaustive()
    }
}

impl PostgresDatabase {
    pub async fn new(connection_string: &str) -> Result<Self> {
        let max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(8);

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(std::time::Duration::from_secs(10))
            .connect(connection_string)
            .await
            .map_err(|e| {
                HavenError::Internal(format!(
                    "Failed to connect to PostgreSQL: {}",
                    e
                ))
            })?;

        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply the schema. Safe to run repeatedly.
    pub async fn initialize_schema(&self) -> Result<()> {
        for statement in SCHEMA_SQL {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    HavenError::Internal(format!(
                        "Failed to apply schema: {}",
                        e
                    ))
                })?;
        }

        info!("listing schema initialized");
        Ok(())
    }
}
