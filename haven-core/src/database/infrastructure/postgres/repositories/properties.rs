use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::fmt;
use uuid::Uuid;

use crate::{
    database::ports::properties::PropertyRepository,
    domain::{FilterCriteria, PropertyRecord},
    error::{HavenError, Result},
};

const PROPERTY_COLUMNS: &str =
    "id, owner_id, name, address, price, code_internal, year";

#[derive(Debug, sqlx::FromRow)]
struct PropertyRow {
    id: Uuid,
    owner_id: Uuid,
    name: String,
    address: String,
    price: Decimal,
    code_internal: String,
    year: i32,
}

impl From<PropertyRow> for PropertyRecord {
    fn from(row: PropertyRow) -> Self {
        Self {
            id: row.id,
            owner_id: row.owner_id,
            name: row.name,
            address: row.address,
            price: row.price,
            code_internal: row.code_internal,
            year: row.year,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PostgresPropertyRepository {
    pool: PgPool,
}

impl PostgresPropertyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl PropertyRepository for PostgresPropertyRepository {
    async fn fetch_all(&self) -> Result<Vec<PropertyRecord>> {
        let rows = sqlx::query_as::<_, PropertyRow>(&format!(
            "SELECT {} FROM properties",
            PROPERTY_COLUMNS
        ))
        .fetch_all(self.pool())
        .await
        .map_err(|e| {
            HavenError::Internal(format!("Failed to fetch properties: {}", e))
        })?;

        Ok(rows.into_iter().map(PropertyRecord::from).collect())
    }

    async fn fetch_by_id(&self, id: Uuid) -> Result<Option<PropertyRecord>> {
        let row = sqlx::query_as::<_, PropertyRow>(&format!(
            "SELECT {} FROM properties WHERE id = $1",
            PROPERTY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| {
            HavenError::Internal(format!(
                "Failed to fetch property {}: {}",
                id, e
            ))
        })?;

        Ok(row.map(PropertyRecord::from))
    }

    async fn fetch_filtered(
        &self,
        criteria: &FilterCriteria,
    ) -> Result<Vec<PropertyRecord>> {
        let mut qb = PropertyFilterQuery::new(criteria).build();

        let rows = qb
            .build_query_as::<PropertyRow>()
            .fetch_all(self.pool())
            .await
            .map_err(|e| {
                HavenError::Internal(format!(
                    "Failed to fetch filtered properties: {}",
                    e
                ))
            })?;

        Ok(rows.into_iter().map(PropertyRecord::from).collect())
    }
}

/// Translates [`FilterCriteria`] into a single bound SQL predicate.
///
/// Pure query construction: nothing here touches the pool. Blank text
/// filters count as unset; price bounds are inclusive on both ends. With
/// no conditions the query matches every record.
pub struct PropertyFilterQuery<'a> {
    criteria: &'a FilterCriteria,
    qb: QueryBuilder<'a, Postgres>,
}

impl<'a> fmt::Debug for PropertyFilterQuery<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyFilterQuery")
            .field("criteria", &self.criteria)
            .field("query_builder", &"<sqlx::QueryBuilder<Postgres>>")
            .finish()
    }
}

impl<'a> PropertyFilterQuery<'a> {
    pub fn new(criteria: &'a FilterCriteria) -> Self {
        let qb = QueryBuilder::new(format!(
            "SELECT {} FROM properties WHERE 1=1",
            PROPERTY_COLUMNS
        ));

        Self { criteria, qb }
    }

    pub fn build(mut self) -> QueryBuilder<'a, Postgres> {
        self.apply_filters();
        self.qb
    }

    fn apply_filters(&mut self) {
        if let Some(name) = self.criteria.name.as_deref()
            && !name.trim().is_empty()
        {
            self.qb.push(" AND name ILIKE ");
            self.qb.push_bind(format!("%{}%", name));
        }

        if let Some(address) = self.criteria.address.as_deref()
            && !address.trim().is_empty()
        {
            self.qb.push(" AND address ILIKE ");
            self.qb.push_bind(format!("%{}%", address));
        }

        if let Some(min_price) = self.criteria.min_price {
            self.qb.push(" AND price >= ");
            self.qb.push_bind(min_price);
        }

        if let Some(max_price) = self.criteria.max_price {
            self.qb.push(" AND price <= ");
            self.qb.push_bind(max_price);
        }
    }
}
