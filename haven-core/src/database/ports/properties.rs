use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    domain::{FilterCriteria, PropertyRecord},
    error::Result,
};

/// Repository port for property reads.
///
/// The filter variant accepts the raw criteria; translating them into a
/// storage predicate is the adapter's concern, so the service layer never
/// sees SQL.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// Every property record, match-everything predicate.
    async fn fetch_all(&self) -> Result<Vec<PropertyRecord>>;

    /// Zero or one record by exact identifier match.
    async fn fetch_by_id(&self, id: Uuid) -> Result<Option<PropertyRecord>>;

    /// Records matching the combined criteria predicate.
    async fn fetch_filtered(
        &self,
        criteria: &FilterCriteria,
    ) -> Result<Vec<PropertyRecord>>;
}
