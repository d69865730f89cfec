use async_trait::async_trait;
use uuid::Uuid;

use crate::{domain::PropertyImageRecord, error::Result};

/// Repository port for property image reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PropertyImageRepository: Send + Sync {
    /// The first enabled image for a property, or `None` when the property
    /// has no images or only disabled ones.
    ///
    /// "First" is a stable contract, not storage luck: adapters must order
    /// by image id so the choice is deterministic for a given stored state.
    async fn first_enabled_for_property(
        &self,
        property_id: Uuid,
    ) -> Result<Option<PropertyImageRecord>>;
}
