use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::{
    database::ports::{PropertyImageRepository, PropertyRepository},
    domain::{FilterCriteria, PropertyRecord, PropertyView},
    error::Result,
};

/// The read pipeline: fetch property records, then enrich each with its
/// first enabled image via a per-record secondary lookup.
///
/// Stateless; every call is a single pass with no retries or caching. An
/// image lookup failure aborts the whole batch and propagates — there is
/// deliberately no per-item error isolation.
pub struct ListingService {
    properties: Arc<dyn PropertyRepository>,
    images: Arc<dyn PropertyImageRepository>,
}

impl std::fmt::Debug for ListingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListingService").finish_non_exhaustive()
    }
}

impl ListingService {
    pub fn new(
        properties: Arc<dyn PropertyRepository>,
        images: Arc<dyn PropertyImageRepository>,
    ) -> Self {
        Self { properties, images }
    }

    /// Every property, enriched, in storage order.
    pub async fn list_all(&self) -> Result<Vec<PropertyView>> {
        let records = self.properties.fetch_all().await?;
        self.assemble_views(records).await
    }

    /// A single property by id. `Ok(None)` means the property does not
    /// exist — a normal outcome, distinct from a missing image.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<PropertyView>> {
        let Some(record) = self.properties.fetch_by_id(id).await? else {
            return Ok(None);
        };

        let image = self.first_image(record.id).await?;
        Ok(Some(PropertyView::assemble(record, image)))
    }

    /// Properties matching the combined criteria predicate, enriched.
    pub async fn list_filtered(
        &self,
        criteria: &FilterCriteria,
    ) -> Result<Vec<PropertyView>> {
        let records = self.properties.fetch_filtered(criteria).await?;
        self.assemble_views(records).await
    }

    /// One image lookup per record, sequentially, preserving input order.
    /// Each id is looked up exactly once per occurrence; no deduplication.
    async fn assemble_views(
        &self,
        records: Vec<PropertyRecord>,
    ) -> Result<Vec<PropertyView>> {
        debug!(count = records.len(), "assembling property views");

        let mut views = Vec::with_capacity(records.len());
        for record in records {
            let image = self.first_image(record.id).await?;
            views.push(PropertyView::assemble(record, image));
        }

        Ok(views)
    }

    async fn first_image(&self, property_id: Uuid) -> Result<Option<String>> {
        let image = self.images.first_enabled_for_property(property_id).await?;
        Ok(image.map(|record| record.file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        database::ports::{
            properties::MockPropertyRepository,
            property_images::MockPropertyImageRepository,
        },
        domain::PropertyImageRecord,
        error::HavenError,
    };
    use mockall::predicate::eq;
    use rust_decimal::Decimal;

    fn record(id: u128, name: &str, price: i64) -> PropertyRecord {
        PropertyRecord {
            id: Uuid::from_u128(id),
            owner_id: Uuid::from_u128(100 + id),
            name: name.to_string(),
            address: format!("{} Test Street", id),
            price: Decimal::new(price, 0),
            code_internal: format!("PROP-{:03}", id),
            year: 2020,
        }
    }

    fn image(id: u128, property_id: u128, file: &str) -> PropertyImageRecord {
        PropertyImageRecord {
            id: Uuid::from_u128(id),
            property_id: Uuid::from_u128(property_id),
            file: file.to_string(),
            enabled: true,
        }
    }

    fn service(
        properties: MockPropertyRepository,
        images: MockPropertyImageRepository,
    ) -> ListingService {
        ListingService::new(Arc::new(properties), Arc::new(images))
    }

    #[tokio::test]
    async fn list_all_enriches_each_record_with_its_image() {
        let mut properties = MockPropertyRepository::new();
        properties.expect_fetch_all().return_once(|| {
            Ok(vec![record(1, "Modern Downtown Apartment", 450_000)])
        });

        let mut images = MockPropertyImageRepository::new();
        images
            .expect_first_enabled_for_property()
            .with(eq(Uuid::from_u128(1)))
            .return_once(|_| Ok(Some(image(10, 1, "a.jpg"))));

        let views = service(properties, images).list_all().await.unwrap();

        assert_eq!(views.len(), 1);
        assert_eq!(views[0].name, "Modern Downtown Apartment");
        assert_eq!(views[0].image.as_deref(), Some("a.jpg"));
    }

    #[tokio::test]
    async fn image_is_absent_when_no_enabled_image_exists() {
        let mut properties = MockPropertyRepository::new();
        properties
            .expect_fetch_all()
            .return_once(|| Ok(vec![record(1, "Cozy Suburban House", 325_000)]));

        let mut images = MockPropertyImageRepository::new();
        images
            .expect_first_enabled_for_property()
            .return_once(|_| Ok(None));

        let views = service(properties, images).list_all().await.unwrap();

        assert_eq!(views.len(), 1);
        assert_eq!(views[0].image, None);
    }

    #[tokio::test]
    async fn views_preserve_record_order_and_cardinality() {
        let mut properties = MockPropertyRepository::new();
        properties.expect_fetch_all().return_once(|| {
            Ok(vec![
                record(3, "Penthouse Suite", 1_200_000),
                record(1, "Modern Downtown Apartment", 450_000),
                record(2, "Cozy Suburban House", 325_000),
            ])
        });

        let mut images = MockPropertyImageRepository::new();
        images
            .expect_first_enabled_for_property()
            .times(3)
            .returning(|_| Ok(None));

        let views = service(properties, images).list_all().await.unwrap();

        let names: Vec<_> = views.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Penthouse Suite",
                "Modern Downtown Apartment",
                "Cozy Suburban House"
            ]
        );
    }

    #[tokio::test]
    async fn get_by_id_returns_none_for_missing_property() {
        let mut properties = MockPropertyRepository::new();
        properties
            .expect_fetch_by_id()
            .with(eq(Uuid::from_u128(42)))
            .return_once(|_| Ok(None));

        // No image lookup may happen when the property itself is absent.
        let images = MockPropertyImageRepository::new();

        let view = service(properties, images)
            .get_by_id(Uuid::from_u128(42))
            .await
            .unwrap();

        assert!(view.is_none());
    }

    #[tokio::test]
    async fn get_by_id_assembles_the_singleton() {
        let mut properties = MockPropertyRepository::new();
        properties
            .expect_fetch_by_id()
            .with(eq(Uuid::from_u128(1)))
            .return_once(|_| Ok(Some(record(1, "Modern Downtown Apartment", 450_000))));

        let mut images = MockPropertyImageRepository::new();
        images
            .expect_first_enabled_for_property()
            .with(eq(Uuid::from_u128(1)))
            .return_once(|_| Ok(Some(image(10, 1, "a.jpg"))));

        let view = service(properties, images)
            .get_by_id(Uuid::from_u128(1))
            .await
            .unwrap()
            .expect("property should exist");

        assert_eq!(view.id_property, Uuid::from_u128(1));
        assert_eq!(view.image.as_deref(), Some("a.jpg"));
    }

    #[tokio::test]
    async fn get_by_id_is_idempotent_without_writes() {
        let mut properties = MockPropertyRepository::new();
        properties
            .expect_fetch_by_id()
            .times(2)
            .returning(|_| Ok(Some(record(1, "Modern Downtown Apartment", 450_000))));

        let mut images = MockPropertyImageRepository::new();
        images
            .expect_first_enabled_for_property()
            .times(2)
            .returning(|_| Ok(Some(image(10, 1, "a.jpg"))));

        let svc = service(properties, images);
        let first = svc.get_by_id(Uuid::from_u128(1)).await.unwrap();
        let second = svc.get_by_id(Uuid::from_u128(1)).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn list_filtered_passes_criteria_through() {
        let criteria = FilterCriteria {
            min_price: Some(Decimal::new(500_000, 0)),
            ..Default::default()
        };

        let mut properties = MockPropertyRepository::new();
        properties
            .expect_fetch_filtered()
            .with(eq(criteria.clone()))
            .return_once(|_| Ok(vec![record(2, "Luxury Waterfront Condo", 850_000)]));

        let mut images = MockPropertyImageRepository::new();
        images
            .expect_first_enabled_for_property()
            .return_once(|_| Ok(None));

        let views = service(properties, images)
            .list_filtered(&criteria)
            .await
            .unwrap();

        assert_eq!(views.len(), 1);
        assert_eq!(views[0].price, Decimal::new(850_000, 0));
    }

    #[tokio::test]
    async fn image_lookup_failure_aborts_the_whole_batch() {
        let mut properties = MockPropertyRepository::new();
        properties.expect_fetch_all().return_once(|| {
            Ok(vec![
                record(1, "Modern Downtown Apartment", 450_000),
                record(2, "Cozy Suburban House", 325_000),
            ])
        });

        let mut images = MockPropertyImageRepository::new();
        images
            .expect_first_enabled_for_property()
            .return_once(|_| Err(HavenError::Internal("storage offline".to_string())));

        let result = service(properties, images).list_all().await;

        assert!(matches!(result, Err(HavenError::Internal(_))));
    }

    #[tokio::test]
    async fn duplicate_records_are_each_looked_up_once() {
        let mut properties = MockPropertyRepository::new();
        properties.expect_fetch_all().return_once(|| {
            Ok(vec![
                record(1, "Modern Downtown Apartment", 450_000),
                record(1, "Modern Downtown Apartment", 450_000),
            ])
        });

        let mut images = MockPropertyImageRepository::new();
        images
            .expect_first_enabled_for_property()
            .times(2)
            .returning(|_| Ok(Some(image(10, 1, "a.jpg"))));

        let views = service(properties, images).list_all().await.unwrap();
        assert_eq!(views.len(), 2);
    }
}
