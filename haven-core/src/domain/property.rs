use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted property document. Created by an external write path;
/// read-only from the listing pipeline's perspective.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRecord {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub address: String,
    pub price: Decimal,
    pub code_internal: String,
    pub year: i32,
}

/// An image attached to a property. Many images may reference the same
/// property; only images with `enabled = true` are eligible for display.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyImageRecord {
    pub id: Uuid,
    pub property_id: Uuid,
    pub file: String,
    pub enabled: bool,
}

/// A property owner. Persisted and seeded but not exposed over HTTP;
/// properties reference owners by id only.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerRecord {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub photo: Option<String>,
    pub birthday: NaiveDate,
}

/// The request-scoped composite returned to clients: a property record
/// flattened together with its first enabled image, if any.
///
/// Never persisted and never mutated after assembly. `image` is `Some`
/// iff at least one enabled image record exists for the property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyView {
    pub id_property: Uuid,
    pub id_owner: Uuid,
    pub name: String,
    pub address: String,
    pub price: Decimal,
    pub image: Option<String>,
}

impl PropertyView {
    /// Flatten a record and an optional image file reference into a view.
    pub fn assemble(record: PropertyRecord, image: Option<String>) -> Self {
        Self {
            id_property: record.id,
            id_owner: record.owner_id,
            name: record.name,
            address: record.address,
            price: record.price,
            image,
        }
    }
}

/// Optional, partially-specified filter over property records.
///
/// Every field is independently optional; a criteria value with nothing
/// set matches every record. No validation is performed: contradictory
/// bounds simply produce a predicate that matches nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub name: Option<String>,
    pub address: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}
