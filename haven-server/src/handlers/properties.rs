use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, error};
use uuid::Uuid;

use haven_core::domain::{FilterCriteria, PropertyView};

use crate::{
    errors::{AppError, AppResult},
    state::AppState,
};

/// Query parameters for `GET /api/properties`. All optional; with none
/// present the request is a plain list-all.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyFilterParams {
    pub name: Option<String>,
    pub address: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl PropertyFilterParams {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.address.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
    }

    pub fn into_criteria(self) -> FilterCriteria {
        FilterCriteria {
            name: self.name,
            address: self.address,
            min_price: self.min_price,
            max_price: self.max_price,
        }
    }
}

pub async fn list_properties_handler(
    State(state): State<AppState>,
    Query(params): Query<PropertyFilterParams>,
) -> AppResult<Json<Vec<PropertyView>>> {
    debug!(?params, "listing properties");

    let result = if params.is_empty() {
        state.listings.list_all().await
    } else {
        state.listings.list_filtered(&params.into_criteria()).await
    };

    let views = result.map_err(|err| {
        error!(error = %err, "failed to retrieve properties");
        AppError::internal("An error occurred while retrieving properties")
    })?;

    Ok(Json(views))
}

pub async fn get_property_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PropertyView>> {
    debug!(%id, "getting property");

    let view = state.listings.get_by_id(id).await.map_err(|err| {
        error!(error = %err, property_id = %id, "failed to retrieve property");
        AppError::internal("An error occurred while retrieving the property")
    })?;

    match view {
        Some(view) => Ok(Json(view)),
        None => Err(AppError::not_found(format!(
            "Property with ID {} not found",
            id
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_with_nothing_set_mean_list_all() {
        assert!(PropertyFilterParams::default().is_empty());
    }

    #[test]
    fn any_single_param_switches_to_filtering() {
        let params = PropertyFilterParams {
            min_price: Some(Decimal::new(500_000, 0)),
            ..Default::default()
        };
        assert!(!params.is_empty());

        let criteria = params.into_criteria();
        assert_eq!(criteria.min_price, Some(Decimal::new(500_000, 0)));
        assert_eq!(criteria.name, None);
    }

    #[test]
    fn params_deserialize_from_camel_case_query() {
        let params: PropertyFilterParams =
            serde_urlencoded::from_str("name=House&minPrice=500000").unwrap();
        assert_eq!(params.name.as_deref(), Some("House"));
        assert_eq!(params.min_price, Some(Decimal::new(500_000, 0)));
        assert_eq!(params.max_price, None);
    }
}
