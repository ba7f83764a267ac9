//! Filter/search composition for the catalog view.
//!
//! Turns the catalog query parameters into a narrowed [`ProductQuery`] plus
//! an echo of what was applied. Nothing here touches the store; the query is
//! evaluated later, and only if the chosen template needs products.

use thiserror::Error;

use storefront_catalog::{Category, Price};
use storefront_infra::{ProductFilter, ProductQuery};

use crate::app::dto::{CatalogParams, FilterParams, ParamValue};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("{key} must be a non-negative amount with at most two decimals, got {value:?}")]
    InvalidPrice { key: &'static str, value: String },
}

/// The structured filters, in the order they are applied after search.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FilterKey {
    Color,
    MinPrice,
    MaxPrice,
    Size,
}

impl FilterKey {
    pub const ALL: [FilterKey; 4] = [
        FilterKey::Color,
        FilterKey::MinPrice,
        FilterKey::MaxPrice,
        FilterKey::Size,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FilterKey::Color => "color",
            FilterKey::MinPrice => "min_price",
            FilterKey::MaxPrice => "max_price",
            FilterKey::Size => "size",
        }
    }

    fn raw(self, params: &CatalogParams) -> Option<&str> {
        match self {
            FilterKey::Color => params.color.as_deref(),
            FilterKey::MinPrice => params.min_price.as_deref(),
            FilterKey::MaxPrice => params.max_price.as_deref(),
            FilterKey::Size => params.size.as_deref(),
        }
    }

    fn slot(self, echo: &mut FilterParams) -> &mut ParamValue {
        match self {
            FilterKey::Color => &mut echo.color,
            FilterKey::MinPrice => &mut echo.min_price,
            FilterKey::MaxPrice => &mut echo.max_price,
            FilterKey::Size => &mut echo.size,
        }
    }

    /// The predicate for a submitted value.
    pub fn to_filter(self, value: &str) -> Result<ProductFilter, FilterError> {
        let price = |key| {
            Price::parse(value).map_err(|_| FilterError::InvalidPrice {
                key,
                value: value.to_string(),
            })
        };
        Ok(match self {
            FilterKey::Color => ProductFilter::ColorIs(value.to_string()),
            FilterKey::MinPrice => ProductFilter::MinPrice(price(self.name())?),
            FilterKey::MaxPrice => ProductFilter::MaxPrice(price(self.name())?),
            FilterKey::Size => ProductFilter::HasSize(value.to_string()),
        })
    }
}

/// Result of [`compose`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    /// Narrowed, not yet evaluated.
    pub products: ProductQuery,
    pub filter_params: FilterParams,
    pub search_query: ParamValue,
}

/// Narrow `base` by category, then free-text search, then each structured
/// filter. All steps AND together.
pub fn compose(
    base: ProductQuery,
    category: Option<&Category>,
    params: &CatalogParams,
) -> Result<Composition, FilterError> {
    let mut products = base;
    if let Some(category) = category {
        products = products.filter(ProductFilter::Category(category.id));
    }

    let search_query = ParamValue::from_raw(params.q.as_deref());
    if let Some(q) = search_query.as_value() {
        products = products.filter(ProductFilter::Search(q.to_string()));
    }

    let mut filter_params = FilterParams {
        q: search_query.clone(),
        ..FilterParams::default()
    };
    for key in FilterKey::ALL {
        let value = ParamValue::from_raw(key.raw(params));
        if let Some(v) = value.as_value() {
            products = products.filter(key.to_filter(v)?);
        }
        *key.slot(&mut filter_params) = value;
    }

    Ok(Composition {
        products,
        filter_params,
        search_query,
    })
}
