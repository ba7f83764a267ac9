//! Request parameters and the page contexts handed to renderers.

use std::collections::HashMap;

use serde::{Serialize, Serializer};

use storefront_catalog::{Category, Product, Size, Slug};

// -------------------------
// Request parameters
// -------------------------

/// Rendered in place of a parameter that was not submitted.
pub const BLANK: &str = " ";

/// A submitted query value, or the blank placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParamValue {
    #[default]
    Blank,
    Value(String),
}

impl ParamValue {
    /// Missing and empty parameters are both blank.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some(v) if !v.is_empty() => Self::Value(v.to_string()),
            _ => Self::Blank,
        }
    }

    pub fn as_value(&self) -> Option<&str> {
        match self {
            Self::Blank => None,
            Self::Value(v) => Some(v),
        }
    }

    /// The value as templates print it.
    pub fn display(&self) -> &str {
        self.as_value().unwrap_or(BLANK)
    }
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.display())
    }
}

/// Query parameters understood by the catalog view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogParams {
    pub q: Option<String>,
    pub color: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub size: Option<String>,
    pub show_search: Option<String>,
    pub reset_search: Option<String>,
    pub show_filters: Option<String>,
}

impl CatalogParams {
    /// Pick the known keys out of a decoded query string; others are ignored.
    pub fn from_query(query: &HashMap<String, String>) -> Self {
        let get = |key: &str| query.get(key).cloned();
        Self {
            q: get("q"),
            color: get("color"),
            min_price: get("min_price"),
            max_price: get("max_price"),
            size: get("size"),
            show_search: get("show_search"),
            reset_search: get("reset_search"),
            show_filters: get("show_filters"),
        }
    }
}

/// Echo of the filter inputs, used to repopulate the filter controls.
///
/// Every key is always present; unsubmitted ones hold [`ParamValue::Blank`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterParams {
    pub color: ParamValue,
    pub min_price: ParamValue,
    pub max_price: ParamValue,
    pub size: ParamValue,
    pub q: ParamValue,
}

// -------------------------
// Page contexts
// -------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeContext {
    pub categories: Vec<Category>,
    pub current_category: Option<Slug>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogContext {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub current_category: Option<Slug>,
    pub filter_params: FilterParams,
    pub sizes: Vec<Size>,
    pub search_query: ParamValue,
    #[serde(skip_serializing_if = "is_false")]
    pub show_search: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub reset_search: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductDetailContext {
    pub categories: Vec<Category>,
    pub product: Product,
    pub related_products: Vec<Product>,
    pub current_category: Slug,
}

/// Everything a template may read for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PageContext {
    /// Serialises as `{}`.
    Empty {},
    Home(HomeContext),
    Catalog(Box<CatalogContext>),
    ProductDetail(Box<ProductDetailContext>),
}

impl PageContext {
    pub fn empty() -> Self {
        Self::Empty {}
    }

    pub fn categories(&self) -> &[Category] {
        match self {
            Self::Empty {} => &[],
            Self::Home(c) => &c.categories,
            Self::Catalog(c) => &c.categories,
            Self::ProductDetail(c) => &c.categories,
        }
    }

    pub fn current_category(&self) -> Option<&Slug> {
        match self {
            Self::Empty {} => None,
            Self::Home(c) => c.current_category.as_ref(),
            Self::Catalog(c) => c.current_category.as_ref(),
            Self::ProductDetail(c) => Some(&c.current_category),
        }
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_serializes_as_placeholder() {
        let params = FilterParams {
            color: ParamValue::Value("red".into()),
            ..FilterParams::default()
        };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            serde_json::json!({
                "color": "red",
                "min_price": " ",
                "max_price": " ",
                "size": " ",
                "q": " ",
            })
        );
    }

    #[test]
    fn empty_and_missing_params_are_blank() {
        assert_eq!(ParamValue::from_raw(None), ParamValue::Blank);
        assert_eq!(ParamValue::from_raw(Some("")), ParamValue::Blank);
        assert_eq!(ParamValue::from_raw(Some(" ")), ParamValue::Value(" ".into()));
    }

    #[test]
    fn empty_context_is_an_empty_object() {
        assert_eq!(
            serde_json::to_value(PageContext::empty()).unwrap(),
            serde_json::json!({})
        );
    }

    #[test]
    fn catalog_params_ignore_unknown_keys() {
        let query: HashMap<String, String> = [("color", "red"), ("page", "2")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let params = CatalogParams::from_query(&query);
        assert_eq!(params.color.as_deref(), Some("red"));
        assert!(params.q.is_none());
    }
}
