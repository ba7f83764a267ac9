use axum::http::HeaderMap;

/// Header set by htmx on every request it issues.
pub const PARTIAL_REFRESH_HEADER: &str = "HX-Request";

/// Where a request came from: a normal navigation or a partial refresh.
///
/// Inserted into request extensions by
/// [`request_origin`](crate::middleware::request_origin) for every route.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum RequestOrigin {
    /// Browser navigation; answer with the full layout.
    #[default]
    FullPage,
    /// Progressive-enhancement request; answer with a fragment.
    PartialRefresh,
}

impl RequestOrigin {
    /// Any non-empty `HX-Request` value marks a partial refresh.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        match headers.get(PARTIAL_REFRESH_HEADER) {
            Some(v) if !v.as_bytes().is_empty() => Self::PartialRefresh,
            _ => Self::FullPage,
        }
    }

    pub fn is_partial(self) -> bool {
        self == Self::PartialRefresh
    }
}
