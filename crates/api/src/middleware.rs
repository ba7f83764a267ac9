use axum::{
    http::{header::VARY, HeaderValue},
    middleware::Next,
    response::Response,
};

use crate::context::{RequestOrigin, PARTIAL_REFRESH_HEADER};

/// Classify the request origin for the handlers and mark the response as
/// varying on it, so caches keep full pages and fragments apart.
pub async fn request_origin(
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let origin = RequestOrigin::from_headers(req.headers());
    req.extensions_mut().insert(origin);

    let mut res = next.run(req).await;
    res.headers_mut()
        .append(VARY, HeaderValue::from_static(PARTIAL_REFRESH_HEADER));
    res
}
