use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use storefront_infra::StoreError;

use crate::app::filters::FilterError;
use crate::app::render::RenderError;

/// Everything a view can fail with.
#[derive(Debug, Error)]
pub enum ViewError {
    /// No record with the requested slug. The payload names the record kind.
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl IntoResponse for ViewError {
    fn into_response(self) -> Response {
        match self {
            ViewError::NotFound(_) => json_error(StatusCode::NOT_FOUND, "not_found", self.to_string()),
            ViewError::Filter(e) => json_error(StatusCode::BAD_REQUEST, "invalid_filter", e.to_string()),
            ViewError::Store(e) => {
                tracing::error!(error = %e, "catalog store failed");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", "catalog unavailable")
            }
            ViewError::Render(e) => {
                tracing::error!(error = %e, "render failed");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "render_error", "failed to render page")
            }
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
