//! HTTP request handlers for the Features API.

pub mod landing;
pub mod conformance;
pub mod collections;
pub mod items;
pub mod locations;
pub mod unsupported;

use axum::http::{header, StatusCode};
use axum::response::Response;

use feature_store::StoreError;
use features_protocol::ApiError;

/// Build a response with the given status, content type and body.
pub(crate) fn body_response(status: StatusCode, content_type: &str, body: String) -> Response {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, content_type)
        .body(body.into())
        .unwrap()
}

/// Map an [`ApiError`] to its exception response.
pub(crate) fn error_response(err: &ApiError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let json = serde_json::to_string(&err.to_exception()).unwrap_or_default();
    body_response(status, "application/json", json)
}

/// Map a store failure on the read path to an [`ApiError`].
pub(crate) fn store_error(err: StoreError) -> ApiError {
    match err {
        StoreError::CollectionNotFound(name) => ApiError::CollectionNotFound(name),
        StoreError::Backend(message) => ApiError::Store(message),
    }
}
