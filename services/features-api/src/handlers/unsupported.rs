//! Query kinds the service routes but does not implement.
//!
//! Each endpoint exists so clients get a deterministic 400 naming the
//! query kind instead of a generic 404.

use axum::response::Response;

use features_protocol::ApiError;

use super::error_response;

fn unsupported(kind: &str) -> Response {
    error_response(&ApiError::UnsupportedQuery(kind.to_string()))
}

/// GET /collections/:collection_id/position
pub async fn position_handler() -> Response {
    unsupported("Position")
}

/// GET /collections/:collection_id/radius
pub async fn radius_handler() -> Response {
    unsupported("Radius")
}

/// GET /collections/:collection_id/area
pub async fn area_handler() -> Response {
    unsupported("Area")
}

/// GET /collections/:collection_id/cube
pub async fn cube_handler() -> Response {
    unsupported("Cube")
}

/// GET /collections/:collection_id/trajectory
pub async fn trajectory_handler() -> Response {
    unsupported("Trajectory")
}

/// GET /collections/:collection_id/corridor
pub async fn corridor_handler() -> Response {
    unsupported("Corridor")
}

/// GET /collections/:collection_id/instances
pub async fn instances_handler() -> Response {
    unsupported("Instances")
}
