//! Features API Service Library
//!
//! This crate provides the HTTP server implementation for a subset of
//! the OGC API - Features specification over configured record
//! collections.

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod content_negotiation;
pub mod handlers;
pub mod html;
pub mod limits;
pub mod query;
pub mod state;

use state::AppState;

/// Build the application router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Landing page
        .route("/", get(handlers::landing::landing_handler))
        // Conformance
        .route("/conformance", get(handlers::conformance::conformance_handler))
        // Collections
        .route(
            "/collections",
            get(handlers::collections::list_collections_handler),
        )
        .route(
            "/collections/:collection_id",
            get(handlers::collections::get_collection_handler)
                .post(handlers::collections::insert_items_handler),
        )
        // Items query
        .route(
            "/collections/:collection_id/items",
            get(handlers::items::items_handler),
        )
        // Locations query
        .route(
            "/collections/:collection_id/locations",
            get(handlers::locations::locations_handler),
        )
        // Query kinds with a fixed not-yet-supported answer
        .route(
            "/collections/:collection_id/position",
            get(handlers::unsupported::position_handler),
        )
        .route(
            "/collections/:collection_id/radius",
            get(handlers::unsupported::radius_handler),
        )
        .route(
            "/collections/:collection_id/area",
            get(handlers::unsupported::area_handler),
        )
        .route(
            "/collections/:collection_id/cube",
            get(handlers::unsupported::cube_handler),
        )
        .route(
            "/collections/:collection_id/trajectory",
            get(handlers::unsupported::trajectory_handler),
        )
        .route(
            "/collections/:collection_id/corridor",
            get(handlers::unsupported::corridor_handler),
        )
        .route(
            "/collections/:collection_id/instances",
            get(handlers::unsupported::instances_handler),
        )
        // Middleware
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
