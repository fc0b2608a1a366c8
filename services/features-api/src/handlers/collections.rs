//! Collection metadata handlers and the bulk write path.

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::Response,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use features_protocol::{ApiError, CollectionMetadata, Collections, Link, Record};

use crate::state::AppState;

use super::{body_response, error_response};

/// GET /collections - List collection descriptions
pub async fn list_collections_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    let config = state.config.read().await;

    let collections = Collections {
        links: vec![Link::new(format!("{}/collections", state.base_url), "self")
            .with_type("application/json")
            .with_title("This document")],
        collections: config
            .collections
            .iter()
            .map(|c| CollectionMetadata::new(&c.id, &c.title, &c.description, &state.base_url))
            .collect(),
    };

    let json = serde_json::to_string_pretty(&collections).unwrap_or_default();

    body_response(StatusCode::OK, "application/json", json)
}

/// GET /collections/:collection_id - One collection description
pub async fn get_collection_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(collection_id): Path<String>,
) -> Response {
    let config = state.config.read().await;

    let Some(collection) = config.find_collection(&collection_id) else {
        return error_response(&ApiError::CollectionNotFound(collection_id));
    };

    let metadata = CollectionMetadata::new(
        &collection.id,
        &collection.title,
        &collection.description,
        &state.base_url,
    );

    let json = serde_json::to_string_pretty(&metadata).unwrap_or_default();

    body_response(StatusCode::OK, "application/json", json)
}

/// Bulk insert request body.
#[derive(Debug, Deserialize)]
pub struct InsertItemsRequest {
    /// Marks the body as a bulk payload; single-item bodies use the
    /// same shape with one element.
    #[serde(default)]
    pub bulk: bool,

    /// Records to insert.
    pub items: Vec<Record>,
}

/// POST /collections/:collection_id - Bulk insert records
///
/// Records whose id already exists are skipped. A store failure keeps
/// the historical 500 "Duplicated" mapping.
pub async fn insert_items_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(collection_id): Path<String>,
    Json(request): Json<InsertItemsRequest>,
) -> Response {
    let config = state.config.read().await;

    if config.find_collection(&collection_id).is_none() {
        return error_response(&ApiError::CollectionNotFound(collection_id));
    }

    let total = request.items.len();
    let inserted = match state.store.insert_many(&collection_id, request.items) {
        Ok(count) => count,
        Err(e) => {
            tracing::error!("Insert into {} failed: {}", collection_id, e);
            return error_response(&ApiError::Duplicated);
        }
    };

    tracing::info!(
        "Inserted {}/{} records into {} (bulk={})",
        inserted,
        total,
        collection_id,
        request.bulk
    );

    let body = json!({ "inserted": inserted, "received": total }).to_string();

    body_response(StatusCode::CREATED, "application/json", body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_request_parsing() {
        let body = r#"{"bulk": true, "items": [{"id": 1}, {"id": 2}]}"#;
        let request: InsertItemsRequest = serde_json::from_str(body).unwrap();
        assert!(request.bulk);
        assert_eq!(request.items.len(), 2);
    }

    #[test]
    fn test_insert_request_bulk_defaults_false() {
        let body = r#"{"items": [{"id": 1}]}"#;
        let request: InsertItemsRequest = serde_json::from_str(body).unwrap();
        assert!(!request.bulk);
    }
}
