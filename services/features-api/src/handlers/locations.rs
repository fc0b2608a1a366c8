//! Locations query handler.
//!
//! Locations look records up by an integer identifier field instead of
//! spatial or attribute filters, with their own pagination and a
//! narrower format switch than the items pipeline.

use axum::{
    extract::{Extension, Path, RawQuery},
    http::{HeaderMap, StatusCode},
    response::Response,
};
use std::sync::Arc;

use feature_store::{paginate, Predicate};
use features_protocol::geojson::{project_records, serialize_edr};
use features_protocol::params::{FilterOp, FilterValue};
use features_protocol::{ApiError, Format, Link, RenderOptions, RequestedFormat};

use crate::content_negotiation::{negotiate_format, LOCATION_FORMATS};
use crate::limits::{check_locations_cap, resolve_limit};
use crate::query::{first_value, parse_limit, parse_offset, parse_query_pairs, to_store_path};
use crate::state::AppState;

use super::{body_response, error_response, store_error};

/// GET /collections/:collection_id/locations
pub async fn locations_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(collection_id): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    let config = state.config.read().await;

    let Some(collection) = config.find_collection(&collection_id) else {
        return error_response(&ApiError::CollectionNotFound(collection_id));
    };

    let Some(locations_field) = collection.locations_field.as_deref() else {
        return error_response(&ApiError::UnsupportedQuery("Locations".to_string()));
    };

    let raw_query = query.unwrap_or_default();
    let pairs = parse_query_pairs(&raw_query);

    let format = negotiate_format(LOCATION_FORMATS, first_value(&pairs, "f"), &headers);

    // Paging parameters are parsed before the location lookup so their
    // errors surface even for requests that would return nothing.
    let limit = match parse_limit(first_value(&pairs, "limit")) {
        Ok(Some(limit)) => limit,
        Ok(None) => return error_response(&ApiError::MissingLimit),
        Err(e) => return error_response(&e),
    };
    let offset = match parse_offset(first_value(&pairs, "offset")) {
        Ok(offset) => offset,
        Err(e) => return error_response(&e),
    };

    // No locationId means no lookup: an empty GeoJSON array, not an error.
    let Some(raw_id) = first_value(&pairs, "locationId") else {
        return body_response(StatusCode::OK, "application/geo+json", "[]".to_string());
    };

    let location_id: i64 = match raw_id.parse() {
        Ok(id) => id,
        Err(_) => return error_response(&ApiError::InvalidLocationId),
    };

    let predicate = Predicate::Field {
        path: to_store_path(locations_field),
        op: FilterOp::Eq,
        value: FilterValue::Text(location_id.to_string()),
    };

    let records = match state.store.query(&collection.id, &[predicate]) {
        Ok(records) => records,
        Err(e) => return error_response(&store_error(e)),
    };

    let page = paginate(records, Some(resolve_limit(limit) as usize), offset);

    if let Err(e) = check_locations_cap(page.number_returned) {
        return error_response(&e);
    }

    let self_link = Link::new(
        format!(
            "{}/collections/{}/locations?{}",
            state.base_url, collection.id, raw_query
        ),
        "self",
    )
    .with_type(format.media_type())
    .with_title("This document");
    let links = vec![self_link];

    let opts = RenderOptions {
        number_matched: page.number_matched,
        number_returned: page.number_returned,
        links: &links,
        fields: &collection.display_fields,
        geometry_field: collection.geometry_field.as_deref(),
        datetime_field: collection.datetime_field.as_deref(),
    };

    match format {
        RequestedFormat::Known(Format::GeoJson) => {
            let json = serde_json::to_string(&serialize_edr(&page.records, &opts))
                .unwrap_or_default();
            body_response(StatusCode::OK, "application/geo+json", json)
        }
        RequestedFormat::Known(Format::Json) => {
            let projected = project_records(&page.records, &collection.display_fields);
            let json = serde_json::to_string(&projected).unwrap_or_default();
            body_response(StatusCode::OK, "application/json", json)
        }
        other => error_response(&ApiError::UnsupportedFormat(other.as_str().to_string())),
    }
}
