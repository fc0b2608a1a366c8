//! Items query handler: the main query-resolution pipeline.
//!
//! A request flows negotiate-format, validate-parameters, build
//! predicates, element cap, paginate, render; the first failure
//! short-circuits into an exception response.

use axum::{
    extract::{Extension, Path, RawQuery},
    http::{HeaderMap, StatusCode},
    response::Response,
};
use std::sync::Arc;

use feature_store::{has_next_page, has_prev_page, paginate, Page};
use features_protocol::geojson::{project_records, serialize_edr, serialize_features};
use features_protocol::params::validate_parameters;
use features_protocol::query_string::upsert_param;
use features_protocol::{ApiError, Format, Link, RenderOptions, RequestedFormat};

use crate::config::{ApiType, CollectionConfig};
use crate::content_negotiation::{negotiate_format, ITEM_FORMATS};
use crate::limits::{check_element_cap, resolve_limit, HTML_MAX_ELEMENTS, LIMIT_DEFAULT};
use crate::query::{
    bbox_predicate, datetime_predicate, field_predicates, first_value, parse_bbox, parse_limit,
    parse_offset, parse_query_pairs,
};
use crate::state::AppState;

use super::{body_response, error_response, store_error};

/// GET /collections/:collection_id/items
pub async fn items_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(collection_id): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    let config = state.config.read().await;

    let Some(collection) = config.find_collection(&collection_id) else {
        return error_response(&ApiError::CollectionNotFound(collection_id));
    };

    let raw_query = query.unwrap_or_default();
    let pairs = parse_query_pairs(&raw_query);

    // The format is settled before validation so error bodies cannot
    // depend on it later in the pipeline.
    let format = negotiate_format(ITEM_FORMATS, first_value(&pairs, "f"), &headers);

    if let Err(e) = validate_parameters(
        pairs.iter().map(|(k, _)| k.as_str()),
        &collection.filter_fields,
    ) {
        return error_response(&e);
    }

    let limit = match parse_limit(first_value(&pairs, "limit")) {
        Ok(limit) => limit,
        Err(e) => return error_response(&e),
    };
    let limit = match (limit, collection.api_type) {
        (Some(limit), _) => limit,
        (None, ApiType::Edr) => return error_response(&ApiError::MissingLimit),
        (None, ApiType::Features) => LIMIT_DEFAULT,
    };

    let offset = match parse_offset(first_value(&pairs, "offset")) {
        Ok(offset) => offset,
        Err(e) => return error_response(&e),
    };

    // Predicates apply bbox, then datetime, then field filters, so the
    // matched count reflects every constraint.
    let mut predicates = Vec::new();

    if let Some(raw) = first_value(&pairs, "bbox") {
        let coords = match parse_bbox(raw) {
            Ok(coords) => coords,
            Err(e) => return error_response(&e),
        };
        if let Some(predicate) = bbox_predicate(collection, &coords) {
            predicates.push(predicate);
        }
    }

    if let Some(raw) = first_value(&pairs, "datetime") {
        if let Some(predicate) = datetime_predicate(collection, raw) {
            predicates.push(predicate);
        }
    }

    predicates.extend(field_predicates(&pairs, collection));

    let records = match state.store.query(&collection.id, &predicates) {
        Ok(records) => records,
        Err(e) => return error_response(&store_error(e)),
    };

    // Cap check runs on the requested limit; the -1 sentinel resolves
    // afterwards.
    if let Err(e) = check_element_cap(limit, records.len()) {
        return error_response(&e);
    }
    let limit = resolve_limit(limit);

    let page = paginate(records, Some(limit as usize), offset);

    let skip_geometry = first_value(&pairs, "skipGeometry") == Some("true");

    let links = build_item_links(
        &state.base_url,
        &collection.id,
        &collection.description,
        &raw_query,
        &format,
        limit,
        offset as i64,
        page.number_matched,
    );

    render_page(
        state.renderer.as_ref(),
        collection,
        &format,
        &page,
        &links,
        skip_geometry,
    )
}

#[allow(clippy::too_many_arguments)]
fn build_item_links(
    base_url: &str,
    collection_id: &str,
    description: &str,
    raw_query: &str,
    format: &RequestedFormat,
    limit: i64,
    offset: i64,
    number_matched: usize,
) -> Vec<Link> {
    let items_url = format!("{}/collections/{}/items", base_url, collection_id);
    let href = |query: &str| {
        if query.is_empty() {
            items_url.clone()
        } else {
            format!("{}?{}", items_url, query)
        }
    };

    let mut links = vec![
        Link::new(href(raw_query), "self")
            .with_type(format.media_type())
            .with_title("This document"),
        Link::new(format!("{}/collections/{}", base_url, collection_id), "collection")
            .with_type(format.media_type())
            .with_title(description),
    ];

    // One alternate per accepted format, the negotiated one included.
    for alternate in ITEM_FORMATS {
        links.push(
            Link::new(href(&upsert_param(raw_query, "f", alternate.as_str())), "alternate")
                .with_type(alternate.media_type())
                .with_title(format!("This document as {}", alternate.as_str())),
        );
    }

    // Next and prev are advertised by independent checks; both carry
    // explicit limit and offset so a defaulted limit survives into the
    // link.
    if has_next_page(limit, offset, number_matched) {
        let query = upsert_param(raw_query, "limit", &limit.to_string());
        let query = upsert_param(&query, "offset", &(offset + limit).to_string());
        links.push(
            Link::new(href(&query), "next")
                .with_type(format.media_type())
                .with_title("Next page"),
        );
    }
    if has_prev_page(limit, offset) {
        let query = upsert_param(raw_query, "limit", &limit.to_string());
        let query = upsert_param(&query, "offset", &(offset - limit).to_string());
        links.push(
            Link::new(href(&query), "prev")
                .with_type(format.media_type())
                .with_title("Previous page"),
        );
    }

    links
}

fn render_page(
    renderer: &dyn crate::html::TemplateRenderer,
    collection: &CollectionConfig,
    format: &RequestedFormat,
    page: &Page,
    links: &[Link],
    skip_geometry: bool,
) -> Response {
    let geometry_field = if skip_geometry {
        None
    } else {
        collection.geometry_field.as_deref()
    };

    let opts = RenderOptions {
        number_matched: page.number_matched,
        number_returned: page.number_returned,
        links,
        fields: &collection.display_fields,
        geometry_field,
        datetime_field: collection.datetime_field.as_deref(),
    };

    match format {
        RequestedFormat::Known(Format::GeoJson) => {
            let json = match collection.api_type {
                ApiType::Edr => serde_json::to_string(&serialize_edr(&page.records, &opts)),
                ApiType::Features => {
                    serde_json::to_string(&serialize_features(&page.records, &opts))
                }
            }
            .unwrap_or_default();
            body_response(StatusCode::OK, "application/geo+json", json)
        }
        RequestedFormat::Known(Format::Json) => {
            let projected = project_records(&page.records, &collection.display_fields);
            let json = serde_json::to_string(&projected).unwrap_or_default();
            body_response(StatusCode::OK, "application/json", json)
        }
        RequestedFormat::Known(Format::Html) => {
            if page.number_returned > HTML_MAX_ELEMENTS {
                return error_response(&ApiError::HtmlTooLarge);
            }
            let html = renderer.render(
                "collections/items.html",
                &collection.title,
                &collection.display_fields,
                &page.records,
            );
            body_response(StatusCode::OK, "text/html", html)
        }
        other => error_response(&ApiError::UnsupportedFormat(other.as_str().to_string())),
    }
}
