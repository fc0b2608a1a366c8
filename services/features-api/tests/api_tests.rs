//! HTTP surface tests over the full router.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use feature_store::MemoryStore;
use features_api::config::{ApiType, CollectionConfig, FeaturesConfig};
use features_api::state::AppState;
use features_protocol::Record;

fn sensor(i: i64) -> Record {
    let value = json!({
        "id": i,
        "province": if i % 2 == 0 { "SO" } else { "MI" },
        "altitude": 100 + i,
        "date": format!("2023-01-{:02}T00:00:00", (i % 28) + 1),
        "station_id": if i < 5 { 500 } else { 501 },
        "location": {"type": "Point", "coordinates": [9.0 + (i as f64) * 0.01, 45.5]}
    });
    match value {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

fn sensors_config() -> CollectionConfig {
    CollectionConfig {
        id: "sensors".to_string(),
        title: "Sensors".to_string(),
        description: "Air quality sensors".to_string(),
        display_fields: vec![
            "id".to_string(),
            "province".to_string(),
            "altitude".to_string(),
            "date".to_string(),
        ],
        filter_fields: vec!["province".to_string(), "altitude".to_string()],
        datetime_field: Some("date".to_string()),
        geometry_field: Some("location".to_string()),
        // bbox is a documented no-op without a geometry filter field
        geometry_filter_field: None,
        locations_field: Some("station_id".to_string()),
        api_type: ApiType::Features,
        seed_data: None,
    }
}

fn measurements_config() -> CollectionConfig {
    CollectionConfig {
        id: "measurements".to_string(),
        title: "Measurements".to_string(),
        description: "Sensor measurements".to_string(),
        display_fields: vec!["id".to_string(), "date".to_string()],
        filter_fields: vec![],
        datetime_field: Some("date".to_string()),
        geometry_field: None,
        geometry_filter_field: None,
        locations_field: None,
        api_type: ApiType::Edr,
        seed_data: None,
    }
}

/// "ghost" exists in config but is never registered with the store.
fn ghost_config() -> CollectionConfig {
    CollectionConfig {
        id: "ghost".to_string(),
        title: String::new(),
        description: String::new(),
        display_fields: vec![],
        filter_fields: vec![],
        datetime_field: None,
        geometry_field: None,
        geometry_filter_field: None,
        locations_field: None,
        api_type: ApiType::Features,
        seed_data: None,
    }
}

fn test_app(sensor_count: i64) -> Router {
    let config = FeaturesConfig {
        collections: vec![ghost_config(), measurements_config(), sensors_config()],
    };
    let records: Vec<Record> = (0..sensor_count).map(sensor).collect();
    let store = MemoryStore::new()
        .with_collection("sensors", records)
        .with_collection("measurements", vec![]);
    let state = AppState::with_parts(config, Arc::new(store), "http://localhost:8080");
    features_api::router(Arc::new(state))
}

async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

#[tokio::test]
async fn test_landing_page() {
    let response = get(&test_app(0), "/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["links"].as_array().unwrap().len() >= 3);
}

#[tokio::test]
async fn test_conformance() {
    let response = get(&test_app(0), "/conformance").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let classes = body["conformsTo"].as_array().unwrap();
    assert!(classes
        .iter()
        .any(|c| c == "http://www.opengis.net/spec/ogcapi-features-1/1.0/conf/core"));
}

#[tokio::test]
async fn test_collections_list() {
    let response = get(&test_app(0), "/collections").await;
    let body = body_json(response).await;
    let ids: Vec<&str> = body["collections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert!(ids.contains(&"sensors"));
    assert!(ids.contains(&"measurements"));
}

#[tokio::test]
async fn test_collection_metadata() {
    let response = get(&test_app(0), "/collections/sensors").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["id"], "sensors");
    assert_eq!(body["itemType"], "feature");
    assert!(body["extent"]["spatial"]["bbox"].is_array());
}

#[tokio::test]
async fn test_unknown_collection_is_404() {
    let response = get(&test_app(0), "/collections/nope/items").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_parameter_names_the_key() {
    let response = get(&test_app(5), "/collections/sensors/items?foo=bar").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("Unknown Parameter: foo"));
}

#[tokio::test]
async fn test_pagination_first_page() {
    let response = get(&test_app(25), "/collections/sensors/items?limit=10").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["numberMatched"], 25);
    assert_eq!(body["numberReturned"], 10);

    let rels: Vec<&str> = body["links"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["rel"].as_str().unwrap())
        .collect();
    assert!(rels.contains(&"next"));
    assert!(!rels.contains(&"prev"));
}

#[tokio::test]
async fn test_bbox_is_noop_without_geometry_filter_field() {
    let response = get(
        &test_app(10),
        "/collections/sensors/items?bbox=0.0,0.0,1.0,1.0",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["numberMatched"], 10);
}

#[tokio::test]
async fn test_malformed_bbox() {
    let response = get(&test_app(5), "/collections/sensors/items?bbox=1,2,3").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("malformed bbox parameter"));
}

#[tokio::test]
async fn test_limit_sentinel_returns_all() {
    let response = get(&test_app(250), "/collections/sensors/items?limit=-1").await;
    let body = body_json(response).await;
    assert_eq!(body["numberReturned"], 250);
}

#[tokio::test]
async fn test_field_filter() {
    let response = get(&test_app(10), "/collections/sensors/items?province=SO").await;
    let body = body_json(response).await;
    assert_eq!(body["numberMatched"], 5);
    for feature in body["features"].as_array().unwrap() {
        assert_eq!(feature["properties"]["province"], "SO");
    }
}

#[tokio::test]
async fn test_field_filter_with_operator() {
    let response = get(&test_app(10), "/collections/sensors/items?altitude__gte=105").await;
    let body = body_json(response).await;
    assert_eq!(body["numberMatched"], 5);
}

#[tokio::test]
async fn test_datetime_filter() {
    let response = get(
        &test_app(10),
        "/collections/sensors/items?datetime=2023-01-01T00:00:00/2023-01-05T00:00:00",
    )
    .await;
    let body = body_json(response).await;
    assert_eq!(body["numberMatched"], 5);
}

#[tokio::test]
async fn test_malformed_datetime_is_ignored() {
    let response = get(
        &test_app(10),
        "/collections/sensors/items?datetime=not-an-interval",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["numberMatched"], 10);
}

#[tokio::test]
async fn test_skip_geometry() {
    let response = get(&test_app(3), "/collections/sensors/items?skipGeometry=true").await;
    let body = body_json(response).await;
    assert!(body["features"][0]["geometry"].is_null());
}

#[tokio::test]
async fn test_plain_json_is_projected_array() {
    let response = get(&test_app(3), "/collections/sensors/items?f=json").await;
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );

    let body = body_json(response).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert!(items[0].get("location").is_none());
    assert!(items[0].get("province").is_some());
}

#[tokio::test]
async fn test_unknown_format_echoes_token() {
    let response = get(&test_app(3), "/collections/sensors/items?f=csv").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("Format csv not yet supported"));
}

#[tokio::test]
async fn test_html_over_cap_is_rejected() {
    let response = get(
        &test_app(150),
        "/collections/sensors/items?f=html&limit=200",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response)
        .await
        .contains("Request too large for HTML representation - Max 100 elements"));
}

#[tokio::test]
async fn test_html_under_cap_renders_table() {
    let response = get(&test_app(5), "/collections/sensors/items?f=html").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/html");
    assert!(body_text(response).await.contains("<table>"));
}

#[tokio::test]
async fn test_edr_collection_requires_limit() {
    let response = get(&test_app(0), "/collections/measurements/items").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("Limit must be set!"));
}

#[tokio::test]
async fn test_locations_without_id_is_empty_array() {
    let response = get(&test_app(10), "/collections/sensors/locations?limit=10").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "[]");
}

#[tokio::test]
async fn test_locations_lookup_defaults_to_plain_json() {
    let response = get(
        &test_app(10),
        "/collections/sensors/locations?limit=100&locationId=500",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );

    let body = body_json(response).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 5);
    assert!(items[0].get("province").is_some());
}

#[tokio::test]
async fn test_locations_lookup_geojson() {
    let response = get(
        &test_app(10),
        "/collections/sensors/locations?limit=100&locationId=500&f=geojson",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/geo+json"
    );

    let body = body_json(response).await;
    assert_eq!(body["numberMatched"], 5);
    assert_eq!(body["type"], "FeatureCollection");
    // EDR shape nests fields under parameters
    assert!(body["features"][0]["properties"]["parameters"].is_object());
}

#[tokio::test]
async fn test_locations_bad_id() {
    let response = get(
        &test_app(5),
        "/collections/sensors/locations?limit=10&locationId=abc",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response)
        .await
        .contains("Error in locationId parameter"));
}

#[tokio::test]
async fn test_unsupported_query_kinds() {
    for (path, kind) in [
        ("position", "Position"),
        ("radius", "Radius"),
        ("area", "Area"),
        ("cube", "Cube"),
        ("trajectory", "Trajectory"),
        ("corridor", "Corridor"),
        ("instances", "Instances"),
    ] {
        let response = get(&test_app(0), &format!("/collections/sensors/{}", path)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(response)
            .await
            .contains(&format!("{} query not yet supported", kind)));
    }
}

#[tokio::test]
async fn test_insert_then_query() {
    let app = test_app(2);
    let body = json!({"bulk": true, "items": [sensor(100), sensor(101)]}).to_string();
    let request = Request::builder()
        .method("POST")
        .uri("/collections/sensors")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["inserted"], 2);

    let response = get(&app, "/collections/sensors/items").await;
    let body = body_json(response).await;
    assert_eq!(body["numberMatched"], 4);
}

#[tokio::test]
async fn test_insert_skips_duplicate_ids() {
    let app = test_app(2);
    let body = json!({"bulk": true, "items": [sensor(0), sensor(100)]}).to_string();
    let request = Request::builder()
        .method("POST")
        .uri("/collections/sensors")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["inserted"], 1);
}

#[tokio::test]
async fn test_insert_store_failure_is_duplicated() {
    let app = test_app(0);
    let body = json!({"bulk": true, "items": [sensor(0)]}).to_string();
    let request = Request::builder()
        .method("POST")
        .uri("/collections/ghost")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_text(response).await.contains("Duplicated"));
}

#[tokio::test]
async fn test_accept_header_negotiation() {
    let request = Request::builder()
        .uri("/collections/sensors/items")
        .header(header::ACCEPT, "application/json")
        .body(Body::empty())
        .unwrap();
    let response = test_app(3).oneshot(request).await.unwrap();
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );

    let body = body_json(response).await;
    assert!(body.is_array());
}
