//! Conformance declaration handler.

use axum::{http::StatusCode, response::Response};
use features_protocol::ConformanceClasses;

use super::body_response;

/// GET /conformance - Conformance classes
pub async fn conformance_handler() -> Response {
    let conformance = ConformanceClasses::current();

    let json = serde_json::to_string_pretty(&conformance).unwrap_or_default();

    body_response(StatusCode::OK, "application/json", json)
}

#[cfg(test)]
mod tests {
    use features_protocol::ConformanceClasses;

    #[test]
    fn test_conformance_declares_features_core() {
        let conf = ConformanceClasses::current();
        assert!(conf.contains("http://www.opengis.net/spec/ogcapi-features-1/1.0/conf/core"));
    }
}
