//! Landing page handler.

use axum::{extract::Extension, http::StatusCode, response::Response};
use features_protocol::LandingPage;
use std::sync::Arc;

use crate::state::AppState;

use super::body_response;

/// GET / - Landing page
pub async fn landing_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    let landing = LandingPage::new(
        "Sensor Features API",
        "OGC API - Features access to sensor stations and their measurements",
        &state.base_url,
    );

    let json = serde_json::to_string_pretty(&landing).unwrap_or_default();

    body_response(StatusCode::OK, "application/json", json)
}

#[cfg(test)]
mod tests {
    use features_protocol::LandingPage;

    #[test]
    fn test_landing_page_structure() {
        let landing = LandingPage::new("Test API", "Test description", "http://localhost:8080");

        assert!(landing.links.iter().any(|l| l.rel == "self"));
        assert!(landing.links.iter().any(|l| l.rel == "conformance"));
        assert!(landing.links.iter().any(|l| l.rel == "data"));
    }
}
