//! Metadata response types: landing page, conformance, collection
//! descriptions, and error bodies.

use serde::{Deserialize, Serialize};

use crate::conformance;
use crate::crs;
use crate::types::Link;

/// Landing page response for the API root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LandingPage {
    /// Title of the API.
    pub title: String,

    /// Description of the API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Links to related resources.
    pub links: Vec<Link>,
}

impl LandingPage {
    /// Create a new landing page with standard links.
    pub fn new(title: impl Into<String>, description: impl Into<String>, base_url: &str) -> Self {
        let links = vec![
            Link::new(base_url, "self")
                .with_type("application/json")
                .with_title("This document"),
            Link::new(format!("{}/conformance", base_url), "conformance")
                .with_type("application/json")
                .with_title("Conformance classes"),
            Link::new(format!("{}/collections", base_url), "data")
                .with_type("application/json")
                .with_title("Collections"),
        ];

        Self {
            title: title.into(),
            description: Some(description.into()),
            links,
        }
    }
}

/// Conformance declaration response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConformanceClasses {
    /// List of conformance class URIs.
    #[serde(rename = "conformsTo")]
    pub conforms_to: Vec<String>,
}

impl ConformanceClasses {
    /// Conformance classes for the current implementation: OGC API Common
    /// plus the Features classes.
    pub fn current() -> Self {
        Self {
            conforms_to: conformance::COMMON
                .iter()
                .chain(conformance::FEATURES.iter())
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Check if a conformance class is declared.
    pub fn contains(&self, class: &str) -> bool {
        self.conforms_to.iter().any(|c| c == class)
    }
}

/// Collections list response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Collections {
    /// Links for the list itself.
    pub links: Vec<Link>,

    /// The collection descriptions.
    pub collections: Vec<CollectionMetadata>,
}

/// Description of a single collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CollectionMetadata {
    /// Unique collection identifier.
    pub id: String,

    /// Human-readable title.
    pub title: String,

    /// Description of the collection.
    pub description: String,

    /// Links to the collection and its items.
    pub links: Vec<Link>,

    /// Spatial and temporal extent.
    pub extent: Extent,

    /// Item type (always "feature").
    #[serde(rename = "itemType")]
    pub item_type: String,

    /// Supported coordinate reference systems.
    pub crs: Vec<String>,
}

impl CollectionMetadata {
    /// Create a collection description with standard links and the
    /// default whole-world extent.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        base_url: &str,
    ) -> Self {
        let id = id.into();
        let links = vec![
            Link::new(format!("{}/collections/{}", base_url, id), "self")
                .with_type("application/json")
                .with_title("This collection"),
            Link::new(format!("{}/collections/{}/items", base_url, id), "items")
                .with_type("application/geo+json")
                .with_title("Items as GeoJSON"),
        ];

        Self {
            id,
            title: title.into(),
            description: description.into(),
            links,
            extent: Extent::default(),
            item_type: "feature".to_string(),
            crs: crs::DEFAULT_LIST.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Spatial and temporal extent of a collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Extent {
    /// Spatial extent.
    pub spatial: SpatialExtent,

    /// Temporal extent.
    pub temporal: TemporalExtent,
}

impl Default for Extent {
    fn default() -> Self {
        Self {
            spatial: SpatialExtent {
                bbox: vec![[-180.0, -90.0, 180.0, 90.0]],
                crs: crs::DEFAULT.to_string(),
            },
            temporal: TemporalExtent {
                interval: vec![[None, None]],
            },
        }
    }
}

/// Spatial extent as one or more bounding boxes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpatialExtent {
    /// Bounding boxes in `[min_x, min_y, max_x, max_y]` order.
    pub bbox: Vec<[f64; 4]>,

    /// CRS of the bounding boxes.
    pub crs: String,
}

/// Temporal extent as one or more intervals; `null` sides are unbounded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemporalExtent {
    /// Intervals as `[start, end]` RFC 3339 strings or null.
    pub interval: Vec<[Option<String>; 2]>,
}

/// Exception response body for errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExceptionResponse {
    /// Exception type identifier.
    #[serde(rename = "type")]
    pub type_: String,

    /// Human-readable title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// HTTP status code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,

    /// Detailed error message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ExceptionResponse {
    /// Create a new exception response.
    pub fn new(type_: impl Into<String>, status: u16, detail: impl Into<String>) -> Self {
        Self {
            type_: type_.into(),
            title: None,
            status: Some(status),
            detail: Some(detail.into()),
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Create a 400 Bad Request exception.
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(
            "http://www.opengis.net/def/exceptions/ogcapi-features-1/1.0/invalid-parameter-value",
            400,
            detail,
        )
        .with_title("Bad Request")
    }

    /// Create a 404 Not Found exception.
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(
            "http://www.opengis.net/def/exceptions/ogcapi-features-1/1.0/not-found",
            404,
            detail,
        )
        .with_title("Not Found")
    }

    /// Create a 500 Internal Server Error exception.
    pub fn internal_error(detail: impl Into<String>) -> Self {
        Self::new(
            "http://www.opengis.net/def/exceptions/ogcapi-features-1/1.0/server-error",
            500,
            detail,
        )
        .with_title("Internal Server Error")
    }
}
