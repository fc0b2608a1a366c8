//! OGC API - Features Protocol
//!
//! This crate provides types and utilities for implementing an OGC API -
//! Features server: output format tables and negotiation primitives, the
//! datetime interval grammar, query-string editing for pagination links,
//! the filter parameter/operator model, response serializers, and the
//! error taxonomy shared by the HTTP service.
//!
//! # Example
//!
//! ```rust
//! use features_protocol::{Format, Link};
//!
//! let link = Link::new("http://localhost:8080/collections/sensors/items", "self")
//!     .with_type(Format::GeoJson.media_type())
//!     .with_title("This document");
//! assert_eq!(link.type_.as_deref(), Some("application/geo+json"));
//! ```

pub mod errors;
pub mod formats;
pub mod geojson;
pub mod intervals;
pub mod params;
pub mod query_string;
pub mod responses;
pub mod types;

// Re-export commonly used types
pub use errors::ApiError;
pub use formats::{Format, RequestedFormat};
pub use geojson::{EdrFeatureCollection, FeatureCollection, RenderOptions};
pub use intervals::{parse_interval, DatetimeBounds, IntervalParseError};
pub use params::{FilterOp, FilterValue};
pub use responses::{
    CollectionMetadata, Collections, ConformanceClasses, ExceptionResponse, LandingPage,
};
pub use types::{Link, Record};

/// OGC API conformance class URIs declared by this implementation.
pub mod conformance {
    /// OGC API - Common conformance classes.
    pub const COMMON: &[&str] = &[
        "http://www.opengis.net/spec/ogcapi-common-1/1.0/conf/core",
        "http://www.opengis.net/spec/ogcapi-common-2/1.0/conf/collections",
        "http://www.opengis.net/spec/ogcapi-common-1/1.0/conf/landing-page",
        "http://www.opengis.net/spec/ogcapi-common-1/1.0/conf/json",
        "http://www.opengis.net/spec/ogcapi-common-1/1.0/conf/html",
        "http://www.opengis.net/spec/ogcapi-common-1/1.0/conf/oas30",
    ];

    /// OGC API - Features conformance classes.
    pub const FEATURES: &[&str] = &[
        "http://www.opengis.net/spec/ogcapi-features-1/1.0/conf/core",
        "http://www.opengis.net/spec/ogcapi-features-1/1.0/req/oas30",
        "http://www.opengis.net/spec/ogcapi-features-1/1.0/conf/html",
        "http://www.opengis.net/spec/ogcapi-features-1/1.0/conf/geojson",
        "http://www.opengis.net/spec/ogcapi-features-2/1.0/conf/crs",
        "http://www.opengis.net/spec/ogcapi-features-3/1.0/conf/queryables",
        "http://www.opengis.net/spec/ogcapi-features-3/1.0/conf/queryables-query-parameters",
    ];
}

/// Default coordinate reference system identifiers.
pub mod crs {
    /// CRS84 (WGS84 lon/lat), the default for all collections.
    pub const DEFAULT: &str = "http://www.opengis.net/def/crs/OGC/1.3/CRS84";

    /// CRS list advertised per collection.
    pub const DEFAULT_LIST: &[&str] = &[
        "http://www.opengis.net/def/crs/OGC/1.3/CRS84",
        "http://www.opengis.net/def/crs/OGC/1.3/CRS84h",
    ];
}
