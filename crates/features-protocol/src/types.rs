//! Core types used across the API.

use serde::{Deserialize, Serialize};

/// A single record as stored in and returned by the record store.
///
/// Records are schemaless JSON objects; the collection descriptor decides
/// which fields are displayed, filterable, and which one carries geometry.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// A hyperlink to a related resource.
///
/// Links are attached to every paginated response for navigation (self,
/// collection, alternate, next, prev) and to the landing page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Link {
    /// The URI of the linked resource.
    pub href: String,

    /// The relationship type (e.g., "self", "next", "alternate").
    pub rel: String,

    /// The media type of the linked resource.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    /// A human-readable title for the link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Link {
    /// Create a new link with required fields.
    pub fn new(href: impl Into<String>, rel: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            rel: rel.into(),
            type_: None,
            title: None,
        }
    }

    /// Set the media type.
    pub fn with_type(mut self, type_: impl Into<String>) -> Self {
        self.type_ = Some(type_.into());
        self
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}
