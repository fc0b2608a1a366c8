//! Output format tokens and their media-type tables.
//!
//! Formats are a closed set known at compile time; the tables here replace
//! runtime-populated format dictionaries so there is no mutation after
//! startup. A request may still name a format outside this set through the
//! `?f=` override, which is carried verbatim as [`RequestedFormat::Other`]
//! and rejected later by the renderer.

/// Output formats the API knows how to name.
///
/// `Xml` and `JsonLd` are declared for content negotiation and alternate
/// links but are not implemented by the items rendering path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Plain JSON (`application/json`).
    Json,
    /// GeoJSON (`application/geo+json`).
    GeoJson,
    /// HTML (`text/html`).
    Html,
    /// JSON-LD (`application/ld+json`).
    JsonLd,
    /// XML (`text/xml`).
    Xml,
}

impl Format {
    /// The short token used in `?f=` query parameters.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::GeoJson => "geojson",
            Format::Html => "html",
            Format::JsonLd => "jsonld",
            Format::Xml => "xml",
        }
    }

    /// The media type used in Content-Type headers and link `type` fields.
    pub const fn media_type(&self) -> &'static str {
        match self {
            Format::Json => "application/json",
            Format::GeoJson => "application/geo+json",
            Format::Html => "text/html",
            Format::JsonLd => "application/ld+json",
            Format::Xml => "text/xml",
        }
    }

    /// Parse a short format token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "json" => Some(Format::Json),
            "geojson" => Some(Format::GeoJson),
            "html" => Some(Format::Html),
            "jsonld" => Some(Format::JsonLd),
            "xml" => Some(Format::Xml),
            _ => None,
        }
    }

    /// Parse a media type from an Accept header entry.
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        match media_type {
            "application/json" => Some(Format::Json),
            "application/geo+json" => Some(Format::GeoJson),
            "text/html" => Some(Format::Html),
            "application/ld+json" => Some(Format::JsonLd),
            "text/xml" => Some(Format::Xml),
            _ => None,
        }
    }
}

/// The format a request resolved to.
///
/// A `?f=` override is honored verbatim, even when it names a format the
/// endpoint does not accept; such tokens survive as `Other` so the renderer
/// can reject them with a message naming the requested format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestedFormat {
    /// A format from the closed [`Format`] set.
    Known(Format),
    /// A verbatim token outside the known set.
    Other(String),
}

impl RequestedFormat {
    /// Parse a `?f=` token, keeping unknown tokens verbatim.
    pub fn parse(token: &str) -> Self {
        match Format::from_token(token) {
            Some(format) => RequestedFormat::Known(format),
            None => RequestedFormat::Other(token.to_string()),
        }
    }

    /// The short token for this format.
    pub fn as_str(&self) -> &str {
        match self {
            RequestedFormat::Known(format) => format.as_str(),
            RequestedFormat::Other(token) => token,
        }
    }

    /// The media type for link `type` fields. Unknown tokens fall back to
    /// `application/json`.
    pub fn media_type(&self) -> &'static str {
        match self {
            RequestedFormat::Known(format) => format.media_type(),
            RequestedFormat::Other(_) => Format::Json.media_type(),
        }
    }
}

impl From<Format> for RequestedFormat {
    fn from(format: Format) -> Self {
        RequestedFormat::Known(format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        for format in [
            Format::Json,
            Format::GeoJson,
            Format::Html,
            Format::JsonLd,
            Format::Xml,
        ] {
            assert_eq!(Format::from_token(format.as_str()), Some(format));
            assert_eq!(Format::from_media_type(format.media_type()), Some(format));
        }
    }

    #[test]
    fn test_unknown_token() {
        assert_eq!(Format::from_token("csv"), None);
        assert_eq!(Format::from_media_type("text/csv"), None);
    }

    #[test]
    fn test_requested_format_known() {
        let f = RequestedFormat::parse("geojson");
        assert_eq!(f, RequestedFormat::Known(Format::GeoJson));
        assert_eq!(f.as_str(), "geojson");
        assert_eq!(f.media_type(), "application/geo+json");
    }

    #[test]
    fn test_requested_format_other_is_verbatim() {
        let f = RequestedFormat::parse("netcdf");
        assert_eq!(f, RequestedFormat::Other("netcdf".to_string()));
        assert_eq!(f.as_str(), "netcdf");
        // Unknown formats use the JSON media type in link metadata.
        assert_eq!(f.media_type(), "application/json");
    }
}
