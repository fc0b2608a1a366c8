//! Content negotiation for the `f` query parameter and Accept header.
//!
//! Negotiation never fails a request: an explicit `?f=` wins verbatim
//! (even when it names a format the endpoint cannot render, leaving the
//! rejection to the renderer), otherwise the Accept header is consulted,
//! and anything unusable falls back to the endpoint's first accepted
//! format.

use axum::http::{header, HeaderMap};

use features_protocol::{Format, RequestedFormat};

/// Formats the items endpoints can be asked for.
pub const ITEM_FORMATS: &[Format] = &[Format::GeoJson, Format::Json, Format::Html];

/// Formats the locations endpoint can be asked for; plain JSON is the
/// default when nothing is requested.
pub const LOCATION_FORMATS: &[Format] = &[Format::Json, Format::GeoJson];

/// Negotiate the output format from the `f` parameter and Accept header.
///
/// Priority:
/// 1. Non-empty `f` query parameter, taken verbatim.
/// 2. Accept header entries sorted by quality (ties keep header order),
///    first one naming an accepted format; `*/*` selects the default.
/// 3. The endpoint's first accepted format.
pub fn negotiate_format(
    accepted: &[Format],
    f_param: Option<&str>,
    headers: &HeaderMap,
) -> RequestedFormat {
    // Treat empty f= as absent (OGC test suites send f= with empty value)
    if let Some(f) = f_param {
        if !f.is_empty() {
            return RequestedFormat::parse(f);
        }
    }

    let default = RequestedFormat::Known(accepted[0]);

    let accept = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("*/*");

    // Parse Accept header with quality values
    let mut accepted_types: Vec<(&str, f32)> = accept
        .split(',')
        .filter_map(|s| {
            let mut parts = s.split(';');
            let media_type = parts.next()?.trim();
            if media_type.is_empty() {
                return None;
            }

            // Parse quality value (default 1.0)
            let quality = parts
                .find_map(|p| p.trim().strip_prefix("q=")?.parse::<f32>().ok())
                .unwrap_or(1.0);

            Some((media_type, quality))
        })
        .collect();

    // Stable sort by quality keeps header position as the tie-break
    accepted_types.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    for (media_type, _) in &accepted_types {
        if *media_type == "*/*" {
            return default;
        }

        if let Some(format) = Format::from_media_type(media_type) {
            if accepted.contains(&format) {
                return RequestedFormat::Known(format);
            }
        }
    }

    default
}
