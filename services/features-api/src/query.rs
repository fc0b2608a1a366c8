//! Query-string parsing and predicate building for items requests.
//!
//! Raw query strings are parsed here because filter keys are dynamic
//! (`field__op` pairs driven by collection configuration) and because
//! pagination links need the original string verbatim.

use feature_store::record::PATH_SEPARATOR;
use feature_store::Predicate;
use features_protocol::params::{coerce_filter_value, resolve_filter_key, COMMON_PARAMETERS};
use features_protocol::{parse_interval, ApiError};

use crate::config::CollectionConfig;

/// Decode a raw query string into ordered key/value pairs.
pub fn parse_query_pairs(raw: &str) -> Vec<(String, String)> {
    form_urlencoded::parse(raw.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// First value for a key, if present.
pub fn first_value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Translate a dotted config field name to the store's nested-path form.
pub fn to_store_path(field: &str) -> String {
    field.replace('.', PATH_SEPARATOR)
}

/// Parse a `bbox` value as 4 or 6 comma-separated floats.
pub fn parse_bbox(raw: &str) -> Result<Vec<f64>, ApiError> {
    let coords: Vec<f64> = raw
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|_| ApiError::MalformedBbox)?;

    if coords.len() != 4 && coords.len() != 6 {
        return Err(ApiError::MalformedBbox);
    }
    Ok(coords)
}

/// Build the bbox containment predicate for a collection.
///
/// A collection without a geometry filter field ignores `bbox` entirely;
/// the vertical coordinates of a 6-number box are dropped.
pub fn bbox_predicate(collection: &CollectionConfig, coords: &[f64]) -> Option<Predicate> {
    let field = collection.geometry_filter_field.as_deref()?;

    let bbox = if coords.len() == 6 {
        [coords[0], coords[1], coords[3], coords[4]]
    } else {
        [coords[0], coords[1], coords[2], coords[3]]
    };

    Some(Predicate::WithinBbox {
        path: to_store_path(field),
        bbox,
    })
}

/// Build the datetime range predicate for a collection.
///
/// Collections without a datetime field ignore the parameter; an
/// unparsable interval is logged and dropped, leaving the query
/// unconstrained rather than failing the request.
pub fn datetime_predicate(collection: &CollectionConfig, raw: &str) -> Option<Predicate> {
    let field = collection.datetime_field.as_deref()?;

    match parse_interval(raw) {
        Ok(bounds) => Some(Predicate::DatetimeRange {
            path: to_store_path(field),
            start: bounds.start,
            end: bounds.end,
        }),
        Err(e) => {
            tracing::warn!("Ignoring datetime parameter {:?}: {}", raw, e);
            None
        }
    }
}

/// Build field filter predicates from the remaining query pairs.
///
/// Keys must already have passed validation; anything that does not
/// resolve against the collection's filter fields is skipped here.
pub fn field_predicates(
    pairs: &[(String, String)],
    collection: &CollectionConfig,
) -> Vec<Predicate> {
    let mut predicates = Vec::new();
    for (key, value) in pairs {
        if COMMON_PARAMETERS.contains(&key.as_str()) {
            continue;
        }
        if let Some((field, op)) = resolve_filter_key(key, &collection.filter_fields) {
            predicates.push(Predicate::Field {
                path: to_store_path(field),
                op,
                value: coerce_filter_value(op, value),
            });
        }
    }
    predicates
}

/// Parse the `limit` parameter; absent is `None`, not an error.
pub fn parse_limit(raw: Option<&str>) -> Result<Option<i64>, ApiError> {
    match raw {
        None => Ok(None),
        Some(value) => {
            let limit: i64 = value.parse().map_err(|_| ApiError::InvalidLimit)?;
            if limit < -1 {
                return Err(ApiError::InvalidLimit);
            }
            Ok(Some(limit))
        }
    }
}

/// Parse the `offset` parameter; absent defaults to zero.
pub fn parse_offset(raw: Option<&str>) -> Result<usize, ApiError> {
    match raw {
        None => Ok(0),
        Some(value) => value.parse().map_err(|_| ApiError::InvalidOffset),
    }
}
