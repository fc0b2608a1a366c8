//! ISO-8601 datetime interval parsing.
//!
//! The `datetime` query parameter follows the OGC interval grammar:
//!
//! ```text
//! interval-closed     = date-time "/" date-time
//! interval-open-start = "../" date-time
//! interval-open-end   = date-time "/.."
//! ```
//!
//! Parsing returns an explicit `Result`; whether a malformed interval is a
//! client error or a no-op constraint is the caller's decision.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

/// Errors produced when an interval string cannot be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntervalParseError {
    /// The string did not split into exactly two `/`-separated parts.
    #[error("interval must have exactly two parts separated by '/'")]
    NotAnInterval,

    /// One side was neither `..` nor a parsable ISO-8601 date-time.
    #[error("unparsable datetime literal: {0}")]
    InvalidDatetime(String),
}

/// Parsed interval bounds. An absent side means no constraint on that side;
/// `(None, None)` is a valid "no constraint at all" outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DatetimeBounds {
    /// Inclusive lower bound.
    pub start: Option<NaiveDateTime>,
    /// Inclusive upper bound.
    pub end: Option<NaiveDateTime>,
}

/// The open-bound marker used on either side of an interval.
const OPEN_BOUND: &str = "..";

/// Parse a single ISO-8601 date-time literal.
///
/// Accepts RFC 3339 (offset-aware, normalized to UTC), naive datetimes with
/// or without seconds, and bare dates (midnight).
pub fn parse_datetime_literal(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M") {
        return Some(dt);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d.and_time(NaiveTime::MIN));
    }
    None
}

/// Parse an `A/B` interval where each side is a date-time literal or `..`.
pub fn parse_interval(datetime: &str) -> Result<DatetimeBounds, IntervalParseError> {
    let parts: Vec<&str> = datetime.split('/').collect();
    if parts.len() != 2 {
        return Err(IntervalParseError::NotAnInterval);
    }

    let parse_side = |side: &str| -> Result<Option<NaiveDateTime>, IntervalParseError> {
        if side == OPEN_BOUND {
            return Ok(None);
        }
        parse_datetime_literal(side)
            .map(Some)
            .ok_or_else(|| IntervalParseError::InvalidDatetime(side.to_string()))
    };

    Ok(DatetimeBounds {
        start: parse_side(parts[0])?,
        end: parse_side(parts[1])?,
    })
}
