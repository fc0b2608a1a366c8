//! Request size limits and the element cap.

use features_protocol::ApiError;

/// Limit applied when a Features request omits `limit`.
pub const LIMIT_DEFAULT: i64 = 100;

/// Hard cap on elements a single request may address; also the meaning
/// of the `limit=-1` sentinel.
pub const MAX_ELEMENTS: i64 = 1_000_000;

/// Most rows an HTML page will render.
pub const HTML_MAX_ELEMENTS: usize = 100;

/// Most records a locations response may return.
pub const LOCATIONS_MAX_ELEMENTS: usize = 100_000;

/// Reject requests that address more than the element cap.
///
/// The check runs on the requested limit before any sentinel resolution
/// or clamping, so `limit=-1` passes even over a large match.
pub fn check_element_cap(limit: i64, number_matched: usize) -> Result<(), ApiError> {
    if limit > MAX_ELEMENTS && number_matched as i64 > MAX_ELEMENTS {
        return Err(ApiError::TooManyElements);
    }
    Ok(())
}

/// Reject locations responses that reach the locations cap.
pub fn check_locations_cap(number_returned: usize) -> Result<(), ApiError> {
    if number_returned >= LOCATIONS_MAX_ELEMENTS {
        return Err(ApiError::TooManyElements);
    }
    Ok(())
}

/// Resolve the `limit=-1` sentinel to the element cap.
pub fn resolve_limit(limit: i64) -> i64 {
    if limit == -1 {
        MAX_ELEMENTS
    } else {
        limit
    }
}
