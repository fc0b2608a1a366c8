//! API error taxonomy.

use thiserror::Error;

use crate::responses::ExceptionResponse;

/// Errors surfaced by the query pipeline.
///
/// Every variant maps to an HTTP status and a message naming the specific
/// cause. `Duplicated` keeps the original 500 mapping for insert conflicts
/// rather than 409.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// A query key outside the accepted set.
    #[error("Unknown Parameter: {0}")]
    UnknownParameter(String),

    /// bbox did not parse as 4 or 6 comma-separated floats.
    #[error("malformed bbox parameter")]
    MalformedBbox,

    /// limit was present but not an integer.
    #[error("Error in limit parameter")]
    InvalidLimit,

    /// offset was present but not a non-negative integer.
    #[error("Error in offset parameter")]
    InvalidOffset,

    /// locationId was present but not an integer.
    #[error("Error in locationId parameter")]
    InvalidLocationId,

    /// An EDR collection was queried without a limit.
    #[error("Limit must be set!")]
    MissingLimit,

    /// The request would exceed the hard element cap.
    #[error("Too many elements")]
    TooManyElements,

    /// HTML rendering beyond the hard cap.
    #[error("Request too large for HTML representation - Max 100 elements")]
    HtmlTooLarge,

    /// A requested-but-unimplemented output format.
    #[error("Format {0} not yet supported")]
    UnsupportedFormat(String),

    /// A requested-but-unimplemented query kind.
    #[error("{0} query not yet supported")]
    UnsupportedQuery(String),

    /// The named collection is not registered.
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    /// An insert conflicted in the record store.
    #[error("Duplicated")]
    Duplicated,

    /// Any other record-store failure.
    #[error("Store error: {0}")]
    Store(String),
}

impl ApiError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::UnknownParameter(_)
            | ApiError::MalformedBbox
            | ApiError::InvalidLimit
            | ApiError::InvalidOffset
            | ApiError::InvalidLocationId
            | ApiError::MissingLimit
            | ApiError::TooManyElements
            | ApiError::HtmlTooLarge
            | ApiError::UnsupportedFormat(_)
            | ApiError::UnsupportedQuery(_) => 400,
            ApiError::CollectionNotFound(_) => 404,
            ApiError::Duplicated | ApiError::Store(_) => 500,
        }
    }

    /// Convert to an ExceptionResponse body.
    pub fn to_exception(&self) -> ExceptionResponse {
        match self.status_code() {
            400 => ExceptionResponse::bad_request(self.to_string()),
            404 => ExceptionResponse::not_found(self.to_string()),
            _ => ExceptionResponse::internal_error(self.to_string()),
        }
    }
}
