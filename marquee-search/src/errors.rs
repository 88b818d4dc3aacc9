//! Error types for movie lookup.

use thiserror::Error;

/// Errors that can occur while resolving a movie.
///
/// None of these reach the user verbatim; the resolver collapses them into
/// a single generic message and logs the original for diagnosis.
#[derive(Debug, Error)]
pub enum MovieSearchError {
    /// The request never produced a response.
    #[error("Network error: {reason}")]
    NetworkError {
        /// The reason for the network error
        reason: String,
    },

    /// The API answered with a non-success status.
    #[error("HTTP {status} from {endpoint}: {message}")]
    HttpStatus {
        /// Numeric HTTP status code
        status: u16,
        /// Endpoint path that was requested
        endpoint: String,
        /// Status message reported by the API, if any
        message: String,
    },

    /// The response body was not the JSON we expected.
    #[error("Parse error: {reason}")]
    ParseError {
        /// The reason for the parse error
        reason: String,
    },

    /// A field the projection depends on was absent.
    #[error("Missing field in response: {field}")]
    MissingField {
        /// Dotted path of the missing field
        field: &'static str,
    },
}

impl MovieSearchError {
    /// Whether the failure happened before any response was read.
    pub fn is_transport(&self) -> bool {
        matches!(self, MovieSearchError::NetworkError { .. })
    }
}
