//! Unified error type.

use thiserror::Error;

/// The error type returned by waypost's fallible operations.
///
/// Request-time outcomes (no matching route, a route without a handler) are
/// expressed as [`Response`](crate::Response) statuses, not as `Error`s. This
/// type surfaces build-time pattern problems and reverse-routing failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// `reverse_route` was asked for a key the table does not know.
    #[error("route for `{0}` not found")]
    RouteNotFound(String),

    /// A route parameter named by the template received no value.
    #[error("route `{key}` requires a value for parameter `{param}`")]
    MissingParam { key: String, param: String },

    /// A path template could not be compiled.
    #[error("invalid route pattern `{path}`: {reason}")]
    InvalidPattern { path: String, reason: String },
}

impl Error {
    pub(crate) fn invalid_pattern(path: &str, reason: impl ToString) -> Self {
        Self::InvalidPattern { path: path.to_owned(), reason: reason.to_string() }
    }
}
