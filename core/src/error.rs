//! Error types for the HTTP client.
//!
//! # Design
//! Only hard failures live here: an argument the caller should never have
//! passed (unknown method, malformed header, non-scalar parameter, bad
//! status) or a transport that could not complete. Expected absence
//! (missing header, out-of-range segment) is modelled with `Option`, and the
//! URL's soft setters report rejection with a plain `bool`.

use thiserror::Error;

/// Errors returned by the request/response setters and by `Sender`s.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The method is not one of HEAD, GET, POST, PUT, PATCH, DELETE.
    #[error("invalid method {0:?}: must be one of HEAD, GET, POST, PUT, PATCH, DELETE")]
    InvalidMethod(String),

    #[error("invalid header {name:?}: {reason}")]
    InvalidHeader { name: String, reason: &'static str },

    #[error("invalid parameter {name:?}: {reason}")]
    InvalidParameter { name: String, reason: &'static str },

    /// HTTP status must be a positive integer that fits in a `u16`.
    #[error("invalid HTTP status {0}: must be a positive integer")]
    InvalidStatus(i64),

    /// The sender could not complete the round-trip.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}
