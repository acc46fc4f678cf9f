//! Error types for the movie data layer.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers distinguish "the movie
//! does not exist" from "the server returned an unexpected status." All other
//! non-2xx responses land in `HttpError` with the raw status and body.
//! `Network` covers every failure where no response arrived at all, timeouts
//! included. Form validation has its own type and never reaches the service.

use thiserror::Error;

/// Errors returned by the client, transport and service layers.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// No response was received (connection refused, DNS, timeout).
    #[error("network failure: {0}")]
    Network(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

/// Client-side form validation failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Ratings are on a 0 to 5 scale.
    #[error("rating {0} is outside 0-5")]
    RatingOutOfRange(f64),

    #[error("passwords do not match")]
    PasswordMismatch,
}

/// Invalid client configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("base url must not be empty")]
    EmptyBaseUrl,

    #[error("invalid timeout {0:?}: expected a positive number of seconds")]
    InvalidTimeout(String),
}
