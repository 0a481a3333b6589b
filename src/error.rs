//! Error types for the ZeroBounce client.

use crate::middleware::redact;
use thiserror::Error;

/// A non-2xx answer from the service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("service responded with HTTP {status}: {message}")]
pub struct ServiceError {
    /// HTTP status code returned by the service.
    pub status: u16,
    /// Human-readable description extracted from the response.
    pub message: String,
}

impl ServiceError {
    /// Build a classified error for `status`.
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// `true` for 5xx answers.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    /// `true` for 4xx answers, usually a rejected key or bad parameters.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }
}

/// Errors that can occur while talking to ZeroBounce.
#[derive(Debug, Error)]
pub enum Error {
    /// No API key was configured when a call was made.
    #[error("no ZeroBounce API key configured (set ZEROBOUNCE_API_KEY or Config::set_api_key)")]
    MissingApiKey,

    /// The configuration cannot produce a valid request.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The service answered with a non-success HTTP status.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The request did not complete within the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The request could not be delivered (DNS, refused connection, reset).
    #[error("connection failed: {0}")]
    Connection(String),

    /// The response could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl Error {
    /// Whether the client itself is misconfigured.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::MissingApiKey | Error::InvalidConfig(_))
    }

    /// Whether the round trip failed without a usable answer from the service.
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            Error::Timeout(_) | Error::Connection(_) | Error::Decode(_)
        )
    }

    /// HTTP status of a service error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Service(err) => Some(err.status),
            _ => None,
        }
    }
}

// reqwest puts the request URL, and with it the API key, into its messages.
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let err = err.without_url();
        let message = redact(&err.to_string()).into_owned();
        if err.is_timeout() {
            Error::Timeout(message)
        } else if err.is_builder() {
            Error::InvalidConfig(message)
        } else if err.is_decode() || err.is_body() {
            Error::Decode(message)
        } else {
            Error::Connection(message)
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}
