//! Error type definitions.
//!
//! This module defines the typed errors of each pipeline layer and the
//! `ErrorType` categories counted in `ProcessingStats`.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use crate::batch::BatchResult;
use crate::config::HTTP_STATUS_TOO_MANY_REQUESTS;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Failures of the transport layer.
///
/// The transport never retries; callers decide what a failure means.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The upstream (or relay) answered with a non-success status.
    #[error("HTTP error: {status}")]
    HttpStatus {
        /// Status code of the response.
        status: u16,
    },

    /// The requested strategy name is not one of the known transports.
    #[error("Unknown transport strategy: {0}")]
    UnknownStrategy(String),

    /// The custom transport was selected with an empty template.
    #[error("Custom relay template is empty")]
    EmptyTemplate,

    /// The resolved request URL could not be parsed.
    #[error("Invalid request URL '{url}': {source}")]
    InvalidUrl {
        /// The offending URL.
        url: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },

    /// The request failed before a status was received (connect, timeout, body).
    #[error("Request failed: {0}")]
    Request(#[from] ReqwestError),
}

impl TransportError {
    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::HttpStatus { status } => Some(*status),
            TransportError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the failure is a structured Too Many Requests response.
    pub fn is_too_many_requests(&self) -> bool {
        self.status() == Some(HTTP_STATUS_TOO_MANY_REQUESTS)
    }
}

/// Failures of a single detail lookup attempt.
#[derive(Error, Debug)]
pub enum LookupError {
    /// The lookup service (or a relay in front of it) is throttling us.
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// The lookup failed for any other reason.
    #[error("Lookup failed: {0}")]
    UpstreamFailure(String),

    /// The response body was not the expected JSON document.
    #[error("Malformed lookup response: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl LookupError {
    /// Only rate-limited lookups are worth retrying.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, LookupError::RateLimited(_))
    }
}

/// Non-recoverable failures of a batch run.
///
/// Individual lookup failures are not errors at this level; they are recorded
/// as `LookupOutcome::Failure` inside the `BatchResult`.
#[derive(Error, Debug)]
pub enum BatchError {
    /// Groups must hold at least one identifier.
    #[error("Group size must be at least 1")]
    InvalidGroupSize,

    /// An identifier was empty or whitespace.
    #[error("Invalid identifier at position {position}: {value:?}")]
    InvalidIdentifier {
        /// Zero-based position in the input list.
        position: usize,
        /// The rejected value.
        value: String,
    },

    /// Cancellation was requested before every group was launched.
    #[error("Batch cancelled after {} of {total} identifiers", .partial.len())]
    Cancelled {
        /// Outcomes of the groups that completed before cancellation.
        partial: BatchResult,
        /// Number of identifiers in the original request.
        total: usize,
    },
}

/// Categories of failures counted during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    /// Lookup rejected because of rate limiting
    RateLimited,
    /// Lookup service reported a failure
    UpstreamFailure,
    /// Lookup response could not be parsed
    MalformedResponse,
    /// Non-success HTTP status (other than 429)
    HttpStatus,
    /// Request timed out
    RequestTimeout,
    /// Connection could not be established
    RequestConnect,
    /// Any other request failure
    RequestOther,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    /// Human-readable label used in the statistics summary.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::RateLimited => "Rate limited",
            ErrorType::UpstreamFailure => "Lookup service failure",
            ErrorType::MalformedResponse => "Malformed lookup response",
            ErrorType::HttpStatus => "HTTP status error",
            ErrorType::RequestTimeout => "HTTP request timeout",
            ErrorType::RequestConnect => "HTTP connect error",
            ErrorType::RequestOther => "HTTP request error",
        }
    }
}
