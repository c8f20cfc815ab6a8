//! Error categorization and retry strategy.
//!
//! Rate-limit detection prefers the structured HTTP status. Message inspection
//! is only a fallback for errors that carry no status (opaque request failures
//! and the lookup service's own `message` field).

use std::time::Duration;
use tokio_retry::strategy::FixedInterval;

use super::types::{ErrorType, LookupError, TransportError};
use crate::config::{HTTP_STATUS_TOO_MANY_REQUESTS, MAX_LOOKUP_RETRIES, RATE_LIMIT_BACKOFF_MS};

/// Creates the retry strategy for rate-limited lookups.
///
/// Yields one delay per permitted retry: `MAX_LOOKUP_RETRIES` items of
/// `RATE_LIMIT_BACKOFF_MS` each. An exhausted iterator means the retry budget
/// is spent.
pub fn get_retry_strategy() -> impl Iterator<Item = Duration> {
    FixedInterval::from_millis(RATE_LIMIT_BACKOFF_MS).take(MAX_LOOKUP_RETRIES)
}

/// Returns true when a free-form error message describes rate limiting.
pub fn is_rate_limit_message(message: &str) -> bool {
    let message = message.to_lowercase();
    message.contains("429") || message.contains("rate limit")
}

/// Converts a failed transport call into a lookup failure.
///
/// A status code decides on its own. A request error without one is inspected
/// by its text with the URL stripped, since the URL embeds the identifier.
/// Resolution errors never count as rate limiting.
pub fn classify_transport_error(error: TransportError) -> LookupError {
    match error.status() {
        Some(HTTP_STATUS_TOO_MANY_REQUESTS) => return LookupError::RateLimited(error.to_string()),
        Some(_) => return LookupError::UpstreamFailure(error.to_string()),
        None => {}
    }

    match error {
        TransportError::Request(e) => {
            let message = TransportError::Request(e.without_url()).to_string();
            if is_rate_limit_message(&message) {
                LookupError::RateLimited(message)
            } else {
                LookupError::UpstreamFailure(message)
            }
        }
        other => LookupError::UpstreamFailure(other.to_string()),
    }
}

/// Converts the lookup service's failure message into a lookup failure.
pub fn classify_upstream_message(message: &str) -> LookupError {
    if is_rate_limit_message(message) {
        LookupError::RateLimited(message.to_string())
    } else {
        LookupError::UpstreamFailure(message.to_string())
    }
}

/// Categorizes a `reqwest::Error` into an `ErrorType`.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ErrorType {
    if let Some(status) = error.status() {
        return if status.as_u16() == HTTP_STATUS_TOO_MANY_REQUESTS {
            ErrorType::RateLimited
        } else {
            ErrorType::HttpStatus
        };
    }

    if error.is_timeout() {
        ErrorType::RequestTimeout
    } else if error.is_connect() {
        ErrorType::RequestConnect
    } else {
        ErrorType::RequestOther
    }
}

/// Categorizes a transport failure for statistics.
pub fn categorize_transport_error(error: &TransportError) -> ErrorType {
    match error {
        TransportError::Request(e) => categorize_reqwest_error(e),
        TransportError::HttpStatus { status } if *status == HTTP_STATUS_TOO_MANY_REQUESTS => {
            ErrorType::RateLimited
        }
        TransportError::HttpStatus { .. } => ErrorType::HttpStatus,
        TransportError::UnknownStrategy(_)
        | TransportError::EmptyTemplate
        | TransportError::InvalidUrl { .. } => ErrorType::RequestOther,
    }
}

/// Categorizes a lookup failure for statistics.
pub fn categorize_lookup_error(error: &LookupError) -> ErrorType {
    match error {
        LookupError::RateLimited(_) => ErrorType::RateLimited,
        LookupError::UpstreamFailure(_) => ErrorType::UpstreamFailure,
        LookupError::Malformed(_) => ErrorType::MalformedResponse,
    }
}
