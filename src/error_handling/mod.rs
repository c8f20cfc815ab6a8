//! Error handling and processing statistics.
//!
//! This module provides:
//! - Typed errors for each pipeline layer (transport, lookup, batch, initialization)
//! - Rate-limit classification and the lookup retry strategy
//! - Per-category failure counters

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{
    categorize_lookup_error, categorize_transport_error, classify_transport_error,
    classify_upstream_message, get_retry_strategy,
};
pub use stats::ProcessingStats;
pub use types::{
    BatchError, ErrorType, InitializationError, LookupError, TransportError,
};
