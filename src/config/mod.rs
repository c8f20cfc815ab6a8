//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (endpoints, relays, batching and retry parameters)
//! - IP list categories
//! - CLI option types and parsing

mod category;
mod constants;
mod types;

// Re-export all constants
pub use category::Category;
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel, TransportKind};
