//! Application initialization and resource setup.
//!
//! - HTTP client (timeout, User-Agent)
//! - Logger (plain or JSON)

mod client;
mod logger;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
