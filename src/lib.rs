//! ip_enrich library: batched IP geolocation enrichment
//!
//! This library fetches IP address lists and enriches each address with
//! geolocation and network metadata from an ip-api compatible lookup service.
//! Lookups run in small concurrent groups with pacing between groups, retry
//! once on rate limiting, and are reassembled in input order whatever order
//! they complete in. Every upstream call can be routed directly or through a
//! relay without the pipeline noticing.
//!
//! # Example
//!
//! ```no_run
//! use ip_enrich::config::Category;
//! use ip_enrich::{run_query, Config, RenderMode};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     categories: vec![Category::BestCf, Category::BestProxy],
//!     mode: RenderMode::DetailTable,
//!     ..Default::default()
//! };
//!
//! let result = run_query(&config).await?;
//! println!("{}", result.report);
//! println!("{} looked up, {} failed", result.successful, result.failed);
//! # Ok(())
//! # }
//! ```
//!
//! Lower-level building blocks are public too: [`transport::fetch_text`],
//! [`lookup::DetailFetcher`], [`batch::run_batch`] and [`report::format_batch`].
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

#![warn(missing_docs)]

mod app;
pub mod batch;
pub mod config;
mod error_handling;
pub mod export;
pub mod initialization;
pub mod lookup;
pub mod report;
mod run;
pub mod source;
pub mod transport;

// Re-export public API
pub use app::cancel_on_ctrl_c;
pub use batch::{run_batch, BatchResult, BatchStatus, LookupOutcome};
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{
    BatchError, ErrorType, InitializationError, LookupError, ProcessingStats, TransportError,
};
pub use lookup::{DetailFetcher, DetailRecord, DetailSource};
pub use report::{RenderMode, Report, Section};
pub use run::{run_query, run_query_with_cancel, QueryReport, ENRICHMENT_NOTICE};
pub use transport::Transport;
