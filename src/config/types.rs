//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration. `Config` is the single immutable value handed to
//! [`run_query`](crate::run_query); every mode flag travels inside it.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, ValueEnum};

use crate::config::category::Category;
use crate::config::constants::{
    DEFAULT_GROUP_SIZE, DEFAULT_RELAY_ORIGIN, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
    LIST_BASE_URL, LOOKUP_BASE_URL,
};
use crate::error_handling::TransportError;
use crate::report::{ModeSelector, RenderMode};
use crate::transport::Transport;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How requests reach upstream services.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TransportKind {
    /// Call the target directly
    Direct,
    /// Prefix relay (cors-anywhere style)
    CorsAnywhere,
    /// Query relay (allorigins style)
    #[value(name = "allorigins")]
    AllOrigins,
    /// User-supplied relay template, see `--proxy-template`
    Custom,
}

impl FromStr for TransportKind {
    type Err = TransportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(TransportKind::Direct),
            "cors-anywhere" => Ok(TransportKind::CorsAnywhere),
            "allorigins" => Ok(TransportKind::AllOrigins),
            "custom" => Ok(TransportKind::Custom),
            _ => Err(TransportError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Query configuration.
///
/// Parsed from the command line by the binary, or constructed programmatically.
///
/// # Examples
///
/// ```no_run
/// use ip_enrich::config::Category;
/// use ip_enrich::{Config, RenderMode};
///
/// let config = Config {
///     categories: vec![Category::BestCf],
///     mode: RenderMode::SummaryTable,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ip_enrich",
    version,
    about = "Fetches IP lists and enriches each address with geolocation details"
)]
pub struct Config {
    /// IP list to fetch (repeatable)
    #[arg(short, long = "category", value_enum, default_values_t = [Category::BestCf])]
    pub categories: Vec<Category>,

    /// Read addresses from this file instead of the list service ('-' for stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output representation
    #[arg(short, long, value_enum, default_value_t = RenderMode::PlainText)]
    pub mode: RenderMode,

    /// Shorthand for `--mode detail-table`
    #[arg(long, overrides_with = "summary")]
    pub details: bool,

    /// Shorthand for `--mode summary-table`
    #[arg(long, overrides_with = "details")]
    pub summary: bool,

    /// How requests reach upstream services
    #[arg(short, long, value_enum, default_value_t = TransportKind::Direct)]
    pub transport: TransportKind,

    /// Relay template for `--transport custom`; `{target}` marks where the encoded URL goes
    #[arg(long, env = "IP_ENRICH_PROXY_TEMPLATE")]
    pub proxy_template: Option<String>,

    /// Origin header announced to the cors-anywhere relay
    #[arg(long, default_value = DEFAULT_RELAY_ORIGIN)]
    pub relay_origin: String,

    /// Lookups issued concurrently per group
    #[arg(long, default_value_t = DEFAULT_GROUP_SIZE)]
    pub group_size: usize,

    /// Per-request timeout in seconds
    #[arg(long = "timeout", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Base URL of the geolocation lookup service
    #[arg(long, env = "IP_ENRICH_LOOKUP_URL", default_value = LOOKUP_BASE_URL)]
    pub lookup_url: String,

    /// Base URL of the IP list service
    #[arg(long, default_value = LIST_BASE_URL)]
    pub list_url: String,

    /// Directory to export plain-text results into
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Export one file per category instead of a single merged file
    #[arg(long, requires = "output")]
    pub split_output: bool,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Config {
    /// Effective render mode after applying the `--details`/`--summary` shorthands.
    pub fn render_mode(&self) -> RenderMode {
        let mut selector = ModeSelector::from(self.mode);
        if self.details {
            selector.enable_details();
        }
        if self.summary {
            selector.enable_summary();
        }
        selector.mode()
    }

    /// Builds the transport described by `--transport` and its companion flags.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::EmptyTemplate` when the custom transport is
    /// selected without a usable template.
    pub fn build_transport(&self) -> Result<Transport, TransportError> {
        Transport::from_kind(
            self.transport,
            &self.relay_origin,
            self.proxy_template.as_deref(),
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            categories: vec![Category::BestCf],
            input: None,
            mode: RenderMode::PlainText,
            details: false,
            summary: false,
            transport: TransportKind::Direct,
            proxy_template: None,
            relay_origin: DEFAULT_RELAY_ORIGIN.to_string(),
            group_size: DEFAULT_GROUP_SIZE,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            lookup_url: LOOKUP_BASE_URL.to_string(),
            list_url: LIST_BASE_URL.to_string(),
            output: None,
            split_output: false,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}
