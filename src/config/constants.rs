//! Configuration constants.
//!
//! Endpoints, relay addresses, batching and retry parameters used throughout the
//! pipeline. Most of these are defaults that `Config` can override.

use std::time::Duration;

// Batch scheduling
/// Number of lookups issued concurrently within one group.
/// The public lookup service throttles aggressively, so groups stay small.
pub const DEFAULT_GROUP_SIZE: usize = 3;
/// Pause inserted between consecutive groups (never after the last group).
pub const GROUP_PACING_DELAY: Duration = Duration::from_millis(20);

// Retry
/// Delay before retrying a rate-limited lookup, in milliseconds.
pub const RATE_LIMIT_BACKOFF_MS: u64 = 500;
/// Retries allowed after the initial attempt. Only rate-limited lookups retry.
pub const MAX_LOOKUP_RETRIES: usize = 1;

// HTTP client
/// Per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// User-Agent sent with every request unless overridden with `--user-agent`.
pub const DEFAULT_USER_AGENT: &str = concat!("ip_enrich/", env!("CARGO_PKG_VERSION"));

// Upstream services
/// Base URL of the geolocation lookup service. The identifier is appended as a path segment.
pub const LOOKUP_BASE_URL: &str = "http://ip-api.com/json/";
/// Field selection requested from the lookup service.
pub const LOOKUP_FIELDS: &str = "status,message,country,countryCode,region,regionName,city,zip,lat,lon,timezone,isp,org,as,mobile,proxy,hosting,query";
/// Status value the lookup service reports for a successful lookup.
pub const LOOKUP_STATUS_SUCCESS: &str = "success";
/// Base URL of the IP list service. Queried with `?type=<category>&down=false`.
pub const LIST_BASE_URL: &str = "https://ipdb.api.030101.xyz/";

// Indirection relays
/// Prefix relay: the raw target URL is appended to this address.
pub const CORS_ANYWHERE_RELAY: &str = "https://cors-anywhere.herokuapp.com/";
/// Query relay: the encoded target URL is passed as the `url` parameter.
pub const ALLORIGINS_RELAY: &str = "https://api.allorigins.win/raw";
/// Origin announced to the prefix relay, which rejects requests without one.
pub const DEFAULT_RELAY_ORIGIN: &str = "http://localhost";
/// Placeholder replaced by the encoded target URL in custom relay templates.
pub const TARGET_PLACEHOLDER: &str = "{target}";

/// Sentinel used for detail fields the lookup service left empty.
pub const UNKNOWN_VALUE: &str = "Unknown";

/// HTTP status code for Too Many Requests.
pub const HTTP_STATUS_TOO_MANY_REQUESTS: u16 = 429;
