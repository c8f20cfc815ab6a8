//! Single-address detail lookup with bounded retry.

use std::sync::Arc;

use log::{debug, warn};

use super::types::{DetailRecord, LookupResponse};
use crate::config::{LOOKUP_BASE_URL, LOOKUP_FIELDS, MAX_LOOKUP_RETRIES};
use crate::error_handling::{
    categorize_lookup_error, categorize_transport_error, classify_transport_error,
    get_retry_strategy, LookupError, ProcessingStats,
};
use crate::transport::{fetch_text, Transport};

/// Looks up addresses against an ip-api compatible service.
///
/// Cheap to share: the HTTP client and statistics are reference counted.
#[derive(Clone)]
pub struct DetailFetcher {
    client: Arc<reqwest::Client>,
    transport: Transport,
    base_url: String,
    stats: Arc<ProcessingStats>,
}

impl DetailFetcher {
    /// Creates a fetcher for the public lookup service.
    pub fn new(client: Arc<reqwest::Client>, transport: Transport) -> Self {
        Self::with_base_url(client, transport, LOOKUP_BASE_URL)
    }

    /// Creates a fetcher for a lookup service at `base_url`.
    pub fn with_base_url(client: Arc<reqwest::Client>, transport: Transport, base_url: &str) -> Self {
        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        Self {
            client,
            transport,
            base_url,
            stats: Arc::new(ProcessingStats::new()),
        }
    }

    /// Records failures into `stats` instead of a private counter set.
    pub fn with_stats(mut self, stats: Arc<ProcessingStats>) -> Self {
        self.stats = stats;
        self
    }

    /// Failure counters accumulated by this fetcher.
    pub fn stats(&self) -> &Arc<ProcessingStats> {
        &self.stats
    }

    /// Lookup URL for one address, before transport rewriting.
    pub fn lookup_url(&self, identifier: &str) -> String {
        format!("{}{}?fields={}", self.base_url, identifier.trim(), LOOKUP_FIELDS)
    }

    /// Fetches details for `identifier`, retrying once on rate limiting.
    ///
    /// Returns `None` when the lookup fails for good; the reason is logged and
    /// counted, never raised.
    pub async fn lookup(&self, identifier: &str) -> Option<DetailRecord> {
        let mut retry_delays = get_retry_strategy();
        let mut attempt = 0;

        loop {
            let error = match self.lookup_once(identifier).await {
                Ok(record) => {
                    debug!("Lookup for {} succeeded on attempt {}", identifier, attempt + 1);
                    return Some(record);
                }
                Err(error) => error,
            };

            warn!(
                "Lookup for {} failed (attempt {}/{}): {}",
                identifier,
                attempt + 1,
                MAX_LOOKUP_RETRIES + 1,
                error
            );

            if !error.is_rate_limited() {
                return None;
            }
            let delay = retry_delays.next()?;
            debug!("Retrying {} in {:?}", identifier, delay);
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    async fn lookup_once(&self, identifier: &str) -> Result<DetailRecord, LookupError> {
        let url = self.lookup_url(identifier);
        let body = match fetch_text(&self.client, &url, &self.transport).await {
            Ok(body) => body,
            Err(e) => {
                self.stats.increment_error(categorize_transport_error(&e));
                return Err(classify_transport_error(e));
            }
        };

        let record = serde_json::from_str::<LookupResponse>(&body)
            .map_err(LookupError::from)
            .and_then(DetailRecord::from_response);
        if let Err(e) = &record {
            self.stats.increment_error(categorize_lookup_error(e));
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher(base: &str) -> DetailFetcher {
        DetailFetcher::with_base_url(Arc::new(reqwest::Client::new()), Transport::Direct, base)
    }

    #[test]
    fn test_lookup_url_includes_field_selection() {
        let url = fetcher("http://ip-api.com/json/").lookup_url("1.1.1.1");
        assert_eq!(url, format!("http://ip-api.com/json/1.1.1.1?fields={}", LOOKUP_FIELDS));
    }

    #[test]
    fn test_base_url_normalized() {
        let url = fetcher("http://localhost:8080/json").lookup_url(" 8.8.8.8 ");
        assert!(url.starts_with("http://localhost:8080/json/8.8.8.8?fields="));
    }

    #[test]
    fn test_field_selection_requests_region_name() {
        assert!(LOOKUP_FIELDS.split(',').any(|f| f == "regionName"));
        assert!(LOOKUP_FIELDS.split(',').any(|f| f == "hosting"));
    }
}
