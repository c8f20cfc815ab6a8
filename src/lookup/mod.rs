//! Per-address detail lookups.

mod fetcher;
mod types;

use std::future::Future;

pub use fetcher::DetailFetcher;
pub use types::DetailRecord;

/// Anything that can resolve an address to its details.
///
/// Implementations absorb their own failures: `None` means the lookup failed
/// after whatever retries the source applies. The batch scheduler is generic
/// over this trait.
pub trait DetailSource: Sync {
    /// Fetches details for one identifier.
    fn fetch_details(&self, identifier: &str) -> impl Future<Output = Option<DetailRecord>> + Send;
}

impl DetailSource for DetailFetcher {
    fn fetch_details(&self, identifier: &str) -> impl Future<Output = Option<DetailRecord>> + Send {
        self.lookup(identifier)
    }
}
